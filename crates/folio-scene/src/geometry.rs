use folio_materials::MaterialId;

/// Identity of imported geometry data owned by the render engine.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct GeometryId(pub u64);

/// Geometry a mesh draws.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Geometry {
    /// Pre-loaded geometry, referenced by identity.
    Imported(GeometryId),
    /// Flat plane in the local XY plane, centred on the origin.
    Plane {
        width: f32,
        height: f32,
        width_segments: u32,
        height_segments: u32,
    },
    /// UV sphere centred on the origin.
    Sphere {
        radius: f32,
        width_segments: u32,
        height_segments: u32,
    },
}

impl Geometry {
    /// Plane subdivided `segments × segments`.
    pub fn plane(width: f32, height: f32, segments: u32) -> Self {
        Self::Plane {
            width,
            height,
            width_segments: segments,
            height_segments: segments,
        }
    }

    /// Sphere subdivided `segments × segments`.
    pub fn sphere(radius: f32, segments: u32) -> Self {
        Self::Sphere {
            radius,
            width_segments: segments,
            height_segments: segments,
        }
    }
}

/// Renderable: geometry plus an optional catalog material.
#[derive(Clone, Debug, PartialEq)]
pub struct Mesh {
    /// What to draw.
    pub geometry: Geometry,
    /// How to shade it. `None` until a material is attached.
    pub material: Option<MaterialId>,
}

impl Mesh {
    /// Mesh with no material attached.
    pub fn new(geometry: Geometry) -> Self {
        Self {
            geometry,
            material: None,
        }
    }

    /// Mesh with `material` attached.
    pub fn with_material(geometry: Geometry, material: MaterialId) -> Self {
        Self {
            geometry,
            material: Some(material),
        }
    }
}
