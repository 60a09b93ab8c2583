//! Core material types: [`MaterialId`], [`Material`], and its uniform slots.

use std::collections::BTreeMap;
use std::sync::Arc;

use thiserror::Error;

use crate::color::{Color, ColorError};
use crate::texture::Texture;

/// Uniform slot names shared by the shader programs.
pub mod uniforms {
    /// Matcap lighting texture.
    pub const MATCAP: &str = "matcap";
    /// Amplitude of the distance-based indirect light falloff.
    pub const INDIRECT_DISTANCE_AMPLITUDE: &str = "uIndirectDistanceAmplitude";
    /// Strength of the distance-based indirect light.
    pub const INDIRECT_DISTANCE_STRENGTH: &str = "uIndirectDistanceStrength";
    /// Exponent of the distance-based falloff.
    pub const INDIRECT_DISTANCE_POWER: &str = "uIndirectDistancePower";
    /// Strength of the angle-based indirect light.
    pub const INDIRECT_ANGLE_STRENGTH: &str = "uIndirectAngleStrength";
    /// Offset applied to the surface angle before falloff.
    pub const INDIRECT_ANGLE_OFFSET: &str = "uIndirectAngleOffset";
    /// Exponent of the angle-based falloff.
    pub const INDIRECT_ANGLE_POWER: &str = "uIndirectAnglePower";
    /// Indirect light tint.
    pub const INDIRECT_COLOR: &str = "uIndirectColor";
    /// Floor background gradient texture.
    pub const BACKGROUND: &str = "tBackground";
    /// Floor baked shadow texture.
    pub const SHADOW: &str = "tShadow";
    /// Tint applied to the floor shadow.
    pub const SHADOW_COLOR: &str = "uShadowColor";
}

// ---------------------------------------------------------------------------
// MaterialId
// ---------------------------------------------------------------------------

/// Index of a material inside a [`crate::MaterialCatalog`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MaterialId(pub u32);

// ---------------------------------------------------------------------------
// MaterialError
// ---------------------------------------------------------------------------

/// Errors returned by material setup and parameter synchronization.
#[derive(Debug, Error)]
pub enum MaterialError {
    /// A color parameter could not be parsed.
    #[error("parameter {parameter} has an invalid color: {source}")]
    InvalidColor {
        /// Parameter name as exposed to the inspector.
        parameter: &'static str,
        /// Underlying parse failure.
        source: ColorError,
    },

    /// The id does not refer to a material in the catalog.
    #[error("unknown material id {0:?}")]
    UnknownMaterial(MaterialId),

    /// RON deserialization error for a parameter preset.
    #[error("ron parse error: {0}")]
    Ron(#[from] ron::error::SpannedError),
}

// ---------------------------------------------------------------------------
// ShaderProgram / MaterialFamily
// ---------------------------------------------------------------------------

/// Opaque reference to an externally compiled shader program.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ShaderProgram(Arc<str>);

impl ShaderProgram {
    /// References a shader program by its asset key.
    pub fn new(key: &str) -> Self {
        Self(Arc::from(key))
    }

    /// The asset key this program was created from.
    pub fn key(&self) -> &str {
        &self.0
    }
}

/// Schema a material's uniform slots follow.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MaterialFamily {
    /// Matcap lighting with distance/angle indirect falloff.
    Matcap,
    /// Gradient background with baked shadow.
    Floor,
    /// Diagnostic material rendering surface normals as color.
    Normal,
}

// ---------------------------------------------------------------------------
// UniformValue / Material
// ---------------------------------------------------------------------------

/// Current value of a uniform slot.
#[derive(Clone, Debug)]
pub enum UniformValue {
    /// Scalar parameter.
    Float(f32),
    /// RGB color.
    Color(Color),
    /// Texture binding; `None` until something is bound.
    Texture(Option<Arc<Texture>>),
}

impl PartialEq for UniformValue {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Float(a), Self::Float(b)) => a == b,
            (Self::Color(a), Self::Color(b)) => a == b,
            (Self::Texture(a), Self::Texture(b)) => match (a, b) {
                (Some(a), Some(b)) => Arc::ptr_eq(a, b),
                (None, None) => true,
                _ => false,
            },
            _ => false,
        }
    }
}

/// A parameterized shader instance: named uniform slots plus a program reference.
///
/// Slots are fixed at construction by the family; [`Material::set_uniform`]
/// only writes into existing slots.
#[derive(Clone, Debug)]
pub struct Material {
    name: String,
    family: MaterialFamily,
    shader: ShaderProgram,
    uniforms: BTreeMap<&'static str, UniformValue>,
}

impl Material {
    /// Creates a matcap material bound to the given lighting texture.
    ///
    /// Indirect-light slots start zeroed; the parameter store fills them.
    pub fn matcap(name: impl Into<String>, matcap: Option<Arc<Texture>>) -> Self {
        let uniforms = BTreeMap::from([
            (uniforms::MATCAP, UniformValue::Texture(matcap)),
            (uniforms::INDIRECT_DISTANCE_AMPLITUDE, UniformValue::Float(0.0)),
            (uniforms::INDIRECT_DISTANCE_STRENGTH, UniformValue::Float(0.0)),
            (uniforms::INDIRECT_DISTANCE_POWER, UniformValue::Float(0.0)),
            (uniforms::INDIRECT_ANGLE_STRENGTH, UniformValue::Float(0.0)),
            (uniforms::INDIRECT_ANGLE_OFFSET, UniformValue::Float(0.0)),
            (uniforms::INDIRECT_ANGLE_POWER, UniformValue::Float(0.0)),
            (uniforms::INDIRECT_COLOR, UniformValue::Color(Color::BLACK)),
        ]);
        Self {
            name: name.into(),
            family: MaterialFamily::Matcap,
            shader: ShaderProgram::new("matcap"),
            uniforms,
        }
    }

    /// Creates an unbound floor material.
    pub fn floor(name: impl Into<String>) -> Self {
        let uniforms = BTreeMap::from([
            (uniforms::BACKGROUND, UniformValue::Texture(None)),
            (uniforms::SHADOW, UniformValue::Texture(None)),
            (uniforms::SHADOW_COLOR, UniformValue::Color(Color::BLACK)),
        ]);
        Self {
            name: name.into(),
            family: MaterialFamily::Floor,
            shader: ShaderProgram::new("floor"),
            uniforms,
        }
    }

    /// Creates the diagnostic normal-color material. It has no uniforms.
    pub fn normal() -> Self {
        Self {
            name: "normal".to_string(),
            family: MaterialFamily::Normal,
            shader: ShaderProgram::new("normal"),
            uniforms: BTreeMap::new(),
        }
    }

    /// Human-readable name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Renames the material, used when cloning per-instance copies.
    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    /// Uniform schema family.
    pub fn family(&self) -> MaterialFamily {
        self.family
    }

    /// Shader program this material parameterizes.
    pub fn shader(&self) -> &ShaderProgram {
        &self.shader
    }

    /// Returns the slot's current value.
    pub fn uniform(&self, name: &str) -> Option<&UniformValue> {
        self.uniforms.get(name)
    }

    /// Iterates `(slot name, value)` in name order.
    pub fn uniforms(&self) -> impl Iterator<Item = (&'static str, &UniformValue)> {
        self.uniforms.iter().map(|(name, value)| (*name, value))
    }

    /// Writes a value into an existing slot. Returns `false` if there is no such slot.
    pub fn set_uniform(&mut self, name: &str, value: UniformValue) -> bool {
        match self.uniforms.get_mut(name) {
            Some(slot) => {
                *slot = value;
                true
            }
            None => false,
        }
    }

    /// Scalar slot value.
    pub fn float(&self, name: &str) -> Option<f32> {
        match self.uniforms.get(name)? {
            UniformValue::Float(v) => Some(*v),
            _ => None,
        }
    }

    /// Color slot value.
    pub fn color(&self, name: &str) -> Option<Color> {
        match self.uniforms.get(name)? {
            UniformValue::Color(c) => Some(*c),
            _ => None,
        }
    }

    /// Bound texture of a texture slot.
    pub fn texture(&self, name: &str) -> Option<&Arc<Texture>> {
        match self.uniforms.get(name)? {
            UniformValue::Texture(t) => t.as_ref(),
            _ => None,
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
