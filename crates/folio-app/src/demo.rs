//! Built-in demo level used when no asset pipeline is attached.
//!
//! Textures are flat-colored stand-ins; the hierarchies mirror what an
//! exported level provides: a render hierarchy and a collision hierarchy.

use folio_config::AssetsConfig;
use folio_materials::{Resources, Texture};
use folio_scene::{Geometry, GeometryId, Mesh, SceneNode, Transform};
use folio_world::ObjectOptions;
use glam::{Quat, Vec3};
use image::{DynamicImage, Rgb, RgbImage};

const MATCAP_SIZE: u32 = 64;

fn flat_texture(label: &str, rgb: [u8; 3]) -> Texture {
    let image = RgbImage::from_pixel(MATCAP_SIZE, MATCAP_SIZE, Rgb(rgb));
    Texture::from_image(label, DynamicImage::ImageRgb8(image))
}

/// Resource provider holding every texture named in `assets`.
pub fn resources(assets: &AssetsConfig) -> Resources {
    let mut resources = Resources::new();
    resources.insert(&assets.rock_matcap, flat_texture("rock", [0x8a, 0x7f, 0x74]));
    resources.insert(
        &assets.building_matcap,
        flat_texture("building", [0xc9, 0xb8, 0xa6]),
    );
    resources.insert(&assets.floor_shadow, flat_texture("shadow", [0xff, 0xff, 0xff]));
    resources
}

fn imported(name: &str, id: u64, transform: Transform) -> SceneNode {
    SceneNode::with_mesh(name, Mesh::new(Geometry::Imported(GeometryId(id))))
        .with_transform(transform)
}

/// The intro area: a floor, a building, two rocks and a stray prop, plus
/// two collision boxes.
pub fn intro_level() -> ObjectOptions {
    let base = SceneNode::container()
        .with_child(imported(
            "floor",
            1,
            Transform::IDENTITY.with_scale(Vec3::new(10.84, 1.0, 10.84)),
        ))
        .with_child(imported(
            "building1",
            2,
            Transform::from_position(Vec3::new(-3.0, 0.0, -2.0)),
        ))
        .with_child(imported("rock1", 3, Transform::from_position(Vec3::new(4.0, 0.0, 4.0))))
        .with_child(imported("rock2", 4, Transform::from_position(Vec3::new(-5.0, 0.0, 3.0))))
        .with_child(imported("signpost", 5, Transform::IDENTITY));

    let collision = SceneNode::container()
        .with_child(SceneNode::new("box01").with_transform(
            Transform::from_position(Vec3::new(-3.0, -2.0, 1.5))
                .with_scale(Vec3::new(3.0, 3.0, 3.0)),
        ))
        .with_child(SceneNode::new("cube02").with_transform(
            Transform::from_position(Vec3::new(4.0, 4.0, 0.5))
                .with_rotation(Quat::from_rotation_z(0.4))
                .with_scale(Vec3::new(1.5, 1.0, 1.0)),
        ));

    ObjectOptions::new_static(base, collision)
}
