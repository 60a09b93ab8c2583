//! Tests for world composition against a recording physics backend.

use folio_materials::{MaterialFamily, Resources, UniformValue, uniforms};
use folio_scene::{GeometryId, Transform};
use glam::Vec3;
use image::DynamicImage;

use super::*;
use crate::testing::FakePhysics;

fn resources() -> Resources {
    let mut resources = Resources::new();
    for name in ["matcapRockTexture", "matcapBuildingTexture", "floorShadowTexture"] {
        resources.insert(name, Texture::from_image(name, DynamicImage::new_rgb8(2, 2)));
    }
    resources
}

fn world() -> World {
    World::new(&AssetsConfig::default(), &resources()).unwrap()
}

fn level(index: u64) -> ObjectOptions {
    let base = SceneNode::container()
        .with_child(SceneNode::with_mesh(
            "rock1",
            Mesh::new(Geometry::Imported(GeometryId(index))),
        ))
        .with_child(
            SceneNode::with_mesh("floor", Mesh::new(Geometry::Imported(GeometryId(100 + index))))
                .with_transform(Transform::IDENTITY.with_scale(Vec3::new(5.0, 1.0, 5.0))),
        );
    let collision = SceneNode::container()
        .with_child(SceneNode::new("box01").with_transform(
            Transform::from_position(Vec3::new(0.0, 0.0, 1.0)).with_scale(Vec3::new(2.0, 4.0, 6.0)),
        ))
        .with_child(SceneNode::new("cube02"));
    ObjectOptions::new_static(base, collision)
}

#[test]
fn test_new_binds_resources_and_syncs() {
    let world = world();
    let rock = world.catalog().by_role(MaterialRole::Rock);
    assert_eq!(rock.texture(uniforms::MATCAP).unwrap().label(), "matcapRockTexture");
    assert_eq!(rock.float(uniforms::INDIRECT_DISTANCE_STRENGTH), Some(0.7));

    let floor = world.catalog().by_role(MaterialRole::Floor);
    assert_eq!(floor.texture(uniforms::SHADOW).unwrap().label(), "floorShadowTexture");
    assert!(floor.texture(uniforms::BACKGROUND).is_some());
}

#[test]
fn test_missing_resources_leave_slots_unbound() {
    let world = World::new(&AssetsConfig::default(), &Resources::new()).unwrap();
    let rock = world.catalog().by_role(MaterialRole::Rock);
    assert_eq!(rock.uniform(uniforms::MATCAP), Some(&UniformValue::Texture(None)));
}

#[test]
fn test_invalid_preset_color_fails_construction() {
    let mut preset = MaterialPreset::default();
    preset.matcap.indirect_color = "orange".to_string();
    let result = World::with_preset(&AssetsConfig::default(), &resources(), preset);
    assert!(matches!(result, Err(WorldError::Material(_))));
}

#[test]
fn test_two_registrations_in_insertion_order() {
    let mut world = world();
    let mut physics = FakePhysics::default();

    let a = world.add_object(level(1), &mut physics).unwrap();
    let b = world.add_object(level(2), &mut physics).unwrap();

    assert_eq!(world.registry().len(), 2);
    let firsts: Vec<_> = world
        .registry()
        .iter()
        .map(|o| o.container.children()[0].mesh.as_ref().unwrap().geometry)
        .collect();
    assert_eq!(
        firsts,
        [Geometry::Imported(GeometryId(1)), Geometry::Imported(GeometryId(2))]
    );
    assert_ne!(a, b);
}

#[test]
fn test_object_keeps_last_collider_only() {
    let mut world = world();
    let mut physics = FakePhysics::default();
    let id = world.add_object(level(1), &mut physics).unwrap();

    assert_eq!(physics.added.len(), 2);
    let object = world.registry().get(id).unwrap();
    assert_eq!(object.kind, ObjectKind::Static);
    assert_eq!(
        object.collider,
        Some(folio_physics::ColliderHandle(
            rapier3d::prelude::ColliderHandle::from_raw_parts(1, 0)
        ))
    );
}

#[test]
fn test_object_without_collision_children() {
    let mut world = world();
    let mut physics = FakePhysics::default();
    let options = ObjectOptions::new_static(
        SceneNode::container().with_child(SceneNode::new("tree")),
        SceneNode::container(),
    );
    let id = world.add_object(options, &mut physics).unwrap();
    assert!(world.registry().get(id).unwrap().collider.is_none());
}

#[test]
fn test_unsupported_type_leaves_world_unchanged() {
    let mut world = world();
    let mut physics = FakePhysics::default();
    let mut options = level(1);
    options.kind = "dynamic".to_string();

    let materials = world.catalog().len();
    let err = world.add_object(options, &mut physics).unwrap_err();
    assert!(matches!(err, WorldError::UnsupportedObjectType(ref kind) if kind == "dynamic"));
    assert!(world.registry().is_empty());
    assert!(physics.added.is_empty());
    assert_eq!(world.catalog().len(), materials);
}

#[test]
fn test_floor_uses_instance_shadow() {
    let mut world = world();
    let mut physics = FakePhysics::default();
    let shadow = Arc::new(Texture::from_image("levelShadow", DynamicImage::new_rgb8(2, 2)));
    let id = world
        .add_object(level(1).with_floor_shadow(shadow.clone()), &mut physics)
        .unwrap();

    let floor = &world.registry().get(id).unwrap().container.children()[1];
    let material = floor.mesh.as_ref().unwrap().material.unwrap();
    let material = world.catalog().get(material).unwrap();
    assert_eq!(material.family(), MaterialFamily::Floor);
    assert!(Arc::ptr_eq(material.texture(uniforms::SHADOW).unwrap(), &shadow));
    assert_eq!(
        floor.mesh.as_ref().unwrap().geometry,
        Geometry::plane(10.0, 10.0, 10)
    );
}

#[test]
fn test_dummy_sphere_follows_body() {
    let mut world = world();
    let mut physics = FakePhysics::default();
    let body = FakePhysics::body(0);
    world.attach_dummy(body, 1.0);

    let dummy = world.dummy_node().unwrap();
    let mesh = dummy.mesh.as_ref().unwrap();
    assert_eq!(mesh.geometry, Geometry::sphere(1.0, 32));
    assert_eq!(mesh.material, Some(world.catalog().role(MaterialRole::Rock)));

    physics.bodies.insert(body, Vec3::new(1.0, 2.0, 3.0));
    assert_eq!(world.sync_frame(&physics), 1);
    assert_eq!(world.dummy_node().unwrap().position(), Vec3::new(1.0, 3.0, 2.0));
}

#[test]
fn test_top_level_nodes_order() {
    let mut world = world();
    let mut physics = FakePhysics::default();
    world.attach_dummy(FakePhysics::body(0), 1.0);
    world.add_object(level(1), &mut physics).unwrap();
    world.add_object(level(2), &mut physics).unwrap();

    let nodes: Vec<_> = world.top_level_nodes().collect();
    assert_eq!(nodes.len(), 3);
    assert_eq!(nodes[0].name, "dummy");
    assert_eq!(
        nodes[2].children()[0].mesh.as_ref().unwrap().geometry,
        Geometry::Imported(GeometryId(2))
    );
}

#[test]
fn test_inspector_number_edit_reaches_materials() {
    let mut world = world();
    assert!(world.set_parameter_number(uniforms::INDIRECT_ANGLE_POWER, 2.5).unwrap());
    for role in [MaterialRole::Rock, MaterialRole::Building] {
        assert_eq!(
            world.catalog().by_role(role).float(uniforms::INDIRECT_ANGLE_POWER),
            Some(2.5)
        );
    }
    assert!(!world.set_parameter_number("uUnknown", 1.0).unwrap());
}

#[test]
fn test_inspector_color_edit_regenerates_background() {
    let mut world = world();
    let before = world.params().background_texture().unwrap().clone();
    assert!(world.set_parameter_color("bottomLeft", "#000000").unwrap());

    let after = world.params().background_texture().unwrap();
    assert!(!Arc::ptr_eq(&before, after));
    assert_eq!(&after.bytes()[0..3], &[0u8, 0, 0]);
}

#[test]
fn test_inspector_malformed_color_is_reported() {
    let mut world = world();
    let err = world.set_parameter_color("indirectColor", "#ggg").unwrap_err();
    assert!(matches!(err, MaterialError::InvalidColor { .. }));
    assert_eq!(
        world
            .catalog()
            .by_role(MaterialRole::Rock)
            .color(uniforms::INDIRECT_COLOR)
            .unwrap()
            .to_rgb8(),
        [0xd0, 0x45, 0x00]
    );
}

#[test]
fn test_rejected_shadow_color_does_not_block_floors() {
    let mut world = world();
    let mut physics = FakePhysics::default();
    assert!(world.set_parameter_color("shadowColor", "oops").is_err());
    assert_eq!(world.params().floor.shadow_color, "#d04500");

    assert!(world.set_parameter_color("bottomLeft", "#000000").unwrap());
    let background = world.params().background_texture().unwrap();
    assert_eq!(&background.bytes()[0..3], &[0u8, 0, 0]);

    let id = world.add_object(level(1), &mut physics).unwrap();
    let floor = &world.registry().get(id).unwrap().container.children()[1];
    let material = floor.mesh.as_ref().unwrap().material.unwrap();
    assert_eq!(
        world
            .catalog()
            .get(material)
            .unwrap()
            .color(uniforms::SHADOW_COLOR)
            .unwrap()
            .to_rgb8(),
        [0xd0, 0x45, 0x00]
    );
}
