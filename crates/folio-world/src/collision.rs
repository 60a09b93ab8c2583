//! Static collider registration from collision placeholder hierarchies.

use folio_physics::{ColliderHandle, ObjectDesc, PhysicsBackend};
use folio_scene::SceneNode;
use tracing::{debug, info};

use crate::classify::{Role, role_for};

/// Registers a static box for every `cube`/`box` child of `collision`.
///
/// Position and rotation are copied from the node; half-extents are half the
/// node's scale. Other children are ignored. Handles come back in input order.
pub fn register_colliders<P>(collision: &SceneNode, physics: &mut P) -> Vec<ColliderHandle>
where
    P: PhysicsBackend + ?Sized,
{
    let mut handles = Vec::new();
    for node in collision.children() {
        if role_for(&node.name) != Role::CollisionBox {
            debug!("Ignoring collision child `{}`", node.name);
            continue;
        }
        let t = &node.transform;
        let desc = ObjectDesc::static_box(t.position, t.rotation, t.scale * 0.5);
        handles.push(physics.add_object(&desc));
    }
    if !handles.is_empty() {
        info!("Registered {} static collider(s)", handles.len());
    }
    handles
}

#[cfg(test)]
mod tests {
    use folio_physics::{BodyKind, ShapeDesc};
    use folio_scene::Transform;
    use glam::{Quat, Vec3};

    use super::*;
    use crate::testing::FakePhysics;

    fn placeholder(name: &str, transform: Transform) -> SceneNode {
        SceneNode::new(name).with_transform(transform)
    }

    #[test]
    fn test_box_half_extents_are_half_scale() {
        let mut physics = FakePhysics::default();
        let rotation = Quat::from_rotation_y(0.3);
        let collision = SceneNode::container().with_child(placeholder(
            "box01",
            Transform::from_position(Vec3::new(1.0, 2.0, 3.0))
                .with_rotation(rotation)
                .with_scale(Vec3::new(2.0, 4.0, 6.0)),
        ));

        let handles = register_colliders(&collision, &mut physics);
        assert_eq!(handles.len(), 1);

        let desc = physics.added[0];
        assert_eq!(desc.kind, BodyKind::Static);
        assert_eq!(desc.position, Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(desc.rotation, rotation);
        assert_eq!(
            desc.shape,
            ShapeDesc::Box {
                half_extents: Vec3::new(1.0, 2.0, 3.0)
            }
        );
    }

    #[test]
    fn test_non_matching_children_are_ignored() {
        let mut physics = FakePhysics::default();
        let collision = SceneNode::container()
            .with_child(placeholder("rock1", Transform::IDENTITY))
            .with_child(placeholder("sphere", Transform::IDENTITY))
            .with_child(placeholder("boxes", Transform::IDENTITY));
        assert!(register_colliders(&collision, &mut physics).is_empty());
        assert!(physics.added.is_empty());
    }

    #[test]
    fn test_cube_and_box_both_register_in_order() {
        let mut physics = FakePhysics::default();
        let collision = SceneNode::container()
            .with_child(placeholder("Cube", Transform::from_position(Vec3::X)))
            .with_child(placeholder("tree", Transform::IDENTITY))
            .with_child(placeholder("BOX7", Transform::from_position(Vec3::Y)));

        let handles = register_colliders(&collision, &mut physics);
        assert_eq!(handles.len(), 2);
        assert_ne!(handles[0], handles[1]);
        assert_eq!(physics.added[0].position, Vec3::X);
        assert_eq!(physics.added[1].position, Vec3::Y);
    }
}
