//! Object descriptions accepted by the physics collaborator and the handles it returns.

use glam::{Quat, Vec3};
use rapier3d::prelude::*;

/// Opaque handle to a collider owned by the physics world.
///
/// Callers store it; only the physics world interprets it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ColliderHandle(pub rapier3d::prelude::ColliderHandle);

/// Opaque handle to a rigid body owned by the physics world.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct BodyHandle(pub rapier3d::prelude::RigidBodyHandle);

/// How the simulated object moves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodyKind {
    /// Immovable, infinite mass.
    Static,
    /// Fully simulated, affected by gravity.
    Dynamic,
}

/// Collision shape definition.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ShapeDesc {
    /// Oriented box.
    Box {
        /// Half-extents along each local axis.
        half_extents: Vec3,
    },
    /// Sphere.
    Sphere {
        /// Radius.
        radius: f32,
    },
}

/// Everything needed to add one object to the simulation.
///
/// Position and rotation are in simulation space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ObjectDesc {
    /// Static or dynamic.
    pub kind: BodyKind,
    /// World position.
    pub position: Vec3,
    /// World orientation.
    pub rotation: Quat,
    /// Collision shape.
    pub shape: ShapeDesc,
}

impl ObjectDesc {
    /// A static box, the only collider kind level placeholders produce.
    pub fn static_box(position: Vec3, rotation: Quat, half_extents: Vec3) -> Self {
        Self {
            kind: BodyKind::Static,
            position,
            rotation,
            shape: ShapeDesc::Box { half_extents },
        }
    }
}

/// Builds a [`SharedShape`] from a [`ShapeDesc`].
pub(crate) fn build_shared_shape(shape: &ShapeDesc) -> SharedShape {
    match shape {
        ShapeDesc::Box { half_extents } => {
            SharedShape::cuboid(half_extents.x, half_extents.y, half_extents.z)
        }
        ShapeDesc::Sphere { radius } => SharedShape::ball(*radius),
    }
}

/// Converts a glam vector into rapier's vector type.
///
/// rapier may depend on a different glam version than the workspace, so
/// conversion always goes through components.
pub(crate) fn to_rapier(v: Vec3) -> Vector {
    Vector::new(v.x, v.y, v.z)
}

/// Axis-angle form of a rotation, as the rapier builders expect.
pub(crate) fn to_rapier_rotation(q: Quat) -> Vector {
    to_rapier(q.to_scaled_axis())
}
