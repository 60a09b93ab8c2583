//! Physics collaborator: the contract the world composes against, plus a
//! Rapier-backed implementation.
//!
//! The simulation is Z-up. Render-space remapping is the caller's concern.

mod collider;

pub use collider::{BodyHandle, BodyKind, ColliderHandle, ObjectDesc, ShapeDesc};

use glam::Vec3;
use rapier3d::prelude::*;
use tracing::{debug, info};

use crate::collider::{build_shared_shape, to_rapier, to_rapier_rotation};

/// What scene composition and frame synchronization need from a physics engine.
pub trait PhysicsBackend {
    /// Adds an object and returns the handle of its collider.
    fn add_object(&mut self, desc: &ObjectDesc) -> ColliderHandle;

    /// Current simulation-space position of a dynamic body.
    fn body_position(&self, body: BodyHandle) -> Option<Vec3>;
}

/// Central physics simulation owning all Rapier state.
pub struct PhysicsWorld {
    /// World-space gravity vector.
    pub gravity: Vector,
    /// Timestep and solver configuration.
    pub integration_parameters: IntegrationParameters,
    /// The main simulation pipeline.
    pub physics_pipeline: PhysicsPipeline,
    /// Tracks sleeping/awake body islands.
    pub island_manager: IslandManager,
    /// Broad-phase collision detection.
    pub broad_phase: BroadPhaseBvh,
    /// Narrow-phase collision detection (contact manifolds).
    pub narrow_phase: NarrowPhase,
    /// All rigid bodies in the simulation.
    pub rigid_body_set: RigidBodySet,
    /// All colliders in the simulation.
    pub collider_set: ColliderSet,
    /// Impulse-based joints.
    pub impulse_joint_set: ImpulseJointSet,
    /// Multibody joints.
    pub multibody_joint_set: MultibodyJointSet,
    /// Continuous collision detection solver.
    pub ccd_solver: CCDSolver,
    dummy: Option<BodyHandle>,
    steps: u64,
}

impl PhysicsWorld {
    /// Creates a Z-up world with gravity `(0, 0, -9.82)` and a `1/60` s timestep.
    pub fn new() -> Self {
        Self::with_settings(Vec3::new(0.0, 0.0, -9.82), 1.0 / 60.0)
    }

    /// Creates a world with explicit gravity and timestep.
    pub fn with_settings(gravity: Vec3, dt: f32) -> Self {
        let integration_parameters = IntegrationParameters {
            dt,
            ..Default::default()
        };

        Self {
            gravity: to_rapier(gravity),
            integration_parameters,
            physics_pipeline: PhysicsPipeline::new(),
            island_manager: IslandManager::new(),
            broad_phase: BroadPhaseBvh::new(),
            narrow_phase: NarrowPhase::new(),
            rigid_body_set: RigidBodySet::new(),
            collider_set: ColliderSet::new(),
            impulse_joint_set: ImpulseJointSet::new(),
            multibody_joint_set: MultibodyJointSet::new(),
            ccd_solver: CCDSolver::new(),
            dummy: None,
            steps: 0,
        }
    }

    /// Adds the ground plane at `z = 0` and the distinguished dummy sphere.
    ///
    /// Returns the dummy's body handle. Calling this twice replaces the
    /// tracked dummy but leaves the first one in the simulation.
    pub fn spawn_dummy(&mut self, radius: f32, start: Vec3) -> BodyHandle {
        let ground = ColliderBuilder::cuboid(1000.0, 1000.0, 0.5)
            .translation(Vector::new(0.0, 0.0, -0.5))
            .build();
        self.collider_set.insert(ground);

        let body = RigidBodyBuilder::dynamic()
            .translation(to_rapier(start))
            .build();
        let handle = self.rigid_body_set.insert(body);
        let collider = ColliderBuilder::ball(radius).build();
        self.collider_set
            .insert_with_parent(collider, handle, &mut self.rigid_body_set);

        info!("Spawned dummy sphere r={radius} at {start}");
        let handle = BodyHandle(handle);
        self.dummy = Some(handle);
        handle
    }

    /// The distinguished dummy body, once spawned.
    pub fn dummy(&self) -> Option<BodyHandle> {
        self.dummy
    }

    /// Advances the simulation by one timestep.
    pub fn step(&mut self) {
        self.physics_pipeline.step(
            self.gravity,
            &self.integration_parameters,
            &mut self.island_manager,
            &mut self.broad_phase,
            &mut self.narrow_phase,
            &mut self.rigid_body_set,
            &mut self.collider_set,
            &mut self.impulse_joint_set,
            &mut self.multibody_joint_set,
            &mut self.ccd_solver,
            &(),
            &(),
        );
        self.steps += 1;
    }

    /// Number of steps taken so far.
    pub fn step_count(&self) -> u64 {
        self.steps
    }

    /// Returns the current gravity as `(x, y, z)`.
    pub fn gravity(&self) -> (f32, f32, f32) {
        (self.gravity.x, self.gravity.y, self.gravity.z)
    }
}

impl Default for PhysicsWorld {
    fn default() -> Self {
        Self::new()
    }
}

impl PhysicsBackend for PhysicsWorld {
    fn add_object(&mut self, desc: &ObjectDesc) -> ColliderHandle {
        let collider = ColliderBuilder::new(build_shared_shape(&desc.shape))
            .friction(0.7)
            .restitution(0.0);

        let handle = match desc.kind {
            BodyKind::Static => self.collider_set.insert(
                collider
                    .translation(to_rapier(desc.position))
                    .rotation(to_rapier_rotation(desc.rotation))
                    .build(),
            ),
            BodyKind::Dynamic => {
                let body = RigidBodyBuilder::dynamic()
                    .translation(to_rapier(desc.position))
                    .rotation(to_rapier_rotation(desc.rotation))
                    .build();
                let body_handle = self.rigid_body_set.insert(body);
                self.collider_set.insert_with_parent(
                    collider.build(),
                    body_handle,
                    &mut self.rigid_body_set,
                )
            }
        };
        debug!("Added {:?} {:?} collider {:?}", desc.kind, desc.shape, handle);
        ColliderHandle(handle)
    }

    fn body_position(&self, body: BodyHandle) -> Option<Vec3> {
        let t = self.rigid_body_set.get(body.0)?.translation();
        Some(Vec3::new(t.x, t.y, t.z))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Quat;

    #[test]
    fn test_physics_world_initializes() {
        let world = PhysicsWorld::new();
        assert_eq!(world.rigid_body_set.len(), 0);
        assert_eq!(world.collider_set.len(), 0);
        assert!(world.dummy().is_none());
    }

    #[test]
    fn test_gravity_is_z_up() {
        let world = PhysicsWorld::new();
        assert_eq!(world.gravity(), (0.0, 0.0, -9.82));
    }

    #[test]
    fn test_timestep_setting() {
        let world = PhysicsWorld::with_settings(Vec3::ZERO, 1.0 / 120.0);
        assert!((world.integration_parameters.dt - 1.0 / 120.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_static_box_registration() {
        let mut world = PhysicsWorld::new();
        let desc = ObjectDesc::static_box(
            Vec3::new(1.0, 2.0, 3.0),
            Quat::IDENTITY,
            Vec3::new(1.0, 2.0, 3.0),
        );
        let handle = world.add_object(&desc);

        let collider = world.collider_set.get(handle.0).unwrap();
        assert!(collider.parent().is_none());
        let t = collider.translation();
        assert!((t.x - 1.0).abs() < 1e-6);
        assert!((t.y - 2.0).abs() < 1e-6);
        assert!((t.z - 3.0).abs() < 1e-6);

        let cuboid = collider.shape().as_cuboid().unwrap();
        assert!((cuboid.half_extents.x - 1.0).abs() < 1e-6);
        assert!((cuboid.half_extents.y - 2.0).abs() < 1e-6);
        assert!((cuboid.half_extents.z - 3.0).abs() < 1e-6);
    }

    #[test]
    fn test_handles_are_distinct() {
        let mut world = PhysicsWorld::new();
        let desc = ObjectDesc::static_box(Vec3::ZERO, Quat::IDENTITY, Vec3::ONE);
        let a = world.add_object(&desc);
        let b = world.add_object(&desc);
        assert_ne!(a, b);
        assert_eq!(world.collider_set.len(), 2);
    }

    #[test]
    fn test_dummy_falls_along_negative_z_and_rests_on_ground() {
        let mut world = PhysicsWorld::new();
        let dummy = world.spawn_dummy(1.0, Vec3::new(2.0, -1.0, 5.0));
        assert_eq!(world.dummy(), Some(dummy));

        for _ in 0..30 {
            world.step();
        }
        let mid = world.body_position(dummy).unwrap();
        assert!(mid.z < 5.0, "dummy should fall: z={}", mid.z);
        assert!((mid.x - 2.0).abs() < 1e-3);
        assert!((mid.y + 1.0).abs() < 1e-3);

        for _ in 0..300 {
            world.step();
        }
        let rest = world.body_position(dummy).unwrap();
        assert!(rest.z > 0.5 && rest.z < 1.5, "dummy should rest on ground: z={}", rest.z);
        assert_eq!(world.step_count(), 330);
    }

    #[test]
    fn test_dynamic_object_gets_parent_body() {
        let mut world = PhysicsWorld::new();
        let desc = ObjectDesc {
            kind: BodyKind::Dynamic,
            position: Vec3::new(0.0, 0.0, 10.0),
            rotation: Quat::IDENTITY,
            shape: ShapeDesc::Sphere { radius: 0.5 },
        };
        let handle = world.add_object(&desc);
        let parent = world.collider_set[handle.0].parent().unwrap();
        let pos = world.body_position(BodyHandle(parent)).unwrap();
        assert_eq!(pos, Vec3::new(0.0, 0.0, 10.0));
    }
}
