//! Per-tick copy of simulated body positions into render nodes.
//!
//! The simulation is Z-up and the renderer is Y-up, so every position goes
//! through [`sim_to_render`]. Rotation is not synchronized.

use folio_physics::{BodyHandle, PhysicsBackend};
use folio_scene::SceneNode;
use glam::Vec3;
use tracing::warn;

/// Maps a simulation-space position `(x, y, z)` to render space `(x, z, y)`.
#[inline]
pub fn sim_to_render(sim: Vec3) -> Vec3 {
    Vec3::new(sim.x, sim.z, sim.y)
}

struct Tracked {
    body: BodyHandle,
    node: SceneNode,
    missing: bool,
}

/// Owns the render nodes bound to dynamic bodies.
#[derive(Default)]
pub struct FrameSynchronizer {
    tracked: Vec<Tracked>,
}

impl FrameSynchronizer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Binds `node` to `body`. Returns the tracking index.
    pub fn track(&mut self, body: BodyHandle, node: SceneNode) -> usize {
        self.tracked.push(Tracked {
            body,
            node,
            missing: false,
        });
        self.tracked.len() - 1
    }

    /// Copies every tracked body's position into its node.
    ///
    /// Bodies the backend no longer knows are skipped and leave their node
    /// where it was. Returns how many nodes were updated.
    pub fn sync<P>(&mut self, physics: &P) -> usize
    where
        P: PhysicsBackend + ?Sized,
    {
        let mut updated = 0;
        for tracked in &mut self.tracked {
            match physics.body_position(tracked.body) {
                Some(sim) => {
                    tracked.node.set_position(sim_to_render(sim));
                    tracked.missing = false;
                    updated += 1;
                }
                None => {
                    if !tracked.missing {
                        warn!("Tracked body {:?} missing from simulation", tracked.body);
                    }
                    tracked.missing = true;
                }
            }
        }
        updated
    }

    /// Tracked render nodes, in tracking order.
    pub fn nodes(&self) -> impl Iterator<Item = &SceneNode> {
        self.tracked.iter().map(|t| &t.node)
    }

    pub fn node(&self, index: usize) -> Option<&SceneNode> {
        self.tracked.get(index).map(|t| &t.node)
    }

    pub fn len(&self) -> usize {
        self.tracked.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tracked.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::FakePhysics;

    #[test]
    fn test_axis_permutation() {
        assert_eq!(
            sim_to_render(Vec3::new(1.0, 2.0, 3.0)),
            Vec3::new(1.0, 3.0, 2.0)
        );
        assert_eq!(sim_to_render(Vec3::Z), Vec3::Y);
    }

    #[test]
    fn test_sync_sets_render_position() {
        let mut physics = FakePhysics::default();
        let body = FakePhysics::body(0);
        physics.bodies.insert(body, Vec3::new(1.0, 2.0, 3.0));

        let mut sync = FrameSynchronizer::new();
        let index = sync.track(body, SceneNode::new("dummy"));
        assert_eq!(sync.sync(&physics), 1);
        assert_eq!(sync.node(index).unwrap().position(), Vec3::new(1.0, 3.0, 2.0));
    }

    #[test]
    fn test_sync_only_touches_position() {
        let mut physics = FakePhysics::default();
        let body = FakePhysics::body(0);
        physics.bodies.insert(body, Vec3::ONE);

        let mut node = SceneNode::new("dummy");
        node.transform.rotation = glam::Quat::from_rotation_z(0.5);
        node.transform.scale = Vec3::splat(3.0);
        let before = node.transform;

        let mut sync = FrameSynchronizer::new();
        sync.track(body, node);
        sync.sync(&physics);

        let after = sync.node(0).unwrap().transform;
        assert_eq!(after.rotation, before.rotation);
        assert_eq!(after.scale, before.scale);
    }

    #[test]
    fn test_missing_body_leaves_node_in_place() {
        let physics = FakePhysics::default();
        let mut node = SceneNode::new("dummy");
        node.set_position(Vec3::new(7.0, 8.0, 9.0));

        let mut sync = FrameSynchronizer::new();
        sync.track(FakePhysics::body(3), node);
        assert_eq!(sync.sync(&physics), 0);
        assert_eq!(sync.sync(&physics), 0);
        assert_eq!(sync.node(0).unwrap().position(), Vec3::new(7.0, 8.0, 9.0));
    }

    #[test]
    fn test_repeated_sync_follows_body() {
        let mut physics = FakePhysics::default();
        let body = FakePhysics::body(0);
        let mut sync = FrameSynchronizer::new();
        sync.track(body, SceneNode::new("dummy"));

        for z in [5.0, 4.5, 3.75] {
            physics.bodies.insert(body, Vec3::new(0.0, 0.0, z));
            sync.sync(&physics);
            assert_eq!(sync.node(0).unwrap().position(), Vec3::new(0.0, z, 0.0));
        }
        assert_eq!(sync.len(), 1);
        assert!(!sync.is_empty());
    }
}
