//! Scene composition for Folio levels.
//!
//! Imported hierarchies are classified by node name into render materials and
//! static colliders, recorded as world objects, and kept in step with the
//! physics simulation once per tick.

pub mod classify;
pub mod collision;
mod error;
pub mod registry;
pub mod sync;
mod world;

pub use classify::{ClassificationRule, Role, classify, role_for};
pub use collision::register_colliders;
pub use error::WorldError;
pub use registry::{ObjectId, ObjectKind, ObjectRegistry, WorldObject};
pub use sync::{FrameSynchronizer, sim_to_render};
pub use world::{ObjectOptions, World};
