//! Render-side scene hierarchy: transform nodes that may carry a mesh.
//!
//! The render engine consumes these nodes as geometry/material containers.
//! Nothing here draws.

mod geometry;
mod node;
mod transform;

pub use geometry::{Geometry, GeometryId, Mesh};
pub use node::SceneNode;
pub use transform::Transform;
