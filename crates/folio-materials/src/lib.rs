//! Material system: colors, procedural textures, the material catalog, and the
//! designer-tunable parameter store that keeps uniforms in sync.

mod catalog;
mod color;
mod material;
mod params;
mod resources;
mod texture;

pub use catalog::{MaterialCatalog, MaterialRole};
pub use color::{Color, ColorError};
pub use material::{
    Material, MaterialError, MaterialFamily, MaterialId, ShaderProgram, UniformValue, uniforms,
};
pub use params::{
    FloorColors, FloorParameters, MatcapParameters, MaterialParameterStore, MaterialPreset,
    PARAMETER_SPECS, ParameterFamily, ParameterKind, ParameterSpec, parameter_spec,
};
pub use resources::{ResourceProvider, Resources, require_texture};
pub use texture::{FilterMode, GradientCorners, Texture};
