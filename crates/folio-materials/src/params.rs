//! Designer-tunable material parameters and their synchronization into uniforms.
//!
//! Each family keeps a compact parameter set. [`MaterialParameterStore::sync`]
//! pushes the current values into every member material; for the floor it
//! also regenerates the packed gradient texture. Colors are stored as the hex
//! strings an inspector edits and are only parsed during sync.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::catalog::{MaterialCatalog, MaterialRole};
use crate::color::Color;
use crate::material::{MaterialError, MaterialId, UniformValue, uniforms};
use crate::texture::{GradientCorners, Texture};

// ---------------------------------------------------------------------------
// Parameter sets
// ---------------------------------------------------------------------------

/// Shared parameters of the matcap families (`rock`, `building`).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatcapParameters {
    /// `uIndirectDistanceAmplitude`.
    pub indirect_distance_amplitude: f32,
    /// `uIndirectDistanceStrength`.
    pub indirect_distance_strength: f32,
    /// `uIndirectDistancePower`.
    pub indirect_distance_power: f32,
    /// `uIndirectAngleStrength`.
    pub indirect_angle_strength: f32,
    /// `uIndirectAngleOffset`.
    pub indirect_angle_offset: f32,
    /// `uIndirectAnglePower`.
    pub indirect_angle_power: f32,
    /// Hex source of `uIndirectColor`.
    pub indirect_color: String,
}

impl Default for MatcapParameters {
    fn default() -> Self {
        Self {
            indirect_distance_amplitude: 1.0,
            indirect_distance_strength: 0.7,
            indirect_distance_power: 2.0,
            indirect_angle_strength: 1.5,
            indirect_angle_offset: 0.6,
            indirect_angle_power: 1.0,
            indirect_color: "#d04500".to_string(),
        }
    }
}

impl MatcapParameters {
    /// Resolves every parameter to its uniform slot, parsing the indirect color.
    pub fn uniform_values(&self) -> Result<Vec<(&'static str, UniformValue)>, MaterialError> {
        let indirect = parse_color("indirectColor", &self.indirect_color)?;
        Ok(vec![
            (
                uniforms::INDIRECT_DISTANCE_AMPLITUDE,
                UniformValue::Float(self.indirect_distance_amplitude),
            ),
            (
                uniforms::INDIRECT_DISTANCE_STRENGTH,
                UniformValue::Float(self.indirect_distance_strength),
            ),
            (
                uniforms::INDIRECT_DISTANCE_POWER,
                UniformValue::Float(self.indirect_distance_power),
            ),
            (
                uniforms::INDIRECT_ANGLE_STRENGTH,
                UniformValue::Float(self.indirect_angle_strength),
            ),
            (
                uniforms::INDIRECT_ANGLE_OFFSET,
                UniformValue::Float(self.indirect_angle_offset),
            ),
            (
                uniforms::INDIRECT_ANGLE_POWER,
                UniformValue::Float(self.indirect_angle_power),
            ),
            (uniforms::INDIRECT_COLOR, UniformValue::Color(indirect)),
        ])
    }

    fn number_mut(&mut self, name: &str) -> Option<&mut f32> {
        match name {
            uniforms::INDIRECT_DISTANCE_AMPLITUDE => Some(&mut self.indirect_distance_amplitude),
            uniforms::INDIRECT_DISTANCE_STRENGTH => Some(&mut self.indirect_distance_strength),
            uniforms::INDIRECT_DISTANCE_POWER => Some(&mut self.indirect_distance_power),
            uniforms::INDIRECT_ANGLE_STRENGTH => Some(&mut self.indirect_angle_strength),
            uniforms::INDIRECT_ANGLE_OFFSET => Some(&mut self.indirect_angle_offset),
            uniforms::INDIRECT_ANGLE_POWER => Some(&mut self.indirect_angle_power),
            _ => None,
        }
    }
}

/// Corner colors of the floor gradient, as hex strings.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FloorColors {
    /// Top-left corner.
    pub top_left: String,
    /// Top-right corner.
    pub top_right: String,
    /// Bottom-right corner.
    pub bottom_right: String,
    /// Bottom-left corner.
    pub bottom_left: String,
}

impl Default for FloorColors {
    fn default() -> Self {
        Self {
            top_left: "#d98441".to_string(),
            top_right: "#eba962".to_string(),
            bottom_right: "#f3c17d".to_string(),
            bottom_left: "#eaa860".to_string(),
        }
    }
}

/// Parameters of the floor family.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FloorParameters {
    /// Hex source of `uShadowColor`.
    pub shadow_color: String,
    /// Background gradient corners.
    pub colors: FloorColors,
}

impl Default for FloorParameters {
    fn default() -> Self {
        Self {
            shadow_color: "#d04500".to_string(),
            colors: FloorColors::default(),
        }
    }
}

impl FloorParameters {
    /// Parses the four gradient corners.
    pub fn corners(&self) -> Result<GradientCorners, MaterialError> {
        Ok(GradientCorners {
            top_left: parse_color("topLeft", &self.colors.top_left)?,
            top_right: parse_color("topRight", &self.colors.top_right)?,
            bottom_left: parse_color("bottomLeft", &self.colors.bottom_left)?,
            bottom_right: parse_color("bottomRight", &self.colors.bottom_right)?,
        })
    }

    /// Parses the shadow tint.
    pub fn shadow_color(&self) -> Result<Color, MaterialError> {
        parse_color("shadowColor", &self.shadow_color)
    }

    fn color_mut(&mut self, name: &str) -> Option<&mut String> {
        match name {
            "shadowColor" => Some(&mut self.shadow_color),
            "topLeft" => Some(&mut self.colors.top_left),
            "topRight" => Some(&mut self.colors.top_right),
            "bottomRight" => Some(&mut self.colors.bottom_right),
            "bottomLeft" => Some(&mut self.colors.bottom_left),
            _ => None,
        }
    }
}

fn parse_color(parameter: &'static str, value: &str) -> Result<Color, MaterialError> {
    Color::from_hex(value).map_err(|source| MaterialError::InvalidColor { parameter, source })
}

/// On-disk preset holding both families' parameters.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MaterialPreset {
    /// Matcap family parameters.
    pub matcap: MatcapParameters,
    /// Floor family parameters.
    pub floor: FloorParameters,
}

// ---------------------------------------------------------------------------
// Inspector descriptors
// ---------------------------------------------------------------------------

/// Material family a tunable parameter belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ParameterFamily {
    /// Shared by `rock` and `building`.
    Matcap,
    /// The floor gradient and shadow.
    Floor,
}

/// Editing widget an inspector should offer for a parameter.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ParameterKind {
    /// Slider clamped to `[min, max]`.
    Number {
        /// Lower bound.
        min: f32,
        /// Upper bound.
        max: f32,
        /// Slider increment.
        step: f32,
    },
    /// Hex color picker.
    Color,
}

/// Describes one tunable parameter for a live inspector.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ParameterSpec {
    /// Owning family.
    pub family: ParameterFamily,
    /// Name used by [`MaterialParameterStore::set_number`] and
    /// [`MaterialParameterStore::set_color`].
    pub name: &'static str,
    /// Widget kind and range.
    pub kind: ParameterKind,
}

const fn number(name: &'static str, min: f32, max: f32) -> ParameterSpec {
    ParameterSpec {
        family: ParameterFamily::Matcap,
        name,
        kind: ParameterKind::Number {
            min,
            max,
            step: 0.001,
        },
    }
}

const fn color(family: ParameterFamily, name: &'static str) -> ParameterSpec {
    ParameterSpec {
        family,
        name,
        kind: ParameterKind::Color,
    }
}

/// Every tunable parameter, in inspector order.
pub const PARAMETER_SPECS: &[ParameterSpec] = &[
    number(uniforms::INDIRECT_DISTANCE_AMPLITUDE, 0.0, 0.5),
    number(uniforms::INDIRECT_DISTANCE_STRENGTH, 0.0, 2.0),
    number(uniforms::INDIRECT_DISTANCE_POWER, 0.0, 5.0),
    number(uniforms::INDIRECT_ANGLE_STRENGTH, 0.0, 2.0),
    number(uniforms::INDIRECT_ANGLE_OFFSET, -2.0, 2.0),
    number(uniforms::INDIRECT_ANGLE_POWER, 0.0, 5.0),
    color(ParameterFamily::Matcap, "indirectColor"),
    color(ParameterFamily::Floor, "shadowColor"),
    color(ParameterFamily::Floor, "topLeft"),
    color(ParameterFamily::Floor, "topRight"),
    color(ParameterFamily::Floor, "bottomRight"),
    color(ParameterFamily::Floor, "bottomLeft"),
];

/// Looks up the descriptor for `name`.
pub fn parameter_spec(name: &str) -> Option<&'static ParameterSpec> {
    PARAMETER_SPECS.iter().find(|spec| spec.name == name)
}

// ---------------------------------------------------------------------------
// MaterialParameterStore
// ---------------------------------------------------------------------------

/// Owns both families' parameters and the materials they drive.
///
/// Matcap parameters apply to the `rock` and `building` materials; floor
/// parameters apply to the base floor material only. Per-instance floor
/// clones keep the bindings they were created with.
#[derive(Debug)]
pub struct MaterialParameterStore {
    /// Matcap family parameters.
    pub matcap: MatcapParameters,
    /// Floor family parameters.
    pub floor: FloorParameters,
    matcap_members: Vec<MaterialId>,
    floor_members: Vec<MaterialId>,
    floor_shadow: Option<Arc<Texture>>,
    background: Option<Arc<Texture>>,
}

impl MaterialParameterStore {
    /// Creates a store with default parameters for the catalog's role materials.
    ///
    /// Nothing is written until [`Self::sync`] runs.
    pub fn new(catalog: &MaterialCatalog, floor_shadow: Option<Arc<Texture>>) -> Self {
        Self::with_preset(catalog, floor_shadow, MaterialPreset::default())
    }

    /// Creates a store from an explicit preset.
    pub fn with_preset(
        catalog: &MaterialCatalog,
        floor_shadow: Option<Arc<Texture>>,
        preset: MaterialPreset,
    ) -> Self {
        Self {
            matcap: preset.matcap,
            floor: preset.floor,
            matcap_members: vec![
                catalog.role(MaterialRole::Rock),
                catalog.role(MaterialRole::Building),
            ],
            floor_members: vec![catalog.role(MaterialRole::Floor)],
            floor_shadow,
            background: None,
        }
    }

    /// Creates a store from a RON [`MaterialPreset`]. Missing fields use defaults.
    ///
    /// # Errors
    ///
    /// Returns [`MaterialError::Ron`] on parse failures.
    pub fn from_ron_str(
        ron_str: &str,
        catalog: &MaterialCatalog,
        floor_shadow: Option<Arc<Texture>>,
    ) -> Result<Self, MaterialError> {
        let preset: MaterialPreset = ron::from_str(ron_str)?;
        Ok(Self::with_preset(catalog, floor_shadow, preset))
    }

    /// Current parameters as a preset, e.g. for saving inspector edits.
    pub fn preset(&self) -> MaterialPreset {
        MaterialPreset {
            matcap: self.matcap.clone(),
            floor: self.floor.clone(),
        }
    }

    /// Synchronizes both families.
    ///
    /// # Errors
    ///
    /// Returns [`MaterialError::InvalidColor`] if a color fails to parse. The
    /// failing family is left untouched; the other family is still synced.
    pub fn sync(&mut self, catalog: &mut MaterialCatalog) -> Result<(), MaterialError> {
        let matcaps = self.sync_matcaps(catalog);
        let floor = self.sync_floor(catalog).map(|_| ());
        matcaps.and(floor)
    }

    /// Writes every matcap parameter into every matcap member.
    ///
    /// Idempotent: repeated calls with unchanged parameters write identical values.
    pub fn sync_matcaps(&self, catalog: &mut MaterialCatalog) -> Result<(), MaterialError> {
        let values = self.matcap.uniform_values().inspect_err(|e| {
            warn!("Matcap parameters not synced: {e}");
        })?;

        for &id in &self.matcap_members {
            let material = catalog
                .get_mut(id)
                .ok_or(MaterialError::UnknownMaterial(id))?;
            for (name, value) in &values {
                if !material.set_uniform(name, value.clone()) {
                    debug!("Material {} has no slot {name}", material.name());
                }
            }
        }
        Ok(())
    }

    /// Regenerates the background gradient and rebinds the floor uniforms.
    ///
    /// Returns the new background texture. Each call allocates a fresh
    /// texture; previously returned textures are left as they were.
    pub fn sync_floor(&mut self, catalog: &mut MaterialCatalog) -> Result<Arc<Texture>, MaterialError> {
        let parsed = self
            .floor
            .corners()
            .and_then(|corners| Ok((corners, self.floor.shadow_color()?)));
        let (corners, shadow_color) = parsed.inspect_err(|e| {
            warn!("Floor parameters not synced: {e}");
        })?;

        let background = Arc::new(Texture::packed_gradient(&corners));

        for &id in &self.floor_members {
            let material = catalog
                .get_mut(id)
                .ok_or(MaterialError::UnknownMaterial(id))?;
            material.set_uniform(
                uniforms::BACKGROUND,
                UniformValue::Texture(Some(background.clone())),
            );
            material.set_uniform(
                uniforms::SHADOW,
                UniformValue::Texture(self.floor_shadow.clone()),
            );
            material.set_uniform(uniforms::SHADOW_COLOR, UniformValue::Color(shadow_color));
        }

        self.background = Some(background.clone());
        Ok(background)
    }

    /// Background texture produced by the latest successful floor sync.
    pub fn background_texture(&self) -> Option<&Arc<Texture>> {
        self.background.as_ref()
    }

    /// Sets a numeric parameter by uniform name, clamped to its inspector range.
    ///
    /// Returns `false` for names that are not numeric parameters. Call
    /// [`Self::sync`] afterwards to push the change.
    pub fn set_number(&mut self, name: &str, value: f32) -> bool {
        let Some(ParameterSpec {
            kind: ParameterKind::Number { min, max, .. },
            ..
        }) = parameter_spec(name)
        else {
            debug!("Ignoring unknown numeric parameter {name}");
            return false;
        };
        match self.matcap.number_mut(name) {
            Some(slot) => {
                *slot = value.clamp(*min, *max);
                true
            }
            None => false,
        }
    }

    /// Sets a color parameter by name.
    ///
    /// Returns `Ok(false)` for names that are not color parameters. The value
    /// is parsed before it is stored, so the last good color survives a typo.
    /// Call [`Self::sync`] afterwards to push the change.
    ///
    /// # Errors
    ///
    /// [`MaterialError::InvalidColor`] if `value` is not a hex color. The
    /// stored value is left unchanged.
    pub fn set_color(&mut self, name: &str, value: &str) -> Result<bool, MaterialError> {
        let Some(spec) = parameter_spec(name).filter(|spec| spec.kind == ParameterKind::Color)
        else {
            debug!("Ignoring unknown color parameter {name}");
            return Ok(false);
        };
        let parameter = spec.name;
        parse_color(parameter, value).inspect_err(|e| {
            warn!("Keeping previous {parameter}: {e}");
        })?;

        let slot = if parameter == "indirectColor" {
            Some(&mut self.matcap.indirect_color)
        } else {
            self.floor.color_mut(parameter)
        };
        match slot {
            Some(slot) => {
                *slot = value.trim().to_string();
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

#[cfg(test)]
#[path = "params_tests.rs"]
mod tests;
