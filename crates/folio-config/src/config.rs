//! Configuration structs with sensible defaults and RON persistence.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Top-level runtime configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Physics collaborator settings.
    pub physics: PhysicsConfig,
    /// Symbolic names of the pre-loaded textures the world binds.
    pub assets: AssetsConfig,
    /// Debug/development settings.
    pub debug: DebugConfig,
}

/// Physics simulation settings.
///
/// The simulation runs Z-up; the world remaps positions into the renderer's
/// Y-up space every tick.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct PhysicsConfig {
    /// Gravity in simulation space (m/s²).
    pub gravity: [f32; 3],
    /// Fixed simulation timestep in seconds.
    pub fixed_dt: f32,
    /// Radius of the dummy dynamic sphere.
    pub dummy_radius: f32,
    /// Start position of the dummy sphere in simulation space.
    pub dummy_start: [f32; 3],
}

/// Symbolic texture names looked up in the resource provider.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct AssetsConfig {
    /// Matcap lighting texture for rock geometry.
    pub rock_matcap: String,
    /// Matcap lighting texture for building geometry.
    pub building_matcap: String,
    /// Baked shadow texture bound to the base floor material.
    pub floor_shadow: String,
}

/// Debug/development configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DebugConfig {
    /// Log level override (e.g., "debug", "info", "warn").
    pub log_level: String,
    /// Expose material parameters to a live inspector.
    pub inspector: bool,
}

// --- Default implementations ---

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            gravity: [0.0, 0.0, -9.82],
            fixed_dt: 1.0 / 60.0,
            dummy_radius: 1.0,
            dummy_start: [0.0, 0.0, 5.0],
        }
    }
}

impl Default for AssetsConfig {
    fn default() -> Self {
        Self {
            rock_matcap: "matcapRockTexture".to_string(),
            building_matcap: "matcapBuildingTexture".to_string(),
            floor_shadow: "floorShadowTexture".to_string(),
        }
    }
}

impl Default for DebugConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            inspector: false,
        }
    }
}

// --- Validation ---

impl PhysicsConfig {
    /// Rejects values the simulation cannot run with.
    ///
    /// `fixed_dt` must be finite and positive, otherwise the frame loop never
    /// drains its accumulator.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let invalid =
            |field: &'static str, reason: &'static str| ConfigError::Invalid { field, reason };
        if !(self.fixed_dt.is_finite() && self.fixed_dt > 0.0) {
            return Err(invalid("physics.fixed_dt", "must be finite and greater than zero"));
        }
        if !(self.dummy_radius.is_finite() && self.dummy_radius > 0.0) {
            return Err(invalid("physics.dummy_radius", "must be finite and greater than zero"));
        }
        if !self.gravity.iter().chain(&self.dummy_start).all(|v| v.is_finite()) {
            return Err(invalid("physics", "gravity and dummy_start must be finite"));
        }
        Ok(())
    }
}

// --- Load / Save / Reload ---

impl Config {
    /// Load config from the given directory, or create a default config file.
    ///
    /// # Errors
    ///
    /// Fails on I/O or parse errors, and with [`ConfigError::Invalid`] when
    /// the physics section cannot be simulated.
    pub fn load_or_create(config_dir: &Path) -> Result<Self, ConfigError> {
        let config_path = config_dir.join("config.ron");

        if config_path.exists() {
            let contents = std::fs::read_to_string(&config_path).map_err(ConfigError::ReadError)?;
            let config: Config = ron::from_str(&contents).map_err(ConfigError::ParseError)?;
            config.physics.validate()?;
            log::info!("Loaded config from {}", config_path.display());
            Ok(config)
        } else {
            let config = Config::default();
            config.save(config_dir)?;
            log::info!("Created default config at {}", config_path.display());
            Ok(config)
        }
    }

    /// Save config to the given directory as `config.ron`.
    pub fn save(&self, config_dir: &Path) -> Result<(), ConfigError> {
        std::fs::create_dir_all(config_dir).map_err(ConfigError::WriteError)?;

        let config_path = config_dir.join("config.ron");
        let pretty = ron::ser::PrettyConfig::new()
            .depth_limit(3)
            .separate_tuple_members(true)
            .enumerate_arrays(false);

        let serialized =
            ron::ser::to_string_pretty(self, pretty).map_err(ConfigError::SerializeError)?;

        std::fs::write(&config_path, serialized).map_err(ConfigError::WriteError)?;
        Ok(())
    }

    /// Hot-reload: returns `Some(new_config)` if the file changed, `None` otherwise.
    pub fn reload(&self, config_dir: &Path) -> Result<Option<Self>, ConfigError> {
        let config_path = config_dir.join("config.ron");
        let contents = std::fs::read_to_string(&config_path).map_err(ConfigError::ReadError)?;
        let new_config: Config = ron::from_str(&contents).map_err(ConfigError::ParseError)?;
        new_config.physics.validate()?;

        if &new_config != self {
            log::info!("Config reloaded with changes");
            Ok(Some(new_config))
        } else {
            Ok(None)
        }
    }
}
