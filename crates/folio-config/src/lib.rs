//! Configuration for the Folio world runtime.
//!
//! Settings persist to disk as RON files and can be overridden from the
//! command line via clap. Every section is `#[serde(default)]`, so partially
//! authored files keep loading as the schema grows.

mod cli;
mod config;
mod error;

pub use cli::CliArgs;
pub use config::{AssetsConfig, Config, DebugConfig, PhysicsConfig};
pub use error::ConfigError;
