//! Command-line argument parsing for the Folio runtime.

use std::path::PathBuf;

use clap::Parser;

use crate::Config;

/// Folio command-line arguments.
///
/// CLI values override settings loaded from `config.ron`.
#[derive(Parser, Debug)]
#[command(name = "folio", about = "Folio world composition runtime")]
pub struct CliArgs {
    /// Log level (error, warn, info, debug, trace).
    #[arg(long)]
    pub log_level: Option<String>,

    /// Expose material parameters to the live inspector.
    #[arg(long)]
    pub inspector: Option<bool>,

    /// Number of simulation ticks to run before exiting.
    #[arg(long, default_value_t = 300)]
    pub ticks: u64,

    /// Path to config directory (overrides default location).
    #[arg(long)]
    pub config: Option<PathBuf>,
}

impl Config {
    /// Apply CLI overrides to a loaded config.
    pub fn apply_cli_overrides(&mut self, args: &CliArgs) {
        if let Some(ref level) = args.log_level {
            self.debug.log_level = level.clone();
        }
        if let Some(inspector) = args.inspector {
            self.debug.inspector = inspector;
        }
    }
}
