//! Per-user directories for config and logs.

use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// Errors raised while preparing application directories.
#[derive(Debug, Error)]
pub enum DirsError {
    /// The OS did not provide a configuration directory.
    #[error("could not determine OS configuration directory")]
    NoConfigDir,
    /// Directory creation failed.
    #[error("platform I/O error: {0}")]
    Io(#[from] io::Error),
}

const APP_NAME: &str = "folio";

/// Where Folio keeps its files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppDirs {
    /// Holds `config.ron`.
    pub config_dir: PathBuf,
    /// Holds `folio.log` in debug builds.
    pub log_dir: PathBuf,
}

impl AppDirs {
    /// Resolves the platform directories without touching the disk.
    ///
    /// # Errors
    ///
    /// Returns [`DirsError::NoConfigDir`] if the OS exposes no config directory.
    pub fn resolve() -> Result<Self, DirsError> {
        let base = dirs::config_dir().ok_or(DirsError::NoConfigDir)?;
        Ok(Self::resolve_with_root(&base))
    }

    /// Resolves directories under `root` instead of the OS location.
    pub fn resolve_with_root(root: &Path) -> Self {
        let app_dir = root.join(APP_NAME);
        Self {
            config_dir: app_dir.clone(),
            log_dir: app_dir.join("logs"),
        }
    }

    /// Uses `config_dir` as given, with logs beneath it.
    pub fn with_config_dir(config_dir: PathBuf) -> Self {
        Self {
            log_dir: config_dir.join("logs"),
            config_dir,
        }
    }

    /// Creates every directory on disk.
    pub fn create_dirs(&self) -> Result<(), DirsError> {
        std::fs::create_dir_all(&self.config_dir)?;
        std::fs::create_dir_all(&self.log_dir)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_with_root_layout() {
        let dirs = AppDirs::resolve_with_root(Path::new("/tmp/root"));
        assert_eq!(dirs.config_dir, Path::new("/tmp/root").join("folio"));
        assert_eq!(dirs.log_dir, Path::new("/tmp/root").join("folio").join("logs"));
    }

    #[test]
    fn test_directory_creation() {
        let tmp = tempfile::tempdir().unwrap();
        let dirs = AppDirs::resolve_with_root(tmp.path());
        dirs.create_dirs().unwrap();
        assert!(dirs.config_dir.is_dir());
        assert!(dirs.log_dir.is_dir());
    }

    #[test]
    fn test_explicit_config_dir() {
        let dirs = AppDirs::with_config_dir(PathBuf::from("cfg"));
        assert_eq!(dirs.config_dir, PathBuf::from("cfg"));
        assert_eq!(dirs.log_dir, Path::new("cfg").join("logs"));
    }
}
