//! Structured logging for the Folio runtime.
//!
//! Installs a `tracing` subscriber with console output and, in debug builds,
//! a JSON log file. The level comes from `RUST_LOG` when set, otherwise from
//! the config's `debug.log_level`.

use folio_config::Config;
use std::path::Path;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Filter used when neither `RUST_LOG` nor the config provide one.
pub const DEFAULT_FILTER: &str = "info";

/// File name of the JSON log written in debug builds.
pub const LOG_FILE_NAME: &str = "folio.log";

/// Resolve the filter string from an optional config.
///
/// An empty `log_level` falls back to [`DEFAULT_FILTER`].
pub fn filter_string(config: Option<&Config>) -> String {
    match config {
        Some(config) if !config.debug.log_level.is_empty() => config.debug.log_level.clone(),
        _ => DEFAULT_FILTER.to_string(),
    }
}

/// Create `log_dir` if needed and truncate the JSON log file inside it.
///
/// Returns `None` when the directory or file cannot be created; logging then
/// continues on the console only.
pub fn open_log_file(log_dir: &Path) -> Option<std::fs::File> {
    std::fs::create_dir_all(log_dir).ok()?;
    std::fs::File::create(log_dir.join(LOG_FILE_NAME)).ok()
}

/// Initialize the global tracing subscriber.
///
/// * `log_dir` - Directory for the JSON log file (debug builds only)
/// * `debug_build` - Enables the file layer when `true`
/// * `config` - Optional configuration providing the log level
///
/// ```no_run
/// use folio_config::Config;
/// use folio_log::init_logging;
///
/// let config = Config::default();
/// init_logging(None, false, Some(&config));
/// ```
pub fn init_logging(log_dir: Option<&Path>, debug_build: bool, config: Option<&Config>) {
    let filter_str = filter_string(config);

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&filter_str));

    let console_layer = fmt::layer()
        .with_target(true)
        .with_thread_names(true)
        .with_level(true)
        .with_timer(fmt::time::uptime());

    let subscriber = tracing_subscriber::registry()
        .with(env_filter)
        .with(console_layer);

    if debug_build
        && let Some(log_dir) = log_dir
        && let Some(log_file) = open_log_file(log_dir)
    {
        let file_layer = fmt::layer()
            .with_writer(log_file)
            .with_ansi(false)
            .with_target(true)
            .with_timer(fmt::time::uptime())
            .json();

        subscriber.with(file_layer).init();
        return;
    }

    subscriber.init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_filter_defaults_without_config() {
        assert_eq!(filter_string(None), "info");
    }

    #[test]
    fn test_filter_uses_config_level() {
        let mut config = Config::default();
        config.debug.log_level = "folio_world=debug,warn".to_string();
        assert_eq!(filter_string(Some(&config)), "folio_world=debug,warn");
    }

    #[test]
    fn test_empty_config_level_falls_back() {
        let mut config = Config::default();
        config.debug.log_level.clear();
        assert_eq!(filter_string(Some(&config)), DEFAULT_FILTER);
    }

    #[test]
    fn test_subsystem_filters_parse() {
        for filter_str in [
            "info",
            "debug,folio_world=trace",
            "warn,folio_materials=debug,folio_physics=trace",
        ] {
            assert!(
                EnvFilter::try_new(filter_str).is_ok(),
                "Failed to parse filter: {filter_str}"
            );
        }
    }

    #[test]
    fn test_open_log_file_creates_nested_dir() {
        let temp_dir = tempfile::tempdir().unwrap();
        let log_dir = temp_dir.path().join("logs").join("session");

        let mut file = open_log_file(&log_dir).unwrap();
        writeln!(file, "{{\"msg\":\"hello\"}}").unwrap();
        drop(file);

        let written = std::fs::read_to_string(log_dir.join(LOG_FILE_NAME)).unwrap();
        assert_eq!(written.trim(), "{\"msg\":\"hello\"}");
    }

    #[test]
    fn test_open_log_file_truncates_previous_run() {
        let temp_dir = tempfile::tempdir().unwrap();
        std::fs::write(temp_dir.path().join(LOG_FILE_NAME), "stale").unwrap();

        open_log_file(temp_dir.path()).unwrap();
        let len = std::fs::metadata(temp_dir.path().join(LOG_FILE_NAME)).unwrap().len();
        assert_eq!(len, 0);
    }

    #[test]
    fn test_open_log_file_under_a_file_fails() {
        let temp_dir = tempfile::tempdir().unwrap();
        let blocker = temp_dir.path().join("not-a-dir");
        std::fs::write(&blocker, "").unwrap();

        assert!(open_log_file(&blocker.join("logs")).is_none());
    }
}
