//! Structured logging for the hexamap layer.
//!
//! Span-based, filterable logging via the `tracing` ecosystem: console output
//! with uptime timestamps and module paths, plus JSON file logging in debug
//! builds. The configuration system's `debug.log_level` provides the default
//! filter; `RUST_LOG` always wins.

use std::path::Path;

use hexamap_config::Config;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize the global tracing subscriber.
///
/// Mode selection and shared-geometry rebuilds are logged at `debug`; the
/// default filter keeps the console at `info` unless the config or `RUST_LOG`
/// says otherwise.
///
/// # Arguments
///
/// * `log_dir` - Optional directory for JSON log files (debug builds only)
/// * `debug_build` - Whether this is a debug build (enables file logging)
/// * `config` - Optional configuration supplying the log level default
pub fn init_logging(log_dir: Option<&Path>, debug_build: bool, config: Option<&Config>) {
    let filter_str = match config {
        Some(config) if !config.debug.log_level.is_empty() => config.debug.log_level.clone(),
        _ => "info".to_string(),
    };

    // RUST_LOG overrides the configured level.
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&filter_str));

    let console_layer = fmt::layer()
        .with_target(true)
        .with_thread_ids(false)
        .with_thread_names(true)
        .with_level(true)
        .with_timer(fmt::time::uptime());

    let subscriber = tracing_subscriber::registry()
        .with(env_filter)
        .with(console_layer);

    // Debug builds also write structured JSON for post-mortem analysis.
    if debug_build
        && let Some(log_dir) = log_dir
        && std::fs::create_dir_all(log_dir).is_ok()
        && let Ok(log_file) = std::fs::File::create(log_dir.join("hexamap.log"))
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

/// An `EnvFilter` with the default filter string (`info` for all targets).
pub fn default_env_filter() -> EnvFilter {
    EnvFilter::new("info")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_filter_is_info() {
        let filter = default_env_filter();
        assert!(format!("{filter}").contains("info"));
    }

    #[test]
    fn test_per_crate_filter_parses() {
        let filter = EnvFilter::new("info,hexamap_layer=debug");
        let filter_str = format!("{filter}");
        assert!(filter_str.contains("hexamap_layer=debug"));
        assert!(filter_str.contains("info"));
    }

    #[test]
    fn test_env_filter_accepts_common_strings() {
        let valid_filters = [
            "info",
            "debug,hexamap_geometry=trace",
            "warn,hexamap_layer=debug",
            "error",
        ];
        for filter_str in &valid_filters {
            assert!(
                EnvFilter::try_from(*filter_str).is_ok(),
                "failed to parse filter: {filter_str}"
            );
        }
    }

    #[test]
    fn test_config_level_feeds_filter() {
        let mut config = Config::default();
        config.debug.log_level = "trace".to_string();
        let filter = EnvFilter::new(&config.debug.log_level);
        assert!(format!("{filter}").contains("trace"));
    }

    #[test]
    fn test_log_file_path_shape() {
        let temp_dir = tempfile::tempdir().unwrap();
        let log_file_path = temp_dir.path().join("hexamap.log");
        assert_eq!(log_file_path.file_name().unwrap(), "hexamap.log");
    }
}
