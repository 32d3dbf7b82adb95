//! Tracing initialization and subscriber setup.
//!
//! This module configures the tracing subscriber, setting up the pipeline
//! from `tracing` macros to the rotating log file.

use super::file_writer::RotatingFile;
use crate::Config;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Log file name inside the plugin data directory.
pub const LOG_FILE: &str = "zadmin.log";

/// Level used when `trace_level` is unset or not a valid filter.
const DEFAULT_LEVEL: &str = "info";

/// Initializes the tracing subscriber with file output.
///
/// Sets up a tracing subscriber pipeline that:
/// 1. Filters events based on the configured trace level
/// 2. Formats them as plain text lines (no ANSI colors)
/// 3. Writes to a rotating file with backups
///
/// # Parameters
///
/// * `config` - Plugin configuration containing the `trace_level` option
///
/// # Trace Level Resolution
///
/// Level is determined by:
/// 1. `config.trace_level` if set and a valid `EnvFilter` directive
/// 2. Default: `"info"`
///
/// # File Location
///
/// Logs are written to `/data/zadmin.log`, the plugin's data directory in
/// Zellij's sandbox.
///
/// # Initialization Behavior
///
/// - Creates data directory if it doesn't exist
/// - Silently returns if directory creation fails (logging is optional)
/// - Idempotent: Safe to call multiple times (only first call takes effect)
pub fn init_tracing(config: &Config) {
    let data_dir = crate::infrastructure::paths::get_data_dir();
    if std::fs::create_dir_all(&data_dir).is_err() {
        return;
    }

    let level = config.trace_level.as_deref().unwrap_or(DEFAULT_LEVEL);
    let filter = EnvFilter::try_new(level).unwrap_or_else(|_| EnvFilter::new(DEFAULT_LEVEL));

    let writer = RotatingFile::new(data_dir.join(LOG_FILE));
    let layer = fmt::layer()
        .with_ansi(false)
        .with_target(false)
        .with_writer(writer);

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(layer)
        .try_init();
}
