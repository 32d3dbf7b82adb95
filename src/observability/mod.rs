//! File-based logging for the plugin.
//!
//! The plugin's stdout is the rendered console, so `tracing` output goes to a
//! rotating log file in the plugin data directory instead.
//!
//! # Architecture
//!
//! ```text
//! tracing macros → EnvFilter → fmt layer (no ANSI) → RotatingFile → /data/zadmin.log
//! ```
//!
//! # Features
//!
//! - **Level Filtering**: `trace_level` config key, any `EnvFilter` directive
//! - **Automatic Rotation**: Files rotate at 10MB with 3-backup retention
//!
//! # Usage
//!
//! Initialize tracing early in plugin lifecycle:
//!
//! ```rust
//! use zadmin::observability::init_tracing;
//! use zadmin::Config;
//!
//! let config = Config::default();
//! init_tracing(&config);
//!
//! tracing::debug!("plugin initialized");
//! ```
//!
//! # Modules
//!
//! - [`init`]: Tracing initialization and subscriber setup
//! - [`file_writer`]: Rotating file writer with size-based rotation

mod file_writer;
mod init;

pub use file_writer::{RotatingFile, MAX_BACKUP_FILES, MAX_FILE_SIZE_BYTES};
pub use init::{init_tracing, LOG_FILE};
