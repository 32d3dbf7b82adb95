//! Platform helpers for the Zellij plugin sandbox.
//!
//! # Modules
//!
//! - [`paths`]: Data directory and host path mapping

pub mod paths;

pub use paths::{expand_tilde, get_data_dir};
