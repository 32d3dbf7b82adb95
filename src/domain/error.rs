//! Error types for the zadmin console.
//!
//! This module defines the centralized error type [`ZadminError`] and a type alias
//! [`Result`] used throughout the crate. Errors fall into two groups:
//!
//! - **Recoverable interaction errors** (`Validation`, `NotFound`, `DialogBusy`):
//!   produced while handling user input. The event handler surfaces them inline
//!   (dialog error line, error notice) or swallows them, and state stays unchanged.
//! - **Startup errors** (`Seed`, `Io`, `Json`, `Theme`, `Config`): produced while
//!   loading configuration, themes or seed data. `initialize` falls back to
//!   built-in defaults when they occur.

use crate::domain::record::RecordId;
use thiserror::Error;

/// The main error type for zadmin operations.
///
/// # Examples
///
/// ```
/// use zadmin::ZadminError;
///
/// let err = ZadminError::validation("reason", "A reason is required");
/// assert_eq!(err.to_string(), "reason: A reason is required");
/// assert!(err.is_recoverable());
/// ```
#[derive(Debug, Error)]
pub enum ZadminError {
    /// A required form field is empty or a field rule failed.
    ///
    /// Shown inline in the open dialog and blocks the confirm transition.
    #[error("{field}: {message}")]
    Validation {
        /// Key of the offending field (or filter).
        field: String,
        /// Human-readable description shown to the user.
        message: String,
    },

    /// An action referenced a record id that is no longer in the collection.
    #[error("record {id} not found")]
    NotFound {
        /// The missing record id.
        id: RecordId,
    },

    /// A dialog is already open on this page.
    #[error("another dialog is already open")]
    DialogBusy,

    /// Seed data could not be loaded or is inconsistent.
    #[error("Seed error: {0}")]
    Seed(String),

    /// Filesystem or I/O operation failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Seed JSON could not be parsed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Theme parsing or loading failed.
    #[error("Theme error: {0}")]
    Theme(String),

    /// Configuration is invalid, or a filter/field key is unknown.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl ZadminError {
    /// Builds a [`ZadminError::Validation`] for `field`.
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Returns `true` for errors produced by user interaction that must never
    /// take the page down.
    #[must_use]
    pub const fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Self::Validation { .. } | Self::NotFound { .. } | Self::DialogBusy
        )
    }
}

/// A specialized `Result` type for zadmin operations.
pub type Result<T> = std::result::Result<T, ZadminError>;
