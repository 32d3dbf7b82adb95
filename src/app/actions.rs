//! Actions representing side effects to be executed by the plugin runtime.
//!
//! This module defines the [`Action`] type, which represents imperative commands
//! produced by the event handler after processing user input. Actions bridge
//! pure state transformations and the collaborators outside the core: the
//! Zellij pane, the navigation shell, the notice line and the exporter.
//!
//! # Architecture
//!
//! The event handler returns a `Vec<Action>` after processing each event, allowing
//! multiple side effects to be queued atomically. The plugin runtime executes
//! these actions in sequence.
//!
//! # Example
//!
//! ```rust
//! use zadmin::app::{Action, Notice};
//!
//! let actions = vec![Action::Notify(Notice::info("Deleted user Jane Smith"))];
//! assert_eq!(actions.len(), 1);
//! ```

use crate::domain::page::{NavTarget, PageKind};
use crate::domain::record::RecordId;

/// Commands representing side effects to be executed by the plugin runtime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Closes the focused floating pane, hiding the plugin UI.
    ///
    /// Sent when the user explicitly requests to exit the plugin (e.g., pressing 'q').
    CloseFocus,

    /// Hands off to another console page.
    ///
    /// The runtime feeds it back as [`crate::app::Event::NavigateTo`].
    Navigate(NavTarget),

    /// Shows a notice in the status line.
    Notify(Notice),

    /// Requests an export of the given rows.
    ///
    /// Serialization is not part of the console; the runtime logs the request.
    Export {
        /// Page the rows belong to.
        page: PageKind,
        format: ExportFormat,
        /// Ids of the filtered rows, in display order.
        ids: Vec<RecordId>,
    },
}

/// Notice severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Info,
    /// Rendered in the error color ("destructive" toast).
    Error,
}

/// A short message for the status line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub message: String,
    pub severity: Severity,
}

impl Notice {
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            severity: Severity::Info,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            severity: Severity::Error,
        }
    }
}

/// Export file formats offered by the console.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Csv,
    Xlsx,
    Pdf,
}

impl ExportFormat {
    /// Format bound to `key` in normal mode: `E` CSV, `X` XLSX, `R` PDF.
    #[must_use]
    pub const fn from_key(key: char) -> Option<Self> {
        match key {
            'E' => Some(Self::Csv),
            'X' => Some(Self::Xlsx),
            'R' => Some(Self::Pdf),
            _ => None,
        }
    }

    #[must_use]
    pub const fn extension(self) -> &'static str {
        match self {
            Self::Csv => "csv",
            Self::Xlsx => "xlsx",
            Self::Pdf => "pdf",
        }
    }
}
