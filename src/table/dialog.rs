//! Confirmation and form dialog state machine.
//!
//! ```text
//!            open()                submit(): valid + committed
//!  Closed ──────────────▶ Open ────────────────────────────────▶ Closed
//!    ▲                    │  │
//!    │      cancel()      │  │ submit(): validation error
//!    └────────────────────┘  └──────▶ Open (error shown, nothing applied)
//! ```
//!
//! A table has at most one dialog. Opening a second one fails with
//! [`ZadminError::DialogBusy`] and leaves the open dialog untouched.

use crate::domain::error::{Result, ZadminError};
use crate::domain::form::Form;
use crate::domain::record::RecordId;

/// What confirming the dialog will do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PendingKind {
    /// Delete one record; the form asks for a reason.
    Delete,
    Deactivate,
    Send,
    /// Replace a record with the edited form values.
    Edit,
    /// Append a new record built from the form.
    Create,
    /// Delete the given selected records; the form asks for a reason.
    BulkDelete(Vec<RecordId>),
    /// Assign a plan to the given users. Committed by the application layer.
    AssignPlan(Vec<RecordId>),
    /// Prompt for the value of the named date filter. Committed by the
    /// application layer.
    DateFilter(&'static str),
}

/// The single in-flight action awaiting confirmation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingAction {
    pub kind: PendingKind,
    /// Target record for single-record actions.
    pub record_id: Option<RecordId>,
    pub form: Form,
    /// Validation message from the last failed submit.
    pub error: Option<String>,
}

impl PendingAction {
    #[must_use]
    pub const fn new(kind: PendingKind, record_id: Option<RecordId>, form: Form) -> Self {
        Self {
            kind,
            record_id,
            form,
            error: None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Dialog {
    #[default]
    Closed,
    Open(PendingAction),
}

impl Dialog {
    #[must_use]
    pub const fn is_open(&self) -> bool {
        matches!(self, Self::Open(_))
    }

    #[must_use]
    pub const fn pending(&self) -> Option<&PendingAction> {
        match self {
            Self::Open(pending) => Some(pending),
            Self::Closed => None,
        }
    }

    /// Opens the dialog for `pending`.
    ///
    /// # Errors
    ///
    /// Returns [`ZadminError::DialogBusy`] when a dialog is already open.
    pub fn open(&mut self, pending: PendingAction) -> Result<()> {
        if self.is_open() {
            return Err(ZadminError::DialogBusy);
        }
        tracing::debug!(title = %pending.form.title, "dialog opened");
        *self = Self::Open(pending);
        Ok(())
    }

    /// Closes the dialog without applying anything.
    pub fn cancel(&mut self) -> Option<PendingAction> {
        match std::mem::take(self) {
            Self::Open(pending) => {
                tracing::debug!(title = %pending.form.title, "dialog cancelled");
                Some(pending)
            }
            Self::Closed => None,
        }
    }

    /// Types a character into the focused field.
    pub fn push_char(&mut self, c: char) {
        if let Self::Open(pending) = self {
            pending.form.push_char(c);
            pending.error = None;
        }
    }

    pub fn backspace(&mut self) {
        if let Self::Open(pending) = self {
            pending.form.backspace();
            pending.error = None;
        }
    }

    pub fn focus_next(&mut self) {
        if let Self::Open(pending) = self {
            pending.form.focus_next();
        }
    }

    pub fn focus_prev(&mut self) {
        if let Self::Open(pending) = self {
            pending.form.focus_prev();
        }
    }

    /// Validates the form and hands the pending action to `commit`.
    ///
    /// `commit` must not have side effects when it fails. On success the
    /// dialog closes and the commit result is returned. A validation error,
    /// from the form or from `commit`, keeps the dialog open with the message
    /// shown inline. Any other error closes the dialog.
    ///
    /// Returns `Ok(None)` when no dialog is open.
    ///
    /// # Errors
    ///
    /// Returns the validation or commit error.
    pub fn submit<T>(&mut self, commit: impl FnOnce(&PendingAction) -> Result<T>) -> Result<Option<T>> {
        let Self::Open(pending) = self else {
            return Ok(None);
        };

        let outcome = pending.form.validate().and_then(|()| commit(pending));
        match outcome {
            Ok(value) => {
                *self = Self::Closed;
                Ok(Some(value))
            }
            Err(ZadminError::Validation { field, message }) => {
                tracing::debug!(%field, %message, "dialog submit rejected");
                pending.error = Some(message.clone());
                Err(ZadminError::Validation { field, message })
            }
            Err(err) => {
                *self = Self::Closed;
                Err(err)
            }
        }
    }
}
