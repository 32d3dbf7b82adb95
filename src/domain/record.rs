//! The [`Record`] abstraction every console table is generic over.
//!
//! A record type declares its table layout ([`Column`]s), the filters its page
//! offers ([`FilterSpec`]s) and the row actions it supports ([`ActionKind`]s).
//! The table engine in [`crate::table`] only talks to records through this
//! trait, so filtering, pagination, selection and dialogs are written once.
//!
//! # Example
//!
//! ```
//! use zadmin::domain::{Record, User};
//!
//! let columns: Vec<_> = User::columns().iter().map(|c| c.key).collect();
//! assert!(columns.contains(&"email"));
//! ```

use crate::domain::error::{Result, ZadminError};
use crate::domain::form::Form;
use crate::domain::page::NavTarget;
use chrono::NaiveDate;
use std::fmt;

/// Stable identifier of a record within its collection.
pub type RecordId = u64;

/// A named attribute value exposed to filters and cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldValue<'a> {
    /// Free text or an enumerated value rendered as text.
    Text(&'a str),
    /// Calendar date.
    Date(NaiveDate),
    /// Integer count.
    Number(i64),
}

impl FieldValue<'_> {
    /// Returns the calendar date, if this is a date value.
    #[must_use]
    pub const fn as_date(&self) -> Option<NaiveDate> {
        match self {
            Self::Date(date) => Some(*date),
            _ => None,
        }
    }
}

impl fmt::Display for FieldValue<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(text) => f.write_str(text),
            Self::Date(date) => write!(f, "{}", date.format("%Y-%m-%d")),
            Self::Number(n) => write!(f, "{n}"),
        }
    }
}

/// One table column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Column {
    /// Key passed to [`Record::cell`].
    pub key: &'static str,
    /// Header text.
    pub title: &'static str,
    /// Preferred display width in columns.
    pub width: usize,
}

impl Column {
    pub const fn new(key: &'static str, title: &'static str, width: usize) -> Self {
        Self { key, title, width }
    }
}

/// How a filter matches records.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterKind {
    /// Case-insensitive substring search over any of `fields`.
    Text { fields: &'static [&'static str] },
    /// Exact equality on `field`, chosen from `options` (plus "all").
    Category {
        field: &'static str,
        options: &'static [&'static str],
    },
    /// Calendar-date equality on `field`.
    Date { field: &'static str },
}

/// A filter a page offers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FilterSpec {
    /// Key used in [`crate::table::FilterState`].
    pub key: &'static str,
    /// Label shown in the filter bar.
    pub label: &'static str,
    pub kind: FilterKind,
}

/// Key of the text search filter every record type declares.
pub const SEARCH_FILTER: &str = "search";

/// Row actions a record type may support.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActionKind {
    /// Hand off to another page (e.g. view profile).
    View,
    /// Read-only details projection.
    Details,
    /// Edit form prefilled from the record.
    Edit,
    /// Delete with a required reason.
    Delete,
    /// Flip between two statuses without confirmation.
    ToggleStatus,
    /// Deactivate after confirmation.
    Deactivate,
    /// Send after confirmation.
    Send,
}

impl ActionKind {
    /// Menu label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::View => "view",
            Self::Details => "details",
            Self::Edit => "edit",
            Self::Delete => "delete",
            Self::ToggleStatus => "toggle",
            Self::Deactivate => "deactivate",
            Self::Send => "send",
        }
    }

    /// Key bound to the action in normal mode.
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::View => "Enter",
            Self::Details => "i",
            Self::Edit => "e",
            Self::Delete => "D",
            Self::ToggleStatus => "t",
            Self::Deactivate => "z",
            Self::Send => "s",
        }
    }
}

/// A row in one of the console tables.
///
/// Required methods describe the record; provided methods default to "not
/// supported" so each type only implements the behaviour its page offers.
pub trait Record: Clone + fmt::Debug {
    /// Singular noun used in notices ("user", "plan").
    const KIND: &'static str;

    fn id(&self) -> RecordId;

    /// Human-readable name used in dialog titles and notices.
    fn label(&self) -> String;

    /// Named attribute used by filters.
    fn field(&self, key: &str) -> Option<FieldValue<'_>>;

    /// Display text for column `key`.
    fn cell(&self, key: &str) -> String {
        self.field(key).map(|v| v.to_string()).unwrap_or_default()
    }

    fn columns() -> &'static [Column];

    fn filters() -> &'static [FilterSpec];

    fn actions() -> &'static [ActionKind];

    /// Read-only projection shown by [`ActionKind::Details`].
    fn details(&self) -> Vec<(&'static str, String)>;

    /// Result of an immediate or confirmed status transition
    /// ([`ActionKind::ToggleStatus`], [`ActionKind::Deactivate`],
    /// [`ActionKind::Send`]). `None` when the transition does not apply.
    fn transition(&self, _kind: ActionKind) -> Option<Self> {
        None
    }

    /// Target of [`ActionKind::View`].
    fn view_target(&self) -> Option<NavTarget> {
        None
    }

    /// Form prefilled from the record, for [`ActionKind::Edit`].
    fn edit_form(&self) -> Option<Form> {
        None
    }

    /// Builds the edited record from a validated form.
    ///
    /// # Errors
    ///
    /// Returns [`ZadminError::Validation`] when a field cannot be parsed.
    fn apply_form(&self, _form: &Form) -> Result<Self> {
        Err(ZadminError::Config(format!("{} records are not editable", Self::KIND)))
    }

    /// Empty form for creating a record, when the page supports creation.
    fn create_form() -> Option<Form> {
        None
    }

    /// Builds a new record with `id` from a validated form.
    ///
    /// # Errors
    ///
    /// Returns [`ZadminError::Validation`] when a field cannot be parsed.
    fn from_form(_id: RecordId, _form: &Form) -> Result<Self> {
        Err(ZadminError::Config(format!("{} records cannot be created", Self::KIND)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn field_values_render_for_cells() {
        let date = NaiveDate::from_ymd_opt(2024, 1, 15).unwrap();
        assert_eq!(FieldValue::Date(date).to_string(), "2024-01-15");
        assert_eq!(FieldValue::Number(42).to_string(), "42");
        assert_eq!(FieldValue::Text("Admin").to_string(), "Admin");
        assert_eq!(FieldValue::Date(date).as_date(), Some(date));
        assert_eq!(FieldValue::Number(1).as_date(), None);
    }
}
