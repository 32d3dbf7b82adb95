//! View model types representing renderable UI state.
//!
//! This module defines immutable view models computed from application state.
//! View models are optimized for rendering: every cell is already formatted,
//! the cursor and checkbox state are resolved, and only the current page of
//! rows is included.
//!
//! # Architecture
//!
//! View models are created via `AppState::compute_viewmodel()` and consumed by
//! the renderer. They contain no business logic, only display-ready data.
//!
//! # Example
//!
//! ```rust
//! use zadmin::ui::viewmodel::{FooterInfo, HeaderInfo};
//!
//! let header = HeaderInfo {
//!     title: "zadmin".to_string(),
//!     heading: "User Management".to_string(),
//! };
//! let footer = FooterInfo { keybindings: "q: quit".to_string() };
//! assert_eq!(header.heading, "User Management");
//! # let _ = footer;
//! ```

use crate::table::selection::HeaderCheck;

pub use crate::table::dispatch::DetailsView;

/// Complete UI view model for rendering.
#[derive(Debug, Clone)]
pub struct UIViewModel {
    /// One entry per console page, in tab order.
    pub tabs: Vec<TabInfo>,

    /// Header information (product title, page heading).
    pub header: HeaderInfo,

    /// Active and focusable filters of the current page.
    pub filter_bar: FilterBarInfo,

    /// Optional search bar information (when in search mode).
    pub search_bar: Option<SearchBarInfo>,

    /// The current page of the table.
    pub table: TableView,

    /// Optional empty state message (when no rows match).
    pub empty_state: Option<EmptyState>,

    /// Open dialog of the current page, if any.
    pub dialog: Option<DialogView>,

    /// Read-only details overlay, if any.
    pub info: Option<DetailsView>,

    /// Latest notice for the status line.
    pub notice: Option<NoticeView>,

    /// Footer information (keybindings, help text).
    pub footer: FooterInfo,
}

/// A console page tab.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TabInfo {
    pub title: String,
    pub is_active: bool,
}

/// Header display information.
#[derive(Debug, Clone)]
pub struct HeaderInfo {
    /// Title text to display in the header bar.
    pub title: String,
    /// Heading of the current page.
    pub heading: String,
}

/// Filter chips shown above the table.
#[derive(Debug, Clone, Default)]
pub struct FilterBarInfo {
    pub chips: Vec<FilterChip>,
}

/// One filter in the filter bar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterChip {
    pub label: String,
    /// Active value, or `"all"` when the filter is inactive.
    pub value: String,
    /// Whether `c` cycles this filter.
    pub is_focused: bool,
}

/// Data table display information for the current page.
#[derive(Debug, Clone, Default)]
pub struct TableView {
    pub columns: Vec<ColumnHeader>,
    /// Header checkbox state relative to the filtered rows.
    pub header_check: HeaderCheck,
    pub rows: Vec<RowView>,
    pub pager: PagerInfo,
}

/// Column header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnHeader {
    pub title: String,
    pub width: usize,
}

/// One rendered row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowView {
    /// Formatted cells, one per column.
    pub cells: Vec<String>,
    /// Whether the row is part of the bulk selection.
    pub is_checked: bool,
    /// Whether the row cursor is on this row.
    pub is_cursor: bool,
}

/// Pagination and selection summary.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PagerInfo {
    pub page: usize,
    pub total_pages: usize,
    pub page_size: usize,
    /// Rows matching the active filters.
    pub filtered: usize,
    /// Rows in the whole collection.
    pub total: usize,
    /// Rows in the bulk selection.
    pub selected: usize,
}

/// Dialog display information.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DialogView {
    pub title: String,
    pub message: Option<String>,
    pub fields: Vec<DialogField>,
    /// Inline validation error from the last submit.
    pub error: Option<String>,
}

/// One labelled dialog input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DialogField {
    pub label: String,
    pub value: String,
    pub is_focused: bool,
    /// Choice fields cycle with space instead of accepting free text.
    pub is_choice: bool,
}

/// Status line notice.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoticeView {
    pub message: String,
    pub is_error: bool,
}

/// Footer display information.
#[derive(Debug, Clone)]
pub struct FooterInfo {
    /// Keybinding help text (e.g., "q: quit | /: search").
    pub keybindings: String,
}

/// Empty state message display information.
///
/// Shown when no rows match the active filters.
#[derive(Debug, Clone)]
pub struct EmptyState {
    /// Primary message (e.g., "No users found").
    pub message: String,

    /// Secondary explanatory text.
    pub subtitle: String,
}

/// Search bar display information.
#[derive(Debug, Clone)]
pub struct SearchBarInfo {
    /// Current search query text.
    pub query: String,
    /// Whether keystrokes currently edit the query.
    pub is_typing: bool,
}
