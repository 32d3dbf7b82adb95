//! Input mode state types for the application.
//!
//! The mode decides how a key press is interpreted:
//! - **Normal**: navigation, filters, selection and row actions
//! - **Search**: typing a search query or navigating its results
//! - **Dialog**: keystrokes edit the open dialog's form
//! - **Info**: a details overlay is shown; any key dismisses it
//!
//! # Example
//!
//! ```rust
//! use zadmin::app::modes::{InputMode, SearchFocus};
//!
//! let mode = InputMode::Search(SearchFocus::Typing);
//! assert!(mode.is_typing());
//! ```

/// Focus state within search mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchFocus {
    /// User is typing in the search input field.
    ///
    /// Accepts character input, backspace, and enter (to switch to Navigating).
    Typing,

    /// User is navigating through filtered results.
    ///
    /// Normal-mode keys apply; `/` returns to Typing and Esc clears the search.
    Navigating,
}

/// Current input handling mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputMode {
    /// Default navigation and command mode.
    #[default]
    Normal,

    /// Active search mode with focus state.
    Search(SearchFocus),

    /// A confirmation or form dialog is open on the active page.
    Dialog,

    /// A read-only details overlay is shown.
    Info,
}

impl InputMode {
    /// Returns `true` when printable keys are text input rather than commands.
    #[must_use]
    pub const fn is_typing(self) -> bool {
        matches!(self, Self::Search(SearchFocus::Typing) | Self::Dialog)
    }
}
