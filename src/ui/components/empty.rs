//! Empty state component renderer.
//!
//! This module renders the message displayed in place of the table rows when
//! no record matches the active filters or the page has no records.

use crate::ui::helpers::{center, position_cursor};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::EmptyState;

/// Renders the empty state message.
///
/// Displays a centered two-line message one row below `row`. Shown when:
/// - Filters exclude every record
/// - The page's collection is empty (e.g. after deleting every record)
///
/// # Parameters
///
/// * `row` - First row of the table body (1-indexed)
/// * `empty` - Empty state information (message and subtitle)
/// * `theme` - Active color theme
/// * `cols` - Terminal width in columns
///
/// # Layout
///
/// ```text
/// [1 blank line]
/// [left padding] MESSAGE [right padding]
/// [left padding] subtitle [right padding]
/// ```
///
/// # Returns
///
/// The next available row position.
pub fn render_empty_state(row: usize, empty: &EmptyState, theme: &Theme, cols: usize) -> usize {
    position_cursor(row + 1, 1);
    print!("{}", Theme::fg(&theme.colors.empty_state_fg));
    print!("{}", center(&empty.message, cols));
    print!("{}", Theme::reset());

    position_cursor(row + 2, 1);
    print!("{}", Theme::dim());
    print!("{}", Theme::fg(&theme.colors.text_dim));
    print!("{}", center(&empty.subtitle, cols));
    print!("{}", Theme::reset());
    row + 3
}
