//! Search bar component renderer.
//!
//! This module renders the search input box with a bordered frame and query
//! text display.

use crate::ui::helpers::{fit, position_cursor};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::SearchBarInfo;

/// Horizontal margin for the search box (spaces on left and right).
const SEARCH_BOX_MARGIN: usize = 5;

/// Renders the search input box at the specified row.
///
/// Displays a 3-line bordered box containing the search query text. The box
/// is horizontally centered with margins on both sides.
///
/// # Parameters
///
/// * `row` - Starting row position for the search box (1-indexed)
/// * `search` - Search bar information (query text)
/// * `theme` - Active color theme
/// * `cols` - Terminal width in columns
///
/// # Returns
///
/// The next available row position (row + 3, since search box uses 3 lines)
///
/// # Layout
///
/// ```text
/// [margin] ┌─────────────┐ [margin]
/// [margin] │ Search: ... │ [margin]
/// [margin] └─────────────┘ [margin]
/// ```
///
/// The box width is calculated as `cols - (2 * SEARCH_BOX_MARGIN)`. The inner
/// content width is `box_width - 2` (accounting for left and right borders).
///
/// # Rendering Details
///
/// - Borders use theme `search_bar_border` color while typing, `border`
///   while navigating results
/// - Query text uses theme `text_normal` color
/// - Query is displayed as " Search: {query}", with a `_` cursor while typing
/// - Right padding fills remaining space to box edge
pub fn render_search_bar(row: usize, search: &SearchBarInfo, theme: &Theme, cols: usize) -> usize {
    let box_width = cols.saturating_sub(SEARCH_BOX_MARGIN * 2);
    let inner_width = box_width.saturating_sub(2);
    let border = if search.is_typing {
        &theme.colors.search_bar_border
    } else {
        &theme.colors.border
    };

    position_cursor(row, 1);
    print!("{}", " ".repeat(SEARCH_BOX_MARGIN));
    print!("{}", Theme::fg(border));
    print!("┌{}┐", "─".repeat(inner_width));
    print!("{}", Theme::reset());

    let cursor = if search.is_typing { "_" } else { "" };
    let search_text = fit(&format!(" Search: {}{cursor}", search.query), inner_width);

    position_cursor(row + 1, 1);
    print!("{}", " ".repeat(SEARCH_BOX_MARGIN));
    print!("{}", Theme::fg(border));
    print!("│");
    print!("{}", Theme::fg(&theme.colors.text_normal));
    print!("{search_text}");
    print!("{}", Theme::fg(border));
    print!("│");
    print!("{}", Theme::reset());

    position_cursor(row + 2, 1);
    print!("{}", " ".repeat(SEARCH_BOX_MARGIN));
    print!("{}", Theme::fg(border));
    print!("└{}┘", "─".repeat(inner_width));
    print!("{}", Theme::reset());

    row + 3
}
