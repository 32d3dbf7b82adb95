//! Composable UI component renderers.
//!
//! This module provides specialized rendering components for different UI
//! elements, following a component-based architecture. Each component is
//! responsible for rendering a specific part of the interface.
//!
//! # Components
//!
//! - [`header`]: Page tabs and title bar
//! - [`filter_bar`]: Filter chips of the current page
//! - [`search`]: Search input box (border, query text)
//! - [`table`]: Checkbox column, record columns and pager
//! - [`empty`]: Empty state message for no rows
//! - [`dialog`]: Dialog and details overlays
//! - [`footer`]: Notice line and keybinding hints
//!
//! # Layout
//!
//! ```text
//! [Tabs]
//! [Header]
//! [Border]
//! [Filter bar]
//! [Search bar - 3 lines, search mode only]
//! [Table headers]
//! [Table rows | Empty state]       ← dialog / details overlay drawn here
//! [Blank padding to fill screen]
//! [Pager]
//! [Notice]
//! [Border]
//! [Footer]
//! ```

mod dialog;
mod empty;
mod filter_bar;
mod footer;
mod header;
mod search;
mod table;

use crate::ui::helpers::position_cursor;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::UIViewModel;

use dialog::{render_details, render_dialog};
use empty::render_empty_state;
use filter_bar::render_filter_bar;
use footer::{render_footer, render_notice};
use header::{render_header, render_tabs};
use search::render_search_bar;
use table::{render_pager, render_table_headers, render_table_rows};

/// Rows below the table body: pager, notice, border, footer.
const BOTTOM_CHROME: usize = 4;

/// Renders a horizontal border line at the specified row.
///
/// # Parameters
///
/// * `row` - Row position to render the border (1-indexed)
/// * `color` - Hex color for the border
/// * `cols` - Terminal width in columns
///
/// # Returns
///
/// The next available row position (row + 1)
fn render_border(row: usize, color: &str, cols: usize) -> usize {
    position_cursor(row, 1);
    print!("{}", Theme::fg(color));
    print!("{}", "─".repeat(cols));
    print!("{}", Theme::reset());
    row + 1
}

/// Clears rows `from..to` so stale content from a previous frame disappears.
fn clear_rows(from: usize, to: usize, cols: usize) {
    for row in from..to {
        position_cursor(row, 1);
        print!("{}", " ".repeat(cols));
    }
}

/// Renders one frame of the console.
///
/// # Parameters
///
/// * `vm` - View model for the active page
/// * `theme` - Active color theme
/// * `cols` - Terminal width in columns
/// * `rows` - Terminal height in rows
pub fn render_page(vm: &UIViewModel, theme: &Theme, cols: usize, rows: usize) {
    let mut current_row = 1;

    current_row = render_tabs(current_row, &vm.tabs, theme, cols);
    current_row = render_header(current_row, &vm.header, theme, cols);
    current_row = render_border(current_row, &theme.colors.border, cols);
    current_row = render_filter_bar(current_row, &vm.filter_bar, theme, cols);
    if let Some(search) = &vm.search_bar {
        current_row = render_search_bar(current_row, search, theme, cols);
    }
    current_row = render_table_headers(current_row, &vm.table, theme, cols);

    let body_start = current_row;
    let pager_row = rows.saturating_sub(BOTTOM_CHROME - 1).max(body_start);

    current_row = match &vm.empty_state {
        Some(empty) => render_empty_state(current_row, empty, theme, cols),
        None => render_table_rows(current_row, &vm.table, theme, cols),
    };
    clear_rows(current_row, pager_row, cols);

    let mut bottom = render_pager(pager_row, &vm.table.pager, theme, cols);
    bottom = render_notice(bottom, vm.notice.as_ref(), theme, cols);
    bottom = render_border(bottom, &theme.colors.border, cols);
    render_footer(bottom, &vm.footer, theme, cols);

    if let Some(dialog) = &vm.dialog {
        render_dialog(body_start, dialog, theme, cols);
    } else if let Some(info) = &vm.info {
        render_details(body_start, info, theme, cols);
    }
}
