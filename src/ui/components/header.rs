//! Header component renderer.
//!
//! This module renders the page tabs and the title bar beneath them.

use crate::ui::helpers::{fit, position_cursor, width};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{HeaderInfo, TabInfo};

/// Renders the page tabs at the specified row.
///
/// The active tab uses the `tab_active_fg`/`tab_active_bg` theme colors;
/// the others are dimmed. The digit before each title is the key that jumps
/// to the page.
///
/// # Parameters
///
/// * `row` - Row position to render the tabs (1-indexed)
/// * `tabs` - Tabs in page order
/// * `theme` - Active color theme
/// * `cols` - Terminal width in columns
///
/// # Returns
///
/// The next available row position (row + 1)
///
/// # Layout
///
/// ```text
///  1 Users   2 Billing   3 QR Codes   4 Plans   5 Plan History   6 Notifications
/// ```
pub fn render_tabs(row: usize, tabs: &[TabInfo], theme: &Theme, cols: usize) -> usize {
    position_cursor(row, 1);
    let mut used = 0;
    for (i, tab) in tabs.iter().enumerate() {
        let label = format!(" {} {} ", i + 1, tab.title);
        let label_len = width(&label) + 1;
        if used + label_len > cols {
            break;
        }
        if tab.is_active {
            print!("{}", Theme::bold());
            print!("{}", Theme::fg(&theme.colors.tab_active_fg));
            print!("{}", Theme::bg(&theme.colors.tab_active_bg));
        } else {
            print!("{}", Theme::fg(&theme.colors.text_dim));
        }
        print!("{label}");
        print!("{} ", Theme::reset());
        used += label_len;
    }
    print!("{}", " ".repeat(cols.saturating_sub(used)));
    row + 1
}

/// Renders the header title bar at the specified row.
///
/// The page heading is bold and left-aligned; the product title is dimmed at
/// the right edge. Pads the line to fill the entire terminal width.
///
/// # Parameters
///
/// * `row` - Row position to render the header (1-indexed)
/// * `header` - Header information (title and page heading)
/// * `theme` - Active color theme
/// * `cols` - Terminal width in columns
///
/// # Returns
///
/// The next available row position (row + 1)
pub fn render_header(row: usize, header: &HeaderInfo, theme: &Theme, cols: usize) -> usize {
    let title_len = width(&header.title);
    let heading_cols = cols.saturating_sub(title_len);

    position_cursor(row, 1);
    if let Some(bg) = &theme.colors.header_bg {
        print!("{}", Theme::bg(bg));
    }
    print!("{}", Theme::bold());
    print!("{}", Theme::fg(&theme.colors.header_fg));
    print!("{}", fit(&format!(" {}", header.heading), heading_cols));
    print!("{}", Theme::reset());

    if title_len < cols {
        if let Some(bg) = &theme.colors.header_bg {
            print!("{}", Theme::bg(bg));
        }
        print!("{}", Theme::fg(&theme.colors.text_dim));
        print!("{}", header.title);
        print!("{}", Theme::reset());
    }
    row + 1
}
