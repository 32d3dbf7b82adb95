//! Footer component renderer.
//!
//! This module renders the notice line and the footer help bar with centered
//! keybinding hints.

use crate::ui::helpers::{center, fit, position_cursor};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{FooterInfo, NoticeView};

/// Renders the footer help bar at the specified row.
///
/// Displays keybinding hints centered horizontally with dimmed styling. Pads
/// the line to fill the entire terminal width.
///
/// # Parameters
///
/// * `row` - Row position to render the footer (1-indexed)
/// * `footer` - Footer information (keybinding text)
/// * `theme` - Active color theme
/// * `cols` - Terminal width in columns
///
/// # Returns
///
/// The next available row position (row + 1)
///
/// # Truncation
///
/// If the help text exceeds terminal width, it is truncated to fit. This
/// prevents layout corruption on narrow terminals.
pub fn render_footer(row: usize, footer: &FooterInfo, theme: &Theme, cols: usize) -> usize {
    position_cursor(row, 1);
    print!("{}", Theme::fg(&theme.colors.text_dim));
    print!("{}", center(&footer.keybindings, cols));
    print!("{}", Theme::reset());
    row + 1
}

/// Renders the latest notice, or a blank line when there is none.
///
/// Error notices use `error_fg`, others `notice_fg`.
pub fn render_notice(row: usize, notice: Option<&NoticeView>, theme: &Theme, cols: usize) -> usize {
    position_cursor(row, 1);
    match notice {
        Some(notice) => {
            let (color, marker) = if notice.is_error {
                (&theme.colors.error_fg, "✗")
            } else {
                (&theme.colors.notice_fg, "✓")
            };
            print!("{}", Theme::fg(color));
            print!("{}", fit(&format!(" {marker} {}", notice.message), cols));
            print!("{}", Theme::reset());
        }
        None => print!("{}", " ".repeat(cols)),
    }
    row + 1
}
