//! Filter bar component renderer.

use crate::ui::helpers::{fit, position_cursor, width};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::FilterBarInfo;
use crate::table::ALL;

/// Renders the page's filters as `Label: value` chips.
///
/// The focused chip (the one `c` cycles) is bold; active filters use the
/// normal text color and inactive ones (`all`) are dimmed.
///
/// # Returns
///
/// The next available row position (row + 1)
pub fn render_filter_bar(row: usize, bar: &FilterBarInfo, theme: &Theme, cols: usize) -> usize {
    position_cursor(row, 1);

    let mut used = 0;
    for chip in &bar.chips {
        let text = format!(" {}: {} ", chip.label, chip.value);
        let text_len = width(&text) + 1;
        if used + text_len > cols {
            break;
        }
        if chip.is_focused {
            print!("{}", Theme::bold());
            print!("{}", Theme::fg(&theme.colors.search_bar_border));
            print!("[{}]", text.trim_end());
        } else {
            let color = if chip.value == ALL {
                &theme.colors.text_dim
            } else {
                &theme.colors.text_normal
            };
            print!("{}", Theme::fg(color));
            print!("{text} ");
        }
        print!("{}", Theme::reset());
        used += text_len;
    }
    print!("{}", fit("", cols.saturating_sub(used)));
    row + 1
}
