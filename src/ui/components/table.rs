//! Table component renderer.
//!
//! This module renders the current page of a data table: a checkbox column
//! followed by the record's columns, the row cursor highlight and the pager
//! line.

use crate::table::HeaderCheck;
use crate::ui::helpers::{fit, position_cursor};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{ColumnHeader, PagerInfo, RowView, TableView};

/// Width of the checkbox column, including its trailing space.
const CHECK_WIDTH: usize = 4;

const fn checkbox(state: HeaderCheck) -> &'static str {
    match state {
        HeaderCheck::None => "[ ]",
        HeaderCheck::Some => "[-]",
        HeaderCheck::All => "[x]",
    }
}

/// Resolves column widths for `cols` terminal columns.
///
/// Every column gets its declared width except the last, which takes the
/// remaining space (but never less than its declared width).
fn column_widths(columns: &[ColumnHeader], cols: usize) -> Vec<usize> {
    let mut widths: Vec<usize> = columns.iter().map(|c| c.width).collect();
    if let Some(last) = widths.pop() {
        let used: usize = widths.iter().map(|w| w + 1).sum::<usize>() + CHECK_WIDTH;
        widths.push(cols.saturating_sub(used).max(last));
    }
    widths
}

fn join_cells<'a>(cells: impl Iterator<Item = &'a str>, widths: &[usize], cols: usize) -> String {
    let line: Vec<String> = cells.zip(widths).map(|(cell, w)| fit(cell, *w)).collect();
    fit(&line.join(" "), cols.saturating_sub(CHECK_WIDTH))
}

/// Renders the column header row with the header checkbox.
///
/// # Parameters
///
/// * `row` - Row position to render the headers (1-indexed)
/// * `table` - Table view for the current page
/// * `theme` - Active color theme
/// * `cols` - Terminal width in columns
///
/// # Returns
///
/// The next available row position (row + 1)
///
/// # Example
///
/// ```text
/// [-] NAME                 EMAIL                     ROLE     STATUS
/// ```
pub fn render_table_headers(row: usize, table: &TableView, theme: &Theme, cols: usize) -> usize {
    let widths = column_widths(&table.columns, cols);

    position_cursor(row, 1);
    print!("{}", Theme::bold());
    let check_color = if table.header_check == HeaderCheck::None {
        &theme.colors.header_fg
    } else {
        &theme.colors.checkbox_fg
    };
    print!("{}", Theme::fg(check_color));
    print!("{} ", checkbox(table.header_check));
    print!("{}", Theme::fg(&theme.colors.header_fg));
    let titles: Vec<String> = table.columns.iter().map(|c| c.title.to_uppercase()).collect();
    print!("{}", join_cells(titles.iter().map(String::as_str), &widths, cols));
    print!("{}", Theme::reset());
    row + 1
}

/// Renders all table rows starting at the specified row.
///
/// # Returns
///
/// The next available row position (row + number of rows)
pub fn render_table_rows(row: usize, table: &TableView, theme: &Theme, cols: usize) -> usize {
    let widths = column_widths(&table.columns, cols);
    let mut current_row = row;
    for item in &table.rows {
        current_row = render_table_row(current_row, item, &widths, theme, cols);
    }
    current_row
}

/// Renders a single row.
///
/// # Styling Precedence
///
/// 1. Cursor background (if `is_cursor`)
/// 2. Checked checkbox color
/// 3. Normal text color
///
/// The row is padded to the full terminal width so the cursor background
/// spans the whole line.
fn render_table_row(
    row: usize,
    item: &RowView,
    widths: &[usize],
    theme: &Theme,
    cols: usize,
) -> usize {
    position_cursor(row, 1);

    if item.is_cursor {
        print!("{}", Theme::fg(&theme.colors.selection_fg));
        print!("{}", Theme::bg(&theme.colors.selection_bg));
    } else if item.is_checked {
        print!("{}", Theme::fg(&theme.colors.checkbox_fg));
    } else {
        print!("{}", Theme::fg(&theme.colors.text_dim));
    }
    let check = if item.is_checked {
        HeaderCheck::All
    } else {
        HeaderCheck::None
    };
    print!("{} ", checkbox(check));

    if !item.is_cursor {
        print!("{}", Theme::fg(&theme.colors.text_normal));
    }
    print!("{}", join_cells(item.cells.iter().map(String::as_str), widths, cols));
    print!("{}", Theme::reset());
    row + 1
}

/// Renders the pager line: page position, page size and counts.
///
/// ```text
///  Page 2 of 3  ·  5 per page  ·  12 of 12 rows  ·  2 selected
/// ```
pub fn render_pager(row: usize, pager: &PagerInfo, theme: &Theme, cols: usize) -> usize {
    let mut text = format!(
        " Page {} of {}  ·  {} per page  ·  {} of {} rows",
        pager.page, pager.total_pages, pager.page_size, pager.filtered, pager.total
    );
    if pager.selected > 0 {
        text.push_str(&format!("  ·  {} selected", pager.selected));
    }

    position_cursor(row, 1);
    print!("{}", Theme::fg(&theme.colors.text_dim));
    print!("{}", fit(&text, cols));
    print!("{}", Theme::reset());
    row + 1
}

#[cfg(test)]
mod tests {
    use super::*;

    fn column(width: usize) -> ColumnHeader {
        ColumnHeader {
            title: "x".into(),
            width,
        }
    }

    #[test]
    fn last_column_takes_remaining_width() {
        let widths = column_widths(&[column(10), column(8)], 40);
        assert_eq!(widths, vec![10, 25]);
    }

    #[test]
    fn last_column_keeps_declared_width_when_narrow() {
        let widths = column_widths(&[column(10), column(8)], 12);
        assert_eq!(widths, vec![10, 8]);
    }
}
