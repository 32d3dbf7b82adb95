//! Shared rendering utilities and helpers.
//!
//! This module provides low-level rendering utilities used across multiple UI
//! components: cursor positioning and width-aware text fitting.
//!
//! All widths are counted in characters, not bytes, so names such as
//! "Zoë Müller" line up with ASCII cells.
//!
//! # Example
//!
//! ```rust
//! use zadmin::ui::helpers::{fit, truncate};
//!
//! assert_eq!(truncate("Enterprise", 6), "Enter…");
//! assert_eq!(fit("Free", 6), "Free  ");
//! ```

/// Positions the cursor at a specific row and column.
///
/// Uses ANSI escape sequence `\u{1b}[{row};{col}H` to move the cursor.
/// Coordinates are 1-indexed (row 1 = first row, col 1 = first column).
///
/// # Parameters
///
/// * `row` - Target row (1-indexed)
/// * `col` - Target column (1-indexed, typically 1 for start of line)
pub fn position_cursor(row: usize, col: usize) {
    print!("\u{1b}[{row};{col}H");
}

/// Number of terminal cells `text` occupies.
#[must_use]
pub fn width(text: &str) -> usize {
    text.chars().count()
}

/// Shortens `text` to at most `max` characters, ending in `…` when cut.
///
/// # Parameters
///
/// * `text` - The text to shorten
/// * `max` - Maximum width in characters
///
/// # Returns
///
/// `text` unchanged when it fits, otherwise its first `max - 1` characters
/// followed by `…`. A `max` of zero yields an empty string.
#[must_use]
pub fn truncate(text: &str, max: usize) -> String {
    if width(text) <= max {
        return text.to_string();
    }
    if max == 0 {
        return String::new();
    }
    let mut out: String = text.chars().take(max - 1).collect();
    out.push('…');
    out
}

/// Truncates or right-pads `text` to exactly `cols` characters.
#[must_use]
pub fn fit(text: &str, cols: usize) -> String {
    let text = truncate(text, cols);
    let padding = cols.saturating_sub(width(&text));
    format!("{text}{}", " ".repeat(padding))
}

/// Centers `text` in `cols` characters, truncating when it does not fit.
///
/// Odd leftover space goes to the right.
#[must_use]
pub fn center(text: &str, cols: usize) -> String {
    let text = truncate(text, cols);
    let left = cols.saturating_sub(width(&text)) / 2;
    fit(&format!("{}{text}", " ".repeat(left)), cols)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncate_counts_characters() {
        assert_eq!(truncate("Zoë Müller", 20), "Zoë Müller");
        assert_eq!(truncate("Zoë Müller", 4), "Zoë…");
        assert_eq!(truncate("abc", 0), "");
        assert_eq!(truncate("abc", 1), "…");
    }

    #[test]
    fn fit_pads_and_cuts_to_exact_width() {
        assert_eq!(fit("ab", 4), "ab  ");
        assert_eq!(width(&fit("Premium plan", 5)), 5);
    }

    #[test]
    fn center_splits_padding() {
        assert_eq!(center("ab", 5), " ab  ");
        assert_eq!(center("abcdef", 3), "ab…");
    }
}
