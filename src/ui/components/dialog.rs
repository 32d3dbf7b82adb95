//! Dialog and details overlay renderers.
//!
//! Both overlays are framed boxes drawn over the table body, horizontally
//! centered. The dialog shows the pending action's form; the details overlay
//! shows a record's read-only projection.

use crate::ui::helpers::{fit, position_cursor};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{DetailsView, DialogView};

/// Maximum overlay width, borders included.
const MAX_WIDTH: usize = 64;

/// Width of the label column inside dialogs and details.
const LABEL_WIDTH: usize = 18;

/// One line inside an overlay box.
struct BoxLine<'a> {
    text: String,
    color: &'a str,
    bold: bool,
}

impl<'a> BoxLine<'a> {
    fn new(text: impl Into<String>, color: &'a str) -> Self {
        Self {
            text: text.into(),
            color,
            bold: false,
        }
    }

    fn bold(mut self) -> Self {
        self.bold = true;
        self
    }
}

/// Draws a framed box of `lines` starting at `row`.
///
/// Returns the row after the bottom border.
fn render_box(row: usize, lines: &[BoxLine<'_>], theme: &Theme, cols: usize) -> usize {
    let box_width = cols.saturating_sub(4).min(MAX_WIDTH);
    let inner = box_width.saturating_sub(4);
    let left = cols.saturating_sub(box_width) / 2 + 1;
    let border = &theme.colors.dialog_border;

    position_cursor(row, left);
    print!("{}", Theme::fg(border));
    print!("╭{}╮", "─".repeat(box_width.saturating_sub(2)));
    print!("{}", Theme::reset());

    let mut current = row + 1;
    for line in lines {
        position_cursor(current, left);
        print!("{}│ ", Theme::fg(border));
        if line.bold {
            print!("{}", Theme::bold());
        }
        print!("{}", Theme::fg(line.color));
        print!("{}", fit(&line.text, inner));
        print!("{}", Theme::reset());
        print!("{} │", Theme::fg(border));
        print!("{}", Theme::reset());
        current += 1;
    }

    position_cursor(current, left);
    print!("{}", Theme::fg(border));
    print!("╰{}╯", "─".repeat(box_width.saturating_sub(2)));
    print!("{}", Theme::reset());
    current + 1
}

/// Renders the open dialog.
///
/// # Layout
///
/// ```text
/// ╭──────────────────────────────────────╮
/// │ Delete Jane Smith                    │
/// │ This user will be removed            │
/// │                                      │
/// │ › Reason             duplicate_      │
/// │                                      │
/// │ Reason is required                   │
/// │ Enter: confirm  Esc: cancel          │
/// ╰──────────────────────────────────────╯
/// ```
///
/// The focused field is marked with `›` and a `_` cursor; choice fields show
/// their value between angle brackets.
pub fn render_dialog(row: usize, dialog: &DialogView, theme: &Theme, cols: usize) -> usize {
    let colors = &theme.colors;
    let mut lines = vec![BoxLine::new(dialog.title.clone(), &colors.header_fg).bold()];
    if let Some(message) = &dialog.message {
        lines.push(BoxLine::new(message.clone(), &colors.text_dim));
    }

    if !dialog.fields.is_empty() {
        lines.push(BoxLine::new("", &colors.text_normal));
    }
    for field in &dialog.fields {
        let marker = if field.is_focused { "›" } else { " " };
        let value = match (field.is_choice, field.is_focused) {
            (true, _) => format!("< {} >", field.value),
            (false, true) => format!("{}_", field.value),
            (false, false) => field.value.clone(),
        };
        let color = if field.is_focused {
            &colors.text_normal
        } else {
            &colors.text_dim
        };
        lines.push(BoxLine::new(
            format!("{marker} {} {value}", fit(&field.label, LABEL_WIDTH)),
            color,
        ));
    }

    lines.push(BoxLine::new("", &colors.text_normal));
    if let Some(error) = &dialog.error {
        lines.push(BoxLine::new(error.clone(), &colors.error_fg));
    }
    let hint = if dialog.fields.len() > 1 {
        "Tab: next field  Enter: confirm  Esc: cancel"
    } else {
        "Enter: confirm  Esc: cancel"
    };
    lines.push(BoxLine::new(hint, &colors.text_dim));

    render_box(row, &lines, theme, cols)
}

/// Renders a record's details overlay.
pub fn render_details(row: usize, details: &DetailsView, theme: &Theme, cols: usize) -> usize {
    let colors = &theme.colors;
    let mut lines = vec![
        BoxLine::new(details.title.clone(), &colors.header_fg).bold(),
        BoxLine::new("", &colors.text_normal),
    ];
    lines.extend(details.rows.iter().map(|(label, value)| {
        BoxLine::new(
            format!("{} {value}", fit(label, LABEL_WIDTH)),
            &colors.text_normal,
        )
    }));
    lines.push(BoxLine::new("", &colors.text_normal));
    lines.push(BoxLine::new("Press any key to close", &colors.text_dim));

    render_box(row, &lines, theme, cols)
}
