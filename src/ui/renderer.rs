//! Top-level rendering coordinator.
//!
//! This module provides the main rendering entry point, coordinating view model
//! computation and delegation to UI components.
//!
//! # Architecture
//!
//! The renderer follows a two-step process:
//!
//! 1. **View Model Computation**: Transform `AppState` into `UIViewModel`
//! 2. **Component Rendering**: Delegate to specialized component renderers

use crate::app::AppState;
use crate::ui::components;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::UIViewModel;

/// Renders the plugin UI to stdout.
///
/// Computes the view model from application state and draws one frame.
///
/// # Parameters
///
/// * `state` - Current application state
/// * `rows` - Terminal height in rows
/// * `cols` - Terminal width in columns
///
/// # Output
///
/// Prints ANSI-styled output to stdout using `print!`. Every row of the pane
/// is written, so no screen clear is needed between frames.
pub fn render(state: &AppState, rows: usize, cols: usize) {
    let viewmodel = state.compute_viewmodel(rows, cols);

    render_viewmodel(&viewmodel, &state.theme, rows, cols);
}

/// Renders a view model.
///
/// # Parameters
///
/// * `vm` - Pre-computed view model
/// * `theme` - Active color theme
/// * `rows` - Terminal height in rows
/// * `cols` - Terminal width in columns
fn render_viewmodel(vm: &UIViewModel, theme: &Theme, rows: usize, cols: usize) {
    if rows == 0 || cols == 0 {
        return;
    }
    components::render_page(vm, theme, cols, rows);
}
