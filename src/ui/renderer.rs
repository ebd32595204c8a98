//! Top-level rendering entry point.

use crate::app::AppState;
use crate::ui::components;

/// Renders the plugin UI to stdout.
///
/// Computes the view model from `state` and lays it out for a `rows` x `cols`
/// pane. Does not clear the screen; Zellij hands each render a fresh pane.
pub fn render(state: &AppState, rows: usize, cols: usize) {
    let viewmodel = state.compute_viewmodel(rows, cols);
    components::render_layout(&viewmodel, &state.theme, cols, rows);
}
