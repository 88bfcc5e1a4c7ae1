//! Top-level rendering entry point.
//!
//! ```text
//! AppState → compute_viewmodel → UIViewModel → render_picker → ANSI output
//! ```

use crate::app::AppState;
use crate::ui::components;

/// Renders the plugin UI to stdout for a pane of `rows` × `cols` cells.
pub fn render(state: &AppState, rows: usize, cols: usize) {
    let _span = tracing::trace_span!("render", rows, cols).entered();

    let viewmodel = state.compute_viewmodel(rows, cols);
    components::render_picker(&viewmodel, &state.theme, cols, rows);
}
