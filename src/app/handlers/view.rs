//! Handler für Rendern, View, Betriebsart und Optionen.

use crate::app::use_cases;
use crate::app::{RoiState, ToolMode};
use crate::core::ViewTransform;
use crate::shared::RoiOptions;

/// Statistik nach dem Zeichnen auffrischen.
pub fn refresh_statistics(state: &mut RoiState) {
    use_cases::statistics::refresh_statistics(state);
}

/// Wechselt die Betriebsart; eine laufende Session endet beim Deaktivieren.
pub fn set_tool_mode(state: &mut RoiState, mode: ToolMode) {
    if state.tool_mode == mode {
        return;
    }
    log::info!("Betriebsart: {:?} -> {:?}", state.tool_mode, mode);
    state.tool_mode = mode;
    if mode == ToolMode::Disabled && state.session.is_some() {
        use_cases::finish::end_drag(state);
    }
    state.request_redraw();
}

/// Übernimmt eine neue View-Transformation.
pub fn set_view(state: &mut RoiState, view: ViewTransform) {
    state.view = view;
    state.request_redraw();
}

/// Übernimmt neue Optionen ab dem nächsten Event.
pub fn apply_options(state: &mut RoiState, options: RoiOptions) {
    let footprint_changed = state.options.sampling_footprint != options.sampling_footprint;
    state.options = options;
    if footprint_changed {
        log::info!(
            "Sampling-Footprint geändert: {:?}",
            state.options.sampling_footprint
        );
        state.store.invalidate_all();
    }
    state.request_redraw();
}
