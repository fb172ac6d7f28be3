//! Use-Case: Hit-Tests für Press und Hover.

use crate::app::RoiState;
use crate::core::{
    point_near_shape, HandleKey, Measurement, MeasurementId, ToleranceProfile, ViewTransform,
};
use glam::DVec2;

/// Erstes sichtbares Handle (Store-Reihenfolge) im Fangradius um `image_pos`.
///
/// Liefert Messung, Handle und dessen aktuelle Position.
pub fn pick_handle(
    state: &RoiState,
    image_pos: DVec2,
    profile: ToleranceProfile,
) -> Option<(MeasurementId, HandleKey, DVec2)> {
    let radius = state.options.handle_radius(profile);
    state
        .store
        .iter()
        .filter(|m| m.visible)
        .find_map(|m| {
            m.handles
                .nearest_within(image_pos, radius)
                .map(|key| (m.id, key, m.handles.get(key).position))
        })
}

/// Prüft den Toleranz-Hit-Test einer Messung in Anzeige-Koordinaten.
///
/// Unsichtbare Messungen sind nie "nahe".
pub fn is_near_shape(
    measurement: &Measurement,
    view: &ViewTransform,
    display_pos: DVec2,
    tolerance_px: f64,
) -> bool {
    if !measurement.visible {
        return false;
    }
    let points = measurement
        .handles
        .control_points()
        .map(|p| view.image_to_display(p));
    point_near_shape(&points, display_pos, tolerance_px)
}

/// Erste sichtbare Messung, deren Form nahe `display_pos` liegt.
pub fn pick_shape(
    state: &RoiState,
    display_pos: DVec2,
    profile: ToleranceProfile,
) -> Option<MeasurementId> {
    let tolerance = state.options.tolerance_px(profile);
    state
        .store
        .iter()
        .find(|m| is_near_shape(m, &state.view, display_pos, tolerance))
        .map(|m| m.id)
}
