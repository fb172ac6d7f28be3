//! Use-Case: Passiver Hover-Durchlauf.

use super::pick::is_near_shape;
use crate::app::RoiState;
use crate::core::{HandleKey, Handles, ToleranceProfile};
use glam::DVec2;

/// Aktiviert genau das nächste Handle im Fangradius, alle anderen werden inaktiv.
///
/// Gibt `true` zurück, wenn sich ein Flag geändert hat.
pub fn activate_nearest_handle(handles: &mut Handles, image_pos: DVec2, radius: f64) -> bool {
    let nearest = handles.nearest_within(image_pos, radius);
    let mut changed = false;
    for key in HandleKey::ALL {
        let handle = handles.get_mut(key);
        let active = nearest == Some(key);
        if handle.active != active {
            handle.active = active;
            changed = true;
        }
    }
    changed
}

/// Aktualisiert Handle- und Form-Aktivierung aller sichtbaren Messungen.
///
/// Jede Änderung fordert nur ein Neuzeichnen an.
pub fn update_hover(
    state: &mut RoiState,
    image_pos: DVec2,
    display_pos: DVec2,
    profile: ToleranceProfile,
) -> bool {
    let radius = state.options.handle_radius(profile);
    let tolerance = state.options.tolerance_px(profile);
    let view = state.view;
    let mut changed = false;

    for measurement in state.store.iter_mut() {
        if measurement.visible {
            changed |= activate_nearest_handle(&mut measurement.handles, image_pos, radius);
        }

        let near = is_near_shape(measurement, &view, display_pos, tolerance);
        if near != measurement.active {
            measurement.active = near;
            changed = true;
        }
    }

    if changed {
        log::trace!("Hover geändert bei ({:.1}, {:.1})", image_pos.x, image_pos.y);
        state.request_redraw();
    }
    changed
}
