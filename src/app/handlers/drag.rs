//! Handler für Hover, Erstellen und Drag-Sessions.

use crate::app::use_cases;
use crate::app::RoiState;
use crate::core::{HandleKey, ImageExtent, MeasurementId, ToleranceProfile};
use glam::DVec2;

/// Passiver Hover-Durchlauf.
pub fn hover(
    state: &mut RoiState,
    image_pos: DVec2,
    display_pos: DVec2,
    profile: ToleranceProfile,
) {
    use_cases::hover::update_hover(state, image_pos, display_pos, profile);
}

/// Legt eine neue Messung an und startet die Create-Session.
pub fn create(state: &mut RoiState, origin: DVec2, extent: ImageExtent) {
    use_cases::create::create_measurement(state, origin, extent);
}

/// Startet eine Handle-Session.
pub fn begin_handle(
    state: &mut RoiState,
    id: MeasurementId,
    key: HandleKey,
    grab_offset: DVec2,
    extent: ImageExtent,
) {
    use_cases::drag::begin_handle_drag(state, id, key, grab_offset, extent);
}

/// Startet eine Form-Session.
pub fn begin_shape(state: &mut RoiState, id: MeasurementId, image_pos: DVec2, extent: ImageExtent) {
    use_cases::drag::begin_shape_drag(state, id, image_pos, extent);
}

/// Setzt die laufende Session fort.
pub fn update(state: &mut RoiState, image_pos: DVec2) {
    use_cases::drag::update_drag(state, image_pos);
}

/// Beendet die laufende Session.
pub fn end(state: &mut RoiState) {
    use_cases::finish::end_drag(state);
}
