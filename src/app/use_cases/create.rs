//! Use-Case: Neue Messung aufziehen.

use crate::app::session::{DragKind, DragSession};
use crate::app::RoiState;
use crate::core::{ImageExtent, Measurement, MeasurementId};
use glam::DVec2;

/// Legt eine Messung am Press-Punkt an und startet die Create-Session.
pub fn create_measurement(
    state: &mut RoiState,
    origin: DVec2,
    extent: ImageExtent,
) -> MeasurementId {
    if let Some(previous) = state.session.take() {
        log::warn!(
            "Neue Messung während laufender Session für {}; Session verworfen",
            previous.measurement_id
        );
    }

    let id = state.store.create(origin);
    state.session = Some(DragSession::start(
        id,
        DragKind::Create,
        extent,
        &state.hover_gate,
    ));
    state.request_redraw();

    log::debug!(
        "Messung {} erstellt bei ({:.1}, {:.1})",
        id,
        origin.x,
        origin.y
    );
    id
}

/// Create-Drag: `end` folgt dem Zeiger.
pub fn move_new_handle(measurement: &mut Measurement, image_pos: DVec2) -> bool {
    if measurement.handles.end.position == image_pos {
        return false;
    }
    measurement.handles.end.position = image_pos;
    measurement.invalidate();
    true
}
