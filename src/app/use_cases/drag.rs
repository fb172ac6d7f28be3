//! Use-Case: Handle- und Form-Sessions starten und fortsetzen.

use super::{create, move_all, move_handle};
use crate::app::session::{DragKind, DragSession};
use crate::app::RoiState;
use crate::core::{HandleKey, ImageExtent, MeasurementId};
use glam::DVec2;

/// Startet eine Session für ein einzelnes Handle.
pub fn begin_handle_drag(
    state: &mut RoiState,
    id: MeasurementId,
    key: HandleKey,
    grab_offset: DVec2,
    extent: ImageExtent,
) {
    let Some(measurement) = state.store.get_mut(id) else {
        log::warn!("Handle-Drag für unbekannte Messung {}", id);
        return;
    };
    measurement.active = true;
    measurement.handles.get_mut(key).active = true;

    let kind = DragKind::Handle {
        key,
        grab_offset,
        clip: state.options.clip_handle_drag_to_image,
    };
    state.session = Some(DragSession::start(id, kind, extent, &state.hover_gate));
    state.request_redraw();
}

/// Startet eine Session für die ganze Form; nur diese Messung bleibt aktiv.
pub fn begin_shape_drag(
    state: &mut RoiState,
    id: MeasurementId,
    image_pos: DVec2,
    extent: ImageExtent,
) {
    if !state.store.contains(id) {
        log::warn!("Form-Drag für unbekannte Messung {}", id);
        return;
    }
    for measurement in state.store.iter_mut() {
        measurement.active = measurement.id == id;
    }

    let kind = DragKind::Shape {
        last_pointer: image_pos,
        clip: state.options.clip_shape_drag_to_image,
        delete_if_outside: state.options.delete_if_handle_outside_image,
    };
    state.session = Some(DragSession::start(id, kind, extent, &state.hover_gate));
    state.request_redraw();
}

/// Ein Zeiger-Schritt der laufenden Session.
///
/// Geometrie ändert sich, die Statistik nicht: sie folgt erst beim Release.
pub fn update_drag(state: &mut RoiState, image_pos: DVec2) {
    let Some(session) = state.session.as_mut() else {
        return;
    };
    let id = session.measurement_id;
    let extent = session.extent;

    let Some(measurement) = state.store.get_mut(id) else {
        log::warn!("Messung {} während der Session verschwunden", id);
        state.session = None;
        return;
    };

    let changed = match &mut session.kind {
        DragKind::Create => create::move_new_handle(measurement, image_pos),
        DragKind::Handle {
            key,
            grab_offset,
            clip,
        } => move_handle::apply_handle_drag(
            measurement,
            *key,
            image_pos,
            *grab_offset,
            clip.then_some(extent),
        ),
        DragKind::Shape {
            last_pointer,
            clip,
            ..
        } => {
            let delta = image_pos - *last_pointer;
            *last_pointer = image_pos;
            move_all::move_all_handles(measurement, delta, clip.then_some(extent))
        }
    };

    if changed {
        log::trace!(
            "Messung {}: Drag-Schritt bei ({:.2}, {:.2})",
            id,
            image_pos.x,
            image_pos.y
        );
        state.request_redraw();
        state.notify_modified(id);
    }
}
