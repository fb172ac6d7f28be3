//! Use-Case: Session beenden (Release oder Klick).

use super::statistics;
use crate::app::session::DragKind;
use crate::app::{RoiState, SessionOutcome};

/// Beendet die laufende Session.
///
/// Liegt danach ein Handle außerhalb des Bildes, wird die Messung je nach
/// Session-Art entfernt. Sonst folgen Statistik und `MeasurementCompleted`.
pub fn end_drag(state: &mut RoiState) {
    let Some(session) = state.session.take() else {
        return;
    };
    let id = session.measurement_id;
    let kind = session.kind;
    let extent = session.extent;
    drop(session);

    let Some(measurement) = state.store.get_mut(id) else {
        log::warn!("Session beendet, Messung {} existiert nicht mehr", id);
        state
            .command_log
            .record_session(id, kind.label(), SessionOutcome::Missing);
        state.request_redraw();
        return;
    };

    let outside = extent.any_handle_outside(&measurement.handles);
    let remove = match kind {
        DragKind::Create => {
            measurement.handles.end.active = false;
            if !outside {
                measurement.handles.perpendicular.position = measurement.center();
                measurement.handles.perpendicular_is_first = false;
            }
            outside
        }
        DragKind::Handle { key, .. } => {
            measurement.handles.get_mut(key).active = false;
            outside
        }
        DragKind::Shape {
            delete_if_outside, ..
        } => delete_if_outside && outside,
    };
    measurement.invalidate();

    if remove {
        state.store.remove(id);
        log::debug!(
            "Messung {} nach {}-Session außerhalb des Bildes, entfernt",
            id,
            kind.label()
        );
        state
            .command_log
            .record_session(id, kind.label(), SessionOutcome::Removed);
    } else {
        statistics::compute_for(state, id);
        state.notify_completed(id);
        log::debug!("Messung {} abgeschlossen ({})", id, kind.label());
        state
            .command_log
            .record_session(id, kind.label(), SessionOutcome::Completed);
    }
    state.request_redraw();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::use_cases::{create, drag};
    use crate::app::ImageContext;
    use crate::core::{HandleKey, ImageExtent, ImageMeta, PixelSource, SamplingWindow};
    use glam::DVec2;
    use std::sync::Arc;

    struct Ramp;

    impl PixelSource for Ramp {
        fn samples(&self, window: SamplingWindow) -> Vec<f64> {
            window.coordinates().map(|(x, _)| x as f64).collect()
        }
    }

    const EXTENT: ImageExtent = ImageExtent {
        rows: 40,
        columns: 40,
    };

    fn state() -> RoiState {
        let mut state = RoiState::new("viewport-1");
        state.set_image(ImageContext::new(
            "rampe",
            EXTENT,
            ImageMeta::default(),
            Arc::new(Ramp),
        ));
        state
    }

    #[test]
    fn test_create_session_collapses_perpendicular_onto_center() {
        let mut state = state();
        let id = create::create_measurement(&mut state, DVec2::new(10.0, 10.0), EXTENT);
        drag::update_drag(&mut state, DVec2::new(20.0, 14.0));
        state.take_notifications();

        end_drag(&mut state);

        let m = state.store.get(id).expect("Messung bleibt erhalten");
        assert_eq!(m.handles.perpendicular.position, DVec2::new(15.0, 12.0));
        assert!(!m.handles.perpendicular_is_first);
        assert!(!m.handles.end.active);
        assert!(!m.invalidated);
        assert_eq!(m.stats.mean_std_dev.map(|s| s.count), Some(40));
        assert!(state.session.is_none());
        assert!(!state.hover_gate.is_suspended());

        let notifications = state.take_notifications();
        assert_eq!(notifications.len(), 1);
        assert!(notifications[0].is_completed());
        assert_eq!(notifications[0].event().context, "viewport-1");
        assert_eq!(
            state.command_log.last_outcome(id),
            Some(SessionOutcome::Completed)
        );
    }

    #[test]
    fn test_create_outside_image_removes_measurement() {
        let mut state = state();
        let id = create::create_measurement(&mut state, DVec2::new(5.0, 5.0), EXTENT);
        drag::update_drag(&mut state, DVec2::new(-3.0, 8.0));
        state.take_notifications();

        end_drag(&mut state);

        assert!(!state.store.contains(id));
        assert_eq!(
            state.command_log.sessions().last().map(|r| (r.kind, r.outcome)),
            Some(("create", SessionOutcome::Removed))
        );
        assert!(state.take_notifications().is_empty());
        assert!(state.take_redraw_request());
        assert!(!state.hover_gate.is_suspended());
    }

    #[test]
    fn test_shape_drag_outside_respects_delete_option() {
        let mut state = state();
        let id = create::create_measurement(&mut state, DVec2::new(2.0, 2.0), EXTENT);
        drag::update_drag(&mut state, DVec2::new(8.0, 8.0));
        end_drag(&mut state);

        state.options.delete_if_handle_outside_image = false;
        drag::begin_shape_drag(&mut state, id, DVec2::new(5.0, 5.0), EXTENT);
        drag::update_drag(&mut state, DVec2::new(0.0, 5.0));
        end_drag(&mut state);

        let m = state.store.get(id).expect("Löschen ist abgeschaltet");
        assert_eq!(m.handles.start.position, DVec2::new(-3.0, 2.0));
    }

    #[test]
    fn test_handle_session_deactivates_handle() {
        let mut state = state();
        let id = create::create_measurement(&mut state, DVec2::new(2.0, 2.0), EXTENT);
        drag::update_drag(&mut state, DVec2::new(8.0, 8.0));
        end_drag(&mut state);

        drag::begin_handle_drag(&mut state, id, HandleKey::Start, DVec2::ZERO, EXTENT);
        assert!(state.store.get(id).unwrap().handles.start.active);
        end_drag(&mut state);

        assert!(!state.store.get(id).unwrap().handles.start.active);
    }

    #[test]
    fn test_end_without_session_is_noop() {
        let mut state = state();
        state.take_redraw_request();
        end_drag(&mut state);
        assert!(!state.take_redraw_request());
        assert!(state.take_notifications().is_empty());
        assert!(state.command_log.sessions().is_empty());
    }

    #[test]
    fn test_session_on_removed_measurement_is_logged_as_missing() {
        let mut state = state();
        let id = create::create_measurement(&mut state, DVec2::new(2.0, 2.0), EXTENT);
        state.store.remove(id);

        end_drag(&mut state);

        assert_eq!(
            state.command_log.last_outcome(id),
            Some(SessionOutcome::Missing)
        );
        assert!(state.take_notifications().iter().all(|n| !n.is_completed()));
    }
}
