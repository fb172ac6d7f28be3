use crate::{Flow, EXTENT};
use ellipse_roi::{PointerEvent, PointerPoints, RoiCommand, RoiIntent};
use glam::DVec2;

fn flow_with_shape() -> (Flow, ellipse_roi::MeasurementId) {
    let mut flow = Flow::new();
    let id = flow.draw(DVec2::new(20.0, 20.0), DVec2::new(60.0, 40.0));
    flow.take_all();
    (flow, id)
}

#[test]
fn test_hover_follows_shape_proximity() {
    let (mut flow, id) = flow_with_shape();

    flow.hover(90.0, 90.0);
    assert!(!flow.state.store.get(id).unwrap().active);
    assert!(flow.state.take_redraw_request());

    flow.hover(91.0, 90.0);
    assert!(!flow.state.take_redraw_request());

    flow.hover(50.0, 30.0);
    assert!(flow.state.store.get(id).unwrap().active);
    assert!(flow.state.take_redraw_request());
    assert!(flow.state.take_notifications().is_empty());
}

#[test]
fn test_hover_activates_nearest_handle() {
    let (mut flow, id) = flow_with_shape();

    flow.hover(61.0, 41.0);

    let m = flow.state.store.get(id).unwrap();
    assert!(m.handles.end.active);
    assert!(!m.handles.start.active);
    assert!(!m.handles.perpendicular.active);
}

#[test]
fn test_touch_hover_uses_larger_capture_radius() {
    let (mut flow, id) = flow_with_shape();

    flow.hover(69.0, 40.0);
    assert!(!flow.state.store.get(id).unwrap().handles.end.active);

    let event = PointerEvent::touch(
        PointerPoints::from_image(DVec2::new(69.0, 40.0), &flow.state.view),
        EXTENT,
    );
    flow.send(RoiIntent::PointerMoved { event });
    assert!(flow.state.store.get(id).unwrap().handles.end.active);
}

#[test]
fn test_hover_is_suspended_while_session_runs() {
    let (mut flow, _) = flow_with_shape();

    flow.press(80.0, 80.0);
    assert!(flow.state.hover_gate.is_suspended());

    flow.hover(85.0, 85.0);
    assert!(matches!(
        flow.state.command_log.entries().last(),
        Some(RoiCommand::CreateMeasurement { .. })
    ));

    flow.drag(90.0, 90.0);
    flow.release(90.0, 90.0);
    assert!(!flow.state.hover_gate.is_suspended());

    flow.hover(10.0, 90.0);
    assert!(matches!(
        flow.state.command_log.entries().last(),
        Some(RoiCommand::UpdateHover { .. })
    ));
}

#[test]
fn test_hidden_measurement_is_never_picked() {
    let (mut flow, id) = flow_with_shape();
    flow.state.store.get_mut(id).unwrap().visible = false;

    flow.hover(50.0, 30.0);
    assert!(!flow.state.store.get(id).unwrap().active);

    flow.press(60.0, 40.0);
    let session = flow.state.session_measurement();
    assert!(session.is_some());
    assert_ne!(session, Some(id));
}
