use crate::{Flow, EXTENT};
use approx::assert_abs_diff_eq;
use ellipse_roi::core::AreaUnit;
use ellipse_roi::{PointerPoints, RoiCommand, RoiIntent, ToolMode, TOOL_TYPE};
use glam::DVec2;
use std::f64::consts::PI;

#[test]
fn test_press_drag_release_creates_finished_measurement() {
    let mut flow = Flow::new();

    let id = flow.draw(DVec2::new(20.0, 20.0), DVec2::new(40.0, 30.0));

    let m = flow.state.store.get(id).expect("Messung sollte existieren");
    assert_eq!(m.handles.start.position, DVec2::new(20.0, 20.0));
    assert_eq!(m.handles.end.position, DVec2::new(40.0, 30.0));
    assert_eq!(m.handles.perpendicular.position, DVec2::new(30.0, 25.0));
    assert!(!m.handles.perpendicular_is_first);
    assert!(!m.invalidated);

    let stats = m.stats.mean_std_dev.expect("Graustufenbild liefert Mittelwert");
    assert_eq!(stats.count, 200);
    assert_abs_diff_eq!(stats.mean, 29.5, epsilon = 1e-9);
    assert_abs_diff_eq!(m.stats.area.unwrap(), PI * 10.0 * 5.0, epsilon = 1e-9);
    assert_eq!(m.stats.unit, Some(AreaUnit::SquarePixels));

    assert!(flow.state.session.is_none());
    assert!(!flow.state.hover_gate.is_suspended());
}

#[test]
fn test_notifications_follow_drag_and_release() {
    let mut flow = Flow::new();

    let id = flow.draw(DVec2::new(20.0, 20.0), DVec2::new(40.0, 30.0));

    let notifications = flow.state.take_notifications();
    let (last, steps) = notifications
        .split_last()
        .expect("Benachrichtigungen erwartet");
    assert_eq!(steps.len(), 1);
    assert!(!steps[0].is_completed());
    assert!(last.is_completed());

    let event = last.event();
    assert_eq!(event.context, "flow");
    assert_eq!(event.tool_type, TOOL_TYPE);
    assert_eq!(event.measurement.id, id);
    assert!(event.measurement.stats.mean_std_dev.is_some());
}

#[test]
fn test_create_released_outside_image_is_removed() {
    let mut flow = Flow::new();
    flow.press(5.0, 5.0);
    flow.drag(-4.0, 12.0);
    flow.take_all();

    flow.release(-4.0, 12.0);

    assert!(flow.state.store.is_empty());
    assert!(flow.state.take_notifications().is_empty());
    assert!(flow.state.take_redraw_request());
    assert!(!flow.state.hover_gate.is_suspended());
}

#[test]
fn test_click_ends_session_like_release() {
    let mut flow = Flow::new();
    flow.press(20.0, 20.0);
    flow.drag(40.0, 30.0);

    let event = flow.event(40.0, 30.0);
    flow.send(RoiIntent::PointerClicked { event });

    assert!(flow.state.session.is_none());
    assert_eq!(
        flow.state.command_log.entries().last(),
        Some(&RoiCommand::EndDrag)
    );
    assert_eq!(flow.state.store.len(), 1);
}

#[test]
fn test_disabled_button_does_not_create() {
    let mut flow = Flow::new();
    let event = flow.event(20.0, 20.0).with_button(3);

    flow.send(RoiIntent::PointerPressed { event });

    assert!(flow.state.store.is_empty());
    assert!(flow.state.command_log.is_empty());
}

#[test]
fn test_passive_mode_only_edits_existing() {
    let mut flow = Flow::new();
    let id = flow.draw(DVec2::new(20.0, 20.0), DVec2::new(40.0, 30.0));
    flow.send(RoiIntent::ToolModeChanged {
        mode: ToolMode::Passive,
    });

    flow.press(80.0, 80.0);
    assert!(flow.state.session.is_none());
    assert_eq!(flow.state.store.len(), 1);

    flow.press(40.0, 30.0);
    assert_eq!(flow.state.session_measurement(), Some(id));
}

#[test]
fn test_disabling_tool_ends_running_session() {
    let mut flow = Flow::new();
    flow.press(20.0, 20.0);
    flow.drag(40.0, 30.0);

    flow.send(RoiIntent::ToolModeChanged {
        mode: ToolMode::Disabled,
    });

    assert!(flow.state.session.is_none());
    assert_eq!(flow.state.store.len(), 1);

    flow.press(60.0, 60.0);
    assert!(flow.state.session.is_none());
    assert_eq!(flow.state.store.len(), 1);
}

#[test]
fn test_zoomed_view_creates_in_image_coordinates() {
    let mut flow = Flow::new();
    flow.send(RoiIntent::ViewChanged {
        view: ellipse_roi::ViewTransform::new(DVec2::new(10.0, 10.0), 2.0),
    });

    let points = PointerPoints::from_image(DVec2::new(30.0, 30.0), &flow.state.view);
    assert_eq!(points.display, DVec2::new(40.0, 40.0));

    let id = flow.draw(DVec2::new(30.0, 30.0), DVec2::new(50.0, 40.0));
    let m = flow.state.store.get(id).unwrap();
    assert_eq!(m.handles.start.position, DVec2::new(30.0, 30.0));
    assert!(EXTENT.contains(m.handles.end.position));
}
