use crate::Flow;
use approx::assert_abs_diff_eq;
use ellipse_roi::{HandleKey, RoiCommand, RoiIntent};
use glam::DVec2;

#[test]
fn test_perpendicular_then_endpoint_keeps_minor_radius() {
    let mut flow = Flow::new();
    let id = flow.draw(DVec2::new(20.0, 50.0), DVec2::new(60.0, 50.0));

    flow.press(40.0, 50.0);
    assert!(matches!(
        flow.state.command_log.entries().last(),
        Some(RoiCommand::BeginHandleDrag {
            key: HandleKey::Perpendicular,
            ..
        })
    ));
    flow.drag(40.0, 62.0);
    flow.release(40.0, 62.0);

    let m = flow.state.store.get(id).unwrap();
    assert_eq!(m.handles.perpendicular.position, DVec2::new(40.0, 62.0));
    assert_abs_diff_eq!(m.shortest_distance, 12.0, epsilon = 1e-9);

    flow.press(60.0, 50.0);
    flow.drag(60.0, 80.0);
    flow.release(60.0, 80.0);

    let m = flow.state.store.get(id).unwrap();
    assert_eq!(m.handles.end.position, DVec2::new(60.0, 80.0));
    let perp = m.handles.perpendicular.position;
    assert_abs_diff_eq!(perp.x, 32.8, epsilon = 1e-9);
    assert_abs_diff_eq!(perp.y, 74.6, epsilon = 1e-9);

    let ellipse = m.handles.control_points().ellipse();
    assert_abs_diff_eq!(ellipse.radii.y_radius, 12.0, epsilon = 1e-9);
    assert_abs_diff_eq!(ellipse.radii.x_radius, 25.0, epsilon = 1e-9);
}

#[test]
fn test_grab_offset_is_kept_during_drag() {
    let mut flow = Flow::new();
    let id = flow.draw(DVec2::new(10.0, 10.0), DVec2::new(30.0, 30.0));

    flow.press(32.0, 31.0);
    flow.drag(52.0, 41.0);

    let m = flow.state.store.get(id).unwrap();
    assert_eq!(m.handles.end.position, DVec2::new(50.0, 40.0));
    assert!(m.handles.end.active);
    assert!(m.invalidated);
}

#[test]
fn test_handle_drag_is_clamped_and_survives() {
    let mut flow = Flow::new();
    let id = flow.draw(DVec2::new(10.0, 10.0), DVec2::new(30.0, 30.0));

    flow.press(30.0, 30.0);
    flow.drag(-5.0, 120.0);
    flow.release(-5.0, 120.0);

    let m = flow.state.store.get(id).expect("Geklemmte Messung bleibt erhalten");
    assert_eq!(m.handles.end.position, DVec2::new(0.0, 100.0));
    assert_eq!(m.handles.perpendicular.position, DVec2::new(5.0, 55.0));
    assert!(!m.handles.end.active);
    assert!(!m.invalidated);
}

#[test]
fn test_handle_released_outside_without_clamping_is_removed() {
    let mut flow = Flow::new();
    let id = flow.draw(DVec2::new(10.0, 10.0), DVec2::new(30.0, 30.0));
    let mut options = flow.state.options.clone();
    options.clip_handle_drag_to_image = false;
    flow.send(RoiIntent::OptionsChanged { options });

    flow.press(30.0, 30.0);
    flow.drag(-5.0, 20.0);
    flow.take_all();
    flow.release(-5.0, 20.0);

    assert!(!flow.state.store.contains(id));
    assert!(flow.state.take_notifications().is_empty());
    assert!(flow.state.take_redraw_request());
}

#[test]
fn test_perpendicular_drag_emits_modified_per_step() {
    let mut flow = Flow::new();
    let id = flow.draw(DVec2::new(20.0, 50.0), DVec2::new(60.0, 50.0));
    flow.take_all();

    flow.press(40.0, 50.0);
    flow.drag(40.0, 55.0);
    flow.drag(41.0, 58.0);

    let notifications = flow.state.take_notifications();
    assert_eq!(notifications.len(), 2);
    assert!(notifications
        .iter()
        .all(|n| !n.is_completed() && n.measurement_id() == id));
    assert_eq!(
        notifications[1].event().measurement.handles.perpendicular.position,
        DVec2::new(40.0, 58.0)
    );
}
