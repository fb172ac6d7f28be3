use crate::Flow;
use ellipse_roi::app::SessionOutcome;
use ellipse_roi::{RoiCommand, RoiIntent};
use glam::DVec2;

fn flow_with_shape() -> (Flow, ellipse_roi::MeasurementId) {
    let mut flow = Flow::new();
    let id = flow.draw(DVec2::new(20.0, 20.0), DVec2::new(60.0, 40.0));
    flow.take_all();
    (flow, id)
}

#[test]
fn test_body_press_moves_whole_shape() {
    let (mut flow, id) = flow_with_shape();
    flow.send(RoiIntent::ImageRendered);
    assert_eq!(
        flow.state.store.get(id).unwrap().handles.text_box.anchor,
        Some(DVec2::new(60.0, 30.0))
    );

    flow.press(50.0, 30.0);
    assert!(matches!(
        flow.state.command_log.entries().last(),
        Some(RoiCommand::BeginShapeDrag { .. })
    ));
    flow.drag(55.0, 35.0);
    flow.release(55.0, 35.0);

    let m = flow.state.store.get(id).unwrap();
    assert_eq!(m.handles.start.position, DVec2::new(25.0, 25.0));
    assert_eq!(m.handles.end.position, DVec2::new(65.0, 45.0));
    assert_eq!(m.handles.perpendicular.position, DVec2::new(45.0, 35.0));
    assert_eq!(m.handles.text_box.anchor, Some(DVec2::new(65.0, 35.0)));
    assert!(m.active);
    assert!(!m.invalidated);

    let notifications = flow.state.take_notifications();
    assert!(notifications.last().is_some_and(|n| n.is_completed()));
}

#[test]
fn test_shape_moved_outside_is_removed() {
    let (mut flow, id) = flow_with_shape();

    flow.press(50.0, 30.0);
    flow.drag(0.0, 30.0);
    assert_eq!(
        flow.state.store.get(id).unwrap().handles.start.position,
        DVec2::new(-30.0, 20.0)
    );
    flow.release(0.0, 30.0);

    assert!(flow.state.store.is_empty());
    let kinds: Vec<_> = flow
        .state
        .command_log
        .sessions()
        .iter()
        .map(|r| (r.kind, r.outcome))
        .collect();
    assert_eq!(
        kinds,
        vec![
            ("create", SessionOutcome::Completed),
            ("shape", SessionOutcome::Removed)
        ]
    );
}

#[test]
fn test_shape_clamping_keeps_measurement() {
    let (mut flow, id) = flow_with_shape();
    let mut options = flow.state.options.clone();
    options.clip_shape_drag_to_image = true;
    flow.send(RoiIntent::OptionsChanged { options });

    flow.press(50.0, 30.0);
    flow.drag(0.0, 30.0);
    flow.release(0.0, 30.0);

    let m = flow.state.store.get(id).expect("Geklemmte Form bleibt erhalten");
    assert_eq!(m.handles.start.position, DVec2::new(0.0, 20.0));
    assert_eq!(m.handles.end.position, DVec2::new(10.0, 40.0));
    assert_eq!(m.handles.perpendicular.position, DVec2::new(0.0, 30.0));
}

#[test]
fn test_shape_press_only_activates_target() {
    let (mut flow, first) = flow_with_shape();
    let second = flow.draw(DVec2::new(70.0, 70.0), DVec2::new(90.0, 90.0));

    flow.press(50.0, 30.0);

    assert!(flow.state.store.get(first).unwrap().active);
    assert!(!flow.state.store.get(second).unwrap().active);
}
