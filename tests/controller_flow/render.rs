use crate::{Flow, Uniform, EXTENT};
use approx::assert_abs_diff_eq;
use ellipse_roi::{ImageContext, ImageMeta, PixelSpacing, RoiIntent, SamplingFootprint};
use glam::DVec2;
use std::sync::Arc;

#[test]
fn test_new_image_is_picked_up_on_render() {
    let mut flow = Flow::new();
    let id = flow.draw(DVec2::new(20.0, 20.0), DVec2::new(40.0, 30.0));

    flow.state.set_image(
        ImageContext::new("uniform", EXTENT, ImageMeta::default(), Arc::new(Uniform(7.0)))
            .with_spacing(PixelSpacing::new(2.0, 1.0)),
    );
    assert!(flow.state.store.get(id).unwrap().invalidated);

    flow.send(RoiIntent::ImageRendered);

    let m = flow.state.store.get(id).unwrap();
    assert!(!m.invalidated);
    let stats = m.stats.mean_std_dev.unwrap();
    assert_abs_diff_eq!(stats.mean, 7.0);
    assert_abs_diff_eq!(stats.std_dev, 0.0);
    assert_abs_diff_eq!(
        m.stats.area.unwrap(),
        std::f64::consts::PI * 10.0 * 10.0,
        epsilon = 1e-9
    );
}

#[test]
fn test_render_places_text_box_at_right_edge() {
    let mut flow = Flow::new();
    let id = flow.draw(DVec2::new(40.0, 20.0), DVec2::new(10.0, 30.0));

    flow.send(RoiIntent::ImageRendered);

    let m = flow.state.store.get(id).unwrap();
    assert_eq!(m.handles.text_box.anchor, Some(DVec2::new(40.0, 25.0)));
    assert_eq!(m.handles.text_box_link_points()[2], m.handles.perpendicular.position);
}

#[test]
fn test_render_skips_measurement_in_session() {
    let mut flow = Flow::new();
    let id = flow.draw(DVec2::new(20.0, 20.0), DVec2::new(40.0, 30.0));

    flow.press(40.0, 30.0);
    flow.drag(50.0, 30.0);
    flow.send(RoiIntent::ImageRendered);

    assert!(flow.state.store.get(id).unwrap().invalidated);

    flow.release(50.0, 30.0);
    assert!(!flow.state.store.get(id).unwrap().invalidated);
}

#[test]
fn test_footprint_change_recomputes_with_ellipse_mask() {
    let mut flow = Flow::new();
    let id = flow.draw(DVec2::new(20.0, 20.0), DVec2::new(60.0, 40.0));
    flow.press(40.0, 30.0);
    flow.drag(35.0, 40.0);
    flow.release(35.0, 40.0);
    let count = |flow: &Flow| {
        flow.state
            .store
            .get(id)
            .and_then(|m| m.stats.mean_std_dev)
            .map_or(0, |s| s.count)
    };
    let box_count = count(&flow);
    assert_eq!(box_count, 800);

    let mut options = flow.state.options.clone();
    options.sampling_footprint = SamplingFootprint::RotatedEllipse;
    flow.send(RoiIntent::OptionsChanged { options });
    assert!(flow.state.store.get(id).unwrap().invalidated);

    flow.send(RoiIntent::ImageRendered);
    let ellipse_count = count(&flow);

    assert!(ellipse_count > 0);
    assert!(ellipse_count < box_count);
}
