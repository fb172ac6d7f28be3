//! Use-Case: Einzelnes Handle verschieben.
//!
//! Der Senkrecht-Punkt bleibt auf der Normalen der Hauptachse durch das
//! Zentrum. Sein Abstand (`shortest_distance`) wird beim Ziehen des
//! Senkrecht-Punkts gespeichert und beim Ziehen eines Endpunkts wieder
//! angelegt, weil er sich während der Achsen-Bewegung nicht ableiten lässt.

use crate::core::{bounding_box_center, HandleKey, ImageExtent, Measurement};
use glam::DVec2;

/// Einheits-Normale der Achse `start → end`; `None` wenn die Achse leer ist.
fn axis_normal(start: DVec2, end: DVec2) -> Option<DVec2> {
    (end - start).perp().try_normalize()
}

/// Projiziert `target` auf die Normale der Achse durch das Zentrum.
///
/// Entspricht dem Schnittpunkt der Senkrechten durch das Zentrum mit der
/// Parallelen zur Achse durch `target`, auch bei senkrechter Achse.
/// Liefert Position und Abstand zum Zentrum.
pub fn project_onto_axis_normal(
    start: DVec2,
    end: DVec2,
    target: DVec2,
) -> Option<(DVec2, f64)> {
    let normal = axis_normal(start, end)?;
    let center = bounding_box_center(start, end);
    let offset = (target - center).dot(normal);
    Some((center + normal * offset, offset.abs()))
}

/// Verschiebt den Senkrecht-Punkt und speichert den neuen Nebenachsen-Radius.
///
/// Bei leerer Hauptachse bleibt alles unverändert.
pub fn move_perpendicular_handle(measurement: &mut Measurement, target: DVec2) -> bool {
    let handles = &measurement.handles;
    let Some((position, distance)) =
        project_onto_axis_normal(handles.start.position, handles.end.position, target)
    else {
        return false;
    };

    measurement.handles.perpendicular.position = position;
    measurement.shortest_distance = distance;
    true
}

/// Verschiebt `start` oder `end` und setzt den Senkrecht-Punkt im
/// gespeicherten Abstand auf die neue Normale, auf derselben Seite wie zuvor.
///
/// `false`, wenn das (geklemmte) Ziel der aktuellen Position entspricht.
pub fn move_endpoint(
    measurement: &mut Measurement,
    key: HandleKey,
    target: DVec2,
    clip: Option<ImageExtent>,
) -> bool {
    let handles = &measurement.handles;
    let side = axis_normal(handles.start.position, handles.end.position)
        .map_or(1.0, |normal| {
            if normal.dot(handles.perpendicular.position - handles.center()) < 0.0 {
                -1.0
            } else {
                1.0
            }
        });

    let target = clip.map_or(target, |extent| extent.clamp(target));
    if measurement.handles.get(key).position == target {
        return false;
    }
    measurement.handles.get_mut(key).position = target;

    let distance = measurement.shortest_distance;
    let handles = &mut measurement.handles;
    let center = handles.center();
    handles.perpendicular.position = axis_normal(handles.start.position, handles.end.position)
        .map_or(center, |normal| center + normal * side * distance);
    true
}

/// Ein Drag-Schritt für ein einzelnes Handle.
///
/// `clip` klemmt das Ziel ins Bild; beim Senkrecht-Punkt wird der Zeiger
/// vor der Projektion geklemmt, damit die Orthogonalität erhalten bleibt.
pub fn apply_handle_drag(
    measurement: &mut Measurement,
    key: HandleKey,
    image_pos: DVec2,
    grab_offset: DVec2,
    clip: Option<ImageExtent>,
) -> bool {
    let target = image_pos + grab_offset;
    measurement.handles.get_mut(key).active = true;

    let moved = match key {
        HandleKey::Perpendicular => {
            let target = clip.map_or(target, |extent| extent.clamp(target));
            move_perpendicular_handle(measurement, target)
        }
        HandleKey::Start | HandleKey::End => move_endpoint(measurement, key, target, clip),
    };

    if moved {
        measurement.invalidate();
    }
    moved
}
