//! Use-Case: Ganze Form verschieben.

use crate::core::{HandleKey, ImageExtent, Measurement};
use glam::DVec2;

/// Verschiebt alle Handles um `delta`.
///
/// Mit `clip` wird jedes Geometrie-Handle einzeln ins Bild geklemmt. Die
/// Textbox wandert mit, sofern sie sich nicht unabhängig bewegt; sie wird
/// nie geklemmt.
pub fn move_all_handles(
    measurement: &mut Measurement,
    delta: DVec2,
    clip: Option<ImageExtent>,
) -> bool {
    if delta == DVec2::ZERO {
        return false;
    }

    for key in HandleKey::ALL {
        let handle = measurement.handles.get_mut(key);
        handle.position += delta;
        if let Some(extent) = clip {
            handle.position = extent.clamp(handle.position);
        }
    }

    let text_box = &mut measurement.handles.text_box;
    if !text_box.moves_independently {
        if let Some(anchor) = text_box.anchor.as_mut() {
            *anchor += delta;
        }
    }

    measurement.invalidate();
    true
}
