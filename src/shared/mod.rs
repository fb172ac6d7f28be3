//! Geteilte Typen für layer-übergreifende Verträge.
//!
//! Enthält die Laufzeit-Optionen, die Core-Policies und der App-Layer
//! gemeinsam lesen.

pub mod options;

pub use options::{is_mouse_button_enabled, RoiOptions};
pub use options::{HANDLE_CAPTURE_RADIUS, POINTER_TOLERANCE_PX, TOUCH_TOLERANCE_PX};
