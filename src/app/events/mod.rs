//! RoiIntent- und RoiCommand-Enums für den Intent/Command-Datenfluss.

mod command;
mod intent;

pub use command::RoiCommand;
pub use intent::{InputDevice, PointerEvent, PointerPoints, RoiIntent};
