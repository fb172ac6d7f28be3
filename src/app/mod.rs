//! Application-Layer: Controller, State, Events und Use-Cases.

pub mod command_log;
pub mod controller;
pub mod events;
pub mod handlers;
mod intent_mapping;
pub mod notifications;
pub mod session;
/// Zustand eines Anzeige-Kontexts
///
/// Hält Messungen, Bild, View, Optionen und die laufende Session.
pub mod state;
pub mod use_cases;

pub use command_log::{CommandLog, SessionOutcome, SessionRecord};
pub use controller::RoiController;
pub use events::{InputDevice, PointerEvent, PointerPoints, RoiCommand, RoiIntent};
pub use notifications::{MeasurementEvent, RoiNotification, TOOL_TYPE};
pub use session::{DragSession, HoverGate};
pub use state::{ImageContext, RoiState, ToolMode};
