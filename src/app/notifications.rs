//! Benachrichtigungen an den Host (fire-and-forget).

use crate::core::{Measurement, MeasurementId};

/// Werkzeug-Kennung in allen Benachrichtigungen.
pub const TOOL_TYPE: &str = "rotatedEllipticalRoi";

/// Nutzlast einer Benachrichtigung.
#[derive(Debug, Clone, PartialEq)]
pub struct MeasurementEvent {
    /// Kennung des Anzeige-Kontexts
    pub context: String,
    /// Immer [`TOOL_TYPE`]
    pub tool_type: &'static str,
    /// Momentaufnahme der Messung
    pub measurement: Measurement,
}

/// Ereignisse, die der Host abholt.
#[derive(Debug, Clone, PartialEq)]
pub enum RoiNotification {
    /// Session ohne Löschung beendet, Statistik aktuell
    MeasurementCompleted(MeasurementEvent),
    /// Geometrie während eines Drags geändert
    MeasurementModified(MeasurementEvent),
}

impl RoiNotification {
    /// Nutzlast unabhängig von der Art.
    pub fn event(&self) -> &MeasurementEvent {
        match self {
            RoiNotification::MeasurementCompleted(event)
            | RoiNotification::MeasurementModified(event) => event,
        }
    }

    /// ID der betroffenen Messung.
    pub fn measurement_id(&self) -> MeasurementId {
        self.event().measurement.id
    }

    /// `true` für [`RoiNotification::MeasurementCompleted`].
    pub fn is_completed(&self) -> bool {
        matches!(self, RoiNotification::MeasurementCompleted(_))
    }
}
