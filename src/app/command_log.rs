//! Begrenztes Diagnose-Log: ausgeführte Commands und Session-Ausgänge.

use super::RoiCommand;
use crate::core::MeasurementId;

const MAX_ENTRIES: usize = 1000;

/// Wie eine Drag-Session geendet hat.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionOutcome {
    /// Messung bleibt, Statistik neu, `MeasurementCompleted` gesendet
    Completed,
    /// Handle außerhalb des Bildes, Messung entfernt
    Removed,
    /// Messung war bei Session-Ende nicht mehr im Container
    Missing,
}

/// Eine beendete Session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionRecord {
    pub measurement_id: MeasurementId,
    /// `create`, `handle` oder `shape`
    pub kind: &'static str,
    pub outcome: SessionOutcome,
}

/// Commands und Session-Ausgänge in Ausführungsreihenfolge.
#[derive(Debug, Default)]
pub struct CommandLog {
    entries: Vec<RoiCommand>,
    sessions: Vec<SessionRecord>,
}

/// Hält `log` unter `MAX_ENTRIES`; die ältere Hälfte fällt weg.
fn push_bounded<T>(log: &mut Vec<T>, item: T) {
    if log.len() >= MAX_ENTRIES {
        log.drain(..MAX_ENTRIES / 2);
    }
    log.push(item);
}

impl CommandLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fügt einen ausgeführten Command hinzu.
    pub fn record(&mut self, command: &RoiCommand) {
        push_bounded(&mut self.entries, command.clone());
    }

    /// Hält den Ausgang einer beendeten Session fest.
    pub fn record_session(
        &mut self,
        measurement_id: MeasurementId,
        kind: &'static str,
        outcome: SessionOutcome,
    ) {
        push_bounded(
            &mut self.sessions,
            SessionRecord {
                measurement_id,
                kind,
                outcome,
            },
        );
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[RoiCommand] {
        &self.entries
    }

    /// Beendete Sessions, älteste zuerst.
    pub fn sessions(&self) -> &[SessionRecord] {
        &self.sessions
    }

    /// Letzter Ausgang für eine Messung.
    pub fn last_outcome(&self, measurement_id: MeasurementId) -> Option<SessionOutcome> {
        self.sessions
            .iter()
            .rev()
            .find(|record| record.measurement_id == measurement_id)
            .map(|record| record.outcome)
    }
}
