//! Drag-Sessions und Hover-Sperre.
//!
//! Eine Session existiert von Press bis Release. Solange sie lebt, hält sie
//! eine `HoverSuspension`; der passive Hover-Durchlauf ruht, bis der Guard
//! gedroppt wird, egal auf welchem Weg die Session endet.

use crate::core::{HandleKey, ImageExtent, MeasurementId};
use glam::DVec2;
use std::cell::Cell;
use std::rc::Rc;

/// Zähler aktiver Hover-Sperren eines Anzeige-Kontexts.
#[derive(Debug, Clone, Default)]
pub struct HoverGate {
    suspensions: Rc<Cell<usize>>,
}

impl HoverGate {
    /// Erstellt eine offene Sperre (Hover aktiv).
    pub fn new() -> Self {
        Self::default()
    }

    /// `true` solange mindestens ein Guard lebt.
    pub fn is_suspended(&self) -> bool {
        self.suspensions.get() > 0
    }

    /// Setzt den Hover-Durchlauf aus, bis der zurückgegebene Guard gedroppt wird.
    pub fn suspend(&self) -> HoverSuspension {
        self.suspensions.set(self.suspensions.get() + 1);
        HoverSuspension {
            suspensions: Rc::clone(&self.suspensions),
        }
    }
}

/// Guard einer Hover-Sperre; Drop hebt sie auf.
#[derive(Debug)]
pub struct HoverSuspension {
    suspensions: Rc<Cell<usize>>,
}

impl Drop for HoverSuspension {
    fn drop(&mut self) {
        self.suspensions.set(self.suspensions.get().saturating_sub(1));
    }
}

/// Art der laufenden Interaktion.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DragKind {
    /// Neue Messung aufziehen: `end` folgt dem Zeiger
    Create,
    /// Ein einzelnes Handle verschieben
    Handle {
        /// Gezogenes Handle
        key: HandleKey,
        /// Handle-Position minus Zeiger beim Press
        grab_offset: DVec2,
        /// Handle nach jedem Schritt ins Bild klemmen
        clip: bool,
    },
    /// Die ganze Form verschieben
    Shape {
        /// Zeigerposition des vorherigen Schritts (Bild-Koordinaten)
        last_pointer: DVec2,
        /// Alle Handles ins Bild klemmen
        clip: bool,
        /// Beim Release löschen, wenn ein Handle außerhalb liegt
        delete_if_outside: bool,
    },
}

impl DragKind {
    /// Kurzname für Logs.
    pub fn label(&self) -> &'static str {
        match self {
            DragKind::Create => "create",
            DragKind::Handle { .. } => "handle",
            DragKind::Shape { .. } => "shape",
        }
    }
}

/// Laufende Drag-Session; höchstens eine pro Anzeige-Kontext.
#[derive(Debug)]
pub struct DragSession {
    /// Bearbeitete Messung
    pub measurement_id: MeasurementId,
    /// Art der Interaktion
    pub kind: DragKind,
    /// Bildausdehnung beim Press (für Klemmen und Bounds-Check)
    pub extent: ImageExtent,
    _hover: HoverSuspension,
}

impl DragSession {
    /// Startet eine Session und setzt den Hover-Durchlauf aus.
    pub fn start(
        measurement_id: MeasurementId,
        kind: DragKind,
        extent: ImageExtent,
        gate: &HoverGate,
    ) -> Self {
        log::debug!("Session {} gestartet für Messung {}", kind.label(), measurement_id);
        Self {
            measurement_id,
            kind,
            extent,
            _hover: gate.suspend(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_suspends_hover_until_dropped() {
        let gate = HoverGate::new();
        assert!(!gate.is_suspended());

        let session = DragSession::start(
            MeasurementId(1),
            DragKind::Create,
            ImageExtent::new(10, 10),
            &gate,
        );
        assert!(gate.is_suspended());

        drop(session);
        assert!(!gate.is_suspended());
    }

    #[test]
    fn test_nested_suspensions_are_counted() {
        let gate = HoverGate::new();
        let a = gate.suspend();
        let b = gate.clone().suspend();
        drop(a);
        assert!(gate.is_suspended());
        drop(b);
        assert!(!gate.is_suspended());
    }
}
