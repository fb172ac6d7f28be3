//! Container aller Messungen eines Anzeige-Kontexts.

use super::measurement::{Measurement, MeasurementId};
use glam::DVec2;
use indexmap::IndexMap;

/// Besitzt die Messungen eines Anzeige-Kontexts in Einfüge-Reihenfolge.
///
/// Die Reihenfolge ist gleichzeitig Zeichen- und Hit-Test-Reihenfolge.
#[derive(Debug, Clone, Default)]
pub struct MeasurementStore {
    measurements: IndexMap<MeasurementId, Measurement>,
    next_id: u64,
}

impl MeasurementStore {
    /// Erstellt einen leeren Container.
    pub fn new() -> Self {
        Self {
            measurements: IndexMap::new(),
            next_id: 1,
        }
    }

    /// Legt eine neue Messung am Ursprungspunkt an und gibt ihre ID zurück.
    pub fn create(&mut self, origin: DVec2) -> MeasurementId {
        let id = MeasurementId(self.next_id.max(1));
        self.next_id = id.0 + 1;
        self.measurements.insert(id, Measurement::new(id, origin));
        id
    }

    /// Entfernt eine Messung; gibt sie zurück, falls vorhanden.
    pub fn remove(&mut self, id: MeasurementId) -> Option<Measurement> {
        self.measurements.shift_remove(&id)
    }

    /// Messung nach ID.
    pub fn get(&self, id: MeasurementId) -> Option<&Measurement> {
        self.measurements.get(&id)
    }

    /// Mutable Messung nach ID.
    pub fn get_mut(&mut self, id: MeasurementId) -> Option<&mut Measurement> {
        self.measurements.get_mut(&id)
    }

    /// Gibt `true` zurück, wenn die Messung existiert.
    pub fn contains(&self, id: MeasurementId) -> bool {
        self.measurements.contains_key(&id)
    }

    /// Iteriert in Zeichen-Reihenfolge.
    pub fn iter(&self) -> impl Iterator<Item = &Measurement> {
        self.measurements.values()
    }

    /// Iteriert mutabel in Zeichen-Reihenfolge.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Measurement> {
        self.measurements.values_mut()
    }

    /// IDs in Zeichen-Reihenfolge.
    pub fn ids(&self) -> Vec<MeasurementId> {
        self.measurements.keys().copied().collect()
    }

    /// Anzahl der Messungen.
    pub fn len(&self) -> usize {
        self.measurements.len()
    }

    /// Gibt `true` zurück, wenn keine Messung vorhanden ist.
    pub fn is_empty(&self) -> bool {
        self.measurements.is_empty()
    }

    /// Markiert alle Messungen als ungültig (z.B. nach Bildwechsel).
    pub fn invalidate_all(&mut self) {
        for measurement in self.measurements.values_mut() {
            measurement.invalidate();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_assigns_increasing_ids() {
        let mut store = MeasurementStore::new();
        let a = store.create(DVec2::ZERO);
        let b = store.create(DVec2::ONE);
        assert!(b > a);
        assert_eq!(store.len(), 2);
        assert_eq!(store.ids(), vec![a, b]);
    }

    #[test]
    fn test_remove_keeps_remaining_order() {
        let mut store = MeasurementStore::new();
        let a = store.create(DVec2::ZERO);
        let b = store.create(DVec2::ONE);
        let c = store.create(DVec2::splat(2.0));

        assert!(store.remove(b).is_some());
        assert!(store.remove(b).is_none());
        assert_eq!(store.ids(), vec![a, c]);
        assert!(!store.contains(b));
    }

    #[test]
    fn test_ids_are_not_reused_after_removal() {
        let mut store = MeasurementStore::default();
        let a = store.create(DVec2::ZERO);
        store.remove(a);
        let b = store.create(DVec2::ZERO);
        assert_ne!(a, b);
    }

    #[test]
    fn test_invalidate_all() {
        let mut store = MeasurementStore::new();
        let a = store.create(DVec2::ZERO);
        store.get_mut(a).expect("Messung vorhanden").invalidated = false;
        store.invalidate_all();
        assert!(store.get(a).expect("Messung vorhanden").invalidated);
    }
}
