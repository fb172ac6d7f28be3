//! Use-Case: Statistik berechnen und beim Rendern auffrischen.

use crate::app::RoiState;
use crate::core::{compute_statistics, MeasurementId, RoiStatistics};

/// Berechnet die Statistik einer Messung gegen das aktuelle Bild.
///
/// Ohne Bild oder unbekannte ID: `None`, die Messung bleibt invalidiert.
pub fn compute_for(state: &mut RoiState, id: MeasurementId) -> Option<RoiStatistics> {
    let Some(image) = state.image.as_ref() else {
        log::debug!("Kein Bild gesetzt, Statistik für {} übersprungen", id);
        return None;
    };
    let ctx = image.statistics_context(state.options.sampling_footprint);
    let measurement = state.store.get_mut(id)?;
    Some(compute_statistics(measurement, &ctx))
}

/// Render-Durchlauf: Statistik aller sichtbaren Messungen außerhalb einer
/// Session auffrischen (memoisiert) und unverschobene Textboxen platzieren.
pub fn refresh_statistics(state: &mut RoiState) {
    let in_session = state.session_measurement();
    let footprint = state.options.sampling_footprint;
    let image = state.image.as_ref();

    for measurement in state.store.iter_mut().filter(|m| m.visible) {
        if in_session != Some(measurement.id) {
            if let Some(image) = image {
                compute_statistics(measurement, &image.statistics_context(footprint));
            }
        }
        measurement.place_text_box();
    }
}
