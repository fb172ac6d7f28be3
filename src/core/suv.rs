//! SUV-Umrechnung (Standardized Uptake Value) für PT-Bilder.
//!
//! Erwartet gespeicherte Pixelwerte, wendet selbst die Modalitäts-LUT an und
//! korrigiert die injizierte Dosis auf den Aufnahmezeitpunkt.

use anyhow::{bail, Context};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Uhrzeit im DICOM-`TM`-Format (`HHMMSS.FFFFFF`).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct DicomTime {
    /// Stunden (0–23)
    pub hours: u32,
    /// Minuten (0–59)
    pub minutes: u32,
    /// Sekunden (0–60)
    pub seconds: u32,
    /// Sekundenbruchteil (0.0–1.0)
    #[serde(default)]
    pub fraction: f64,
}

impl DicomTime {
    /// Parst `HH`, `HHMM`, `HHMMSS` oder `HHMMSS.F…`.
    pub fn parse(text: &str) -> anyhow::Result<Self> {
        let text = text.trim();
        let (digits, fraction) = match text.split_once('.') {
            Some((digits, frac)) => (digits, Some(frac)),
            None => (text, None),
        };

        if !matches!(digits.len(), 2 | 4 | 6) || !digits.bytes().all(|b| b.is_ascii_digit()) {
            bail!("Ungültige DICOM-Uhrzeit: '{}'", text);
        }

        let field = |range: std::ops::Range<usize>| -> anyhow::Result<u32> {
            digits.get(range).map_or(Ok(0), |s| {
                s.parse::<u32>()
                    .with_context(|| format!("Ungültige DICOM-Uhrzeit: '{}'", text))
            })
        };
        let hours = field(0..2)?;
        let minutes = field(2..4)?;
        let seconds = field(4..6)?;

        if hours > 23 || minutes > 59 || seconds > 60 {
            bail!("DICOM-Uhrzeit außerhalb des Wertebereichs: '{}'", text);
        }

        let fraction = match fraction {
            Some(frac) if frac.is_empty() => 0.0,
            Some(frac) if digits.len() == 6 && frac.bytes().all(|b| b.is_ascii_digit()) => {
                format!("0.{frac}")
                    .parse::<f64>()
                    .with_context(|| format!("Ungültiger Sekundenbruchteil: '{}'", text))?
            }
            Some(_) => bail!("Ungültiger Sekundenbruchteil: '{}'", text),
            None => 0.0,
        };

        Ok(Self {
            hours,
            minutes,
            seconds,
            fraction,
        })
    }

    /// Sekunden seit Mitternacht.
    pub fn seconds_of_day(&self) -> f64 {
        f64::from(self.hours) * 3600.0
            + f64::from(self.minutes) * 60.0
            + f64::from(self.seconds)
            + self.fraction
    }
}

impl FromStr for DicomTime {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// Patienten- und Radiopharmakon-Angaben für die SUV-Berechnung.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SuvParameters {
    /// Patientengewicht in kg
    pub patient_weight_kg: f64,
    /// Injizierte Gesamtdosis in Bq
    pub total_dose_bq: f64,
    /// Halbwertszeit des Radionuklids in s
    pub half_life_s: f64,
    /// Startzeit der Injektion
    pub injection_start: DicomTime,
    /// Aufnahmezeit der Serie
    pub series_acquisition: DicomTime,
}

impl SuvParameters {
    /// Auf den Aufnahmezeitpunkt zerfallskorrigierte Dosis.
    pub fn decay_corrected_dose(&self) -> f64 {
        let duration =
            self.series_acquisition.seconds_of_day() - self.injection_start.seconds_of_day();
        self.total_dose_bq * (-duration * std::f64::consts::LN_2 / self.half_life_s).exp()
    }

    fn is_complete(&self) -> bool {
        self.patient_weight_kg > 0.0 && self.total_dose_bq > 0.0 && self.half_life_s > 0.0
    }
}

/// Rechnet einen Modalitätswert auf den gespeicherten Pixelwert zurück.
pub fn stored_pixel_value(modality_value: f64, intercept: f64, slope: f64) -> f64 {
    (modality_value - intercept) / slope
}

/// SUV eines gespeicherten Pixelwerts; `None` bei unvollständigen Angaben.
pub fn calculate_suv(
    params: &SuvParameters,
    stored_value: f64,
    intercept: f64,
    slope: f64,
) -> Option<f64> {
    if !params.is_complete() {
        return None;
    }
    let modality_value = stored_value * slope + intercept;
    Some(modality_value * params.patient_weight_kg / params.decay_corrected_dose() * 1000.0)
}
