//! Statistik-Engine: Mittelwert/Standardabweichung, SUV und Fläche einer ROI.
//!
//! Das Ergebnis wird an der Messung zwischengespeichert. Neu berechnet wird nur,
//! wenn `invalidated` gesetzt ist; der Schlüssel ist das Flag, nicht die Geometrie.

use super::image::{ImageExtent, ImageMeta, PixelSource, PixelSpacing, SamplingWindow};
use super::measurement::{AreaUnit, MeanStdDev, Measurement, RoiStatistics};
use super::suv::{calculate_suv, stored_pixel_value, SuvParameters};
use glam::DVec2;
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

/// Welche Pixel des Sample-Fensters fließen in Mittelwert/Standardabweichung ein?
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SamplingFootprint {
    /// Alle Pixel der achsenparallelen Bounding-Box von start/end
    #[default]
    BoundingBox,
    /// Nur Pixel, deren Mittelpunkt in der rotierten Ellipse liegt
    RotatedEllipse,
}

/// Alles, was die Engine über das Bild wissen muss.
pub struct StatisticsContext<'a> {
    /// Pixelquelle (liefert Modalitätswerte)
    pub pixels: &'a dyn PixelSource,
    /// Modalität, LUT und Farbflag
    pub meta: &'a ImageMeta,
    /// Bildausdehnung (begrenzt das Sample-Fenster)
    pub extent: ImageExtent,
    /// Pixelabstand für die Fläche
    pub spacing: PixelSpacing,
    /// Dosis-Angaben für PT-Bilder
    pub suv: Option<&'a SuvParameters>,
    /// Sample-Auswahl innerhalb des Fensters
    pub footprint: SamplingFootprint,
}

/// Mittelwert und Populations-Standardabweichung.
///
/// Eine leere Messwertreihe ergibt `count = 0` mit NaN für Mittelwert und
/// Streuung; `compute_statistics` verwirft das Ergebnis dann.
pub fn calculate_mean_std_dev(samples: &[f64]) -> MeanStdDev {
    if samples.is_empty() {
        return MeanStdDev {
            count: 0,
            mean: f64::NAN,
            std_dev: f64::NAN,
        };
    }

    let count = samples.len();
    let n = count as f64;
    let mean = samples.iter().sum::<f64>() / n;
    let variance = samples.iter().map(|v| (v - mean) * (v - mean)).sum::<f64>() / n;

    MeanStdDev {
        count,
        mean,
        std_dev: variance.sqrt(),
    }
}

/// Fläche der Ellipse über der Bounding-Box (Breite/Höhe × Pixelabstand).
pub fn ellipse_area(window: &SamplingWindow, spacing: &PixelSpacing) -> f64 {
    PI * (f64::from(window.width) * spacing.column_or_unit() / 2.0)
        * (f64::from(window.height) * spacing.row_or_unit() / 2.0)
}

/// SUV-Werte aus modalitätsskalierten Statistiken.
///
/// Die Pixelquelle liefert bereits Modalitätswerte, `calculate_suv` erwartet
/// gespeicherte Werte; deshalb wird erst zurückgerechnet.
pub fn suv_statistics(
    params: &SuvParameters,
    stats: &MeanStdDev,
    meta: &ImageMeta,
) -> Option<MeanStdDev> {
    let to_suv = |value: f64| {
        calculate_suv(
            params,
            stored_pixel_value(value, meta.intercept, meta.slope),
            meta.intercept,
            meta.slope,
        )
    };

    let suv = MeanStdDev {
        count: stats.count,
        mean: to_suv(stats.mean)?,
        std_dev: to_suv(stats.std_dev)?,
    };
    suv.is_finite().then_some(suv)
}

fn window_samples(
    measurement: &Measurement,
    window: SamplingWindow,
    ctx: &StatisticsContext<'_>,
) -> Vec<f64> {
    let window = window.clamped_to(ctx.extent);
    if window.pixel_count() == 0 {
        return Vec::new();
    }

    let samples = ctx.pixels.samples(window);
    match ctx.footprint {
        SamplingFootprint::BoundingBox => samples,
        SamplingFootprint::RotatedEllipse => {
            let ellipse = measurement.handles.control_points().ellipse();
            window
                .coordinates()
                .zip(samples)
                .filter(|((x, y), _)| {
                    ellipse.contains(DVec2::new(*x as f64 + 0.5, *y as f64 + 0.5))
                })
                .map(|(_, value)| value)
                .collect()
        }
    }
}

/// Berechnet die Statistik einer Messung, falls ihr Cache ungültig ist.
///
/// Nicht-endliche Ergebnisse werden verworfen; die Messung bleibt dann
/// invalidiert, damit der nächste Auslöser es erneut versucht.
pub fn compute_statistics(
    measurement: &mut Measurement,
    ctx: &StatisticsContext<'_>,
) -> RoiStatistics {
    if !measurement.invalidated {
        return measurement.stats;
    }

    let window = SamplingWindow::from_corners(
        measurement.handles.start.position,
        measurement.handles.end.position,
    );
    let mut stats = measurement.stats;
    let mut complete = true;

    if ctx.meta.color {
        stats.mean_std_dev = None;
        stats.mean_std_dev_suv = None;
    } else {
        let samples = window_samples(measurement, window, ctx);
        let mean_std_dev = calculate_mean_std_dev(&samples);

        if mean_std_dev.is_finite() {
            stats.mean_std_dev = Some(mean_std_dev);
            stats.mean_std_dev_suv = if ctx.meta.is_pet() {
                ctx.suv
                    .and_then(|params| suv_statistics(params, &mean_std_dev, ctx.meta))
            } else {
                None
            };
        } else {
            log::warn!(
                "Messung {}: Mittelwert nicht endlich, Ergebnis verworfen",
                measurement.id
            );
            complete = false;
        }
    }

    let area = ellipse_area(&window, &ctx.spacing);
    if area.is_finite() {
        stats.area = Some(area);
        stats.unit = Some(if ctx.spacing.is_physical() {
            AreaUnit::SquareMillimeters
        } else {
            AreaUnit::SquarePixels
        });
    } else {
        log::warn!(
            "Messung {}: Fläche nicht endlich, Ergebnis verworfen",
            measurement.id
        );
        complete = false;
    }

    measurement.stats = stats;
    if complete {
        measurement.invalidated = false;
        log::debug!(
            "Messung {}: Statistik neu berechnet ({} Samples)",
            measurement.id,
            stats.mean_std_dev.map_or(0, |s| s.count)
        );
    }
    stats
}
