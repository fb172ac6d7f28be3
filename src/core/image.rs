//! Bild-Schnittstellen: Ausdehnung, Metadaten, Pixelabstand und Pixelquelle.
//!
//! Das eigentliche Bild gehört dem Host; der Kern sieht nur diese Verträge.

use super::measurement::Handles;
use glam::DVec2;
use image::{ImageBuffer, Luma};
use serde::{Deserialize, Serialize};

/// Pixel-Ausdehnung eines Bildes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ImageExtent {
    /// Anzahl Zeilen (Höhe)
    pub rows: u32,
    /// Anzahl Spalten (Breite)
    pub columns: u32,
}

impl ImageExtent {
    /// Erstellt eine Ausdehnung aus Zeilen und Spalten.
    pub fn new(rows: u32, columns: u32) -> Self {
        Self { rows, columns }
    }

    /// Prüft, ob ein Punkt im gültigen Bereich `[0, columns] × [0, rows]` liegt.
    pub fn contains(&self, point: DVec2) -> bool {
        point.x >= 0.0
            && point.y >= 0.0
            && point.x <= f64::from(self.columns)
            && point.y <= f64::from(self.rows)
    }

    /// Klemmt einen Punkt in den gültigen Bereich.
    pub fn clamp(&self, point: DVec2) -> DVec2 {
        DVec2::new(
            point.x.clamp(0.0, f64::from(self.columns)),
            point.y.clamp(0.0, f64::from(self.rows)),
        )
    }

    /// Prüft, ob irgendein Geometrie-Handle außerhalb des Bildes liegt.
    ///
    /// Die Textbox darf außerhalb liegen und zählt nicht.
    pub fn any_handle_outside(&self, handles: &Handles) -> bool {
        let text_box_outside = !handles.text_box.allowed_outside_image
            && handles
                .text_box
                .anchor
                .is_some_and(|anchor| !self.contains(anchor));
        text_box_outside || handles.iter().any(|(_, h)| !self.contains(h.position))
    }
}

/// Bild-Metadaten, die die Statistik beeinflussen.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageMeta {
    /// Modalität (z.B. "CT", "PT"), falls bekannt
    #[serde(default)]
    pub modality: Option<String>,
    /// Rescale-Intercept der Modalitäts-LUT
    #[serde(default)]
    pub intercept: f64,
    /// Rescale-Slope der Modalitäts-LUT
    #[serde(default = "default_slope")]
    pub slope: f64,
    /// Mehrkanal-Bild (keine Intensitätsstatistik)
    #[serde(default)]
    pub color: bool,
}

fn default_slope() -> f64 {
    1.0
}

impl Default for ImageMeta {
    fn default() -> Self {
        Self {
            modality: None,
            intercept: 0.0,
            slope: 1.0,
            color: false,
        }
    }
}

impl ImageMeta {
    /// Modalitäts-Tag für Positronen-Emissions-Tomographie.
    pub const PET_MODALITY: &'static str = "PT";

    /// `true` für PT-Bilder (SUV-Umrechnung möglich).
    pub fn is_pet(&self) -> bool {
        self.modality.as_deref() == Some(Self::PET_MODALITY)
    }
}

/// Physikalischer Pixelabstand (mm), falls bekannt.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PixelSpacing {
    /// Abstand zwischen Zeilen (vertikal)
    #[serde(default)]
    pub row: Option<f64>,
    /// Abstand zwischen Spalten (horizontal)
    #[serde(default)]
    pub column: Option<f64>,
}

impl PixelSpacing {
    /// Erstellt einen vollständig bekannten Pixelabstand.
    pub fn new(row: f64, column: f64) -> Self {
        Self {
            row: Some(row),
            column: Some(column),
        }
    }

    fn usable(value: Option<f64>) -> Option<f64> {
        value.filter(|v| *v != 0.0 && !v.is_nan())
    }

    /// Zeilenabstand oder 1.0.
    pub fn row_or_unit(&self) -> f64 {
        Self::usable(self.row).unwrap_or(1.0)
    }

    /// Spaltenabstand oder 1.0.
    pub fn column_or_unit(&self) -> f64 {
        Self::usable(self.column).unwrap_or(1.0)
    }

    /// `true` nur wenn beide Abstände bekannt sind.
    pub fn is_physical(&self) -> bool {
        Self::usable(self.row).is_some() && Self::usable(self.column).is_some()
    }
}

/// Rechteckiges Sample-Fenster in Pixel-Indizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SamplingWindow {
    /// Linke Spalte
    pub left: i64,
    /// Oberste Zeile
    pub top: i64,
    /// Breite in Pixeln
    pub width: u32,
    /// Höhe in Pixeln
    pub height: u32,
}

impl SamplingWindow {
    /// Leitet das Fenster aus der Bounding-Box zweier Punkte ab.
    ///
    /// Gerundet wird wie `floor(x + 0.5)`.
    pub fn from_corners(a: DVec2, b: DVec2) -> Self {
        let min = a.min(b);
        let size = (a - b).abs();
        Self {
            left: round_half_up(min.x) as i64,
            top: round_half_up(min.y) as i64,
            width: round_half_up(size.x).max(0.0) as u32,
            height: round_half_up(size.y).max(0.0) as u32,
        }
    }

    /// Anzahl der Pixel im Fenster.
    pub fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Schneidet das Fenster mit dem Bild; leer wenn keine Überlappung.
    pub fn clamped_to(&self, extent: ImageExtent) -> Self {
        let left = self.left.clamp(0, i64::from(extent.columns));
        let top = self.top.clamp(0, i64::from(extent.rows));
        let right = self.right().clamp(left, i64::from(extent.columns));
        let bottom = self.bottom().clamp(top, i64::from(extent.rows));
        Self {
            left,
            top,
            width: (right - left) as u32,
            height: (bottom - top) as u32,
        }
    }

    /// Erste Spalte rechts des Fensters (sättigend).
    fn right(&self) -> i64 {
        self.left.saturating_add(i64::from(self.width))
    }

    /// Erste Zeile unterhalb des Fensters (sättigend).
    fn bottom(&self) -> i64 {
        self.top.saturating_add(i64::from(self.height))
    }

    /// Pixel-Koordinaten des Fensters in Zeilen-Reihenfolge.
    pub fn coordinates(&self) -> impl Iterator<Item = (i64, i64)> + '_ {
        (self.top..self.bottom()).flat_map(move |y| (self.left..self.right()).map(move |x| (x, y)))
    }
}

fn round_half_up(value: f64) -> f64 {
    (value + 0.5).floor()
}

/// Liefert Intensitäten (Modalitäts-Werte) eines Fensters.
pub trait PixelSource {
    /// Samples in Zeilen-Reihenfolge, genau `window.pixel_count()` Werte.
    ///
    /// Für Fenster innerhalb des Bildes darf die Abfrage nicht fehlschlagen.
    fn samples(&self, window: SamplingWindow) -> Vec<f64>;
}

/// Pixelquelle über einem 16-Bit-Graustufenbild mit linearer Modalitäts-LUT.
#[derive(Debug, Clone)]
pub struct LumaImageSource {
    pixels: ImageBuffer<Luma<u16>, Vec<u16>>,
    slope: f64,
    intercept: f64,
}

impl LumaImageSource {
    /// Erstellt eine Quelle; Werte werden als `stored * slope + intercept` geliefert.
    pub fn new(pixels: ImageBuffer<Luma<u16>, Vec<u16>>, meta: &ImageMeta) -> Self {
        Self {
            pixels,
            slope: meta.slope,
            intercept: meta.intercept,
        }
    }

    /// Ausdehnung des Bildes.
    pub fn extent(&self) -> ImageExtent {
        ImageExtent::new(self.pixels.height(), self.pixels.width())
    }

    fn modality_value(&self, x: i64, y: i64) -> f64 {
        let (Ok(x), Ok(y)) = (u32::try_from(x), u32::try_from(y)) else {
            return f64::NAN;
        };
        self.pixels
            .get_pixel_checked(x, y)
            .map_or(f64::NAN, |p| f64::from(p.0[0]) * self.slope + self.intercept)
    }
}

impl PixelSource for LumaImageSource {
    fn samples(&self, window: SamplingWindow) -> Vec<f64> {
        window
            .coordinates()
            .map(|(x, y)| self.modality_value(x, y))
            .collect()
    }
}
