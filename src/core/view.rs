//! Abbildung Bild-Koordinaten ↔ Anzeige-Koordinaten (Pan und Zoom).

use glam::DVec2;
use serde::{Deserialize, Serialize};

/// Pan/Zoom-Transformation des Anzeige-Kontexts.
///
/// `display = (image - origin) * zoom`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ViewTransform {
    /// Bildpunkt, der auf den Anzeige-Ursprung fällt
    pub origin: DVec2,
    /// Anzeige-Pixel pro Bild-Pixel
    pub zoom: f64,
}

impl Default for ViewTransform {
    fn default() -> Self {
        Self::identity()
    }
}

impl ViewTransform {
    /// Minimaler Zoom-Faktor.
    pub const ZOOM_MIN: f64 = 0.01;

    /// 1:1-Abbildung ohne Verschiebung.
    pub fn identity() -> Self {
        Self {
            origin: DVec2::ZERO,
            zoom: 1.0,
        }
    }

    /// Erstellt eine Transformation; der Zoom wird nach unten begrenzt.
    pub fn new(origin: DVec2, zoom: f64) -> Self {
        Self {
            origin,
            zoom: zoom.max(Self::ZOOM_MIN),
        }
    }

    /// Bild → Anzeige.
    pub fn image_to_display(&self, image: DVec2) -> DVec2 {
        (image - self.origin) * self.zoom
    }

    /// Anzeige → Bild.
    pub fn display_to_image(&self, display: DVec2) -> DVec2 {
        display / self.zoom + self.origin
    }
}
