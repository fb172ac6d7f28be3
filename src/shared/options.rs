//! Zentrale Konfiguration der Ellipsen-ROI.
//!
//! `RoiOptions` enthält alle zur Laufzeit änderbaren Werte.
//! Die `const`-Werte bleiben als Fallback/Default erhalten.

use crate::core::{SamplingFootprint, ToleranceProfile};
use serde::{Deserialize, Serialize};

// ── Hit-Tests ───────────────────────────────────────────────────────

/// Toleranzband um die Form bei Maus/Stift (Anzeige-Pixel).
pub const POINTER_TOLERANCE_PX: f64 = ToleranceProfile::Pointer.default_tolerance_px();
/// Toleranzband um die Form bei Touch (Anzeige-Pixel).
pub const TOUCH_TOLERANCE_PX: f64 = ToleranceProfile::Touch.default_tolerance_px();
/// Fangradius eines Handles bei Maus/Stift (Bild-Einheiten).
pub const HANDLE_CAPTURE_RADIUS: f64 = 6.0;
/// Fangradius eines Handles bei Touch (Bild-Einheiten).
pub const TOUCH_HANDLE_CAPTURE_RADIUS: f64 = 12.0;

// ── Eingabe ─────────────────────────────────────────────────────────

/// Nur die linke Maustaste (Bit 0) startet Interaktionen.
pub const MOUSE_BUTTON_MASK: u8 = 1;

// ── Laufzeit-Optionen (serialisierbar) ─────────────────────────────

/// Alle zur Laufzeit änderbaren ROI-Optionen.
/// Wird als `ellipse_roi.toml` neben der Binary gespeichert.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoiOptions {
    // ── Hit-Tests ───────────────────────────────────────────────
    /// Toleranzband um die Form bei Maus/Stift (Anzeige-Pixel)
    pub pointer_tolerance_px: f64,
    /// Toleranzband um die Form bei Touch (Anzeige-Pixel)
    pub touch_tolerance_px: f64,
    /// Fangradius eines Handles bei Maus/Stift (Bild-Einheiten)
    pub handle_capture_radius: f64,
    /// Fangradius eines Handles bei Touch (Bild-Einheiten)
    #[serde(default = "default_touch_handle_capture_radius")]
    pub touch_handle_capture_radius: f64,

    // ── Eingabe ─────────────────────────────────────────────────
    /// Bitmaske der Maustasten, die Interaktionen starten (Bit n = Taste n+1)
    pub mouse_button_mask: u8,

    // ── Bild-Grenzen ────────────────────────────────────────────
    /// Gezogenes Einzel-Handle in das Bild klemmen
    pub clip_handle_drag_to_image: bool,
    /// Verschobene Form in das Bild klemmen
    #[serde(default)]
    pub clip_shape_drag_to_image: bool,
    /// Messung nach dem Verschieben der Form löschen, wenn ein Handle außerhalb liegt
    #[serde(default = "default_true")]
    pub delete_if_handle_outside_image: bool,

    // ── Statistik ───────────────────────────────────────────────
    /// Welche Pixel des Sample-Fensters ausgewertet werden
    #[serde(default)]
    pub sampling_footprint: SamplingFootprint,
}

impl Default for RoiOptions {
    fn default() -> Self {
        Self {
            pointer_tolerance_px: POINTER_TOLERANCE_PX,
            touch_tolerance_px: TOUCH_TOLERANCE_PX,
            handle_capture_radius: HANDLE_CAPTURE_RADIUS,
            touch_handle_capture_radius: TOUCH_HANDLE_CAPTURE_RADIUS,

            mouse_button_mask: MOUSE_BUTTON_MASK,

            clip_handle_drag_to_image: true,
            clip_shape_drag_to_image: false,
            delete_if_handle_outside_image: true,

            sampling_footprint: SamplingFootprint::default(),
        }
    }
}

/// Serde-Default für `touch_handle_capture_radius` (Abwärtskompatibilität).
fn default_touch_handle_capture_radius() -> f64 {
    TOUCH_HANDLE_CAPTURE_RADIUS
}

fn default_true() -> bool {
    true
}

impl RoiOptions {
    /// Lädt Optionen aus einer TOML-Datei. Bei Fehler: Standardwerte.
    pub fn load_from_file(path: &std::path::Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(content) => match toml::from_str(&content) {
                Ok(opts) => {
                    log::info!("Optionen geladen aus: {}", path.display());
                    opts
                }
                Err(e) => {
                    log::warn!("Optionen-Datei fehlerhaft, verwende Standardwerte: {}", e);
                    Self::default()
                }
            },
            Err(_) => {
                log::info!("Keine Optionen-Datei gefunden, verwende Standardwerte");
                Self::default()
            }
        }
    }

    /// Speichert Optionen als TOML-Datei.
    pub fn save_to_file(&self, path: &std::path::Path) -> anyhow::Result<()> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        log::info!("Optionen gespeichert nach: {}", path.display());
        Ok(())
    }

    /// Ermittelt den Pfad zur Optionen-Datei neben der Binary.
    pub fn config_path() -> std::path::PathBuf {
        std::env::current_exe()
            .unwrap_or_else(|_| std::path::PathBuf::from("roi-replay"))
            .parent()
            .unwrap_or_else(|| std::path::Path::new("."))
            .join("ellipse_roi.toml")
    }

    /// Toleranzband um die Form für das Eingabegerät (Anzeige-Pixel).
    pub fn tolerance_px(&self, profile: ToleranceProfile) -> f64 {
        match profile {
            ToleranceProfile::Pointer => self.pointer_tolerance_px,
            ToleranceProfile::Touch => self.touch_tolerance_px,
        }
    }

    /// Fangradius eines Handles für das Eingabegerät (Bild-Einheiten).
    pub fn handle_radius(&self, profile: ToleranceProfile) -> f64 {
        match profile {
            ToleranceProfile::Pointer => self.handle_capture_radius,
            ToleranceProfile::Touch => self.touch_handle_capture_radius,
        }
    }

    /// Prüft, ob die Maustaste (1-basiert) laut Maske Interaktionen starten darf.
    pub fn is_mouse_button_enabled(&self, button: u8) -> bool {
        is_mouse_button_enabled(button, self.mouse_button_mask)
    }
}

/// `mask & (1 << (button - 1)) != 0`; Taste 0 und Tasten über 8 sind nie aktiv.
pub fn is_mouse_button_enabled(button: u8, mask: u8) -> bool {
    match button {
        1..=8 => mask & (1 << (button - 1)) != 0,
        _ => false,
    }
}
