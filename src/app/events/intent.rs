use crate::app::state::ToolMode;
use crate::core::{ImageExtent, ToleranceProfile, ViewTransform};
use crate::shared::RoiOptions;
use glam::DVec2;
use serde::{Deserialize, Serialize};

/// Eingabegerät eines Zeiger-Events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum InputDevice {
    /// Maus oder Stift
    #[default]
    Mouse,
    /// Touch-Eingabe
    Touch,
}

impl InputDevice {
    /// Toleranzprofil der Hit-Tests für dieses Gerät.
    pub fn tolerance_profile(self) -> ToleranceProfile {
        match self {
            InputDevice::Mouse => ToleranceProfile::Pointer,
            InputDevice::Touch => ToleranceProfile::Touch,
        }
    }
}

/// Ein Punkt in Bild- und Anzeige-Koordinaten.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PointerPoints {
    /// Bild-Koordinaten
    pub image: DVec2,
    /// Anzeige-Koordinaten
    pub display: DVec2,
}

impl PointerPoints {
    /// Leitet die Anzeige-Koordinaten über die View-Transformation ab.
    pub fn from_image(image: DVec2, view: &ViewTransform) -> Self {
        Self {
            image,
            display: view.image_to_display(image),
        }
    }
}

/// Zeiger-Event, wie es die Darstellung liefert.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PointerEvent {
    /// Aktuelle Position
    pub current: PointerPoints,
    /// Position beim Press
    pub start: PointerPoints,
    /// Ausdehnung des angezeigten Bildes
    pub extent: ImageExtent,
    /// Eingabegerät
    #[serde(default)]
    pub device: InputDevice,
    /// Maustaste (1 = links); bei Touch ohne Bedeutung
    #[serde(default = "default_button")]
    pub button: u8,
}

fn default_button() -> u8 {
    1
}

impl PointerEvent {
    /// Maus-Event mit linker Taste, Start = aktuelle Position.
    pub fn mouse(current: PointerPoints, extent: ImageExtent) -> Self {
        Self {
            current,
            start: current,
            extent,
            device: InputDevice::Mouse,
            button: 1,
        }
    }

    /// Touch-Event, Start = aktuelle Position.
    pub fn touch(current: PointerPoints, extent: ImageExtent) -> Self {
        Self {
            device: InputDevice::Touch,
            ..Self::mouse(current, extent)
        }
    }

    /// Setzt die Press-Position.
    pub fn with_start(mut self, start: PointerPoints) -> Self {
        self.start = start;
        self
    }

    /// Setzt die Maustaste.
    pub fn with_button(mut self, button: u8) -> Self {
        self.button = button;
        self
    }
}

/// ROI-Intents sind Eingaben aus Darstellung/Host ohne direkte Mutationslogik.
#[derive(Debug, Clone)]
pub enum RoiIntent {
    /// Zeiger bewegt (ohne gedrückte Taste)
    PointerMoved { event: PointerEvent },
    /// Taste gedrückt bzw. Touch begonnen
    PointerPressed { event: PointerEvent },
    /// Zeiger mit gedrückter Taste bewegt
    PointerDragged { event: PointerEvent },
    /// Taste losgelassen
    PointerReleased { event: PointerEvent },
    /// Klick (beendet eine laufende Session wie ein Release)
    PointerClicked { event: PointerEvent },
    /// Bild wurde gezeichnet: Statistik auffrischen, Textbox platzieren
    ImageRendered,
    /// Betriebsart des Werkzeugs wechseln
    ToolModeChanged { mode: ToolMode },
    /// Pan/Zoom der Anzeige geändert
    ViewChanged { view: ViewTransform },
    /// Optionen wurden geändert (sofortige Anwendung)
    OptionsChanged { options: RoiOptions },
}
