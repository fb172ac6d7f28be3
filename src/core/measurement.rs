//! Datenmodell einer rotierten Ellipsen-ROI: Handles, abgeleitete Werte, Cache-Flags.

use super::geometry::{bounding_box_center, EllipseControlPoints};
use glam::DVec2;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Stabile ID einer Messung innerhalb ihres Containers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct MeasurementId(pub u64);

impl fmt::Display for MeasurementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Welches Geometrie-Handle ist gemeint?
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HandleKey {
    /// Erster Endpunkt der Hauptachse
    Start,
    /// Zweiter Endpunkt der Hauptachse
    End,
    /// Senkrecht-Punkt (Nebenachsen-Radius)
    Perpendicular,
}

impl HandleKey {
    /// Alle Geometrie-Handles in Hit-Test-Reihenfolge.
    pub const ALL: [HandleKey; 3] = [HandleKey::Start, HandleKey::End, HandleKey::Perpendicular];
}

/// Ein verschiebbarer Kontrollpunkt in Bild-Koordinaten.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Handle {
    /// Position in Bild-Koordinaten
    pub position: DVec2,
    /// Hervorgehoben zeichnen
    pub highlight: bool,
    /// Wird gerade gezogen bzw. liegt unter dem Zeiger
    pub active: bool,
}

impl Handle {
    fn at(position: DVec2, active: bool) -> Self {
        Self {
            position,
            highlight: true,
            active,
        }
    }
}

/// Anker und Flags der Textbox; Layout und Inhalt gehören der Darstellung.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextBox {
    /// Ankerpunkt in Bild-Koordinaten (None = noch nie platziert)
    pub anchor: Option<DVec2>,
    /// Liegt unter dem Zeiger
    pub active: bool,
    /// Vom Benutzer verschoben; Standard-Platzierung entfällt dann
    pub has_moved: bool,
    /// Wird beim Verschieben der ganzen Form nicht mitbewegt
    pub moves_independently: bool,
    /// Wird unabhängig von den Handles gezeichnet
    pub drawn_independently: bool,
    /// Darf außerhalb des Bildes liegen (zählt nicht für den Bounds-Check)
    pub allowed_outside_image: bool,
    /// Hat eine eigene Bounding-Box für Hit-Tests
    pub has_bounding_box: bool,
}

impl Default for TextBox {
    fn default() -> Self {
        Self {
            anchor: None,
            active: false,
            has_moved: false,
            moves_independently: false,
            drawn_independently: true,
            allowed_outside_image: true,
            has_bounding_box: true,
        }
    }
}

/// Die drei Geometrie-Handles plus Textbox-Anker.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Handles {
    /// Erster Endpunkt der Hauptachse
    pub start: Handle,
    /// Zweiter Endpunkt der Hauptachse
    pub end: Handle,
    /// Senkrecht-Punkt
    pub perpendicular: Handle,
    /// `true` solange der Senkrecht-Punkt bei der Erstellung noch nicht finalisiert ist
    pub perpendicular_is_first: bool,
    /// Textbox-Anker
    pub text_box: TextBox,
}

impl Handles {
    /// Handle nach Schlüssel.
    pub fn get(&self, key: HandleKey) -> &Handle {
        match key {
            HandleKey::Start => &self.start,
            HandleKey::End => &self.end,
            HandleKey::Perpendicular => &self.perpendicular,
        }
    }

    /// Mutables Handle nach Schlüssel.
    pub fn get_mut(&mut self, key: HandleKey) -> &mut Handle {
        match key {
            HandleKey::Start => &mut self.start,
            HandleKey::End => &mut self.end,
            HandleKey::Perpendicular => &mut self.perpendicular,
        }
    }

    /// Iteriert über alle Geometrie-Handles in Hit-Test-Reihenfolge.
    pub fn iter(&self) -> impl Iterator<Item = (HandleKey, &Handle)> {
        HandleKey::ALL.into_iter().map(move |key| (key, self.get(key)))
    }

    /// Nächstes Geometrie-Handle innerhalb von `radius` um `point`.
    ///
    /// Bei gleichem Abstand gewinnt die Hit-Test-Reihenfolge.
    pub fn nearest_within(&self, point: DVec2, radius: f64) -> Option<HandleKey> {
        self.iter()
            .map(|(key, handle)| (key, handle.position.distance(point)))
            .filter(|(_, distance)| *distance <= radius)
            .fold(None, |best: Option<(HandleKey, f64)>, (key, distance)| match best {
                Some((_, best_distance)) if best_distance <= distance => best,
                _ => Some((key, distance)),
            })
            .map(|(key, _)| key)
    }

    /// Kanonisches Zentrum: Mitte der achsenparallelen Bounding-Box von start/end.
    pub fn center(&self) -> DVec2 {
        bounding_box_center(self.start.position, self.end.position)
    }

    /// Kontrollpunkte in Bild-Koordinaten.
    pub fn control_points(&self) -> EllipseControlPoints {
        EllipseControlPoints {
            start: self.start.position,
            end: self.end.position,
            perpendicular: self.perpendicular.position,
        }
    }

    /// Standard-Anker der Textbox: rechter Rand der Achse auf halber Höhe.
    pub fn default_text_box_anchor(&self) -> DVec2 {
        DVec2::new(
            self.start.position.x.max(self.end.position.x),
            (self.start.position.y + self.end.position.y) / 2.0,
        )
    }

    /// Punkte, zu denen die Darstellung die Verbindungslinie der Textbox zieht.
    pub fn text_box_link_points(&self) -> [DVec2; 3] {
        [
            self.start.position,
            self.end.position,
            self.perpendicular.position,
        ]
    }
}

/// Mittelwert und Populations-Standardabweichung einer Messwertreihe.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MeanStdDev {
    /// Anzahl ausgewerteter Samples
    pub count: usize,
    /// Arithmetisches Mittel
    pub mean: f64,
    /// Populations-Standardabweichung
    pub std_dev: f64,
}

impl MeanStdDev {
    /// `true` wenn Mittelwert und Standardabweichung endlich sind.
    pub fn is_finite(&self) -> bool {
        self.mean.is_finite() && self.std_dev.is_finite()
    }
}

/// Einheit der Flächenangabe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AreaUnit {
    /// Physikalische Fläche (beide Pixelabstände bekannt)
    SquareMillimeters,
    /// Rohe Pixelfläche
    SquarePixels,
}

impl AreaUnit {
    /// Anzeige-Label der Einheit.
    pub fn label(self) -> &'static str {
        match self {
            AreaUnit::SquareMillimeters => "mm²",
            AreaUnit::SquarePixels => "pixels²",
        }
    }
}

impl fmt::Display for AreaUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Zwischengespeicherte Statistik einer Messung.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct RoiStatistics {
    /// Mittelwert/Standardabweichung der Intensitäten (fehlt bei Farbbildern)
    pub mean_std_dev: Option<MeanStdDev>,
    /// SUV-normierte Werte (nur PT mit vollständigen Dosis-Angaben)
    pub mean_std_dev_suv: Option<MeanStdDev>,
    /// Fläche in `unit`
    pub area: Option<f64>,
    /// Einheit der Fläche
    pub unit: Option<AreaUnit>,
}

/// Eine rotierte Ellipsen-ROI.
#[derive(Debug, Clone, PartialEq)]
pub struct Measurement {
    /// ID im besitzenden Container
    pub id: MeasurementId,
    /// Wird gezeichnet und ist per Hit-Test erreichbar
    pub visible: bool,
    /// Liegt unter dem Zeiger bzw. ist ausgewählt
    pub active: bool,
    /// Geometrie seit der letzten Statistik-Berechnung geändert
    pub invalidated: bool,
    /// Persistierter Abstand Zentrum → Senkrecht-Punkt
    pub shortest_distance: f64,
    /// Kontrollpunkte und Textbox
    pub handles: Handles,
    /// Statistik-Cache (gültig solange `invalidated == false`)
    pub stats: RoiStatistics,
}

impl Measurement {
    /// Erstellt eine neue Messung mit allen Handles am Ursprungspunkt.
    ///
    /// `end` und der Senkrecht-Punkt sind aktiv, da der Benutzer sie noch zieht.
    pub fn new(id: MeasurementId, origin: DVec2) -> Self {
        Self {
            id,
            visible: true,
            active: true,
            invalidated: true,
            shortest_distance: 0.0,
            handles: Handles {
                start: Handle::at(origin, false),
                end: Handle::at(origin, true),
                perpendicular: Handle::at(origin, true),
                perpendicular_is_first: true,
                text_box: TextBox::default(),
            },
            stats: RoiStatistics::default(),
        }
    }

    /// Kanonisches Zentrum der Form.
    pub fn center(&self) -> DVec2 {
        self.handles.center()
    }

    /// Markiert den Statistik-Cache als ungültig.
    pub fn invalidate(&mut self) {
        self.invalidated = true;
    }

    /// Setzt den Textbox-Anker auf die Standard-Platzierung, sofern nicht verschoben.
    pub fn place_text_box(&mut self) {
        if !self.handles.text_box.has_moved {
            self.handles.text_box.anchor = Some(self.handles.default_text_box_anchor());
        }
    }
}
