//! Zustand eines Anzeige-Kontexts: zentrale Datenhaltung.

use super::notifications::{MeasurementEvent, RoiNotification, TOOL_TYPE};
use super::session::{DragSession, HoverGate};
use super::CommandLog;
use crate::core::{
    ImageExtent, ImageMeta, LumaImageSource, MeasurementId, MeasurementStore, PixelSource,
    PixelSpacing, SamplingFootprint, StatisticsContext, SuvParameters, ViewTransform,
};
use crate::shared::RoiOptions;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// Betriebsart des Werkzeugs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ToolMode {
    /// Press ins Leere erstellt eine neue Messung
    #[default]
    Active,
    /// Nur bestehende Messungen bearbeiten
    Passive,
    /// Zeiger-Eingaben ignorieren (auch Hover)
    Disabled,
}

/// Das aktuell angezeigte Bild mit allem, was die Statistik braucht.
#[derive(Clone)]
pub struct ImageContext {
    /// Kennung des Bildes (z.B. Dateipfad oder SOP-UID)
    pub image_id: String,
    /// Pixel-Ausdehnung
    pub extent: ImageExtent,
    /// Modalität, LUT und Farbflag
    pub meta: ImageMeta,
    /// Pixelabstand
    pub spacing: PixelSpacing,
    /// Dosis-Angaben für PT-Bilder
    pub suv: Option<SuvParameters>,
    /// Pixelquelle
    pub pixels: Arc<dyn PixelSource>,
}

impl fmt::Debug for ImageContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ImageContext")
            .field("image_id", &self.image_id)
            .field("extent", &self.extent)
            .field("meta", &self.meta)
            .field("spacing", &self.spacing)
            .field("suv", &self.suv)
            .finish_non_exhaustive()
    }
}

impl ImageContext {
    /// Erstellt einen Kontext ohne Pixelabstand und SUV-Angaben.
    pub fn new(
        image_id: impl Into<String>,
        extent: ImageExtent,
        meta: ImageMeta,
        pixels: Arc<dyn PixelSource>,
    ) -> Self {
        Self {
            image_id: image_id.into(),
            extent,
            meta,
            spacing: PixelSpacing::default(),
            suv: None,
            pixels,
        }
    }

    /// Erstellt einen Kontext über einer 16-Bit-Graustufenquelle.
    pub fn from_luma(
        image_id: impl Into<String>,
        source: LumaImageSource,
        meta: ImageMeta,
    ) -> Self {
        let extent = source.extent();
        Self::new(image_id, extent, meta, Arc::new(source))
    }

    /// Setzt den Pixelabstand.
    pub fn with_spacing(mut self, spacing: PixelSpacing) -> Self {
        self.spacing = spacing;
        self
    }

    /// Setzt die SUV-Angaben.
    pub fn with_suv(mut self, suv: Option<SuvParameters>) -> Self {
        self.suv = suv;
        self
    }

    /// Eingaben der Statistik-Engine für dieses Bild.
    pub fn statistics_context(&self, footprint: SamplingFootprint) -> StatisticsContext<'_> {
        StatisticsContext {
            pixels: self.pixels.as_ref(),
            meta: &self.meta,
            extent: self.extent,
            spacing: self.spacing,
            suv: self.suv.as_ref(),
            footprint,
        }
    }
}

/// Hauptzustand eines Anzeige-Kontexts
pub struct RoiState {
    /// Kennung des Anzeige-Kontexts (in jeder Benachrichtigung)
    pub context_id: String,
    /// Alle Messungen dieses Kontexts
    pub store: MeasurementStore,
    /// Angezeigtes Bild (None = noch keins geladen)
    pub image: Option<ImageContext>,
    /// Pan/Zoom der Anzeige
    pub view: ViewTransform,
    /// Laufzeit-Optionen
    pub options: RoiOptions,
    /// Betriebsart des Werkzeugs
    pub tool_mode: ToolMode,
    /// Laufende Drag-Session
    pub session: Option<DragSession>,
    /// Hover-Sperre (gehalten von der Session)
    pub hover_gate: HoverGate,
    /// Noch nicht abgeholte Benachrichtigungen
    pub notifications: Vec<RoiNotification>,
    /// Neuzeichnen angefordert (zusammengefasst)
    pub redraw_requested: bool,
    /// Verlauf ausgeführter Commands
    pub command_log: CommandLog,
}

impl RoiState {
    /// Erstellt einen leeren Kontext.
    pub fn new(context_id: impl Into<String>) -> Self {
        Self {
            context_id: context_id.into(),
            store: MeasurementStore::new(),
            image: None,
            view: ViewTransform::default(),
            options: RoiOptions::default(),
            tool_mode: ToolMode::default(),
            session: None,
            hover_gate: HoverGate::new(),
            notifications: Vec::new(),
            redraw_requested: false,
            command_log: CommandLog::new(),
        }
    }

    /// Setzt ein neues Bild; alle Messungen müssen neu berechnet werden.
    pub fn set_image(&mut self, image: ImageContext) {
        log::info!(
            "Bild gesetzt: {} ({}×{})",
            image.image_id,
            image.extent.columns,
            image.extent.rows
        );
        self.image = Some(image);
        self.store.invalidate_all();
        self.request_redraw();
    }

    /// Fordert ein Neuzeichnen an.
    pub fn request_redraw(&mut self) {
        self.redraw_requested = true;
    }

    /// Liefert und löscht die Neuzeichnen-Anforderung.
    pub fn take_redraw_request(&mut self) -> bool {
        std::mem::take(&mut self.redraw_requested)
    }

    /// Liefert und leert die ausstehenden Benachrichtigungen.
    pub fn take_notifications(&mut self) -> Vec<RoiNotification> {
        std::mem::take(&mut self.notifications)
    }

    /// ID der Messung in der laufenden Session.
    pub fn session_measurement(&self) -> Option<MeasurementId> {
        self.session.as_ref().map(|s| s.measurement_id)
    }

    fn measurement_event(&self, id: MeasurementId) -> Option<MeasurementEvent> {
        self.store.get(id).map(|measurement| MeasurementEvent {
            context: self.context_id.clone(),
            tool_type: TOOL_TYPE,
            measurement: measurement.clone(),
        })
    }

    /// Meldet eine abgeschlossene Messung.
    pub fn notify_completed(&mut self, id: MeasurementId) {
        if let Some(event) = self.measurement_event(id) {
            self.notifications.push(RoiNotification::MeasurementCompleted(event));
        }
    }

    /// Meldet eine geänderte Messung.
    pub fn notify_modified(&mut self, id: MeasurementId) {
        if let Some(event) = self.measurement_event(id) {
            self.notifications.push(RoiNotification::MeasurementModified(event));
        }
    }
}

impl Default for RoiState {
    fn default() -> Self {
        Self::new("default")
    }
}
