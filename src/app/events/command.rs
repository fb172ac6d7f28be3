use crate::app::state::ToolMode;
use crate::core::{HandleKey, ImageExtent, MeasurementId, ToleranceProfile, ViewTransform};
use crate::shared::RoiOptions;
use glam::DVec2;

/// Commands sind mutierende Schritte, die zentral ausgeführt werden.
#[derive(Debug, Clone, PartialEq)]
pub enum RoiCommand {
    /// Passiver Hover-Durchlauf über alle Messungen
    UpdateHover {
        image_pos: DVec2,
        display_pos: DVec2,
        profile: ToleranceProfile,
    },
    /// Neue Messung am Press-Punkt anlegen und Create-Session starten
    CreateMeasurement { origin: DVec2, extent: ImageExtent },
    /// Session für ein einzelnes Handle starten
    BeginHandleDrag {
        id: MeasurementId,
        key: HandleKey,
        grab_offset: DVec2,
        extent: ImageExtent,
    },
    /// Session für die ganze Form starten
    BeginShapeDrag {
        id: MeasurementId,
        image_pos: DVec2,
        extent: ImageExtent,
    },
    /// Laufende Session um einen Zeiger-Schritt fortsetzen
    UpdateDrag { image_pos: DVec2 },
    /// Laufende Session beenden (Bounds-Check, Statistik, Benachrichtigung)
    EndDrag,
    /// Statistik sichtbarer Messungen auffrischen
    RefreshStatistics,
    /// Betriebsart setzen
    SetToolMode { mode: ToolMode },
    /// View-Transformation setzen
    SetView { view: ViewTransform },
    /// Optionen übernehmen
    ApplyOptions { options: RoiOptions },
}
