//! Ellipse-ROI Library.
//!
//! Rotierte elliptische Messregion für 2D-Bildbetrachter: Geometrie,
//! Hit-Tests, Drag-Interaktion und Statistik (Mittelwert, Fläche, SUV).

pub mod app;
pub mod core;
pub mod shared;

pub use app::{
    ImageContext, InputDevice, MeasurementEvent, PointerEvent, PointerPoints, RoiCommand,
    RoiController, RoiIntent, RoiNotification, RoiState, ToolMode, TOOL_TYPE,
};
pub use core::{
    compute_statistics, point_in_rotated_ellipse, point_near_shape, DicomTime, EllipseRadii,
    HandleKey, ImageExtent, ImageMeta, LumaImageSource, Measurement, MeasurementId,
    MeasurementStore, PixelSource, PixelSpacing, RoiStatistics, SamplingFootprint,
    SuvParameters, ToleranceProfile, ViewTransform,
};
pub use shared::RoiOptions;
