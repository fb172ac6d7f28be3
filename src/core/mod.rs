//! Core-Domänentypen: Ellipsen-Geometrie, Messungen, Bild-Verträge, Statistik.

pub mod geometry;
pub mod image;
/// Datenmodell einer Messung
///
/// - Measurement: Handles, Cache-Flag und Statistik einer ROI
/// - Handles: start/end/Senkrecht-Punkt plus Textbox
/// - RoiStatistics: Mittelwert, SUV und Fläche
pub mod measurement;
pub mod measurement_store;
pub mod statistics;
pub mod suv;
pub mod view;

pub use geometry::{
    bounding_box_center, ellipse_equation_value, point_in_rotated_ellipse, point_near_shape,
    EllipseControlPoints, EllipseRadii, RotatedEllipse, ToleranceProfile,
};
pub use image::{
    ImageExtent, ImageMeta, LumaImageSource, PixelSource, PixelSpacing, SamplingWindow,
};
pub use measurement::{
    AreaUnit, Handle, HandleKey, Handles, MeanStdDev, Measurement, MeasurementId, RoiStatistics,
    TextBox,
};
pub use measurement_store::MeasurementStore;
pub use statistics::{
    calculate_mean_std_dev, compute_statistics, ellipse_area, suv_statistics, SamplingFootprint,
    StatisticsContext,
};
pub use suv::{calculate_suv, stored_pixel_value, DicomTime, SuvParameters};
pub use view::ViewTransform;
