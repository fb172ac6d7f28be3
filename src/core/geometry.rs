//! Geometrie-Kern der rotierten Ellipse: Enthaltensein-Test und Toleranz-Hit-Test.
//!
//! Die Ellipse wird über drei Kontrollpunkte beschrieben: `start`/`end` spannen
//! die Hauptachse auf, der Senkrecht-Punkt legt über seinen Abstand zum Zentrum
//! den Nebenachsen-Radius fest. Alle Funktionen sind rein (keine Seiteneffekte).

use glam::DVec2;
use serde::{Deserialize, Serialize};

/// Halbachsen einer Ellipse (vor der Rotation).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EllipseRadii {
    /// Radius entlang der (rotierten) x-Achse = Hauptachse
    pub x_radius: f64,
    /// Radius senkrecht zur Hauptachse
    pub y_radius: f64,
}

impl EllipseRadii {
    /// Erstellt ein Radien-Paar.
    pub fn new(x_radius: f64, y_radius: f64) -> Self {
        Self { x_radius, y_radius }
    }

    /// `true` wenn beide Radien strikt positiv sind.
    pub fn is_valid(&self) -> bool {
        self.x_radius > 0.0 && self.y_radius > 0.0
    }

    /// Vergrößert beide Radien um `amount` (negativ = verkleinern).
    pub fn grown_by(&self, amount: f64) -> Self {
        Self::new(self.x_radius + amount, self.y_radius + amount)
    }
}

/// Prüft, ob `point` in der um `theta` rotierten Ellipse um `center` liegt.
///
/// Degenerierte Ellipsen (ein Radius ≤ 0) enthalten keinen Punkt.
///
/// ((X−Cx)·cosθ + (Y−Cy)·sinθ)² / Rx² + ((X−Cx)·sinθ − (Y−Cy)·cosθ)² / Ry² ≤ 1
pub fn point_in_rotated_ellipse(
    ellipse: EllipseRadii,
    center: DVec2,
    point: DVec2,
    theta: f64,
) -> bool {
    ellipse_equation_value(ellipse, center, point, theta).is_some_and(|value| value <= 1.0)
}

/// Linke Seite der Ellipsengleichung (1.0 = exakt auf dem Rand).
///
/// Gibt `None` zurück, wenn die Ellipse degeneriert ist.
pub fn ellipse_equation_value(
    ellipse: EllipseRadii,
    center: DVec2,
    point: DVec2,
    theta: f64,
) -> Option<f64> {
    if !ellipse.is_valid() {
        return None;
    }

    let d = point - center;
    let (sin, cos) = theta.sin_cos();
    let along = d.x * cos + d.y * sin;
    let across = d.x * sin - d.y * cos;

    Some(
        along * along / (ellipse.x_radius * ellipse.x_radius)
            + across * across / (ellipse.y_radius * ellipse.y_radius),
    )
}

/// Mittelpunkt der achsenparallelen Bounding-Box von `start`/`end`.
///
/// Das ist das kanonische Zentrum der ROI, überall wo ein Zentrum gebraucht wird.
pub fn bounding_box_center(start: DVec2, end: DVec2) -> DVec2 {
    let min = start.min(end);
    let size = (start - end).abs();
    min + size / 2.0
}

/// Die drei Kontrollpunkte einer ROI in einem gemeinsamen Koordinatensystem.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EllipseControlPoints {
    /// Erster Endpunkt der Hauptachse
    pub start: DVec2,
    /// Zweiter Endpunkt der Hauptachse
    pub end: DVec2,
    /// Punkt, dessen Abstand zum Zentrum den Nebenachsen-Radius festlegt
    pub perpendicular: DVec2,
}

impl EllipseControlPoints {
    /// Wendet `f` auf alle drei Punkte an (z.B. Bild → Anzeige).
    pub fn map(self, f: impl Fn(DVec2) -> DVec2) -> Self {
        Self {
            start: f(self.start),
            end: f(self.end),
            perpendicular: f(self.perpendicular),
        }
    }

    /// Kanonisches Zentrum (Bounding-Box-Mitte der Hauptachse).
    pub fn center(&self) -> DVec2 {
        bounding_box_center(self.start, self.end)
    }

    /// Leitet die rotierte Ellipse aus den Kontrollpunkten ab.
    pub fn ellipse(&self) -> RotatedEllipse {
        let center = self.center();
        let axis = self.end - self.start;
        RotatedEllipse {
            center,
            radii: EllipseRadii::new(
                axis.length() / 2.0,
                self.perpendicular.distance(center),
            ),
            theta: axis.y.atan2(axis.x),
        }
    }
}

/// Vollständig beschriebene rotierte Ellipse.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RotatedEllipse {
    /// Zentrum
    pub center: DVec2,
    /// Halbachsen
    pub radii: EllipseRadii,
    /// Rotationswinkel der Hauptachse gegen die positive x-Achse (Radiant)
    pub theta: f64,
}

impl RotatedEllipse {
    /// Enthaltensein-Test für diese Ellipse.
    pub fn contains(&self, point: DVec2) -> bool {
        point_in_rotated_ellipse(self.radii, self.center, point, self.theta)
    }

    /// Gleiche Ellipse mit um `amount` vergrößerten Radien.
    pub fn grown_by(&self, amount: f64) -> Self {
        Self {
            radii: self.radii.grown_by(amount),
            ..*self
        }
    }
}

/// Prüft, ob `point` innerhalb des Toleranzbands um die Form liegt.
///
/// Entscheidend ist nur die äußere Ellipse (Radien + `tolerance_px / 2`);
/// ein Punkt im Inneren der Form gilt damit ebenfalls als "nahe".
pub fn point_near_shape(points: &EllipseControlPoints, point: DVec2, tolerance_px: f64) -> bool {
    points.ellipse().grown_by(tolerance_px / 2.0).contains(point)
}

/// Eingabegerät-abhängiges Toleranzprofil für Hit-Tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ToleranceProfile {
    /// Präzise Zeigereingabe (Maus, Stift)
    #[default]
    Pointer,
    /// Grobe Eingabe (Touch)
    Touch,
}

impl ToleranceProfile {
    /// Standard-Toleranzband in Anzeige-Pixeln.
    pub const fn default_tolerance_px(self) -> f64 {
        match self {
            ToleranceProfile::Pointer => 15.0,
            ToleranceProfile::Touch => 25.0,
        }
    }
}
