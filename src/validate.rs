//! Advisory zone validation.
//!
//! Validation never rejects a zone. It reports warnings that the caller
//! surfaces to the user, who decides whether to keep the zone anyway. The
//! only hard requirement (three vertices) is enforced by the editor when a
//! drawing is finished.

use serde::Serialize;

use crate::config::DEFAULT_MIN_AREA;
use crate::geometry::{point_in_polygon, polygon_area, vertex_centroid, Point};

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ValidationWarning {
    TooFewPoints { count: usize },
    AreaTooSmall { area: f64 },
    /// Vertex-mean centroid falls outside the outline, usually a
    /// self-intersecting or strongly concave shape.
    CentroidOutside { x: f64, y: f64 },
}

impl std::fmt::Display for ValidationWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::TooFewPoints { count } => write!(f, "zone has less than 3 points ({})", count),
            Self::AreaTooSmall { area } => write!(f, "zone area is very small ({} px²)", area),
            Self::CentroidOutside { x, y } => write!(
                f,
                "zone centroid ({}, {}) is not inside the polygon",
                x.round(),
                y.round()
            ),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ZoneValidation {
    /// Always true: warnings are advisory.
    pub ok: bool,
    pub warnings: Vec<ValidationWarning>,
}

impl ZoneValidation {
    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }
}

pub fn validate(name: &str, points: &[Point]) -> ZoneValidation {
    validate_with(name, points, DEFAULT_MIN_AREA)
}

pub fn validate_with(name: &str, points: &[Point], min_area: f64) -> ZoneValidation {
    let mut warnings = Vec::new();

    if points.len() < 3 {
        warnings.push(ValidationWarning::TooFewPoints {
            count: points.len(),
        });
    } else {
        let area = polygon_area(points);
        log::debug!("zone '{}' area: {} px²", name, area);
        if area < min_area {
            warnings.push(ValidationWarning::AreaTooSmall { area });
        }

        if let Some((cx, cy)) = vertex_centroid(points) {
            let inside = point_in_polygon(cx, cy, points);
            log::debug!(
                "zone '{}' centroid ({:.1}, {:.1}) inside: {}",
                name,
                cx,
                cy,
                inside
            );
            if !inside {
                warnings.push(ValidationWarning::CentroidOutside { x: cx, y: cy });
            }
        }
    }

    for warning in &warnings {
        log::warn!("zone '{}': {}", name, warning);
    }

    ZoneValidation { ok: true, warnings }
}
