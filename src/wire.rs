//! JSON bodies exchanged with the analysis backend.
//!
//! Transport is the caller's business; these types only fix the shapes.

use serde::{Deserialize, Serialize};

use crate::geometry::CrossingLine;
use crate::occupancy::{ZoneAlert, ZoneCounts, ZoneThresholds};
use crate::zones::ZoneSet;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AnalyzeRequest {
    /// Encoded frame (data URL) for image analysis; absent for stream frames.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    pub zones: ZoneSet,
    /// Set on video and webcam frames once a line has been placed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub crossing_line: Option<CrossingLine>,
    #[serde(default)]
    pub enable_heatmap: bool,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DetectedPerson {
    pub id: u32,
    /// `[x1, y1, x2, y2]` in surface pixels.
    pub bbox: [f64; 4],
    pub center: [f64; 2],
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AnalyzeResponse {
    pub success: bool,
    #[serde(default)]
    pub people_count: u32,
    #[serde(default)]
    pub detections: Vec<DetectedPerson>,
    #[serde(default)]
    pub zone_counts: ZoneCounts,
    #[serde(default)]
    pub alerts: Vec<ZoneAlert>,
    /// People seen crossing the line since the last reset (stream frames only).
    #[serde(default)]
    pub crossed_count: u32,
}

impl AnalyzeResponse {
    pub fn centers(&self) -> Vec<(f64, f64)> {
        self.detections
            .iter()
            .map(|det| (det.center[0], det.center[1]))
            .collect()
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SetThresholdRequest {
    pub zone_name: String,
    pub threshold: i64,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThresholdsResponse {
    pub success: bool,
    #[serde(default)]
    pub thresholds: ZoneThresholds,
}

/// Reply to a crossing counter reset.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResetCrossingsResponse {
    pub success: bool,
    #[serde(default)]
    pub message: String,
}

/// The verbatim `{name: [{x, y}, ...]}` zones body.
pub fn zones_json(zones: &ZoneSet) -> serde_json::Value {
    serde_json::to_value(zones).unwrap_or_else(|_| serde_json::Value::Object(Default::default()))
}
