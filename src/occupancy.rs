//! Per-zone people counts and threshold alerts.

use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::config::ZoneConfig;
use crate::geometry::point_in_polygon;
use crate::zones::ZoneSet;

/// Zone name to count, one entry per zone (zero when empty).
pub type ZoneCounts = BTreeMap<String, u32>;

/// Occupancy alert thresholds keyed by zone name.
///
/// Kept apart from the polygons: a threshold may be set before the zone is
/// drawn and survives the zone's deletion.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ZoneThresholds {
    thresholds: BTreeMap<String, i64>,
}

impl ZoneThresholds {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, zone: impl Into<String>, threshold: i64) -> Option<i64> {
        self.thresholds.insert(zone.into(), threshold)
    }

    pub fn get(&self, zone: &str) -> Option<i64> {
        self.thresholds.get(zone).copied()
    }

    /// Value pre-filled when asking for a zone's threshold: the current one,
    /// else the configured default.
    pub fn suggested(&self, zone: &str, config: &ZoneConfig) -> i64 {
        self.get(zone).unwrap_or(config.default_threshold)
    }

    pub fn remove(&mut self, zone: &str) -> Option<i64> {
        self.thresholds.remove(zone)
    }

    /// Apply a backend reply; keys present in `other` win.
    pub fn merge(&mut self, other: ZoneThresholds) {
        self.thresholds.extend(other.thresholds);
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, i64)> {
        self.thresholds.iter().map(|(name, t)| (name.as_str(), *t))
    }

    pub fn len(&self) -> usize {
        self.thresholds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.thresholds.is_empty()
    }
}

/// Parse a threshold typed by the user.
pub fn parse_threshold(input: &str) -> Result<i64> {
    let trimmed = input.trim();
    trimmed
        .parse::<i64>()
        .map_err(|_| anyhow!("threshold must be a whole number of people, got '{}'", trimmed))
}

pub fn count_people_in_zones(centers: &[(f64, f64)], zones: &ZoneSet) -> ZoneCounts {
    let mut counts: ZoneCounts = zones.names().map(|name| (name.to_string(), 0)).collect();
    for &(x, y) in centers {
        for (name, points) in zones.iter() {
            if point_in_polygon(x, y, points) {
                if let Some(count) = counts.get_mut(name) {
                    *count += 1;
                }
            }
        }
    }
    counts
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertSeverity {
    Medium,
    High,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ZoneAlert {
    pub zone: String,
    pub current: u32,
    pub threshold: i64,
    pub message: String,
    pub severity: AlertSeverity,
}

impl ZoneAlert {
    /// Identity used to suppress repeats of the same alert.
    pub fn dedup_key(&self) -> String {
        format!("{}-{}", self.zone, self.current)
    }
}

pub fn check_zone_alerts(
    counts: &ZoneCounts,
    thresholds: &ZoneThresholds,
    high_ratio: f64,
) -> Vec<ZoneAlert> {
    let mut alerts = Vec::new();
    for (zone, &count) in counts {
        let Some(threshold) = thresholds.get(zone) else {
            continue;
        };
        if (count as i64) <= threshold {
            continue;
        }
        let severity = if count as f64 > threshold as f64 * high_ratio {
            AlertSeverity::High
        } else {
            AlertSeverity::Medium
        };
        log::warn!("zone '{}' over threshold: {}/{}", zone, count, threshold);
        alerts.push(ZoneAlert {
            zone: zone.clone(),
            current: count,
            threshold,
            message: format!("{} exceeded threshold! ({}/{})", zone, count, threshold),
            severity,
        });
    }
    alerts
}

/// Colour band for a zone's bar in the occupancy chart.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OccupancyLevel {
    Normal,
    Elevated,
    Critical,
}

pub fn occupancy_level(count: u32, threshold: Option<i64>, high_ratio: f64) -> OccupancyLevel {
    match threshold {
        Some(t) if count as f64 > t as f64 * high_ratio => OccupancyLevel::Critical,
        Some(t) if count as i64 > t => OccupancyLevel::Elevated,
        _ => OccupancyLevel::Normal,
    }
}
