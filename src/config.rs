use anyhow::{anyhow, Result};
use serde::Deserialize;
use std::path::Path;

pub const DEFAULT_CLOSURE_RADIUS: f64 = 20.0;
pub const DEFAULT_MIN_AREA: f64 = 100.0;
pub const DEFAULT_NAME_PREFIX: &str = "Zone";
pub const DEFAULT_HIGH_SEVERITY_RATIO: f64 = 1.5;
pub const DEFAULT_THRESHOLD: i64 = 10;

#[derive(Debug, Deserialize, Default)]
struct ZoneConfigFile {
    drawing: Option<DrawingConfigFile>,
    validation: Option<ValidationConfigFile>,
    alerts: Option<AlertConfigFile>,
}

#[derive(Debug, Deserialize, Default)]
struct DrawingConfigFile {
    closure_radius: Option<f64>,
    name_prefix: Option<String>,
}

#[derive(Debug, Deserialize, Default)]
struct ValidationConfigFile {
    min_area: Option<f64>,
}

#[derive(Debug, Deserialize, Default)]
struct AlertConfigFile {
    high_severity_ratio: Option<f64>,
    default_threshold: Option<i64>,
}

/// Tunables for zone drawing, validation and occupancy alerts.
#[derive(Debug, Clone, PartialEq)]
pub struct ZoneConfig {
    /// A click closer than this to the first vertex closes the polygon.
    pub closure_radius: f64,
    /// Areas below this (px²) produce a validation warning.
    pub min_area: f64,
    /// Prefix of suggested zone names ("Zone 1", "Zone 2", ...).
    pub name_prefix: String,
    /// Counts above `threshold * high_severity_ratio` raise high severity alerts.
    pub high_severity_ratio: f64,
    /// Threshold suggested when none has been set for a zone.
    pub default_threshold: i64,
}

impl Default for ZoneConfig {
    fn default() -> Self {
        Self {
            closure_radius: DEFAULT_CLOSURE_RADIUS,
            min_area: DEFAULT_MIN_AREA,
            name_prefix: DEFAULT_NAME_PREFIX.to_string(),
            high_severity_ratio: DEFAULT_HIGH_SEVERITY_RATIO,
            default_threshold: DEFAULT_THRESHOLD,
        }
    }
}

impl ZoneConfig {
    /// Defaults, then the JSON file named by `ZONES_CONFIG`, then `ZONES_*` env overrides.
    pub fn load() -> Result<Self> {
        let config_path = std::env::var("ZONES_CONFIG").ok();
        let file_cfg = match config_path.as_deref() {
            Some(path) => Some(read_config_file(Path::new(path))?),
            None => None,
        };
        let mut cfg = Self::from_file(file_cfg.unwrap_or_default());
        cfg.apply_env()?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Load from an explicit file path, still honouring env overrides.
    pub fn load_from(path: &Path) -> Result<Self> {
        let mut cfg = Self::from_file(read_config_file(path)?);
        cfg.apply_env()?;
        cfg.validate()?;
        Ok(cfg)
    }

    fn from_file(file: ZoneConfigFile) -> Self {
        let defaults = Self::default();
        let closure_radius = file
            .drawing
            .as_ref()
            .and_then(|drawing| drawing.closure_radius)
            .unwrap_or(defaults.closure_radius);
        let name_prefix = file
            .drawing
            .and_then(|drawing| drawing.name_prefix)
            .unwrap_or(defaults.name_prefix);
        let min_area = file
            .validation
            .and_then(|validation| validation.min_area)
            .unwrap_or(defaults.min_area);
        let high_severity_ratio = file
            .alerts
            .as_ref()
            .and_then(|alerts| alerts.high_severity_ratio)
            .unwrap_or(defaults.high_severity_ratio);
        let default_threshold = file
            .alerts
            .and_then(|alerts| alerts.default_threshold)
            .unwrap_or(defaults.default_threshold);
        Self {
            closure_radius,
            min_area,
            name_prefix,
            high_severity_ratio,
            default_threshold,
        }
    }

    fn apply_env(&mut self) -> Result<()> {
        if let Some(radius) = env_f64("ZONES_CLOSURE_RADIUS")? {
            self.closure_radius = radius;
        }
        if let Some(area) = env_f64("ZONES_MIN_AREA")? {
            self.min_area = area;
        }
        if let Ok(prefix) = std::env::var("ZONES_NAME_PREFIX") {
            if !prefix.trim().is_empty() {
                self.name_prefix = prefix.trim().to_string();
            }
        }
        if let Some(ratio) = env_f64("ZONES_HIGH_RATIO")? {
            self.high_severity_ratio = ratio;
        }
        if let Ok(threshold) = std::env::var("ZONES_DEFAULT_THRESHOLD") {
            if !threshold.trim().is_empty() {
                self.default_threshold = threshold.trim().parse().map_err(|_| {
                    anyhow!("ZONES_DEFAULT_THRESHOLD must be an integer number of people")
                })?;
            }
        }
        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        if !(self.closure_radius.is_finite() && self.closure_radius > 0.0) {
            return Err(anyhow!("closure radius must be a positive number"));
        }
        if !(self.min_area.is_finite() && self.min_area >= 0.0) {
            return Err(anyhow!("minimum zone area must not be negative"));
        }
        if self.name_prefix.trim().is_empty() {
            return Err(anyhow!("zone name prefix must not be empty"));
        }
        if !(self.high_severity_ratio.is_finite() && self.high_severity_ratio >= 1.0) {
            return Err(anyhow!("high severity ratio must be at least 1.0"));
        }
        Ok(())
    }
}

fn read_config_file(path: &Path) -> Result<ZoneConfigFile> {
    let raw = std::fs::read_to_string(path)
        .map_err(|e| anyhow!("failed to read config file {}: {}", path.display(), e))?;
    let cfg = serde_json::from_str(&raw)
        .map_err(|e| anyhow!("invalid config file {}: {}", path.display(), e))?;
    Ok(cfg)
}

fn env_f64(key: &str) -> Result<Option<f64>> {
    match std::env::var(key) {
        Ok(value) if !value.trim().is_empty() => value
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| anyhow!("{} must be a number", key)),
        _ => Ok(None),
    }
}
