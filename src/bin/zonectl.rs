//! zonectl - inspect and replay people-counting zones
//!
//! - `validate`: run the advisory geometry checks over a zones file
//! - `count`: per-zone occupancy and alerts for a set of detections
//! - `replay`: feed a recorded drawing session through a zone editor

use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand};
use serde::Deserialize;
use std::io::IsTerminal;
use std::path::{Path, PathBuf};

use crowd_zones::{
    check_zone_alerts, count_people_in_zones, occupancy_level, session, validate_with,
    wire::{AnalyzeResponse, DetectedPerson},
    Surface, ZoneConfig, ZoneEditor, ZoneSet, ZoneThresholds,
};

#[path = "../ui.rs"]
mod ui;

#[derive(Parser, Debug)]
#[command(name = "zonectl", author, version, about)]
struct Args {
    /// Zone config file (JSON).
    #[arg(long, global = true, env = "ZONES_CONFIG")]
    config: Option<PathBuf>,
    /// UI mode for stderr progress (auto|plain|pretty)
    #[arg(long, global = true, default_value = "auto", value_name = "MODE")]
    ui: String,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Check every zone in a zones file and print its warnings
    Validate {
        #[arg(long)]
        zones: PathBuf,
    },
    /// Count detection centres per zone and report threshold alerts
    Count {
        #[arg(long)]
        zones: PathBuf,
        /// Backend analysis response, or a bare array of detections
        #[arg(long)]
        detections: PathBuf,
        #[arg(long)]
        thresholds: Option<PathBuf>,
    },
    /// Replay a recorded drawing session and print the resulting zones
    Replay {
        #[arg(long)]
        script: PathBuf,
        #[arg(long, default_value = "image")]
        surface: String,
    },
}

#[derive(Deserialize)]
#[serde(untagged)]
enum DetectionsFile {
    Response(AnalyzeResponse),
    Bare(Vec<DetectedPerson>),
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    let mode: ui::UiMode = args.ui.parse()?;
    let ui = ui::Ui::new(
        mode,
        std::io::stderr().is_terminal(),
        !std::io::stdout().is_terminal(),
    );

    let config = match &args.config {
        Some(path) => ZoneConfig::load_from(path)?,
        None => ZoneConfig::load()?,
    };

    match args.command {
        Command::Validate { zones } => cmd_validate(&ui, &config, &zones),
        Command::Count {
            zones,
            detections,
            thresholds,
        } => cmd_count(&ui, &config, &zones, &detections, thresholds.as_deref()),
        Command::Replay { script, surface } => cmd_replay(&ui, &config, &script, &surface),
    }
}

fn cmd_validate(ui: &ui::Ui, config: &ZoneConfig, zones_path: &Path) -> Result<()> {
    let zones = read_zones(zones_path)?;
    let mut stage = ui.stage("Validate zones");
    let mut flagged = 0usize;
    let mut report = serde_json::Map::new();
    for (name, points) in zones.iter() {
        let validation = validate_with(name, points, config.min_area);
        if validation.has_warnings() {
            flagged += 1;
        }
        report.insert(name.to_string(), serde_json::to_value(&validation)?);
    }
    stage.detail(format!("{} zones, {} with warnings", zones.len(), flagged));
    drop(stage);

    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

fn cmd_count(
    ui: &ui::Ui,
    config: &ZoneConfig,
    zones_path: &Path,
    detections_path: &Path,
    thresholds_path: Option<&Path>,
) -> Result<()> {
    let zones = read_zones(zones_path)?;
    let centers = {
        let raw = std::fs::read_to_string(detections_path)
            .with_context(|| format!("failed to read {}", detections_path.display()))?;
        match serde_json::from_str::<DetectionsFile>(&raw)
            .map_err(|e| anyhow!("invalid detections file {}: {}", detections_path.display(), e))?
        {
            DetectionsFile::Response(resp) => resp.centers(),
            DetectionsFile::Bare(dets) => dets.iter().map(|d| (d.center[0], d.center[1])).collect(),
        }
    };
    let thresholds: ZoneThresholds = match thresholds_path {
        Some(path) => {
            let raw = std::fs::read_to_string(path)
                .with_context(|| format!("failed to read {}", path.display()))?;
            serde_json::from_str(&raw)
                .map_err(|e| anyhow!("invalid thresholds file {}: {}", path.display(), e))?
        }
        None => ZoneThresholds::new(),
    };

    let mut stage = ui.stage("Count people in zones");
    let counts = count_people_in_zones(&centers, &zones);
    let alerts = check_zone_alerts(&counts, &thresholds, config.high_severity_ratio);
    stage.detail(format!(
        "{} detections, {} zones, {} alerts",
        centers.len(),
        zones.len(),
        alerts.len()
    ));
    drop(stage);

    let mut levels = serde_json::Map::new();
    for (zone, count) in &counts {
        let level = occupancy_level(*count, thresholds.get(zone), config.high_severity_ratio);
        levels.insert(zone.clone(), serde_json::to_value(level)?);
    }
    let out = serde_json::json!({
        "people_count": centers.len(),
        "zone_counts": counts,
        "levels": levels,
        "alerts": alerts,
    });
    println!("{}", serde_json::to_string_pretty(&out)?);
    Ok(())
}

fn cmd_replay(ui: &ui::Ui, config: &ZoneConfig, script: &Path, surface: &str) -> Result<()> {
    let surface: Surface = surface.parse()?;
    let events = session::load_script(script)?;

    let mut editor = ZoneEditor::new(surface, config.clone());
    let mut thresholds = ZoneThresholds::new();
    let mut stage = ui.stage("Replay drawing session");
    let steps = session::replay(&mut editor, &mut thresholds, &events);
    let rejected = steps
        .iter()
        .filter(|step| matches!(step, session::SessionStep::Rejected { .. }))
        .count();
    stage.detail(format!(
        "{} events, {} rejected, {} zones",
        events.len(),
        rejected,
        editor.zone_count()
    ));
    drop(stage);

    if editor.is_drawing() {
        log::warn!(
            "session ended mid-drawing with {} unsaved points",
            editor.draft().len()
        );
    }

    let out = serde_json::json!({
        "surface": surface,
        "zones": editor.zones(),
        "crossing_line": editor.crossing_line(),
        "thresholds": thresholds,
    });
    println!("{}", serde_json::to_string_pretty(&out)?);
    Ok(())
}

fn read_zones(path: &Path) -> Result<ZoneSet> {
    let raw = std::fs::read_to_string(path)
        .map_err(|e| anyhow!("failed to read zones file {}: {}", path.display(), e))?;
    serde_json::from_str(&raw).map_err(|e| anyhow!("invalid zones file {}: {}", path.display(), e))
}
