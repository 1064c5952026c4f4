//! Scripted drawing sessions.
//!
//! A session is the sequence of user inputs one surface receives: button
//! presses, surface clicks, dialog answers. Recording them as data lets the
//! same input stream be replayed against a `ZoneEditor` outside a browser,
//! e.g. to reproduce a reported zone or to seed zones for a camera.

use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::editor::{ClickOutcome, FinishStep, NameOutcome, ZoneEditor};
use crate::geometry::Point;
use crate::occupancy::ZoneThresholds;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum SessionEvent {
    Start,
    Toggle,
    Click { x: i32, y: i32 },
    Finish,
    /// Answer to the name request; `null` declines.
    Name {
        #[serde(default)]
        name: Option<String>,
    },
    Confirm { proceed: bool },
    Cancel,
    Delete { name: String },
    Reset,
    /// Threshold answer; without `value` the suggested one is accepted.
    Threshold {
        zone: String,
        #[serde(default)]
        value: Option<i64>,
    },
    /// Crossing line button.
    Line,
    ClearLine,
}

/// What happened for one event, in order.
#[derive(Clone, Debug, PartialEq)]
pub enum SessionStep {
    Started,
    Cancelled,
    Click(ClickOutcome),
    Finish(FinishStep),
    Named(NameOutcome),
    Deleted { name: String, existed: bool },
    Reset,
    ThresholdSet { zone: String, value: i64 },
    LinePlacement { active: bool },
    LineCleared { existed: bool },
    /// The editor refused the event; state is unchanged.
    Rejected { event: usize, reason: String },
}

pub fn load_script(path: &Path) -> Result<Vec<SessionEvent>> {
    let raw = std::fs::read_to_string(path)
        .map_err(|e| anyhow!("failed to read session script {}: {}", path.display(), e))?;
    serde_json::from_str(&raw)
        .map_err(|e| anyhow!("invalid session script {}: {}", path.display(), e))
}

/// Feed `events` through `editor`. Rejections are recorded, not fatal, the
/// same way the dashboard shows them and keeps going.
pub fn replay(
    editor: &mut ZoneEditor,
    thresholds: &mut ZoneThresholds,
    events: &[SessionEvent],
) -> Vec<SessionStep> {
    let mut steps = Vec::with_capacity(events.len());
    for (idx, event) in events.iter().enumerate() {
        let step = match event {
            SessionEvent::Start => {
                editor.start();
                SessionStep::Started
            }
            SessionEvent::Toggle => {
                editor.toggle();
                if editor.is_drawing() {
                    SessionStep::Started
                } else {
                    SessionStep::Cancelled
                }
            }
            SessionEvent::Click { x, y } => SessionStep::Click(editor.click(Point::new(*x, *y))),
            SessionEvent::Finish => match editor.finish() {
                Ok(step) => SessionStep::Finish(step),
                Err(err) => rejected(idx, err),
            },
            SessionEvent::Name { name } => match editor.submit_name(name.as_deref()) {
                Ok(outcome) => SessionStep::Named(outcome),
                Err(err) => rejected(idx, err),
            },
            SessionEvent::Confirm { proceed } => match editor.confirm(*proceed) {
                Ok(outcome) => SessionStep::Named(outcome),
                Err(err) => rejected(idx, err),
            },
            SessionEvent::Cancel => {
                editor.cancel();
                SessionStep::Cancelled
            }
            SessionEvent::Delete { name } => SessionStep::Deleted {
                name: name.clone(),
                existed: editor.delete_zone(name),
            },
            SessionEvent::Reset => {
                editor.reset();
                SessionStep::Reset
            }
            SessionEvent::Threshold { zone, value } => {
                let value = value.unwrap_or_else(|| thresholds.suggested(zone, editor.config()));
                thresholds.set(zone.clone(), value);
                SessionStep::ThresholdSet {
                    zone: zone.clone(),
                    value,
                }
            }
            SessionEvent::Line => match editor.toggle_line() {
                Ok(active) => SessionStep::LinePlacement { active },
                Err(err) => rejected(idx, err),
            },
            SessionEvent::ClearLine => SessionStep::LineCleared {
                existed: editor.clear_crossing_line().is_some(),
            },
        };
        steps.push(step);
    }
    steps
}

fn rejected(event: usize, err: crate::error::ZoneError) -> SessionStep {
    log::warn!("session event {} rejected: {}", event, err);
    SessionStep::Rejected {
        event,
        reason: err.to_string(),
    }
}
