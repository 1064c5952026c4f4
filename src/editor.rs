//! Interactive zone capture.
//!
//! A `ZoneEditor` turns surface-space clicks into named polygons. Naming and
//! the "keep this zone anyway?" question are explicit states rather than
//! blocking dialogs: `finish` asks for a name, `submit_name` may ask for a
//! confirmation, and `confirm` settles it.
//!
//! Video and webcam editors also place a crossing line with two clicks.
//! While a line is being placed, surface clicks go to the line instead of
//! the zone outline.
//!
//! ```text
//! Idle --start--> Drawing --finish / closure click--> AwaitingName
//!   ^               |                                    |  name, no warnings
//!   |               +--cancel---------------------------+--+--> commit --> Idle
//!   |                                                    |  name, warnings
//!   +------------- declined / cancel -------- AwaitingConfirmation --confirm--> commit
//! ```

use crate::config::ZoneConfig;
use crate::error::ZoneError;
use crate::geometry::{distance, CrossingLine, Point};
use crate::surface::Surface;
use crate::validate::{validate_with, ZoneValidation};
use crate::zones::ZoneSet;

/// Label shown on the in-progress outline.
pub const DRAFT_LABEL: &str = "Drawing...";

/// Label shown next to a placed crossing line.
pub const CROSSING_LINE_LABEL: &str = "Crossing Line";

#[derive(Clone, Debug, PartialEq)]
pub enum EditorState {
    Idle,
    Drawing,
    AwaitingName { suggested: String },
    AwaitingConfirmation { name: String, validation: ZoneValidation },
}

/// Progress of the two-click crossing line placement.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LinePlacement {
    Inactive,
    AwaitingStart,
    AwaitingEnd { start: Point },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InteractionMode {
    Default,
    Crosshair,
}

#[derive(Clone, Debug, PartialEq)]
pub enum ClickOutcome {
    /// Not drawing; the click has no zone meaning.
    Ignored,
    /// Point added to the draft. The caller should redraw.
    Appended { count: usize },
    /// Click landed next to the first vertex and finished the outline.
    Closed(FinishStep),
    /// First end of a crossing line placed; one more click sets it.
    LineStarted(Point),
    /// Crossing line set, replacing any earlier one.
    LineSet(CrossingLine),
}

#[derive(Clone, Debug, PartialEq)]
pub enum FinishStep {
    NameRequired { suggested: String },
}

#[derive(Clone, Debug, PartialEq)]
pub enum NameOutcome {
    /// No name given or the warnings were not accepted. Nothing was stored.
    Declined,
    /// Validation produced warnings; call `confirm` to keep or drop the zone.
    ConfirmationRequired(ZoneValidation),
    Finalized(FinalizedZone),
}

#[derive(Clone, Debug, PartialEq)]
pub struct FinalizedZone {
    pub name: String,
    pub points: Vec<Point>,
    /// An existing zone with the same name was overwritten.
    pub replaced: bool,
    pub validation: ZoneValidation,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ZoneStyle {
    Finalized,
    Draft,
    CrossingLine,
    /// Marker for a line start awaiting its second click.
    LineStart,
}

impl ZoneStyle {
    pub fn fill_rgba(&self) -> (u8, u8, u8, f32) {
        match self {
            Self::Finalized => (0, 255, 0, 0.3),
            Self::Draft => (255, 255, 0, 0.3),
            Self::CrossingLine => (255, 0, 0, 0.0),
            Self::LineStart => (255, 0, 0, 1.0),
        }
    }

    pub fn stroke_hex(&self) -> &'static str {
        match self {
            Self::Finalized => "#00ff00",
            Self::Draft => "#ffff00",
            Self::CrossingLine | Self::LineStart => "#ff0000",
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct OverlayShape {
    pub label: String,
    pub points: Vec<Point>,
    pub style: ZoneStyle,
}

#[derive(Debug, Clone)]
pub struct ZoneEditor {
    surface: Surface,
    config: ZoneConfig,
    state: EditorState,
    draft: Vec<Point>,
    zones: ZoneSet,
    next_index: u32,
    line: LinePlacement,
    crossing_line: Option<CrossingLine>,
}

impl ZoneEditor {
    pub fn new(surface: Surface, config: ZoneConfig) -> Self {
        Self {
            surface,
            config,
            state: EditorState::Idle,
            draft: Vec::new(),
            zones: ZoneSet::new(),
            next_index: 1,
            line: LinePlacement::Inactive,
            crossing_line: None,
        }
    }

    pub fn surface(&self) -> Surface {
        self.surface
    }

    pub fn config(&self) -> &ZoneConfig {
        &self.config
    }

    pub fn state(&self) -> &EditorState {
        &self.state
    }

    /// True for any state between `start` and commit/cancel.
    pub fn is_drawing(&self) -> bool {
        !matches!(self.state, EditorState::Idle)
    }

    pub fn interaction_mode(&self) -> InteractionMode {
        if self.is_drawing() || self.is_placing_line() {
            InteractionMode::Crosshair
        } else {
            InteractionMode::Default
        }
    }

    pub fn draft(&self) -> &[Point] {
        &self.draft
    }

    pub fn zones(&self) -> &ZoneSet {
        &self.zones
    }

    pub fn zone_count(&self) -> usize {
        self.zones.len()
    }

    pub fn line_placement(&self) -> LinePlacement {
        self.line
    }

    pub fn is_placing_line(&self) -> bool {
        self.line != LinePlacement::Inactive
    }

    pub fn crossing_line(&self) -> Option<CrossingLine> {
        self.crossing_line
    }

    /// Name offered when the next zone is finished.
    pub fn suggested_name(&self) -> String {
        format!("{} {}", self.config.name_prefix, self.next_index)
    }

    pub fn start(&mut self) {
        self.abandon_line();
        self.draft.clear();
        self.state = EditorState::Drawing;
        log::debug!("{}: zone drawing started", self.surface);
    }

    /// Draw button behaviour: a second press abandons the session.
    pub fn toggle(&mut self) {
        if self.is_drawing() {
            self.cancel();
        } else {
            self.start();
        }
    }

    pub fn click(&mut self, point: Point) -> ClickOutcome {
        match self.line {
            LinePlacement::AwaitingStart => {
                self.line = LinePlacement::AwaitingEnd { start: point };
                return ClickOutcome::LineStarted(point);
            }
            LinePlacement::AwaitingEnd { start } => {
                let line = CrossingLine { start, end: point };
                self.crossing_line = Some(line);
                self.line = LinePlacement::Inactive;
                log::info!(
                    "{}: crossing line set from ({}, {}) to ({}, {})",
                    self.surface,
                    start.x,
                    start.y,
                    point.x,
                    point.y
                );
                return ClickOutcome::LineSet(line);
            }
            LinePlacement::Inactive => {}
        }

        if self.state != EditorState::Drawing {
            return ClickOutcome::Ignored;
        }

        if let Some(first) = self.draft.first().copied() {
            if self.draft.len() >= 3
                && distance(first, (point.x as f64, point.y as f64)) < self.config.closure_radius
            {
                log::debug!("{}: closure click at ({}, {})", self.surface, point.x, point.y);
                return match self.finish() {
                    Ok(step) => ClickOutcome::Closed(step),
                    // finish only fails below three points, excluded above
                    Err(_) => ClickOutcome::Ignored,
                };
            }
        }

        self.draft.push(point);
        ClickOutcome::Appended {
            count: self.draft.len(),
        }
    }

    /// Abandon the session. Returns false when nothing was in progress.
    pub fn cancel(&mut self) -> bool {
        let was_active = self.is_drawing();
        self.draft.clear();
        self.state = EditorState::Idle;
        if was_active {
            log::debug!("{}: zone drawing cancelled", self.surface);
        }
        was_active
    }

    /// Line button behaviour. Returns whether placement is now active; a
    /// second press abandons a half-placed line and keeps the previous one.
    /// Starting placement ends any zone session.
    pub fn toggle_line(&mut self) -> Result<bool, ZoneError> {
        if !self.surface.has_crossing_line() {
            return Err(ZoneError::LineUnsupported {
                surface: self.surface,
            });
        }
        if self.is_placing_line() {
            self.abandon_line();
            return Ok(false);
        }
        self.cancel();
        self.line = LinePlacement::AwaitingStart;
        log::debug!("{}: crossing line placement started", self.surface);
        Ok(true)
    }

    pub fn clear_crossing_line(&mut self) -> Option<CrossingLine> {
        self.abandon_line();
        self.crossing_line.take()
    }

    fn abandon_line(&mut self) {
        if self.is_placing_line() {
            self.line = LinePlacement::Inactive;
            log::debug!("{}: crossing line placement abandoned", self.surface);
        }
    }

    pub fn finish(&mut self) -> Result<FinishStep, ZoneError> {
        if self.state != EditorState::Drawing {
            return Err(ZoneError::NotDrawing);
        }
        if self.draft.len() < 3 {
            let err = ZoneError::TooFewPoints {
                count: self.draft.len(),
            };
            log::warn!("{}: {}", self.surface, err);
            return Err(err);
        }
        let suggested = self.suggested_name();
        self.state = EditorState::AwaitingName {
            suggested: suggested.clone(),
        };
        Ok(FinishStep::NameRequired { suggested })
    }

    pub fn submit_name(&mut self, name: Option<&str>) -> Result<NameOutcome, ZoneError> {
        if !matches!(self.state, EditorState::AwaitingName { .. }) {
            return Err(ZoneError::NoPendingName);
        }

        let name = match name.map(str::trim).filter(|name| !name.is_empty()) {
            Some(name) => name.to_string(),
            None => {
                self.cancel();
                return Ok(NameOutcome::Declined);
            }
        };

        let validation = validate_with(&name, &self.draft, self.config.min_area);
        if validation.has_warnings() {
            self.state = EditorState::AwaitingConfirmation {
                name,
                validation: validation.clone(),
            };
            return Ok(NameOutcome::ConfirmationRequired(validation));
        }

        Ok(NameOutcome::Finalized(self.commit(name, validation)))
    }

    pub fn confirm(&mut self, proceed: bool) -> Result<NameOutcome, ZoneError> {
        let (name, validation) = match std::mem::replace(&mut self.state, EditorState::Idle) {
            EditorState::AwaitingConfirmation { name, validation } => (name, validation),
            other => {
                self.state = other;
                return Err(ZoneError::NoPendingConfirmation);
            }
        };

        if !proceed {
            self.draft.clear();
            log::debug!("{}: zone '{}' discarded after warnings", self.surface, name);
            return Ok(NameOutcome::Declined);
        }

        Ok(NameOutcome::Finalized(self.commit(name, validation)))
    }

    fn commit(&mut self, name: String, validation: ZoneValidation) -> FinalizedZone {
        let points = std::mem::take(&mut self.draft);
        let replaced = self.zones.insert(name.clone(), points.clone()).is_some();
        self.next_index += 1;
        self.state = EditorState::Idle;
        log::info!(
            "{}: zone '{}' saved with {} points{}",
            self.surface,
            name,
            points.len(),
            if replaced { " (replaced existing)" } else { "" }
        );
        FinalizedZone {
            name,
            points,
            replaced,
            validation,
        }
    }

    pub fn delete_zone(&mut self, name: &str) -> bool {
        let removed = self.zones.remove(name).is_some();
        if removed {
            log::info!("{}: zone '{}' deleted", self.surface, name);
        }
        removed
    }

    /// Drop every zone, the crossing line and any session; naming restarts at 1.
    pub fn reset(&mut self) {
        self.zones.clear();
        self.crossing_line = None;
        self.line = LinePlacement::Inactive;
        self.draft.clear();
        self.state = EditorState::Idle;
        self.next_index = 1;
        log::info!("{}: zones reset", self.surface);
    }

    /// Shapes to paint: finalized zones in display order, the draft, the
    /// crossing line, then a pending line start.
    pub fn overlay(&self) -> Vec<OverlayShape> {
        let mut shapes: Vec<OverlayShape> = self
            .zones
            .iter()
            .map(|(name, points)| OverlayShape {
                label: name.to_string(),
                points: points.to_vec(),
                style: ZoneStyle::Finalized,
            })
            .collect();
        if !self.draft.is_empty() {
            shapes.push(OverlayShape {
                label: DRAFT_LABEL.to_string(),
                points: self.draft.clone(),
                style: ZoneStyle::Draft,
            });
        }
        if let Some(line) = self.crossing_line {
            shapes.push(OverlayShape {
                label: CROSSING_LINE_LABEL.to_string(),
                points: vec![line.start, line.end],
                style: ZoneStyle::CrossingLine,
            });
        }
        if let LinePlacement::AwaitingEnd { start } = self.line {
            shapes.push(OverlayShape {
                label: String::new(),
                points: vec![start],
                style: ZoneStyle::LineStart,
            });
        }
        shapes
    }
}
