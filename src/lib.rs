//! Crowd Zones
//!
//! Zone capture and occupancy evaluation for a people-counting dashboard.
//!
//! # Architecture
//!
//! Operators outline regions of interest ("zones") on one of three surfaces:
//! an uploaded image, a video frame, or a webcam frame. Each surface owns an
//! independent `ZoneEditor` that turns clicks into named polygons, and the
//! finished zone set is sent to a remote inference backend that counts
//! people per zone.
//!
//! The crate holds no vision code and no transport. It owns:
//!
//! 1. **Capture**: the click/close/name/confirm state machine, plus the
//!    two-click crossing line on video and webcam frames.
//! 2. **Geometry**: shoelace area, vertex-mean centroid, even-odd containment.
//! 3. **Validation**: advisory warnings; only a vertex count below three blocks a zone.
//! 4. **Occupancy**: per-zone counts for detection centres and threshold alerts.
//!
//! # Module Structure
//!
//! - `editor`: `ZoneEditor` state machine and overlay description
//! - `geometry`, `validate`: polygon maths and zone checks
//! - `zones`: ordered `ZoneSet` with the backend JSON shape
//! - `surface`: surface identifiers and per-surface editors
//! - `occupancy`, `wire`: counting, alerts and backend bodies
//! - `session`: recorded input streams replayed against an editor

pub mod config;
pub mod coords;
pub mod editor;
pub mod error;
pub mod geometry;
pub mod occupancy;
pub mod session;
pub mod surface;
pub mod validate;
pub mod wire;
pub mod zones;

pub use config::ZoneConfig;
pub use coords::SurfaceMapping;
pub use editor::{
    ClickOutcome, EditorState, FinalizedZone, FinishStep, InteractionMode, LinePlacement,
    NameOutcome, OverlayShape, ZoneEditor, ZoneStyle, CROSSING_LINE_LABEL, DRAFT_LABEL,
};
pub use error::ZoneError;
pub use geometry::{
    distance, point_in_polygon, polygon_area, vertex_centroid, CrossingLine, Point,
};
pub use occupancy::{
    check_zone_alerts, count_people_in_zones, occupancy_level, parse_threshold, AlertSeverity,
    OccupancyLevel, ZoneAlert, ZoneCounts, ZoneThresholds,
};
pub use surface::{Surface, SurfaceEditors};
pub use validate::{validate, validate_with, ValidationWarning, ZoneValidation};
pub use zones::ZoneSet;
