use crate::surface::Surface;

/// Rejected editor operations.
///
/// None of these leave the editor in a partial state: the operation is
/// refused and the current state is kept.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ZoneError {
    /// `finish` was called with no drawing session active.
    NotDrawing,
    /// A zone needs at least three vertices; the draft is kept for more clicks.
    TooFewPoints { count: usize },
    /// `submit_name` without a pending name request.
    NoPendingName,
    /// `confirm` without a pending validation confirmation.
    NoPendingConfirmation,
    /// Crossing lines exist only on video and webcam surfaces.
    LineUnsupported { surface: Surface },
}

impl ZoneError {
    pub fn code(&self) -> &'static str {
        match self {
            Self::NotDrawing => "ZONE_NOT_DRAWING",
            Self::TooFewPoints { .. } => "ZONE_TOO_FEW_POINTS",
            Self::NoPendingName => "ZONE_NO_PENDING_NAME",
            Self::NoPendingConfirmation => "ZONE_NO_PENDING_CONFIRMATION",
            Self::LineUnsupported { .. } => "ZONE_LINE_UNSUPPORTED",
        }
    }
}

impl std::fmt::Display for ZoneError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotDrawing => write!(f, "{}: no zone is being drawn", self.code()),
            Self::TooFewPoints { count } => write!(
                f,
                "{}: a zone must have at least 3 points (have {})",
                self.code(),
                count
            ),
            Self::NoPendingName => write!(f, "{}: no zone is waiting for a name", self.code()),
            Self::NoPendingConfirmation => write!(
                f,
                "{}: no zone is waiting for confirmation",
                self.code()
            ),
            Self::LineUnsupported { surface } => write!(
                f,
                "{}: the {} surface has no crossing line",
                self.code(),
                surface
            ),
        }
    }
}

impl std::error::Error for ZoneError {}
