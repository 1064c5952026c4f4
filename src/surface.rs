use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::config::ZoneConfig;
use crate::editor::ZoneEditor;

/// A visual surface zones are drawn on. Each surface has its own pixel space
/// and its own zone collection.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Surface {
    Image,
    Video,
    Webcam,
}

impl Surface {
    pub const ALL: [Surface; 3] = [Surface::Image, Surface::Video, Surface::Webcam];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Image => "image",
            Self::Video => "video",
            Self::Webcam => "webcam",
        }
    }

    /// Stream surfaces also carry a crossing line; still images do not.
    pub fn has_crossing_line(&self) -> bool {
        matches!(self, Self::Video | Self::Webcam)
    }
}

impl std::fmt::Display for Surface {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Surface {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "image" => Ok(Self::Image),
            "video" => Ok(Self::Video),
            "webcam" => Ok(Self::Webcam),
            other => Err(anyhow!(
                "unknown surface '{}': expected 'image', 'video' or 'webcam'",
                other
            )),
        }
    }
}

/// One independent editor per surface.
#[derive(Debug, Clone)]
pub struct SurfaceEditors {
    image: ZoneEditor,
    video: ZoneEditor,
    webcam: ZoneEditor,
}

impl SurfaceEditors {
    pub fn new(config: &ZoneConfig) -> Self {
        Self {
            image: ZoneEditor::new(Surface::Image, config.clone()),
            video: ZoneEditor::new(Surface::Video, config.clone()),
            webcam: ZoneEditor::new(Surface::Webcam, config.clone()),
        }
    }

    pub fn editor(&self, surface: Surface) -> &ZoneEditor {
        match surface {
            Surface::Image => &self.image,
            Surface::Video => &self.video,
            Surface::Webcam => &self.webcam,
        }
    }

    pub fn editor_mut(&mut self, surface: Surface) -> &mut ZoneEditor {
        match surface {
            Surface::Image => &mut self.image,
            Surface::Video => &mut self.video,
            Surface::Webcam => &mut self.webcam,
        }
    }

    /// Surfaces with a drawing session in progress.
    pub fn active(&self) -> Vec<Surface> {
        Surface::ALL
            .into_iter()
            .filter(|surface| self.editor(*surface).is_drawing())
            .collect()
    }
}

impl Default for SurfaceEditors {
    fn default() -> Self {
        Self::new(&ZoneConfig::default())
    }
}
