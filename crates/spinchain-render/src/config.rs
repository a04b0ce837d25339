//! Render settings.

use serde::{Deserialize, Serialize};

use crate::error::{RenderError, RenderResult};

/// Smallest canvas edge that still leaves room for both panels.
const MIN_EDGE: u32 = 160;

/// Canvas size, frame rate and what to plot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Frame width in pixels.
    pub width: u32,
    /// Frame height in pixels.
    pub height: u32,
    /// Playback rate in frames per second.
    pub fps: u32,
    /// Site whose ⟨Z⟩ history is plotted.
    pub tracked_qubit: usize,
    /// Right end of the time axis; the trajectory's duration when unset.
    pub total_time: Option<f64>,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            width: 800,
            height: 640,
            fps: 15,
            tracked_qubit: 0,
            total_time: None,
        }
    }
}

impl RenderConfig {
    /// Reject settings no frame can be drawn with.
    pub fn validate(&self) -> RenderResult<()> {
        if self.width < MIN_EDGE || self.height < MIN_EDGE {
            return Err(RenderError::InvalidConfig(format!(
                "canvas {}x{} is smaller than {MIN_EDGE}x{MIN_EDGE}",
                self.width, self.height
            )));
        }
        if self.fps == 0 {
            return Err(RenderError::InvalidConfig("fps must be at least 1".into()));
        }
        if let Some(t) = self.total_time {
            if !t.is_finite() || t <= 0.0 {
                return Err(RenderError::InvalidConfig(format!(
                    "total_time must be finite and positive, got {t}"
                )));
            }
        }
        Ok(())
    }

    /// Frame delay in milliseconds.
    pub fn frame_delay_ms(&self) -> u32 {
        1000 / self.fps.max(1)
    }
}
