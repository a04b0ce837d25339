//! Spinchain Renderer
//!
//! Turns a [`Trajectory`](spinchain_sim::Trajectory) into an animation. Every
//! snapshot becomes one frame showing
//!
//! - the chain, one disc per site coloured by ⟨Z_i⟩ on a cool-warm map,
//! - the tracked site's ⟨Z⟩ history on fixed axes,
//! - a progress bar for elapsed simulated time.
//!
//! Frames are produced lazily and handed straight to an
//! [`AnimationEncoder`], so only one frame is alive at a time.
//!
//! # Example
//!
//! ```rust,no_run
//! use spinchain_render::{GifEncoder, RenderConfig, render_animation};
//! use spinchain_sim::{EvolutionDriver, SimulationParameters};
//!
//! let trajectory = EvolutionDriver::new(SimulationParameters::default())?.run()?;
//! let summary = render_animation(
//!     &trajectory,
//!     &RenderConfig::default(),
//!     &GifEncoder::default(),
//!     "spin_chain_dynamics.gif",
//! )?;
//! assert_eq!(summary.frames, trajectory.len());
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod colormap;
pub mod config;
pub mod encoder;
pub mod error;
pub mod frame;

use std::path::{Path, PathBuf};

use spinchain_sim::Trajectory;
use tracing::info;

pub use config::RenderConfig;
pub use encoder::{AnimationEncoder, GifEncoder, PngSequenceEncoder};
pub use error::{RenderError, RenderResult};
pub use frame::{AnimationFrame, FrameRenderer};

/// What [`render_animation`] wrote.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderSummary {
    /// Number of frames encoded.
    pub frames: usize,
    /// Output location.
    pub path: PathBuf,
    /// Encoder that produced the output.
    pub encoder: &'static str,
}

/// Render every snapshot of `trajectory` and encode the frames to `path`.
///
/// Any existing file at `path` is overwritten.
pub fn render_animation(
    trajectory: &Trajectory,
    config: &RenderConfig,
    encoder: &dyn AnimationEncoder,
    path: impl AsRef<Path>,
) -> RenderResult<RenderSummary> {
    let path = path.as_ref();
    let renderer = FrameRenderer::new(config.clone())?;
    let mut frames = renderer.frames(trajectory)?;
    let count = encoder.encode(&mut frames, config.fps, path)?;

    info!(
        frames = count,
        encoder = encoder.name(),
        path = %path.display(),
        "animation written"
    );
    Ok(RenderSummary {
        frames: count,
        path: path.to_path_buf(),
        encoder: encoder.name(),
    })
}
