//! Error types for rendering and encoding.

use thiserror::Error;

/// Errors produced while rendering or writing an animation.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum RenderError {
    /// Writing the output failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The image encoder failed.
    #[error("Image encoding error: {0}")]
    Image(#[from] image::ImageError),

    /// Nothing to render.
    #[error("Trajectory has no snapshots to render")]
    EmptyTrajectory,

    /// The render settings are unusable.
    #[error("Invalid render configuration: {0}")]
    InvalidConfig(String),
}

/// Result type for rendering operations.
pub type RenderResult<T> = Result<T, RenderError>;
