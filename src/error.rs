//! Error types for sdf-breakout
//!
//! The per-frame render pass is infallible; everything here is raised while
//! building snapshots, renderers or loading configuration.

use thiserror::Error;

/// Errors that can occur while setting up or writing out frames
#[derive(Error, Debug)]
pub enum Error {
    /// Snapshot built from a brick list whose length differs from the slot count
    #[error("snapshot expects {expected} brick slots, got {actual}")]
    BrickCount { expected: usize, actual: usize },

    /// Framebuffer with a zero dimension
    #[error("invalid resolution {width}x{height}")]
    InvalidResolution { width: u32, height: u32 },

    /// Quality preset name not recognized
    #[error("unknown quality preset '{0}' (expected low, medium or high)")]
    UnknownQuality(String),

    /// Reading or writing settings/snapshots failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Settings or snapshot JSON could not be (de)serialized
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Encoding a frame to an image file failed
    #[error("image error: {0}")]
    Image(#[from] image::ImageError),
}

/// Result type for sdf-breakout operations
pub type Result<T> = std::result::Result<T, Error>;
