//! Errors reported before rendering starts or while saving results.
//!
//! Geometric degeneracies are not errors: intersection code turns them into
//! misses.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("Invalid render configuration: {0}")]
    InvalidConfig(String),

    #[error("Invalid viewport {width}x{height}: {reason}")]
    InvalidViewport {
        width: u32,
        height: u32,
        reason: String,
    },

    #[error("Degenerate camera: {0}")]
    DegenerateCamera(String),

    #[error("Worker pool error: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),

    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for rendering operations.
pub type RenderResult<T> = Result<T, RenderError>;
