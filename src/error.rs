//! Error types for the flexibility tracker core

use thiserror::Error;

/// Result type used across the crate.
pub type Result<T> = std::result::Result<T, TrackerError>;

/// Errors surfaced by the tracker.
///
/// Degenerate geometry, missing calibration and low confidence are not
/// errors: they are absorbed where they occur.
#[derive(Debug, Error)]
pub enum TrackerError {
    #[error("unknown pose type '{requested}', available: {}", available.join(", "))]
    UnknownPoseType {
        requested: String,
        available: Vec<&'static str>,
    },

    #[error("no samples aggregated in the current window")]
    NoSamples,

    #[error("invalid landmark data length: {actual} (expected {expected})")]
    InvalidLandmarkData { expected: usize, actual: usize },

    #[error("invalid frame dimensions {width}x{height}")]
    InvalidFrameDimensions { width: u32, height: u32 },

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
