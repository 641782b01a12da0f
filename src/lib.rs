//! Flex Tracker - flexibility metrics from pose landmarks
//!
//! Turns per-frame MediaPipe Pose landmarks into pose-specific
//! flexibility metrics, smooths them, and tracks the best value of a
//! session. Only contains:
//! - Module declarations
//! - Re-exports of the types a shell needs
//!
//! Per frame: landmarks → [`PoseAnalysisRegistry`] → [`ConfidenceGate`]
//! → [`OneEuroFilter`] → [`SessionTracker`], with a [`KalmanFilter`]
//! stabilizing one joint for display. [`FlexTracker`] wires it together;
//! on wasm32 the browser drives it through `bridge::TrackerHandle`.

pub mod analysis;
pub mod bridge;
pub mod config;
pub mod error;
pub mod physics;
pub mod pipeline;
pub mod session;

pub use analysis::{
    AnnotationBuffer, AnnotationSink, GuideLine, PoseAnalysisRegistry, PoseMetrics, PoseType,
};
pub use bridge::{FrameDimensions, Landmark, Landmarks};
pub use config::TrackerConfig;
pub use error::{Result, TrackerError};
pub use physics::{ConfidenceGate, GateDecision, KalmanFilter, OneEuroFilter};
pub use pipeline::{FlexTracker, FrameReport};
pub use session::{ProgressLog, ProgressRecord, SessionSnapshot, SessionTracker};
