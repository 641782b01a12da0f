//! Physics module - joint geometry and temporal smoothing
//!
//! Re-exports only. All logic in submodules.

pub mod geometry;
mod kalman;
mod one_euro;
mod confidence_gate;

pub use geometry::{angle, distance, midpoint, point_to_segment_distance, Point};
pub use kalman::{KalmanConfig, KalmanFilter};
pub use one_euro::{FilterState, OneEuroConfig, OneEuroFilter};
pub use confidence_gate::{ConfidenceGate, GateDecision};
