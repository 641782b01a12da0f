//! Confidence Gate - decides whether a frame's metric is trusted
//!
//! When mean landmark visibility < threshold, the frame's metric is held
//! back from the filter and the session stats. The metric itself is
//! still reported to the caller.

use serde::Serialize;

/// Outcome of gating one metric sample
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "decision", content = "value", rename_all = "snake_case")]
pub enum GateDecision {
    /// Confidence met the threshold; value should feed downstream
    Accepted(f32),
    /// Confidence too low; carries the last accepted value, if any
    Held(Option<f32>),
}

impl GateDecision {
    pub fn is_accepted(&self) -> bool {
        matches!(self, GateDecision::Accepted(_))
    }
}

/// Confidence gate for a scalar metric
#[derive(Debug, Clone)]
pub struct ConfidenceGate {
    /// Last value that passed the gate
    last_accepted: Option<f32>,
    /// Minimum confidence to accept raw data
    threshold: f32,
}

impl ConfidenceGate {
    pub fn new(threshold: f32) -> Self {
        Self {
            last_accepted: None,
            threshold,
        }
    }

    /// Set confidence threshold
    pub fn set_threshold(&mut self, threshold: f32) {
        self.threshold = threshold;
    }

    pub fn threshold(&self) -> f32 {
        self.threshold
    }

    /// Apply confidence gating
    ///
    /// If confidence >= threshold: accept and remember the value
    /// If confidence < threshold: hold the last accepted value
    pub fn apply(&mut self, value: f32, confidence: f32) -> GateDecision {
        if confidence >= self.threshold {
            self.last_accepted = Some(value);
            GateDecision::Accepted(value)
        } else {
            GateDecision::Held(self.last_accepted)
        }
    }

    /// Get last accepted value
    pub fn last_accepted(&self) -> Option<f32> {
        self.last_accepted
    }

    pub fn reset(&mut self) {
        self.last_accepted = None;
    }
}

impl Default for ConfidenceGate {
    fn default() -> Self {
        Self::new(0.5)
    }
}
