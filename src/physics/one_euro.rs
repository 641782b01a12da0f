//! One Euro Filter - adaptive low-pass filter for metric jitter
//!
//! Smooth when the metric is steady (suppresses detector jitter),
//! responsive when it changes fast (holding a deeper stretch).
//! Sampling is assumed uniform at `freq` Hz: one call per frame.

use std::f32::consts::PI;

use serde::{Deserialize, Serialize};

use crate::error::{Result, TrackerError};

/// Filter parameters, all strictly positive
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OneEuroConfig {
    /// Expected sampling rate (Hz)
    pub freq: f32,
    /// Minimum cutoff frequency (Hz) - lower = smoother at rest
    pub min_cutoff: f32,
    /// Speed coefficient - higher = less lag during fast motion
    pub beta: f32,
    /// Derivative cutoff frequency (Hz)
    pub d_cutoff: f32,
}

impl Default for OneEuroConfig {
    fn default() -> Self {
        Self {
            freq: 30.0,
            min_cutoff: 1.0,
            beta: 0.005,
            d_cutoff: 1.0,
        }
    }
}

impl OneEuroConfig {
    pub fn validate(&self) -> Result<()> {
        let fields = [
            ("freq", self.freq),
            ("min_cutoff", self.min_cutoff),
            ("beta", self.beta),
            ("d_cutoff", self.d_cutoff),
        ];
        for (name, value) in fields {
            if !(value.is_finite() && value > 0.0) {
                return Err(TrackerError::InvalidConfig(format!(
                    "filter.{name} must be strictly positive, got {value}"
                )));
            }
        }
        Ok(())
    }
}

/// Carried state, present only after the first sample
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FilterState {
    pub previous_value: f32,
    pub previous_derivative: f32,
}

/// Adaptive low-pass filter: smooth at rest, responsive during motion
///
/// Must be [`reset`](Self::reset) by the owner whenever the signal
/// origin changes (pose switch, new frame source).
#[derive(Debug, Clone)]
pub struct OneEuroFilter {
    config: OneEuroConfig,
    state: Option<FilterState>,
}

impl OneEuroFilter {
    /// `config` is expected to be validated; a zero `freq` divides by zero.
    pub fn new(config: OneEuroConfig) -> Self {
        Self { config, state: None }
    }

    /// Smoothing factor alpha for a given cutoff
    fn smoothing_factor(&self, cutoff: f32) -> f32 {
        let tau = 1.0 / (2.0 * PI * cutoff);
        let t_e = 1.0 / self.config.freq;
        1.0 / (1.0 + tau / t_e)
    }

    /// Filter a single sample
    ///
    /// The first call after construction or reset returns `x` unchanged.
    pub fn filter(&mut self, x: f32) -> f32 {
        let (x_hat, dx_hat) = match self.state {
            None => (x, 0.0),
            Some(prev) => {
                // 1. Estimate derivative and smooth it at a fixed cutoff
                let dx = (x - prev.previous_value) * self.config.freq;
                let a_d = self.smoothing_factor(self.config.d_cutoff);
                let dx_hat = a_d * dx + (1.0 - a_d) * prev.previous_derivative;

                // 2. Adaptive cutoff: more smoothing when slow, less when fast
                let cutoff = self.config.min_cutoff + self.config.beta * dx_hat.abs();
                let a = self.smoothing_factor(cutoff);

                (a * x + (1.0 - a) * prev.previous_value, dx_hat)
            }
        };

        self.state = Some(FilterState {
            previous_value: x_hat,
            previous_derivative: dx_hat,
        });

        x_hat
    }

    /// Discard carried state; the next sample passes through unchanged
    pub fn reset(&mut self) {
        self.state = None;
    }

    pub fn state(&self) -> Option<FilterState> {
        self.state
    }

    pub fn config(&self) -> &OneEuroConfig {
        &self.config
    }
}

impl Default for OneEuroFilter {
    fn default() -> Self {
        Self::new(OneEuroConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn variance(values: &[f32]) -> f32 {
        let mean = values.iter().sum::<f32>() / values.len() as f32;
        values.iter().map(|v| (v - mean).powi(2)).sum::<f32>() / values.len() as f32
    }

    fn jittery_signal() -> Vec<f32> {
        (0..200).map(|i| if i % 2 == 0 { 9.0 } else { 11.0 }).collect()
    }

    #[test]
    fn test_first_call_passes_through() {
        let mut filter = OneEuroFilter::default();
        assert!(filter.state().is_none());
        assert_eq!(filter.filter(73.25), 73.25);

        let state = filter.state().unwrap();
        assert_eq!(state.previous_value, 73.25);
        assert_eq!(state.previous_derivative, 0.0);
    }

    #[test]
    fn test_constant_input_converges() {
        let mut filter = OneEuroFilter::default();
        filter.filter(0.0);
        let mut out = 0.0;
        for _ in 0..150 {
            out = filter.filter(42.0);
        }
        assert_abs_diff_eq!(out, 42.0, epsilon = 1e-3);
    }

    #[test]
    fn test_lower_min_cutoff_smooths_more() {
        let signal = jittery_signal();
        let mut variances = Vec::new();
        for min_cutoff in [0.5, 1.0, 3.0] {
            let mut filter = OneEuroFilter::new(OneEuroConfig {
                min_cutoff,
                ..OneEuroConfig::default()
            });
            let out: Vec<f32> = signal.iter().map(|&x| filter.filter(x)).collect();
            variances.push(variance(&out[50..]));
        }
        assert!(variances[0] <= variances[1]);
        assert!(variances[1] <= variances[2]);
        assert!(variances[2] < variance(&signal));
    }

    #[test]
    fn test_reset_restores_pass_through() {
        let mut filter = OneEuroFilter::default();
        filter.filter(10.0);
        filter.filter(20.0);
        filter.reset();
        assert!(filter.state().is_none());
        assert_eq!(filter.filter(-5.0), -5.0);
    }

    #[test]
    fn test_validate_rejects_non_positive() {
        assert!(OneEuroConfig::default().validate().is_ok());
        let bad = OneEuroConfig { freq: 0.0, ..OneEuroConfig::default() };
        assert!(matches!(bad.validate(), Err(TrackerError::InvalidConfig(_))));
        let bad = OneEuroConfig { beta: -1.0, ..OneEuroConfig::default() };
        assert!(bad.validate().is_err());
    }
}
