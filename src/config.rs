//! Tracker configuration
//!
//! Every section has defaults, so a partial JSON document is enough.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::analysis::DEFAULT_REFERENCE_HEIGHT_CM;
use crate::bridge::{LANDMARK_COUNT, RIGHT_WRIST};
use crate::error::{Result, TrackerError};
use crate::physics::{KalmanConfig, OneEuroConfig};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrackerConfig {
    /// Smoothing of the headline metric
    pub filter: OneEuroConfig,
    /// Smoothing of the stabilized joint
    pub stabilizer: KalmanConfig,
    /// Minimum mean visibility for a metric to count
    pub confidence_threshold: f32,
    /// Assumed person height behind front split auto-calibration
    pub reference_height_cm: f32,
    /// Landmark index fed to the joint stabilizer
    pub stabilized_landmark: usize,
    /// Length of a test window
    pub test_window_secs: u32,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            filter: OneEuroConfig::default(),
            stabilizer: KalmanConfig::default(),
            confidence_threshold: 0.5,
            reference_height_cm: DEFAULT_REFERENCE_HEIGHT_CM,
            stabilized_landmark: RIGHT_WRIST,
            test_window_secs: 10,
        }
    }
}

impl TrackerConfig {
    /// Parse and validate a JSON document
    pub fn from_json(json: &str) -> Result<Self> {
        let config: TrackerConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        Self::from_json(&contents)
    }

    pub fn validate(&self) -> Result<()> {
        self.filter.validate()?;
        self.stabilizer.validate()?;

        if !(0.0..=1.0).contains(&self.confidence_threshold) {
            return Err(TrackerError::InvalidConfig(format!(
                "confidence_threshold must be within [0, 1], got {}",
                self.confidence_threshold
            )));
        }
        if !(self.reference_height_cm.is_finite() && self.reference_height_cm > 0.0) {
            return Err(TrackerError::InvalidConfig(format!(
                "reference_height_cm must be positive, got {}",
                self.reference_height_cm
            )));
        }
        if self.stabilized_landmark >= LANDMARK_COUNT {
            return Err(TrackerError::InvalidConfig(format!(
                "stabilized_landmark must be below {LANDMARK_COUNT}, got {}",
                self.stabilized_landmark
            )));
        }
        if self.test_window_secs == 0 {
            return Err(TrackerError::InvalidConfig("test_window_secs must be non-zero".into()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_json_uses_defaults() {
        let config = TrackerConfig::from_json(
            r#"{ "reference_height_cm": 170.0, "filter": { "min_cutoff": 0.5 } }"#,
        )
        .unwrap();
        assert_eq!(config.reference_height_cm, 170.0);
        assert_eq!(config.filter.min_cutoff, 0.5);
        assert_eq!(config.filter.freq, 30.0);
        assert_eq!(config.stabilizer, KalmanConfig::default());
        assert_eq!(config.stabilized_landmark, RIGHT_WRIST);
    }

    #[test]
    fn test_empty_document_is_default() {
        assert_eq!(TrackerConfig::from_json("{}").unwrap(), TrackerConfig::default());
    }

    #[test]
    fn test_rejects_invalid_values() {
        for json in [
            r#"{ "filter": { "freq": 0.0 } }"#,
            r#"{ "stabilizer": { "measurement_var": -1.0 } }"#,
            r#"{ "confidence_threshold": 1.5 }"#,
            r#"{ "reference_height_cm": 0.0 }"#,
            r#"{ "stabilized_landmark": 33 }"#,
            r#"{ "test_window_secs": 0 }"#,
        ] {
            let err = TrackerConfig::from_json(json).unwrap_err();
            assert!(matches!(err, TrackerError::InvalidConfig(_)), "{json}: {err}");
        }
    }

    #[test]
    fn test_malformed_json() {
        assert!(matches!(TrackerConfig::from_json("{"), Err(TrackerError::Json(_))));
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tracker.json");
        fs::write(&path, r#"{ "confidence_threshold": 0.7 }"#).unwrap();
        assert_eq!(TrackerConfig::load(&path).unwrap().confidence_threshold, 0.7);
    }
}
