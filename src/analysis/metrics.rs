//! Pose types and the per-frame metrics record

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::error::TrackerError;

/// Supported exercise poses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PoseType {
    FrontSplit,
    ForwardFold,
}

impl PoseType {
    /// Registration order
    pub const ALL: [PoseType; 2] = [PoseType::FrontSplit, PoseType::ForwardFold];

    /// Stable key used for selection
    pub fn key(&self) -> &'static str {
        match self {
            PoseType::FrontSplit => "front_split",
            PoseType::ForwardFold => "forward_fold",
        }
    }

    /// Human-readable label, also used in progress records
    pub fn display_name(&self) -> &'static str {
        match self {
            PoseType::FrontSplit => "Front Split",
            PoseType::ForwardFold => "Forward Fold",
        }
    }

    /// Unit of the primary metric
    pub fn unit(&self) -> &'static str {
        match self {
            PoseType::FrontSplit => "%",
            PoseType::ForwardFold => "°",
        }
    }

    pub fn keys() -> Vec<&'static str> {
        Self::ALL.iter().map(PoseType::key).collect()
    }
}

impl fmt::Display for PoseType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for PoseType {
    type Err = TrackerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|pose| pose.key() == s)
            .ok_or_else(|| TrackerError::UnknownPoseType {
                requested: s.to_string(),
                available: Self::keys(),
            })
    }
}

/// Result of analyzing one frame
///
/// `primary_metric` semantics depend on the pose: a 0-100 progress score
/// for the split, the raw hip flexion angle for the fold.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PoseMetrics {
    pub pose_type: PoseType,
    pub primary_metric: f32,
    pub secondary: BTreeMap<&'static str, f32>,
    /// Mean visibility over the landmarks this pose depends on
    pub confidence: f32,
    pub feedback: Vec<&'static str>,
}

impl PoseMetrics {
    pub fn new(pose_type: PoseType, primary_metric: f32, confidence: f32) -> Self {
        Self {
            pose_type,
            primary_metric,
            secondary: BTreeMap::new(),
            confidence,
            feedback: Vec::new(),
        }
    }

    /// Look up a secondary angle/distance by name
    pub fn get(&self, name: &str) -> Option<f32> {
        self.secondary.get(name).copied()
    }

    /// Value tracked across a session, where higher is always better
    ///
    /// The split score already is; the fold reports a raw angle as its
    /// primary metric, so its normalized flexibility score is used.
    pub fn progress_value(&self) -> f32 {
        match self.pose_type {
            PoseType::FrontSplit => self.primary_metric,
            PoseType::ForwardFold => self.get("flexibility_score").unwrap_or(self.primary_metric),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keys_round_trip_through_from_str() {
        for pose in PoseType::ALL {
            assert_eq!(pose.key().parse::<PoseType>().unwrap(), pose);
        }
    }

    #[test]
    fn test_unknown_key() {
        let err = "plank".parse::<PoseType>().unwrap_err();
        match err {
            TrackerError::UnknownPoseType { requested, available } => {
                assert_eq!(requested, "plank");
                assert_eq!(available, vec!["front_split", "forward_fold"]);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_metadata() {
        assert_eq!(PoseType::FrontSplit.display_name(), "Front Split");
        assert_eq!(PoseType::ForwardFold.unit(), "°");
    }
}
