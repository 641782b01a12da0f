//! Pose analyzer variants and the registry that selects between them

use tracing::info;

use super::annotations::AnnotationSink;
use super::calibration::Calibration;
use super::forward_fold::ForwardFoldAnalyzer;
use super::front_split::FrontSplitAnalyzer;
use super::metrics::{PoseMetrics, PoseType};
use crate::bridge::{FrameDimensions, Landmarks};
use crate::error::Result;

/// Closed set of pose analyzers
///
/// Adding a pose means adding a variant here and a key in [`PoseType`].
#[derive(Debug, Clone)]
pub enum PoseAnalyzer {
    FrontSplit(FrontSplitAnalyzer),
    ForwardFold(ForwardFoldAnalyzer),
}

impl PoseAnalyzer {
    pub fn pose_type(&self) -> PoseType {
        match self {
            PoseAnalyzer::FrontSplit(_) => PoseType::FrontSplit,
            PoseAnalyzer::ForwardFold(_) => PoseType::ForwardFold,
        }
    }

    pub fn analyze(
        &mut self,
        landmarks: &Landmarks,
        dims: FrameDimensions,
        sink: Option<&mut dyn AnnotationSink>,
    ) -> PoseMetrics {
        match self {
            PoseAnalyzer::FrontSplit(analyzer) => analyzer.analyze(landmarks, dims, sink),
            PoseAnalyzer::ForwardFold(analyzer) => analyzer.analyze(landmarks, dims, sink),
        }
    }

    pub fn calibration(&self) -> Option<Calibration> {
        match self {
            PoseAnalyzer::FrontSplit(analyzer) => analyzer.calibration(),
            PoseAnalyzer::ForwardFold(analyzer) => analyzer.calibration(),
        }
    }
}

/// Holds one analyzer per pose type and the active selection
///
/// Each analyzer keeps its own calibration across selection changes.
#[derive(Debug, Clone)]
pub struct PoseAnalysisRegistry {
    analyzers: Vec<PoseAnalyzer>,
    current: usize,
}

impl PoseAnalysisRegistry {
    /// Registry with every pose, `front_split` active
    pub fn new(reference_height_cm: f32) -> Self {
        Self {
            analyzers: vec![
                PoseAnalyzer::FrontSplit(FrontSplitAnalyzer::new(reference_height_cm)),
                PoseAnalyzer::ForwardFold(ForwardFoldAnalyzer::new()),
            ],
            current: 0,
        }
    }

    /// Change the active pose; on error the previous selection is kept
    pub fn select(&mut self, key: &str) -> Result<PoseType> {
        let pose: PoseType = key.parse()?;
        if let Some(index) = self.analyzers.iter().position(|a| a.pose_type() == pose) {
            self.current = index;
            info!(pose = pose.key(), "pose selected");
        }
        Ok(pose)
    }

    pub fn available_poses(&self) -> Vec<&'static str> {
        self.analyzers.iter().map(|a| a.pose_type().key()).collect()
    }

    pub fn current(&self) -> PoseType {
        self.analyzers[self.current].pose_type()
    }

    pub fn current_name(&self) -> &'static str {
        self.current().display_name()
    }

    pub fn current_unit(&self) -> &'static str {
        self.current().unit()
    }

    pub fn analyzer(&self, pose: PoseType) -> Option<&PoseAnalyzer> {
        self.analyzers.iter().find(|a| a.pose_type() == pose)
    }

    /// Analyze one frame with the active pose
    pub fn analyze(
        &mut self,
        landmarks: &Landmarks,
        dims: FrameDimensions,
        sink: Option<&mut dyn AnnotationSink>,
    ) -> PoseMetrics {
        self.analyzers[self.current].analyze(landmarks, dims, sink)
    }
}

impl Default for PoseAnalysisRegistry {
    fn default() -> Self {
        Self::new(super::front_split::DEFAULT_REFERENCE_HEIGHT_CM)
    }
}
