//! Forward fold analysis (standing or seated)
//!
//! Headline metric is the raw hip flexion angle: smaller is a deeper
//! fold. The normalized flexibility score is reported alongside it.

use super::annotations::{AnnotationSink, GuideLine};
use super::calibration::Calibration;
use super::metrics::{PoseMetrics, PoseType};
use crate::bridge::{
    mean_visibility, pixel, FrameDimensions, Landmarks, LEFT_ANKLE, LEFT_HIP, LEFT_KNEE,
    LEFT_SHOULDER, LEFT_WRIST, RIGHT_ANKLE, RIGHT_HIP, RIGHT_KNEE, RIGHT_SHOULDER, RIGHT_WRIST,
};
use crate::error::Result;
use crate::physics::{angle, midpoint};

/// Hip flexion above which the fold is too shallow
const DEEP_FOLD_DEG: f32 = 45.0;

/// Hands further than this from the floor get a reach cue
const REACH_PX: f32 = 50.0;

const KEY_LANDMARKS: [usize; 6] = [LEFT_SHOULDER, RIGHT_SHOULDER, LEFT_HIP, RIGHT_HIP, LEFT_KNEE, RIGHT_KNEE];

#[derive(Debug, Clone, Default)]
pub struct ForwardFoldAnalyzer {
    /// Only ever set explicitly; the fold has no height reference
    calibration: Option<Calibration>,
}

impl ForwardFoldAnalyzer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_calibration(factor: f32) -> Result<Self> {
        Ok(Self {
            calibration: Some(Calibration::try_fixed(factor)?),
        })
    }

    pub fn calibration(&self) -> Option<Calibration> {
        self.calibration
    }

    pub fn analyze(
        &mut self,
        landmarks: &Landmarks,
        dims: FrameDimensions,
        sink: Option<&mut dyn AnnotationSink>,
    ) -> PoseMetrics {
        let p = |index| pixel(landmarks, index, dims);

        let hip_center = midpoint(p(LEFT_HIP), p(RIGHT_HIP));
        let shoulder_center = midpoint(p(LEFT_SHOULDER), p(RIGHT_SHOULDER));
        let knee_center = midpoint(p(LEFT_KNEE), p(RIGHT_KNEE));
        let wrist_center = midpoint(p(LEFT_WRIST), p(RIGHT_WRIST));

        // Torso lean relative to a point straight above the hip
        let vertical_ref = (hip_center.0, 0.0);
        let torso_angle = angle(vertical_ref, hip_center, shoulder_center);

        let hip_flexion = angle(shoulder_center, hip_center, knee_center);

        let floor_level = p(LEFT_ANKLE).1.max(p(RIGHT_ANKLE).1);
        let hands_to_floor_px = floor_level - wrist_center.1;

        let flexibility_score = (100.0 - hip_flexion / 180.0 * 100.0).max(0.0);

        let confidence = mean_visibility(landmarks, &KEY_LANDMARKS);
        let mut metrics = PoseMetrics::new(PoseType::ForwardFold, hip_flexion, confidence);
        metrics.secondary.insert("torso_angle", torso_angle);
        metrics.secondary.insert("hip_flexion", hip_flexion);
        metrics.secondary.insert("flexibility_score", flexibility_score);
        metrics.secondary.insert("hands_to_floor_px", hands_to_floor_px);
        if let Some(calibration) = self.calibration {
            metrics.secondary.insert("hands_to_floor_cm", calibration.to_cm(hands_to_floor_px));
        }

        if hip_flexion > DEEP_FOLD_DEG {
            metrics.feedback.push("Bend deeper from hips");
        }
        if hands_to_floor_px > REACH_PX {
            metrics.feedback.push("Reach closer to floor");
        }

        if let Some(sink) = sink {
            sink.line(shoulder_center, hip_center, GuideLine::Spine);
            sink.text(0, &format!("Hip Flexion: {hip_flexion:.1}"));
            sink.text(1, &format!("Flexibility: {flexibility_score:.1}%"));
        }

        metrics
    }
}
