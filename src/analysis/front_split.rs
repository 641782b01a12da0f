//! Front split analysis
//!
//! Headline metric is a 0-100 split progress score mixing hip opening
//! (60%) and hip-to-floor distance (40%). The distance term uses
//! centimeters once the analyzer has calibrated itself from the
//! person's height, and a frame-relative pixel form before that.

use tracing::info;

use super::annotations::{AnnotationSink, GuideLine};
use super::calibration::Calibration;
use super::metrics::{PoseMetrics, PoseType};
use crate::bridge::{
    mean_visibility, pixel, FrameDimensions, Landmarks, LEFT_ANKLE, LEFT_HEEL, LEFT_HIP,
    LEFT_KNEE, LEFT_SHOULDER, NOSE, RIGHT_ANKLE, RIGHT_HEEL, RIGHT_HIP, RIGHT_KNEE,
    RIGHT_SHOULDER,
};
use crate::error::Result;
use crate::physics::{angle, midpoint, Point};

/// Assumed real height (cm) behind auto-calibration
pub const DEFAULT_REFERENCE_HEIGHT_CM: f32 = 135.0;

/// Hip-to-floor distance (cm) at which the distance term reaches zero
const FULL_RANGE_CM: f32 = 50.0;

/// Fraction of frame height used when uncalibrated
const FULL_RANGE_FRAME_FRACTION: f32 = 0.3;

const ANGLE_WEIGHT: f32 = 0.6;
const DISTANCE_WEIGHT: f32 = 0.4;

/// Knee angle below which the leg counts as bent
const STRAIGHT_KNEE_DEG: f32 = 160.0;

/// Landmarks that drive the confidence score
const KEY_LANDMARKS: [usize; 6] = [LEFT_HIP, RIGHT_HIP, LEFT_KNEE, RIGHT_KNEE, LEFT_ANKLE, RIGHT_ANKLE];

/// One leg's joints in pixel space
struct Leg {
    hip: Point,
    knee: Point,
    ankle: Point,
}

#[derive(Debug, Clone)]
pub struct FrontSplitAnalyzer {
    calibration: Option<Calibration>,
    reference_height_cm: f32,
}

impl FrontSplitAnalyzer {
    pub fn new(reference_height_cm: f32) -> Self {
        Self {
            calibration: None,
            reference_height_cm,
        }
    }

    /// Start with a known calibration; auto-calibration is skipped
    pub fn with_calibration(factor: f32) -> Result<Self> {
        Ok(Self {
            calibration: Some(Calibration::try_fixed(factor)?),
            reference_height_cm: DEFAULT_REFERENCE_HEIGHT_CM,
        })
    }

    pub fn calibration(&self) -> Option<Calibration> {
        self.calibration
    }

    pub fn reference_height_cm(&self) -> f32 {
        self.reference_height_cm
    }

    /// Calibrate from nose-to-ankle height, only if not yet calibrated
    fn auto_calibrate(&mut self, landmarks: &Landmarks, dims: FrameDimensions) {
        if self.calibration.is_some() {
            return;
        }

        let nose_y = pixel(landmarks, NOSE, dims).1;
        let ankle_y = (pixel(landmarks, LEFT_ANKLE, dims).1 + pixel(landmarks, RIGHT_ANKLE, dims).1) / 2.0;
        let person_height_px = ankle_y - nose_y;

        if let Some(calibration) = Calibration::from_height(person_height_px, self.reference_height_cm) {
            info!(
                factor = calibration.factor,
                person_height_px,
                reference_height_cm = self.reference_height_cm,
                "front split auto-calibrated"
            );
            self.calibration = Some(calibration);
        }
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

        let left = Leg { hip: p(LEFT_HIP), knee: p(LEFT_KNEE), ankle: p(LEFT_ANKLE) };
        let right = Leg { hip: p(RIGHT_HIP), knee: p(RIGHT_KNEE), ankle: p(RIGHT_ANKLE) };

        // Front leg: knee lower on screen (closer to the floor)
        let (front, back) = if left.knee.1 > right.knee.1 {
            (left, right)
        } else {
            (right, left)
        };

        let hip_flexor_angle = angle(front.ankle, front.hip, shoulder_center);
        let hip_opening_angle = angle(front.ankle, hip_center, back.ankle);
        let front_knee_angle = angle(front.hip, front.knee, front.ankle);
        let back_knee_angle = angle(back.hip, back.knee, back.ankle);

        // Lowest foot point approximates the ground plane
        let floor_level = [LEFT_ANKLE, RIGHT_ANKLE, LEFT_HEEL, RIGHT_HEEL]
            .iter()
            .map(|&i| p(i).1)
            .fold(f32::MIN, f32::max);
        let hip_to_floor_px = floor_level - hip_center.1;

        self.auto_calibrate(landmarks, dims);

        let angle_factor = (hip_opening_angle / 180.0).min(1.0);
        let hip_to_floor_cm = self.calibration.map(|c| c.to_cm(hip_to_floor_px));
        let distance_factor = match hip_to_floor_cm {
            Some(cm) => (1.0 - cm / FULL_RANGE_CM).clamp(0.0, 1.0),
            None => {
                let full_range_px = dims.height() as f32 * FULL_RANGE_FRAME_FRACTION;
                (1.0 - hip_to_floor_px / full_range_px).clamp(0.0, 1.0)
            }
        };

        let split_percentage = (angle_factor * ANGLE_WEIGHT + distance_factor * DISTANCE_WEIGHT) * 100.0;

        let confidence = mean_visibility(landmarks, &KEY_LANDMARKS);
        let mut metrics = PoseMetrics::new(PoseType::FrontSplit, split_percentage, confidence);
        metrics.secondary.insert("hip_opening_angle", hip_opening_angle);
        metrics.secondary.insert("hip_flexor_angle", hip_flexor_angle);
        metrics.secondary.insert("front_knee_angle", front_knee_angle);
        metrics.secondary.insert("back_knee_angle", back_knee_angle);
        metrics.secondary.insert("hip_to_floor_px", hip_to_floor_px);
        if let Some(cm) = hip_to_floor_cm {
            metrics.secondary.insert("hip_to_floor_cm", cm);
        }

        if front_knee_angle < STRAIGHT_KNEE_DEG {
            metrics.feedback.push("Straighten front leg");
        }
        if back_knee_angle < STRAIGHT_KNEE_DEG {
            metrics.feedback.push("Straighten back leg");
        }

        if let Some(sink) = sink {
            Self::annotate(sink, dims, hip_center, floor_level, &metrics, hip_to_floor_cm);
        }

        metrics
    }

    fn annotate(
        sink: &mut dyn AnnotationSink,
        dims: FrameDimensions,
        hip_center: Point,
        floor_level: f32,
        metrics: &PoseMetrics,
        hip_to_floor_cm: Option<f32>,
    ) {
        sink.line((0.0, floor_level), (dims.width() as f32, floor_level), GuideLine::Floor);
        sink.line(hip_center, (hip_center.0, floor_level), GuideLine::HipToFloor);

        let mut rows = vec![
            format!("Split Progress: {:.1}%", metrics.primary_metric),
            format!("Hip Opening: {:.1}", metrics.get("hip_opening_angle").unwrap_or_default()),
        ];
        if let Some(cm) = hip_to_floor_cm {
            rows.push(format!("Hip to Floor: {cm:.1} cm"));
        }
        for (row, text) in rows.iter().enumerate() {
            sink.text(row, text);
        }
    }
}

impl Default for FrontSplitAnalyzer {
    fn default() -> Self {
        Self::new(DEFAULT_REFERENCE_HEIGHT_CM)
    }
}
