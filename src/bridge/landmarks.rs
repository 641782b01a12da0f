//! Landmark contract with the pose detector
//!
//! The detector delivers 33 MediaPipe Pose landmarks per frame, each a
//! normalized (x, y) plus a visibility score. Indices below are the
//! MediaPipe topology and must stay stable.

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::{Result, TrackerError};
use crate::physics::Point;

// ============================================================================
// LANDMARK INDICES (MediaPipe Pose - 33 total)
// ============================================================================

pub const LANDMARK_COUNT: usize = 33;

/// Values per landmark in the flat wire array: x, y, visibility
pub const VALUES_PER_LANDMARK: usize = 3;

pub const NOSE: usize = 0;
pub const LEFT_SHOULDER: usize = 11;
pub const RIGHT_SHOULDER: usize = 12;
pub const LEFT_ELBOW: usize = 13;
pub const RIGHT_ELBOW: usize = 14;
pub const LEFT_WRIST: usize = 15;
pub const RIGHT_WRIST: usize = 16;
pub const LEFT_HIP: usize = 23;
pub const RIGHT_HIP: usize = 24;
pub const LEFT_KNEE: usize = 25;
pub const RIGHT_KNEE: usize = 26;
pub const LEFT_ANKLE: usize = 27;
pub const RIGHT_ANKLE: usize = 28;
pub const LEFT_HEEL: usize = 29;
pub const RIGHT_HEEL: usize = 30;
pub const LEFT_FOOT_INDEX: usize = 31;
pub const RIGHT_FOOT_INDEX: usize = 32;

// ============================================================================
// DATA STRUCTURES
// ============================================================================

/// A single landmark: normalized position plus detector confidence
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Landmark {
    pub x: f32,          // 0-1 normalized
    pub y: f32,          // 0-1 normalized
    pub visibility: f32, // 0-1
}

/// One frame's full landmark set
pub type Landmarks = [Landmark; LANDMARK_COUNT];

impl Landmark {
    pub fn new(x: f32, y: f32, visibility: f32) -> Self {
        Self { x, y, visibility }
    }

    /// De-normalize into pixel space
    pub fn to_pixels(&self, dims: FrameDimensions) -> Point {
        (self.x * dims.width() as f32, self.y * dims.height() as f32)
    }
}

/// Frame size in pixels, both sides non-zero
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FrameDimensions {
    width: u32,
    height: u32,
}

impl FrameDimensions {
    pub fn new(width: u32, height: u32) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(TrackerError::InvalidFrameDimensions { width, height });
        }
        Ok(Self { width, height })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }
}

/// Pixel position of landmark `index`
pub fn pixel(landmarks: &Landmarks, index: usize, dims: FrameDimensions) -> Point {
    landmarks[index].to_pixels(dims)
}

/// Mean visibility over the given landmark indices
pub fn mean_visibility(landmarks: &Landmarks, indices: &[usize]) -> f32 {
    if indices.is_empty() {
        return 0.0;
    }
    let sum: f32 = indices.iter().map(|&i| landmarks[i].visibility).sum();
    sum / indices.len() as f32
}

/// Parse a flat array of 99 values (33 landmarks × x, y, visibility)
pub fn landmarks_from_flat(data: &[f32]) -> Result<Landmarks> {
    let expected = LANDMARK_COUNT * VALUES_PER_LANDMARK;
    if data.len() != expected {
        warn!(len = data.len(), expected, "invalid landmark data length");
        return Err(TrackerError::InvalidLandmarkData {
            expected,
            actual: data.len(),
        });
    }

    let mut landmarks = [Landmark::default(); LANDMARK_COUNT];
    for (landmark, chunk) in landmarks.iter_mut().zip(data.chunks_exact(VALUES_PER_LANDMARK)) {
        *landmark = Landmark::new(chunk[0], chunk[1], chunk[2]);
    }
    Ok(landmarks)
}

/// Build a landmark set from `[x, y, visibility]` triples
pub fn landmarks_from_triples(triples: &[[f32; 3]]) -> Result<Landmarks> {
    let flat: Vec<f32> = triples.iter().flatten().copied().collect();
    landmarks_from_flat(&flat)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parses_flat_array() {
        let mut data = vec![0.0f32; 99];
        data[LEFT_HIP * 3] = 0.25;
        data[LEFT_HIP * 3 + 1] = 0.75;
        data[LEFT_HIP * 3 + 2] = 0.9;
        let landmarks = landmarks_from_flat(&data).unwrap();
        assert_eq!(landmarks[LEFT_HIP], Landmark::new(0.25, 0.75, 0.9));
        assert_eq!(landmarks[RIGHT_HIP], Landmark::default());
    }

    #[test]
    fn test_rejects_wrong_length() {
        let err = landmarks_from_flat(&[0.0; 98]).unwrap_err();
        assert!(matches!(
            err,
            TrackerError::InvalidLandmarkData { expected: 99, actual: 98 }
        ));
    }

    #[test]
    fn test_to_pixels() {
        let dims = FrameDimensions::new(640, 480).unwrap();
        assert_eq!(Landmark::new(0.5, 0.25, 1.0).to_pixels(dims), (320.0, 120.0));
    }

    #[test]
    fn test_zero_dimensions_rejected() {
        assert!(FrameDimensions::new(0, 480).is_err());
        assert!(FrameDimensions::new(640, 0).is_err());
    }

    #[test]
    fn test_mean_visibility() {
        let mut landmarks = [Landmark::default(); LANDMARK_COUNT];
        landmarks[LEFT_KNEE].visibility = 0.4;
        landmarks[RIGHT_KNEE].visibility = 0.8;
        let mean = mean_visibility(&landmarks, &[LEFT_KNEE, RIGHT_KNEE]);
        assert!((mean - 0.6).abs() < 1e-6);
        assert_eq!(mean_visibility(&landmarks, &[]), 0.0);
    }
}
