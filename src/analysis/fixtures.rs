//! Landmark sets shared by analyzer, registry and pipeline tests

use crate::bridge::{
    FrameDimensions, Landmark, Landmarks, LANDMARK_COUNT, LEFT_ANKLE, LEFT_HEEL, LEFT_HIP,
    LEFT_KNEE, LEFT_SHOULDER, LEFT_WRIST, NOSE, RIGHT_ANKLE, RIGHT_HEEL, RIGHT_HIP, RIGHT_KNEE,
    RIGHT_SHOULDER, RIGHT_WRIST,
};

pub const VISIBILITY: f32 = 0.9;

pub fn dims() -> FrameDimensions {
    FrameDimensions::new(640, 480).unwrap()
}

pub fn pose_from(points: &[(usize, f32, f32)]) -> Landmarks {
    let mut landmarks = [Landmark::new(0.5, 0.5, VISIBILITY); LANDMARK_COUNT];
    for &(index, x, y) in points {
        landmarks[index] = Landmark::new(x, y, VISIBILITY);
    }
    landmarks
}

/// Upright person, ankles on the bottom edge, nose near the top
pub fn standing_pose() -> Landmarks {
    pose_from(&[
        (NOSE, 0.5, 0.1),
        (LEFT_SHOULDER, 0.45, 0.3),
        (RIGHT_SHOULDER, 0.55, 0.3),
        (LEFT_WRIST, 0.40, 0.55),
        (RIGHT_WRIST, 0.60, 0.55),
        (LEFT_HIP, 0.46, 0.55),
        (RIGHT_HIP, 0.54, 0.55),
        (LEFT_KNEE, 0.46, 0.78),
        (RIGHT_KNEE, 0.54, 0.78),
        (LEFT_ANKLE, 0.46, 1.0),
        (RIGHT_ANKLE, 0.54, 1.0),
        (LEFT_HEEL, 0.46, 1.0),
        (RIGHT_HEEL, 0.54, 1.0),
    ])
}

/// Torso folded onto the legs: shoulder center on the hip→knee ray
pub fn folded_pose() -> Landmarks {
    pose_from(&[
        (NOSE, 0.5, 0.85),
        (LEFT_SHOULDER, 0.46, 0.70),
        (RIGHT_SHOULDER, 0.54, 0.70),
        (LEFT_WRIST, 0.48, 0.97),
        (RIGHT_WRIST, 0.52, 0.97),
        (LEFT_HIP, 0.46, 0.55),
        (RIGHT_HIP, 0.54, 0.55),
        (LEFT_KNEE, 0.46, 0.78),
        (RIGHT_KNEE, 0.54, 0.78),
        (LEFT_ANKLE, 0.46, 1.0),
        (RIGHT_ANKLE, 0.54, 1.0),
        (LEFT_HEEL, 0.46, 1.0),
        (RIGHT_HEEL, 0.54, 1.0),
    ])
}

/// Front split, left leg forward (its knee is lower on screen)
///
/// At 640x480: hip opening ≈ 159.86°, hip-to-floor 52.8 px, and the
/// auto-calibrated factor is 135 / 187.2 cm/px.
pub fn split_pose() -> Landmarks {
    pose_from(&[
        (NOSE, 0.5, 0.5),
        (LEFT_SHOULDER, 0.47, 0.55),
        (RIGHT_SHOULDER, 0.53, 0.55),
        (LEFT_HIP, 0.48, 0.8),
        (RIGHT_HIP, 0.52, 0.8),
        (LEFT_KNEE, 0.3, 0.86),
        (RIGHT_KNEE, 0.7, 0.84),
        (LEFT_ANKLE, 0.12, 0.9),
        (RIGHT_ANKLE, 0.88, 0.88),
        (LEFT_HEEL, 0.12, 0.91),
        (RIGHT_HEEL, 0.88, 0.89),
    ])
}

/// Same split with the front knee visibly bent
pub fn bent_split_pose() -> Landmarks {
    let mut landmarks = split_pose();
    landmarks[LEFT_KNEE] = Landmark::new(0.3, 0.95, VISIBILITY);
    landmarks
}

/// [`split_pose`] mirrored left-right: right leg forward
pub fn mirrored_split_pose() -> Landmarks {
    pose_from(&[
        (NOSE, 0.5, 0.5),
        (LEFT_SHOULDER, 0.47, 0.55),
        (RIGHT_SHOULDER, 0.53, 0.55),
        (LEFT_HIP, 0.48, 0.8),
        (RIGHT_HIP, 0.52, 0.8),
        (LEFT_KNEE, 0.3, 0.84),
        (RIGHT_KNEE, 0.7, 0.86),
        (LEFT_ANKLE, 0.12, 0.88),
        (RIGHT_ANKLE, 0.88, 0.9),
        (LEFT_HEEL, 0.12, 0.89),
        (RIGHT_HEEL, 0.88, 0.91),
    ])
}

/// Mirrored split with the back (left) knee bent to about 139.8°
pub fn bent_back_split_pose() -> Landmarks {
    let mut landmarks = mirrored_split_pose();
    landmarks[LEFT_KNEE] = Landmark::new(0.3, 0.75, VISIBILITY);
    landmarks
}
