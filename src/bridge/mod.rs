//! Bridge module - detector ↔ Rust communication
//!
//! Landmark contract for every target; #[wasm_bindgen] entry points
//! only on wasm32. Re-exports only in mod.rs, logic in submodules.

mod landmarks;

#[cfg(target_arch = "wasm32")]
mod wasm_api;

pub use landmarks::{
    landmarks_from_flat, landmarks_from_triples, mean_visibility, pixel, FrameDimensions,
    Landmark, Landmarks,
    // Constants
    LANDMARK_COUNT, VALUES_PER_LANDMARK,
    NOSE, LEFT_SHOULDER, RIGHT_SHOULDER,
    LEFT_ELBOW, RIGHT_ELBOW,
    LEFT_WRIST, RIGHT_WRIST,
    LEFT_HIP, RIGHT_HIP,
    LEFT_KNEE, RIGHT_KNEE,
    LEFT_ANKLE, RIGHT_ANKLE,
    LEFT_HEEL, RIGHT_HEEL,
    LEFT_FOOT_INDEX, RIGHT_FOOT_INDEX,
};

#[cfg(target_arch = "wasm32")]
pub use wasm_api::TrackerHandle;
