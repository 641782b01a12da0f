//! Browser entry points
//!
//! JS owns one `TrackerHandle` per camera view and feeds it the flat
//! Float32Array from MediaPipe (33 landmarks × x, y, visibility).
//! Results cross the boundary as JSON strings.

use serde::Serialize;
use wasm_bindgen::prelude::*;

use super::landmarks::{landmarks_from_flat, FrameDimensions};
use crate::analysis::AnnotationBuffer;
use crate::config::TrackerConfig;
use crate::error::TrackerError;
use crate::pipeline::{FlexTracker, FrameReport};
use crate::session::ProgressRecord;

/// Called automatically when WASM module loads
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
    tracing_wasm::set_as_global_default();
}

fn to_js(err: TrackerError) -> JsValue {
    JsValue::from_str(&err.to_string())
}

fn to_json<T: Serialize>(value: &T) -> Result<String, JsValue> {
    serde_json::to_string(value).map_err(|e| to_js(e.into()))
}

#[derive(Serialize)]
struct FrameOutput<'a> {
    #[serde(flatten)]
    report: &'a FrameReport,
    annotations: &'a AnnotationBuffer,
}

#[wasm_bindgen]
pub struct TrackerHandle {
    tracker: FlexTracker,
    annotations: AnnotationBuffer,
}

#[wasm_bindgen]
impl TrackerHandle {
    /// Build from a JSON config; an empty string means defaults
    #[wasm_bindgen(constructor)]
    pub fn new(config_json: &str) -> Result<TrackerHandle, JsValue> {
        let config = if config_json.trim().is_empty() {
            TrackerConfig::default()
        } else {
            TrackerConfig::from_json(config_json).map_err(to_js)?
        };
        Ok(Self {
            tracker: FlexTracker::new(config).map_err(to_js)?,
            annotations: AnnotationBuffer::default(),
        })
    }

    /// Process one detector frame, returns the frame report as JSON
    pub fn process(&mut self, data: &[f32], width: u32, height: u32) -> Result<String, JsValue> {
        let landmarks = landmarks_from_flat(data).map_err(to_js)?;
        let dims = FrameDimensions::new(width, height).map_err(to_js)?;

        self.annotations.clear();
        let report = self.tracker.process_frame(&landmarks, dims, Some(&mut self.annotations));
        to_json(&FrameOutput {
            report: &report,
            annotations: &self.annotations,
        })
    }

    #[wasm_bindgen(js_name = selectPose)]
    pub fn select_pose(&mut self, key: &str) -> Result<String, JsValue> {
        let pose = self.tracker.select_pose(key).map_err(to_js)?;
        Ok(pose.display_name().to_string())
    }

    #[wasm_bindgen(js_name = availablePoses)]
    pub fn available_poses(&self) -> Vec<String> {
        self.tracker
            .registry()
            .available_poses()
            .into_iter()
            .map(String::from)
            .collect()
    }

    /// Unit label of the current pose's metric
    pub fn unit(&self) -> String {
        self.tracker.registry().current_unit().to_string()
    }

    /// Call when the camera or video file changes
    #[wasm_bindgen(js_name = sourceChanged)]
    pub fn source_changed(&mut self) {
        self.tracker.source_changed();
    }

    #[wasm_bindgen(js_name = resetSession)]
    pub fn reset_session(&mut self) {
        self.tracker.reset_session();
    }

    pub fn best(&self) -> Option<f32> {
        self.tracker.session().best()
    }

    #[wasm_bindgen(js_name = startTest)]
    pub fn start_test(&mut self) {
        self.tracker.start_test(chrono::Utc::now());
    }

    /// Snapshot JSON once the test window has closed, `undefined` before
    #[wasm_bindgen(js_name = pollTest)]
    pub fn poll_test(&mut self) -> Result<Option<String>, JsValue> {
        match self.tracker.poll_test(chrono::Utc::now()).map_err(to_js)? {
            Some(snapshot) => to_json(&snapshot).map(Some),
            None => Ok(None),
        }
    }

    /// Progress record JSON for the shell to persist
    ///
    /// The browser has no filesystem, so storage is left to JS.
    #[wasm_bindgen(js_name = progressRecord)]
    pub fn progress_record(&self) -> Result<String, JsValue> {
        let record = ProgressRecord::new(
            self.tracker.registry().current_name(),
            self.tracker.session().best(),
        );
        to_json(&record)
    }
}
