//! Per-frame pipeline: analyze → gate → filter → track
//!
//! Also stabilizes one joint with the Kalman filter for display. One
//! call per received frame, fully synchronous. The owner is expected to
//! call [`FlexTracker::source_changed`] when the frame source changes.

use chrono::{DateTime, Duration, Utc};
use serde::Serialize;
use tracing::debug;

use crate::analysis::{AnnotationSink, PoseAnalysisRegistry, PoseMetrics, PoseType};
use crate::bridge::{FrameDimensions, Landmarks};
use crate::config::TrackerConfig;
use crate::error::Result;
use crate::physics::{ConfidenceGate, GateDecision, KalmanFilter, OneEuroFilter, Point};
use crate::session::{ProgressLog, ProgressRecord, SessionSnapshot, SessionTracker};

/// Everything the shell needs to display one frame
#[derive(Debug, Clone, Serialize)]
pub struct FrameReport {
    /// Always present, even for low-confidence frames
    pub metrics: PoseMetrics,
    pub decision: GateDecision,
    /// Smoothed progress value, only for accepted frames
    pub filtered_metric: Option<f32>,
    /// Kalman-smoothed position of the configured joint, in pixels
    pub stabilized_point: Point,
}

pub struct FlexTracker {
    config: TrackerConfig,
    registry: PoseAnalysisRegistry,
    metric_filter: OneEuroFilter,
    gate: ConfidenceGate,
    stabilizer: KalmanFilter,
    session: SessionTracker,
}

impl FlexTracker {
    pub fn new(config: TrackerConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            registry: PoseAnalysisRegistry::new(config.reference_height_cm),
            metric_filter: OneEuroFilter::new(config.filter),
            gate: ConfidenceGate::new(config.confidence_threshold),
            stabilizer: KalmanFilter::new(config.stabilizer),
            session: SessionTracker::new(),
            config,
        })
    }

    /// Process one frame's landmarks
    pub fn process_frame(
        &mut self,
        landmarks: &Landmarks,
        dims: FrameDimensions,
        sink: Option<&mut dyn AnnotationSink>,
    ) -> FrameReport {
        let metrics = self.registry.analyze(landmarks, dims, sink);

        let decision = self.gate.apply(metrics.progress_value(), metrics.confidence);
        let filtered_metric = match decision {
            GateDecision::Accepted(value) => {
                let filtered = self.metric_filter.filter(value);
                self.session.update(filtered);
                Some(filtered)
            }
            GateDecision::Held(_) => {
                debug!(
                    confidence = metrics.confidence,
                    threshold = self.gate.threshold(),
                    "low confidence frame held back"
                );
                None
            }
        };

        let joint = landmarks[self.config.stabilized_landmark].to_pixels(dims);
        self.stabilizer.predict();
        let stabilized_point = self.stabilizer.update(joint);

        FrameReport {
            metrics,
            decision,
            filtered_metric,
            stabilized_point,
        }
    }

    /// Switch pose; a different pose starts a fresh metric signal and session
    pub fn select_pose(&mut self, key: &str) -> Result<PoseType> {
        let previous = self.registry.current();
        let pose = self.registry.select(key)?;
        if pose != previous {
            self.metric_filter.reset();
            self.gate.reset();
            self.session.reset();
        }
        Ok(pose)
    }

    /// New frame source: discard all carried signal history
    pub fn source_changed(&mut self) {
        self.metric_filter.reset();
        self.gate.reset();
        self.stabilizer.reset();
        debug!("frame source changed, filters reset");
    }

    pub fn reset_session(&mut self) {
        self.session.reset();
    }

    /// Open a test window of the configured length
    pub fn start_test(&mut self, now: DateTime<Utc>) {
        let duration = Duration::seconds(i64::from(self.config.test_window_secs));
        self.session.start_test(duration, now);
    }

    /// Close the test window once it has elapsed
    ///
    /// `Ok(None)` while no window is due; `Err(NoSamples)` if it closed
    /// without a single accepted frame.
    pub fn poll_test(&mut self, now: DateTime<Utc>) -> Result<Option<SessionSnapshot>> {
        if !self.session.window_elapsed(now) {
            return Ok(None);
        }
        self.session.finish_test().map(Some)
    }

    /// Close the test window now, elapsed or not
    pub fn finish_test(&mut self) -> Result<SessionSnapshot> {
        self.session.finish_test()
    }

    /// Append the current best to the progress log
    pub fn save(&self, log: &ProgressLog) -> Result<ProgressRecord> {
        let record = ProgressRecord::new(self.registry.current_name(), self.session.best());
        log.append(&record)?;
        Ok(record)
    }

    pub fn current_pose(&self) -> PoseType {
        self.registry.current()
    }

    pub fn registry(&self) -> &PoseAnalysisRegistry {
        &self.registry
    }

    pub fn session(&self) -> &SessionTracker {
        &self.session
    }

    pub fn config(&self) -> &TrackerConfig {
        &self.config
    }
}
