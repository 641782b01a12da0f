//! Analysis module - per-pose flexibility metrics
//!
//! Re-exports only. All logic in submodules.

mod annotations;
mod calibration;
mod forward_fold;
mod front_split;
mod metrics;
mod registry;

#[cfg(test)]
pub(crate) mod fixtures;

pub use annotations::{AnnotationBuffer, AnnotationSink, GuideLine};
pub use calibration::Calibration;
pub use forward_fold::ForwardFoldAnalyzer;
pub use front_split::{FrontSplitAnalyzer, DEFAULT_REFERENCE_HEIGHT_CM};
pub use metrics::{PoseMetrics, PoseType};
pub use registry::{PoseAnalysisRegistry, PoseAnalyzer};
