//! Session module - best-value tracking and progress persistence
//!
//! Re-exports only. All logic in submodules.

mod record;
mod tracker;

pub use record::{ProgressLog, ProgressRecord};
pub use tracker::{SessionSnapshot, SessionStats, SessionTracker};
