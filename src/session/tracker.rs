//! Session statistics over accepted metric values
//!
//! Free mode only tracks the best value. Test mode additionally
//! aggregates worst/count/sum over a fixed-duration window.

use chrono::{DateTime, Duration, Utc};
use serde::Serialize;
use tracing::info;

use crate::error::{Result, TrackerError};

/// Raw accumulators, reset at session start and at each test window
#[derive(Debug, Clone, PartialEq)]
pub struct SessionStats {
    pub best: Option<f32>,
    pub worst: Option<f32>,
    pub count: u32,
    pub sum: f64,
    pub session_start: DateTime<Utc>,
}

impl SessionStats {
    fn new(now: DateTime<Utc>) -> Self {
        Self {
            best: None,
            worst: None,
            count: 0,
            sum: 0.0,
            session_start: now,
        }
    }
}

/// Summary reported when a window closes
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SessionSnapshot {
    pub best: f32,
    pub worst: f32,
    pub count: u32,
    pub average: f32,
    pub session_start: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum TrackingMode {
    Free,
    Test { started: DateTime<Utc>, duration: Duration },
}

#[derive(Debug, Clone)]
pub struct SessionTracker {
    stats: SessionStats,
    mode: TrackingMode,
}

impl SessionTracker {
    pub fn new() -> Self {
        Self::starting_at(Utc::now())
    }

    pub fn starting_at(now: DateTime<Utc>) -> Self {
        Self {
            stats: SessionStats::new(now),
            mode: TrackingMode::Free,
        }
    }

    /// Feed one accepted value
    pub fn update(&mut self, value: f32) {
        let stats = &mut self.stats;
        if stats.best.map_or(true, |best| value > best) {
            stats.best = Some(value);
        }

        if let TrackingMode::Test { .. } = self.mode {
            if stats.worst.map_or(true, |worst| value < worst) {
                stats.worst = Some(value);
            }
            stats.count += 1;
            stats.sum += f64::from(value);
        }
    }

    /// Summary of the aggregated values; `NoSamples` if none
    pub fn snapshot(&self) -> Result<SessionSnapshot> {
        let stats = &self.stats;
        match (stats.best, stats.worst) {
            (Some(best), Some(worst)) if stats.count > 0 => Ok(SessionSnapshot {
                best,
                worst,
                count: stats.count,
                average: (stats.sum / f64::from(stats.count)) as f32,
                session_start: stats.session_start,
            }),
            _ => Err(TrackerError::NoSamples),
        }
    }

    /// Clear all statistics and restart the session clock
    pub fn reset(&mut self) {
        self.reset_at(Utc::now());
    }

    pub fn reset_at(&mut self, now: DateTime<Utc>) {
        self.stats = SessionStats::new(now);
        info!("session reset");
    }

    /// Clear statistics and start aggregating for `duration`
    pub fn start_test(&mut self, duration: Duration, now: DateTime<Utc>) {
        self.stats = SessionStats::new(now);
        self.mode = TrackingMode::Test { started: now, duration };
        info!(duration_secs = duration.num_seconds(), "test window opened");
    }

    pub fn is_testing(&self) -> bool {
        matches!(self.mode, TrackingMode::Test { .. })
    }

    /// Whether a running test window has reached its duration
    pub fn window_elapsed(&self, now: DateTime<Utc>) -> bool {
        match self.mode {
            TrackingMode::Test { started, duration } => now - started >= duration,
            TrackingMode::Free => false,
        }
    }

    /// Close the test window, returning to free mode
    pub fn finish_test(&mut self) -> Result<SessionSnapshot> {
        self.mode = TrackingMode::Free;
        let snapshot = self.snapshot();
        match &snapshot {
            Ok(s) => info!(best = s.best, worst = s.worst, count = s.count, average = s.average, "test window closed"),
            Err(_) => info!("test window closed without samples"),
        }
        snapshot
    }

    pub fn best(&self) -> Option<f32> {
        self.stats.best
    }

    pub fn stats(&self) -> &SessionStats {
        &self.stats
    }
}

impl Default for SessionTracker {
    fn default() -> Self {
        Self::new()
    }
}
