//! Append-only progress log
//!
//! One line per explicit save: `timestamp,pose,best`. No header, no
//! schema versioning.

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::info;

use crate::error::Result;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProgressRecord {
    pub timestamp: DateTime<Utc>,
    /// Pose display name, e.g. "Front Split"
    pub pose: String,
    pub best: Option<f32>,
}

impl ProgressRecord {
    pub fn new(pose: impl Into<String>, best: Option<f32>) -> Self {
        Self {
            timestamp: Utc::now(),
            pose: pose.into(),
            best,
        }
    }

    fn to_line(&self) -> String {
        let best = self.best.map(|b| b.to_string()).unwrap_or_default();
        format!("{},{},{}\n", self.timestamp.to_rfc3339(), self.pose, best)
    }
}

#[derive(Debug, Clone)]
pub struct ProgressLog {
    path: PathBuf,
}

impl ProgressLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append one record, creating the file and parent directories on demand
    pub fn append(&self, record: &ProgressRecord) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }

        let mut file = OpenOptions::new().create(true).append(true).open(&self.path)?;
        file.write_all(record.to_line().as_bytes())?;

        info!(path = %self.path.display(), pose = %record.pose, best = ?record.best, "progress saved");
        Ok(())
    }
}

impl Default for ProgressLog {
    fn default() -> Self {
        Self::new("data/progress.csv")
    }
}
