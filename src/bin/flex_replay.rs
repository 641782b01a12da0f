//! Replay recorded landmark frames through the tracker.
//!
//! Input is JSON Lines: one frame per line, each an array of 33
//! `[x, y, visibility]` triples. Prints one summary line per frame and
//! the session result at the end.
//!
//! Usage:
//!   cargo run --bin flex-replay -- --input session.jsonl --pose front_split --log data/progress.csv

use std::fs::File;
use std::io::{self, BufRead, BufReader, Write};
use std::path::PathBuf;

use chrono::{DateTime, Duration, Utc};
use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use flex_tracker::bridge::landmarks_from_triples;
use flex_tracker::{
    FlexTracker, FrameDimensions, ProgressLog, Result, SessionSnapshot, TrackerConfig,
    TrackerError,
};

#[derive(Parser)]
#[command(name = "flex-replay", about = "Replay recorded pose landmarks through the flexibility tracker")]
struct Cli {
    /// JSON Lines file of landmark frames
    #[arg(long, short)]
    input: PathBuf,

    /// Pose key, e.g. front_split or forward_fold
    #[arg(long, default_value = "front_split")]
    pose: String,

    /// Frame width in pixels
    #[arg(long, default_value_t = 640)]
    width: u32,

    /// Frame height in pixels
    #[arg(long, default_value_t = 480)]
    height: u32,

    /// Tracker config (JSON); defaults when omitted
    #[arg(long)]
    config: Option<PathBuf>,

    /// Append the session best to this progress log
    #[arg(long)]
    log: Option<PathBuf>,

    /// Run the replay as a timed test window, clocked at the filter frequency
    #[arg(long)]
    test: bool,
}

/// Timestamp of frame number `frames` when replayed at `freq` Hz
fn replay_clock(start: DateTime<Utc>, frames: u32, freq: f32) -> DateTime<Utc> {
    let micros = (f64::from(frames) * 1e6 / f64::from(freq)).round() as i64;
    start + Duration::microseconds(micros)
}

fn print_test_result(out: &mut impl Write, result: Result<SessionSnapshot>) -> Result<()> {
    match result {
        Ok(snapshot) => writeln!(
            out,
            "test complete: best {:.1}, worst {:.1}, average {:.1} over {} frames",
            snapshot.best, snapshot.worst, snapshot.average, snapshot.count
        )?,
        Err(TrackerError::NoSamples) => writeln!(out, "test complete: no confident frames")?,
        Err(e) => return Err(e),
    }
    Ok(())
}

/// Feed every frame of `reader` to the tracker, returns the frame count
///
/// In test mode the window closes once the replay clock reaches its
/// duration, or at end of input if the recording is shorter.
fn replay(
    tracker: &mut FlexTracker,
    reader: impl BufRead,
    dims: FrameDimensions,
    test: bool,
    out: &mut impl Write,
) -> Result<u32> {
    let freq = tracker.config().filter.freq;
    let pose = tracker.current_pose();
    let start = Utc::now();
    if test {
        tracker.start_test(start);
    }

    let mut frames = 0u32;
    for (line_no, line) in reader.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }

        let triples: Vec<[f32; 3]> = match serde_json::from_str(&line) {
            Ok(triples) => triples,
            Err(e) => {
                warn!(line = line_no + 1, error = %e, "skipping malformed frame");
                continue;
            }
        };
        let landmarks = match landmarks_from_triples(&triples) {
            Ok(landmarks) => landmarks,
            Err(e) => {
                warn!(line = line_no + 1, error = %e, "skipping frame");
                continue;
            }
        };

        let report = tracker.process_frame(&landmarks, dims, None);
        frames += 1;

        let filtered = report
            .filtered_metric
            .map(|v| format!("{v:.1}"))
            .unwrap_or_else(|| "-".into());
        writeln!(
            out,
            "frame {frames:>5}  metric {:>6.1}{unit}  score {:>6.1}  filtered {filtered:>6}  conf {:.2}",
            report.metrics.primary_metric,
            report.metrics.progress_value(),
            report.metrics.confidence,
            unit = pose.unit(),
        )?;

        if test && tracker.session().is_testing() {
            match tracker.poll_test(replay_clock(start, frames, freq)) {
                Ok(None) => {}
                Ok(Some(snapshot)) => {
                    print_test_result(out, Ok(snapshot))?;
                    break;
                }
                Err(e) => {
                    print_test_result(out, Err(e))?;
                    break;
                }
            }
        }
    }

    if tracker.session().is_testing() {
        info!(frames, "input ended before the test window elapsed");
        print_test_result(out, tracker.finish_test())?;
    }

    Ok(frames)
}

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();

    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => TrackerConfig::load(path)?,
        None => TrackerConfig::default(),
    };

    let mut tracker = FlexTracker::new(config)?;
    let pose = tracker.select_pose(&cli.pose)?;
    let dims = FrameDimensions::new(cli.width, cli.height)?;
    info!(pose = %pose, input = %cli.input.display(), "replay started");

    let reader = BufReader::new(File::open(&cli.input)?);
    let stdout = io::stdout();
    let mut out = stdout.lock();
    let frames = replay(&mut tracker, reader, dims, cli.test, &mut out)?;

    match tracker.session().best() {
        Some(best) => writeln!(out, "{} best: {best:.1}", pose.display_name())?,
        None => writeln!(out, "{}: no confident frames in {frames} frames", pose.display_name())?,
    }

    if let Some(path) = cli.log {
        let record = tracker.save(&ProgressLog::new(path))?;
        info!(timestamp = %record.timestamp, "progress appended");
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    /// Upright figure facing the camera, fully visible
    fn frame_line() -> String {
        let triples: Vec<[f32; 3]> = (0..33)
            .map(|i| [0.4 + (i % 2) as f32 * 0.2, 0.1 + i as f32 * 0.025, 0.9])
            .collect();
        serde_json::to_string(&triples).unwrap()
    }

    fn input(frames: usize) -> Cursor<String> {
        Cursor::new(vec![frame_line(); frames].join("\n"))
    }

    fn run(frames: usize, test: bool) -> (u32, String) {
        let mut tracker = FlexTracker::new(TrackerConfig::default()).unwrap();
        let dims = FrameDimensions::new(640, 480).unwrap();
        let mut out = Vec::new();
        let count = replay(&mut tracker, input(frames), dims, test, &mut out).unwrap();
        assert!(!tracker.session().is_testing());
        (count, String::from_utf8(out).unwrap())
    }

    #[test]
    fn test_clock_does_not_drift() {
        let start = Utc::now();
        assert_eq!(replay_clock(start, 300, 30.0), start + Duration::seconds(10));
        assert_eq!(replay_clock(start, 1, 30.0), start + Duration::microseconds(33_333));
        assert_eq!(replay_clock(start, 2, 30.0), start + Duration::microseconds(66_667));
    }

    #[test]
    fn test_short_input_closes_window_at_end() {
        let (count, out) = run(100, true);
        assert_eq!(count, 100);
        assert!(out.lines().last().unwrap().ends_with("over 100 frames"), "{out}");
    }

    #[test]
    fn test_window_closes_on_time() {
        let (count, out) = run(400, true);
        assert_eq!(count, 300);
        assert_eq!(out.matches("test complete").count(), 1);
        assert!(out.contains("over 300 frames"), "{out}");
    }

    #[test]
    fn test_free_mode_reports_every_frame() {
        let (count, out) = run(5, false);
        assert_eq!(count, 5);
        assert_eq!(out.lines().count(), 5);
        assert!(!out.contains("test complete"));
    }

    #[test]
    fn test_skips_malformed_lines() {
        let mut tracker = FlexTracker::new(TrackerConfig::default()).unwrap();
        let dims = FrameDimensions::new(640, 480).unwrap();
        let text = format!("{}\nnot json\n[[0.5, 0.5, 0.9]]\n\n{}", frame_line(), frame_line());
        let mut out = Vec::new();
        let count = replay(&mut tracker, Cursor::new(text), dims, false, &mut out).unwrap();
        assert_eq!(count, 2);
    }
}
