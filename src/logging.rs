// src/logging.rs
//
// Telemetry sinks.
// - EventSink: trait consumed by the episode runner
// - NoopSink:  discards all events
// - FileSink:  writes one JSON object per step (JSONL) for replay/analysis

use std::fs::File;
use std::io::{self, BufWriter, Write};

use serde_json::json;

use crate::env::Observation;

/// Abstract sink for per-step telemetry.
pub trait EventSink {
    fn log_step(
        &mut self,
        episode_id: u64,
        action: i64,
        action_name: &str,
        reward: f64,
        done: bool,
        observation: &Observation,
    );
}

/// Sink that discards all events.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopSink;

impl EventSink for NoopSink {
    fn log_step(
        &mut self,
        _episode_id: u64,
        _action: i64,
        _action_name: &str,
        _reward: f64,
        _done: bool,
        _observation: &Observation,
    ) {
        // intentionally no-op
    }
}

/// JSONL file sink.
///
/// Each step is written as a single JSON object on its own line.
pub struct FileSink {
    writer: BufWriter<File>,
}

impl FileSink {
    /// Create a new sink writing to `path`.
    pub fn create(path: &str) -> io::Result<Self> {
        let file = File::create(path)?;
        Ok(Self {
            writer: BufWriter::new(file),
        })
    }

    /// Flush buffered lines to disk.
    pub fn flush(&mut self) -> io::Result<()> {
        self.writer.flush()
    }
}

impl EventSink for FileSink {
    fn log_step(
        &mut self,
        episode_id: u64,
        action: i64,
        action_name: &str,
        reward: f64,
        done: bool,
        observation: &Observation,
    ) {
        let line = json!({
            "episode": episode_id,
            "step": observation.step,
            "action": action,
            "action_name": action_name,
            "reward": reward,
            "done": done,
            "state": observation.values,
        });
        // best-effort write; episodes never abort on telemetry errors
        let _ = writeln!(self.writer, "{}", line);
    }
}
