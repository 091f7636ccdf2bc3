use crate::export::excel::output_file_path;
use chrono::{DateTime, Local};
use enkk_common::OutputTable;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

/// Timestamp format used in per-run file names
pub const RUN_STAMP_FORMAT: &str = "%Y_%m_%d-%H-%M-%S";

/// State of one run, threaded through the pipeline
#[derive(Debug)]
pub struct RunContext {
    run_stamp: String,
    output_path: PathBuf,
    pub total_rows: usize,
    pub current_index: usize,
    rolling_start: Instant,
    pub output: OutputTable,
}

impl RunContext {
    pub fn new(output_dir: &Path) -> Self {
        Self::started_at(Local::now(), output_dir)
    }

    pub fn started_at(run_start: DateTime<Local>, output_dir: &Path) -> Self {
        let run_stamp = run_start.format(RUN_STAMP_FORMAT).to_string();
        let output_path = output_file_path(output_dir, &run_stamp);

        Self {
            run_stamp,
            output_path,
            total_rows: 0,
            current_index: 0,
            rolling_start: Instant::now(),
            output: OutputTable::new(),
        }
    }

    pub fn run_stamp(&self) -> &str {
        &self.run_stamp
    }

    pub fn output_path(&self) -> &Path {
        &self.output_path
    }

    /// Time since the last throughput report; restarts the window
    pub fn take_rolling_elapsed(&mut self) -> Duration {
        let elapsed = self.rolling_start.elapsed();
        self.rolling_start = Instant::now();
        elapsed
    }

    /// Rolling elapsed time when the current row closes a window of
    /// `every` rows, `None` otherwise
    pub fn throughput_due(&mut self, every: usize) -> Option<Duration> {
        if every == 0 || self.current_index == 0 || self.current_index % every != 0 {
            return None;
        }
        Some(self.take_rolling_elapsed())
    }

    pub fn reset_rolling(&mut self) {
        self.rolling_start = Instant::now();
    }
}
