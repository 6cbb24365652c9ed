//! Observers for trial runs
//!
//! Observers allow composable data collection during a run without coupling
//! the trial loop to specific output formats.

use std::{
    collections::VecDeque,
    fs::File,
    io::{BufWriter, Write},
    path::Path,
};

use indicatif::{ProgressBar, ProgressStyle};
use serde::{Deserialize, Serialize};

use crate::{
    Result,
    pipeline::trials::TrialRecord,
    ports::{Observer, TrialStatus},
};

/// Progress bar observer - shows run progress
pub struct ProgressObserver {
    progress_bar: Option<ProgressBar>,
    reached: usize,
    expired: usize,
}

impl ProgressObserver {
    pub fn new() -> Self {
        Self {
            progress_bar: None,
            reached: 0,
            expired: 0,
        }
    }
}

impl Default for ProgressObserver {
    fn default() -> Self {
        Self::new()
    }
}

impl Observer for ProgressObserver {
    fn on_run_start(&mut self, total_trials: usize) -> Result<()> {
        let pb = ProgressBar::new(total_trials as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("[{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} trials ({msg})")
                .map_err(|e| crate::Error::ProgressBarTemplate {
                    message: e.to_string(),
                })?
                .progress_chars("=>-"),
        );
        self.progress_bar = Some(pb);
        Ok(())
    }

    fn on_trial_end(&mut self, record: &TrialRecord) -> Result<()> {
        match record.outcome {
            TrialStatus::Reached => self.reached += 1,
            _ => self.expired += 1,
        }

        if let Some(pb) = &self.progress_bar {
            pb.set_position(record.trial as u64 + 1);
            pb.set_message(format!("R:{} E:{}", self.reached, self.expired));
        }
        Ok(())
    }

    fn on_run_end(&mut self) -> Result<()> {
        if let Some(pb) = &self.progress_bar {
            pb.finish_with_message(format!("R:{} E:{}", self.reached, self.expired));
        }
        Ok(())
    }
}

/// Metrics observer - tracks run metrics including a recent-window success
/// rate, which is the quantity that actually shows learning (early failures
/// stop dragging it down once the policy converges).
pub struct MetricsObserver {
    reached: usize,
    expired: usize,
    arrival_steps: Vec<usize>,
    recent: VecDeque<bool>,
    window: usize,
}

impl MetricsObserver {
    pub fn new() -> Self {
        Self::with_window(10)
    }

    pub fn with_window(window: usize) -> Self {
        Self {
            reached: 0,
            expired: 0,
            arrival_steps: Vec::new(),
            recent: VecDeque::new(),
            window,
        }
    }

    pub fn total_trials(&self) -> usize {
        self.reached + self.expired
    }

    pub fn success_rate(&self) -> f64 {
        if self.total_trials() == 0 {
            0.0
        } else {
            self.reached as f64 / self.total_trials() as f64
        }
    }

    /// Success rate over the last `window` trials.
    pub fn recent_success_rate(&self) -> f64 {
        if self.recent.is_empty() {
            0.0
        } else {
            let hits = self.recent.iter().filter(|&&r| r).count();
            hits as f64 / self.recent.len() as f64
        }
    }

    pub fn avg_steps_to_arrival(&self) -> Option<f64> {
        if self.arrival_steps.is_empty() {
            None
        } else {
            Some(
                self.arrival_steps.iter().sum::<usize>() as f64 / self.arrival_steps.len() as f64,
            )
        }
    }

    pub fn summary(&self) -> MetricsSummary {
        MetricsSummary {
            total_trials: self.total_trials(),
            reached: self.reached,
            expired: self.expired,
            success_rate: self.success_rate(),
            recent_success_rate: self.recent_success_rate(),
            avg_steps_to_arrival: self.avg_steps_to_arrival(),
        }
    }
}

impl Default for MetricsObserver {
    fn default() -> Self {
        Self::new()
    }
}

/// Summary of run metrics
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetricsSummary {
    pub total_trials: usize,
    pub reached: usize,
    pub expired: usize,
    pub success_rate: f64,
    pub recent_success_rate: f64,
    pub avg_steps_to_arrival: Option<f64>,
}

impl Observer for MetricsObserver {
    fn on_trial_end(&mut self, record: &TrialRecord) -> Result<()> {
        let success = record.outcome == TrialStatus::Reached;
        if success {
            self.reached += 1;
            self.arrival_steps.push(record.steps);
        } else {
            self.expired += 1;
        }

        self.recent.push_back(success);
        if self.recent.len() > self.window {
            self.recent.pop_front();
        }
        Ok(())
    }
}

/// JSONL observer - exports one trial record per line
pub struct JsonlObserver {
    writer: BufWriter<File>,
}

impl JsonlObserver {
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::create(path)?;
        Ok(Self {
            writer: BufWriter::new(file),
        })
    }
}

impl Observer for JsonlObserver {
    fn on_trial_end(&mut self, record: &TrialRecord) -> Result<()> {
        serde_json::to_writer(&mut self.writer, record)?;
        writeln!(&mut self.writer)?;
        Ok(())
    }

    fn on_run_end(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}
