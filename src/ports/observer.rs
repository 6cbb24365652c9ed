//! Observer port - abstraction for trial observation and data collection

use crate::{Result, pipeline::trials::TrialRecord, types::Position};

/// Observer trait for monitoring a run of trials.
///
/// Observers compose: progress bars, metrics tracking, and file export all
/// implement this port and are attached to the trial runner independently.
///
/// # Event Sequence
///
/// 1. `on_run_start(total_trials)` - once at the beginning
/// 2. For each trial: `on_trial_start(...)` then `on_trial_end(record)`
/// 3. `on_run_end()` - once at the end
pub trait Observer: Send {
    /// Called before the first trial.
    fn on_run_start(&mut self, _total_trials: usize) -> Result<()> {
        Ok(())
    }

    /// Called when a trial begins, with the assigned destination and the
    /// starting deadline.
    fn on_trial_start(
        &mut self,
        _trial: usize,
        _destination: Position,
        _deadline: i32,
    ) -> Result<()> {
        Ok(())
    }

    /// Called when a trial reaches its terminal condition.
    fn on_trial_end(&mut self, _record: &TrialRecord) -> Result<()> {
        Ok(())
    }

    /// Called after the last trial. Use this to finalize outputs or display
    /// summaries.
    fn on_run_end(&mut self) -> Result<()> {
        Ok(())
    }
}
