//! Trial pipeline: the driver that runs the agent through episodes.

pub mod observers;
pub mod trials;

pub use observers::{JsonlObserver, MetricsObserver, MetricsSummary, ProgressObserver};
pub use trials::{RunResult, TrialConfig, TrialRecord, TrialRunner};
