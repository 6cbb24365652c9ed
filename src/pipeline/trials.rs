//! Trial runner: repeated episodes against a trial environment.

use serde::{Deserialize, Serialize};

use crate::{
    Result,
    agent::LearningAgent,
    ports::{Observer, RoutePlanner, TrialEnvironment, TrialStatus},
};

/// Run configuration.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct TrialConfig {
    /// Number of trials to drive
    pub n_trials: usize,
}

impl Default for TrialConfig {
    fn default() -> Self {
        Self { n_trials: 100 }
    }
}

/// Outcome of a single trial.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct TrialRecord {
    /// Trial index (0-based)
    pub trial: usize,
    /// Terminal condition the environment reported
    pub outcome: TrialStatus,
    /// Steps taken before the terminal condition
    pub steps: usize,
    /// Deadline granted at trial start
    pub deadline_start: i32,
    /// Reward accumulated over the trial
    pub reward: f64,
    /// Distinct states in the Q-table after the trial
    pub states_known: usize,
}

/// Aggregate result of a run of trials.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunResult {
    /// Trials driven
    pub total_trials: usize,

    /// Trials that reached the destination
    pub reached: usize,

    /// Trials that ran out the deadline
    pub expired: usize,

    /// Fraction of trials that reached the destination
    pub success_rate: f64,

    /// Mean steps per successful trial, if any trial succeeded
    pub avg_steps_to_arrival: Option<f64>,

    /// Mean reward per trial
    pub mean_reward: f64,

    /// Distinct states in the Q-table at the end of the run
    pub states_discovered: usize,
}

impl RunResult {
    /// Aggregate a sequence of trial records.
    pub fn from_records(records: &[TrialRecord]) -> Self {
        let total_trials = records.len();
        let reached = records
            .iter()
            .filter(|r| r.outcome == TrialStatus::Reached)
            .count();
        let expired = total_trials - reached;
        let success_rate = if total_trials > 0 {
            reached as f64 / total_trials as f64
        } else {
            0.0
        };
        let avg_steps_to_arrival = if reached > 0 {
            let steps: usize = records
                .iter()
                .filter(|r| r.outcome == TrialStatus::Reached)
                .map(|r| r.steps)
                .sum();
            Some(steps as f64 / reached as f64)
        } else {
            None
        };
        let mean_reward = if total_trials > 0 {
            records.iter().map(|r| r.reward).sum::<f64>() / total_trials as f64
        } else {
            0.0
        };
        let states_discovered = records.last().map(|r| r.states_known).unwrap_or(0);

        Self {
            total_trials,
            reached,
            expired,
            success_rate,
            avg_steps_to_arrival,
            mean_reward,
            states_discovered,
        }
    }

    /// Save result to JSON file
    pub fn save<P: AsRef<std::path::Path>>(&self, path: P) -> Result<()> {
        let file = std::fs::File::create(path)?;
        serde_json::to_writer_pretty(file, self)?;
        Ok(())
    }

    /// Load result from JSON file
    pub fn load<P: AsRef<std::path::Path>>(path: P) -> Result<Self> {
        let file = std::fs::File::open(path)?;
        let result = serde_json::from_reader(file)?;
        Ok(result)
    }
}

/// Drives one agent through repeated trials against one world.
///
/// Terminal conditions stay with the environment: the runner stops calling
/// [`LearningAgent::update`] as soon as [`TrialEnvironment::status`] leaves
/// `EnRoute`, and never tells the agent a trial ended beyond the reset at the
/// next trial start.
pub struct TrialRunner {
    config: TrialConfig,
    observers: Vec<Box<dyn Observer>>,
}

impl TrialRunner {
    /// Create a new trial runner
    pub fn new(config: TrialConfig) -> Self {
        Self {
            config,
            observers: Vec::new(),
        }
    }

    /// Add an observer to the runner
    pub fn with_observer(mut self, observer: Box<dyn Observer>) -> Self {
        self.observers.push(observer);
        self
    }

    /// Run the configured number of trials.
    pub fn run(
        &mut self,
        agent: &mut LearningAgent,
        env: &mut dyn TrialEnvironment,
        planner: &mut dyn RoutePlanner,
    ) -> Result<RunResult> {
        for observer in &mut self.observers {
            observer.on_run_start(self.config.n_trials)?;
        }

        let mut records = Vec::with_capacity(self.config.n_trials);
        for trial in 0..self.config.n_trials {
            let destination = env.begin_trial();
            let deadline_start = env.deadline();
            agent.reset(destination, planner);

            for observer in &mut self.observers {
                observer.on_trial_start(trial, destination, deadline_start)?;
            }

            let mut t = 0;
            while env.status() == TrialStatus::EnRoute {
                agent.update(t, env, planner)?;
                t += 1;
            }

            let record = TrialRecord {
                trial,
                outcome: env.status(),
                steps: t,
                deadline_start,
                reward: env.trial_reward(),
                states_known: agent.q_table().len(),
            };
            for observer in &mut self.observers {
                observer.on_trial_end(&record)?;
            }
            records.push(record);
        }

        for observer in &mut self.observers {
            observer.on_run_end()?;
        }

        Ok(RunResult::from_records(&records))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        adapters::GridWorld,
        app::{AgentConfig, WorldConfig},
    };

    #[test]
    fn runner_drives_the_requested_number_of_trials() {
        let (mut env, mut planner) =
            GridWorld::build(WorldConfig::new().with_grid(4, 4).with_seed(99));
        let mut agent = LearningAgent::new(AgentConfig::new().with_seed(99));

        let mut runner = TrialRunner::new(TrialConfig { n_trials: 5 });
        let result = runner.run(&mut agent, &mut env, &mut planner).unwrap();

        assert_eq!(result.total_trials, 5);
        assert_eq!(result.reached + result.expired, 5);
        assert!(result.states_discovered > 0);
        assert_eq!(result.states_discovered, agent.q_table().len());
    }

    #[test]
    fn aggregation_handles_an_empty_run() {
        let result = RunResult::from_records(&[]);
        assert_eq!(result.total_trials, 0);
        assert_eq!(result.success_rate, 0.0);
        assert!(result.avg_steps_to_arrival.is_none());
    }
}
