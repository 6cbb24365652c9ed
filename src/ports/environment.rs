//! Environment port - the world as the agent and the trial driver see it.

use serde::{Deserialize, Serialize};

use crate::{
    state::Percepts,
    types::{Action, Position},
};

/// The agent-facing face of the world: one sense/act exchange per simulated
/// step.
///
/// Reward sign and magnitude are owned entirely by the environment; the
/// learning core only folds them into its value estimates.
pub trait Environment {
    /// Percepts at the agent's current intersection.
    fn sense(&self) -> Percepts;

    /// Steps remaining before the trial deadline. Sensed every step; not part
    /// of the learned state.
    fn deadline(&self) -> i32;

    /// Submit an action; the world advances one tick and returns the reward.
    fn act(&mut self, action: Action) -> f64;
}

/// How the current trial stands, as judged by the environment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TrialStatus {
    /// Still driving.
    EnRoute,
    /// Arrived at the assigned destination.
    Reached,
    /// Out of time (or hard-aborted when the deadline is not enforced).
    Expired,
}

/// The driver-facing face of the world: trial lifecycle on top of
/// [`Environment`].
pub trait TrialEnvironment: Environment {
    /// Reseed the world for a fresh trial and return the assigned
    /// destination.
    fn begin_trial(&mut self) -> Position;

    /// Terminal-condition check; the driver stops calling the agent once this
    /// leaves [`TrialStatus::EnRoute`].
    fn status(&self) -> TrialStatus;

    /// Reward accumulated by the agent since the last [`begin_trial`] call.
    ///
    /// [`begin_trial`]: TrialEnvironment::begin_trial
    fn trial_reward(&self) -> f64;
}
