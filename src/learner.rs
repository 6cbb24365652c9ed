//! One-step Q-learning update, applied one step in arrears.

use crate::{error::Result, q_table::QTable, state::State, types::Action};

/// A completed step held across exactly one step boundary: the reward for it
/// only becomes known once the environment has responded.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transition {
    pub state: State,
    pub action: Action,
    pub reward: f64,
}

/// Apply the Q-learning update for `prev` using the current `state` to
/// bootstrap:
///
/// Q(s,a) ← Q(s,a) + α[r + γ max_a' Q(s',a') - Q(s,a)]
///
/// The stale Q(s,a) feeds the right-hand side, and `Q_max` is read from
/// `state` before the caller rolls the transition record forward. Returns the
/// updated estimate.
///
/// # Errors
///
/// Returns [`crate::Error::UnseenState`] if either state was never ensured.
pub fn td_update(
    table: &mut QTable,
    prev: &Transition,
    state: &State,
    alpha: f64,
    gamma: f64,
) -> Result<f64> {
    let q_prev = table.value(&prev.state, prev.action)?;
    let (q_max, _) = table.best(state)?;
    let new_q = q_prev + alpha * (prev.reward + gamma * q_max - q_prev);
    table.set(&prev.state, prev.action, new_q)?;
    Ok(new_q)
}
