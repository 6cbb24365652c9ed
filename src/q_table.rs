//! Sparse Q-table for temporal difference learning.

use std::collections::HashMap;

use crate::{
    error::{Error, Result},
    state::State,
    types::Action,
};

/// Value estimates for the four actions of a single state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ActionValues([f64; 4]);

impl ActionValues {
    fn uniform(value: f64) -> Self {
        Self([value; 4])
    }

    fn get(&self, action: Action) -> f64 {
        self.0[action.index()]
    }

    fn set(&mut self, action: Action, value: f64) {
        self.0[action.index()] = value;
    }
}

/// Sparse mapping from state keys to per-action value estimates.
///
/// States are lazily inserted via [`QTable::ensure`]; once a state is known,
/// all four actions carry an estimate (the table is never partially populated
/// for a known state). Reading a state that was never ensured is a contract
/// violation and fails with [`Error::UnseenState`] rather than defaulting.
#[derive(Debug, Clone)]
pub struct QTable {
    values: HashMap<State, ActionValues>,
    q_init: f64,
}

impl QTable {
    /// Create an empty table with the given optimistic initial value `Q₀`.
    pub fn new(q_init: f64) -> Self {
        Self {
            values: HashMap::new(),
            q_init,
        }
    }

    /// Initial value assigned to every action of a newly ensured state.
    pub fn q_init(&self) -> f64 {
        self.q_init
    }

    /// Insert `state` with every action at `Q₀` if absent. Idempotent:
    /// already-learned estimates are left untouched.
    pub fn ensure(&mut self, state: State) {
        self.values
            .entry(state)
            .or_insert_with(|| ActionValues::uniform(self.q_init));
    }

    /// Current estimate for a state-action pair.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnseenState`] if `state` was never ensured.
    pub fn value(&self, state: &State, action: Action) -> Result<f64> {
        self.entry(state).map(|values| values.get(action))
    }

    /// Maximal estimate over all actions of `state`, together with the set of
    /// actions attaining it. Ties are common early on, when all four actions
    /// still sit at `Q₀`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnseenState`] if `state` was never ensured.
    pub fn best(&self, state: &State) -> Result<(f64, Vec<Action>)> {
        let values = self.entry(state)?;
        let max = Action::ALL
            .iter()
            .map(|&action| values.get(action))
            .fold(f64::NEG_INFINITY, f64::max);
        let tied = Action::ALL
            .into_iter()
            .filter(|&action| values.get(action) == max)
            .collect();
        Ok((max, tied))
    }

    /// Overwrite the estimate for a state-action pair.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnseenState`] if `state` was never ensured.
    pub fn set(&mut self, state: &State, action: Action, value: f64) -> Result<()> {
        match self.values.get_mut(state) {
            Some(values) => {
                values.set(action, value);
                Ok(())
            }
            None => Err(Error::UnseenState {
                state: state.to_string(),
            }),
        }
    }

    /// Whether `state` has been ensured.
    pub fn contains(&self, state: &State) -> bool {
        self.values.contains_key(state)
    }

    /// Number of distinct states observed so far.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    fn entry(&self, state: &State) -> Result<&ActionValues> {
        self.values.get(state).ok_or_else(|| Error::UnseenState {
            state: state.to_string(),
        })
    }
}
