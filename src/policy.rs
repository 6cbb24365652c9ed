//! Epsilon-greedy action selection over the Q-table.

use rand::{Rng, rngs::StdRng, seq::IndexedRandom};

use crate::{error::Result, q_table::QTable, state::State, types::Action};

/// Epsilon-greedy policy.
///
/// `epsilon` is the probability of *exploiting*, the reverse of the textbook
/// convention: with probability `epsilon`
/// the policy picks uniformly among the actions tied at the maximal estimate,
/// otherwise it picks uniformly among all four actions. A freshly ensured
/// state has all four actions tied at `Q₀`, so the exploit branch degenerates
/// to a uniform pick there.
#[derive(Debug, Clone, Copy)]
pub struct Policy {
    epsilon: f64,
}

impl Policy {
    pub fn new(epsilon: f64) -> Self {
        Self { epsilon }
    }

    /// Probability of taking the exploit branch.
    pub fn epsilon(&self) -> f64 {
        self.epsilon
    }

    /// Select an action for `state`, which must already be ensured in
    /// `table`.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::UnseenState`] if the caller broke the
    /// ensure-before-select contract.
    pub fn select(&self, table: &QTable, state: &State, rng: &mut StdRng) -> Result<Action> {
        if rng.random::<f64>() < self.epsilon {
            // Exploit: uniform pick among the tied maximal actions
            let (_, tied) = table.best(state)?;
            Ok(*tied.choose(rng).expect("best() returns at least one action"))
        } else {
            // Explore: uniform pick over the whole action set
            Ok(*Action::ALL
                .choose(rng)
                .expect("action set is non-empty"))
        }
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;

    use super::*;
    use crate::{
        state::Percepts,
        types::{Heading, Light},
    };

    fn known_state(table: &mut QTable) -> State {
        let state = State::encode(
            Some(Heading::Left),
            &Percepts {
                light: Light::Red,
                oncoming: None,
                left: None,
                right: None,
            },
        );
        table.ensure(state);
        state
    }

    #[test]
    fn epsilon_one_always_exploits_the_unique_maximum() {
        let mut table = QTable::new(0.0);
        let state = known_state(&mut table);
        table.set(&state, Action::Right, 5.0).unwrap();

        let policy = Policy::new(1.0);
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..200 {
            assert_eq!(policy.select(&table, &state, &mut rng).unwrap(), Action::Right);
        }
    }

    #[test]
    fn epsilon_zero_explores_uniformly() {
        let mut table = QTable::new(0.0);
        let state = known_state(&mut table);
        table.set(&state, Action::Right, 100.0).unwrap();

        let policy = Policy::new(0.0);
        let mut rng = StdRng::seed_from_u64(11);
        let mut counts = [0usize; 4];
        for _ in 0..4000 {
            let action = policy.select(&table, &state, &mut rng).unwrap();
            counts[action.index()] += 1;
        }

        // Uniform over four actions: each should land near 1000 draws.
        for count in counts {
            assert!((700..=1300).contains(&count), "skewed counts: {counts:?}");
        }
    }

    #[test]
    fn exploit_branch_breaks_ties_uniformly() {
        let mut table = QTable::new(0.0);
        let state = known_state(&mut table);
        table.set(&state, Action::Forward, 4.0).unwrap();
        table.set(&state, Action::Left, 4.0).unwrap();
        table.set(&state, Action::Stay, -1.0).unwrap();
        table.set(&state, Action::Right, -1.0).unwrap();

        let policy = Policy::new(1.0);
        let mut rng = StdRng::seed_from_u64(23);
        let mut counts = [0usize; 4];
        for _ in 0..4000 {
            let action = policy.select(&table, &state, &mut rng).unwrap();
            counts[action.index()] += 1;
        }

        assert_eq!(counts[Action::Stay.index()], 0);
        assert_eq!(counts[Action::Right.index()], 0);
        let forward = counts[Action::Forward.index()] as f64;
        let left = counts[Action::Left.index()] as f64;
        assert!((forward / left - 1.0).abs() < 0.2, "skewed counts: {counts:?}");
    }
}
