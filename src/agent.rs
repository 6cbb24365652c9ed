//! The learning agent: per-step orchestration of encode, select, act, learn.

use rand::{SeedableRng, rngs::StdRng};

use crate::{
    app::AgentConfig,
    error::Result,
    learner::{self, Transition},
    policy::Policy,
    ports::{Environment, RoutePlanner},
    q_table::QTable,
    state::State,
    types::Position,
};

fn build_rng(seed: Option<u64>) -> StdRng {
    if let Some(seed) = seed {
        StdRng::seed_from_u64(seed)
    } else {
        StdRng::from_rng(&mut rand::rng())
    }
}

/// Tabular Q-learning agent driving toward a per-trial destination.
///
/// The agent owns the only long-lived mutable resource, its Q-table, for its
/// entire lifetime: learning accumulates across trials. The rolled-forward
/// transition record lives across exactly one step boundary and is cleared at
/// every trial start, so the first step of a trial never mutates the table.
#[derive(Debug, Clone)]
pub struct LearningAgent {
    q_table: QTable,
    policy: Policy,
    alpha: f64,
    gamma: f64,
    rng: StdRng,
    prev: Option<Transition>,
}

impl LearningAgent {
    /// Create an agent with an empty Q-table.
    pub fn new(config: AgentConfig) -> Self {
        Self {
            q_table: QTable::new(config.q_init),
            policy: Policy::new(config.epsilon),
            alpha: config.alpha,
            gamma: config.gamma,
            rng: build_rng(config.seed),
            prev: None,
        }
    }

    /// Prepare for a new trial: replan toward `destination` and clear the
    /// rolled transition record. The Q-table is deliberately left intact.
    pub fn reset(&mut self, destination: Position, planner: &mut dyn RoutePlanner) {
        planner.route_to(destination);
        self.prev = None;
    }

    /// Process one simulated tick.
    ///
    /// In order: query the planner and sense the environment, encode the
    /// state, ensure it in the Q-table, select an action, submit it for a
    /// reward, apply the learning update for the *previous* transition (the
    /// bootstrap value must come from the current state before it rolls
    /// forward), then roll state/action/reward into the transition record.
    ///
    /// # Errors
    ///
    /// Propagates Q-table contract violations; with the ensure calls below
    /// these cannot occur unless the table is mutated behind the agent's
    /// back.
    pub fn update(
        &mut self,
        _t: usize,
        env: &mut dyn Environment,
        planner: &mut dyn RoutePlanner,
    ) -> Result<()> {
        let waypoint = planner.next_waypoint();
        let percepts = env.sense();
        // Sensed but excluded from the learned state.
        let _deadline = env.deadline();

        let state = State::encode(waypoint, &percepts);
        self.q_table.ensure(state);

        let action = self.policy.select(&self.q_table, &state, &mut self.rng)?;
        let reward = env.act(action);

        if let Some(prev) = &self.prev {
            learner::td_update(&mut self.q_table, prev, &state, self.alpha, self.gamma)?;
        }

        self.prev = Some(Transition {
            state,
            action,
            reward,
        });
        Ok(())
    }

    /// Replace the exploit probability, e.g. for a greedy evaluation phase.
    pub fn set_epsilon(&mut self, epsilon: f64) {
        self.policy = Policy::new(epsilon);
    }

    pub fn epsilon(&self) -> f64 {
        self.policy.epsilon()
    }

    /// Read access to the learned table.
    pub fn q_table(&self) -> &QTable {
        &self.q_table
    }

    /// The transition awaiting its learning update, if any.
    pub fn pending_transition(&self) -> Option<&Transition> {
        self.prev.as_ref()
    }
}
