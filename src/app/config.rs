//! Configuration types for agent and world creation.

use crate::error::{Error, Result};

/// Configuration for creating a [`crate::agent::LearningAgent`].
///
/// All constants are fixed for the lifetime of a run; the core never tunes
/// them. Validation is the caller's concern (the CLI validates before
/// constructing an agent), not the core's.
///
/// # Examples
///
/// ```
/// use smartcab::app::AgentConfig;
///
/// let config = AgentConfig::new().with_epsilon(0.9).with_seed(42);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct AgentConfig {
    /// Optimistic initial value `Q₀` for every action of a new state
    pub q_init: f64,
    /// Learning rate α
    pub alpha: f64,
    /// Discount factor γ
    pub gamma: f64,
    /// Probability of exploiting (not exploring) on a given step
    pub epsilon: f64,
    /// Random seed for reproducibility
    pub seed: Option<u64>,
}

impl AgentConfig {
    /// Create a configuration with the default constants:
    /// `Q₀ = 15.0`, `α = 0.8`, `γ = 0.5`, `ε = 0.95`, unseeded RNG.
    pub fn new() -> Self {
        Self {
            q_init: 15.0,
            alpha: 0.8,
            gamma: 0.5,
            epsilon: 0.95,
            seed: None,
        }
    }

    pub fn with_q_init(mut self, q_init: f64) -> Self {
        self.q_init = q_init;
        self
    }

    pub fn with_alpha(mut self, alpha: f64) -> Self {
        self.alpha = alpha;
        self
    }

    pub fn with_gamma(mut self, gamma: f64) -> Self {
        self.gamma = gamma;
        self
    }

    pub fn with_epsilon(mut self, epsilon: f64) -> Self {
        self.epsilon = epsilon;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Check the constants against their documented ranges.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfiguration`] naming the offending constant.
    pub fn validate(&self) -> Result<()> {
        check_unit_interval("epsilon", self.epsilon)?;
        check_unit_interval("alpha", self.alpha)?;
        check_unit_interval("gamma", self.gamma)?;
        if !self.q_init.is_finite() {
            return Err(Error::InvalidConfiguration {
                message: format!("q_init must be finite, got {}", self.q_init),
            });
        }
        Ok(())
    }
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self::new()
    }
}

fn check_unit_interval(name: &str, value: f64) -> Result<()> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(Error::InvalidConfiguration {
            message: format!("{name} must lie in [0, 1], got {value}"),
        })
    }
}

/// Configuration for the reference grid-world adapter.
#[derive(Debug, Clone, Copy)]
pub struct WorldConfig {
    /// Grid width in intersections
    pub width: usize,
    /// Grid height in intersections
    pub height: usize,
    /// Number of dummy vehicles producing cross traffic
    pub dummies: usize,
    /// Deadline multiplier applied to the start-to-destination distance
    pub deadline_factor: i32,
    /// Whether running out the deadline ends the trial
    pub enforce_deadline: bool,
    /// Random seed for light phases, traffic, and trial setup
    pub seed: Option<u64>,
}

impl WorldConfig {
    pub fn new() -> Self {
        Self {
            width: 8,
            height: 6,
            dummies: 3,
            deadline_factor: 5,
            enforce_deadline: true,
            seed: None,
        }
    }

    pub fn with_grid(mut self, width: usize, height: usize) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    pub fn with_dummies(mut self, dummies: usize) -> Self {
        self.dummies = dummies;
        self
    }

    pub fn with_enforce_deadline(mut self, enforce: bool) -> Self {
        self.enforce_deadline = enforce;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Check the grid is large enough to assign distinct start and
    /// destination intersections.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidGridDimension`] for a degenerate grid.
    pub fn validate(&self) -> Result<()> {
        for (dimension, value) in [("width", self.width), ("height", self.height)] {
            if value < 2 {
                return Err(Error::InvalidGridDimension {
                    dimension,
                    value,
                    minimum: 2,
                });
            }
        }
        Ok(())
    }
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_documented_constants() {
        let config = AgentConfig::default();
        assert_eq!(config.q_init, 15.0);
        assert_eq!(config.alpha, 0.8);
        assert_eq!(config.gamma, 0.5);
        assert_eq!(config.epsilon, 0.95);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn out_of_range_constants_are_rejected() {
        assert!(AgentConfig::new().with_epsilon(1.5).validate().is_err());
        assert!(AgentConfig::new().with_alpha(-0.1).validate().is_err());
        assert!(AgentConfig::new().with_gamma(2.0).validate().is_err());
        assert!(
            AgentConfig::new()
                .with_q_init(f64::INFINITY)
                .validate()
                .is_err()
        );
    }

    #[test]
    fn degenerate_grids_are_rejected() {
        assert!(WorldConfig::new().with_grid(1, 6).validate().is_err());
        assert!(WorldConfig::new().with_grid(8, 1).validate().is_err());
        assert!(WorldConfig::new().with_grid(2, 2).validate().is_ok());
    }
}
