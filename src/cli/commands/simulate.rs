//! Simulate command - non-learning random baseline for comparison.

use anyhow::Result;
use clap::Parser;

use crate::{
    adapters::GridWorld,
    agent::LearningAgent,
    app::{AgentConfig, WorldConfig},
    pipeline::{ProgressObserver, TrialConfig, TrialRunner},
};

#[derive(Parser, Debug)]
#[command(about = "Run a random-policy baseline")]
pub struct SimulateArgs {
    /// Number of trials
    #[arg(long, short = 'n', default_value_t = 100)]
    pub trials: usize,

    /// Grid width in intersections
    #[arg(long, default_value_t = 8)]
    pub grid_width: usize,

    /// Grid height in intersections
    #[arg(long, default_value_t = 6)]
    pub grid_height: usize,

    /// Number of dummy vehicles
    #[arg(long, default_value_t = 3)]
    pub dummies: usize,

    /// Random seed for reproducibility
    #[arg(long)]
    pub seed: Option<u64>,

    /// Show progress bar (pass false for quiet runs)
    #[arg(long, default_value_t = true, action = clap::ArgAction::Set)]
    pub progress: bool,
}

pub fn execute(args: SimulateArgs) -> Result<()> {
    // epsilon = 0.0 never exploits, so the table never influences behavior:
    // a pure random driver.
    let agent_config = AgentConfig::new().with_epsilon(0.0);
    let agent_config = match args.seed {
        Some(seed) => agent_config.with_seed(seed.wrapping_add(1)),
        None => agent_config,
    };

    let world_config = WorldConfig::new()
        .with_grid(args.grid_width, args.grid_height)
        .with_dummies(args.dummies);
    let world_config = match args.seed {
        Some(seed) => world_config.with_seed(seed),
        None => world_config,
    };
    world_config.validate()?;

    let (mut env, mut planner) = GridWorld::build(world_config);
    let mut agent = LearningAgent::new(agent_config);

    let mut runner = TrialRunner::new(TrialConfig {
        n_trials: args.trials,
    });
    if args.progress {
        runner = runner.with_observer(Box::new(ProgressObserver::new()));
    }

    let result = runner.run(&mut agent, &mut env, &mut planner)?;

    println!("\n=== Baseline Complete ===");
    println!("Total trials: {}", result.total_trials);
    println!(
        "Reached destination: {} ({:.1}%)",
        result.reached,
        result.success_rate * 100.0
    );
    println!("Deadline expired: {}", result.expired);
    println!("Mean reward per trial: {:.2}", result.mean_reward);

    Ok(())
}

#[cfg(test)]
mod tests {
    use clap::Parser;

    use super::*;

    #[test]
    fn progress_bar_can_be_switched_off() {
        let args = SimulateArgs::try_parse_from(["simulate"]).unwrap();
        assert!(args.progress);

        let args = SimulateArgs::try_parse_from(["simulate", "--progress=false"]).unwrap();
        assert!(!args.progress);
    }
}
