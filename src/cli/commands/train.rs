//! Train command - run learning trials on the grid world.

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use serde::Serialize;

use crate::{
    adapters::GridWorld,
    app::{AgentConfig, WorldConfig},
    export::CsvObserver,
    pipeline::{JsonlObserver, ProgressObserver, RunResult, TrialConfig, TrialRunner},
};

#[derive(Parser, Debug)]
#[command(about = "Train the Q-learning agent", allow_negative_numbers = true)]
pub struct TrainArgs {
    /// Number of learning trials
    #[arg(long, short = 'n', default_value_t = 100)]
    pub trials: usize,

    /// Probability of exploiting the best-known action (NOT the textbook
    /// exploration rate)
    #[arg(long, default_value_t = 0.95)]
    pub epsilon: f64,

    /// Learning rate alpha (0.0-1.0)
    #[arg(long, default_value_t = 0.8)]
    pub alpha: f64,

    /// Discount factor gamma (0.0-1.0)
    #[arg(long, default_value_t = 0.5)]
    pub gamma: f64,

    /// Optimistic initial Q-value for unseen states
    #[arg(long, default_value_t = 15.0)]
    pub q_init: f64,

    /// Grid width in intersections
    #[arg(long, default_value_t = 8)]
    pub grid_width: usize,

    /// Grid height in intersections
    #[arg(long, default_value_t = 6)]
    pub grid_height: usize,

    /// Number of dummy vehicles
    #[arg(long, default_value_t = 3)]
    pub dummies: usize,

    /// Abort trials when the deadline runs out (pass false to keep driving)
    #[arg(long, default_value_t = true, action = clap::ArgAction::Set)]
    pub enforce_deadline: bool,

    /// Random seed for reproducibility (world uses seed, agent seed+1)
    #[arg(long)]
    pub seed: Option<u64>,

    /// Show progress bar (pass false for quiet runs)
    #[arg(long, default_value_t = true, action = clap::ArgAction::Set)]
    pub progress: bool,

    /// Greedy evaluation trials after training (epsilon forced to 1.0)
    #[arg(long, default_value_t = 0)]
    pub eval_trials: usize,

    /// Optional path for writing a summary JSON file
    #[arg(long)]
    pub summary: Option<PathBuf>,

    /// Optional file for JSONL per-trial observations
    #[arg(long)]
    pub observations: Option<PathBuf>,

    /// Optional CSV export of per-trial records
    #[arg(long)]
    pub export_csv: Option<PathBuf>,
}

#[derive(Debug, Serialize)]
struct TrainingSummaryFile {
    training: RunResult,
    evaluation: Option<RunResult>,
    metadata: SummaryMetadata,
}

#[derive(Debug, Serialize)]
struct SummaryMetadata {
    epsilon: f64,
    alpha: f64,
    gamma: f64,
    q_init: f64,
    grid_width: usize,
    grid_height: usize,
    dummies: usize,
    seed: Option<u64>,
}

fn print_result(heading: &str, result: &RunResult) {
    println!("\n=== {heading} ===");
    println!("Total trials: {}", result.total_trials);
    println!(
        "Reached destination: {} ({:.1}%)",
        result.reached,
        result.success_rate * 100.0
    );
    println!("Deadline expired: {}", result.expired);
    match result.avg_steps_to_arrival {
        Some(avg) => println!("Avg steps to arrival: {avg:.1}"),
        None => println!("Avg steps to arrival: n/a"),
    }
    println!("Mean reward per trial: {:.2}", result.mean_reward);
    println!("States discovered: {}", result.states_discovered);
}

pub fn execute(args: TrainArgs) -> Result<()> {
    let agent_config = AgentConfig::new()
        .with_q_init(args.q_init)
        .with_alpha(args.alpha)
        .with_gamma(args.gamma)
        .with_epsilon(args.epsilon);
    let agent_config = match args.seed {
        Some(seed) => agent_config.with_seed(seed.wrapping_add(1)),
        None => agent_config,
    };
    agent_config.validate()?;

    let world_config = WorldConfig::new()
        .with_grid(args.grid_width, args.grid_height)
        .with_dummies(args.dummies)
        .with_enforce_deadline(args.enforce_deadline);
    let world_config = match args.seed {
        Some(seed) => world_config.with_seed(seed),
        None => world_config,
    };
    world_config.validate()?;

    let (mut env, mut planner) = GridWorld::build(world_config);
    let mut agent = crate::agent::LearningAgent::new(agent_config);

    let mut runner = TrialRunner::new(TrialConfig {
        n_trials: args.trials,
    });
    if args.progress {
        runner = runner.with_observer(Box::new(ProgressObserver::new()));
    }
    if let Some(ref path) = args.observations {
        runner = runner.with_observer(Box::new(JsonlObserver::new(path)?));
    }
    if let Some(ref path) = args.export_csv {
        runner = runner.with_observer(Box::new(CsvObserver::new(path)?));
    }

    let result = runner.run(&mut agent, &mut env, &mut planner)?;
    print_result("Training Complete", &result);

    // Greedy evaluation: same agent and table, exploit branch always taken.
    let evaluation = if args.eval_trials > 0 {
        println!(
            "\nEvaluating learned policy over {} greedy trials...",
            args.eval_trials
        );
        agent.set_epsilon(1.0);

        let mut eval_runner = TrialRunner::new(TrialConfig {
            n_trials: args.eval_trials,
        });
        if args.progress {
            eval_runner = eval_runner.with_observer(Box::new(ProgressObserver::new()));
        }
        let eval_result = eval_runner.run(&mut agent, &mut env, &mut planner)?;
        print_result("Evaluation Complete", &eval_result);
        Some(eval_result)
    } else {
        None
    };

    if let Some(summary_path) = args.summary {
        if let Some(parent) = summary_path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let summary = TrainingSummaryFile {
            training: result,
            evaluation,
            metadata: SummaryMetadata {
                epsilon: args.epsilon,
                alpha: args.alpha,
                gamma: args.gamma,
                q_init: args.q_init,
                grid_width: args.grid_width,
                grid_height: args.grid_height,
                dummies: args.dummies,
                seed: args.seed,
            },
        };

        let file = std::fs::File::create(&summary_path)?;
        serde_json::to_writer_pretty(file, &summary)?;
        println!("\nSummary written to {}", summary_path.display());
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use clap::Parser;

    use super::*;

    #[test]
    fn deadline_enforcement_can_be_disabled_from_the_command_line() {
        let args = TrainArgs::try_parse_from(["train"]).unwrap();
        assert!(args.enforce_deadline);

        let args = TrainArgs::try_parse_from(["train", "--enforce-deadline", "false"]).unwrap();
        assert!(!args.enforce_deadline);

        let args = TrainArgs::try_parse_from(["train", "--enforce-deadline=false"]).unwrap();
        assert!(!args.enforce_deadline);
    }

    #[test]
    fn progress_bar_can_be_switched_off() {
        let args = TrainArgs::try_parse_from(["train"]).unwrap();
        assert!(args.progress);

        let args = TrainArgs::try_parse_from(["train", "--progress=false"]).unwrap();
        assert!(!args.progress);
    }
}
