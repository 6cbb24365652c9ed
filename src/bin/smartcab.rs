//! smartcab CLI - train and evaluate the Q-learning driving agent

use anyhow::Result;
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "smartcab")]
#[command(version, about = "Q-learning driving agent on a grid world", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Train the learning agent over repeated trials
    Train(smartcab::cli::commands::train::TrainArgs),

    /// Run the non-learning random baseline
    Simulate(smartcab::cli::commands::simulate::SimulateArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Train(args) => smartcab::cli::commands::train::execute(args),
        Commands::Simulate(args) => smartcab::cli::commands::simulate::execute(args),
    }
}
