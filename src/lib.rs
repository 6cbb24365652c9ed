//! Tabular Q-learning driving agent for a grid of intersections
//!
//! This crate provides:
//! - A discretized driving state and a sparse Q-table over it
//! - Epsilon-greedy action selection with exploit-probability semantics
//! - One-step temporal difference learning applied one step in arrears
//! - A reference grid-world environment and route planner
//! - A trial pipeline with composable observers and data export

pub mod adapters;
pub mod agent;
pub mod app;
pub mod cli;
pub mod error;
pub mod export;
pub mod learner;
pub mod pipeline;
pub mod policy;
pub mod ports;
pub mod q_table;
pub mod state;
pub mod types;

pub use agent::LearningAgent;
pub use app::{AgentConfig, WorldConfig};
pub use error::{Error, Result};
pub use learner::Transition;
pub use policy::Policy;
pub use q_table::QTable;
pub use state::{Percepts, State};
pub use types::{Action, Heading, Light, Position};
