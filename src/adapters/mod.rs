//! Adapters - concrete implementations of the world-facing ports.

pub mod grid_world;

pub use grid_world::{GridPlanner, GridWorld};
