//! CLI infrastructure for the smartcab trainer
//!
//! This module provides the command-line interface for training the learning
//! agent on the grid world and for running the non-learning baseline.

pub mod commands;
