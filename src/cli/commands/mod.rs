//! CLI commands.

pub mod simulate;
pub mod train;
