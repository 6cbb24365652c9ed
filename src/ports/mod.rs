//! Ports - boundaries between the learning core and its collaborators
//!
//! The learning agent consumes the world through two narrow ports
//! ([`Environment`] and [`RoutePlanner`]); the trial driver consumes a third
//! ([`TrialEnvironment`]) and publishes progress through a fourth
//! ([`Observer`]). Concrete worlds and reporters are adapters behind these
//! seams.

pub mod environment;
pub mod observer;
pub mod planner;

pub use environment::{Environment, TrialEnvironment, TrialStatus};
pub use observer::Observer;
pub use planner::RoutePlanner;
