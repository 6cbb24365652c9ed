//! Route planner port - suggested headings toward the current destination.

use crate::types::{Heading, Position};

/// Route planner collaborator.
///
/// The planner recomputes its suggestion fresh each step from the agent's
/// present position; the agent treats the suggestion as one more percept, not
/// as a command.
pub trait RoutePlanner {
    /// (Re)plan toward a destination. Called once per trial reset.
    fn route_to(&mut self, destination: Position);

    /// Suggested next heading, or `None` when there is nowhere left to go.
    fn next_waypoint(&mut self) -> Option<Heading>;
}
