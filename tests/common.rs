//! Common test doubles for the smartcab test suite.
//!
//! Scripted collaborators let tests drive the agent through exact percept and
//! reward sequences without the grid-world's stochastic traffic.

use smartcab::{
    Action, Heading, Percepts, Position,
    ports::{Environment, RoutePlanner},
};

/// Environment double replaying a fixed script of (percepts, reward) steps
/// and recording the actions the agent submitted.
pub struct ScriptedEnvironment {
    steps: Vec<(Percepts, f64)>,
    cursor: usize,
    pub actions: Vec<Action>,
}

impl ScriptedEnvironment {
    pub fn new(steps: Vec<(Percepts, f64)>) -> Self {
        Self {
            steps,
            cursor: 0,
            actions: Vec::new(),
        }
    }
}

impl Environment for ScriptedEnvironment {
    fn sense(&self) -> Percepts {
        self.steps[self.cursor].0
    }

    fn deadline(&self) -> i32 {
        (self.steps.len() - self.cursor) as i32
    }

    fn act(&mut self, action: Action) -> f64 {
        let reward = self.steps[self.cursor].1;
        self.actions.push(action);
        self.cursor += 1;
        reward
    }
}

/// Planner double replaying a fixed waypoint sequence and recording replans.
pub struct ScriptedPlanner {
    waypoints: Vec<Option<Heading>>,
    cursor: usize,
    pub routed_to: Vec<Position>,
}

impl ScriptedPlanner {
    pub fn new(waypoints: Vec<Option<Heading>>) -> Self {
        Self {
            waypoints,
            cursor: 0,
            routed_to: Vec::new(),
        }
    }
}

impl RoutePlanner for ScriptedPlanner {
    fn route_to(&mut self, destination: Position) {
        self.routed_to.push(destination);
    }

    fn next_waypoint(&mut self) -> Option<Heading> {
        let waypoint = self.waypoints[self.cursor];
        self.cursor += 1;
        waypoint
    }
}
