//! Shared discrete types for the driving domain.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A compass-relative heading: the direction of a move through an
/// intersection, relative to the vehicle's current orientation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Heading {
    Forward,
    Left,
    Right,
}

impl fmt::Display for Heading {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Heading::Forward => "forward",
            Heading::Left => "left",
            Heading::Right => "right",
        };
        write!(f, "{s}")
    }
}

/// An action the agent can take at an intersection.
///
/// `Stay` is the "do nothing this step" action; the other three move the
/// vehicle through the intersection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Action {
    Stay,
    Forward,
    Left,
    Right,
}

impl Action {
    /// The full action set, in a fixed order used for value storage.
    pub const ALL: [Action; 4] = [Action::Stay, Action::Forward, Action::Left, Action::Right];

    /// Index into per-state value arrays. Stable across the lifetime of a
    /// Q-table.
    pub(crate) fn index(self) -> usize {
        match self {
            Action::Stay => 0,
            Action::Forward => 1,
            Action::Left => 2,
            Action::Right => 3,
        }
    }

    /// The heading this action moves along, if it moves at all.
    pub fn heading(self) -> Option<Heading> {
        match self {
            Action::Stay => None,
            Action::Forward => Some(Heading::Forward),
            Action::Left => Some(Heading::Left),
            Action::Right => Some(Heading::Right),
        }
    }
}

impl From<Option<Heading>> for Action {
    fn from(heading: Option<Heading>) -> Self {
        match heading {
            None => Action::Stay,
            Some(Heading::Forward) => Action::Forward,
            Some(Heading::Left) => Action::Left,
            Some(Heading::Right) => Action::Right,
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Action::Stay => "stay",
            Action::Forward => "forward",
            Action::Left => "left",
            Action::Right => "right",
        };
        write!(f, "{s}")
    }
}

/// Traffic-light state as seen from the agent's approach.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Light {
    Red,
    Green,
}

impl fmt::Display for Light {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Light::Red => "red",
            Light::Green => "green",
        };
        write!(f, "{s}")
    }
}

/// An intersection on the grid, identified by column and row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub x: usize,
    pub y: usize,
}

impl Position {
    pub fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}
