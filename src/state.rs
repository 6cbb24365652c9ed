//! State discretization: raw percepts into Q-table keys.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::types::{Heading, Light};

/// Everything the environment reports about the agent's intersection for one
/// step. Vehicle slots carry the heading that vehicle is about to move along,
/// or `None` when the slot is empty (or the vehicle is waiting).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Percepts {
    pub light: Light,
    pub oncoming: Option<Heading>,
    pub left: Option<Heading>,
    pub right: Option<Heading>,
}

/// Discretized state used as the Q-table key.
///
/// Two states compare equal iff all four fields compare equal. The sensed
/// `right` slot and the deadline countdown are deliberately left out to keep
/// the state space small; adding either back changes the table's key space.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct State {
    pub waypoint: Option<Heading>,
    pub light: Light,
    pub oncoming: Option<Heading>,
    pub left: Option<Heading>,
}

impl State {
    /// Encode the suggested heading and the sensed percepts into a state key.
    /// Pure and deterministic.
    pub fn encode(waypoint: Option<Heading>, percepts: &Percepts) -> Self {
        Self {
            waypoint,
            light: percepts.light,
            oncoming: percepts.oncoming,
            left: percepts.left,
        }
    }
}

fn fmt_slot(slot: Option<Heading>) -> String {
    match slot {
        None => "none".to_string(),
        Some(heading) => heading.to_string(),
    }
}

impl fmt::Display for State {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "({}, {}, {}, {})",
            fmt_slot(self.waypoint),
            self.light,
            fmt_slot(self.oncoming),
            fmt_slot(self.left),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn percepts(light: Light, oncoming: Option<Heading>, left: Option<Heading>) -> Percepts {
        Percepts {
            light,
            oncoming,
            left,
            right: None,
        }
    }

    #[test]
    fn encoding_is_structural() {
        let a = State::encode(
            Some(Heading::Forward),
            &percepts(Light::Green, None, Some(Heading::Left)),
        );
        let b = State::encode(
            Some(Heading::Forward),
            &percepts(Light::Green, None, Some(Heading::Left)),
        );
        assert_eq!(a, b);

        let c = State::encode(
            Some(Heading::Forward),
            &percepts(Light::Red, None, Some(Heading::Left)),
        );
        assert_ne!(a, c);
    }

    #[test]
    fn right_slot_is_excluded_from_the_state() {
        let with_right = Percepts {
            light: Light::Green,
            oncoming: None,
            left: None,
            right: Some(Heading::Forward),
        };
        let without_right = Percepts {
            right: None,
            ..with_right
        };

        assert_eq!(
            State::encode(None, &with_right),
            State::encode(None, &without_right)
        );
    }

    #[test]
    fn display_names_all_four_fields() {
        let state = State::encode(
            Some(Heading::Right),
            &percepts(Light::Green, Some(Heading::Forward), None),
        );
        assert_eq!(state.to_string(), "(right, green, forward, none)");
    }
}
