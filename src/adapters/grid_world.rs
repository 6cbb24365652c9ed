//! Reference grid-world simulation.
//!
//! A torus grid of intersections with cycling traffic lights, a few dummy
//! vehicles, US right-of-way rules, and rewards that favor following the
//! planner's suggestion. Implements both world-facing ports; the environment
//! and the planner share one world through `Rc<RefCell<..>>` (the whole
//! simulation is single-threaded).

use std::{cell::RefCell, rc::Rc};

use rand::{Rng, SeedableRng, rngs::StdRng, seq::IndexedRandom};

use crate::{
    app::WorldConfig,
    ports::{Environment, RoutePlanner, TrialEnvironment, TrialStatus},
    state::Percepts,
    types::{Action, Heading, Light, Position},
};

// Reward schedule, owned here and opaque to the learning core.
const REWARD_ON_ROUTE: f64 = 2.0;
const REWARD_OFF_ROUTE: f64 = -0.5;
const REWARD_WAIT: f64 = 0.0;
const REWARD_ILLEGAL: f64 = -1.0;
const REWARD_ARRIVAL: f64 = 10.0;

// Hard abort when the deadline is not enforced, so trials always terminate.
const HARD_DEADLINE_FLOOR: i32 = -100;

/// Absolute travel direction on the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Compass {
    North,
    East,
    South,
    West,
}

impl Compass {
    const ALL: [Compass; 4] = [Compass::North, Compass::East, Compass::South, Compass::West];

    fn left(self) -> Self {
        match self {
            Compass::North => Compass::West,
            Compass::West => Compass::South,
            Compass::South => Compass::East,
            Compass::East => Compass::North,
        }
    }

    fn right(self) -> Self {
        self.left().left().left()
    }

    fn opposite(self) -> Self {
        self.left().left()
    }

    fn is_north_south(self) -> bool {
        matches!(self, Compass::North | Compass::South)
    }

    fn turned(self, heading: Heading) -> Self {
        match heading {
            Heading::Forward => self,
            Heading::Left => self.left(),
            Heading::Right => self.right(),
        }
    }
}

/// Per-intersection light cycle: which axis is open at a given tick.
#[derive(Debug, Clone, Copy)]
struct LightCycle {
    period: u64,
    ns_open_initially: bool,
}

impl LightCycle {
    fn ns_open(&self, tick: u64) -> bool {
        let flipped = (tick / self.period) % 2 == 1;
        self.ns_open_initially ^ flipped
    }
}

#[derive(Debug, Clone, Copy)]
struct Dummy {
    position: Position,
    facing: Compass,
    planned: Heading,
}

#[derive(Debug)]
struct World {
    config: WorldConfig,
    rng: StdRng,
    lights: Vec<LightCycle>,
    tick: u64,
    cab: Position,
    facing: Compass,
    destination: Position,
    deadline: i32,
    reached: bool,
    trial_reward: f64,
    dummies: Vec<Dummy>,
}

impl World {
    fn new(config: WorldConfig) -> Self {
        debug_assert!(
            config.validate().is_ok(),
            "world config must pass WorldConfig::validate"
        );
        let mut rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_rng(&mut rand::rng()),
        };

        let lights = (0..config.width * config.height)
            .map(|_| LightCycle {
                period: rng.random_range(3..=5),
                ns_open_initially: rng.random_bool(0.5),
            })
            .collect();

        let mut world = Self {
            config,
            rng,
            lights,
            tick: 0,
            cab: Position::new(0, 0),
            facing: Compass::North,
            destination: Position::new(0, 0),
            deadline: 0,
            reached: false,
            trial_reward: 0.0,
            dummies: Vec::new(),
        };
        world.begin_trial();
        world
    }

    fn light_at(&self, position: Position) -> &LightCycle {
        &self.lights[position.y * self.config.width + position.x]
    }

    fn random_position(&mut self) -> Position {
        Position::new(
            self.rng.random_range(0..self.config.width),
            self.rng.random_range(0..self.config.height),
        )
    }

    /// Shortest signed step count along one torus axis.
    fn axis_delta(from: usize, to: usize, len: usize) -> i64 {
        let raw = to as i64 - from as i64;
        let len = len as i64;
        let wrapped = raw.rem_euclid(len);
        if wrapped * 2 > len { wrapped - len } else { wrapped }
    }

    fn torus_l1(&self, from: Position, to: Position) -> i64 {
        Self::axis_delta(from.x, to.x, self.config.width).abs()
            + Self::axis_delta(from.y, to.y, self.config.height).abs()
    }

    fn begin_trial(&mut self) -> Position {
        // Keep trials non-trivial where the grid allows it.
        let min_distance = 4.min((self.config.width + self.config.height) as i64 / 2).max(1);
        let (start, destination) = loop {
            let start = self.random_position();
            let destination = self.random_position();
            if self.torus_l1(start, destination) >= min_distance {
                break (start, destination);
            }
        };

        self.cab = start;
        self.facing = *Compass::ALL.choose(&mut self.rng).expect("non-empty");
        self.destination = destination;
        self.deadline = self.config.deadline_factor * self.torus_l1(start, destination) as i32;
        self.reached = false;
        self.trial_reward = 0.0;

        self.dummies = (0..self.config.dummies)
            .map(|_| {
                let position = self.random_position();
                let facing = *Compass::ALL.choose(&mut self.rng).expect("non-empty");
                let planned = Self::random_heading(&mut self.rng);
                Dummy {
                    position,
                    facing,
                    planned,
                }
            })
            .collect();

        destination
    }

    fn random_heading(rng: &mut StdRng) -> Heading {
        *[Heading::Forward, Heading::Left, Heading::Right]
            .choose(rng)
            .expect("non-empty")
    }

    /// The planner's suggestion: relative heading toward the destination,
    /// recomputed from the cab's present position. Prefers closing the
    /// east-west gap first, and turns right to come about when the
    /// destination lies behind.
    fn next_waypoint(&self) -> Option<Heading> {
        if self.cab == self.destination {
            return None;
        }

        let dx = Self::axis_delta(self.cab.x, self.destination.x, self.config.width);
        let dy = Self::axis_delta(self.cab.y, self.destination.y, self.config.height);
        let desired = if dx != 0 {
            if dx > 0 { Compass::East } else { Compass::West }
        } else if dy > 0 {
            Compass::South
        } else {
            Compass::North
        };

        Some(if desired == self.facing {
            Heading::Forward
        } else if desired == self.facing.left() {
            Heading::Left
        } else {
            // desired is to the right or behind; a right turn serves both
            Heading::Right
        })
    }

    fn light_for_cab(&self) -> Light {
        let ns_open = self.light_at(self.cab).ns_open(self.tick);
        if ns_open == self.facing.is_north_south() {
            Light::Green
        } else {
            Light::Red
        }
    }

    fn sense(&self) -> Percepts {
        let mut oncoming = None;
        let mut left = None;
        let mut right = None;

        for dummy in &self.dummies {
            if dummy.position != self.cab {
                continue;
            }
            let intent = Some(dummy.planned);
            if dummy.facing == self.facing.opposite() {
                oncoming = intent;
            } else if dummy.facing == self.facing.right() {
                // Traveling toward the cab's right means approaching from its
                // left side.
                left = intent;
            } else if dummy.facing == self.facing.left() {
                right = intent;
            }
        }

        Percepts {
            light: self.light_for_cab(),
            oncoming,
            left,
            right,
        }
    }

    fn move_is_legal(&self, action: Action, percepts: &Percepts) -> bool {
        match action {
            Action::Stay => true,
            Action::Forward => percepts.light == Light::Green,
            Action::Left => {
                // Left on green yields to oncoming traffic going forward or
                // turning right.
                percepts.light == Light::Green
                    && !matches!(percepts.oncoming, Some(Heading::Forward | Heading::Right))
            }
            Action::Right => {
                // Right on red yields to cross traffic from the left going
                // forward.
                percepts.light == Light::Green
                    || !matches!(percepts.left, Some(Heading::Forward))
            }
        }
    }

    fn step(&mut self, position: Position, facing: Compass) -> Position {
        let width = self.config.width;
        let height = self.config.height;
        let (dx, dy): (i64, i64) = match facing {
            Compass::North => (0, -1),
            Compass::South => (0, 1),
            Compass::East => (1, 0),
            Compass::West => (-1, 0),
        };
        Position::new(
            (position.x as i64 + dx).rem_euclid(width as i64) as usize,
            (position.y as i64 + dy).rem_euclid(height as i64) as usize,
        )
    }

    fn act(&mut self, action: Action) -> f64 {
        let waypoint = self.next_waypoint();
        let percepts = self.sense();

        let mut reward = if !self.move_is_legal(action, &percepts) {
            REWARD_ILLEGAL
        } else {
            match action.heading() {
                None => REWARD_WAIT,
                Some(heading) => {
                    self.facing = self.facing.turned(heading);
                    self.cab = self.step(self.cab, self.facing);
                    if action.heading() == waypoint {
                        REWARD_ON_ROUTE
                    } else {
                        REWARD_OFF_ROUTE
                    }
                }
            }
        };

        if !self.reached && self.cab == self.destination {
            self.reached = true;
            reward += REWARD_ARRIVAL;
        }

        self.advance_traffic();
        self.deadline -= 1;
        self.tick += 1;
        self.trial_reward += reward;
        reward
    }

    fn advance_traffic(&mut self) {
        for i in 0..self.dummies.len() {
            let mut dummy = self.dummies[i];
            dummy.facing = dummy.facing.turned(dummy.planned);
            dummy.position = self.step(dummy.position, dummy.facing);
            dummy.planned = Self::random_heading(&mut self.rng);
            self.dummies[i] = dummy;
        }
    }

    fn status(&self) -> TrialStatus {
        if self.reached {
            TrialStatus::Reached
        } else if self.config.enforce_deadline && self.deadline < 0 {
            TrialStatus::Expired
        } else if self.deadline < HARD_DEADLINE_FLOOR {
            TrialStatus::Expired
        } else {
            TrialStatus::EnRoute
        }
    }
}

/// Environment adapter over the shared grid world.
#[derive(Debug, Clone)]
pub struct GridWorld {
    world: Rc<RefCell<World>>,
}

/// Route planner adapter over the same shared world.
#[derive(Debug, Clone)]
pub struct GridPlanner {
    world: Rc<RefCell<World>>,
}

impl GridWorld {
    /// Build a world plus its planner from one configuration.
    ///
    /// Callers must run [`WorldConfig::validate`] first: on a grid smaller
    /// than 2x2 no pair of intersections is far enough apart and trial setup
    /// cannot terminate. Checked by a debug assertion only.
    pub fn build(config: WorldConfig) -> (GridWorld, GridPlanner) {
        let world = Rc::new(RefCell::new(World::new(config)));
        (
            GridWorld {
                world: Rc::clone(&world),
            },
            GridPlanner { world },
        )
    }

    /// Current destination, for reporting.
    pub fn destination(&self) -> Position {
        self.world.borrow().destination
    }

    /// Current cab position, for reporting.
    pub fn cab_position(&self) -> Position {
        self.world.borrow().cab
    }
}

impl Environment for GridWorld {
    fn sense(&self) -> Percepts {
        self.world.borrow().sense()
    }

    fn deadline(&self) -> i32 {
        self.world.borrow().deadline
    }

    fn act(&mut self, action: Action) -> f64 {
        self.world.borrow_mut().act(action)
    }
}

impl TrialEnvironment for GridWorld {
    fn begin_trial(&mut self) -> Position {
        self.world.borrow_mut().begin_trial()
    }

    fn status(&self) -> TrialStatus {
        self.world.borrow().status()
    }

    fn trial_reward(&self) -> f64 {
        self.world.borrow().trial_reward
    }
}

impl RoutePlanner for GridPlanner {
    fn route_to(&mut self, destination: Position) {
        self.world.borrow_mut().destination = destination;
    }

    fn next_waypoint(&mut self) -> Option<Heading> {
        self.world.borrow().next_waypoint()
    }
}
