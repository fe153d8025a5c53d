use glam::Vec2;
use serde::{Deserialize, Serialize};
use tilewalk_kernel::Entity;

/// Movement direction in screen space (y grows downward).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    pub fn unit(self) -> Vec2 {
        match self {
            Direction::Up => Vec2::NEG_Y,
            Direction::Down => Vec2::Y,
            Direction::Left => Vec2::NEG_X,
            Direction::Right => Vec2::X,
        }
    }

    fn index(self) -> usize {
        self as usize
    }
}

/// Key transition that the simulation consumes instead of raw key events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Action {
    Press(Direction),
    Release(Direction),
}

/// Apply an action to the entity's target velocity.
///
/// A press adds `speed * delta_time` along the direction; a release removes
/// the same amount, so any combination of held directions composes.
pub fn apply(action: Action, entity: &mut Entity, speed: f32, delta_time: f32) {
    let (direction, sign) = match action {
        Action::Press(d) => (d, 1.0),
        Action::Release(d) => (d, -1.0),
    };
    let delta = direction.unit() * (speed * delta_time * sign);
    tracing::trace!(?action, ?delta, "input applied");
    entity.add_target_velocity(delta);
}

/// Tracks which directions are held and drops key-repeat transitions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HeldDirections {
    held: [bool; 4],
}

impl HeldDirections {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_held(&self, direction: Direction) -> bool {
        self.held[direction.index()]
    }

    /// Returns the press action, or `None` if the direction was already held.
    pub fn press(&mut self, direction: Direction) -> Option<Action> {
        let slot = &mut self.held[direction.index()];
        if *slot {
            return None;
        }
        *slot = true;
        Some(Action::Press(direction))
    }

    /// Returns the release action, or `None` if the direction was not held.
    pub fn release(&mut self, direction: Direction) -> Option<Action> {
        let slot = &mut self.held[direction.index()];
        if !*slot {
            return None;
        }
        *slot = false;
        Some(Action::Release(direction))
    }

    pub fn held(&self) -> impl Iterator<Item = Direction> + '_ {
        Direction::ALL.into_iter().filter(|d| self.is_held(*d))
    }
}
