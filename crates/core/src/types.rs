use std::error::Error;
use std::fmt;

use serde::{Deserialize, Serialize};
use slotmap::new_key_type;

new_key_type! {
    pub struct HunterId;
}

pub const MAX_STAMINA: f64 = 100.0;
pub const MAX_ENERGY: f64 = 100.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Pos {
    pub x: i32,
    pub y: i32,
}

impl Pos {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub fn offset(self, direction: Direction) -> Self {
        let (dx, dy) = direction.delta();
        Self { x: self.x + dx, y: self.y + dy }
    }
}

/// What a grid cell shows. Ordered by display precedence, lowest first.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum EntityKind {
    Empty,
    Treasure,
    Hunter,
    Knight,
    Hideout,
}

/// Neighbor order used everywhere adjacency is enumerated. Search tie-breaks depend on it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    West,
    East,
    North,
    South,
}

impl Direction {
    pub const ALL: [Direction; 4] =
        [Direction::West, Direction::East, Direction::North, Direction::South];

    pub const fn delta(self) -> (i32, i32) {
        match self {
            Direction::West => (-1, 0),
            Direction::East => (1, 0),
            Direction::North => (0, -1),
            Direction::South => (0, 1),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TreasureKind {
    Bronze,
    Silver,
    Gold,
}

impl TreasureKind {
    pub const ALL: [TreasureKind; 3] =
        [TreasureKind::Bronze, TreasureKind::Silver, TreasureKind::Gold];

    pub const fn multiplier(self) -> f64 {
        match self {
            TreasureKind::Bronze => 0.03,
            TreasureKind::Silver => 0.07,
            TreasureKind::Gold => 0.13,
        }
    }

    /// Display color as `#RRGGBB`.
    pub const fn color(self) -> &'static str {
        match self {
            TreasureKind::Bronze => "#CD7F32",
            TreasureKind::Silver => "#C0C0C0",
            TreasureKind::Gold => "#FFD700",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Skill {
    Navigation,
    Endurance,
    Stealth,
}

impl Skill {
    pub const ALL: [Skill; 3] = [Skill::Navigation, Skill::Endurance, Skill::Stealth];

    /// Stamina spent per tick outside a hideout.
    pub const fn stamina_cost(self) -> f64 {
        match self {
            Skill::Endurance => 1.0,
            Skill::Navigation | Skill::Stealth => 2.0,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Action {
    Move = 1,
    Collect = 2,
    Flee = 3,
    Rest = 4,
}

impl Action {
    pub const fn code(self) -> u8 {
        self as u8
    }

    pub const fn from_code(code: u8) -> Option<Action> {
        match code {
            1 => Some(Action::Move),
            2 => Some(Action::Collect),
            3 => Some(Action::Flee),
            4 => Some(Action::Rest),
            _ => None,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum SimEvent {
    TreasureExpired { tick: u64, pos: Pos },
    TreasureCollected { tick: u64, hunter: HunterId, kind: TreasureKind },
    TreasureDeposited { tick: u64, hunter: HunterId, hideout: usize, value: f64 },
    TreasureDropped { tick: u64, hunter: HunterId, pos: Pos },
    KnightEncounter { tick: u64, hunter: HunterId, knight: usize },
    HunterExhausted { tick: u64, hunter: HunterId },
    HunterPerished { tick: u64, hunter: HunterId },
    HunterRecruited { tick: u64, hunter: HunterId, hideout: usize },
    ManualMove { tick: u64, hunter: HunterId, to: Pos },
    GameOver { tick: u64 },
}

#[derive(Clone, Debug, PartialEq)]
pub enum SimError {
    InvalidConfig(String),
    UnknownHunter,
    MoveBlocked { pos: Pos },
    GameOver,
}

impl fmt::Display for SimError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidConfig(reason) => write!(f, "invalid simulation config: {reason}"),
            Self::UnknownHunter => write!(f, "no such hunter"),
            Self::MoveBlocked { pos } => write!(f, "cell ({}, {}) is occupied", pos.x, pos.y),
            Self::GameOver => write!(f, "simulation is already over"),
        }
    }
}

impl Error for SimError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn action_codes_round_trip_and_reject_unknown_values() {
        for action in [Action::Move, Action::Collect, Action::Flee, Action::Rest] {
            assert_eq!(Action::from_code(action.code()), Some(action));
        }
        assert_eq!(Action::from_code(0), None);
        assert_eq!(Action::from_code(5), None);
    }

    #[test]
    fn entity_kind_precedence_puts_hideouts_on_top() {
        assert!(EntityKind::Hideout > EntityKind::Knight);
        assert!(EntityKind::Knight > EntityKind::Hunter);
        assert!(EntityKind::Hunter > EntityKind::Treasure);
        assert!(EntityKind::Treasure > EntityKind::Empty);
    }
}
