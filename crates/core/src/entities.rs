//! Per-entity state and behavior: treasure decay, hideout rosters, hunter
//! decisions and movement, knight patrols.

mod hideout;
mod hunter;
mod knight;
mod treasure;

pub use hideout::{HIDEOUT_CAPACITY, Hideout};
pub use hunter::{Hunter, SURVIVAL_TICKS};
pub use knight::{Knight, KNIGHT_MOVE_COST, KNIGHT_RECOVERY, KNIGHT_REST_THRESHOLD};
pub use treasure::{TREASURE_DECAY, TREASURE_START_VALUE, Treasure};
