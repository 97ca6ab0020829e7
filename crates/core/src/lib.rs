pub mod config;
pub mod entities;
pub mod grid;
pub mod journal;
pub mod journal_file;
pub mod pathfinding;
pub mod policy;
pub mod replay;
pub mod rng;
pub mod simulation;
pub mod types;
pub mod worldgen;

pub use config::SimConfig;
pub use entities::{Hideout, Hunter, Knight, Treasure};
pub use grid::{Cell, Grid};
pub use journal::{InputJournal, InputPayload, InputRecord};
pub use journal_file::{JournalLoadError, JournalWriter, LoadedJournal, load_journal_from_file};
pub use policy::{DecisionPolicy, DecisionTree};
pub use replay::*;
pub use simulation::Simulation;
pub use types::*;
