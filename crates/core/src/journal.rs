//! In-memory record of every external input applied to a simulation.
//! Together with the seed and config this is enough to reproduce a run.

use serde::{Deserialize, Serialize};

use crate::config::SimConfig;
use crate::types::{Direction, HunterId};

pub const JOURNAL_FORMAT_VERSION: u16 = 1;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct InputJournal {
    pub format_version: u16,
    pub build_id: String,
    pub seed: u64,
    pub config: SimConfig,
    pub inputs: Vec<InputRecord>,
}

/// An input applied just before the step that resolves `tick`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct InputRecord {
    pub seq: u64,
    pub tick: u64,
    pub payload: InputPayload,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum InputPayload {
    ManualMove { hunter: HunterId, direction: Direction },
    Recruit,
}

impl InputJournal {
    pub fn new(seed: u64, config: SimConfig) -> Self {
        Self {
            format_version: JOURNAL_FORMAT_VERSION,
            build_id: "dev".to_string(),
            seed,
            config,
            inputs: Vec::new(),
        }
    }

    /// Appends with the next sequence number and returns it.
    pub fn append(&mut self, tick: u64, payload: InputPayload) -> u64 {
        let seq = self.inputs.len() as u64;
        self.inputs.push(InputRecord { seq, tick, payload });
        seq
    }
}
