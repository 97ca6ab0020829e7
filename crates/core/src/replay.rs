//! Headless replay: rebuild a simulation from a journal's seed and config, apply
//! each recorded input at its tick, and step until the run ends.

use std::error::Error;
use std::fmt;

use crate::journal::{InputJournal, InputPayload};
use crate::simulation::Simulation;
use crate::types::SimError;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RunOutcome {
    GameOver,
    TickLimit,
}

#[derive(Debug, PartialEq)]
pub enum ReplayError {
    /// The journal's config was rejected or an input failed to apply.
    Sim(SimError),
    /// An input is stamped with a tick the replay has already passed.
    InputOutOfOrder { seq: u64 },
}

impl fmt::Display for ReplayError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Sim(e) => write!(f, "replay input rejected: {e}"),
            Self::InputOutOfOrder { seq } => write!(f, "input {seq} is out of tick order"),
        }
    }
}

impl Error for ReplayError {}

impl From<SimError> for ReplayError {
    fn from(e: SimError) -> Self {
        Self::Sim(e)
    }
}

#[derive(Debug, PartialEq)]
pub struct ReplayResult {
    pub final_outcome: RunOutcome,
    pub final_snapshot_hash: u64,
    pub final_tick: u64,
    pub final_score: f64,
    /// Inputs stamped after the run ended; they were never applied.
    pub unapplied_inputs: usize,
}

/// Applies one journaled input to a live simulation.
pub fn apply_payload(sim: &mut Simulation, payload: &InputPayload) -> Result<(), SimError> {
    match payload {
        InputPayload::ManualMove { hunter, direction } => {
            sim.apply_manual_move(*hunter, *direction)
        }
        InputPayload::Recruit => {
            if sim.is_game_over() {
                return Err(SimError::GameOver);
            }
            sim.recruit();
            Ok(())
        }
    }
}

pub fn replay_to_end(journal: &InputJournal, max_ticks: u64) -> Result<ReplayResult, ReplayError> {
    let mut sim = Simulation::with_config(&journal.config, journal.seed)?;
    let mut inputs = journal.inputs.iter().peekable();

    while !sim.is_game_over() && sim.current_tick() < max_ticks {
        while let Some(record) = inputs.peek() {
            if record.tick > sim.current_tick() {
                break;
            }
            if record.tick < sim.current_tick() {
                return Err(ReplayError::InputOutOfOrder { seq: record.seq });
            }
            apply_payload(&mut sim, &record.payload)?;
            inputs.next();
        }
        sim.step();
    }

    let final_outcome =
        if sim.is_game_over() { RunOutcome::GameOver } else { RunOutcome::TickLimit };
    Ok(ReplayResult {
        final_outcome,
        final_snapshot_hash: sim.snapshot_hash(),
        final_tick: sim.current_tick(),
        final_score: sim.score(),
        unapplied_inputs: inputs.count(),
    })
}

#[cfg(test)]
mod tests;
