//! Shared fixtures for the simulation test suites.

use super::*;

pub(super) const FIXTURE_SEED: u64 = 7;

/// Empty 10×10 world with one hunter of the given skill.
pub(super) fn lone_hunter_fixture(pos: Pos, skill: Skill) -> (Simulation, HunterId) {
    let mut sim = Simulation::empty(10, FIXTURE_SEED);
    let id = sim.spawn_hunter(pos, skill);
    (sim, id)
}

/// A far-away treasure that keeps the game from ending while a test runs.
pub(super) fn with_bait(sim: &mut Simulation) {
    sim.spawn_treasure(Treasure::new(Pos::new(9, 9), TreasureKind::Bronze));
}

pub(super) fn give_treasure(sim: &mut Simulation, id: HunterId, kind: TreasureKind, value: f64) {
    let pos = sim.hunters[id].pos;
    sim.hunters[id].carried = Some(Treasure::new(pos, kind).with_value(value));
}
