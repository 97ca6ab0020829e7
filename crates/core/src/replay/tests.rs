use super::*;
use crate::config::SimConfig;
use crate::types::{Direction, HunterId};

const RUN_TICKS: u64 = 120;

/// Plays a live run, nudging hunters every few ticks, and journals what was accepted.
fn record_live_run(seed: u64) -> (InputJournal, u64) {
    let config = SimConfig::default();
    let mut sim = Simulation::with_config(&config, seed).unwrap();
    let mut journal = InputJournal::new(seed, config);

    while !sim.is_game_over() && sim.current_tick() < RUN_TICKS {
        let tick = sim.current_tick();
        if tick % 7 == 0 {
            let ids = sim.hunter_ids();
            if let Some(&hunter) = ids.get(tick as usize % ids.len().max(1)) {
                let direction = Direction::ALL[(tick / 7) as usize % Direction::ALL.len()];
                let payload = InputPayload::ManualMove { hunter, direction };
                if apply_payload(&mut sim, &payload).is_ok() {
                    journal.append(tick, payload);
                }
            }
        }
        if tick % 25 == 0 {
            apply_payload(&mut sim, &InputPayload::Recruit).unwrap();
            journal.append(tick, InputPayload::Recruit);
        }
        sim.step();
    }
    (journal, sim.snapshot_hash())
}

#[test]
fn replay_reproduces_a_recorded_run() {
    let (journal, live_hash) = record_live_run(777);
    assert!(!journal.inputs.is_empty());

    let result = replay_to_end(&journal, RUN_TICKS).unwrap();
    assert_eq!(result.final_snapshot_hash, live_hash);
    assert_eq!(result.unapplied_inputs, 0);
}

#[test]
fn replay_without_inputs_matches_a_plain_run() {
    let mut sim = Simulation::new(20, 31);
    for _ in 0..40 {
        sim.step();
    }
    let journal = InputJournal::new(31, SimConfig::default());
    let result = replay_to_end(&journal, 40).unwrap();
    assert_eq!(result.final_snapshot_hash, sim.snapshot_hash());
    assert_eq!(result.final_tick, sim.current_tick());
    assert_eq!(result.final_score, sim.score());
}

#[test]
fn tick_limit_is_reported_and_late_inputs_stay_unapplied() {
    let mut journal = InputJournal::new(5, SimConfig::default());
    journal.append(500, InputPayload::Recruit);

    let result = replay_to_end(&journal, 10).unwrap();
    assert_eq!(result.final_outcome, RunOutcome::TickLimit);
    assert_eq!(result.final_tick, 10);
    assert_eq!(result.unapplied_inputs, 1);
}

#[test]
fn out_of_order_inputs_are_rejected() {
    let mut journal = InputJournal::new(5, SimConfig::default());
    journal.append(3, InputPayload::Recruit);
    journal.append(1, InputPayload::Recruit);

    assert_eq!(replay_to_end(&journal, 10), Err(ReplayError::InputOutOfOrder { seq: 1 }));
}

#[test]
fn failing_inputs_and_bad_configs_surface_as_sim_errors() {
    let mut journal = InputJournal::new(5, SimConfig::default());
    journal.append(
        0,
        InputPayload::ManualMove { hunter: HunterId::default(), direction: Direction::East },
    );
    assert_eq!(replay_to_end(&journal, 10), Err(ReplayError::Sim(SimError::UnknownHunter)));

    let broken = InputJournal::new(5, SimConfig::with_size(0));
    assert!(matches!(
        replay_to_end(&broken, 10),
        Err(ReplayError::Sim(SimError::InvalidConfig(_)))
    ));
}
