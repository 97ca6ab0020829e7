use hunt_core::{Direction, MAX_ENERGY, MAX_STAMINA, SimError, Simulation};
use proptest::{
    arbitrary::any,
    test_runner::{Config as ProptestConfig, TestCaseError, TestRunner},
};
use rand_chacha::{
    ChaCha8Rng,
    rand_core::{Rng, SeedableRng},
};

fn choose<T: Copy>(rng: &mut ChaCha8Rng, slice: &[T]) -> Option<T> {
    if slice.is_empty() {
        return None;
    }
    Some(slice[rng.next_u64() as usize % slice.len()])
}

fn run_fuzz_simulation(world_seed: u64, input_seed: u64, max_ticks: u64) -> Result<(), String> {
    let size = 8 + (world_seed % 17) as usize;
    let mut sim = Simulation::new(size, world_seed);
    let mut rng = ChaCha8Rng::seed_from_u64(input_seed);
    let mut last_score = 0.0;

    for _ in 0..max_ticks {
        if let Some(hunter) = choose(&mut rng, &sim.hunter_ids())
            && let Some(direction) = choose(&mut rng, &Direction::ALL)
        {
            let before = sim.snapshot_hash();
            match sim.apply_manual_move(hunter, direction) {
                Ok(()) => {}
                Err(SimError::MoveBlocked { .. }) | Err(SimError::GameOver) => {
                    if sim.snapshot_hash() != before {
                        return Err(format!("rejected move mutated state on seed {world_seed}"));
                    }
                }
                Err(e) => return Err(format!("unexpected move error {e} on seed {world_seed}")),
            }
        }
        if rng.next_u64() % 30 == 0 {
            sim.recruit();
        }

        let was_over = sim.is_game_over();
        sim.step();

        if was_over && !sim.is_game_over() {
            return Err(format!("game over flag reset on seed {world_seed}"));
        }
        if !sim.grid_is_consistent() {
            return Err(format!("grid drift at tick {} on seed {world_seed}", sim.current_tick()));
        }
        if sim.score() < last_score {
            return Err(format!("score decreased on seed {world_seed}"));
        }
        last_score = sim.score();
        if sim.hunters().any(|hunter| !(0.0..=MAX_STAMINA).contains(&hunter.stamina)) {
            return Err(format!("stamina out of range on seed {world_seed}"));
        }
        if sim.knights().iter().any(|knight| !(0.0..=MAX_ENERGY).contains(&knight.energy)) {
            return Err(format!("knight energy out of range on seed {world_seed}"));
        }
        if sim.treasures().iter().any(|treasure| treasure.value() <= 0.0) {
            return Err(format!("spent treasure left on the grid on seed {world_seed}"));
        }
        for hideout in sim.hideouts() {
            if hideout.roster().len() > hideout.capacity {
                return Err(format!("hideout over capacity on seed {world_seed}"));
            }
        }
    }

    Ok(())
}

#[test]
fn fuzz_simulation_preserves_invariants() {
    let mut runner = TestRunner::new(ProptestConfig::with_cases(20));
    let seeds = (any::<u64>(), any::<u64>());

    runner
        .run(&seeds, |(world_seed, input_seed)| {
            run_fuzz_simulation(world_seed, input_seed, 400).map_err(TestCaseError::fail)?;
            Ok(())
        })
        .expect("semantic fuzz should preserve simulation invariants");
}
