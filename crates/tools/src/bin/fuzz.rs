use anyhow::{Result, ensure};
use clap::Parser;
use hunt_core::{Direction, EntityKind, MAX_STAMINA, Simulation};
use rand_chacha::{
    ChaCha8Rng,
    rand_core::{Rng, SeedableRng},
};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[arg(short, long, default_value_t = 42)]
    seed: u64,
    /// Number of consecutive seeds to run.
    #[arg(short, long, default_value_t = 20)]
    runs: u64,
    #[arg(short, long, default_value_t = 1000)]
    ticks: u64,
    #[arg(long, default_value_t = 20)]
    size: usize,
}

fn choose<T: Copy>(rng: &mut ChaCha8Rng, slice: &[T]) -> Option<T> {
    if slice.is_empty() {
        return None;
    }
    Some(slice[rng.next_u64() as usize % slice.len()])
}

fn check_invariants(sim: &Simulation) -> Result<()> {
    ensure!(sim.grid_is_consistent(), "grid occupancy drifted at tick {}", sim.current_tick());
    for hunter in sim.hunters() {
        ensure!(
            (0.0..=MAX_STAMINA).contains(&hunter.stamina),
            "hunter stamina {} out of range",
            hunter.stamina
        );
        ensure!(
            sim.grid().kind_at(hunter.pos) != EntityKind::Empty,
            "hunter at {:?} is invisible on the grid",
            hunter.pos
        );
    }
    for treasure in sim.treasures() {
        ensure!(treasure.value() > 0.0, "spent treasure left at {:?}", treasure.pos);
    }
    ensure!(sim.score() >= 0.0, "negative score");
    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();
    println!("Fuzzing {} seeds from {} for up to {} ticks each...", args.runs, args.seed, args.ticks);

    for seed in args.seed..args.seed + args.runs {
        let mut sim = Simulation::new(args.size, seed);
        let mut rng = ChaCha8Rng::seed_from_u64(seed ^ 0x5eed);
        let mut last_score = 0.0;

        while !sim.is_game_over() && sim.current_tick() < args.ticks {
            if rng.next_u64() % 4 == 0
                && let Some(hunter) = choose(&mut rng, &sim.hunter_ids())
                && let Some(direction) = choose(&mut rng, &Direction::ALL)
            {
                // Blocked moves are expected; they must leave the world untouched.
                let before = sim.snapshot_hash();
                if sim.apply_manual_move(hunter, direction).is_err() {
                    ensure!(sim.snapshot_hash() == before, "rejected move mutated state");
                }
            }
            if rng.next_u64() % 50 == 0 {
                sim.recruit();
            }
            sim.step();
            check_invariants(&sim)?;
            ensure!(sim.score() >= last_score, "score decreased at tick {}", sim.current_tick());
            last_score = sim.score();
        }
        println!(
            "seed {seed}: tick {} score {:.3} over {}",
            sim.current_tick(),
            sim.score(),
            sim.is_game_over()
        );
    }

    println!("Fuzzing completed successfully.");
    Ok(())
}
