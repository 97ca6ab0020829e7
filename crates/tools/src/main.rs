use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result, anyhow};
use clap::Parser;
use hunt_core::{
    InputPayload, JournalWriter, SimConfig, Simulation, load_journal_from_file, replay_to_end,
};

#[derive(Parser)]
#[command(author, version, about = "Run or replay a treasure-hunt simulation headlessly")]
struct Args {
    #[arg(short, long, default_value_t = 42)]
    seed: u64,
    /// Overrides the grid size from the config.
    #[arg(long)]
    size: Option<usize>,
    #[arg(short, long, default_value_t = 1000)]
    ticks: u64,
    /// JSON world-generation config; missing fields take defaults.
    #[arg(short, long)]
    config: Option<PathBuf>,
    /// Replay a JSONL journal instead of running fresh.
    #[arg(short, long, conflicts_with_all = ["record", "config", "size", "seed"])]
    journal: Option<PathBuf>,
    /// Write every applied input to a JSONL journal.
    #[arg(short, long)]
    record: Option<PathBuf>,
    /// Attempt hideout recruitment every N ticks (0 disables).
    #[arg(long, default_value_t = 0)]
    recruit_every: u64,
    /// Print the event log after the run.
    #[arg(long)]
    events: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    if let Some(path) = &args.journal {
        let loaded = load_journal_from_file(path)
            .with_context(|| format!("Failed to load journal: {}", path.display()))?;
        let result = replay_to_end(&loaded.journal, args.ticks)
            .map_err(|e| anyhow!("Replay failed: {e}"))?;
        println!("Replay complete.");
        println!("Final Tick: {}", result.final_tick);
        println!("Score: {:.3}", result.final_score);
        println!("Outcome: {:?}", result.final_outcome);
        println!("Snapshot Hash: {}", result.final_snapshot_hash);
        if result.unapplied_inputs > 0 {
            println!("Unapplied inputs: {}", result.unapplied_inputs);
        }
        return Ok(());
    }

    let mut config = match &args.config {
        Some(path) => {
            let data = fs::read_to_string(path)
                .with_context(|| format!("Failed to read config: {}", path.display()))?;
            serde_json::from_str::<SimConfig>(&data)
                .with_context(|| format!("Failed to parse config: {}", path.display()))?
        }
        None => SimConfig::default(),
    };
    if let Some(size) = args.size {
        config.size = size;
    }

    let mut sim = Simulation::with_config(&config, args.seed)
        .map_err(|e| anyhow!("Cannot build world: {e}"))?;
    let mut writer = match &args.record {
        Some(path) => Some(
            JournalWriter::create(path, args.seed, &config, env!("CARGO_PKG_VERSION"))
                .with_context(|| format!("Failed to create journal: {}", path.display()))?,
        ),
        None => None,
    };

    while !sim.is_game_over() && sim.current_tick() < args.ticks {
        let tick = sim.current_tick();
        if args.recruit_every > 0 && tick % args.recruit_every == 0 {
            let recruited = sim.recruit();
            if let Some(writer) = writer.as_mut() {
                writer.append(tick, &InputPayload::Recruit).context("Failed to journal input")?;
            }
            if !recruited.is_empty() {
                println!("tick {tick}: {} hunter(s) recruited", recruited.len());
            }
        }
        sim.step();
    }

    if args.events {
        for event in sim.log() {
            println!("{event:?}");
        }
    }
    println!("Run complete.");
    println!("Final Tick: {}", sim.current_tick());
    println!("Score: {:.3}", sim.score());
    println!("Hunters left: {}", sim.hunters().count());
    println!("Treasures left: {}", sim.treasures().len());
    println!("Game over: {}", sim.is_game_over());
    println!("Snapshot Hash: {}", sim.snapshot_hash());

    Ok(())
}
