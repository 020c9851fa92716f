//! skirmish - run a seeded self-play battle and print the final snapshot

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use skirmish::scenario::{run_scenario, ScenarioOptions};
use skirmish::EngineConfig;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Dice & card combat engine
#[derive(Parser, Debug)]
#[command(name = "skirmish", version, about = "Play a seeded self-play battle")]
struct Args {
    /// TOML configuration file (SKIRMISH_* environment variables override it)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// RNG seed
    #[arg(short, long, default_value_t = 1)]
    seed: u64,

    /// Turns to play
    #[arg(short, long, default_value_t = 10)]
    turns: u32,

    /// Species of the lead combatant
    #[arg(long, default_value = "Emberfox")]
    species: String,

    /// Combatant level
    #[arg(short, long, default_value_t = 12)]
    level: u32,

    /// Emit logs as JSON lines
    #[arg(long)]
    log_json: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize tracing; stdout is reserved for the snapshot
    let registry = tracing_subscriber::registry().with(
        tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| "skirmish=info".into()),
    );
    if args.log_json {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(std::io::stderr),
            )
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
    let config = EngineConfig::load(args.config.as_deref())?;

    let options = ScenarioOptions {
        seed: args.seed,
        turns: args.turns,
        species: args.species,
        level: args.level,
    };
    let state = run_scenario(config, &options)?;

    println!("{}", serde_json::to_string_pretty(&state)?);
    println!("digest: {}", state.digest()?);
    Ok(())
}
