//! Command line runner: plays a match between computer players and prints
//! the board after every tick.

mod telemetry;

use anyhow::{bail, Context, Result};
use clap::Parser;
use fish_core::{ControllerKind, GameConfig, PlayerConfig, MAX_SEARCH_DEPTH};
use fish_world::{render, MatchResult, Simulation};
use std::path::{Path, PathBuf};
use std::thread;
use std::time::Duration;
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "fish", version, about = "Penguins and fish on a hex ice floe")]
struct Cli {
    /// JSON game configuration; defaults are used for anything it omits.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Random seed for board generation and AI choices.
    #[arg(short, long)]
    seed: Option<u64>,

    /// Seat this many players (2-4) with the standard lineup.
    #[arg(short, long)]
    players: Option<usize>,

    /// Search depth for every minimax player.
    #[arg(short, long)]
    depth: Option<u8>,

    /// Stop after this many ticks even if the game is not over.
    #[arg(long)]
    max_ticks: Option<u64>,

    /// Write the match result as JSON to this file.
    #[arg(long)]
    record: Option<PathBuf>,

    /// Print only the final board.
    #[arg(short, long)]
    quiet: bool,

    /// Pause between ticks, in milliseconds.
    #[arg(long, default_value_t = 0)]
    delay_ms: u64,

    /// Emit logs as JSON lines.
    #[arg(long)]
    log_json: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    telemetry::init_telemetry(cli.log_json)?;

    let config = build_config(&cli)?;
    info!(
        seed = config.seed,
        players = config.players.len(),
        rows = config.board.rows,
        cols = config.board.cols,
        "Configuration loaded"
    );

    let controllers = fish_ai::controllers_for(&config);
    let mut sim = Simulation::new(config, controllers).context("failed to set up match")?;

    if !cli.quiet {
        println!("{}", render(sim.game()));
    }

    let delay = Duration::from_millis(cli.delay_ms);
    let result = sim.run_with(|game, _| {
        if !cli.quiet {
            println!("{}", render(game));
            if !delay.is_zero() {
                thread::sleep(delay);
            }
        }
    })?;

    if cli.quiet {
        println!("{}", render(sim.game()));
    }

    if let Some(path) = &cli.record {
        write_record(path, &result)?;
    }

    Ok(())
}

fn write_record(path: &Path, result: &MatchResult) -> Result<()> {
    let json = result.to_json()?;
    std::fs::write(path, json)
        .with_context(|| format!("failed to write match record to {}", path.display()))?;
    info!(path = %path.display(), "Match record written");
    Ok(())
}

/// File configuration, then command line overrides
fn build_config(cli: &Cli) -> Result<GameConfig> {
    let mut config = match &cli.config {
        Some(path) => GameConfig::load(path)
            .with_context(|| format!("failed to load config from {}", path.display()))?,
        None => GameConfig::default(),
    };

    if let Some(seed) = cli.seed {
        config.seed = seed;
    }
    if let Some(max_ticks) = cli.max_ticks {
        config.max_ticks = max_ticks;
    }
    if let Some(depth) = cli.depth {
        if depth == 0 || depth > MAX_SEARCH_DEPTH {
            bail!("--depth must be between 1 and {}", MAX_SEARCH_DEPTH);
        }
    }

    match (cli.players, cli.depth) {
        (Some(players), depth) => {
            if !(2..=4).contains(&players) {
                bail!("--players must be between 2 and 4, got {}", players);
            }
            config.players = PlayerConfig::lineup(players, depth.unwrap_or(3));
        }
        (None, Some(depth)) => {
            for player in &mut config.players {
                if let ControllerKind::Minimax { depth: d } = &mut player.controller {
                    *d = depth;
                }
            }
        }
        (None, None) => {}
    }

    config.validate()?;
    Ok(config)
}
