#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that runs Maze Crawl in the terminal.

mod input;
mod settings;
mod terminal;

use std::{
    fs::File,
    io,
    path::{Path, PathBuf},
    sync::Mutex,
};

use anyhow::{anyhow, Context, Result};
use clap::Parser;
use maze_crawl_core::{GameState, RngDice};
use maze_crawl_engine::{Game, Step};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing_subscriber::EnvFilter;

use crate::{
    input::KeyMap,
    settings::Settings,
    terminal::{next_key_press, TerminalFrontend, TerminalGuard},
};

/// Turn-based dungeon crawl: find the hidden goal before the pursuer finds you.
#[derive(Debug, Parser)]
#[command(name = "maze-crawl", version, about)]
struct Args {
    /// TOML settings file with `[game]` parameters and `[keys]` bindings.
    #[arg(long)]
    config: Option<PathBuf>,
    /// Seed for maze generation and play; drawn from OS entropy when omitted.
    #[arg(long)]
    seed: Option<u64>,
    /// Map width in cells.
    #[arg(long)]
    width: Option<u32>,
    /// Map height in cells.
    #[arg(long)]
    height: Option<u32>,
    /// File receiving log output.
    #[arg(long, default_value = "maze-crawl.log")]
    log_file: PathBuf,
}

/// Entry point for the Maze Crawl command-line interface.
fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(&args.log_file)?;

    if let Err(error) = run(args) {
        tracing::error!("maze crawl failed: {error:#}");
        return Err(error);
    }
    Ok(())
}

fn init_tracing(path: &Path) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("failed to create log file {}", path.display()))?;
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .compact()
        .try_init()
        .map_err(|error| anyhow!(error).context("failed to install the log subscriber"))
}

fn run(args: Args) -> Result<()> {
    let mut settings = Settings::load(args.config.as_deref())?;
    settings.override_dimensions(args.width, args.height);
    let keys = KeyMap::from_bindings(&settings.keys)?;

    let seed = args.seed.unwrap_or_else(rand::random);
    tracing::info!(seed, "starting maze crawl");

    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let dice = RngDice::new(ChaCha8Rng::seed_from_u64(seed.wrapping_add(1)));
    let mut game = Game::generate(
        settings.game,
        &mut rng,
        dice,
        TerminalFrontend::new(io::stdout()),
    )
    .context("failed to create the game")?;

    let outcome = {
        let _guard = TerminalGuard::enter()?;
        play(&mut game, &keys)?
    };

    match outcome {
        GameState::Won => println!("You found it. Seed {seed}."),
        GameState::Lost => println!("Caught. Seed {seed}."),
        GameState::Quit | GameState::Generating | GameState::Playing => {}
    }
    Ok(())
}

type TerminalGame = Game<RngDice<ChaCha8Rng>, TerminalFrontend<io::Stdout>>;

fn play(game: &mut TerminalGame, keys: &KeyMap) -> Result<GameState> {
    let mut step = game.start()?;
    while step == Step::AwaitingInput && !game.frontend().is_finished() {
        let key = next_key_press()?;
        let Some(input) = keys.translate(key) else {
            continue;
        };
        step = game.submit(input)?;
    }

    let state = game.state();
    tracing::info!(?state, "game over");
    Ok(state)
}
