//! Gamma: a territory game engine.
//!
//! ## Usage
//!
//! - `gamma-rust` - Read a mode line from stdin and play in batch or interactive mode
//! - `gamma-rust play` - Same as above
//! - `gamma-rust demo` - Play a random game and print the result

use std::fs::File;
use std::io::{self, Write};
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

use gamma_rust::batch::{BatchEngine, Mode, NumberedLines, select_mode};
use gamma_rust::constants::DEFAULT_LOG_FILTER;
use gamma_rust::gamma::{Game, GameConfig};
use gamma_rust::interactive::Interactive;

/// Gamma: claim the board, keep your areas few
#[derive(Parser)]
#[command(name = "gamma-rust")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Write logs to this file instead of stderr
    #[arg(long, global = true)]
    log_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Read `B` or `I` and the game parameters from stdin, then play
    Play,
    /// Play a random game and print the final board
    Demo {
        #[arg(long, default_value_t = 10)]
        width: u32,
        #[arg(long, default_value_t = 10)]
        height: u32,
        #[arg(long, default_value_t = 3)]
        players: u32,
        #[arg(long, default_value_t = 4)]
        areas: u32,
        /// Seed for the random moves
        #[arg(long)]
        seed: Option<u64>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.log_file.as_ref())?;

    match cli.command {
        Some(Commands::Play) | None => play(),
        Some(Commands::Demo {
            width,
            height,
            players,
            areas,
            seed,
        }) => {
            let config = GameConfig {
                width,
                height,
                players,
                areas,
            };
            run_demo(&config, seed)
        }
    }
}

fn init_logging(log_file: Option<&PathBuf>) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    match log_file {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("cannot create log file {}", path.display()))?;
            builder
                .with_writer(Arc::new(file))
                .with_ansi(false)
                .try_init()
        }
        None => builder.with_writer(io::stderr).try_init(),
    }
    .map_err(|e| anyhow::anyhow!(e))
    .context("cannot initialise logging")
}

fn play() -> Result<()> {
    let stdin = io::stdin();
    let mut lines = NumberedLines::new(stdin.lock());
    let mut stdout = io::stdout();
    let mut stderr = io::stderr();

    let Some((mode, game, number)) =
        select_mode(&mut lines, &mut stderr).context("cannot read input")?
    else {
        return Ok(());
    };
    writeln!(stdout, "OK {number}")?;
    stdout.flush()?;

    match mode {
        Mode::Batch(_) => {
            info!(line = number, "batch mode");
            BatchEngine::new(game)
                .run(&mut lines, &mut stdout, &mut stderr)
                .context("batch mode failed")
        }
        Mode::Interactive(_) => {
            info!(line = number, "interactive mode");
            drop(lines);
            Interactive::new(game).run()
        }
    }
}

/// Plays random moves until nobody can move.
fn run_demo(config: &GameConfig, seed: Option<u64>) -> Result<()> {
    let mut game = Game::with_config(config).context("cannot create game")?;
    let mut rng = match seed {
        Some(seed) => fastrand::Rng::with_seed(seed),
        None => fastrand::Rng::new(),
    };

    println!("Gamma demo: {config:?}\n");
    let mut turn = game.next_player(game.players());
    let mut moves = 0u64;
    while let Some(player) = turn {
        // Golden moves are rare; regular moves are retried at random fields.
        let golden = game.golden_possible(player) && rng.u8(0..10) == 0;
        let moved = loop {
            let x = rng.u32(0..game.width());
            let y = rng.u32(0..game.height());
            if golden {
                if game.golden_move(player, x, y) {
                    break true;
                }
            } else if game.free_fields(player) == 0 {
                break false;
            } else if game.play(player, x, y) {
                break true;
            }
        };
        if moved {
            moves += 1;
        }
        turn = game.next_player(player);
    }

    println!("{game}");
    println!("Moves played: {moves}");
    for p in 1..=game.players() {
        println!(
            "Player {p}: {} fields in {} areas",
            game.busy_fields(p),
            game.areas(p)
        );
    }
    Ok(())
}
