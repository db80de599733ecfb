//! go-engine: play Go against an alpha-beta searcher.
//!
//! ## Usage
//!
//! - `go-engine` - Play a game against the engine on the terminal
//! - `go-engine play` - Same, with board size, difficulty and color flags
//! - `go-engine demo` - Watch the engine play itself
//! - `go-engine replay <file>` - Load a saved game record
//! - `go-engine gtp` - Start GTP server for GUI integration
//!
//! Logs go to stderr and are filtered by `RUST_LOG` (default `warn`).

use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use tracing::info;
use tracing_subscriber::EnvFilter;

use go_engine::board::Color;
use go_engine::constants::DEFAULT_SIZE;
use go_engine::game::{Game, MoveRecord};
use go_engine::gtp::{GtpEngine, Vertex, format_result, format_vertex, parse_vertex};
use go_engine::record::GameRecord;
use go_engine::search::{Difficulty, Engine, SearchConfig};

/// go-engine: Go rules and an alpha-beta move searcher
#[derive(Parser)]
#[command(name = "go-engine")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Play against the engine, entering moves like D4 or pass
    Play {
        #[arg(long, default_value_t = DEFAULT_SIZE)]
        size: usize,
        /// easy, medium or hard
        #[arg(long, default_value_t = Difficulty::Medium)]
        difficulty: Difficulty,
        /// The color you play
        #[arg(long, value_enum, default_value_t = Side::Black)]
        color: Side,
        /// Seed for reproducible engine choices
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Let the engine play both sides
    Demo {
        #[arg(long, default_value_t = DEFAULT_SIZE)]
        size: usize,
        #[arg(long, default_value_t = Difficulty::Easy)]
        difficulty: Difficulty,
        #[arg(long)]
        seed: Option<u64>,
        /// Write the finished game as a JSON record
        #[arg(long)]
        save: Option<PathBuf>,
    },
    /// Load a JSON game record and show where it ended
    Replay { file: PathBuf },
    /// Start the GTP (Go Text Protocol) server for use with GUI applications
    Gtp {
        #[arg(long, default_value_t = Difficulty::Medium)]
        difficulty: Difficulty,
        #[arg(long)]
        seed: Option<u64>,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum Side {
    Black,
    White,
}

impl From<Side> for Color {
    fn from(side: Side) -> Self {
        match side {
            Side::Black => Color::Black,
            Side::White => Color::White,
        }
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Play {
            size,
            difficulty,
            color,
            seed,
        }) => run_play(size, difficulty, color.into(), seed),
        None => run_play(DEFAULT_SIZE, Difficulty::default(), Color::Black, None),
        Some(Commands::Demo {
            size,
            difficulty,
            seed,
            save,
        }) => run_demo(size, difficulty, seed, save.as_deref()),
        Some(Commands::Replay { file }) => run_replay(&file),
        Some(Commands::Gtp { difficulty, seed }) => {
            let mut engine = GtpEngine::new(make_engine(difficulty, seed));
            engine.run().context("GTP session failed")
        }
    }
}

fn make_engine(difficulty: Difficulty, seed: Option<u64>) -> Engine {
    match seed {
        Some(seed) => Engine::with_seed(SearchConfig::from_difficulty(difficulty), seed),
        None => Engine::from_difficulty(difficulty),
    }
}

/// Human against engine on the terminal.
fn run_play(size: usize, difficulty: Difficulty, human: Color, seed: Option<u64>) -> Result<()> {
    let mut game = Game::new(size)?;
    let mut engine = make_engine(difficulty, seed);
    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    println!("You play {human}, engine is {difficulty}. Enter a vertex, pass or quit.\n");

    while !game.is_over() {
        if game.to_move() == human {
            println!("{}", game.board());
            print!("{human} to move> ");
            io::stdout().flush()?;

            let Some(line) = lines.next() else {
                return Ok(());
            };
            let line = line?;
            let input = line.trim();
            if input.eq_ignore_ascii_case("quit") {
                return Ok(());
            }
            let result = match parse_vertex(input, size) {
                Some(Vertex::Pass) => game.pass(),
                Some(Vertex::Point(row, col)) => game.play(row, col).map(drop),
                None => {
                    println!("Could not read {input:?}");
                    continue;
                }
            };
            if let Err(e) = result {
                println!("{e}");
            }
        } else {
            match engine.choose_move(&game) {
                Some((row, col)) => {
                    game.play(row, col)?;
                    println!("Engine plays {}", format_vertex(row, col, size));
                }
                None => {
                    game.pass()?;
                    println!("Engine passes");
                }
            }
        }
    }

    print_result(&game);
    Ok(())
}

/// Self-play until both sides pass or the move cap is hit.
fn run_demo(
    size: usize,
    difficulty: Difficulty,
    seed: Option<u64>,
    save: Option<&Path>,
) -> Result<()> {
    let mut game = Game::new(size)?;
    let mut engine = make_engine(difficulty, seed);
    let max_plies = size * size * 2;

    println!(
        "go-engine self-play, {size}x{size}, {difficulty} (depth {})\n",
        engine.config().depth
    );

    while !game.is_over() && game.history().len() < max_plies {
        let color = game.to_move();
        match engine.choose_move(&game) {
            Some((row, col)) => {
                let captured = game.play(row, col)?;
                print!("{color} {}", format_vertex(row, col, size));
                if !captured.is_empty() {
                    print!(" captures {}", captured.len());
                }
                println!();
            }
            None => {
                game.pass()?;
                println!("{color} pass");
            }
        }
        info!(nodes = engine.nodes_searched(), "move chosen");
    }

    println!("\n{}", game.board());
    print_result(&game);

    if let Some(path) = save {
        let json = GameRecord::from_game(&game).to_json()?;
        std::fs::write(path, json)
            .with_context(|| format!("failed to write {}", path.display()))?;
        println!("Saved game record to {}", path.display());
    }
    Ok(())
}

fn run_replay(path: &Path) -> Result<()> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    let game = GameRecord::load(&text)
        .with_context(|| format!("failed to load {}", path.display()))?;

    let size = game.size();
    for (i, record) in game.history().iter().enumerate() {
        match *record {
            MoveRecord::Place { row, col, color } => {
                println!("{:>3}. {color} {}", i + 1, format_vertex(row, col, size))
            }
            MoveRecord::Pass { color } => println!("{:>3}. {color} pass", i + 1),
        }
    }

    println!("\n{}", game.board());
    print_result(&game);
    Ok(())
}

fn print_result(game: &Game) {
    println!(
        "Captures: black {}, white {}",
        game.captures(Color::Black),
        game.captures(Color::White)
    );
    match game.final_score() {
        Some(score) => {
            println!(
                "Final score: black {} white {}",
                score.of(Color::Black),
                score.of(Color::White)
            );
            println!("Result: {}", format_result(&score));
        }
        None => {
            let score = game.score();
            println!(
                "Game not finished. Live score (no komi): black {} white {}",
                score.black, score.white
            );
        }
    }
}
