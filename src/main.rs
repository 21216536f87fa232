//! Cube Puzzle
//!
//! An interactive 3x3x3 puzzle with face turns, scrambling, inverse-replay
//! solving and a solve timer, shown in a 3D viewer. Headless subcommands
//! scramble and replay move sequences on the command line.

mod visualization;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use log::{warn, LevelFilter};

use cubeplay::config::Config;
use cubeplay::cube::Cube;
use cubeplay::moves::{format_sequence, invert_sequence, parse_sequence};
use cubeplay::net::format_net;
use cubeplay::persistence;
use cubeplay::scramble::scramble;
use cubeplay::timer::format_time;
use rand::rngs::StdRng;
use rand::SeedableRng;

/// Plays a 3x3x3 twisty puzzle.
#[derive(Parser)]
#[command(name = "cubeplay")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Settings file in TOML format.
    #[arg(long, short = 'c', value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Increase logging verbosity (can be repeated)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Open the interactive 3D viewer.
    Play,
    /// Print a random scramble and the cube it produces.
    Scramble {
        /// Number of quarter turns (defaults to the configured length).
        #[arg(long, short = 'n')]
        length: Option<usize>,
        /// Seed for a reproducible scramble.
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Apply a move sequence such as "R U R' U'" to a solved cube.
    Apply {
        /// The move sequence to apply.
        sequence: String,
    },
    /// Show the stored best time.
    Best {
        /// Delete the stored best time instead.
        #[arg(long)]
        clear: bool,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    env_logger::Builder::new()
        .filter_level(match cli.verbose {
            0 => LevelFilter::Warn,
            1 => LevelFilter::Info,
            2 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        })
        .format_timestamp(None)
        .init();

    let config = match Config::load(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{e}");
            return ExitCode::FAILURE;
        }
    };

    match cli.command.unwrap_or(Command::Play) {
        Command::Play => {
            println!("Controls: U/D/F/B/L/R turn (Shift reverses), Space timer, N scramble, S solve, C reset, V reveal, X/Y/Z rotate cube, drag to orbit");
            visualization::display(&config);
            ExitCode::SUCCESS
        }
        Command::Scramble { length, seed } => {
            run_scramble(length.unwrap_or(config.engine.scramble_length), seed);
            ExitCode::SUCCESS
        }
        Command::Apply { sequence } => run_apply(&sequence),
        Command::Best { clear } => run_best(&config, clear),
    }
}

/// Prints a scramble, the resulting net and the sequence that undoes it.
fn run_scramble(length: usize, seed: Option<u64>) {
    let mut rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };
    let moves = scramble(&mut rng, length);

    let mut cube = Cube::solved();
    cube.apply_all(&moves);

    println!("Scramble: {}", format_sequence(&moves));
    println!();
    print!("{}", format_net(&cube));
    println!();
    println!("Undo:     {}", format_sequence(&invert_sequence(&moves)));
}

/// Applies a user-supplied sequence and reports the result.
fn run_apply(sequence: &str) -> ExitCode {
    let moves = match parse_sequence(sequence) {
        Ok(moves) => moves,
        Err(e) => {
            eprintln!("Invalid sequence: {e}");
            return ExitCode::FAILURE;
        }
    };

    let mut cube = Cube::solved();
    cube.apply_all(&moves);

    print!("{}", format_net(&cube));
    println!();
    println!("Solved: {}", if cube.is_solved() { "yes" } else { "no" });
    if !moves.is_empty() {
        println!("Undo:   {}", format_sequence(&invert_sequence(&moves)));
    }
    ExitCode::SUCCESS
}

/// Prints or clears the stored best time.
fn run_best(config: &Config, clear: bool) -> ExitCode {
    let Some(path) = config.storage.resolved_best_time_path() else {
        eprintln!("Best time persistence is disabled.");
        return ExitCode::FAILURE;
    };

    if clear {
        if let Err(e) = persistence::clear_best_time(&path) {
            warn!("Failed to clear {}: {e}", path.display());
            return ExitCode::FAILURE;
        }
        println!("Cleared best time");
        return ExitCode::SUCCESS;
    }

    match persistence::load_best_time(&path) {
        Some(best) => println!("Best time: {}", format_time(best)),
        None => println!("No best time recorded yet."),
    }
    ExitCode::SUCCESS
}
