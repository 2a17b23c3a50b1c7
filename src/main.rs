//! Spire CLI - Command-line interface for playing and simulating runs.

// Allow print in the CLI binary
#![allow(clippy::print_stdout, clippy::print_stderr)]

mod cli;

use clap::{Parser, Subcommand};
use std::process::ExitCode;

/// Spire - A turn-based deck-building roguelike for the terminal
#[derive(Parser, Debug)]
#[command(name = "spire")]
#[command(author, version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
enum Commands {
    /// Play an interactive run in the terminal
    Play {
        /// Random seed (default: random)
        #[arg(short, long)]
        seed: Option<u64>,
    },

    /// Run mass headless games and aggregate statistics
    Simulate {
        /// Number of runs to play (default: 1000)
        #[arg(short, long, default_value = "1000")]
        runs: u64,

        /// Starting seed (increments for each run)
        #[arg(short, long)]
        seed: Option<u64>,

        /// Parallel threads (default: CPU count)
        #[arg(short = 'j', long)]
        threads: Option<usize>,

        /// Step cap per run before it counts as stalled (default: 10000)
        #[arg(long, default_value = "10000")]
        max_steps: u32,

        /// Output format: text or json
        #[arg(short, long, default_value = "text")]
        format: cli::OutputFormat,

        /// Show progress bar
        #[arg(short, long)]
        progress: bool,
    },
}

fn main() -> ExitCode {
    let args = Args::parse();

    let result = match args.command {
        Commands::Play { seed } => cli::play::execute(seed),

        Commands::Simulate {
            runs,
            seed,
            threads,
            max_steps,
            format,
            progress,
        } => cli::simulate::execute(runs, seed, threads, max_steps, format, progress),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
