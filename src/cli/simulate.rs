//! Simulate command implementation - mass headless runs.
//!
//! Auto-plays full runs with a simple fixed policy (play the first
//! affordable card, otherwise end the turn; travel at random; rest when
//! resting is offered) and aggregates outcome statistics across many
//! seeds in parallel.

use super::output::{JsonSimulationResult, SimulationStats, format_simulation_text};
use super::{CliError, OutputFormat};
use indicatif::{ProgressBar, ProgressStyle};
use rayon::prelude::*;
use spire::game::{Game, GameState, NodeKind};
use spire::rng::Rng;
use std::time::Instant;

/// Outcome of one auto-played run.
#[derive(Debug, Clone, Copy)]
pub(crate) struct RunOutcome {
    /// Whether the boss fight was won and its reward resolved.
    pub(crate) cleared: bool,
    /// Whether the player was defeated.
    pub(crate) defeated: bool,
    /// Highest floor entered, 1-based.
    pub(crate) floor_reached: usize,
    /// Gold held at the end of the run.
    pub(crate) gold: u32,
}

/// Auto-play a single run to completion or the step cap.
pub(crate) fn play_run(seed: u64, max_steps: u32) -> RunOutcome {
    let mut game = Game::new(seed);
    // The policy's own choices must not disturb the run's random stream
    let mut policy_rng = Rng::new(seed ^ 0x9E37_79B9_7F4A_7C15);

    let mut cleared = false;
    for _ in 0..max_steps {
        match game.state {
            GameState::Map => {
                let connections = game.map.connections();
                if connections.is_empty() {
                    // The boss floor has no onward paths; standing there
                    // on the map screen means its fight was won
                    cleared = game.map.current_node().kind == NodeKind::Boss;
                    break;
                }
                let target = connections[policy_rng.next_index(connections.len())];
                let _ = game.select_map_node(target);
            }
            GameState::Combat => {
                let affordable = game
                    .player
                    .hand
                    .iter()
                    .position(|card| card.energy_cost <= game.player.energy);
                match affordable {
                    Some(index) => {
                        let _ = game.use_card(index);
                    }
                    None => {
                        let _ = game.end_turn();
                    }
                }
            }
            GameState::Reward => {
                if policy_rng.coin_flip() {
                    let _ = game.select_card_reward(0);
                } else {
                    game.skip_card_reward();
                }
            }
            GameState::Rest => game.rest_heal(),
            GameState::Shop | GameState::Event => game.return_to_map(),
            GameState::GameOver => break,
        }
    }

    RunOutcome {
        cleared,
        defeated: game.state == GameState::GameOver,
        floor_reached: game.map.current().floor + 1,
        gold: game.player.gold,
    }
}

/// Execute the simulate command.
///
/// # Errors
///
/// Returns an error if output serialization fails.
pub(crate) fn execute(
    runs: u64,
    seed: Option<u64>,
    threads: Option<usize>,
    max_steps: u32,
    format: OutputFormat,
    progress: bool,
) -> Result<(), CliError> {
    // Set thread pool size if specified
    if let Some(num_threads) = threads {
        rayon::ThreadPoolBuilder::new()
            .num_threads(num_threads)
            .build_global()
            .ok(); // Ignore error if already initialized
    }

    // Base seed
    let base_seed = seed.unwrap_or_else(|| {
        use std::time::{SystemTime, UNIX_EPOCH};
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_nanos() as u64)
            .unwrap_or(42)
    });

    // Progress bar
    let pb = if progress {
        let pb = ProgressBar::new(runs);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} runs ({per_sec})")
                .expect("valid template")
                .progress_chars("=>-"),
        );
        Some(pb)
    } else {
        None
    };

    let start = Instant::now();

    // Run in parallel using the fold/reduce pattern: each thread
    // accumulates into its own stats, merged at the end
    let stats = (0..runs)
        .into_par_iter()
        .fold(SimulationStats::default, |mut local_stats, i| {
            let outcome = play_run(base_seed.wrapping_add(i), max_steps);
            local_stats.add_outcome(&outcome);
            local_stats
        })
        .reduce(SimulationStats::default, |mut a, b| {
            a.merge(&b);
            a
        });

    if let Some(pb) = pb {
        pb.set_position(stats.runs);
        pb.finish_with_message("done");
    }

    let duration = start.elapsed();
    let runs_per_sec = if duration.as_secs_f64() > 0.0 {
        #[allow(clippy::cast_precision_loss)]
        let played = stats.runs as f64;
        played / duration.as_secs_f64()
    } else {
        0.0
    };

    match format {
        OutputFormat::Text => {
            println!();
            print!("{}", format_simulation_text(&stats, base_seed));
            println!();
            println!(
                "Duration: {:.2}s ({runs_per_sec:.0} runs/sec)",
                duration.as_secs_f64()
            );
        }
        OutputFormat::Json => {
            let json_result = JsonSimulationResult::from_stats(&stats, base_seed);
            let json = serde_json::to_string_pretty(&json_result)
                .map_err(|e| CliError::new(format!("JSON serialization failed: {e}")))?;
            println!("{json}");
        }
    }

    Ok(())
}
