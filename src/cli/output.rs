//! Output formatting utilities for CLI.

use super::simulate::RunOutcome;
use serde::Serialize;

/// Aggregated statistics over many auto-played runs.
#[derive(Debug, Default)]
pub(super) struct SimulationStats {
    /// Total runs played.
    pub(super) runs: u64,
    /// Runs that beat the boss.
    pub(super) cleared: u64,
    /// Runs that ended in defeat.
    pub(super) defeated: u64,
    /// Runs that hit the step cap.
    pub(super) stalled: u64,
    /// Sum of highest floors reached, for the average.
    floor_sum: u64,
    /// Best floor reached across all runs.
    pub(super) best_floor: usize,
    /// Sum of final gold, for the average.
    gold_sum: u64,
}

impl SimulationStats {
    /// Add one run's outcome to the stats.
    pub(super) fn add_outcome(&mut self, outcome: &RunOutcome) {
        self.runs += 1;
        if outcome.cleared {
            self.cleared += 1;
        } else if outcome.defeated {
            self.defeated += 1;
        } else {
            self.stalled += 1;
        }
        self.floor_sum += outcome.floor_reached as u64;
        self.best_floor = self.best_floor.max(outcome.floor_reached);
        self.gold_sum += u64::from(outcome.gold);
    }

    /// Merge another thread's stats into this one.
    pub(super) fn merge(&mut self, other: &Self) {
        self.runs += other.runs;
        self.cleared += other.cleared;
        self.defeated += other.defeated;
        self.stalled += other.stalled;
        self.floor_sum += other.floor_sum;
        self.best_floor = self.best_floor.max(other.best_floor);
        self.gold_sum += other.gold_sum;
    }

    /// Average highest floor reached.
    #[allow(clippy::cast_precision_loss)]
    pub(super) fn avg_floor(&self) -> f64 {
        if self.runs == 0 {
            return 0.0;
        }
        self.floor_sum as f64 / self.runs as f64
    }

    /// Average final gold.
    #[allow(clippy::cast_precision_loss)]
    pub(super) fn avg_gold(&self) -> f64 {
        if self.runs == 0 {
            return 0.0;
        }
        self.gold_sum as f64 / self.runs as f64
    }
}

/// JSON-serializable simulation summary.
#[derive(Debug, Serialize)]
pub(super) struct JsonSimulationResult {
    /// Base seed (run N uses `base_seed + N`).
    pub(super) base_seed: u64,
    /// Total runs played.
    pub(super) runs: u64,
    /// Runs that beat the boss.
    pub(super) cleared: u64,
    /// Runs that ended in defeat.
    pub(super) defeated: u64,
    /// Runs that hit the step cap.
    pub(super) stalled: u64,
    /// Fraction of runs cleared.
    pub(super) clear_rate: f64,
    /// Average highest floor reached.
    pub(super) avg_floor: f64,
    /// Best floor reached across all runs.
    pub(super) best_floor: usize,
    /// Average final gold.
    pub(super) avg_gold: f64,
}

impl JsonSimulationResult {
    /// Create from aggregated stats.
    #[allow(clippy::cast_precision_loss)]
    pub(super) fn from_stats(stats: &SimulationStats, base_seed: u64) -> Self {
        let clear_rate = if stats.runs == 0 {
            0.0
        } else {
            stats.cleared as f64 / stats.runs as f64
        };
        Self {
            base_seed,
            runs: stats.runs,
            cleared: stats.cleared,
            defeated: stats.defeated,
            stalled: stats.stalled,
            clear_rate,
            avg_floor: stats.avg_floor(),
            best_floor: stats.best_floor,
            avg_gold: stats.avg_gold(),
        }
    }
}

/// Format aggregated stats as human-readable text.
#[allow(clippy::cast_precision_loss)]
pub(super) fn format_simulation_text(stats: &SimulationStats, base_seed: u64) -> String {
    let mut output = String::new();

    output.push_str(&format!(
        "Simulation Results ({} runs, base seed {base_seed})\n",
        stats.runs
    ));

    let pct = |n: u64| {
        if stats.runs == 0 {
            0.0
        } else {
            n as f64 * 100.0 / stats.runs as f64
        }
    };
    output.push_str(&format!(
        "  Cleared:  {} ({:.1}%)\n",
        stats.cleared,
        pct(stats.cleared)
    ));
    output.push_str(&format!(
        "  Defeated: {} ({:.1}%)\n",
        stats.defeated,
        pct(stats.defeated)
    ));
    output.push_str(&format!(
        "  Stalled:  {} ({:.1}%)\n",
        stats.stalled,
        pct(stats.stalled)
    ));
    output.push_str(&format!(
        "  Floors: avg {:.1}, best {}\n",
        stats.avg_floor(),
        stats.best_floor
    ));
    output.push_str(&format!("  Gold: avg {:.1}\n", stats.avg_gold()));

    output
}
