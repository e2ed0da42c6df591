//! Engine configuration.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::time::TimeConfig;
use crate::board::search::constants::MAX_SEARCH_DEPTH;
use crate::board::search::SearchParams;

pub const MIN_HASH_MB: usize = 1;
pub const MAX_HASH_MB: usize = 32_000;
pub const MAX_MOVE_OVERHEAD_MS: u64 = 10_000;
pub const MIN_REPETITION_THRESHOLD: usize = 1;
pub const MAX_REPETITION_THRESHOLD: usize = 2;

/// Tunable engine settings, mostly exposed as UCI options.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct EngineOptions {
    /// Transposition table size in megabytes
    pub hash_mb: usize,
    /// Play book moves in games that began at the standard start
    pub own_book: bool,
    pub move_overhead_ms: u64,
    /// Budget when `go` carries no limits
    pub default_move_time_ms: u64,
    /// Floor for clock-derived budgets
    pub min_move_time_ms: u64,
    /// Earlier occurrences that make a position a draw inside the search
    pub repetition_threshold: usize,
    /// Iterative deepening cap when no depth is given
    pub max_depth: u32,
}

impl Default for EngineOptions {
    fn default() -> Self {
        EngineOptions {
            hash_mb: 64,
            own_book: true,
            move_overhead_ms: 10,
            default_move_time_ms: 7000,
            min_move_time_ms: 10,
            repetition_threshold: 1,
            max_depth: MAX_SEARCH_DEPTH,
        }
    }
}

impl EngineOptions {
    #[must_use]
    pub fn time_config(&self) -> TimeConfig {
        TimeConfig {
            move_overhead_ms: self.move_overhead_ms,
            default_move_time_ms: self.default_move_time_ms,
            min_move_time_ms: self.min_move_time_ms,
        }
    }

    #[must_use]
    pub fn search_params(&self) -> SearchParams {
        SearchParams {
            repetition_threshold: self.repetition_threshold,
            max_depth: self.max_depth,
            ..SearchParams::default()
        }
    }
}
