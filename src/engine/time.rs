//! Time management.
//!
//! Turns the optional limits of a search request into exactly one governing
//! mode. Precedence: fixed depth > fixed move time > remaining time plus
//! increment > built-in default.

use std::time::Duration;

/// Share of the remaining clock spent on one move
pub const MOVES_TO_GO_ESTIMATE: u64 = 40;

/// Optional limits of a single search request, as sent by a GUI.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchLimits {
    /// Time remaining on our clock
    pub time_left_ms: Option<u64>,
    /// Increment per move for our side
    pub increment_ms: Option<u64>,
    /// Fixed search depth; disables the clock entirely
    pub depth: Option<u32>,
    /// Fixed time for this move
    pub move_time_ms: Option<u64>,
}

impl SearchLimits {
    #[must_use]
    pub fn depth(depth: u32) -> Self {
        SearchLimits {
            depth: Some(depth),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn move_time(time_ms: u64) -> Self {
        SearchLimits {
            move_time_ms: Some(time_ms),
            ..Self::default()
        }
    }
}

/// Configuration for time allocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeConfig {
    /// Time reserved for communication latency
    pub move_overhead_ms: u64,
    /// Budget when the request carries no limits
    pub default_move_time_ms: u64,
    /// Floor for clock-derived budgets
    pub min_move_time_ms: u64,
}

impl Default for TimeConfig {
    fn default() -> Self {
        Self {
            move_overhead_ms: 10,
            default_move_time_ms: 7000,
            min_move_time_ms: 10,
        }
    }
}

/// The single mode governing one search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeControl {
    /// Search exactly to this depth, no clock
    Depth(u32),
    /// Fixed time per move
    MoveTime { time_ms: u64 },
    /// Derived from the remaining clock and increment
    Incremental { time_left_ms: u64, inc_ms: u64 },
    /// No limits given
    Default,
}

impl TimeControl {
    #[must_use]
    pub fn from_limits(limits: &SearchLimits) -> Self {
        if let Some(depth) = limits.depth {
            TimeControl::Depth(depth.max(1))
        } else if let Some(time_ms) = limits.move_time_ms {
            TimeControl::MoveTime { time_ms }
        } else if let Some(time_left_ms) = limits.time_left_ms {
            TimeControl::Incremental {
                time_left_ms,
                inc_ms: limits.increment_ms.unwrap_or(0),
            }
        } else {
            TimeControl::Default
        }
    }

    /// Depth limit, if this control has one
    #[must_use]
    pub fn depth_limit(&self) -> Option<u32> {
        match self {
            TimeControl::Depth(depth) => Some(*depth),
            _ => None,
        }
    }

    /// Wall-clock budget for the search; `None` means unlimited.
    #[must_use]
    pub fn time_limit(&self, config: &TimeConfig) -> Option<Duration> {
        let ms = match *self {
            TimeControl::Depth(_) => return None,
            TimeControl::MoveTime { time_ms } => {
                time_ms.saturating_sub(config.move_overhead_ms).max(1)
            }
            TimeControl::Incremental {
                time_left_ms,
                inc_ms,
            } => (time_left_ms / MOVES_TO_GO_ESTIMATE + inc_ms)
                .saturating_sub(config.move_overhead_ms)
                .max(config.min_move_time_ms),
            TimeControl::Default => config.default_move_time_ms,
        };
        Some(Duration::from_millis(ms))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn depth_wins_over_everything() {
        let limits = SearchLimits {
            time_left_ms: Some(60_000),
            increment_ms: Some(1000),
            depth: Some(5),
            move_time_ms: Some(100),
        };
        let control = TimeControl::from_limits(&limits);
        assert_eq!(control, TimeControl::Depth(5));
        assert_eq!(control.time_limit(&TimeConfig::default()), None);
    }

    #[test]
    fn move_time_wins_over_clock() {
        let limits = SearchLimits {
            time_left_ms: Some(60_000),
            move_time_ms: Some(250),
            ..SearchLimits::default()
        };
        let control = TimeControl::from_limits(&limits);
        assert_eq!(control, TimeControl::MoveTime { time_ms: 250 });
        assert_eq!(
            control.time_limit(&TimeConfig::default()),
            Some(Duration::from_millis(240))
        );
    }

    #[test]
    fn move_time_reserves_overhead() {
        let control = TimeControl::MoveTime { time_ms: 300 };
        let config = TimeConfig {
            move_overhead_ms: 50,
            ..TimeConfig::default()
        };
        assert_eq!(control.time_limit(&config), Some(Duration::from_millis(250)));
        let tight = TimeControl::MoveTime { time_ms: 20 };
        assert_eq!(tight.time_limit(&config), Some(Duration::from_millis(1)));
    }

    #[test]
    fn clock_budget_uses_fortieth_plus_increment() {
        let limits = SearchLimits {
            time_left_ms: Some(40_000),
            increment_ms: Some(500),
            ..SearchLimits::default()
        };
        let config = TimeConfig {
            move_overhead_ms: 100,
            ..TimeConfig::default()
        };
        let limit = TimeControl::from_limits(&limits).time_limit(&config);
        assert_eq!(limit, Some(Duration::from_millis(1400)));
    }

    #[test]
    fn clock_budget_has_a_floor() {
        let limits = SearchLimits {
            time_left_ms: Some(100),
            ..SearchLimits::default()
        };
        let limit = TimeControl::from_limits(&limits).time_limit(&TimeConfig::default());
        assert_eq!(limit, Some(Duration::from_millis(10)));
    }

    #[test]
    fn no_limits_uses_default() {
        let control = TimeControl::from_limits(&SearchLimits::default());
        assert_eq!(control, TimeControl::Default);
        assert_eq!(
            control.time_limit(&TimeConfig::default()),
            Some(Duration::from_millis(7000))
        );
        assert_eq!(TimeControl::from_limits(&SearchLimits::depth(0)), TimeControl::Depth(1));
    }
}
