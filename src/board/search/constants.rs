//! Search constants.

/// Score of a drawn position
pub const DRAW_SCORE: i32 = 0;

/// Score of delivering mate at the root; mate at ply `n` scores `MATE_SCORE - n`
pub const MATE_SCORE: i32 = 100_000;

/// Scores within this distance of `MATE_SCORE` are mate scores
pub const MATE_WINDOW: i32 = 1000;

/// Initial alpha at the root, below any reachable score
pub const LOWEST_SCORE: i32 = -1_000_000;

/// Initial beta at the root, above any reachable score
pub const HIGHEST_SCORE: i32 = 1_000_000;

/// Ordering bonus for the transposition table's remembered move
pub const TT_MOVE_SCORE: i32 = 10_000;

/// Remaining depth above which null-move pruning is tried
pub const NULL_MOVE_MIN_DEPTH: u32 = 3;

/// Depth removed from the null-move verification search
pub const NULL_MOVE_REDUCTION: u32 = 4;

/// Hard cap on iterative deepening when no depth limit is set
pub const MAX_SEARCH_DEPTH: u32 = 64;
