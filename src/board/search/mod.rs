//! Search module implementing alpha-beta with iterative deepening.
//!
//! Features:
//! - Iterative deepening under a depth limit and/or a wall-clock deadline
//! - Negamax alpha-beta with null move pruning
//! - Quiescence search with stand-pat
//! - Move ordering (hash move, MVV-LVA, promotions, pawn-attacked squares)
//! - Transposition table for move ordering and cutoffs
//!
//! Evaluation and move ordering are supplied through the `Evaluator` trait.

pub mod constants;
pub mod eval;
mod log;
pub mod move_order;
mod negamax;
mod params;
pub mod score;

use std::time::{Duration, Instant};

use crate::tt::TranspositionTable;

use super::{Board, Move};
pub use eval::{Evaluator, MaterialEvaluator};
pub use self::log::{NullReporter, SearchInfo, SearchReporter};
pub use negamax::SearchContext;
pub use params::SearchParams;

/// Outcome of one search request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchResult {
    /// Legal move to play; `None` only when the side to move has no moves
    pub best_move: Option<Move>,
    /// Root-relative score of the last completed depth (0 on fallback)
    pub score: i32,
    /// Last completed depth (0 when no iteration finished)
    pub depth: u32,
    pub nodes: u64,
    pub pv: Vec<Move>,
}

/// Search `board` to at most `max_depth` plies, stopping early once
/// `time_limit` has elapsed.
///
/// The board is restored before returning. With no time limit the result is
/// a pure function of the position, the depth and the table contents.
pub fn search(
    board: &mut Board,
    tt: &mut TranspositionTable,
    evaluator: &dyn Evaluator,
    params: &SearchParams,
    max_depth: u32,
    time_limit: Option<Duration>,
    reporter: &mut dyn SearchReporter,
) -> SearchResult {
    let deadline = time_limit.map(|limit| Instant::now() + limit);
    let depth = max_depth.min(params.max_depth);
    SearchContext::new(board, tt, evaluator, params, deadline).iterative_deepening(depth, reporter)
}
