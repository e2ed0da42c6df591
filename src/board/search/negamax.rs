//! Core search implementation.
//!
//! This module implements:
//! - Iterative deepening, committing only completed depths
//! - Fail-hard negamax alpha-beta with transposition table cutoffs
//! - Null move pruning
//! - Capture-only quiescence search with stand-pat
//!
//! The deadline is checked at the top of every node. Once it trips, the
//! `aborted` flag unwinds the whole tree: every frame unmakes its move and
//! returns without storing anything.

mod iterative;
mod quiescence;

use std::time::Instant;

use super::constants::DRAW_SCORE;
use super::eval::Evaluator;
use super::params::SearchParams;
use super::score::mated_in;
use crate::board::{Board, Move};
use crate::tt::{BoundType, TranspositionTable};

/// Search context for a single search
pub struct SearchContext<'a> {
    pub board: &'a mut Board,
    pub tt: &'a mut TranspositionTable,
    pub evaluator: &'a dyn Evaluator,
    pub params: &'a SearchParams,
    pub start_time: Instant,
    /// Wall-clock deadline; `None` searches until the depth limit
    pub deadline: Option<Instant>,
    pub nodes: u64,
    aborted: bool,
    /// Best move and score found at the root during the current iteration
    root_best: Option<(Move, i32)>,
}

impl<'a> SearchContext<'a> {
    pub fn new(
        board: &'a mut Board,
        tt: &'a mut TranspositionTable,
        evaluator: &'a dyn Evaluator,
        params: &'a SearchParams,
        deadline: Option<Instant>,
    ) -> Self {
        SearchContext {
            board,
            tt,
            evaluator,
            params,
            start_time: Instant::now(),
            deadline,
            nodes: 0,
            aborted: false,
            root_best: None,
        }
    }

    #[inline]
    #[must_use]
    pub fn aborted(&self) -> bool {
        self.aborted
    }

    /// Trip the abort flag once the deadline has passed.
    #[inline]
    fn should_stop(&mut self) -> bool {
        if !self.aborted {
            if let Some(deadline) = self.deadline {
                self.aborted = Instant::now() >= deadline;
            }
        }
        self.aborted
    }

    fn is_draw(&self) -> bool {
        self.board.is_fifty_move_draw()
            || self.board.repetition_count() >= self.params.repetition_threshold
            || self.board.is_insufficient_material()
    }

    /// Fail-hard negamax. `in_null` marks a subtree below a null move, where
    /// no further null move is tried.
    pub fn alphabeta(&mut self, depth: u32, mut alpha: i32, beta: i32, ply: u32, in_null: bool) -> i32 {
        if self.should_stop() {
            return 0;
        }
        self.nodes += 1;

        if ply > 0 && self.is_draw() {
            return DRAW_SCORE;
        }

        let key = self.board.hash();
        if let Some(score) = self.tt.probe_score(key, depth, ply, alpha, beta) {
            if ply > 0 {
                return score;
            }
            // the root must hand back a move, so only a resolvable hit counts
            let stored = self.tt.best_move(key, true);
            if let Some(mv) = stored.and_then(|m| m.resolve(&self.board.generate_moves())) {
                self.root_best = Some((mv, score));
                return score;
            }
        }

        if depth == 0 {
            return self.quiesce(alpha, beta, ply);
        }

        let mut moves = self.board.generate_moves();
        let in_check = self.board.is_in_check();
        if moves.is_empty() {
            return if in_check { mated_in(ply) } else { DRAW_SCORE };
        }
        self.evaluator
            .order_moves(self.board, &mut moves, self.tt.best_move(key, false));

        if !in_check && !in_null && depth > self.params.null_min_depth {
            let reduced = depth.saturating_sub(self.params.null_reduction);
            self.board.make_move(Move::NULL);
            let score = -self.alphabeta(reduced, -beta, -beta + 1, ply + 1, true);
            self.board.unmake_move(Move::NULL);
            if self.aborted {
                return 0;
            }
            if score >= beta {
                return beta;
            }
        }

        let mut best_move = None;
        let mut bound = BoundType::UpperBound;
        for &mv in &moves {
            self.board.make_move(mv);
            let score = -self.alphabeta(depth - 1, -beta, -alpha, ply + 1, in_null);
            self.board.unmake_move(mv);
            if self.aborted {
                return 0;
            }

            if score >= beta {
                self.tt.store(key, depth, ply, beta, BoundType::LowerBound, Some(mv));
                return beta;
            }
            if score > alpha {
                alpha = score;
                best_move = Some(mv);
                bound = BoundType::Exact;
                if ply == 0 {
                    self.root_best = Some((mv, score));
                }
            }
        }

        self.tt.store(key, depth, ply, alpha, bound, best_move);
        alpha
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::search::constants::{HIGHEST_SCORE, LOWEST_SCORE, MATE_SCORE};
    use crate::board::search::eval::MaterialEvaluator;

    fn run(fen: &str, depth: u32) -> (i32, Option<(Move, i32)>) {
        let mut board = Board::from_fen(fen);
        let mut tt = TranspositionTable::new(1);
        let params = SearchParams::default();
        let mut ctx = SearchContext::new(&mut board, &mut tt, &MaterialEvaluator, &params, None);
        let score = ctx.alphabeta(depth, LOWEST_SCORE, HIGHEST_SCORE, 0, false);
        (score, ctx.root_best)
    }

    #[test]
    fn checkmated_side_scores_mate() {
        // fool's mate, white to move and mated
        let fen = "rnb1kbnr/pppp1ppp/8/4p3/6Pq/5P2/PPPPP2P/RNBQKBNR w KQkq - 1 3";
        let (score, best) = run(fen, 2);
        assert_eq!(score, mated_in(0));
        assert!(best.is_none());
    }

    #[test]
    fn stalemate_is_a_draw() {
        let (score, _) = run("7k/5Q2/6K1/8/8/8/8/8 b - - 0 1", 3);
        assert_eq!(score, DRAW_SCORE);
    }

    #[test]
    fn finds_mate_in_one() {
        let (score, best) = run("6k1/5ppp/8/8/8/8/8/4Q2K w - - 0 1", 2);
        assert_eq!(score, MATE_SCORE - 1);
        assert_eq!(best.map(|(m, _)| m.to_string()), Some("e1e8".to_string()));
    }

    #[test]
    fn expired_deadline_aborts_immediately() {
        let mut board = Board::new();
        let before = board.to_fen();
        let mut tt = TranspositionTable::new(1);
        let params = SearchParams::default();
        let mut ctx = SearchContext::new(
            &mut board,
            &mut tt,
            &MaterialEvaluator,
            &params,
            Some(Instant::now()),
        );
        ctx.alphabeta(4, LOWEST_SCORE, HIGHEST_SCORE, 0, false);
        assert!(ctx.aborted());
        assert!(ctx.root_best.is_none());
        assert_eq!(board.to_fen(), before);
    }
}
