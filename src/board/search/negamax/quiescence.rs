use super::super::constants::DRAW_SCORE;
use super::super::score::mated_in;
use super::SearchContext;

impl SearchContext<'_> {
    /// Capture-only search below the horizon, with the static evaluation
    /// as a stand-pat lower bound.
    pub fn quiesce(&mut self, mut alpha: i32, beta: i32, ply: u32) -> i32 {
        if self.should_stop() {
            return 0;
        }
        self.nodes += 1;

        if self.board.is_insufficient_material() {
            return DRAW_SCORE;
        }

        // A checkmate reached at the horizon is still a mate.
        if self.board.is_in_check() && self.board.generate_moves().is_empty() {
            return mated_in(ply);
        }

        let stand_pat = self.evaluator.evaluate(self.board);
        if stand_pat >= beta {
            return beta;
        }
        if stand_pat > alpha {
            alpha = stand_pat;
        }

        let mut captures = self.board.generate_captures();
        self.evaluator.order_moves(self.board, &mut captures, None);

        for &mv in &captures {
            self.board.make_move(mv);
            let score = -self.quiesce(-beta, -alpha, ply + 1);
            self.board.unmake_move(mv);
            if self.aborted {
                return 0;
            }

            if score >= beta {
                return beta;
            }
            if score > alpha {
                alpha = score;
            }
        }

        alpha
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::search::eval::{Evaluator, MaterialEvaluator};
    use crate::board::search::params::SearchParams;
    use crate::board::Board;
    use crate::tt::TranspositionTable;

    fn quiesce(fen: &str) -> (i32, i32) {
        let mut board = Board::from_fen(fen);
        let static_eval = MaterialEvaluator.evaluate(&board);
        let mut tt = TranspositionTable::new(1);
        let params = SearchParams::default();
        let mut ctx = SearchContext::new(&mut board, &mut tt, &MaterialEvaluator, &params, None);
        (ctx.quiesce(-100_000, 100_000, 0), static_eval)
    }

    #[test]
    fn wins_hanging_queen() {
        let (score, static_eval) = quiesce("4k3/8/8/3q4/4P3/8/8/4K3 w - - 0 1");
        assert!(score > static_eval + 800, "score {score}");
    }

    #[test]
    fn stands_pat_when_captures_lose() {
        // Qxd5 exd5 gives the queen for a pawn
        let (score, static_eval) = quiesce("4k3/8/4p3/3p4/8/8/8/3QK3 w - - 0 1");
        assert_eq!(score, static_eval);
    }

    #[test]
    fn mate_at_the_horizon() {
        let (score, _) = quiesce("4Q1k1/5ppp/8/8/8/8/8/7K b - - 0 1");
        assert_eq!(score, mated_in(0));
    }
}
