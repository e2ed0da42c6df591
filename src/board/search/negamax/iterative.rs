use super::super::constants::{HIGHEST_SCORE, LOWEST_SCORE, MATE_SCORE};
use super::super::log::{SearchInfo, SearchReporter};
use super::super::score::{format_score, is_mate};
use super::super::SearchResult;
use super::SearchContext;
use crate::board::Move;

impl SearchContext<'_> {
    /// Iterative deepening from depth 1 to `max_depth` or until the deadline.
    ///
    /// Only completed iterations update the result. The returned move is
    /// always legal in the root position; if no iteration finished, or the
    /// remembered move is not in the legal list, the top of a freshly ordered
    /// legal list is used instead.
    pub fn iterative_deepening(
        &mut self,
        max_depth: u32,
        reporter: &mut dyn SearchReporter,
    ) -> SearchResult {
        let mut completed: Option<(Move, i32, u32)> = None;
        let mut pv = Vec::new();

        for depth in 1..=max_depth.max(1) {
            self.root_best = None;
            self.alphabeta(depth, LOWEST_SCORE, HIGHEST_SCORE, 0, false);
            if self.aborted {
                break;
            }
            let Some((mv, score)) = self.root_best else {
                break;
            };
            completed = Some((mv, score, depth));
            pv = self.principal_variation(mv, depth as usize);

            let elapsed = self.start_time.elapsed();
            let time_ms = elapsed.as_millis() as u64;
            let nps = if time_ms > 0 {
                self.nodes * 1000 / time_ms
            } else {
                0
            };
            log::debug!(
                "depth {depth} score {} nodes {} best {mv}",
                format_score(score),
                self.nodes
            );
            reporter.report(&SearchInfo {
                depth,
                score,
                nodes: self.nodes,
                nps,
                hashfull: self.tt.hashfull(),
                time_ms,
                pv: pv.clone(),
            });

            // a mate proven within the searched depth cannot improve
            if is_mate(score) && (MATE_SCORE - score.abs()) as u32 <= depth {
                break;
            }
        }

        let legal = self.board.generate_moves();
        let chosen = completed.and_then(|(mv, _, _)| legal.find(mv.from, mv.to, mv.promotion));
        let (best_move, score, depth) = match (chosen, completed) {
            (Some(mv), Some((_, score, depth))) => (Some(mv), score, depth),
            _ => {
                let mut ordered = legal;
                self.evaluator.order_moves(self.board, &mut ordered, None);
                let fallback = ordered.first();
                if let Some(mv) = fallback {
                    log::debug!("no completed iteration, falling back to {mv}");
                }
                pv = fallback.into_iter().collect();
                (fallback, 0, 0)
            }
        };

        SearchResult {
            best_move,
            score,
            depth,
            nodes: self.nodes,
            pv,
        }
    }

    /// Walk exact table entries from the root, starting with `first`.
    ///
    /// Every stored move is checked against the legal list; the walk stops at
    /// `max_len` plies, at a missing or illegal entry, or on a repeated hash.
    fn principal_variation(&mut self, first: Move, max_len: usize) -> Vec<Move> {
        let mut pv = Vec::with_capacity(max_len);
        let mut seen = Vec::with_capacity(max_len);
        let mut next = Some(first);

        while let Some(mv) = next {
            if pv.len() >= max_len || seen.contains(&self.board.hash()) {
                break;
            }
            seen.push(self.board.hash());
            self.board.make_move(mv);
            pv.push(mv);
            let moves = self.board.generate_moves();
            next = self
                .tt
                .best_move(self.board.hash(), true)
                .and_then(|stored| stored.resolve(&moves));
        }

        for &mv in pv.iter().rev() {
            self.board.unmake_move(mv);
        }
        pv
    }
}

#[cfg(test)]
mod tests {
    use std::time::Instant;

    use super::*;
    use crate::board::search::eval::MaterialEvaluator;
    use crate::board::search::log::NullReporter;
    use crate::board::search::params::SearchParams;
    use crate::board::Board;
    use crate::tt::TranspositionTable;

    #[test]
    fn reports_each_completed_depth() {
        let mut board = Board::new();
        let mut tt = TranspositionTable::new(1);
        let params = SearchParams::default();
        let mut infos: Vec<SearchInfo> = Vec::new();
        let result = SearchContext::new(&mut board, &mut tt, &MaterialEvaluator, &params, None)
            .iterative_deepening(3, &mut infos);

        assert_eq!(infos.iter().map(|i| i.depth).collect::<Vec<_>>(), vec![1, 2, 3]);
        assert_eq!(result.depth, 3);
        let best = result.best_move.unwrap();
        assert_eq!(infos[2].pv.first(), Some(&best));
        assert!(infos[2].pv.len() <= 3);
        assert_eq!(board.to_fen(), crate::board::START_FEN);
    }

    #[test]
    fn stops_once_mate_is_proven() {
        let mut board = Board::from_fen("6k1/5ppp/8/8/8/8/8/4Q2K w - - 0 1");
        let mut tt = TranspositionTable::new(1);
        let params = SearchParams::default();
        let mut infos: Vec<SearchInfo> = Vec::new();
        let result = SearchContext::new(&mut board, &mut tt, &MaterialEvaluator, &params, None)
            .iterative_deepening(10, &mut infos);
        assert_eq!(result.depth, 1);
        assert_eq!(result.score, MATE_SCORE - 1);
        assert_eq!(result.best_move.unwrap().to_string(), "e1e8");
    }

    #[test]
    fn falls_back_when_nothing_completes() {
        let mut board = Board::new();
        let mut tt = TranspositionTable::new(1);
        let params = SearchParams::default();
        let result = SearchContext::new(
            &mut board,
            &mut tt,
            &MaterialEvaluator,
            &params,
            Some(Instant::now()),
        )
        .iterative_deepening(5, &mut NullReporter);
        assert_eq!(result.depth, 0);
        let mv = result.best_move.unwrap();
        assert!(board.generate_moves().contains(&mv));
    }
}
