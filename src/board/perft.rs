use super::types::Move;
use super::Board;

impl Board {
    /// Count leaf nodes of the legal move tree to `depth`.
    pub fn perft(&mut self, depth: usize) -> u64 {
        if depth == 0 {
            return 1;
        }

        let moves = self.generate_moves();
        if depth == 1 {
            return moves.len() as u64;
        }

        let mut nodes = 0;
        for mv in moves {
            self.make_move(mv);
            nodes += self.perft(depth - 1);
            self.unmake_move(mv);
        }
        nodes
    }

    /// Per-root-move leaf counts, in generation order.
    pub fn perft_divide(&mut self, depth: usize) -> Vec<(Move, u64)> {
        if depth == 0 {
            return Vec::new();
        }
        let moves = self.generate_moves();
        let mut counts = Vec::with_capacity(moves.len());
        for mv in moves {
            self.make_move(mv);
            counts.push((mv, self.perft(depth - 1)));
            self.unmake_move(mv);
        }
        counts
    }
}
