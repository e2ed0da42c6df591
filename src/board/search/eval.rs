//! Static evaluation.
//!
//! The search treats evaluation as a plug-in: anything implementing
//! `Evaluator` can score leaves and order moves. `MaterialEvaluator` is the
//! built-in default: material, piece-square tables blended by game phase, a
//! bishop-pair bonus and an endgame "mop-up" term that drives the winning
//! king toward the losing one.

use super::move_order;
use crate::board::{Board, Color, MoveList, Piece, Square};
use crate::tt::TtMove;

pub trait Evaluator {
    /// Static score in centipawns from the side to move's perspective.
    fn evaluate(&self, board: &Board) -> i32;

    /// Reorder `moves` best first. `hash_move` is the transposition table's
    /// remembered move for this position, if any.
    fn order_moves(&self, board: &Board, moves: &mut MoveList, hash_move: Option<TtMove>) {
        move_order::order_moves(board, moves, hash_move);
    }
}

const BISHOP_PAIR_BONUS: i32 = 20;

/// Non-king material at which the endgame weight reaches zero
const OPENING_MATERIAL: i32 = 3200;

// Tables are laid out rank 8 first, as seen from White.
#[rustfmt::skip]
const PAWN_TABLE: [i32; 64] = [
     0,  0,  0,  0,  0,  0,  0,  0,
    50, 50, 50, 50, 50, 50, 50, 50,
    10, 10, 20, 30, 30, 20, 10, 10,
     5,  5, 10, 25, 25, 10,  5,  5,
     0,  0,  0, 20, 20,  0,  0,  0,
     5, -5,-10,  0,  0,-10, -5,  5,
     5, 10, 10,-20,-20, 10, 10,  5,
     0,  0,  0,  0,  0,  0,  0,  0,
];

#[rustfmt::skip]
const KNIGHT_TABLE: [i32; 64] = [
    -50,-40,-30,-30,-30,-30,-40,-50,
    -40,-20,  0,  0,  0,  0,-20,-40,
    -30,  0, 10, 15, 15, 10,  0,-30,
    -30,  5, 15, 20, 20, 15,  5,-30,
    -30,  0, 15, 20, 20, 15,  0,-30,
    -30,  5, 10, 15, 15, 10,  5,-30,
    -40,-20,  0,  5,  5,  0,-20,-40,
    -50,-40,-30,-30,-30,-30,-40,-50,
];

#[rustfmt::skip]
const BISHOP_TABLE: [i32; 64] = [
    -20,-10,-10,-10,-10,-10,-10,-20,
    -10,  0,  0,  0,  0,  0,  0,-10,
    -10,  0,  5, 10, 10,  5,  0,-10,
    -10,  5,  5, 10, 10,  5,  5,-10,
    -10,  0, 10, 10, 10, 10,  0,-10,
    -10, 10, 10, 10, 10, 10, 10,-10,
    -10,  5,  0,  0,  0,  0,  5,-10,
    -20,-10,-10,-10,-10,-10,-10,-20,
];

#[rustfmt::skip]
const ROOK_TABLE: [i32; 64] = [
     0,  0,  0,  0,  0,  0,  0,  0,
     5, 10, 10, 10, 10, 10, 10,  5,
    -5,  0,  0,  0,  0,  0,  0, -5,
    -5,  0,  0,  0,  0,  0,  0, -5,
    -5,  0,  0,  0,  0,  0,  0, -5,
    -5,  0,  0,  0,  0,  0,  0, -5,
    -5,  0,  0,  0,  0,  0,  0, -5,
     0,  0,  0,  5,  5,  0,  0,  0,
];

#[rustfmt::skip]
const QUEEN_TABLE: [i32; 64] = [
    -20,-10,-10, -5, -5,-10,-10,-20,
    -10,  0,  0,  0,  0,  0,  0,-10,
    -10,  0,  5,  5,  5,  5,  0,-10,
     -5,  0,  5,  5,  5,  5,  0, -5,
      0,  0,  5,  5,  5,  5,  0, -5,
    -10,  5,  5,  5,  5,  5,  0,-10,
    -10,  0,  5,  0,  0,  0,  0,-10,
    -20,-10,-10, -5, -5,-10,-10,-20,
];

#[rustfmt::skip]
const KING_MIDDLEGAME_TABLE: [i32; 64] = [
    -30,-40,-40,-50,-50,-40,-40,-30,
    -30,-40,-40,-50,-50,-40,-40,-30,
    -30,-40,-40,-50,-50,-40,-40,-30,
    -30,-40,-40,-50,-50,-40,-40,-30,
    -20,-30,-30,-40,-40,-30,-30,-20,
    -10,-20,-20,-20,-20,-20,-20,-10,
     20, 20,  0,  0,  0,  0, 20, 20,
     20, 30, 10,  0,  0, 10, 30, 20,
];

#[rustfmt::skip]
const KING_ENDGAME_TABLE: [i32; 64] = [
    -50,-40,-30,-20,-20,-30,-40,-50,
    -30,-20,-10,  0,  0,-10,-20,-30,
    -30,-10, 20, 30, 30, 20,-10,-30,
    -30,-10, 30, 40, 40, 30,-10,-30,
    -30,-10, 30, 40, 40, 30,-10,-30,
    -30,-10, 20, 30, 30, 20,-10,-30,
    -30,-30,  0,  0,  0,  0,-30,-30,
    -50,-30,-30,-30,-30,-30,-30,-50,
];

#[inline]
fn table_index(color: Color, sq: Square) -> usize {
    match color {
        Color::White => usize::from(7 - sq.rank()) * 8 + usize::from(sq.file()),
        Color::Black => sq.index(),
    }
}

/// Default evaluator: material, piece-square tables, bishop pair and mop-up.
#[derive(Debug, Clone, Copy, Default)]
pub struct MaterialEvaluator;

impl MaterialEvaluator {
    fn material(board: &Board, color: Color) -> i32 {
        Piece::ALL
            .iter()
            .map(|&p| board.piece_count(color, p) as i32 * p.value())
            .sum()
    }

    /// Piece-square score for `color`; `endgame` in 0..=256.
    fn piece_squares(board: &Board, color: Color, endgame: i32) -> i32 {
        let mut score = 0;
        for piece in Piece::ALL {
            for &sq in board.piece_list(color, piece).as_slice() {
                let idx = table_index(color, sq);
                score += match piece {
                    Piece::Pawn => PAWN_TABLE[idx],
                    Piece::Knight => KNIGHT_TABLE[idx],
                    Piece::Bishop => BISHOP_TABLE[idx],
                    Piece::Rook => ROOK_TABLE[idx],
                    Piece::Queen => QUEEN_TABLE[idx],
                    Piece::King => {
                        (KING_MIDDLEGAME_TABLE[idx] * (256 - endgame)
                            + KING_ENDGAME_TABLE[idx] * endgame)
                            / 256
                    }
                };
            }
        }
        score
    }

    /// Reward the side ahead in material for bringing the kings together
    /// late in the game.
    fn mop_up(board: &Board, material_diff: i32, endgame: i32) -> i32 {
        let white = board.king_square(Color::White);
        let black = board.king_square(Color::Black);
        let distance = i32::from(white.file().abs_diff(black.file()))
            + i32::from(white.rank().abs_diff(black.rank()));
        let closeness = 14 - distance;
        let lead = material_diff.clamp(-200, 200);
        closeness * 8 * endgame * lead / (256 * 200)
    }
}

impl Evaluator for MaterialEvaluator {
    fn evaluate(&self, board: &Board) -> i32 {
        let us = board.side_to_move();
        let them = us.opponent();

        let ours = Self::material(board, us);
        let theirs = Self::material(board, them);
        let total = ours + theirs;
        let endgame = 256 - (total.min(OPENING_MATERIAL) * 256 / OPENING_MATERIAL);

        let material = ours - theirs;
        let squares = Self::piece_squares(board, us, endgame) - Self::piece_squares(board, them, endgame);
        let bishop_pair = |color| {
            if board.piece_count(color, Piece::Bishop) >= 2 {
                BISHOP_PAIR_BONUS
            } else {
                0
            }
        };
        let pair = bishop_pair(us) - bishop_pair(them);

        material + squares + pair + Self::mop_up(board, material, endgame)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn start_position_is_balanced() {
        let board = Board::new();
        assert_eq!(MaterialEvaluator.evaluate(&board), 0);
    }

    #[test]
    fn score_is_side_relative() {
        let white = Board::from_fen("4k3/8/8/8/8/8/8/QK6 w - - 0 1");
        let black = Board::from_fen("4k3/8/8/8/8/8/8/QK6 b - - 0 1");
        let w = MaterialEvaluator.evaluate(&white);
        let b = MaterialEvaluator.evaluate(&black);
        assert!(w > 800);
        assert_eq!(w, -b);
    }

    #[test]
    fn mirrored_positions_score_equally() {
        let a = Board::from_fen("r3k3/pp6/8/8/8/8/6PP/3K2NR w - - 0 1");
        let b = Board::from_fen("3k2nr/6pp/8/8/8/8/PP6/R3K3 b - - 0 1");
        assert_eq!(
            MaterialEvaluator.evaluate(&a),
            MaterialEvaluator.evaluate(&b)
        );
    }

    #[test]
    fn bishop_pair_counts() {
        let pair = Board::from_fen("4k3/8/8/8/8/8/8/2B1KB2 w - - 0 1");
        let split = Board::from_fen("4k3/8/8/8/8/8/8/1NB1K3 w - - 0 1");
        let diff = MaterialEvaluator.evaluate(&pair) - MaterialEvaluator.evaluate(&split);
        assert!(diff >= BISHOP_PAIR_BONUS, "diff {diff}");
    }
}
