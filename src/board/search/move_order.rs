//! Move ordering heuristics.

use super::constants::TT_MOVE_SCORE;
use crate::board::attacks::pawn_attacks_set;
use crate::board::{Bitboard, Board, Move, MoveList, Piece};
use crate::tt::TtMove;

/// Multiplier on the victim value so any capture of a bigger piece sorts
/// ahead of captures with a cheaper attacker.
const VICTIM_WEIGHT: i32 = 11;

/// Heuristic ordering score for one move.
///
/// Captures score most-valuable-victim/least-valuable-attacker, promotions
/// add the promoted value, and landing on a square an enemy pawn attacks
/// costs the moving piece's value.
#[must_use]
pub fn score_move(mv: &Move, enemy_pawn_attacks: Bitboard) -> i32 {
    let mut score = 0;
    if let Some(captured) = mv.captured {
        score += VICTIM_WEIGHT * captured.value() - mv.piece.value();
    }
    if let Some(promotion) = mv.promotion {
        score += promotion.value();
    }
    if enemy_pawn_attacks.contains(mv.to) {
        score -= mv.piece.value();
    }
    score
}

/// Score every move and sort best first; the hash move always leads.
pub fn order_moves(board: &Board, moves: &mut MoveList, hash_move: Option<TtMove>) {
    let them = board.side_to_move().opponent();
    let enemy_pawn_attacks = pawn_attacks_set(board.pieces_of(them, Piece::Pawn), them);
    for mv in moves.iter_mut() {
        mv.score = match hash_move {
            Some(hm) if hm.matches(mv) => TT_MOVE_SCORE,
            _ => score_move(mv, enemy_pawn_attacks),
        };
    }
    moves.sort_by_score();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn captures_prefer_valuable_victims_and_cheap_attackers() {
        // white can take the queen with the pawn or the rook, or the knight with the rook
        let board = Board::from_fen("4k3/8/8/3q1n2/4P3/8/8/3RK3 w - - 0 1");
        let mut moves = board.generate_moves();
        order_moves(&board, &mut moves, None);
        let first = moves.first().unwrap();
        assert_eq!(first.to_string(), "e4d5");
        assert_eq!(moves[1].to_string(), "d1d5");
    }

    #[test]
    fn hash_move_goes_first() {
        let board = Board::new();
        let mut moves = board.generate_moves();
        let hm = TtMove {
            from: "b1".parse().unwrap(),
            to: "a3".parse().unwrap(),
            promotion: None,
        };
        order_moves(&board, &mut moves, Some(hm));
        assert_eq!(moves.first().unwrap().to_string(), "b1a3");
        assert_eq!(moves.first().unwrap().score, TT_MOVE_SCORE);
    }

    #[test]
    fn pawn_attacked_squares_are_penalized() {
        let board = Board::from_fen("4k3/8/8/2p5/8/8/8/1N2K3 w - - 0 1");
        let them = board.side_to_move().opponent();
        let attacks = pawn_attacks_set(board.pieces_of(them, Piece::Pawn), them);
        let into_pawn = board.parse_move("b1d2").unwrap();
        let attacked = Move::quiet("b1".parse().unwrap(), "b4".parse().unwrap(), Piece::Knight);
        assert_eq!(score_move(&into_pawn, attacks), 0);
        assert_eq!(score_move(&attacked, attacks), -Piece::Knight.value());
    }

    #[test]
    fn promotions_rank_by_piece() {
        let board = Board::from_fen("7k/P7/8/8/8/8/8/K7 w - - 0 1");
        let mut moves = board.generate_moves();
        order_moves(&board, &mut moves, None);
        assert_eq!(moves.first().unwrap().to_string(), "a7a8q");
    }
}
