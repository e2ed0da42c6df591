use super::state::UndoState;
use super::types::{CastleSide, Color, Move, Piece, Square};
use super::Board;

/// Rook relocation (from, to) for a castling king landing on `king_to`.
#[inline]
fn castling_rook_squares(king_to: Square) -> (Square, Square) {
    let base = king_to.rank() * 8;
    if king_to.file() == 6 {
        (Square(base + 7), Square(base + 5))
    } else {
        (Square(base), Square(base + 3))
    }
}

impl Board {
    /// Apply `mv`, which must be legal in the current position (or the null
    /// move). Every call must be paired with `unmake_move` in LIFO order.
    pub fn make_move(&mut self, mv: Move) {
        self.undo_stack.push(UndoState {
            castling_rights: self.castling_rights,
            en_passant_target: self.en_passant_target,
            halfmove_clock: self.halfmove_clock,
        });
        self.hash_history.push(self.hash.key());
        self.move_history.push(mv);

        let us = self.side_to_move;
        let them = us.opponent();

        if mv.is_null() {
            if let Some(ep) = self.en_passant_target.take() {
                self.hash.change_en_passant(ep);
            }
            self.halfmove_clock += 1;
            self.switch_side();
            return;
        }

        if let Some(captured) = mv.captured {
            if !mv.en_passant {
                self.remove_piece(them, captured, mv.to);
            }
        }

        self.relocate_piece(us, mv.piece, mv.from, mv.to);

        if mv.en_passant {
            self.remove_piece(them, Piece::Pawn, mv.to.offset(-us.pawn_push()));
        }

        if mv.castling {
            let (rook_from, rook_to) = castling_rook_squares(mv.to);
            self.relocate_piece(us, Piece::Rook, rook_from, rook_to);
        }

        if let Some(promotion) = mv.promotion {
            self.remove_piece(us, Piece::Pawn, mv.to);
            self.put_piece(us, promotion, mv.to);
        }

        self.update_castling_rights(mv, us);

        if let Some(ep) = self.en_passant_target.take() {
            self.hash.change_en_passant(ep);
        }
        if mv.piece == Piece::Pawn && mv.from.0.abs_diff(mv.to.0) == 16 {
            let target = mv.from.offset(us.pawn_push());
            self.en_passant_target = Some(target);
            self.hash.change_en_passant(target);
        }

        if mv.piece == Piece::Pawn || mv.is_capture() {
            self.halfmove_clock = 0;
        } else {
            self.halfmove_clock += 1;
        }

        self.switch_side();
    }

    /// Revert the most recent `make_move(mv)`.
    pub fn unmake_move(&mut self, mv: Move) {
        let Some(undo) = self.undo_stack.pop() else {
            debug_assert!(false, "unmake_move called with an empty undo stack");
            return;
        };
        let previous_hash = self.hash_history.pop();
        self.move_history.pop();

        self.switch_side_back();
        let us = self.side_to_move;
        let them = us.opponent();

        if let Some(ep) = self.en_passant_target {
            self.hash.change_en_passant(ep);
        }
        for side in CastleSide::ALL {
            if self.castling_rights.has(side) != undo.castling_rights.has(side) {
                self.hash.change_castling(side);
            }
        }
        if let Some(ep) = undo.en_passant_target {
            self.hash.change_en_passant(ep);
        }
        self.castling_rights = undo.castling_rights;
        self.en_passant_target = undo.en_passant_target;
        self.halfmove_clock = undo.halfmove_clock;

        if !mv.is_null() {
            if let Some(promotion) = mv.promotion {
                self.remove_piece(us, promotion, mv.to);
                self.put_piece(us, Piece::Pawn, mv.to);
            }

            self.relocate_piece(us, mv.piece, mv.to, mv.from);

            if let Some(captured) = mv.captured {
                let square = if mv.en_passant {
                    mv.to.offset(-us.pawn_push())
                } else {
                    mv.to
                };
                self.put_piece(them, captured, square);
            }

            if mv.castling {
                let (rook_from, rook_to) = castling_rook_squares(mv.to);
                self.relocate_piece(us, Piece::Rook, rook_to, rook_from);
            }
        }

        if let Some(previous) = previous_hash {
            debug_assert_eq!(self.hash.key(), previous, "incremental hash drifted");
            self.hash.set(previous);
        }

        #[cfg(debug_assertions)]
        self.assert_consistent();
    }

    fn update_castling_rights(&mut self, mv: Move, us: Color) {
        if self.castling_rights.is_empty() {
            return;
        }
        for side in CastleSide::ALL {
            if !self.castling_rights.has(side) {
                continue;
            }
            let rook_square = side.rook_square();
            let own_side = side == CastleSide::new(us, true) || side == CastleSide::new(us, false);
            let king_moved = mv.piece == Piece::King && own_side;
            if king_moved || mv.from == rook_square || mv.to == rook_square {
                self.castling_rights.remove(side);
                self.hash.change_castling(side);
            }
        }
    }

    fn switch_side(&mut self) {
        if self.side_to_move == Color::Black {
            self.fullmove_number += 1;
        }
        self.side_to_move = self.side_to_move.opponent();
        self.hash.change_turn();
    }

    fn switch_side_back(&mut self) {
        self.side_to_move = self.side_to_move.opponent();
        if self.side_to_move == Color::Black {
            self.fullmove_number -= 1;
        }
        self.hash.change_turn();
    }
}
