//! Legal move generation.
//!
//! Moves are produced fully legal in one pass with the "super-piece"
//! technique: rays cast from the enemy sliders are intersected with rays
//! cast outward from our own king. Each of the four axes yields an
//! in-between mask that holds either the squares blocking a check or the
//! single piece pinned on that axis. A piece pinned on one axis may only
//! travel along that same axis, and while in check every non-king move must
//! land on a checker or a blocking square.
//!
//! Destinations are collected per direction (eight rays plus eight knight
//! jumps) and decoded afterwards by walking back from each target to the
//! piece that reaches it.

use super::attacks::{
    king_attacks, knight_attacks, knight_attacks_set, pawn_attacks_set, bishop_attacks,
    rook_attacks, ray_index, EAST, KNIGHT_DIRECTIONS, RAY_DIRECTIONS, WEST,
};
use super::types::{
    Bitboard, CastleSide, Color, Move, MoveList, Piece, Square, PROMOTION_PIECES,
};
use super::Board;

impl Board {
    /// Every legal move for the side to move.
    #[must_use]
    pub fn generate_moves(&self) -> MoveList {
        self.generate(false)
    }

    /// Legal captures only (including en passant and capture-promotions).
    #[must_use]
    pub fn generate_captures(&self) -> MoveList {
        self.generate(true)
    }

    fn generate(&self, captures_only: bool) -> MoveList {
        let us = self.side_to_move;
        let them = us.opponent();
        let own = self.occupied_by(us);
        let enemy = self.occupied_by(them);
        let taken = self.all_occupied;
        let empty = !taken;
        let king = self.pieces_of(us, Piece::King);
        let king_sq = self.king_square(us);

        let enemy_queens = self.pieces_of(them, Piece::Queen);
        let enemy_orth = self.pieces_of(them, Piece::Rook) | enemy_queens;
        let enemy_diag = self.pieces_of(them, Piece::Bishop) | enemy_queens;
        let enemy_knights = self.pieces_of(them, Piece::Knight);
        let enemy_pawns = self.pieces_of(them, Piece::Pawn);

        // Enemy rays pass through our king so it cannot hide behind itself.
        let empty_without_king = empty ^ king;
        let mut any_attacks = Bitboard::EMPTY;
        let mut in_between = [Bitboard::EMPTY; 4];
        let mut super_attacks = [Bitboard::EMPTY; 2];
        for (i, &dir) in RAY_DIRECTIONS.iter().enumerate() {
            let sliders = if i < 4 { enemy_orth } else { enemy_diag };
            let attacks = sliders.ray_attacks(empty_without_king, dir);
            any_attacks |= attacks;
            let king_ray = king.ray_attacks(empty, -dir);
            super_attacks[i / 4] |= king_ray;
            in_between[i / 2] |= attacks & king_ray;
        }
        any_attacks |= knight_attacks_set(enemy_knights);
        any_attacks |= pawn_attacks_set(enemy_pawns, them);
        any_attacks |= king_attacks(self.king_square(them));

        let all_in_between = in_between[0] | in_between[1] | in_between[2] | in_between[3];
        let blocks = all_in_between & empty;

        let checkers = (super_attacks[0] & enemy_orth)
            | (super_attacks[1] & enemy_diag)
            | (knight_attacks(king_sq) & enemy_knights)
            | (pawn_attacks_set(king, us) & enemy_pawns);

        let in_check = !(any_attacks & king).is_empty();
        let check_to = if in_check {
            checkers | blocks
        } else {
            Bitboard::ALL
        };
        let not_double_check = if checkers.has_many() {
            Bitboard::EMPTY
        } else {
            Bitboard::ALL
        };
        let capture_mask = if captures_only { enemy } else { Bitboard::ALL };
        let target_mask = !own & check_to & not_double_check & capture_mask;

        let mut move_targets = [Bitboard::EMPTY; 16];

        // Sliders: a piece pinned on another axis cannot move along this one.
        let queens = self.pieces_of(us, Piece::Queen);
        let own_orth = self.pieces_of(us, Piece::Rook) | queens;
        let own_diag = self.pieces_of(us, Piece::Bishop) | queens;
        for axis in 0..4 {
            let pieces = if axis < 2 { own_orth } else { own_diag };
            let sliders = pieces & !(all_in_between ^ in_between[axis]);
            for i in [axis * 2, axis * 2 + 1] {
                move_targets[i] |= sliders.ray_attacks(empty, RAY_DIRECTIONS[i]) & target_mask;
            }
        }

        // Knights: any pin freezes them.
        let knights = self.pieces_of(us, Piece::Knight) & !all_in_between;
        for (j, &dir) in KNIGHT_DIRECTIONS.iter().enumerate() {
            move_targets[8 + j] |= knights.shift_two(dir) & target_mask;
        }

        // Pawns
        let pawns = self.pieces_of(us, Piece::Pawn);
        let push = us.pawn_push();
        for side in [WEST, EAST] {
            let dir = push + side;
            let idx = ray_index(dir);
            let free = pawns & !(all_in_between ^ in_between[idx / 2]);
            move_targets[idx] |= free.shift_one(dir) & enemy & target_mask;
        }

        let push_idx = ray_index(push);
        let pushers = pawns & !(all_in_between ^ in_between[push_idx / 2]);
        let single = pushers.shift_one(push) & empty;
        let double_rank = match us {
            Color::White => Bitboard::RANK_4,
            Color::Black => Bitboard::RANK_5,
        };
        move_targets[push_idx] |= single & target_mask;
        move_targets[push_idx] |= single.shift_one(push) & empty & double_rank & target_mask;

        if let Some(ep) = self.en_passant_target {
            let captured_sq = ep.offset(-push);
            let captured = Bitboard::from_square(captured_sq);
            // Capturing is only allowed if removing that pawn answers any
            // check (the double push itself may be the checker).
            if enemy_pawns.contains(captured_sq) && !(captured & target_mask).is_empty() {
                // Both pawns leave the rank, which can expose a horizontal pin.
                let empty_ep = empty | captured;
                let mut in_between_hor = Bitboard::EMPTY;
                for dir in [WEST, EAST] {
                    in_between_hor |=
                        enemy_orth.ray_attacks(empty_ep, dir) & king.ray_attacks(empty_ep, -dir);
                }
                let ep_bit = Bitboard::from_square(ep);
                for side in [WEST, EAST] {
                    let dir = push + side;
                    let idx = ray_index(dir);
                    let free = pawns & !in_between_hor & !(all_in_between ^ in_between[idx / 2]);
                    move_targets[idx] |= free.shift_one(dir) & ep_bit;
                }
            }
        }

        // King
        let king_targets = !(own | any_attacks) & capture_mask;
        for (i, &dir) in RAY_DIRECTIONS.iter().enumerate() {
            move_targets[i] |= king.shift_one(dir) & king_targets;
        }

        if !in_check && king_sq.file() == 4 && king_sq.rank() == us.back_rank() {
            let safe = !(taken | any_attacks);
            let own_rooks = self.pieces_of(us, Piece::Rook);
            let kingside = CastleSide::new(us, true);
            if self.castling_rights.has(kingside) && own_rooks.contains(kingside.rook_square()) {
                let step = king.shift_one(EAST) & safe;
                move_targets[0] |= step.shift_one(EAST) & safe & capture_mask;
            }
            let queenside = CastleSide::new(us, false);
            if self.castling_rights.has(queenside) && own_rooks.contains(queenside.rook_square()) {
                let step = king.shift_one(WEST) & safe;
                let b_file_clear = step.shift_two(2 * WEST) & empty;
                move_targets[1] |= b_file_clear.shift_one(EAST) & safe & capture_mask;
            }
        }

        let mut moves = MoveList::new();
        for (i, &dir) in RAY_DIRECTIONS.iter().enumerate() {
            for to in move_targets[i] {
                let mut from = to.offset(-dir);
                while self.mailbox[from.index()].is_none() {
                    from = from.offset(-dir);
                }
                self.push_move(&mut moves, from, to);
            }
        }
        for (j, &dir) in KNIGHT_DIRECTIONS.iter().enumerate() {
            for to in move_targets[8 + j] {
                self.push_move(&mut moves, to.offset(-dir), to);
            }
        }
        moves
    }

    fn push_move(&self, moves: &mut MoveList, from: Square, to: Square) {
        let Some((_, piece)) = self.mailbox[from.index()] else {
            debug_assert!(false, "no piece on {from} for move to {to}");
            return;
        };
        let mut mv = Move::quiet(from, to, piece);
        mv.captured = self.mailbox[to.index()].map(|(_, p)| p);

        match piece {
            Piece::Pawn => {
                if self.en_passant_target == Some(to) && from.file() != to.file() {
                    mv.en_passant = true;
                    mv.captured = Some(Piece::Pawn);
                }
                if to.rank() == 0 || to.rank() == 7 {
                    for promotion in PROMOTION_PIECES {
                        moves.push(Move {
                            promotion: Some(promotion),
                            ..mv
                        });
                    }
                    return;
                }
            }
            Piece::King => mv.castling = from.0.abs_diff(to.0) == 2,
            _ => {}
        }
        moves.push(mv);
    }

    /// True if any piece of `by` attacks `sq` in the current position.
    #[must_use]
    pub fn is_square_attacked(&self, sq: Square, by: Color) -> bool {
        let target = Bitboard::from_square(sq);
        let empty = !self.all_occupied;
        let queens = self.pieces_of(by, Piece::Queen);
        let orth = self.pieces_of(by, Piece::Rook) | queens;
        let diag = self.pieces_of(by, Piece::Bishop) | queens;

        !(rook_attacks(target, empty) & orth).is_empty()
            || !(bishop_attacks(target, empty) & diag).is_empty()
            || !(knight_attacks(sq) & self.pieces_of(by, Piece::Knight)).is_empty()
            || !(pawn_attacks_set(target, by.opponent()) & self.pieces_of(by, Piece::Pawn))
                .is_empty()
            || !(king_attacks(sq) & self.pieces_of(by, Piece::King)).is_empty()
    }

    /// True if `color`'s king is attacked.
    #[must_use]
    pub fn is_king_attacked(&self, color: Color) -> bool {
        self.is_square_attacked(self.king_square(color), color.opponent())
    }

    /// True if the side to move is in check.
    #[must_use]
    pub fn is_in_check(&self) -> bool {
        self.is_king_attacked(self.side_to_move)
    }
}
