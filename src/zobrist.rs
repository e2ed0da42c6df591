//! Zobrist hashing for chess positions.
//!
//! The keys are generated once from a fixed seed and shared read-only for the
//! life of the process. `ZobristHash` is the running XOR that `Board` updates
//! in lock-step with every mutation.

use once_cell::sync::Lazy;
use rand::prelude::*;

use crate::board::{CastleSide, Color, Piece, Square};

const ZOBRIST_SEED: u64 = 787_659;

pub(crate) struct ZobristKeys {
    // piece_keys[color][piece][square]
    pub(crate) piece_keys: [[[u64; 64]; 6]; 2],
    pub(crate) black_to_move_key: u64,
    // indexed by CastleSide (K, Q, k, q)
    pub(crate) castling_keys: [u64; 4],
    // only the file of the en passant target matters
    pub(crate) en_passant_keys: [u64; 8],
}

impl ZobristKeys {
    fn new(seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut piece_keys = [[[0; 64]; 6]; 2];
        let mut castling_keys = [0; 4];
        let mut en_passant_keys = [0; 8];

        for color in &mut piece_keys {
            for piece in color.iter_mut() {
                for key in piece.iter_mut() {
                    *key = rng.gen();
                }
            }
        }

        let black_to_move_key = rng.gen();

        for key in &mut castling_keys {
            *key = rng.gen();
        }

        for key in &mut en_passant_keys {
            *key = rng.gen();
        }

        ZobristKeys {
            piece_keys,
            black_to_move_key,
            castling_keys,
            en_passant_keys,
        }
    }
}

pub(crate) static ZOBRIST: Lazy<ZobristKeys> = Lazy::new(|| ZobristKeys::new(ZOBRIST_SEED));

/// Incrementally maintained position hash.
///
/// Every method is an XOR toggle, so "removing" a feature is the same call as
/// adding it.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct ZobristHash(u64);

impl ZobristHash {
    #[inline]
    #[must_use]
    pub const fn key(self) -> u64 {
        self.0
    }

    #[inline]
    pub fn set(&mut self, key: u64) {
        self.0 = key;
    }

    #[inline]
    pub fn change_piece(&mut self, color: Color, piece: Piece, sq: Square) {
        self.0 ^= ZOBRIST.piece_keys[color.index()][piece.index()][sq.index()];
    }

    #[inline]
    pub fn move_piece(&mut self, color: Color, piece: Piece, from: Square, to: Square) {
        self.change_piece(color, piece, from);
        self.change_piece(color, piece, to);
    }

    #[inline]
    pub fn change_turn(&mut self) {
        self.0 ^= ZOBRIST.black_to_move_key;
    }

    #[inline]
    pub fn change_castling(&mut self, side: CastleSide) {
        self.0 ^= ZOBRIST.castling_keys[side.index()];
    }

    #[inline]
    pub fn change_en_passant(&mut self, target: Square) {
        self.0 ^= ZOBRIST.en_passant_keys[target.file() as usize];
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toggles_are_self_inverse() {
        let mut hash = ZobristHash::default();
        let e4: Square = "e4".parse().unwrap();
        hash.change_piece(Color::White, Piece::Pawn, e4);
        hash.change_turn();
        hash.change_castling(CastleSide::BlackQueen);
        hash.change_en_passant(e4);
        assert_ne!(hash.key(), 0);
        hash.change_en_passant(e4);
        hash.change_castling(CastleSide::BlackQueen);
        hash.change_turn();
        hash.change_piece(Color::White, Piece::Pawn, e4);
        assert_eq!(hash.key(), 0);
    }

    #[test]
    fn move_piece_matches_two_changes() {
        let from: Square = "g1".parse().unwrap();
        let to: Square = "f3".parse().unwrap();
        let mut a = ZobristHash::default();
        a.move_piece(Color::White, Piece::Knight, from, to);
        let mut b = ZobristHash::default();
        b.change_piece(Color::White, Piece::Knight, to);
        b.change_piece(Color::White, Piece::Knight, from);
        assert_eq!(a, b);
    }

    #[test]
    fn keys_are_reproducible_and_distinct() {
        let first = ZobristKeys::new(ZOBRIST_SEED);
        let second = ZobristKeys::new(ZOBRIST_SEED);
        assert_eq!(first.black_to_move_key, second.black_to_move_key);
        assert_eq!(first.piece_keys[1][5][63], second.piece_keys[1][5][63]);
        assert_ne!(first.castling_keys[0], first.castling_keys[1]);
    }
}
