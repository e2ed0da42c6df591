//! Direction offsets and attack sets for every piece kind.
//!
//! Leaper attacks for single squares come from precomputed tables; set-wise
//! attacks (many pieces at once) are built from `Bitboard::shift_one`,
//! `shift_two` and `ray_attacks`.

use once_cell::sync::Lazy;

use super::types::{Bitboard, Color, Square};

pub(crate) const EAST: i8 = 1;
pub(crate) const WEST: i8 = -1;
pub(crate) const NORTH: i8 = 8;
pub(crate) const SOUTH: i8 = -8;
pub(crate) const NORTH_EAST: i8 = 9;
pub(crate) const SOUTH_WEST: i8 = -9;
pub(crate) const SOUTH_EAST: i8 = -7;
pub(crate) const NORTH_WEST: i8 = 7;

/// Ray directions paired by axis: (E, W) horizontal, (N, S) vertical,
/// (NE, SW) diagonal, (SE, NW) anti-diagonal. Index `i / 2` is the axis,
/// `i < 4` are the rook directions.
pub(crate) const RAY_DIRECTIONS: [i8; 8] = [
    EAST, WEST, NORTH, SOUTH, NORTH_EAST, SOUTH_WEST, SOUTH_EAST, NORTH_WEST,
];

pub(crate) const KNIGHT_DIRECTIONS: [i8; 8] = [17, -17, 15, -15, 10, -10, 6, -6];

/// Index of `dir` in `RAY_DIRECTIONS`.
#[inline]
pub(crate) const fn ray_index(dir: i8) -> usize {
    match dir {
        EAST => 0,
        WEST => 1,
        NORTH => 2,
        SOUTH => 3,
        NORTH_EAST => 4,
        SOUTH_WEST => 5,
        SOUTH_EAST => 6,
        _ => 7,
    }
}

pub(crate) static KNIGHT_ATTACKS: Lazy<[Bitboard; 64]> = Lazy::new(|| {
    let mut attacks = [Bitboard::EMPTY; 64];
    for (sq, slot) in attacks.iter_mut().enumerate() {
        *slot = knight_attacks_set(Bitboard(1 << sq));
    }
    attacks
});

pub(crate) static KING_ATTACKS: Lazy<[Bitboard; 64]> = Lazy::new(|| {
    let mut attacks = [Bitboard::EMPTY; 64];
    for (sq, slot) in attacks.iter_mut().enumerate() {
        *slot = king_attacks_set(Bitboard(1 << sq));
    }
    attacks
});

#[inline]
pub(crate) fn knight_attacks(sq: Square) -> Bitboard {
    KNIGHT_ATTACKS[sq.index()]
}

#[inline]
pub(crate) fn king_attacks(sq: Square) -> Bitboard {
    KING_ATTACKS[sq.index()]
}

pub(crate) fn knight_attacks_set(knights: Bitboard) -> Bitboard {
    KNIGHT_DIRECTIONS
        .iter()
        .fold(Bitboard::EMPTY, |acc, &dir| acc | knights.shift_two(dir))
}

pub(crate) fn king_attacks_set(kings: Bitboard) -> Bitboard {
    RAY_DIRECTIONS
        .iter()
        .fold(Bitboard::EMPTY, |acc, &dir| acc | kings.shift_one(dir))
}

/// Squares attacked by `color`'s pawns in `pawns`
#[inline]
pub(crate) fn pawn_attacks_set(pawns: Bitboard, color: Color) -> Bitboard {
    let push = color.pawn_push();
    pawns.shift_one(push + EAST) | pawns.shift_one(push + WEST)
}

/// Sliding attacks along the rook directions
pub(crate) fn rook_attacks(sliders: Bitboard, empty: Bitboard) -> Bitboard {
    RAY_DIRECTIONS[..4]
        .iter()
        .fold(Bitboard::EMPTY, |acc, &dir| {
            acc | sliders.ray_attacks(empty, dir)
        })
}

/// Sliding attacks along the bishop directions
pub(crate) fn bishop_attacks(sliders: Bitboard, empty: Bitboard) -> Bitboard {
    RAY_DIRECTIONS[4..]
        .iter()
        .fold(Bitboard::EMPTY, |acc, &dir| {
            acc | sliders.ray_attacks(empty, dir)
        })
}
