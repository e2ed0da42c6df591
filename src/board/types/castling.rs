//! Castling rights type.

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::piece::Color;
use super::square::Square;

/// The four castling rights in FEN order (K, Q, k, q); the index of each is
/// also its bit position and its Zobrist key slot.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CastleSide {
    WhiteKing = 0,
    WhiteQueen = 1,
    BlackKing = 2,
    BlackQueen = 3,
}

impl CastleSide {
    pub const ALL: [CastleSide; 4] = [
        CastleSide::WhiteKing,
        CastleSide::WhiteQueen,
        CastleSide::BlackKing,
        CastleSide::BlackQueen,
    ];

    #[inline]
    #[must_use]
    pub const fn new(color: Color, kingside: bool) -> Self {
        match (color, kingside) {
            (Color::White, true) => CastleSide::WhiteKing,
            (Color::White, false) => CastleSide::WhiteQueen,
            (Color::Black, true) => CastleSide::BlackKing,
            (Color::Black, false) => CastleSide::BlackQueen,
        }
    }

    #[inline]
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Home square of the rook this right belongs to
    #[inline]
    #[must_use]
    pub const fn rook_square(self) -> Square {
        match self {
            CastleSide::WhiteKing => Square::H1,
            CastleSide::WhiteQueen => Square::A1,
            CastleSide::BlackKing => Square::H8,
            CastleSide::BlackQueen => Square::A8,
        }
    }

    #[inline]
    #[must_use]
    pub const fn to_fen_char(self) -> char {
        match self {
            CastleSide::WhiteKing => 'K',
            CastleSide::WhiteQueen => 'Q',
            CastleSide::BlackKing => 'k',
            CastleSide::BlackQueen => 'q',
        }
    }

    #[must_use]
    pub fn from_fen_char(c: char) -> Option<Self> {
        match c {
            'K' => Some(CastleSide::WhiteKing),
            'Q' => Some(CastleSide::WhiteQueen),
            'k' => Some(CastleSide::BlackKing),
            'q' => Some(CastleSide::BlackQueen),
            _ => None,
        }
    }
}

/// Castling rights represented as a bitmask
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CastlingRights(u8);

impl CastlingRights {
    #[must_use]
    pub const fn none() -> Self {
        CastlingRights(0)
    }

    #[must_use]
    pub const fn all() -> Self {
        CastlingRights(0b1111)
    }

    #[inline]
    #[must_use]
    pub const fn has(self, side: CastleSide) -> bool {
        self.0 & (1 << side as u8) != 0
    }

    #[inline]
    pub fn set(&mut self, side: CastleSide) {
        self.0 |= 1 << side as u8;
    }

    #[inline]
    pub fn remove(&mut self, side: CastleSide) {
        self.0 &= !(1 << side as u8);
    }

    #[inline]
    #[must_use]
    pub const fn as_u8(self) -> u8 {
        self.0
    }

    #[inline]
    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }
}

impl fmt::Display for CastlingRights {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return write!(f, "-");
        }
        for side in CastleSide::ALL {
            if self.has(side) {
                write!(f, "{}", side.to_fen_char())?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_and_remove_rights() {
        let mut rights = CastlingRights::none();
        rights.set(CastleSide::BlackQueen);
        rights.set(CastleSide::WhiteKing);
        assert_eq!(rights.to_string(), "Kq");
        rights.remove(CastleSide::WhiteKing);
        assert!(!rights.has(CastleSide::WhiteKing));
        assert!(rights.has(CastleSide::BlackQueen));
        assert_eq!(CastlingRights::all().to_string(), "KQkq");
        assert_eq!(CastlingRights::none().to_string(), "-");
    }

    #[test]
    fn fen_chars_round_trip() {
        for side in CastleSide::ALL {
            assert_eq!(CastleSide::from_fen_char(side.to_fen_char()), Some(side));
        }
        assert_eq!(CastleSide::new(Color::Black, true), CastleSide::BlackKing);
    }
}
