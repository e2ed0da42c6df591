//! Bitboard type and operations.

use std::fmt;
use std::ops::{BitAnd, BitAndAssign, BitOr, BitOrAssign, BitXor, BitXorAssign, Not};

use super::square::Square;

/// A 64-bit set of squares (bit i = square index i).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Bitboard(pub u64);

// File masks (columns)
impl Bitboard {
    pub const FILE_A: Bitboard = Bitboard(0x0101010101010101);
    pub const FILE_B: Bitboard = Bitboard(0x0202020202020202);
    pub const FILE_G: Bitboard = Bitboard(0x4040404040404040);
    pub const FILE_H: Bitboard = Bitboard(0x8080808080808080);

    pub const RANK_1: Bitboard = Bitboard(0x00000000000000FF);
    pub const RANK_4: Bitboard = Bitboard(0x00000000FF000000);
    pub const RANK_5: Bitboard = Bitboard(0x000000FF00000000);
    pub const RANK_8: Bitboard = Bitboard(0xFF00000000000000);

    pub const EMPTY: Bitboard = Bitboard(0);
    pub const ALL: Bitboard = Bitboard(!0);

    /// Light squares (b1, d1, ..., a2, c2, ...)
    pub const LIGHT_SQUARES: Bitboard = Bitboard(0x55AA55AA55AA55AA);
    /// Dark squares (a1, c1, ..., b2, d2, ...)
    pub const DARK_SQUARES: Bitboard = Bitboard(0xAA55AA55AA55AA55);
}

impl Bitboard {
    /// Create a bitboard with a single square set
    #[inline]
    #[must_use]
    pub const fn from_square(sq: Square) -> Self {
        Bitboard(1 << sq.0)
    }

    /// Returns an iterator over the squares set in this bitboard
    #[inline]
    #[must_use]
    pub fn iter(self) -> BitboardIter {
        BitboardIter(self)
    }

    #[inline]
    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Population count
    #[inline]
    #[must_use]
    pub const fn popcount(self) -> u32 {
        self.0.count_ones()
    }

    /// True if more than one bit is set
    #[inline]
    #[must_use]
    pub const fn has_many(self) -> bool {
        self.0 & self.0.wrapping_sub(1) != 0
    }

    #[inline]
    #[must_use]
    pub const fn contains(self, sq: Square) -> bool {
        (self.0 >> sq.0) & 1 != 0
    }

    /// Lowest set square, if any
    #[inline]
    #[must_use]
    pub const fn lsb(self) -> Option<Square> {
        if self.0 == 0 {
            None
        } else {
            Some(Square(self.0.trailing_zeros() as u8))
        }
    }

    /// Shift every square one step along `dir`, dropping squares that would
    /// wrap around the a/h files.
    ///
    /// `dir` is a square offset such as +8 (north), +1 (east) or -9
    /// (south-west); its horizontal component is read from `dir mod 8`.
    #[inline]
    #[must_use]
    pub const fn shift_one(self, dir: i8) -> Self {
        let masked = match dir.rem_euclid(8) {
            1 => self.0 & !Self::FILE_H.0,
            7 => self.0 & !Self::FILE_A.0,
            _ => self.0,
        };
        Bitboard(gen_shift(masked, dir))
    }

    /// Knight-style shift: like `shift_one` but the horizontal component may
    /// be two files, so two edge files are masked.
    #[inline]
    #[must_use]
    pub const fn shift_two(self, dir: i8) -> Self {
        let masked = match dir.rem_euclid(8) {
            1 => self.0 & !Self::FILE_H.0,
            2 => self.0 & !(Self::FILE_G.0 | Self::FILE_H.0),
            6 => self.0 & !(Self::FILE_A.0 | Self::FILE_B.0),
            7 => self.0 & !Self::FILE_A.0,
            _ => self.0,
        };
        Bitboard(gen_shift(masked, dir))
    }

    /// Squares attacked along `dir` by every piece in `self`, stopping at (and
    /// including) the first square that is not in `empty`.
    #[inline]
    #[must_use]
    pub const fn ray_attacks(self, empty: Bitboard, dir: i8) -> Self {
        let mut set = self;
        let mut i = 0;
        while i < 7 {
            set = Bitboard(set.0 | (empty.0 & set.shift_one(dir).0));
            i += 1;
        }
        set.shift_one(dir)
    }
}

#[inline]
const fn gen_shift(bits: u64, dir: i8) -> u64 {
    if dir >= 0 {
        bits << dir
    } else {
        bits >> -dir
    }
}

impl BitAnd for Bitboard {
    type Output = Bitboard;
    #[inline]
    fn bitand(self, rhs: Self) -> Self {
        Bitboard(self.0 & rhs.0)
    }
}

impl BitOr for Bitboard {
    type Output = Bitboard;
    #[inline]
    fn bitor(self, rhs: Self) -> Self {
        Bitboard(self.0 | rhs.0)
    }
}

impl BitXor for Bitboard {
    type Output = Bitboard;
    #[inline]
    fn bitxor(self, rhs: Self) -> Self {
        Bitboard(self.0 ^ rhs.0)
    }
}

impl Not for Bitboard {
    type Output = Bitboard;
    #[inline]
    fn not(self) -> Self {
        Bitboard(!self.0)
    }
}

impl BitAndAssign for Bitboard {
    #[inline]
    fn bitand_assign(&mut self, rhs: Self) {
        self.0 &= rhs.0;
    }
}

impl BitOrAssign for Bitboard {
    #[inline]
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

impl BitXorAssign for Bitboard {
    #[inline]
    fn bitxor_assign(&mut self, rhs: Self) {
        self.0 ^= rhs.0;
    }
}

impl fmt::Display for Bitboard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for rank in (0..8).rev() {
            for file in 0..8 {
                let ch = if (self.0 >> (rank * 8 + file)) & 1 == 1 {
                    '1'
                } else {
                    '.'
                };
                write!(f, "{ch}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// Iterator over set bits in a Bitboard, lowest square first
pub struct BitboardIter(Bitboard);

impl Iterator for BitboardIter {
    type Item = Square;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        let sq = self.0.lsb()?;
        self.0 .0 &= self.0 .0 - 1;
        Some(sq)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.0.popcount() as usize;
        (n, Some(n))
    }
}

impl IntoIterator for Bitboard {
    type Item = Square;
    type IntoIter = BitboardIter;

    fn into_iter(self) -> BitboardIter {
        BitboardIter(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bb(names: &[&str]) -> Bitboard {
        names.iter().fold(Bitboard::EMPTY, |acc, n| {
            acc | Bitboard::from_square(n.parse().unwrap())
        })
    }

    #[test]
    fn shift_one_masks_wraparound() {
        assert_eq!(bb(&["h4"]).shift_one(1), Bitboard::EMPTY);
        assert_eq!(bb(&["a4"]).shift_one(-1), Bitboard::EMPTY);
        assert_eq!(bb(&["a4"]).shift_one(7), Bitboard::EMPTY);
        assert_eq!(bb(&["h4"]).shift_one(-7), Bitboard::EMPTY);
        assert_eq!(bb(&["d4"]).shift_one(9), bb(&["e5"]));
        assert_eq!(bb(&["d4"]).shift_one(-9), bb(&["c3"]));
        assert_eq!(bb(&["d8"]).shift_one(8), Bitboard::EMPTY);
    }

    #[test]
    fn shift_two_masks_knight_wraparound() {
        assert_eq!(bb(&["g1"]).shift_two(10), Bitboard::EMPTY);
        assert_eq!(bb(&["b1"]).shift_two(6), Bitboard::EMPTY);
        assert_eq!(bb(&["g1"]).shift_two(17), bb(&["h3"]));
        assert_eq!(bb(&["e4"]).shift_two(-10), bb(&["c3"]));
    }

    #[test]
    fn ray_attacks_stop_at_blockers() {
        let rook = bb(&["a1"]);
        let blockers = bb(&["a5", "d1"]);
        let empty = !(rook | blockers);
        assert_eq!(rook.ray_attacks(empty, 8), bb(&["a2", "a3", "a4", "a5"]));
        assert_eq!(rook.ray_attacks(empty, 1), bb(&["b1", "c1", "d1"]));
        assert_eq!(rook.ray_attacks(empty, -1), Bitboard::EMPTY);
    }

    #[test]
    fn iteration_and_counts() {
        let set = bb(&["a1", "e4", "h8"]);
        let squares: Vec<Square> = set.iter().collect();
        assert_eq!(squares, vec![Square(0), Square(28), Square(63)]);
        assert_eq!(set.popcount(), 3);
        assert!(set.has_many());
        assert!(!bb(&["e4"]).has_many());
        assert_eq!(Bitboard::EMPTY.lsb(), None);
    }
}
