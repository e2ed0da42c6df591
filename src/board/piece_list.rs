//! Dense per-piece square lists.
//!
//! A `PieceList` holds the squares of one colored piece kind with O(1) add,
//! remove and relocate, so single-kind iteration (finding a king, walking
//! the knights) never has to bit-scan.

use super::types::Square;

const CAPACITY: usize = 16;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PieceList {
    squares: [Square; CAPACITY],
    // slot of each occupied square in `squares`; meaningless for others
    slots: [u8; 64],
    len: usize,
}

impl PieceList {
    #[must_use]
    pub fn new() -> Self {
        PieceList {
            squares: [Square(0); CAPACITY],
            slots: [0; 64],
            len: 0,
        }
    }

    #[inline]
    pub fn add(&mut self, sq: Square) {
        debug_assert!(self.len < CAPACITY, "piece list overflow");
        self.squares[self.len] = sq;
        self.slots[sq.index()] = self.len as u8;
        self.len += 1;
    }

    /// Remove `sq` by swapping the last entry into its slot.
    #[inline]
    pub fn remove(&mut self, sq: Square) {
        let slot = self.slots[sq.index()] as usize;
        debug_assert!(slot < self.len && self.squares[slot] == sq);
        self.len -= 1;
        let last = self.squares[self.len];
        self.squares[slot] = last;
        self.slots[last.index()] = slot as u8;
    }

    #[inline]
    pub fn relocate(&mut self, from: Square, to: Square) {
        let slot = self.slots[from.index()];
        self.squares[slot as usize] = to;
        self.slots[to.index()] = slot;
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    #[inline]
    #[must_use]
    pub fn as_slice(&self) -> &[Square] {
        &self.squares[..self.len]
    }

    #[inline]
    #[must_use]
    pub fn first(&self) -> Option<Square> {
        self.as_slice().first().copied()
    }

    /// Same squares regardless of slot order
    #[must_use]
    pub fn same_squares(&self, other: &PieceList) -> bool {
        let mut a = self.as_slice().to_vec();
        let mut b = other.as_slice().to_vec();
        a.sort_unstable();
        b.sort_unstable();
        a == b
    }
}

impl Default for PieceList {
    fn default() -> Self {
        PieceList::new()
    }
}
