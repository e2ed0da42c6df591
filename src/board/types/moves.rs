//! Move types and move list.

use std::fmt;
use std::ops::Index;

use super::piece::Piece;
use super::square::Square;

/// A fully decoded move.
///
/// Moves carry everything `unmake_move` needs (moved and captured piece,
/// special-move flags) plus a transient ordering `score`. Equality only looks
/// at `from`, `to` and `promotion`.
#[derive(Clone, Copy)]
pub struct Move {
    pub from: Square,
    pub to: Square,
    pub piece: Piece,
    pub captured: Option<Piece>,
    pub promotion: Option<Piece>,
    pub en_passant: bool,
    pub castling: bool,
    pub score: i32,
}

impl Move {
    /// The "pass" move used by null-move pruning. Encoded with `from == to`,
    /// which no real move can have.
    pub const NULL: Move = Move {
        from: Square(0),
        to: Square(0),
        piece: Piece::King,
        captured: None,
        promotion: None,
        en_passant: false,
        castling: false,
        score: 0,
    };

    /// Plain move without capture or special flags
    #[inline]
    #[must_use]
    pub const fn quiet(from: Square, to: Square, piece: Piece) -> Self {
        Move {
            from,
            to,
            piece,
            captured: None,
            promotion: None,
            en_passant: false,
            castling: false,
            score: 0,
        }
    }

    #[inline]
    #[must_use]
    pub const fn is_null(self) -> bool {
        self.from.0 == self.to.0
    }

    /// True for captures, including en passant
    #[inline]
    #[must_use]
    pub const fn is_capture(self) -> bool {
        self.captured.is_some()
    }

    #[inline]
    #[must_use]
    pub const fn is_promotion(self) -> bool {
        self.promotion.is_some()
    }

    /// Same move ignoring decoding details (from, to and promotion match)
    #[inline]
    #[must_use]
    pub fn same_squares(self, from: Square, to: Square, promotion: Option<Piece>) -> bool {
        self.from == from && self.to == to && self.promotion == promotion
    }
}

impl PartialEq for Move {
    fn eq(&self, other: &Self) -> bool {
        self.from == other.from && self.to == other.to && self.promotion == other.promotion
    }
}

impl Eq for Move {}

impl Default for Move {
    fn default() -> Self {
        Move::NULL
    }
}

impl fmt::Debug for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Move({self}")?;
        if let Some(captured) = self.captured {
            write!(f, " x{captured}")?;
        }
        if self.castling {
            write!(f, " castle")?;
        }
        if self.en_passant {
            write!(f, " ep")?;
        }
        write!(f, ")")
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_null() {
            return write!(f, "0000");
        }
        write!(f, "{}{}", self.from, self.to)?;
        if let Some(promo) = self.promotion {
            write!(f, "{}", promo.to_char())?;
        }
        Ok(())
    }
}

pub(crate) const MAX_MOVES: usize = 256;

/// List of moves with fixed-size backing array.
#[derive(Clone, Debug)]
pub struct MoveList {
    moves: [Move; MAX_MOVES],
    len: usize,
}

impl MoveList {
    #[must_use]
    pub fn new() -> Self {
        MoveList {
            moves: [Move::NULL; MAX_MOVES],
            len: 0,
        }
    }

    #[inline]
    pub(crate) fn push(&mut self, mv: Move) {
        self.moves[self.len] = mv;
        self.len += 1;
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    #[must_use]
    pub fn as_slice(&self) -> &[Move] {
        &self.moves[..self.len]
    }

    pub fn as_mut_slice(&mut self) -> &mut [Move] {
        &mut self.moves[..self.len]
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Move> {
        self.as_slice().iter()
    }

    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, Move> {
        self.as_mut_slice().iter_mut()
    }

    #[must_use]
    pub fn first(&self) -> Option<Move> {
        self.as_slice().first().copied()
    }

    #[must_use]
    pub fn contains(&self, mv: &Move) -> bool {
        self.iter().any(|m| m == mv)
    }

    /// Find the generated move matching the given squares and promotion
    #[must_use]
    pub fn find(&self, from: Square, to: Square, promotion: Option<Piece>) -> Option<Move> {
        self.iter()
            .copied()
            .find(|m| m.same_squares(from, to, promotion))
    }

    /// Stable sort by descending ordering score; ties keep generation order.
    pub fn sort_by_score(&mut self) {
        self.as_mut_slice().sort_by(|a, b| b.score.cmp(&a.score));
    }
}

impl<'a> IntoIterator for &'a MoveList {
    type Item = &'a Move;
    type IntoIter = std::slice::Iter<'a, Move>;

    fn into_iter(self) -> Self::IntoIter {
        self.as_slice().iter()
    }
}

impl Default for MoveList {
    fn default() -> Self {
        MoveList::new()
    }
}

/// Owning iterator over moves in a `MoveList`
pub struct MoveListIntoIter {
    list: MoveList,
    idx: usize,
}

impl Iterator for MoveListIntoIter {
    type Item = Move;

    fn next(&mut self) -> Option<Self::Item> {
        if self.idx < self.list.len {
            let mv = self.list.moves[self.idx];
            self.idx += 1;
            Some(mv)
        } else {
            None
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.list.len - self.idx;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for MoveListIntoIter {}

impl IntoIterator for MoveList {
    type Item = Move;
    type IntoIter = MoveListIntoIter;

    fn into_iter(self) -> Self::IntoIter {
        MoveListIntoIter { list: self, idx: 0 }
    }
}

impl Index<usize> for MoveList {
    type Output = Move;

    fn index(&self, idx: usize) -> &Self::Output {
        &self.as_slice()[idx]
    }
}
