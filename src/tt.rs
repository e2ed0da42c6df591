//! Transposition table for caching search results.
//!
//! A fixed-size array indexed by `hash % len` with last-write-wins
//! replacement, except that a valid exact entry is never replaced by a bound.
//! Entries carry no board verification beyond the full 64-bit key, so a hit
//! is a heuristic: callers must re-check any stored move against the legal
//! move list before playing it.

use std::mem;

use crate::board::search::score::{from_tt, to_tt};
use crate::board::{Move, MoveList, Piece, Square};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BoundType {
    Exact,      // Score is the exact value
    LowerBound, // Score is at least this value (failed high - score >= beta)
    UpperBound, // Score is at most this value (failed low - score <= alpha)
}

/// Best or refutation move as stored in the table.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TtMove {
    pub from: Square,
    pub to: Square,
    pub promotion: Option<Piece>,
}

impl TtMove {
    #[must_use]
    pub fn matches(self, mv: &Move) -> bool {
        mv.same_squares(self.from, self.to, self.promotion)
    }

    /// The legal move this entry refers to, if it is legal in `moves`.
    #[must_use]
    pub fn resolve(self, moves: &MoveList) -> Option<Move> {
        moves.find(self.from, self.to, self.promotion)
    }
}

impl From<Move> for TtMove {
    fn from(mv: Move) -> Self {
        TtMove {
            from: mv.from,
            to: mv.to,
            promotion: mv.promotion,
        }
    }
}

#[derive(Clone, Copy, Debug)]
pub struct TTEntry {
    pub key: u64,
    /// Score relative to the node it was stored at
    pub score: i32,
    pub depth: u8,
    pub best_move: Option<TtMove>,
    pub bound_type: BoundType,
    pub valid: bool,
}

impl TTEntry {
    const EMPTY: TTEntry = TTEntry {
        key: 0,
        score: 0,
        depth: 0,
        best_move: None,
        bound_type: BoundType::UpperBound,
        valid: false,
    };
}

pub struct TranspositionTable {
    entries: Vec<TTEntry>,
}

impl TranspositionTable {
    /// Table sized to roughly `size_mb` megabytes (at least one entry).
    #[must_use]
    pub fn new(size_mb: usize) -> Self {
        let count = Self::entries_for(size_mb);
        TranspositionTable {
            entries: vec![TTEntry::EMPTY; count],
        }
    }

    fn entries_for(size_mb: usize) -> usize {
        (size_mb.saturating_mul(1_000_000) / mem::size_of::<TTEntry>()).max(1)
    }

    /// Reallocate to `size_mb` megabytes, dropping all entries.
    pub fn resize(&mut self, size_mb: usize) {
        let count = Self::entries_for(size_mb);
        self.entries = vec![TTEntry::EMPTY; count];
    }

    /// Invalidate every entry.
    pub fn clear(&mut self) {
        self.entries.fill(TTEntry::EMPTY);
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[inline]
    fn index(&self, key: u64) -> usize {
        (key % self.entries.len() as u64) as usize
    }

    /// Store a search result. `score` is root-relative and is converted to
    /// node-relative using `ply`.
    pub fn store(
        &mut self,
        key: u64,
        depth: u32,
        ply: u32,
        score: i32,
        bound_type: BoundType,
        best_move: Option<Move>,
    ) {
        let idx = self.index(key);
        let slot = &mut self.entries[idx];
        if slot.valid && slot.bound_type == BoundType::Exact && bound_type != BoundType::Exact {
            return;
        }
        *slot = TTEntry {
            key,
            score: to_tt(score, ply),
            depth: depth.min(u8::MAX as u32) as u8,
            best_move: best_move.filter(|m| !m.is_null()).map(TtMove::from),
            bound_type,
            valid: true,
        };
    }

    /// The entry for `key`, if the slot currently holds it.
    #[must_use]
    pub fn probe(&self, key: u64) -> Option<&TTEntry> {
        let entry = &self.entries[self.index(key)];
        (entry.valid && entry.key == key).then_some(entry)
    }

    /// Usable root-relative score for a search of `depth` at `ply` with
    /// window (`alpha`, `beta`).
    ///
    /// Exact entries are always usable, upper bounds only when they fail low
    /// (`<= alpha`), lower bounds only when they fail high (`>= beta`).
    #[must_use]
    pub fn probe_score(&self, key: u64, depth: u32, ply: u32, alpha: i32, beta: i32) -> Option<i32> {
        let entry = self.probe(key)?;
        if u32::from(entry.depth) < depth {
            return None;
        }
        let score = from_tt(entry.score, ply);
        match entry.bound_type {
            BoundType::Exact => Some(score),
            BoundType::UpperBound if score <= alpha => Some(score),
            BoundType::LowerBound if score >= beta => Some(score),
            _ => None,
        }
    }

    /// Stored best move for `key`. With `exact_only`, bound entries are ignored.
    #[must_use]
    pub fn best_move(&self, key: u64, exact_only: bool) -> Option<TtMove> {
        let entry = self.probe(key)?;
        if exact_only && entry.bound_type != BoundType::Exact {
            return None;
        }
        entry.best_move
    }

    /// Per-mille of slots holding a valid entry, sampled over the first 1000.
    #[must_use]
    pub fn hashfull(&self) -> u32 {
        let sample = self.entries.len().min(1000);
        let used = self.entries[..sample].iter().filter(|e| e.valid).count();
        (used * 1000 / sample) as u32
    }
}
