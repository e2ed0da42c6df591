//! Opening book.
//!
//! The book is a tree of move lines rooted at the standard starting
//! position. Each node carries the number of games that reached it, and a
//! lookup picks the next move at random weighted by those counts. Lookups
//! return coordinate text; the caller validates it against the legal moves.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::board::Move;

/// Source of opening moves for games that began at the standard start.
pub trait OpeningBook {
    /// Next move after `history`, or `None` when the line leaves the book.
    fn find_move(&mut self, history: &[Move]) -> Option<String>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct BookNode {
    mv: String,
    games: u32,
    children: Vec<BookNode>,
}

impl BookNode {
    fn new(mv: &str) -> Self {
        BookNode {
            mv: mv.to_string(),
            games: 0,
            children: Vec::new(),
        }
    }

    fn child(&self, mv: &str) -> Option<&BookNode> {
        self.children.iter().find(|c| c.mv == mv)
    }
}

// Main lines with rough popularity counts.
const BUILTIN_LINES: &[(&str, u32)] = &[
    ("e2e4 e7e5 g1f3 b8c6 f1b5 a7a6 b5a4 g8f6", 40),
    ("e2e4 e7e5 g1f3 b8c6 f1c4 f8c5 c2c3 g8f6", 20),
    ("e2e4 c7c5 g1f3 d7d6 d2d4 c5d4 f3d4 g8f6 b1c3 a7a6", 45),
    ("e2e4 c7c5 g1f3 b8c6 d2d4 c5d4 f3d4 g8f6 b1c3", 20),
    ("e2e4 e7e6 d2d4 d7d5 b1c3 g8f6", 20),
    ("e2e4 c7c6 d2d4 d7d5 b1c3 d5e4 c3e4", 15),
    ("d2d4 d7d5 c2c4 e7e6 b1c3 g8f6 c1g5 f8e7", 30),
    ("d2d4 d7d5 c2c4 c7c6 g1f3 g8f6 b1c3", 20),
    ("d2d4 g8f6 c2c4 e7e6 b1c3 f8b4", 25),
    ("d2d4 g8f6 c2c4 g7g6 b1c3 f8g7 e2e4 d7d6", 25),
    ("c2c4 e7e5 b1c3 g8f6 g1f3 b8c6", 15),
    ("g1f3 d7d5 g2g3 g8f6 f1g2", 10),
];

/// In-memory book tree.
#[derive(Debug, Clone)]
pub struct BookTree {
    root: BookNode,
    rng: StdRng,
}

impl Default for BookTree {
    fn default() -> Self {
        Self::new()
    }
}

impl BookTree {
    /// Empty book drawing from an entropy-seeded generator.
    #[must_use]
    pub fn new() -> Self {
        Self::with_rng(StdRng::from_entropy())
    }

    /// Empty book with a fixed seed, for reproducible choices.
    #[must_use]
    pub fn seeded(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }

    fn with_rng(rng: StdRng) -> Self {
        BookTree {
            root: BookNode::new(""),
            rng,
        }
    }

    /// Small built-in repertoire of main lines.
    #[must_use]
    pub fn builtin() -> Self {
        let mut book = Self::new();
        for &(line, games) in BUILTIN_LINES {
            book.add_line(&line.split_whitespace().collect::<Vec<_>>(), games);
        }
        book
    }

    /// Add `games` occurrences of a line of coordinate moves.
    pub fn add_line(&mut self, moves: &[&str], games: u32) {
        let mut node = &mut self.root;
        node.games += games;
        for &mv in moves {
            let idx = match node.children.iter().position(|c| c.mv == mv) {
                Some(idx) => idx,
                None => {
                    node.children.push(BookNode::new(mv));
                    node.children.len() - 1
                }
            };
            node = &mut node.children[idx];
            node.games += games;
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.root.children.is_empty()
    }

    fn node_after<'a>(root: &'a BookNode, history: &[Move]) -> Option<&'a BookNode> {
        history
            .iter()
            .try_fold(root, |node, mv| node.child(&mv.to_string()))
    }
}

impl OpeningBook for BookTree {
    fn find_move(&mut self, history: &[Move]) -> Option<String> {
        let node = Self::node_after(&self.root, history)?;
        let total: u64 = node.children.iter().map(|c| u64::from(c.games)).sum();
        let first = node.children.first()?;
        if total == 0 {
            return Some(first.mv.clone());
        }

        let mut pick = self.rng.gen_range(0..total);
        for child in &node.children {
            let games = u64::from(child.games);
            if pick < games {
                return Some(child.mv.clone());
            }
            pick -= games;
        }
        Some(first.mv.clone())
    }
}
