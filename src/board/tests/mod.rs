//! Board module tests.
//!
//! Tests are organized into separate files by category:
//! - `perft.rs` - Leaf counts against published reference values
//! - `movegen.rs` - Legal generator against a pseudo-legal reference
//! - `draw.rs` - Draw detection (50-move, repetition, insufficient material)
//! - `make_unmake.rs` - Make/unmake move correctness
//! - `edge_cases.rs` - Special positions and edge cases
//! - `proptest.rs` - Property-based tests

mod movegen;

use crate::board::{Board, Move};

/// Play a coordinate move that must be legal.
fn play(board: &mut Board, text: &str) -> Move {
    board
        .make_move_uci(text)
        .unwrap_or_else(|e| panic!("{text} should be legal: {e}"))
}
