//! Quint: a bitboard chess engine core.
//!
//! The [`board`] module holds the position, legal move generation and the
//! search; [`engine`] ties a position, a transposition table, an evaluator
//! and an opening book together; [`uci`] speaks the GUI protocol on top.

pub mod board;
pub mod book;
pub mod engine;
pub mod tt;
pub mod uci;
pub mod zobrist;

pub use board::{Board, Color, GameState, Move, Piece, Square};
pub use engine::{Engine, EngineOptions, SearchLimits};
pub use tt::TranspositionTable;
