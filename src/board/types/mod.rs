//! Core chess types.
//!
//! This module contains the fundamental types used throughout the engine:
//! - `Piece` and `Color` - piece kinds and colors
//! - `Square` - compact board square (a1 = 0, h8 = 63)
//! - `Bitboard` - 64-bit square set with shift/ray helpers
//! - `Move` and `MoveList` - decoded moves
//! - `CastlingRights` - castling state

mod bitboard;
mod castling;
mod moves;
mod piece;
mod square;

pub use bitboard::{Bitboard, BitboardIter};
pub use castling::{CastleSide, CastlingRights};
pub use moves::{Move, MoveList, MoveListIntoIter};
pub use piece::{Color, Piece};
pub use square::Square;

pub(crate) use piece::PROMOTION_PIECES;
