//! Chess board representation and game logic.
//!
//! Uses bitboards plus a mailbox for legal move generation, with an undo
//! stack so a single position can be searched in place. Supports full chess
//! rules including castling, en passant, promotions and the draw rules.
//!
//! # Example
//! ```
//! use quint_chess::board::Board;
//!
//! let mut board = Board::new();
//! let moves = board.generate_moves();
//! assert_eq!(moves.len(), 20);
//! assert_eq!(board.perft(2), 400);
//! ```

pub(crate) mod attacks;
#[cfg(debug_assertions)]
mod debug;
mod error;
mod fen;
mod make_unmake;
mod movegen;
mod perft;
mod piece_list;
pub mod search;
mod state;
mod status;
mod types;

#[cfg(test)]
mod tests;

pub use error::{FenError, MoveParseError, SquareError};
pub use piece_list::PieceList;
pub use state::{Board, START_FEN};
pub use status::GameState;
pub use types::{
    Bitboard, BitboardIter, CastleSide, CastlingRights, Color, Move, MoveList, MoveListIntoIter,
    Piece, Square,
};
