//! Error types for board input parsing.

use std::fmt;

use super::types::Color;

/// Error type for FEN parsing failures
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FenError {
    /// FEN string has too few fields (needs at least 4)
    TooFewParts { found: usize },
    /// FEN string has more than 6 fields
    TooManyParts { found: usize },
    /// Invalid piece character in position string
    InvalidPiece { char: char },
    /// Placement field does not have exactly 8 ranks
    InvalidRankCount { found: usize },
    /// A rank does not describe exactly 8 files
    InvalidFileCount { rank: usize, files: usize },
    /// Invalid side to move (must be 'w' or 'b')
    InvalidSideToMove { found: String },
    /// Invalid castling character
    InvalidCastling { char: char },
    /// Invalid en passant square
    InvalidEnPassant { found: String },
    /// Half-move clock or full-move number is not a number
    InvalidCounter { found: String },
    /// A side does not have exactly one king
    InvalidKingCount { color: Color, found: usize },
    /// A side has more than 8 pawns
    TooManyPawns { color: Color },
    /// A side has more than 16 pieces
    TooManyPieces { color: Color },
}

impl fmt::Display for FenError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FenError::TooFewParts { found } => {
                write!(f, "FEN must have at least 4 parts, found {found}")
            }
            FenError::TooManyParts { found } => {
                write!(f, "FEN must have at most 6 parts, found {found}")
            }
            FenError::InvalidPiece { char } => {
                write!(f, "Invalid piece character '{char}' in FEN")
            }
            FenError::InvalidRankCount { found } => {
                write!(f, "FEN placement must have 8 ranks, found {found}")
            }
            FenError::InvalidFileCount { rank, files } => {
                write!(f, "Rank {rank} describes {files} files, expected 8")
            }
            FenError::InvalidSideToMove { found } => {
                write!(f, "Invalid side to move '{found}', expected 'w' or 'b'")
            }
            FenError::InvalidCastling { char } => {
                write!(f, "Invalid castling character '{char}' in FEN")
            }
            FenError::InvalidEnPassant { found } => {
                write!(f, "Invalid en passant square '{found}'")
            }
            FenError::InvalidCounter { found } => {
                write!(f, "Invalid move counter '{found}'")
            }
            FenError::InvalidKingCount { color, found } => {
                write!(f, "Expected one {color} king, found {found}")
            }
            FenError::TooManyPawns { color } => {
                write!(f, "More than 8 {color} pawns in FEN")
            }
            FenError::TooManyPieces { color } => {
                write!(f, "More than 16 {color} pieces in FEN")
            }
        }
    }
}

impl std::error::Error for FenError {}

/// Error type for move parsing failures
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoveParseError {
    /// Move string has invalid length (must be 4-5 characters)
    InvalidLength { len: usize },
    /// Invalid square notation in move
    InvalidSquare { notation: String },
    /// Invalid promotion piece
    InvalidPromotion { char: char },
    /// Move is not legal in the current position
    IllegalMove { notation: String },
}

impl fmt::Display for MoveParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MoveParseError::InvalidLength { len } => {
                write!(f, "Move must be 4-5 characters, found {len}")
            }
            MoveParseError::InvalidSquare { notation } => {
                write!(f, "Invalid square notation in '{notation}'")
            }
            MoveParseError::InvalidPromotion { char } => {
                write!(f, "Invalid promotion piece '{char}'")
            }
            MoveParseError::IllegalMove { notation } => {
                write!(f, "Illegal move '{notation}'")
            }
        }
    }
}

impl std::error::Error for MoveParseError {}

/// Error type for square parsing failures
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SquareError {
    /// Rank or file outside 0-7
    OutOfRange { rank: u8, file: u8 },
    /// Invalid algebraic notation
    InvalidNotation { notation: String },
}

impl fmt::Display for SquareError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SquareError::OutOfRange { rank, file } => {
                write!(f, "Square (rank {rank}, file {file}) is off the board")
            }
            SquareError::InvalidNotation { notation } => {
                write!(f, "Invalid square notation '{notation}'")
            }
        }
    }
}

impl std::error::Error for SquareError {}
