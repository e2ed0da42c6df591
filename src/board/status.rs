//! Game-over and draw detection.

use std::fmt;

use super::types::{Bitboard, Color, Piece};
use super::Board;

/// Outcome of the current position.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum GameState {
    Play,
    WhiteWin,
    BlackWin,
    Draw,
}

impl GameState {
    #[must_use]
    pub const fn is_over(self) -> bool {
        !matches!(self, GameState::Play)
    }
}

impl fmt::Display for GameState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            GameState::Play => "play",
            GameState::WhiteWin => "1-0",
            GameState::BlackWin => "0-1",
            GameState::Draw => "1/2-1/2",
        };
        write!(f, "{text}")
    }
}

impl Board {
    /// Game state with standard rules (threefold repetition).
    #[must_use]
    pub fn state(&self) -> GameState {
        if self.generate_moves().is_empty() {
            return if !self.is_in_check() {
                GameState::Draw
            } else if self.side_to_move == Color::White {
                GameState::BlackWin
            } else {
                GameState::WhiteWin
            };
        }
        if self.is_draw(2) {
            GameState::Draw
        } else {
            GameState::Play
        }
    }

    /// Fifty-move rule, repetition, or insufficient material.
    ///
    /// `repetitions` is the number of earlier occurrences of the current
    /// position that count as a draw: 2 for the threefold rule, 1 to score the
    /// first repetition as a draw.
    #[must_use]
    pub fn is_draw(&self, repetitions: usize) -> bool {
        self.is_fifty_move_draw()
            || self.repetition_count() >= repetitions
            || self.is_insufficient_material()
    }

    #[inline]
    #[must_use]
    pub fn is_fifty_move_draw(&self) -> bool {
        self.halfmove_clock >= 100
    }

    /// Earlier occurrences of the current position.
    ///
    /// Only positions since the last capture or pawn move with the same side
    /// to move can match, so the scan walks back two plies at a time.
    #[must_use]
    pub fn repetition_count(&self) -> usize {
        let key = self.hash.key();
        let len = self.hash_history.len();
        let window = (self.halfmove_clock as usize).min(len);
        (2..=window)
            .step_by(2)
            .filter(|&plies_ago| self.hash_history[len - plies_ago] == key)
            .count()
    }

    /// Bare kings, a single minor piece against a bare king, or one bishop
    /// each on squares of the same color.
    #[must_use]
    pub fn is_insufficient_material(&self) -> bool {
        let heavy_or_pawns = [Piece::Pawn, Piece::Rook, Piece::Queen]
            .iter()
            .any(|&p| self.piece_count(Color::White, p) + self.piece_count(Color::Black, p) > 0);
        if heavy_or_pawns {
            return false;
        }

        let minors = |color| {
            self.piece_count(color, Piece::Knight) + self.piece_count(color, Piece::Bishop)
        };
        let (white, black) = (minors(Color::White), minors(Color::Black));
        match (white, black) {
            (0, 0) | (1, 0) | (0, 1) => true,
            (1, 1) => {
                let white_bishop = self.pieces_of(Color::White, Piece::Bishop);
                let black_bishop = self.pieces_of(Color::Black, Piece::Bishop);
                if white_bishop.is_empty() || black_bishop.is_empty() {
                    return false;
                }
                let bishops = white_bishop | black_bishop;
                (bishops & Bitboard::LIGHT_SQUARES) == bishops
                    || (bishops & Bitboard::DARK_SQUARES) == bishops
            }
            _ => false,
        }
    }
}
