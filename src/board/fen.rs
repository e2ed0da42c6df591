use std::str::FromStr;

use super::error::{FenError, MoveParseError};
use super::state::START_FEN;
use super::types::{CastleSide, Color, Move, Piece, Square};
use super::Board;

impl Board {
    /// Parse a board position from FEN notation.
    ///
    /// Accepts 4 to 6 fields; missing clocks default to `0 1`.
    pub fn try_from_fen(fen: &str) -> Result<Self, FenError> {
        let mut board = Board::empty();
        let parts: Vec<&str> = fen.split_whitespace().collect();

        if parts.len() < 4 {
            return Err(FenError::TooFewParts { found: parts.len() });
        }
        if parts.len() > 6 {
            return Err(FenError::TooManyParts { found: parts.len() });
        }

        let ranks: Vec<&str> = parts[0].split('/').collect();
        if ranks.len() != 8 {
            return Err(FenError::InvalidRankCount { found: ranks.len() });
        }
        let mut pawns = [0usize; 2];
        let mut pieces = [0usize; 2];
        for (rank_idx, rank_str) in ranks.iter().enumerate() {
            let rank = 7 - rank_idx as u8;
            let mut file = 0usize;
            for c in rank_str.chars() {
                if let Some(skip) = c.to_digit(10) {
                    if skip == 0 || skip > 8 {
                        return Err(FenError::InvalidPiece { char: c });
                    }
                    file += skip as usize;
                    continue;
                }
                let piece = Piece::from_char(c).ok_or(FenError::InvalidPiece { char: c })?;
                if file >= 8 {
                    return Err(FenError::InvalidFileCount {
                        rank: rank as usize + 1,
                        files: file + 1,
                    });
                }
                let color = if c.is_ascii_uppercase() {
                    Color::White
                } else {
                    Color::Black
                };
                pieces[color.index()] += 1;
                if pieces[color.index()] > 16 {
                    return Err(FenError::TooManyPieces { color });
                }
                if piece == Piece::Pawn {
                    pawns[color.index()] += 1;
                    if pawns[color.index()] > 8 {
                        return Err(FenError::TooManyPawns { color });
                    }
                }
                board.put_piece(color, piece, Square(rank * 8 + file as u8));
                file += 1;
            }
            if file != 8 {
                return Err(FenError::InvalidFileCount {
                    rank: rank as usize + 1,
                    files: file,
                });
            }
        }

        for color in Color::BOTH {
            let found = board.piece_count(color, Piece::King);
            if found != 1 {
                return Err(FenError::InvalidKingCount { color, found });
            }
        }

        board.side_to_move = match parts[1] {
            "w" => Color::White,
            "b" => Color::Black,
            other => {
                return Err(FenError::InvalidSideToMove {
                    found: other.to_string(),
                })
            }
        };

        if parts[2] != "-" {
            for c in parts[2].chars() {
                let side = CastleSide::from_fen_char(c).ok_or(FenError::InvalidCastling { char: c })?;
                board.castling_rights.set(side);
            }
        }

        board.en_passant_target = if parts[3] == "-" {
            None
        } else {
            let invalid = || FenError::InvalidEnPassant {
                found: parts[3].to_string(),
            };
            let sq: Square = parts[3].parse().map_err(|_| invalid())?;
            let mover = board.side_to_move;
            let expected_rank = match mover {
                Color::White => 5,
                Color::Black => 2,
            };
            if sq.rank() != expected_rank {
                return Err(invalid());
            }
            // the pawn that just double-pushed sits one square past the target
            let pushed = sq.offset(-mover.pawn_push());
            if board.piece_at(sq).is_some()
                || board.piece_at(pushed) != Some((mover.opponent(), Piece::Pawn))
            {
                return Err(invalid());
            }
            Some(sq)
        };

        if let Some(field) = parts.get(4) {
            board.halfmove_clock = field.parse().map_err(|_| FenError::InvalidCounter {
                found: (*field).to_string(),
            })?;
        }
        if let Some(field) = parts.get(5) {
            board.fullmove_number = field.parse().map_err(|_| FenError::InvalidCounter {
                found: (*field).to_string(),
            })?;
        }

        board.hash.set(board.compute_hash());
        board.normal_start = parts[..4]
            .iter()
            .zip(START_FEN.split_whitespace())
            .all(|(a, b)| *a == b);
        Ok(board)
    }

    /// Parse a board position from FEN notation.
    ///
    /// # Panics
    /// Panics if the FEN string is invalid. Use `try_from_fen` for fallible parsing.
    #[must_use]
    pub fn from_fen(fen: &str) -> Self {
        Self::try_from_fen(fen).expect("Invalid FEN string")
    }

    /// Convert the board position to FEN notation.
    #[must_use]
    pub fn to_fen(&self) -> String {
        let mut rows: Vec<String> = Vec::with_capacity(8);
        for rank in (0..8u8).rev() {
            let mut row = String::new();
            let mut empty = 0;
            for file in 0..8u8 {
                if let Some((color, piece)) = self.piece_at(Square(rank * 8 + file)) {
                    if empty > 0 {
                        row.push_str(&empty.to_string());
                        empty = 0;
                    }
                    row.push(piece.to_fen_char(color));
                } else {
                    empty += 1;
                }
            }
            if empty > 0 {
                row.push_str(&empty.to_string());
            }
            rows.push(row);
        }

        let active = if self.white_to_move() { "w" } else { "b" };
        let ep = self
            .en_passant_target
            .map_or_else(|| "-".to_string(), |sq| sq.to_string());

        format!(
            "{} {} {} {} {} {}",
            rows.join("/"),
            active,
            self.castling_rights,
            ep,
            self.halfmove_clock,
            self.fullmove_number
        )
    }

    /// Parse a move in coordinate notation (e.g. "e2e4", "e7e8q").
    ///
    /// Returns the matching legal move, or an error describing why parsing failed.
    ///
    /// # Example
    /// ```
    /// use quint_chess::board::Board;
    ///
    /// let board = Board::new();
    /// let mv = board.parse_move("e2e4").unwrap();
    /// assert_eq!(mv.to_string(), "e2e4");
    /// ```
    pub fn parse_move(&self, text: &str) -> Result<Move, MoveParseError> {
        if !text.is_ascii() || text.len() < 4 || text.len() > 5 {
            return Err(MoveParseError::InvalidLength { len: text.len() });
        }

        let invalid_square = || MoveParseError::InvalidSquare {
            notation: text.to_string(),
        };
        let from: Square = text[0..2].parse().map_err(|_| invalid_square())?;
        let to: Square = text[2..4].parse().map_err(|_| invalid_square())?;

        let promotion = match text[4..].chars().next() {
            Some(c) => Some(
                Piece::from_promotion_char(c).ok_or(MoveParseError::InvalidPromotion { char: c })?,
            ),
            None => None,
        };

        self.generate_moves()
            .find(from, to, promotion)
            .ok_or_else(|| MoveParseError::IllegalMove {
                notation: text.to_string(),
            })
    }

    /// Parse a coordinate move and make it on the board in one call.
    ///
    /// # Example
    /// ```
    /// use quint_chess::board::Board;
    ///
    /// let mut board = Board::new();
    /// board.make_move_uci("e2e4").unwrap();
    /// board.make_move_uci("e7e5").unwrap();
    /// ```
    pub fn make_move_uci(&mut self, text: &str) -> Result<Move, MoveParseError> {
        let mv = self.parse_move(text)?;
        self.make_move(mv);
        Ok(mv)
    }
}

impl FromStr for Board {
    type Err = FenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Board::try_from_fen(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fen_round_trip() {
        for fen in [
            START_FEN,
            "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1",
            "rnbqkbnr/ppp1p1pp/8/3pPp2/8/8/PPPP1PPP/RNBQKBNR w KQkq f6 0 3",
            "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 b - - 13 42",
        ] {
            assert_eq!(Board::from_fen(fen).to_fen(), fen);
        }
    }

    #[test]
    fn test_fen_defaults_missing_clocks() {
        let board = Board::from_fen("4k3/8/8/8/8/8/8/4K3 b - -");
        assert_eq!(board.halfmove_clock(), 0);
        assert_eq!(board.fullmove_number(), 1);
        assert_eq!(board.side_to_move(), Color::Black);
    }

    #[test]
    fn test_fen_errors() {
        let cases = [
            ("8/8/8/8 w", FenError::TooFewParts { found: 2 }),
            (
                "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP w KQkq - 0 1",
                FenError::InvalidRankCount { found: 7 },
            ),
            (
                "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNX w KQkq - 0 1",
                FenError::InvalidPiece { char: 'X' },
            ),
            (
                "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPP/RNBQKBNR w KQkq - 0 1",
                FenError::InvalidFileCount { rank: 2, files: 7 },
            ),
            (
                "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR x KQkq - 0 1",
                FenError::InvalidSideToMove {
                    found: "x".to_string(),
                },
            ),
            (
                "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQxq - 0 1",
                FenError::InvalidCastling { char: 'x' },
            ),
            (
                "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq e4 0 1",
                FenError::InvalidEnPassant {
                    found: "e4".to_string(),
                },
            ),
            (
                "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - x 1",
                FenError::InvalidCounter {
                    found: "x".to_string(),
                },
            ),
            (
                "rnbq1bnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQ - 0 1",
                FenError::InvalidKingCount {
                    color: Color::Black,
                    found: 0,
                },
            ),
        ];
        for (fen, expected) in cases {
            assert_eq!(Board::try_from_fen(fen).err(), Some(expected), "{fen}");
        }
    }

    #[test]
    fn test_normal_start_detection() {
        assert!(Board::new().is_normal_start());
        assert!(Board::from_fen(START_FEN).is_normal_start());
        let board = Board::from_fen("rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq e3 0 1");
        assert!(!board.is_normal_start());
    }

    #[test]
    fn test_new_matches_start_fen() {
        let board = Board::new();
        assert_eq!(board.to_fen(), START_FEN);
        assert_eq!(board.hash(), Board::from_fen(START_FEN).hash());
    }

    #[test]
    fn test_parse_move() {
        let board = Board::new();
        let mv = board.parse_move("g1f3").unwrap();
        assert_eq!(mv.piece, Piece::Knight);
        assert_eq!(
            board.parse_move("e2"),
            Err(MoveParseError::InvalidLength { len: 2 })
        );
        assert_eq!(
            board.parse_move("z2e4"),
            Err(MoveParseError::InvalidSquare {
                notation: "z2e4".to_string()
            })
        );
        assert_eq!(
            board.parse_move("e2e5"),
            Err(MoveParseError::IllegalMove {
                notation: "e2e5".to_string()
            })
        );
        assert_eq!(
            board.parse_move("e2e4k"),
            Err(MoveParseError::InvalidPromotion { char: 'k' })
        );
    }

    #[test]
    fn test_parse_promotion() {
        let board = Board::from_fen("8/4P2k/8/8/8/8/8/K7 w - - 0 1");
        let mv = board.parse_move("e7e8n").unwrap();
        assert_eq!(mv.promotion, Some(Piece::Knight));
        assert!(board.parse_move("e7e8").is_err());
    }

    #[test]
    fn test_make_move_uci_updates_fen() {
        let mut board = Board::new();
        board.make_move_uci("e2e4").unwrap();
        assert_eq!(
            board.to_fen(),
            "rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq e3 0 1"
        );
        board.make_move_uci("g8f6").unwrap();
        assert_eq!(
            board.to_fen(),
            "rnbqkb1r/pppppppp/5n2/8/4P3/8/PPPP1PPP/RNBQKBNR w KQkq - 1 2"
        );
    }
}
