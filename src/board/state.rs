use super::piece_list::PieceList;
use super::types::{Bitboard, CastlingRights, Color, Move, Piece, Square};
use crate::zobrist::ZobristHash;

pub const START_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

/// Initial capacity of the undo and history stacks; enough for any game
/// plus the deepest search line without reallocating.
pub(crate) const HISTORY_CAPACITY: usize = 1024;

/// State that cannot be recovered from a move alone, saved before every
/// `make_move` and restored by the matching `unmake_move`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct UndoState {
    pub(crate) castling_rights: CastlingRights,
    pub(crate) en_passant_target: Option<Square>,
    pub(crate) halfmove_clock: u32,
}

#[derive(Clone, Debug)]
pub struct Board {
    pub(crate) pieces: [[Bitboard; 6]; 2],
    pub(crate) occupied: [Bitboard; 2],
    pub(crate) all_occupied: Bitboard,
    pub(crate) mailbox: [Option<(Color, Piece)>; 64],
    pub(crate) piece_lists: [[PieceList; 6]; 2],
    pub(crate) side_to_move: Color,
    pub(crate) castling_rights: CastlingRights,
    pub(crate) en_passant_target: Option<Square>,
    pub(crate) halfmove_clock: u32,
    pub(crate) fullmove_number: u32,
    pub(crate) hash: ZobristHash,
    pub(crate) undo_stack: Vec<UndoState>,
    // hash of every position before the current one, oldest first
    pub(crate) hash_history: Vec<u64>,
    pub(crate) move_history: Vec<Move>,
    pub(crate) normal_start: bool,
}

impl Board {
    /// Board in the standard starting position
    #[must_use]
    pub fn new() -> Self {
        let mut board = Board::empty();
        let back_rank = [
            Piece::Rook,
            Piece::Knight,
            Piece::Bishop,
            Piece::Queen,
            Piece::King,
            Piece::Bishop,
            Piece::Knight,
            Piece::Rook,
        ];
        for (file, &piece) in back_rank.iter().enumerate() {
            let file = file as u8;
            board.put_piece(Color::White, piece, Square(file));
            board.put_piece(Color::White, Piece::Pawn, Square(8 + file));
            board.put_piece(Color::Black, Piece::Pawn, Square(48 + file));
            board.put_piece(Color::Black, piece, Square(56 + file));
        }
        board.castling_rights = CastlingRights::all();
        board.hash.set(board.compute_hash());
        board.normal_start = true;
        board
    }

    pub(crate) fn empty() -> Self {
        Board {
            pieces: [[Bitboard::EMPTY; 6]; 2],
            occupied: [Bitboard::EMPTY; 2],
            all_occupied: Bitboard::EMPTY,
            mailbox: [None; 64],
            piece_lists: Default::default(),
            side_to_move: Color::White,
            castling_rights: CastlingRights::none(),
            en_passant_target: None,
            halfmove_clock: 0,
            fullmove_number: 1,
            hash: ZobristHash::default(),
            undo_stack: Vec::with_capacity(HISTORY_CAPACITY),
            hash_history: Vec::with_capacity(HISTORY_CAPACITY),
            move_history: Vec::with_capacity(HISTORY_CAPACITY),
            normal_start: false,
        }
    }

    // Mutation primitives. Each keeps bitboards, mailbox, piece lists and
    // hash in step.

    #[inline]
    pub(crate) fn put_piece(&mut self, color: Color, piece: Piece, sq: Square) {
        let bit = Bitboard::from_square(sq);
        self.pieces[color.index()][piece.index()] |= bit;
        self.occupied[color.index()] |= bit;
        self.all_occupied |= bit;
        self.mailbox[sq.index()] = Some((color, piece));
        self.piece_lists[color.index()][piece.index()].add(sq);
        self.hash.change_piece(color, piece, sq);
    }

    #[inline]
    pub(crate) fn remove_piece(&mut self, color: Color, piece: Piece, sq: Square) {
        let bit = Bitboard::from_square(sq);
        self.pieces[color.index()][piece.index()] ^= bit;
        self.occupied[color.index()] ^= bit;
        self.all_occupied ^= bit;
        self.mailbox[sq.index()] = None;
        self.piece_lists[color.index()][piece.index()].remove(sq);
        self.hash.change_piece(color, piece, sq);
    }

    #[inline]
    pub(crate) fn relocate_piece(&mut self, color: Color, piece: Piece, from: Square, to: Square) {
        let bits = Bitboard::from_square(from) | Bitboard::from_square(to);
        self.pieces[color.index()][piece.index()] ^= bits;
        self.occupied[color.index()] ^= bits;
        self.all_occupied ^= bits;
        self.mailbox[from.index()] = None;
        self.mailbox[to.index()] = Some((color, piece));
        self.piece_lists[color.index()][piece.index()].relocate(from, to);
        self.hash.move_piece(color, piece, from, to);
    }

    /// Hash computed from scratch by scanning the position.
    #[must_use]
    pub fn compute_hash(&self) -> u64 {
        let mut hash = ZobristHash::default();
        for (idx, slot) in self.mailbox.iter().enumerate() {
            if let Some((color, piece)) = *slot {
                hash.change_piece(color, piece, Square(idx as u8));
            }
        }
        if self.side_to_move == Color::Black {
            hash.change_turn();
        }
        for side in super::CastleSide::ALL {
            if self.castling_rights.has(side) {
                hash.change_castling(side);
            }
        }
        if let Some(ep) = self.en_passant_target {
            hash.change_en_passant(ep);
        }
        hash.key()
    }

    #[inline]
    #[must_use]
    pub fn hash(&self) -> u64 {
        self.hash.key()
    }

    #[inline]
    #[must_use]
    pub fn side_to_move(&self) -> Color {
        self.side_to_move
    }

    #[inline]
    #[must_use]
    pub fn white_to_move(&self) -> bool {
        self.side_to_move == Color::White
    }

    #[inline]
    #[must_use]
    pub fn piece_at(&self, sq: Square) -> Option<(Color, Piece)> {
        self.mailbox[sq.index()]
    }

    #[inline]
    #[must_use]
    pub fn pieces_of(&self, color: Color, piece: Piece) -> Bitboard {
        self.pieces[color.index()][piece.index()]
    }

    #[inline]
    #[must_use]
    pub fn occupied_by(&self, color: Color) -> Bitboard {
        self.occupied[color.index()]
    }

    #[inline]
    #[must_use]
    pub fn occupied(&self) -> Bitboard {
        self.all_occupied
    }

    #[inline]
    #[must_use]
    pub fn piece_list(&self, color: Color, piece: Piece) -> &PieceList {
        &self.piece_lists[color.index()][piece.index()]
    }

    /// Number of pieces of one colored kind
    #[inline]
    #[must_use]
    pub fn piece_count(&self, color: Color, piece: Piece) -> usize {
        self.piece_list(color, piece).len()
    }

    /// King square. FEN loading guarantees exactly one king per side.
    #[inline]
    #[must_use]
    pub fn king_square(&self, color: Color) -> Square {
        self.piece_list(color, Piece::King)
            .first()
            .unwrap_or(Square(0))
    }

    #[inline]
    #[must_use]
    pub fn castling_rights(&self) -> CastlingRights {
        self.castling_rights
    }

    #[inline]
    #[must_use]
    pub fn en_passant_target(&self) -> Option<Square> {
        self.en_passant_target
    }

    #[inline]
    #[must_use]
    pub fn halfmove_clock(&self) -> u32 {
        self.halfmove_clock
    }

    #[inline]
    #[must_use]
    pub fn fullmove_number(&self) -> u32 {
        self.fullmove_number
    }

    /// Moves played since the position was loaded
    #[inline]
    #[must_use]
    pub fn move_history(&self) -> &[Move] {
        &self.move_history
    }

    /// True if the game started from the standard initial position
    #[inline]
    #[must_use]
    pub fn is_normal_start(&self) -> bool {
        self.normal_start
    }

    /// Plain-text diagram, rank 8 first
    #[must_use]
    pub fn diagram(&self) -> String {
        let mut out = String::new();
        for rank in (0..8u8).rev() {
            out.push(char::from(b'1' + rank));
            out.push(' ');
            for file in 0..8u8 {
                let ch = match self.mailbox[(rank * 8 + file) as usize] {
                    Some((color, piece)) => piece.to_fen_char(color),
                    None => '.',
                };
                out.push(ch);
                out.push(' ');
            }
            out.push('\n');
        }
        out.push_str("  a b c d e f g h\n");
        out
    }
}

impl Default for Board {
    fn default() -> Self {
        Board::new()
    }
}
