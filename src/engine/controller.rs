//! Engine controller implementation.

use std::fmt;

use super::options::{
    EngineOptions, MAX_HASH_MB, MAX_MOVE_OVERHEAD_MS, MAX_REPETITION_THRESHOLD, MIN_HASH_MB,
    MIN_REPETITION_THRESHOLD,
};
use super::time::{SearchLimits, TimeControl};
use crate::board::search::{self, Evaluator, MaterialEvaluator, SearchReporter, SearchResult};
use crate::board::{Board, FenError, GameState, Move, MoveParseError};
use crate::book::{BookTree, OpeningBook};
use crate::tt::TranspositionTable;

/// Failure to set up a position from FEN plus a move list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PositionError {
    Fen(FenError),
    Move(MoveParseError),
}

impl fmt::Display for PositionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PositionError::Fen(err) => write!(f, "bad position: {err}"),
            PositionError::Move(err) => write!(f, "bad move list: {err}"),
        }
    }
}

impl std::error::Error for PositionError {}

impl From<FenError> for PositionError {
    fn from(err: FenError) -> Self {
        PositionError::Fen(err)
    }
}

impl From<MoveParseError> for PositionError {
    fn from(err: MoveParseError) -> Self {
        PositionError::Move(err)
    }
}

/// Single-threaded engine: one position, one table, one search at a time.
pub struct Engine {
    board: Board,
    tt: TranspositionTable,
    evaluator: Box<dyn Evaluator>,
    book: Option<Box<dyn OpeningBook>>,
    options: EngineOptions,
}

impl Default for Engine {
    fn default() -> Self {
        Self::new(EngineOptions::default())
    }
}

impl Engine {
    /// Engine with the material evaluator and the built-in book.
    #[must_use]
    pub fn new(options: EngineOptions) -> Self {
        Self::with_parts(
            options,
            Box::new(MaterialEvaluator),
            Some(Box::new(BookTree::builtin())),
        )
    }

    #[must_use]
    pub fn with_parts(
        options: EngineOptions,
        evaluator: Box<dyn Evaluator>,
        book: Option<Box<dyn OpeningBook>>,
    ) -> Self {
        let hash_mb = options.hash_mb.clamp(MIN_HASH_MB, MAX_HASH_MB);
        Engine {
            board: Board::new(),
            tt: TranspositionTable::new(hash_mb),
            evaluator,
            book,
            options,
        }
    }

    #[must_use]
    pub fn board(&self) -> &Board {
        &self.board
    }

    #[must_use]
    pub fn options(&self) -> &EngineOptions {
        &self.options
    }

    /// Set up `fen` and play `moves` on it. On error the current position is
    /// left untouched.
    pub fn set_position(&mut self, fen: &str, moves: &[&str]) -> Result<(), PositionError> {
        let board = Board::try_from_fen(fen)?;
        self.play_line(board, moves)
    }

    /// Standard start position followed by `moves`.
    pub fn set_start_position(&mut self, moves: &[&str]) -> Result<(), PositionError> {
        self.play_line(Board::new(), moves)
    }

    fn play_line(&mut self, mut board: Board, moves: &[&str]) -> Result<(), PositionError> {
        for text in moves {
            board.make_move_uci(text)?;
        }
        self.board = board;
        Ok(())
    }

    /// Play one coordinate move on the current position.
    pub fn make_move(&mut self, text: &str) -> Result<Move, MoveParseError> {
        self.board.make_move_uci(text)
    }

    /// Take back the last move played, if any.
    pub fn unmake_move(&mut self) -> Option<Move> {
        let mv = *self.board.move_history().last()?;
        self.board.unmake_move(mv);
        Some(mv)
    }

    /// Forget everything learned in the previous game.
    pub fn new_game(&mut self) {
        self.tt.clear();
        self.board = Board::new();
        log::info!("new game, transposition table cleared");
    }

    pub fn set_hash(&mut self, mb: usize) {
        let mb = mb.clamp(MIN_HASH_MB, MAX_HASH_MB);
        self.options.hash_mb = mb;
        self.tt.resize(mb);
        log::info!("hash resized to {mb} MB ({} entries)", self.tt.len());
    }

    pub fn set_own_book(&mut self, enabled: bool) {
        self.options.own_book = enabled;
    }

    pub fn set_move_overhead(&mut self, ms: u64) {
        self.options.move_overhead_ms = ms.min(MAX_MOVE_OVERHEAD_MS);
    }

    pub fn set_repetition_threshold(&mut self, threshold: usize) {
        self.options.repetition_threshold =
            threshold.clamp(MIN_REPETITION_THRESHOLD, MAX_REPETITION_THRESHOLD);
    }

    /// Book move for the current position, validated against the legal moves.
    fn book_move(&mut self) -> Option<Move> {
        if !self.options.own_book || !self.board.is_normal_start() {
            return None;
        }
        let text = self.book.as_mut()?.find_move(self.board.move_history())?;
        match self.board.parse_move(&text) {
            Ok(mv) => Some(mv),
            Err(err) => {
                log::warn!("book suggested unusable move {text}: {err}");
                None
            }
        }
    }

    /// Choose a move for the side to move.
    ///
    /// A book hit returns immediately; otherwise the limits are resolved to a
    /// single time control and the position is searched. The move is `None`
    /// only when there is no legal move.
    pub fn best_move(
        &mut self,
        limits: &SearchLimits,
        reporter: &mut dyn SearchReporter,
    ) -> SearchResult {
        if let Some(mv) = self.book_move() {
            log::info!("book move {mv}");
            return SearchResult {
                best_move: Some(mv),
                score: 0,
                depth: 0,
                nodes: 0,
                pv: vec![mv],
            };
        }

        let control = TimeControl::from_limits(limits);
        let time_limit = control.time_limit(&self.options.time_config());
        let max_depth = control.depth_limit().unwrap_or(self.options.max_depth);
        log::debug!("searching with {control:?}, budget {time_limit:?}");

        let params = self.options.search_params();
        search::search(
            &mut self.board,
            &mut self.tt,
            self.evaluator.as_ref(),
            &params,
            max_depth,
            time_limit,
            reporter,
        )
    }

    /// Static evaluation from the side to move's perspective.
    #[must_use]
    pub fn evaluate(&self) -> i32 {
        self.evaluator.evaluate(&self.board)
    }

    #[must_use]
    pub fn state(&self) -> GameState {
        self.board.state()
    }

    #[must_use]
    pub fn fen(&self) -> String {
        self.board.to_fen()
    }

    pub fn perft_divide(&mut self, depth: usize) -> Vec<(Move, u64)> {
        self.board.perft_divide(depth)
    }
}
