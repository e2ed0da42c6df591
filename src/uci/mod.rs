//! Universal Chess Interface (UCI) protocol implementation.
//!
//! Handles communication with chess GUIs following the UCI specification.
//! Search runs synchronously on the input thread, so `stop` and `ponderhit`
//! are not supported; every `go` answers with exactly one `bestmove`.

use std::fmt;
use std::io::{self, BufRead, Write};
use std::time::Instant;

use crate::board::{FenError, MoveParseError};
use crate::engine::{Engine, EngineOptions, PositionError};

pub mod command;
pub mod options;
pub mod report;

use command::{parse_uci_command, GoParams, PositionStart, UciCommand};
use options::{apply_setoption, print_options};
use report::UciReporter;

/// Error type for malformed UCI input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UciError {
    /// Invalid FEN string
    InvalidFen(FenError),
    /// Invalid move in a move list
    InvalidMove(MoveParseError),
    /// Missing required parts in the command
    MissingParts,
    /// `setoption` for an option the engine does not have
    UnknownOption(String),
    /// A value that does not parse for its parameter
    InvalidValue { name: String, value: String },
}

impl fmt::Display for UciError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UciError::InvalidFen(e) => write!(f, "Invalid FEN: {e}"),
            UciError::InvalidMove(e) => write!(f, "Invalid move: {e}"),
            UciError::MissingParts => write!(f, "Missing required parts in command"),
            UciError::UnknownOption(name) => write!(f, "Unknown option '{name}'"),
            UciError::InvalidValue { name, value } => {
                write!(f, "Invalid value '{value}' for {name}")
            }
        }
    }
}

impl std::error::Error for UciError {}

impl From<FenError> for UciError {
    fn from(e: FenError) -> Self {
        UciError::InvalidFen(e)
    }
}

impl From<MoveParseError> for UciError {
    fn from(e: MoveParseError) -> Self {
        UciError::InvalidMove(e)
    }
}

impl From<PositionError> for UciError {
    fn from(e: PositionError) -> Self {
        match e {
            PositionError::Fen(e) => UciError::InvalidFen(e),
            PositionError::Move(e) => UciError::InvalidMove(e),
        }
    }
}

/// One GUI connection: an engine plus the stream answers are written to.
pub struct UciSession<W: Write> {
    engine: Engine,
    out: W,
}

impl<W: Write> UciSession<W> {
    pub fn new(engine: Engine, out: W) -> Self {
        UciSession { engine, out }
    }

    #[must_use]
    pub fn engine(&self) -> &Engine {
        &self.engine
    }

    /// Handle one input line. Returns `Ok(false)` after `quit`.
    ///
    /// Malformed input never ends the session: it is logged and reported as
    /// an `info string` line.
    pub fn handle_line(&mut self, line: &str) -> io::Result<bool> {
        let keep_going = match parse_uci_command(line) {
            Ok(None) => true,
            Ok(Some(cmd)) => self.execute(cmd)?,
            Err(err) => {
                self.report_error(&err)?;
                true
            }
        };
        self.out.flush()?;
        Ok(keep_going)
    }

    fn report_error(&mut self, err: &UciError) -> io::Result<()> {
        log::warn!("rejected input: {err}");
        writeln!(self.out, "info string {err}")
    }

    fn execute(&mut self, cmd: UciCommand) -> io::Result<bool> {
        match cmd {
            UciCommand::Uci => print_options(&mut self.out, self.engine.options())?,
            UciCommand::IsReady => writeln!(self.out, "readyok")?,
            UciCommand::UciNewGame => self.engine.new_game(),
            UciCommand::Position { start, moves } => {
                let moves: Vec<&str> = moves.iter().map(String::as_str).collect();
                let result = match start {
                    PositionStart::StartPos => self.engine.set_start_position(&moves),
                    PositionStart::Fen(fen) => self.engine.set_position(&fen, &moves),
                };
                if let Err(err) = result {
                    self.report_error(&UciError::from(err))?;
                }
            }
            UciCommand::Go(params) => self.go(params)?,
            UciCommand::SetOption { name, value } => {
                if let Err(err) = apply_setoption(&mut self.engine, &name, value.as_deref()) {
                    self.report_error(&err)?;
                }
            }
            UciCommand::Eval => writeln!(self.out, "info string eval {}", self.engine.evaluate())?,
            UciCommand::Fen => writeln!(self.out, "{}", self.engine.fen())?,
            UciCommand::Display => {
                write!(self.out, "{}", self.engine.board().diagram())?;
                writeln!(self.out, "Fen: {}", self.engine.fen())?;
            }
            UciCommand::Quit => return Ok(false),
            UciCommand::Unknown(text) => log::debug!("ignoring unknown command '{text}'"),
        }
        Ok(true)
    }

    fn go(&mut self, params: GoParams) -> io::Result<()> {
        if let Some(depth) = params.perft {
            return self.perft(depth);
        }

        let limits = params.limits(self.engine.board().side_to_move());
        let result = {
            let mut reporter = UciReporter::new(&mut self.out);
            self.engine.best_move(&limits, &mut reporter)
        };
        match result.best_move {
            Some(mv) => writeln!(self.out, "bestmove {mv}"),
            None => writeln!(self.out, "bestmove 0000"),
        }
    }

    fn perft(&mut self, depth: usize) -> io::Result<()> {
        let start = Instant::now();
        let counts = self.engine.perft_divide(depth);
        let total: u64 = counts.iter().map(|(_, n)| n).sum();
        for (mv, nodes) in &counts {
            writeln!(self.out, "{mv}: {nodes}")?;
        }
        writeln!(self.out)?;
        writeln!(self.out, "Nodes searched: {total}")?;
        writeln!(
            self.out,
            "info string perft depth {depth} nodes {total} time {}",
            start.elapsed().as_millis()
        )
    }
}

/// Run the protocol over arbitrary streams until `quit` or end of input.
pub fn run<R: BufRead, W: Write>(input: R, out: W, options: EngineOptions) -> io::Result<()> {
    let mut session = UciSession::new(Engine::new(options), out);
    for line in input.lines() {
        if !session.handle_line(&line?)? {
            break;
        }
    }
    Ok(())
}

/// Run the protocol on stdin/stdout.
pub fn run_uci_loop() -> io::Result<()> {
    let stdin = io::stdin();
    let stdout = io::stdout();
    run(stdin.lock(), stdout.lock(), EngineOptions::default())
}
