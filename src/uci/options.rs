//! UCI options: advertisement and `setoption` handling.

use std::io::{self, Write};

use super::UciError;
use crate::engine::{
    Engine, EngineOptions, MAX_HASH_MB, MAX_MOVE_OVERHEAD_MS, MAX_REPETITION_THRESHOLD, MIN_HASH_MB,
    MIN_REPETITION_THRESHOLD,
};

pub const ENGINE_NAME: &str = "Quint";
pub const ENGINE_AUTHOR: &str = "the Quint developers";

/// Reply to `uci`: identity, options, `uciok`.
pub fn print_options<W: Write>(out: &mut W, options: &EngineOptions) -> io::Result<()> {
    writeln!(out, "id name {ENGINE_NAME}")?;
    writeln!(out, "id author {ENGINE_AUTHOR}")?;
    writeln!(out)?;
    writeln!(
        out,
        "option name Hash type spin default {} min {MIN_HASH_MB} max {MAX_HASH_MB}",
        options.hash_mb
    )?;
    writeln!(
        out,
        "option name OwnBook type check default {}",
        options.own_book
    )?;
    writeln!(
        out,
        "option name Move Overhead type spin default {} min 0 max {MAX_MOVE_OVERHEAD_MS}",
        options.move_overhead_ms
    )?;
    writeln!(
        out,
        "option name Repetition Threshold type spin default {} min {MIN_REPETITION_THRESHOLD} max {MAX_REPETITION_THRESHOLD}",
        options.repetition_threshold
    )?;
    writeln!(out, "uciok")
}

fn parse_number<T: std::str::FromStr>(name: &str, value: Option<&str>) -> Result<T, UciError> {
    let value = value.ok_or(UciError::MissingParts)?;
    value.trim().parse().map_err(|_| UciError::InvalidValue {
        name: name.to_string(),
        value: value.to_string(),
    })
}

fn parse_check(name: &str, value: Option<&str>) -> Result<bool, UciError> {
    let value = value.ok_or(UciError::MissingParts)?;
    match value.trim().to_ascii_lowercase().as_str() {
        "true" => Ok(true),
        "false" => Ok(false),
        _ => Err(UciError::InvalidValue {
            name: name.to_string(),
            value: value.to_string(),
        }),
    }
}

/// Apply `setoption name <name> value <value>` to the engine.
pub fn apply_setoption(engine: &mut Engine, name: &str, value: Option<&str>) -> Result<(), UciError> {
    let normalized = name.trim().to_ascii_lowercase();
    match normalized.as_str() {
        "hash" => {
            let mb: usize = parse_number(name, value)?;
            if mb != engine.options().hash_mb {
                engine.set_hash(mb);
            }
        }
        "ownbook" => engine.set_own_book(parse_check(name, value)?),
        "move overhead" => engine.set_move_overhead(parse_number(name, value)?),
        "repetition threshold" => engine.set_repetition_threshold(parse_number(name, value)?),
        _ => return Err(UciError::UnknownOption(name.to_string())),
    }
    Ok(())
}
