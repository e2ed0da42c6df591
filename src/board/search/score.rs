//! Mate-distance aware score helpers.

use super::constants::{MATE_SCORE, MATE_WINDOW};

/// True if `score` encodes a forced mate for either side.
#[inline]
#[must_use]
pub fn is_mate(score: i32) -> bool {
    score.abs() > MATE_SCORE - MATE_WINDOW
}

/// Score for the side to move being mated `ply` plies from the root.
#[inline]
#[must_use]
pub fn mated_in(ply: u32) -> i32 {
    -(MATE_SCORE - ply as i32)
}

/// Convert a root-relative mate score into one relative to a node `ply`
/// plies deep, for storing in the transposition table.
#[inline]
#[must_use]
pub fn to_tt(score: i32, ply: u32) -> i32 {
    if is_mate(score) {
        score + score.signum() * ply as i32
    } else {
        score
    }
}

/// Inverse of `to_tt`: convert a stored node-relative mate score back into
/// one relative to the root of the current search.
#[inline]
#[must_use]
pub fn from_tt(score: i32, ply: u32) -> i32 {
    if is_mate(score) {
        score - score.signum() * ply as i32
    } else {
        score
    }
}

/// Moves (not plies) until mate, signed by the winning side.
#[must_use]
pub fn mate_in_moves(score: i32) -> i32 {
    let plies = MATE_SCORE - score.abs();
    let moves = (plies + 1) / 2;
    if score > 0 {
        moves
    } else {
        -moves
    }
}

/// Score in UCI form: `cp N` or `mate N`.
#[must_use]
pub fn format_score(score: i32) -> String {
    if is_mate(score) {
        format!("mate {}", mate_in_moves(score))
    } else {
        format!("cp {score}")
    }
}
