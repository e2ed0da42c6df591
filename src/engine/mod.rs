//! Engine controller owning the game position and search state.
//!
//! The protocol layer talks to `Engine` only: it sets positions, applies
//! moves, asks for a best move under some limits and changes options.

mod controller;
mod options;
pub mod time;

pub use controller::{Engine, PositionError};
pub use options::{
    EngineOptions, MAX_HASH_MB, MAX_MOVE_OVERHEAD_MS, MAX_REPETITION_THRESHOLD, MIN_HASH_MB,
    MIN_REPETITION_THRESHOLD,
};
pub use time::{SearchLimits, TimeConfig, TimeControl};
