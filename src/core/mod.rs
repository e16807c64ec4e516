//! Core game types and logic (grid, input, session).
//!
//! Re-exports:
//! - `maze`: Grid model, backtracker carving and goal placement
//! - `player`: Player pose and movement tuning
//! - `input`: Held-key snapshot and input source trait
//! - `session`: Level session and per-frame navigation loop

pub mod input;
pub mod maze;
pub mod player;
pub mod session;
