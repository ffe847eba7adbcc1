//! Mode policies - how a move is judged in each session mode
//!
//! The rules engine decides whether a move is legal. This module decides
//! whether a legal move is *allowed* right now, which depends on the mode the
//! session is in.
//!
//! # Architecture
//!
//! Each policy keeps its state type next to the `impl GameSession` block that
//! drives it, so the session itself stays a thin router:
//! - **Replay** steps through a fixed opening script and locks free moves
//!   until the script is finished
//! - **Puzzle** accepts only the next solution move and rolls back anything else
//!
//! # Module Structure
//!
//! - `replay` - `ReplayState`, `step_forward`, `step_back`
//! - `puzzle` - `PuzzleState`, SAN normalization, solution checking

pub mod puzzle;
pub mod replay;

#[cfg(test)]
mod tests;

// Re-export commonly used items
pub use puzzle::{moves_match, normalize_san, PuzzleState};
pub use replay::ReplayState;
