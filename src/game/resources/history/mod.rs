//! Game history and status tracking
//!
//! Manages the move history with its redo buffer, and the terminal status of
//! the current position.

pub mod game_over;
pub mod history;

// Re-export all public items
pub use game_over::*;
pub use history::*;
