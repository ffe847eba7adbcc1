//! Game resources
//!
//! State owned by the board, organized into submodules:
//!
//! - `engine` - Rules engine boundary and its shakmaty implementation
//! - `history` - Move history, redo buffer and game status
//! - `session` - The `GameSession` aggregate every UI action goes through
//! - `clipboard` - Export sink for PGN

pub mod clipboard;
pub mod engine;
pub mod history;
pub mod session;

// Re-export all public items for convenience
pub use clipboard::*;
pub use engine::*;
pub use history::*;
pub use session::*;
