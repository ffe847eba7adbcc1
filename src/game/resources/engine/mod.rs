//! Rules engine resources
//!
//! The engine boundary trait and its shakmaty-backed implementation.

pub mod engine;
pub mod shakmaty_engine;

// Re-export all public items
pub use engine::*;
pub use shakmaty_engine::*;
