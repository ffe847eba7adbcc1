//! Chess opening and puzzle trainer
//!
//! - [`game`] - The game session (freeform, opening replay, puzzles) and its Bevy plugin
//! - [`catalog`] - Built-in openings and puzzles
//! - [`networking`] - Resilient backend client, connection monitor, saved games
//! - [`core`] - Settings, logging, core errors

pub mod catalog;
pub mod core;
pub mod game;
pub mod networking;

pub use catalog::{Catalog, Opening, Puzzle};
pub use game::{GameError, GamePlugin, GameSession};
