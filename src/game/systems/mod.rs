//! Board systems - ECS glue between UI messages and the session
//!
//! - [`board_commands`] - Drains `BoardCommand`, mutates `GameSession`,
//!   answers with `BoardUpdated`

pub mod board_commands;

pub use board_commands::*;
