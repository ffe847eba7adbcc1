//! Chess game logic module - the session aggregate and its ECS integration
//!
//! # Module Organization
//!
//! - `resources` - `GameSession`, the rules engine boundary, move history, export sink
//! - `rules` - Mode policies (opening replay, puzzle validation)
//! - `events` - `BoardCommand` in, `BoardUpdated` out
//! - `systems` - The system applying board commands
//! - `plugin` - `GamePlugin` registering everything with an `App`
//! - `error` - `GameError` and the mode violation reasons
//!
//! # Data Flow
//!
//! ```text
//! UI ──BoardCommand──▶ handle_board_commands ──▶ GameSession ──▶ PositionEngine
//!  ▲                                                  │
//!  └──────────────────── BoardUpdated ◀───────────────┘
//! ```
//!
//! The session is usable without Bevy too: every command has a plain method
//! on `GameSession`, which is how the CLI and most tests drive it.

pub mod error;
pub mod events;
pub mod plugin;
pub mod resources;
pub mod rules;
pub mod system_sets;
pub mod systems;

// Re-export the plugin and session (main entry points)
pub use error::{GameError, GameResult, ModeViolation};
pub use plugin::GamePlugin;
pub use resources::GameSession;
