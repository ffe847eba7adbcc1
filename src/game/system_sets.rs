//! System organization using SystemSets
//!
//! The session is mutated in exactly one place each frame. Anything that
//! writes board commands (input, menus) runs before it; anything that reads
//! the session or `BoardUpdated` (rendering, status line) runs after it.
//!
//! # Execution Order
//!
//! 1. **Input** - Turn user input into `BoardCommand`s
//! 2. **Session** - Apply commands to `GameSession`
//! 3. **Feedback** - React to `BoardUpdated`

use bevy::ecs::schedule::SystemSet;

/// System execution order for board interaction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, SystemSet)]
pub enum GameSystems {
    /// Systems that write `BoardCommand`
    Input,

    /// The single writer of `GameSession`
    Session,

    /// Systems that read `BoardUpdated`
    Feedback,
}
