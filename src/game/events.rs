//! Board messages - the UI-facing side of the session
//!
//! The UI never touches [`GameSession`](crate::game::resources::GameSession)
//! directly. It writes [`BoardCommand`]s; the game plugin applies them in
//! order and answers each one with a [`BoardUpdated`].

use crate::catalog::{Opening, Puzzle};
use crate::game::resources::PositionFen;
use bevy::ecs::message::Message;
use shakmaty::{Role, Square};

/// One user action on the board or its controls
#[derive(Message, Debug, Clone)]
pub enum BoardCommand {
    /// Enter Replay mode for an opening
    LoadOpening(Opening),
    /// Enter Puzzle mode for a puzzle
    LoadPuzzle(Puzzle),
    /// Piece dragged from one square to another
    DropPiece {
        from: Square,
        to: Square,
        promotion: Option<Role>,
    },
    StepForward,
    StepBack,
    Undo,
    Redo,
    Reset,
    /// Copy the game as PGN to the in-app clipboard
    Export,
    FlipBoard,
}

/// Session state after a command was applied
#[derive(Message, Debug, Clone, PartialEq, Eq)]
pub struct BoardUpdated {
    /// Position to render
    pub position: PositionFen,
    /// Feedback text for the status line
    pub status: String,
    /// `false` when the command was refused or was a no-op
    pub accepted: bool,
}
