//! Rules engine boundary
//!
//! The session never decides chess legality itself. Everything that touches the
//! board (applying a move, taking it back, producing notation) goes through a
//! [`PositionEngine`], which owns the actual position and its move stack.
//!
//! # Ownership
//!
//! The engine is stateful, the same way a single game object in a UI would be:
//! [`PositionEngine::apply`] pushes one ply, [`PositionEngine::undo_last`] pops
//! one. The session mirrors that stack in its own
//! [`MoveHistory`](crate::game::resources::MoveHistory) so both always agree on
//! the ply count.
//!
//! # Implementations
//!
//! - [`ShakmatyEngine`](super::ShakmatyEngine) - production engine backed by
//!   the `shakmaty` crate

use crate::game::resources::history::{GameStatus, MoveRecord};
use shakmaty::{Role, Square};
use std::fmt;

/// Opaque, engine-produced encoding of the full board state
///
/// The session only stores and forwards it; equality of two `PositionFen`
/// values means equality of the positions they describe.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PositionFen(String);

impl PositionFen {
    pub fn new(fen: impl Into<String>) -> Self {
        Self(fen.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PositionFen {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A request to play one ply
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoveRequest {
    /// Drag-and-drop style request
    ///
    /// `promotion` is only consulted when the move actually promotes; a
    /// promoting move without a hint becomes a queen.
    Coordinates {
        from: Square,
        to: Square,
        promotion: Option<Role>,
    },
    /// Standard algebraic notation, check/mate decorations optional
    Notation(String),
}

impl fmt::Display for MoveRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MoveRequest::Coordinates {
                from,
                to,
                promotion: Some(role),
            } => write!(f, "{}{}{}", from, to, role.char()),
            MoveRequest::Coordinates { from, to, .. } => write!(f, "{}{}", from, to),
            MoveRequest::Notation(san) => f.write_str(san),
        }
    }
}

/// Errors reported by a rules engine
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EngineError {
    #[error("cannot load position: {message}")]
    InvalidFen { message: String },

    #[error("cannot serialize game: {message}")]
    Serialization { message: String },
}

/// Capability the session delegates all chess rules to
///
/// Implementations must be `Send + Sync + 'static` so a session holding one
/// can live in the ECS world as a resource.
pub trait PositionEngine: Send + Sync + 'static {
    /// Engine set up at the standard starting position
    fn standard() -> Self
    where
        Self: Sized;

    /// Engine set up at an arbitrary position
    fn from_fen(fen: &str) -> Result<Self, EngineError>
    where
        Self: Sized;

    /// Try to play one ply
    ///
    /// Returns `None` when the move is illegal (or unparseable); the position
    /// is untouched in that case.
    fn apply(&mut self, request: &MoveRequest) -> Option<MoveRecord>;

    /// Take back the most recent ply, returning what was undone
    fn undo_last(&mut self) -> Option<MoveRecord>;

    /// Current position encoding
    fn position(&self) -> PositionFen;

    /// Notation of every ply played since the engine was set up
    fn history(&self) -> Vec<String>;

    /// Whole game as PGN
    fn serialize(&self) -> Result<String, EngineError>;

    /// Check / mate / draw status of the current position
    fn status(&self) -> GameStatus;
}
