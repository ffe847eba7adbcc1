//! Error types for game module
//!
//! Every failure a board interaction can produce. All of them are recoverable
//! at the point of origin: the session is left unchanged (or rolled back) and
//! the error's `Display` text becomes the status message shown to the player.

use crate::game::resources::EngineError;

/// Why a move was refused by the current interaction mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ModeViolation {
    /// Free moves are locked until the opening line has been stepped through
    #[error("Step through the opening first or reset to play freely")]
    ReplayUnfinished,

    /// Every move of the solution has already been played
    #[error("Puzzle already solved, load another one or reset")]
    PuzzleSolved,
}

/// Errors that can occur in game logic
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GameError {
    /// The rules engine refused the move
    #[error("Illegal move")]
    IllegalMove { attempted: String },

    /// The move was refused by mode gating, not by chess rules
    #[error("{reason}")]
    ModeViolation { reason: ModeViolation },

    /// Legal move that does not follow the puzzle solution; already rolled back
    #[error("Wrong move, try again")]
    WrongSolutionMove { played: String, expected: String },

    /// A stored opening line contains a move that is illegal in context
    #[error("Invalid opening move {notation} at ply {ply}")]
    ScriptCorruption { ply: usize, notation: String },

    /// The game could not be rendered as PGN
    #[error("Failed to export game: {message}")]
    Serialization { message: String },

    /// A catalog position could not be loaded
    #[error("Invalid position: {message}")]
    InvalidPosition { message: String },
}

impl From<ModeViolation> for GameError {
    fn from(reason: ModeViolation) -> Self {
        GameError::ModeViolation { reason }
    }
}

impl From<EngineError> for GameError {
    fn from(err: EngineError) -> Self {
        match err {
            EngineError::InvalidFen { message } => GameError::InvalidPosition { message },
            EngineError::Serialization { message } => GameError::Serialization { message },
        }
    }
}

/// Result type alias for game operations
pub type GameResult<T> = Result<T, GameError>;
