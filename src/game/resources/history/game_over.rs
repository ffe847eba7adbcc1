//! Terminal status of the current position
//!
//! Reported by the rules engine after every change of position so the UI can
//! show check/mate/draw feedback and the PGN export can append a result token.
//!
//! # Conditions
//!
//! - **Checkmate**: side to move is in check with no legal moves
//! - **Stalemate**: side to move has no legal moves but is NOT in check
//! - **InsufficientMaterial**: neither side can deliver mate (e.g. K vs K)

use shakmaty::Color;

/// Status of the position currently on the board
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum GameStatus {
    /// Game is still in progress, side to move is not in check
    #[default]
    Ongoing,

    /// Side to move is in check but has a legal reply
    Check,

    /// Side to move is mated
    Checkmate { winner: Color },

    /// Draw by stalemate
    Stalemate,

    /// Draw by insufficient material
    InsufficientMaterial,
}

impl GameStatus {
    /// Check if the game has ended
    ///
    /// # Returns
    ///
    /// - `true` - Checkmate or one of the automatic draws
    /// - `false` - Game can continue (possibly in check)
    pub fn is_game_over(&self) -> bool {
        !matches!(self, GameStatus::Ongoing | GameStatus::Check)
    }

    /// Get a human-readable message describing the status
    pub fn message(&self) -> &'static str {
        match self {
            GameStatus::Ongoing => "Game in progress",
            GameStatus::Check => "Check",
            GameStatus::Checkmate {
                winner: Color::White,
            } => "White wins by checkmate!",
            GameStatus::Checkmate {
                winner: Color::Black,
            } => "Black wins by checkmate!",
            GameStatus::Stalemate => "Draw by stalemate",
            GameStatus::InsufficientMaterial => "Draw by insufficient material",
        }
    }

    /// Get the winner of the game, if there is one
    pub fn winner(&self) -> Option<Color> {
        match self {
            GameStatus::Checkmate { winner } => Some(*winner),
            _ => None,
        }
    }

    /// PGN result token (`1-0`, `0-1`, `1/2-1/2`), `None` while in progress
    pub fn result_token(&self) -> Option<&'static str> {
        match self {
            GameStatus::Checkmate {
                winner: Color::White,
            } => Some("1-0"),
            GameStatus::Checkmate {
                winner: Color::Black,
            } => Some("0-1"),
            GameStatus::Stalemate | GameStatus::InsufficientMaterial => Some("1/2-1/2"),
            GameStatus::Ongoing | GameStatus::Check => None,
        }
    }
}
