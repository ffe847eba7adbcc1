//! Move history tracking
//!
//! Maintains the chronological record of every ply applied to the session's
//! position, plus the redo buffer of plies taken back. This enables:
//!
//! - **Undo/Redo**: Step back through the game and forward again
//! - **PGN Export**: The engine serializes exactly the plies listed here
//! - **Move List**: The UI renders [`MoveHistory::sans`] as the move list
//! - **Saving**: Out-of-session saving reads the history as a snapshot
//!
//! # Architecture
//!
//! `MoveHistory` stores two sequences:
//! - `moves`: applied plies in play order, append-only during play
//! - `redo`: undone plies, most recently undone first
//!
//! The redo buffer is only meaningful right after one or more consecutive
//! undos. The session clears it as soon as a new ply is played.
//!
//! # Integration
//!
//! Owned by [`crate::game::resources::GameSession`]; never mutated from
//! anywhere else, so the ply count always matches the engine's own stack.

use crate::game::resources::engine::{MoveRequest, PositionFen};
use shakmaty::{Role, Square};
use std::collections::VecDeque;

/// One applied ply
///
/// # Fields
///
/// - `san`: Standard algebraic notation as produced by the engine (with `+`/`#`)
/// - `from`/`to`: Origin and destination squares (king's destination for castling)
/// - `promotion`: Promotion piece, if the ply promoted
/// - `position`: Position after the ply
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveRecord {
    pub san: String,
    pub from: Square,
    pub to: Square,
    pub promotion: Option<Role>,
    pub position: PositionFen,
}

impl MoveRecord {
    /// The request that replays exactly this ply
    pub fn request(&self) -> MoveRequest {
        MoveRequest::Coordinates {
            from: self.from,
            to: self.to,
            promotion: self.promotion,
        }
    }
}

/// Applied plies and the redo buffer for the current session
///
/// # Examples
///
/// ## Recording moves
///
/// ```rust,ignore
/// if let Some(record) = engine.apply(&request) {
///     history.clear_redo();
///     history.add_move(record);
/// }
/// ```
///
/// ## Taking a move back
///
/// ```rust,ignore
/// if let Some(record) = history.pop_move() {
///     history.push_undone(record);
/// }
/// ```
#[derive(Debug, Default, Clone)]
pub struct MoveHistory {
    /// Chronological list of all plies since the session was created
    ///
    /// Index 0 = first ply played from the session's starting position
    moves: Vec<MoveRecord>,

    /// Plies taken back, most recently undone at the front
    redo: VecDeque<MoveRecord>,
}

impl MoveHistory {
    /// Add a new ply to the history
    ///
    /// Does not touch the redo buffer; the caller decides whether the ply is a
    /// new move (clear redo) or a redone one (already taken from the buffer).
    pub fn add_move(&mut self, record: MoveRecord) {
        self.moves.push(record);
    }

    /// Remove and return the most recent ply
    pub fn pop_move(&mut self) -> Option<MoveRecord> {
        self.moves.pop()
    }

    /// Get the most recent ply, if any
    ///
    /// # Returns
    ///
    /// - `Some(&MoveRecord)` - Reference to the last ply played
    /// - `None` - Nothing played since the session started
    pub fn last_move(&self) -> Option<&MoveRecord> {
        self.moves.last()
    }

    /// Number of plies played
    pub fn len(&self) -> usize {
        self.moves.len()
    }

    /// Check if no ply has been played yet
    pub fn is_empty(&self) -> bool {
        self.moves.is_empty()
    }

    /// All applied plies as a slice
    pub fn moves(&self) -> &[MoveRecord] {
        &self.moves
    }

    /// Notation of every applied ply, in play order
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// // After 1. e4 e5 2. Nf3
    /// assert_eq!(history.sans(), vec!["e4", "e5", "Nf3"]);
    /// ```
    pub fn sans(&self) -> Vec<String> {
        self.moves.iter().map(|record| record.san.clone()).collect()
    }

    /// Put an undone ply at the front of the redo buffer
    pub fn push_undone(&mut self, record: MoveRecord) {
        self.redo.push_front(record);
    }

    /// The ply [`Self::take_redo`] would return, without removing it
    pub fn peek_redo(&self) -> Option<&MoveRecord> {
        self.redo.front()
    }

    /// Remove and return the most recently undone ply
    pub fn take_redo(&mut self) -> Option<MoveRecord> {
        self.redo.pop_front()
    }

    /// Drop every undone ply (a new move supersedes them)
    pub fn clear_redo(&mut self) {
        self.redo.clear();
    }

    /// Number of plies waiting in the redo buffer
    pub fn redo_len(&self) -> usize {
        self.redo.len()
    }

    /// Clear history and redo buffer (for starting a new game)
    pub fn clear(&mut self) {
        self.moves.clear();
        self.redo.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(san: &str, from: Square, to: Square) -> MoveRecord {
        MoveRecord {
            san: san.to_string(),
            from,
            to,
            promotion: None,
            position: PositionFen::new(format!("after {san}")),
        }
    }

    #[test]
    fn test_move_history_default() {
        //! Verifies MoveHistory starts empty
        let history = MoveHistory::default();

        assert!(history.is_empty());
        assert_eq!(history.len(), 0);
        assert_eq!(history.redo_len(), 0);
        assert!(history.last_move().is_none());
    }

    #[test]
    fn test_last_move_returns_correct_move() {
        let mut history = MoveHistory::default();
        history.add_move(record("e4", Square::E2, Square::E4));
        history.add_move(record("Nc6", Square::B8, Square::C6));

        let last = history.last_move().unwrap();
        assert_eq!(last.san, "Nc6");
        assert_eq!(last.from, Square::B8);
        assert_eq!(history.sans(), vec!["e4", "Nc6"]);
    }

    #[test]
    fn test_redo_buffer_is_most_recent_first() {
        //! Undoing two plies puts the second-undone (earlier) ply at the front
        let mut history = MoveHistory::default();
        history.add_move(record("e4", Square::E2, Square::E4));
        history.add_move(record("e5", Square::E7, Square::E5));

        let undone = history.pop_move().unwrap();
        history.push_undone(undone);
        let undone = history.pop_move().unwrap();
        history.push_undone(undone);

        assert!(history.is_empty());
        assert_eq!(history.redo_len(), 2);
        assert_eq!(history.peek_redo().unwrap().san, "e4");
        assert_eq!(history.take_redo().unwrap().san, "e4");
        assert_eq!(history.take_redo().unwrap().san, "e5");
        assert!(history.take_redo().is_none());
    }

    #[test]
    fn test_clear_removes_moves_and_redo() {
        let mut history = MoveHistory::default();
        history.add_move(record("d4", Square::D2, Square::D4));
        history.add_move(record("d5", Square::D7, Square::D5));
        let undone = history.pop_move().unwrap();
        history.push_undone(undone);

        history.clear();

        assert!(history.is_empty());
        assert_eq!(history.redo_len(), 0);
    }

    #[test]
    fn test_record_request_replays_coordinates() {
        let mut promo = record("e8=Q+", Square::E7, Square::E8);
        promo.promotion = Some(Role::Queen);

        assert_eq!(
            promo.request(),
            MoveRequest::Coordinates {
                from: Square::E7,
                to: Square::E8,
                promotion: Some(Role::Queen),
            }
        );
    }
}
