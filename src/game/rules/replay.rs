//! Opening replay - stepping through a catalog line
//!
//! An opening is a script of forced moves. The player walks it with
//! next/previous; free moves are locked until the whole line is on the board.
//!
//! # Cursor
//!
//! The cursor is the index of the last script move on the board, `-1` before
//! the first one. It is derived from the history length (capped at the script
//! length), so undo, redo and step-back all keep it in sync and free moves
//! played after the line never move it.

use crate::catalog::Opening;
use crate::game::error::{GameError, GameResult};
use crate::game::resources::engine::{MoveRequest, PositionEngine};
use crate::game::resources::history::MoveRecord;
use crate::game::resources::session::{GameSession, SessionMode};
use tracing::{error, info};

/// Replay-mode state: the opening's script and how much of it is played
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplayState {
    script: Vec<String>,
    /// Script plies currently on the board
    played: usize,
}

impl ReplayState {
    pub fn new(opening: &Opening) -> Self {
        Self {
            script: opening.moves.clone(),
            played: 0,
        }
    }

    pub fn script(&self) -> &[String] {
        &self.script
    }

    /// Index of the last played script move, `-1` before the first
    pub fn cursor(&self) -> isize {
        self.played as isize - 1
    }

    /// `true` once `cursor == script.len() - 1`
    pub fn is_finished(&self) -> bool {
        self.played >= self.script.len()
    }

    /// Next forced move, `None` once the line is finished
    pub fn next_move(&self) -> Option<&str> {
        self.script.get(self.played).map(String::as_str)
    }

    pub(crate) fn sync(&mut self, history_len: usize) {
        self.played = history_len.min(self.script.len());
    }
}

impl<E: PositionEngine> GameSession<E> {
    /// Play the next move of the opening line
    ///
    /// # Returns
    ///
    /// - `Ok(Some(record))` - the forced move was played
    /// - `Ok(None)` - not in Replay mode, or the line is already finished
    ///
    /// # Errors
    ///
    /// [`GameError::ScriptCorruption`] when the engine rejects the scripted
    /// move. The cursor does not advance.
    pub fn step_forward(&mut self) -> GameResult<Option<MoveRecord>> {
        let SessionMode::Replay(replay) = &self.mode else {
            return Ok(None);
        };
        let Some(notation) = replay.next_move().map(str::to_owned) else {
            return Ok(None);
        };
        let ply = self.history.len();
        let total = replay.script().len();

        match self.play_new(&MoveRequest::Notation(notation.clone())) {
            Ok(record) => {
                self.status = if self.is_replay_finished() {
                    format!("{} - opening complete, free play enabled", record.san)
                } else {
                    format!("{} ({}/{})", record.san, ply + 1, total)
                };
                info!("[REPLAY] Step {}/{}: {}", ply + 1, total, record.san);
                Ok(Some(record))
            }
            Err(_) => {
                let err = GameError::ScriptCorruption { ply, notation };
                error!("[REPLAY] Corrupt opening script: {}", err);
                self.status = err.to_string();
                Err(err)
            }
        }
    }

    /// Take back the last move, whatever produced it
    ///
    /// No-op when nothing has been played. Works in terms of the move history,
    /// so free moves played after the line are reverted too.
    pub fn step_back(&mut self) -> Option<MoveRecord> {
        if self.history.is_empty() {
            return None;
        }
        self.undo()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn opening(moves: &[&str]) -> Opening {
        Opening {
            id: 1,
            name: "Test Line".to_string(),
            eco: "C00".to_string(),
            moves: moves.iter().map(|m| m.to_string()).collect(),
        }
    }

    #[test]
    fn test_cursor_tracks_played_script_moves() {
        let mut state = ReplayState::new(&opening(&["e4", "e5"]));
        assert_eq!(state.cursor(), -1);
        assert_eq!(state.next_move(), Some("e4"));

        state.sync(1);
        assert_eq!(state.cursor(), 0);
        assert!(!state.is_finished());

        state.sync(5);
        assert_eq!(state.cursor(), 1);
        assert!(state.is_finished());
        assert_eq!(state.next_move(), None);
    }

    #[test]
    fn test_empty_script_is_finished_immediately() {
        let state = ReplayState::new(&opening(&[]));
        assert_eq!(state.cursor(), -1);
        assert!(state.is_finished());
    }
}
