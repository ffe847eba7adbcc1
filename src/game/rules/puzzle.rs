//! Puzzle validation
//!
//! A puzzle is a starting position plus the exact sequence of moves that
//! solves it. Each attempt is played on the engine first (so illegal moves
//! are refused as in free play), then compared with the next solution move.
//! A legal but wrong move is taken back immediately: the board never leaves
//! the solution path and the puzzle stays retryable.
//!
//! Comparison ignores only check/mate decorations and surrounding whitespace,
//! so `Nf3+` and `Nf3` are the same move while `Nbd2` and `Nd2` are not.

use crate::catalog::Puzzle;
use crate::game::error::{GameError, GameResult};
use crate::game::resources::engine::{MoveRequest, PositionEngine};
use crate::game::resources::session::{GameSession, MoveOutcome, SessionMode};
use tracing::{debug, info};

/// Puzzle-mode state: the solution and the index of the next expected move
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PuzzleState {
    solution: Vec<String>,
    step: usize,
}

impl PuzzleState {
    pub fn new(puzzle: &Puzzle) -> Self {
        Self {
            solution: puzzle.solution.clone(),
            step: 0,
        }
    }

    pub fn step(&self) -> usize {
        self.step
    }

    /// Next expected move, `None` once solved
    pub fn expected(&self) -> Option<&str> {
        self.solution.get(self.step).map(String::as_str)
    }

    pub fn is_solved(&self) -> bool {
        self.step >= self.solution.len()
    }

    fn advance(&mut self) {
        if self.step < self.solution.len() {
            self.step += 1;
        }
    }
}

/// Strip check/mate marks and surrounding whitespace from a SAN string
pub fn normalize_san(san: &str) -> String {
    san.chars()
        .filter(|c| *c != '+' && *c != '#')
        .collect::<String>()
        .trim()
        .to_string()
}

/// Whether a played move counts as the expected solution move
pub fn moves_match(played: &str, expected: &str) -> bool {
    normalize_san(played) == normalize_san(expected)
}

impl<E: PositionEngine> GameSession<E> {
    /// Try one puzzle move against `expected`
    ///
    /// Illegal moves fail before any comparison. Wrong moves are undone on
    /// the engine and never reach the history.
    pub(crate) fn attempt_puzzle_move(
        &mut self,
        request: &MoveRequest,
        expected: String,
    ) -> GameResult<MoveOutcome> {
        let record = self
            .engine
            .apply(request)
            .ok_or_else(|| GameError::IllegalMove {
                attempted: request.to_string(),
            })?;

        if !moves_match(&record.san, &expected) {
            self.engine.undo_last();
            debug!("[PUZZLE] {} is not {}, rolled back", record.san, expected);
            return Err(GameError::WrongSolutionMove {
                played: record.san,
                expected,
            });
        }

        self.history.clear_redo();
        self.history.add_move(record.clone());
        self.after_history_change();

        let solved = match &mut self.mode {
            SessionMode::Puzzle(puzzle) => {
                puzzle.advance();
                puzzle.is_solved()
            }
            _ => false,
        };

        if solved {
            info!("[PUZZLE] Solved after {}", record.san);
            self.status = "Puzzle solved!".to_string();
            Ok(MoveOutcome::PuzzleSolved(record))
        } else {
            self.status = "Correct, continue...".to_string();
            Ok(MoveOutcome::PuzzleContinue(record))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_strips_only_decorations() {
        assert_eq!(normalize_san("Nf3+"), "Nf3");
        assert_eq!(normalize_san(" Qxf7# "), "Qxf7");
        assert_eq!(normalize_san("e8=Q+"), "e8=Q");
        assert_eq!(normalize_san("Nbd2"), "Nbd2");
    }

    #[test]
    fn test_moves_match_ignores_check_marks_but_not_disambiguation() {
        assert!(moves_match("Nf3+", "Nf3"));
        assert!(moves_match("Qh4#", "Qh4"));
        assert!(!moves_match("Nd2", "Nbd2"));
        assert!(!moves_match("Nc3", "Nf3"));
    }

    #[test]
    fn test_state_step_never_passes_solution_length() {
        let puzzle = Puzzle {
            id: 7,
            name: "One mover".to_string(),
            description: String::new(),
            fen: "6k1/5ppp/8/8/8/8/8/R5K1 w - - 0 1".to_string(),
            solution: vec!["Ra8#".to_string()],
        };
        let mut state = PuzzleState::new(&puzzle);
        assert_eq!(state.expected(), Some("Ra8#"));

        state.advance();
        state.advance();

        assert_eq!(state.step(), 1);
        assert!(state.is_solved());
        assert_eq!(state.expected(), None);
    }
}
