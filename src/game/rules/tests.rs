//! Session-level tests for the replay and puzzle policies
//!
//! Drives `GameSession` through its public operations and checks the
//! cross-field invariants after each call.
//!
//! # Test Organization
//!
//! - `test_replay_*` - Opening step-through, the free-move lock, step back
//! - `test_puzzle_*` - Solution checking, rollback, solve signaling

use super::*;
use crate::catalog::{Opening, Puzzle};
use crate::game::error::{GameError, ModeViolation};
use crate::game::resources::engine::{PositionEngine, ShakmatyEngine};
use crate::game::resources::session::{GameSession, MoveOutcome, SessionMode};
use shakmaty::Square;

const START_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

fn opening(moves: &[&str]) -> Opening {
    Opening {
        id: 1,
        name: "Italian Game".to_string(),
        eco: "C50".to_string(),
        moves: moves.iter().map(|m| m.to_string()).collect(),
    }
}

fn puzzle(fen: &str, solution: &[&str]) -> Puzzle {
    Puzzle {
        id: 1,
        name: "Test Puzzle".to_string(),
        description: "Find the moves".to_string(),
        fen: fen.to_string(),
        solution: solution.iter().map(|m| m.to_string()).collect(),
    }
}

/// Position reached by replaying `history` on a fresh standard engine
fn replayed_position(history: &[String]) -> String {
    let mut engine = ShakmatyEngine::standard();
    for san in history {
        engine
            .apply(&crate::game::resources::engine::MoveRequest::Notation(san.clone()))
            .expect("history replays");
    }
    engine.position().to_string()
}

#[test]
fn test_replay_load_starts_before_first_move() {
    let session: GameSession = GameSession::from_opening(&opening(&["e4", "e5", "Nf3"]));

    assert!(matches!(session.mode(), SessionMode::Replay(_)));
    assert_eq!(session.cursor(), Some(-1));
    assert!(session.history().is_empty());
    assert_eq!(session.status_message(), "Loaded opening: Italian Game");
}

#[test]
fn test_replay_three_steps_then_noop() {
    let mut session: GameSession = GameSession::from_opening(&opening(&["e4", "e5", "Nf3"]));

    for _ in 0..3 {
        assert!(session.step_forward().unwrap().is_some());
    }
    assert_eq!(session.history(), vec!["e4", "e5", "Nf3"]);
    assert_eq!(session.cursor(), Some(2));

    let position = session.position().clone();
    assert!(session.step_forward().unwrap().is_none());
    assert_eq!(session.history().len(), 3);
    assert_eq!(session.position(), &position);
}

#[test]
fn test_replay_blocks_free_moves_until_finished() {
    let mut session: GameSession = GameSession::from_opening(&opening(&["e4", "e5"]));
    session.step_forward().unwrap();
    let before = session.position().clone();

    // Legal move, still refused
    let err = session.apply_move(Square::E7, Square::E5, None).unwrap_err();

    assert_eq!(
        err,
        GameError::ModeViolation {
            reason: ModeViolation::ReplayUnfinished
        }
    );
    assert_eq!(
        session.status_message(),
        "Step through the opening first or reset to play freely"
    );
    assert_eq!(session.position(), &before);
    assert_eq!(session.history(), vec!["e4"]);
}

#[test]
fn test_replay_illegal_move_while_locked_is_mode_violation() {
    let mut session: GameSession = GameSession::from_opening(&opening(&["d4"]));

    let err = session.apply_move(Square::A1, Square::H8, None).unwrap_err();

    assert!(matches!(err, GameError::ModeViolation { .. }));
}

#[test]
fn test_replay_free_moves_after_line_and_step_back_reverts_them() {
    let mut session: GameSession = GameSession::from_opening(&opening(&["e4", "e5"]));
    session.step_forward().unwrap();
    session.step_forward().unwrap();
    assert!(session.is_replay_finished());

    let outcome = session.apply_move(Square::G1, Square::F3, None).unwrap();
    assert!(matches!(outcome, MoveOutcome::Accepted(_)));
    assert_eq!(session.cursor(), Some(1));

    let undone = session.step_back().unwrap();
    assert_eq!(undone.san, "Nf3");
    assert_eq!(session.history(), vec!["e4", "e5"]);
    assert_eq!(session.cursor(), Some(1));

    session.step_back().unwrap();
    assert_eq!(session.cursor(), Some(0));
    assert!(!session.is_replay_finished());
}

#[test]
fn test_replay_step_back_on_empty_history_is_noop() {
    let mut session: GameSession = GameSession::from_opening(&opening(&["e4"]));

    assert!(session.step_back().is_none());
    assert_eq!(session.cursor(), Some(-1));
}

#[test]
fn test_replay_history_matches_cursor_and_position() {
    //! Any forward/back sequence keeps history equal to the script prefix up
    //! to the cursor, and the position reproducible from that history.
    let script = ["e4", "c5", "Nf3", "d6", "d4"];
    let mut session: GameSession = GameSession::from_opening(&opening(&script));
    let pattern = [true, true, false, true, true, true, false, false, true, true, true, true];

    for forward in pattern {
        if forward {
            session.step_forward().unwrap();
        } else {
            session.step_back();
        }
        let cursor = session.cursor().unwrap();
        let expected: Vec<String> = script[..(cursor + 1) as usize]
            .iter()
            .map(|m| m.to_string())
            .collect();
        assert_eq!(session.history(), expected);
        assert_eq!(
            session.position().to_string(),
            replayed_position(&session.history())
        );
    }
}

#[test]
fn test_replay_corrupt_script_does_not_advance() {
    let mut session: GameSession = GameSession::from_opening(&opening(&["e4", "e4"]));
    session.step_forward().unwrap();

    let err = session.step_forward().unwrap_err();

    assert_eq!(
        err,
        GameError::ScriptCorruption {
            ply: 1,
            notation: "e4".to_string()
        }
    );
    assert_eq!(session.cursor(), Some(0));
    assert_eq!(session.history(), vec!["e4"]);
    assert_eq!(session.status_message(), "Invalid opening move e4 at ply 1");
}

#[test]
fn test_replay_step_forward_outside_replay_is_noop() {
    let mut session: GameSession = GameSession::new();
    assert!(session.step_forward().unwrap().is_none());
    assert!(session.history().is_empty());
}

#[test]
fn test_puzzle_wrong_legal_move_is_rolled_back() {
    let mut session: GameSession = GameSession::from_puzzle(&puzzle(START_FEN, &["Nf3", "Nc6"])).unwrap();
    let before = session.position().clone();

    let err = session.apply_move(Square::E2, Square::E4, None).unwrap_err();

    assert_eq!(
        err,
        GameError::WrongSolutionMove {
            played: "e4".to_string(),
            expected: "Nf3".to_string()
        }
    );
    assert_eq!(session.status_message(), "Wrong move, try again");
    assert!(session.history().is_empty());
    assert_eq!(session.puzzle_step(), Some(0));
    assert_eq!(session.position(), &before);
    assert!(session.engine().history().is_empty());
}

#[test]
fn test_puzzle_correct_move_advances_one_step() {
    let mut session: GameSession = GameSession::from_puzzle(&puzzle(START_FEN, &["Nf3", "Nc6"])).unwrap();

    let outcome = session.apply_move(Square::G1, Square::F3, None).unwrap();

    assert!(matches!(outcome, MoveOutcome::PuzzleContinue(_)));
    assert_eq!(session.puzzle_step(), Some(1));
    assert_eq!(session.history(), vec!["Nf3"]);
    assert_eq!(session.status_message(), "Correct, continue...");
}

#[test]
fn test_puzzle_check_decoration_is_ignored() {
    let mut session: GameSession = GameSession::from_puzzle(&puzzle(START_FEN, &["Nf3+", "Nc6"])).unwrap();

    assert!(session.apply_notation("Nf3").is_ok());
    assert_eq!(session.puzzle_step(), Some(1));
}

#[test]
fn test_puzzle_illegal_move_rejected_before_comparison() {
    let mut session: GameSession = GameSession::from_puzzle(&puzzle(START_FEN, &["Nf3"])).unwrap();

    let err = session.apply_move(Square::G1, Square::G3, None).unwrap_err();

    assert!(matches!(err, GameError::IllegalMove { .. }));
    assert_eq!(session.status_message(), "Illegal move");
    assert_eq!(session.puzzle_step(), Some(0));
}

#[test]
fn test_puzzle_solved_exactly_once_after_last_move() {
    let mut session: GameSession =
        GameSession::from_puzzle(&puzzle(START_FEN, &["f3", "e5", "g4", "Qh4#"])).unwrap();
    let moves = [
        (Square::F2, Square::F3),
        (Square::E7, Square::E5),
        (Square::G2, Square::G4),
        (Square::D8, Square::H4),
    ];

    let mut solved = 0;
    for (i, (from, to)) in moves.into_iter().enumerate() {
        match session.apply_move(from, to, None).unwrap() {
            MoveOutcome::PuzzleSolved(_) => {
                solved += 1;
                assert_eq!(i, moves.len() - 1);
            }
            MoveOutcome::PuzzleContinue(_) => assert!(i < moves.len() - 1),
            MoveOutcome::Accepted(_) => panic!("puzzle move reported as freeform"),
        }
    }

    assert_eq!(solved, 1);
    assert_eq!(session.status_message(), "Puzzle solved!");
    assert_eq!(session.puzzle_step(), Some(4));
}

#[test]
fn test_puzzle_move_after_solve_is_refused() {
    let mut session: GameSession =
        GameSession::from_puzzle(&puzzle("6k1/5ppp/8/8/8/8/8/R5K1 w - - 0 1", &["Ra8#"])).unwrap();
    session.apply_move(Square::A1, Square::A8, None).unwrap();

    let err = session.apply_notation("Kf8").unwrap_err();

    assert_eq!(
        err,
        GameError::ModeViolation {
            reason: ModeViolation::PuzzleSolved
        }
    );
    assert_eq!(session.history(), vec!["Ra8#"]);
}

#[test]
fn test_puzzle_undo_redo_refused() {
    let mut session: GameSession = GameSession::from_puzzle(&puzzle(START_FEN, &["Nf3", "Nc6"])).unwrap();
    session.apply_notation("Nf3").unwrap();

    assert!(session.undo().is_none());
    assert!(session.redo().is_none());
    assert_eq!(session.history(), vec!["Nf3"]);
    assert_eq!(session.puzzle_step(), Some(1));
}

#[test]
fn test_puzzle_invalid_fen_keeps_current_session() {
    let mut session: GameSession = GameSession::new();
    session.apply_notation("e4").unwrap();

    let err = session
        .load_puzzle(&puzzle("not a fen", &["e4"]))
        .unwrap_err();

    assert!(matches!(err, GameError::InvalidPosition { .. }));
    assert_eq!(session.mode(), &SessionMode::Freeform);
    assert_eq!(session.history(), vec!["e4"]);
}

#[test]
fn test_puzzle_state_matches_normalization_helpers() {
    assert!(moves_match("Qxf7#", "Qxf7"));
    assert_eq!(normalize_san("O-O+"), "O-O");
    let state = PuzzleState::new(&puzzle(START_FEN, &["e4"]));
    assert_eq!(state.expected(), Some("e4"));
}
