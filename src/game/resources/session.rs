//! Game session resource - the single writer for board state
//!
//! `GameSession` owns one game in progress: the rules engine, the move history
//! with its redo buffer, the interaction mode and the last status message.
//! Every UI action goes through one of its methods, so the cross-field
//! invariants hold after every call:
//!
//! - `history.len()` equals the number of plies applied to the engine
//! - the redo buffer is non-empty only right after consecutive undos
//! - replay/puzzle state exists only in the matching mode
//!
//! # Modes
//!
//! ```text
//! Freeform ──load_opening──▶ Replay(script, cursor)
//!     ▲    ──load_puzzle───▶ Puzzle(solution, step)
//!     └──────── reset ◀──────────┘
//! ```
//!
//! Mode-specific policies live next to their state:
//! - [`crate::game::rules::replay`] - opening step-through and the free-move lock
//! - [`crate::game::rules::puzzle`] - solution checking with rollback
//!
//! # Lifecycle
//!
//! Loading an opening or a puzzle re-creates the session rather than patching
//! fields; only the board orientation (pure presentation) carries over.

use crate::catalog::{Opening, Puzzle};
use crate::game::error::{GameError, GameResult, ModeViolation};
use crate::game::resources::clipboard::ExportSink;
use crate::game::resources::engine::{MoveRequest, PositionEngine, PositionFen, ShakmatyEngine};
use crate::game::resources::history::{GameStatus, MoveHistory, MoveRecord};
use crate::game::rules::puzzle::PuzzleState;
use crate::game::rules::replay::ReplayState;
use bevy::prelude::Resource;
use shakmaty::{Role, Square};
use tracing::{debug, info};

/// Which side of the board is drawn at the bottom
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum BoardOrientation {
    #[default]
    White,
    Black,
}

impl BoardOrientation {
    pub fn flipped(self) -> Self {
        match self {
            BoardOrientation::White => BoardOrientation::Black,
            BoardOrientation::Black => BoardOrientation::White,
        }
    }
}

/// Interaction mode, carrying only the state that mode needs
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub enum SessionMode {
    /// Unconstrained play for both sides
    #[default]
    Freeform,
    /// Stepping through an opening line
    Replay(ReplayState),
    /// Solving a puzzle
    Puzzle(PuzzleState),
}

impl SessionMode {
    pub fn name(&self) -> &'static str {
        match self {
            SessionMode::Freeform => "freeform",
            SessionMode::Replay(_) => "replay",
            SessionMode::Puzzle(_) => "puzzle",
        }
    }
}

/// Result of an accepted piece drop
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoveOutcome {
    /// Freeform move (or a free move after the opening line)
    Accepted(MoveRecord),
    /// Correct puzzle move, more to come
    PuzzleContinue(MoveRecord),
    /// Final correct puzzle move
    PuzzleSolved(MoveRecord),
}

impl MoveOutcome {
    pub fn record(&self) -> &MoveRecord {
        match self {
            MoveOutcome::Accepted(record)
            | MoveOutcome::PuzzleContinue(record)
            | MoveOutcome::PuzzleSolved(record) => record,
        }
    }
}

/// Resource holding the one chess game the board is showing
///
/// # Usage
///
/// ```rust,ignore
/// fn on_drop(mut session: ResMut<GameSession>) {
///     match session.apply_move(Square::E2, Square::E4, None) {
///         Ok(outcome) => info!("played {}", outcome.record().san),
///         Err(err) => info!("refused: {err}"),
///     }
/// }
/// ```
#[derive(Resource, Debug)]
pub struct GameSession<E: PositionEngine = ShakmatyEngine> {
    /// Authoritative position and move stack
    pub(crate) engine: E,

    /// Position after the last applied ply, mirrored from the engine
    pub(crate) position: PositionFen,

    pub(crate) history: MoveHistory,

    pub(crate) mode: SessionMode,

    /// Last human-readable outcome
    pub(crate) status: String,

    orientation: BoardOrientation,
}

impl<E: PositionEngine> Default for GameSession<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: PositionEngine> GameSession<E> {
    /// Fresh freeform session at the standard starting position
    pub fn new() -> Self {
        Self::with_engine(E::standard())
    }

    /// Freeform session over an already set-up engine
    pub fn with_engine(engine: E) -> Self {
        let position = engine.position();
        Self {
            engine,
            position,
            history: MoveHistory::default(),
            mode: SessionMode::Freeform,
            status: String::new(),
            orientation: BoardOrientation::default(),
        }
    }

    /// Session in Replay mode over the opening's move list, cursor before the first move
    pub fn from_opening(opening: &Opening) -> Self {
        let mut session = Self::new();
        session.mode = SessionMode::Replay(ReplayState::new(opening));
        session.status = format!("Loaded opening: {}", opening.name);
        info!(
            "[SESSION] Loaded opening {} ({} plies)",
            opening.name,
            opening.moves.len()
        );
        session
    }

    /// Session in Puzzle mode at the puzzle's starting position
    ///
    /// # Errors
    ///
    /// [`GameError::InvalidPosition`] when the puzzle's FEN cannot be loaded.
    pub fn from_puzzle(puzzle: &Puzzle) -> GameResult<Self> {
        let engine = E::from_fen(&puzzle.fen)?;
        let mut session = Self::with_engine(engine);
        session.mode = SessionMode::Puzzle(PuzzleState::new(puzzle));
        session.status = format!("Loaded puzzle: {}", puzzle.name);
        info!(
            "[SESSION] Loaded puzzle {} ({} solution plies)",
            puzzle.name,
            puzzle.solution.len()
        );
        Ok(session)
    }

    /// Replace this session with a fresh Replay session
    pub fn load_opening(&mut self, opening: &Opening) {
        let orientation = self.orientation;
        *self = Self::from_opening(opening);
        self.orientation = orientation;
    }

    /// Replace this session with a fresh Puzzle session
    ///
    /// On error the current session is left as it was, apart from the status
    /// message which reports the failure.
    pub fn load_puzzle(&mut self, puzzle: &Puzzle) -> GameResult<()> {
        match Self::from_puzzle(puzzle) {
            Ok(mut next) => {
                next.orientation = self.orientation;
                *self = next;
                Ok(())
            }
            Err(err) => {
                self.status = err.to_string();
                Err(err)
            }
        }
    }

    /// Piece drop from the board
    ///
    /// Routed through the policy of the current mode:
    /// - Freeform: any legal move
    /// - Replay: any legal move once the opening line is finished,
    ///   [`ModeViolation::ReplayUnfinished`] before that
    /// - Puzzle: legal moves matching the next solution move
    ///
    /// On any error the position and history are exactly as before the call
    /// and the status message explains why.
    pub fn apply_move(
        &mut self,
        from: Square,
        to: Square,
        promotion: Option<Role>,
    ) -> GameResult<MoveOutcome> {
        self.submit(MoveRequest::Coordinates {
            from,
            to,
            promotion,
        })
    }

    /// Same as [`Self::apply_move`], with the move given in algebraic notation
    pub fn apply_notation(&mut self, notation: &str) -> GameResult<MoveOutcome> {
        self.submit(MoveRequest::Notation(notation.to_string()))
    }

    fn submit(&mut self, request: MoveRequest) -> GameResult<MoveOutcome> {
        let result = self.route_move(&request);
        if let Err(err) = &result {
            debug!("[SESSION] Refused {}: {}", request, err);
            self.status = err.to_string();
        }
        result
    }

    fn route_move(&mut self, request: &MoveRequest) -> GameResult<MoveOutcome> {
        match &self.mode {
            SessionMode::Puzzle(puzzle) => {
                let expected = puzzle
                    .expected()
                    .map(str::to_owned)
                    .ok_or(GameError::from(ModeViolation::PuzzleSolved))?;
                self.attempt_puzzle_move(request, expected)
            }
            SessionMode::Replay(replay) if !replay.is_finished() => {
                Err(ModeViolation::ReplayUnfinished.into())
            }
            SessionMode::Replay(_) | SessionMode::Freeform => {
                let record = self.play_new(request)?;
                let game_status = self.engine.status();
                self.status = if game_status.is_game_over() {
                    format!("{} {}", record.san, game_status.message())
                } else {
                    format!("Played {}", record.san)
                };
                Ok(MoveOutcome::Accepted(record))
            }
        }
    }

    /// Apply a brand-new ply: append it and drop the redo buffer
    pub(crate) fn play_new(&mut self, request: &MoveRequest) -> GameResult<MoveRecord> {
        let record = self
            .engine
            .apply(request)
            .ok_or_else(|| GameError::IllegalMove {
                attempted: request.to_string(),
            })?;
        self.history.clear_redo();
        self.history.add_move(record.clone());
        self.after_history_change();
        Ok(record)
    }

    /// Take back the last ply
    ///
    /// Returns `None` (no-op) when nothing has been played. Refused while
    /// solving a puzzle so the position never leaves the solution path.
    pub fn undo(&mut self) -> Option<MoveRecord> {
        if matches!(self.mode, SessionMode::Puzzle(_)) {
            self.status = "Undo is not available while solving a puzzle".to_string();
            return None;
        }
        if self.history.is_empty() {
            return None;
        }

        self.engine.undo_last()?;
        let record = self.history.pop_move()?;
        self.history.push_undone(record.clone());
        self.after_history_change();
        self.status = format!("Took back {}", record.san);
        debug!("[SESSION] Undo {} ({} in redo buffer)", record.san, self.history.redo_len());
        Some(record)
    }

    /// Re-apply the most recently undone ply
    ///
    /// Returns `None` (no-op) when the redo buffer is empty.
    pub fn redo(&mut self) -> Option<MoveRecord> {
        if matches!(self.mode, SessionMode::Puzzle(_)) {
            self.status = "Redo is not available while solving a puzzle".to_string();
            return None;
        }
        let request = self.history.peek_redo()?.request();

        let Some(record) = self.engine.apply(&request) else {
            // Only reachable if the engine disagrees with its own earlier move.
            tracing::warn!("[SESSION] Engine refused redo of {}, dropping redo buffer", request);
            self.history.clear_redo();
            return None;
        };

        self.history.take_redo();
        self.history.add_move(record.clone());
        self.after_history_change();
        self.status = format!("Replayed {}", record.san);
        Some(record)
    }

    /// Back to the standard starting position in Freeform mode
    pub fn reset(&mut self) {
        self.engine = E::standard();
        self.history.clear();
        self.mode = SessionMode::Freeform;
        self.after_history_change();
        self.status = "Reset to initial position".to_string();
        info!("[SESSION] Reset");
    }

    /// The whole game as PGN; no state change
    pub fn export_notation(&self) -> GameResult<String> {
        Ok(self.engine.serialize()?)
    }

    /// Export the game into an injected sink (clipboard, file, ...)
    pub fn copy_notation(&mut self, sink: &mut dyn ExportSink) -> GameResult<()> {
        let result = self.export_notation().and_then(|pgn| {
            sink.write_notation(&pgn)
                .map_err(|err| GameError::Serialization {
                    message: err.to_string(),
                })
        });
        self.status = match &result {
            Ok(()) => "PGN copied to clipboard".to_string(),
            Err(err) => {
                tracing::warn!("[SESSION] Export failed: {}", err);
                "Failed to copy PGN".to_string()
            }
        };
        result
    }

    /// Flip the board; game state is untouched
    pub fn toggle_orientation(&mut self) {
        self.orientation = self.orientation.flipped();
    }

    pub(crate) fn after_history_change(&mut self) {
        self.position = self.engine.position();
        if let SessionMode::Replay(replay) = &mut self.mode {
            replay.sync(self.history.len());
        }
    }

    /// Current position encoding (for rendering)
    pub fn position(&self) -> &PositionFen {
        &self.position
    }

    /// Notation of every applied ply (for the move list)
    pub fn history(&self) -> Vec<String> {
        self.history.sans()
    }

    /// Applied plies with their squares and snapshots
    pub fn moves(&self) -> &[MoveRecord] {
        self.history.moves()
    }

    pub fn redo_len(&self) -> usize {
        self.history.redo_len()
    }

    pub fn mode(&self) -> &SessionMode {
        &self.mode
    }

    /// Replay cursor, `-1` before the first move; `None` outside Replay mode
    pub fn cursor(&self) -> Option<isize> {
        match &self.mode {
            SessionMode::Replay(replay) => Some(replay.cursor()),
            _ => None,
        }
    }

    /// Index of the next expected solution move; `None` outside Puzzle mode
    pub fn puzzle_step(&self) -> Option<usize> {
        match &self.mode {
            SessionMode::Puzzle(puzzle) => Some(puzzle.step()),
            _ => None,
        }
    }

    /// Whether free moves are allowed in the current mode
    pub fn is_replay_finished(&self) -> bool {
        match &self.mode {
            SessionMode::Replay(replay) => replay.is_finished(),
            _ => true,
        }
    }

    pub fn status_message(&self) -> &str {
        &self.status
    }

    /// Check / mate / draw status of the position
    pub fn game_status(&self) -> GameStatus {
        self.engine.status()
    }

    pub fn orientation(&self) -> BoardOrientation {
        self.orientation
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }
}
