//! Shakmaty-backed rules engine
//!
//! Implements [`PositionEngine`] on top of the `shakmaty` crate, which is the
//! authoritative source for:
//! - Move legality (including castling, en passant and promotion)
//! - Standard algebraic notation
//! - Check/checkmate/stalemate detection
//! - FEN encoding
//!
//! # Move stack
//!
//! The engine keeps the starting position plus one snapshot per applied ply,
//! so undo is a pop and never needs to reconstruct anything.
//!
//! # Coordinate requests
//!
//! Drag-and-drop requests name the king's destination for castling (e1→g1),
//! while shakmaty encodes castling as king-takes-rook. Both forms are accepted.

use crate::game::resources::engine::{EngineError, MoveRequest, PositionEngine, PositionFen};
use crate::game::resources::history::{GameStatus, MoveRecord};
use shakmaty::fen::Fen;
use shakmaty::san::San;
use shakmaty::{CastlingMode, Chess, Color, EnPassantMode, File, Move, Position, Role, Square};
use std::fmt::Write as _;
use tracing::debug;

/// Rules engine resource wrapping a shakmaty position and its move stack
#[derive(Debug, Clone)]
pub struct ShakmatyEngine {
    /// Position the game started from
    start: Chess,

    /// FEN of the start position when it is not the standard one (PGN header)
    custom_start: Option<PositionFen>,

    /// Position after each ply, parallel to `records`
    positions: Vec<Chess>,

    records: Vec<MoveRecord>,
}

impl Default for ShakmatyEngine {
    fn default() -> Self {
        Self::standard()
    }
}

impl ShakmatyEngine {
    fn with_start(start: Chess) -> Self {
        let start_fen = fen_of(&start);
        let custom_start = (start_fen != fen_of(&Chess::default())).then_some(start_fen);
        Self {
            start,
            custom_start,
            positions: Vec::new(),
            records: Vec::new(),
        }
    }

    /// Position currently on the board
    pub fn current(&self) -> &Chess {
        self.positions.last().unwrap_or(&self.start)
    }

    /// Find the legal move a drag-and-drop request refers to
    fn find_coordinate_move(&self, from: Square, to: Square, promotion: Option<Role>) -> Option<Move> {
        self.current()
            .legal_moves()
            .into_iter()
            .find(|m| {
                let Some((move_from, move_to)) = drag_squares(m) else {
                    return false;
                };
                let squares_match =
                    move_from == from && (move_to == to || m.to() == to);
                let promotion_match = match m.promotion() {
                    Some(role) => role == promotion.unwrap_or(Role::Queen),
                    None => true,
                };
                squares_match && promotion_match
            })
    }

    fn find_notation_move(&self, notation: &str) -> Option<Move> {
        let cleaned = notation.trim().trim_end_matches(['+', '#', '!', '?']);
        let san: San = cleaned.parse().ok()?;
        san.to_move(self.current()).ok()
    }

    /// Play a move already known to be legal in the current position
    fn play(&mut self, m: Move) -> Option<MoveRecord> {
        let before = self.current().clone();
        let (from, to) = drag_squares(&m)?;
        let san = San::from_move(&before, m.clone());
        let after = before.play(m.clone()).ok()?;

        let suffix = if after.is_checkmate() {
            "#"
        } else if after.is_check() {
            "+"
        } else {
            ""
        };

        let record = MoveRecord {
            san: format!("{san}{suffix}"),
            from,
            to,
            promotion: m.promotion(),
            position: fen_of(&after),
        };

        debug!("[ENGINE] Played {} -> {}", record.san, record.position);
        self.positions.push(after);
        self.records.push(record.clone());
        Some(record)
    }
}

impl PositionEngine for ShakmatyEngine {
    fn standard() -> Self {
        Self::with_start(Chess::default())
    }

    fn from_fen(fen: &str) -> Result<Self, EngineError> {
        let parsed: Fen = fen.trim().parse().map_err(|err| EngineError::InvalidFen {
            message: format!("{err}"),
        })?;
        let start: Chess =
            parsed
                .into_position(CastlingMode::Standard)
                .map_err(|err| EngineError::InvalidFen {
                    message: format!("{err}"),
                })?;
        Ok(Self::with_start(start))
    }

    fn apply(&mut self, request: &MoveRequest) -> Option<MoveRecord> {
        let m = match request {
            MoveRequest::Coordinates {
                from,
                to,
                promotion,
            } => self.find_coordinate_move(*from, *to, *promotion)?,
            MoveRequest::Notation(notation) => self.find_notation_move(notation)?,
        };
        self.play(m)
    }

    fn undo_last(&mut self) -> Option<MoveRecord> {
        self.positions.pop()?;
        self.records.pop()
    }

    fn position(&self) -> PositionFen {
        fen_of(self.current())
    }

    fn history(&self) -> Vec<String> {
        self.records.iter().map(|record| record.san.clone()).collect()
    }

    fn serialize(&self) -> Result<String, EngineError> {
        let mut pgn = String::new();
        write_pgn(&mut pgn, self).map_err(|err| EngineError::Serialization {
            message: err.to_string(),
        })?;
        Ok(pgn)
    }

    fn status(&self) -> GameStatus {
        let pos = self.current();
        if pos.is_checkmate() {
            GameStatus::Checkmate {
                winner: !pos.turn(),
            }
        } else if pos.is_stalemate() {
            GameStatus::Stalemate
        } else if pos.is_insufficient_material() {
            GameStatus::InsufficientMaterial
        } else if pos.is_check() {
            GameStatus::Check
        } else {
            GameStatus::Ongoing
        }
    }
}

fn write_pgn(out: &mut String, engine: &ShakmatyEngine) -> std::fmt::Result {
    if let Some(fen) = &engine.custom_start {
        write!(out, "[SetUp \"1\"]\n[FEN \"{fen}\"]\n\n")?;
    }

    let mut number = engine.start.fullmoves().get();
    let mut turn = engine.start.turn();
    let mut movetext = String::new();

    for (ply, record) in engine.records.iter().enumerate() {
        match turn {
            Color::White => {
                if !movetext.is_empty() {
                    movetext.push(' ');
                }
                write!(movetext, "{number}. {}", record.san)?;
            }
            Color::Black => {
                if ply == 0 {
                    write!(movetext, "{number}... {}", record.san)?;
                } else {
                    write!(movetext, " {}", record.san)?;
                }
                number += 1;
            }
        }
        turn = !turn;
    }

    if let Some(result) = engine.status().result_token() {
        if !movetext.is_empty() {
            movetext.push(' ');
        }
        movetext.push_str(result);
    }

    out.push_str(&movetext);
    Ok(())
}

/// Origin and drag destination of a move (king's destination for castling)
fn drag_squares(m: &Move) -> Option<(Square, Square)> {
    match m {
        Move::Normal { from, to, .. } => Some((*from, *to)),
        Move::EnPassant { from, to } => Some((*from, *to)),
        Move::Castle { king, rook } => {
            let file = if rook.file() == File::H { File::G } else { File::C };
            Some((*king, Square::from_coords(file, rook.rank())))
        }
        Move::Put { .. } => None,
    }
}

fn fen_of(pos: &Chess) -> PositionFen {
    PositionFen::new(Fen::from_position(pos, EnPassantMode::Legal).to_string())
}
