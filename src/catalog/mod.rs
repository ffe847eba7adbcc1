//! Opening and puzzle catalog
//!
//! Read-only training data. Openings feed Replay mode, puzzles feed Puzzle
//! mode. The built-in datasets are embedded at compile time; other datasets
//! can be loaded from any JSON source with the same shape.
//!
//! # JSON shape
//!
//! ```text
//! openings: [{ "id", "name", "ecoCode", "moves": [san...] }]
//! puzzles:  [{ "id", "name", "description", "startingPosition", "solution": [san...] }]
//! ```

use serde::{Deserialize, Serialize};
use tracing::debug;

const BUILTIN_OPENINGS: &str = include_str!("../../data/openings.json");
const BUILTIN_PUZZLES: &str = include_str!("../../data/puzzles.json");

/// An opening line to step through
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Opening {
    pub id: u32,
    pub name: String,
    /// ECO classification code (e.g. `C50`)
    #[serde(rename = "ecoCode", alias = "eco")]
    pub eco: String,
    /// Forced moves in SAN, in play order
    pub moves: Vec<String>,
}

/// A position with a unique solution sequence
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Puzzle {
    pub id: u32,
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// Starting position as FEN
    #[serde(rename = "startingPosition", alias = "fen")]
    pub fen: String,
    /// Expected moves in SAN, both sides, in play order
    pub solution: Vec<String>,
}

/// Errors that can occur while loading a catalog
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("Failed to parse catalog data: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Openings and puzzles available to the trainer
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    openings: Vec<Opening>,
    puzzles: Vec<Puzzle>,
}

impl Catalog {
    /// Catalog built from the datasets shipped with the crate
    pub fn builtin() -> Result<Self, CatalogError> {
        Self::from_json(BUILTIN_OPENINGS, BUILTIN_PUZZLES)
    }

    /// Catalog from JSON arrays of openings and puzzles
    pub fn from_json(openings: &str, puzzles: &str) -> Result<Self, CatalogError> {
        let catalog = Self {
            openings: serde_json::from_str(openings)?,
            puzzles: serde_json::from_str(puzzles)?,
        };
        debug!(
            "[CATALOG] Loaded {} openings, {} puzzles",
            catalog.openings.len(),
            catalog.puzzles.len()
        );
        Ok(catalog)
    }

    pub fn openings(&self) -> &[Opening] {
        &self.openings
    }

    pub fn puzzles(&self) -> &[Puzzle] {
        &self.puzzles
    }

    pub fn opening(&self, id: u32) -> Option<&Opening> {
        self.openings.iter().find(|opening| opening.id == id)
    }

    pub fn puzzle(&self, id: u32) -> Option<&Puzzle> {
        self.puzzles.iter().find(|puzzle| puzzle.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::resources::engine::{MoveRequest, PositionEngine, ShakmatyEngine};

    #[test]
    fn test_builtin_catalog_loads() {
        let catalog = Catalog::builtin().unwrap();

        assert!(!catalog.openings().is_empty());
        assert!(!catalog.puzzles().is_empty());
        assert_eq!(catalog.opening(1).unwrap().eco, "C50");
        assert!(catalog.puzzle(999).is_none());
    }

    #[test]
    fn test_builtin_openings_are_legal_lines() {
        //! Every shipped opening must replay cleanly from the start position
        let catalog = Catalog::builtin().unwrap();
        for opening in catalog.openings() {
            let mut engine = ShakmatyEngine::standard();
            for san in &opening.moves {
                assert!(
                    engine.apply(&MoveRequest::Notation(san.clone())).is_some(),
                    "{} has illegal move {}",
                    opening.name,
                    san
                );
            }
        }
    }

    #[test]
    fn test_builtin_puzzles_are_solvable() {
        let catalog = Catalog::builtin().unwrap();
        for puzzle in catalog.puzzles() {
            let mut engine = ShakmatyEngine::from_fen(&puzzle.fen).unwrap();
            for san in &puzzle.solution {
                assert!(
                    engine.apply(&MoveRequest::Notation(san.clone())).is_some(),
                    "{} has illegal solution move {}",
                    puzzle.name,
                    san
                );
            }
        }
    }

    #[test]
    fn test_short_field_names_are_accepted() {
        let openings = r#"[{"id": 3, "name": "X", "eco": "A00", "moves": ["e4"]}]"#;
        let puzzles = r#"[{"id": 4, "name": "Y", "fen": "8/8/8/8/8/8/8/K6k w - - 0 1", "solution": []}]"#;

        let catalog = Catalog::from_json(openings, puzzles).unwrap();

        assert_eq!(catalog.opening(3).unwrap().eco, "A00");
        assert_eq!(catalog.puzzle(4).unwrap().description, "");
    }

    #[test]
    fn test_malformed_json_is_an_error() {
        assert!(Catalog::from_json("{", "[]").is_err());
    }
}
