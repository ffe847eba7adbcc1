//! Saved games endpoints
//!
//! A saved game is a snapshot of a session's move list. The server stores
//! the moves as a JSON array encoded in a string, alongside a move count.

use crate::networking::client::{ApiOutcome, ResilientClient};
use crate::networking::error::{NetworkError, NetworkResult};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;

const GAMES_PATH: &str = "/api/games";

/// A game as stored by the backend
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedGame {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub title: String,
    /// JSON array of SAN strings, encoded as a string
    pub moves: String,
    pub moves_count: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub saved_at: Option<DateTime<Utc>>,
}

impl SavedGame {
    /// Snapshot of a move list, titled `Game (N moves)` unless a title is given
    ///
    /// # Errors
    ///
    /// [`NetworkError::EmptyGame`] when `history` is empty.
    pub fn from_history(title: Option<&str>, history: &[String]) -> NetworkResult<Self> {
        if history.is_empty() {
            return Err(NetworkError::EmptyGame);
        }
        let title = title
            .map(str::trim)
            .filter(|title| !title.is_empty())
            .map(str::to_owned)
            .unwrap_or_else(|| format!("Game ({} moves)", history.len()));

        Ok(Self {
            id: None,
            title,
            moves: serde_json::to_string(history)?,
            moves_count: history.len(),
            saved_at: None,
        })
    }

    /// The stored moves, decoded
    pub fn move_list(&self) -> NetworkResult<Vec<String>> {
        Ok(serde_json::from_str(&self.moves)?)
    }
}

/// Saved games on top of a [`ResilientClient`]
///
/// Both endpoints require a session token; without one the call fails
/// locally with [`NetworkError::NotAuthenticated`] and nothing is sent.
#[derive(Debug, Clone, Copy)]
pub struct GamesApi<'a> {
    client: &'a ResilientClient,
}

impl<'a> GamesApi<'a> {
    pub fn new(client: &'a ResilientClient) -> Self {
        Self { client }
    }

    /// Upload a move list
    pub async fn save_game(
        &self,
        title: Option<&str>,
        history: &[String],
    ) -> NetworkResult<ApiOutcome> {
        self.require_token()?;
        let game = SavedGame::from_history(title, history)?;
        info!("[API] Saving game {:?} ({} moves)", game.title, game.moves_count);
        Ok(self.client.post(GAMES_PATH, serde_json::to_value(&game)?).await)
    }

    /// Fetch the current user's saved games
    pub async fn list_games(&self) -> NetworkResult<ApiOutcome<Vec<SavedGame>>> {
        self.require_token()?;
        self.client.get(GAMES_PATH).await.decode()
    }

    fn require_token(&self) -> NetworkResult<()> {
        match self.client.token() {
            Some(_) => Ok(()),
            None => Err(NetworkError::NotAuthenticated),
        }
    }
}
