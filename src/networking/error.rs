//! Error types for networking module
//!
//! Local failures only. Anything the server or the network does to a request
//! is an [`ApiOutcome`](super::ApiOutcome) value, not an error.

use thiserror::Error;

/// Errors that can occur before a request is sent or after a response is read
#[derive(Error, Debug)]
pub enum NetworkError {
    /// Configured base URL cannot be parsed
    #[error("Invalid API base URL {url}: {source}")]
    InvalidBaseUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    /// Request body or response body does not (de)serialize
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Saving a game with no moves
    #[error("No moves to save")]
    EmptyGame,

    /// Endpoint requires a session token and none is stored
    #[error("Not authenticated")]
    NotAuthenticated,

    /// HTTP client could not be constructed
    #[error("HTTP client setup failed: {message}")]
    ClientSetup { message: String },
}

/// Result type alias for networking operations
pub type NetworkResult<T> = Result<T, NetworkError>;
