//! Networking module - resilient access to the trainer backend
//!
//! Nothing here touches the game session. The UI reads a move list from the
//! session and hands it to [`GamesApi`]; the connection monitor only
//! publishes connectivity.
//!
//! # Module Organization
//!
//! - `transport` - `Transport` trait and the reqwest implementation
//! - `client` - `ResilientClient`: timeout, retry with backoff, session-expiry broadcast
//! - `token_store` - Where the session token lives (memory or file)
//! - `monitor` - Periodic health probe published on a watch channel
//! - `games_api` - Saved games endpoints
//! - `error` - `NetworkError` for local failures

pub mod client;
pub mod error;
pub mod games_api;
pub mod monitor;
pub mod token_store;
pub mod transport;

pub use client::{ApiOutcome, NetworkFailure, ResilientClient, SessionEnded};
pub use error::{NetworkError, NetworkResult};
pub use games_api::{GamesApi, SavedGame};
pub use monitor::{ConnectionMonitor, ConnectionStatus};
pub use token_store::{FileTokenStore, MemoryTokenStore, TokenStore};
pub use transport::{HttpMethod, HttpRequest, HttpResponse, ReqwestTransport, Transport, TransportError};
