//! Resilient API client
//!
//! Wraps a [`Transport`] with the policies the UI relies on:
//!
//! - **Bounded wait**: every attempt is cut off after the request timeout and
//!   reported as [`NetworkFailure::Timeout`]
//! - **Retry with backoff**: 5xx responses, transport errors and timeouts are
//!   retried, waiting `n * retry_delay` before attempt `n + 1`; 4xx responses
//!   are returned at once
//! - **Session expiry**: a 401 clears the stored token and broadcasts
//!   [`SessionEnded`] to every subscriber, whichever request detected it
//!
//! Outcomes are values, never errors, so callers can tell "the server said
//! no" ([`ApiOutcome::Rejected`]) from "we could not reach it"
//! ([`ApiOutcome::Unreachable`]).
//!
//! # Usage
//!
//! ```rust,ignore
//! let client = ResilientClient::with_reqwest(settings, Arc::new(MemoryTokenStore::default()))?;
//! let mut ended = client.subscribe();
//! match client.get("/api/games").await {
//!     ApiOutcome::Success { body, .. } => render(body),
//!     ApiOutcome::Rejected { status, .. } => show_error(status),
//!     ApiOutcome::Unreachable(failure) => show_offline_banner(failure),
//! }
//! ```

use crate::core::ClientSettings;
use crate::networking::error::{NetworkError, NetworkResult};
use crate::networking::token_store::TokenStore;
use crate::networking::transport::{
    HttpMethod, HttpRequest, HttpResponse, ReqwestTransport, Transport,
};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::fmt;
use std::sync::Arc;
use tokio::sync::broadcast;
use tokio::time::{sleep, timeout};
use tracing::{debug, info, warn};
use url::Url;

/// Capacity of the session-ended channel; a lagging subscriber only needs the latest
const SESSION_CHANNEL_CAPACITY: usize = 8;

/// Why no response was obtained
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NetworkFailure {
    /// No response within the request timeout
    Timeout,
    /// Transport-level failure (DNS, refused connection, reset, bad URL)
    Connection(String),
}

impl fmt::Display for NetworkFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NetworkFailure::Timeout => f.write_str("Request timeout - server may be down or slow"),
            NetworkFailure::Connection(message) => write!(f, "Network error: {message}"),
        }
    }
}

/// Result of one logical request (after all retries)
#[derive(Debug, Clone, PartialEq)]
pub enum ApiOutcome<T = Value> {
    /// 2xx with the decoded body
    Success { status: u16, body: T },
    /// Server answered with a non-2xx status
    Rejected { status: u16, body: Value },
    /// No response at all
    Unreachable(NetworkFailure),
}

impl<T> ApiOutcome<T> {
    pub fn is_success(&self) -> bool {
        matches!(self, ApiOutcome::Success { .. })
    }

    pub fn is_unreachable(&self) -> bool {
        matches!(self, ApiOutcome::Unreachable(_))
    }

    /// HTTP status, `None` when unreachable
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiOutcome::Success { status, .. } | ApiOutcome::Rejected { status, .. } => {
                Some(*status)
            }
            ApiOutcome::Unreachable(_) => None,
        }
    }

    pub fn success(self) -> Option<T> {
        match self {
            ApiOutcome::Success { body, .. } => Some(body),
            _ => None,
        }
    }

    /// Transform the success body, keeping the other outcomes
    pub fn map_body<U>(self, f: impl FnOnce(T) -> U) -> ApiOutcome<U> {
        match self {
            ApiOutcome::Success { status, body } => ApiOutcome::Success {
                status,
                body: f(body),
            },
            ApiOutcome::Rejected { status, body } => ApiOutcome::Rejected { status, body },
            ApiOutcome::Unreachable(failure) => ApiOutcome::Unreachable(failure),
        }
    }
}

impl ApiOutcome<Value> {
    /// Decode a success body into `U`; other outcomes pass through unchanged
    pub fn decode<U: DeserializeOwned>(self) -> NetworkResult<ApiOutcome<U>> {
        Ok(match self {
            ApiOutcome::Success { status, body } => ApiOutcome::Success {
                status,
                body: serde_json::from_value(body)?,
            },
            ApiOutcome::Rejected { status, body } => ApiOutcome::Rejected { status, body },
            ApiOutcome::Unreachable(failure) => ApiOutcome::Unreachable(failure),
        })
    }
}

/// Broadcast when the server rejects the session credential
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionEnded {
    pub reason: String,
}

/// HTTP client with timeout, retry and session-expiry handling
pub struct ResilientClient {
    transport: Arc<dyn Transport>,
    tokens: Arc<dyn TokenStore>,
    settings: ClientSettings,
    base: Url,
    session_events: broadcast::Sender<SessionEnded>,
}

impl ResilientClient {
    /// Client over an arbitrary transport
    ///
    /// # Errors
    ///
    /// [`NetworkError::InvalidBaseUrl`] when `settings.api_base` is not a URL.
    pub fn new(
        settings: ClientSettings,
        transport: Arc<dyn Transport>,
        tokens: Arc<dyn TokenStore>,
    ) -> NetworkResult<Self> {
        let base = Url::parse(&settings.api_base).map_err(|source| {
            NetworkError::InvalidBaseUrl {
                url: settings.api_base.clone(),
                source,
            }
        })?;
        let (session_events, _) = broadcast::channel(SESSION_CHANNEL_CAPACITY);
        info!("[API] Client ready for {}", base);
        Ok(Self {
            transport,
            tokens,
            settings,
            base,
            session_events,
        })
    }

    /// Client over a fresh `reqwest` transport
    pub fn with_reqwest(
        settings: ClientSettings,
        tokens: Arc<dyn TokenStore>,
    ) -> NetworkResult<Self> {
        let client = reqwest::Client::builder()
            .build()
            .map_err(|err| NetworkError::ClientSetup {
                message: err.to_string(),
            })?;
        Self::new(settings, Arc::new(ReqwestTransport::new(client)), tokens)
    }

    /// Receiver for session-ended notifications
    pub fn subscribe(&self) -> broadcast::Receiver<SessionEnded> {
        self.session_events.subscribe()
    }

    pub fn settings(&self) -> &ClientSettings {
        &self.settings
    }

    pub fn token(&self) -> Option<String> {
        self.tokens.token()
    }

    pub fn set_token(&self, token: Option<String>) {
        self.tokens.set_token(token);
    }

    pub async fn get(&self, path: &str) -> ApiOutcome {
        self.request(HttpMethod::Get, path, None).await
    }

    pub async fn post(&self, path: &str, body: Value) -> ApiOutcome {
        self.request(HttpMethod::Post, path, Some(body)).await
    }

    pub async fn put(&self, path: &str, body: Value) -> ApiOutcome {
        self.request(HttpMethod::Put, path, Some(body)).await
    }

    pub async fn delete(&self, path: &str) -> ApiOutcome {
        self.request(HttpMethod::Delete, path, None).await
    }

    /// Send a request with the full retry policy
    ///
    /// `path` is joined onto the base URL unless it is already absolute.
    pub async fn request(&self, method: HttpMethod, path: &str, body: Option<Value>) -> ApiOutcome {
        let url = match self.resolve(path) {
            Ok(url) => url,
            Err(err) => {
                warn!("[API] Cannot build URL for {}: {}", path, err);
                return ApiOutcome::Unreachable(NetworkFailure::Connection(format!(
                    "invalid URL {path}: {err}"
                )));
            }
        };
        let request = HttpRequest {
            method,
            url,
            bearer: self.tokens.token(),
            body,
        };

        let attempts = self.settings.max_attempts.max(1);
        let mut attempt = 1;
        loop {
            let last = attempt >= attempts;
            let result = timeout(self.settings.request_timeout(), self.transport.send(&request)).await;

            match result {
                Ok(Ok(response)) if response.status >= 500 && !last => {
                    warn!(
                        "[API] {} {} returned {}, retrying ({}/{})",
                        method, request.url, response.status, attempt, attempts
                    );
                }
                Ok(Ok(response)) => return self.finish(&request, response),
                Ok(Err(err)) if !last => {
                    warn!(
                        "[API] {} {} failed, retrying ({}/{}): {}",
                        method, request.url, attempt, attempts, err
                    );
                }
                Ok(Err(err)) => {
                    warn!("[API] {} {} failed: {}", method, request.url, err);
                    return ApiOutcome::Unreachable(NetworkFailure::Connection(err.message));
                }
                Err(_) if !last => {
                    warn!(
                        "[API] {} {} timed out, retrying ({}/{})",
                        method, request.url, attempt, attempts
                    );
                }
                Err(_) => {
                    warn!("[API] {} {} timed out", method, request.url);
                    return ApiOutcome::Unreachable(NetworkFailure::Timeout);
                }
            }

            sleep(self.settings.retry_delay(attempt)).await;
            attempt += 1;
        }
    }

    /// Single unauthenticated probe of `/health`, no retry
    pub async fn check_health(&self) -> bool {
        let Ok(url) = self.base.join("/health") else {
            return false;
        };
        let request = HttpRequest {
            method: HttpMethod::Get,
            url,
            bearer: None,
            body: None,
        };
        match timeout(self.settings.health_timeout(), self.transport.send(&request)).await {
            Ok(Ok(response)) => (200..300).contains(&response.status),
            Ok(Err(err)) => {
                debug!("[API] Health check failed: {}", err);
                false
            }
            Err(_) => {
                debug!("[API] Health check timed out");
                false
            }
        }
    }

    fn resolve(&self, path: &str) -> Result<Url, url::ParseError> {
        if path.starts_with("http://") || path.starts_with("https://") {
            Url::parse(path)
        } else {
            self.base.join(path)
        }
    }

    fn finish(&self, request: &HttpRequest, response: HttpResponse) -> ApiOutcome {
        if response.status == 401 {
            self.end_session("Token expired or invalid");
        }

        let body = serde_json::from_str(&response.body)
            .unwrap_or_else(|_| Value::String(response.body.clone()));
        debug!("[API] {} {} -> {}", request.method, request.url, response.status);

        if (200..300).contains(&response.status) {
            ApiOutcome::Success {
                status: response.status,
                body,
            }
        } else {
            ApiOutcome::Rejected {
                status: response.status,
                body,
            }
        }
    }

    fn end_session(&self, reason: &str) {
        self.tokens.set_token(None);
        info!("[API] Session ended: {}", reason);
        // Fails only when nobody subscribed
        let _ = self.session_events.send(SessionEnded {
            reason: reason.to_string(),
        });
    }
}

impl fmt::Debug for ResilientClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResilientClient")
            .field("base", &self.base.as_str())
            .field("settings", &self.settings)
            .finish_non_exhaustive()
    }
}
