//! Session token storage
//!
//! The client reads the bearer token through [`TokenStore`] and clears it when
//! the server reports the session as expired. Where the token actually lives
//! is up to the host.

use directories::ProjectDirs;
use parking_lot::RwLock;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

const TOKEN_FILENAME: &str = "session_token";

/// Holder of the current session token
pub trait TokenStore: Send + Sync {
    fn token(&self) -> Option<String>;

    /// Store a token, or forget it with `None`
    fn set_token(&self, token: Option<String>);
}

/// Token kept for the lifetime of the process
#[derive(Debug, Default)]
pub struct MemoryTokenStore {
    token: RwLock<Option<String>>,
}

impl MemoryTokenStore {
    pub fn new(token: Option<String>) -> Self {
        Self {
            token: RwLock::new(token),
        }
    }
}

impl TokenStore for MemoryTokenStore {
    fn token(&self) -> Option<String> {
        self.token.read().clone()
    }

    fn set_token(&self, token: Option<String>) {
        *self.token.write() = token;
    }
}

/// Token persisted in a file, cached in memory
///
/// Write failures are logged and the in-memory value still changes, so a
/// read-only data dir degrades to a per-process login.
#[derive(Debug)]
pub struct FileTokenStore {
    path: PathBuf,
    cached: RwLock<Option<String>>,
}

impl FileTokenStore {
    /// Open the store at `path`, loading any token already saved there
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let cached = fs::read_to_string(&path)
            .ok()
            .map(|contents| contents.trim().to_string())
            .filter(|token| !token.is_empty());
        debug!(
            "[TOKEN] Opened token store at {:?} (token present: {})",
            path,
            cached.is_some()
        );
        Self {
            path,
            cached: RwLock::new(cached),
        }
    }

    /// Token file under the platform data dir
    pub fn default_path() -> PathBuf {
        match ProjectDirs::from("com", "chess-trainer", "ChessTrainer") {
            Some(dirs) => dirs.data_dir().join(TOKEN_FILENAME),
            None => PathBuf::from(TOKEN_FILENAME),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn persist(&self, token: Option<&str>) -> std::io::Result<()> {
        match token {
            Some(token) => {
                if let Some(parent) = self.path.parent() {
                    if !parent.as_os_str().is_empty() {
                        fs::create_dir_all(parent)?;
                    }
                }
                fs::write(&self.path, token)
            }
            None if self.path.exists() => fs::remove_file(&self.path),
            None => Ok(()),
        }
    }
}

impl TokenStore for FileTokenStore {
    fn token(&self) -> Option<String> {
        self.cached.read().clone()
    }

    fn set_token(&self, token: Option<String>) {
        if let Err(e) = self.persist(token.as_deref()) {
            warn!("[TOKEN] Failed to update token file at {:?}: {}", self.path, e);
        }
        *self.cached.write() = token;
    }
}
