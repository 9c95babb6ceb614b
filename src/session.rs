//! Persisted tracker session
//!
//! The session is an opaque cookie string kept between runs so a fresh login
//! is only needed when the tracker has expired it.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::debug;

/// Session state carried between runs
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    /// Cookie header value accepted by the tracker
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cookies: Option<String>,
}

impl Session {
    /// Session holding the given cookies
    pub fn with_cookies(cookies: impl Into<String>) -> Self {
        Self {
            cookies: Some(cookies.into()),
        }
    }

    /// Non-empty cached cookies, if any
    pub fn cached_cookies(&self) -> Option<&str> {
        self.cookies.as_deref().filter(|c| !c.trim().is_empty())
    }
}

/// Durable storage for [`Session`]
pub trait SessionStore: Send + Sync {
    /// Read the persisted session; empty when nothing is stored
    fn load(&self) -> Result<Session>;

    /// Replace the persisted session
    fn save(&self, session: &Session) -> Result<()>;

    /// Forget the persisted session
    fn clear(&self) -> Result<()>;
}

/// JSON file backed session store
#[derive(Debug, Clone)]
pub struct FileSessionStore {
    path: PathBuf,
}

impl FileSessionStore {
    /// Store at an explicit path
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store at the default per-user location
    ///
    /// Falls back to `.session.json` in the working directory when the
    /// platform has no data directory.
    pub fn default_location() -> Self {
        let path = dirs::data_local_dir().map_or_else(
            || PathBuf::from(".session.json"),
            |dir| dir.join("tempo-logger").join("session.json"),
        );
        Self::new(path)
    }

    /// Path of the session file
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SessionStore for FileSessionStore {
    fn load(&self) -> Result<Session> {
        let text = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "no stored session");
                return Ok(Session::default());
            }
            Err(e) => return Err(e.into()),
        };

        serde_json::from_str(&text).map_err(|e| {
            Error::Session(format!(
                "cannot parse {}: {e}. Delete the file or run `tlog auth logout`",
                self.path.display()
            ))
        })
    }

    fn save(&self, session: &Session) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }

        let json = serde_json::to_string_pretty(session)?;
        let mut tmp_name = self.path.file_name().unwrap_or_default().to_os_string();
        tmp_name.push(".tmp");
        let tmp = self.path.with_file_name(tmp_name);

        fs::write(&tmp, json)?;
        fs::rename(&tmp, &self.path)?;
        debug!(path = %self.path.display(), "session saved");
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        match fs::remove_file(&self.path) {
            Err(e) if e.kind() != std::io::ErrorKind::NotFound => Err(e.into()),
            _ => Ok(()),
        }
    }
}

/// In-memory session store, for tests and one-off runs
#[derive(Debug, Default)]
pub struct MemorySessionStore {
    session: Mutex<Session>,
    saves: Mutex<usize>,
}

impl MemorySessionStore {
    /// Store pre-populated with a session
    pub fn with_session(session: Session) -> Self {
        Self {
            session: Mutex::new(session),
            saves: Mutex::new(0),
        }
    }

    /// Current stored session
    pub fn current(&self) -> Session {
        self.session
            .lock()
            .map(|s| s.clone())
            .unwrap_or_default()
    }

    /// Number of `save` calls so far
    pub fn save_count(&self) -> usize {
        self.saves.lock().map(|n| *n).unwrap_or_default()
    }
}

impl SessionStore for MemorySessionStore {
    fn load(&self) -> Result<Session> {
        Ok(self.current())
    }

    fn save(&self, session: &Session) -> Result<()> {
        let mut stored = self
            .session
            .lock()
            .map_err(|_| Error::Internal("session lock poisoned".to_string()))?;
        *stored = session.clone();
        if let Ok(mut n) = self.saves.lock() {
            *n += 1;
        }
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        self.save(&Session::default())
    }
}
