//! CLI commands
//!
//! Command implementations for the `tlog` binary.

mod auth;
mod check;
mod progress;
mod style;
mod submit;

pub use auth::{AuthAction, run_auth};
pub use check::run_check;
pub use submit::run_submit;

use std::path::PathBuf;
use tempo_logger::session::FileSessionStore;

/// File locations shared by all commands
#[derive(Debug, Clone)]
pub struct Paths {
    /// Report file to read
    pub report: PathBuf,
    /// Session file override
    pub session: Option<PathBuf>,
    /// `.env` file override
    pub env_file: Option<PathBuf>,
}

impl Paths {
    /// Session store at the configured or default location
    pub fn session_store(&self) -> FileSessionStore {
        self.session
            .as_ref()
            .map_or_else(FileSessionStore::default_location, |p| FileSessionStore::new(p.clone()))
    }
}
