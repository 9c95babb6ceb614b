//! Tracker authentication
//!
//! Reuses a cached session when the tracker still accepts it, otherwise logs
//! in with the configured credentials and persists the new session.

mod engine;

pub use engine::{ActiveSession, AuthState, authenticate};

/// Where the active session came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionSource {
    /// Cookies loaded from the session store passed the probe
    Cached,
    /// Cookies obtained by logging in during this run
    FreshLogin,
}
