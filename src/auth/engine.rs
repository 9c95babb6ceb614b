//! Session validation and login

use crate::auth::SessionSource;
use crate::config::Config;
use crate::error::{AuthFailure, Error, Result};
use crate::session::{Session, SessionStore};
use crate::submit::ProgressCallback;
use crate::tracker::TrackerService;
use tracing::{debug, info};

/// Authentication progress states
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthState {
    /// Nothing loaded yet
    NoSession,
    /// Testing the cached cookies
    ProbingCached,
    /// Cached cookies were rejected
    ProbeFailed,
    /// Logging in with credentials
    LoggingIn,
    /// A usable session exists
    Authenticated,
}

impl std::fmt::Display for AuthState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NoSession => write!(f, "Loading session"),
            Self::ProbingCached => write!(f, "Checking saved session"),
            Self::ProbeFailed => write!(f, "Saved session expired"),
            Self::LoggingIn => write!(f, "Logging in"),
            Self::Authenticated => write!(f, "Authenticated"),
        }
    }
}

/// Tracker access bound to a validated session
pub struct ActiveSession {
    /// Tracker service sending the session cookies
    pub tracker: Box<dyn TrackerService>,
    /// Where the session came from
    pub source: SessionSource,
}

impl std::fmt::Debug for ActiveSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ActiveSession")
            .field("source", &self.source)
            .finish_non_exhaustive()
    }
}

/// Ensure a usable tracker session exists
///
/// `tracker` is the session-less client; the returned session holds a new
/// client carrying the cookies. `progress` observes every state transition.
///
/// Flow:
/// 1. Load the stored session and probe its cookies, if any
/// 2. On probe failure (or no cookies) log in once
/// 3. Probe the new cookies; persist them only when the probe passes
pub async fn authenticate(
    config: &Config,
    store: &dyn SessionStore,
    tracker: &dyn TrackerService,
    progress: &dyn ProgressCallback,
) -> Result<ActiveSession> {
    progress.on_auth_state(AuthState::NoSession).await;
    let session = store.load()?;

    if let Some(cookies) = session.cached_cookies() {
        progress.on_auth_state(AuthState::ProbingCached).await;
        let cached = tracker.with_cookies(cookies)?;
        if cached.probe().await {
            info!("using saved tracker session");
            progress.on_auth_state(AuthState::Authenticated).await;
            return Ok(ActiveSession {
                tracker: cached,
                source: SessionSource::Cached,
            });
        }
        debug!("saved session rejected by tracker");
        progress.on_auth_state(AuthState::ProbeFailed).await;
    }

    progress.on_auth_state(AuthState::LoggingIn).await;
    info!(login = %config.login, host = %config.host, "logging in to tracker");
    let cookies = tracker.login(&config.login, &config.password).await?;

    let fresh = tracker.with_cookies(&cookies)?;
    if !fresh.probe().await {
        return Err(Error::Auth(
            AuthFailure::ProbeFailed,
            "Logged in successfully, but the session check request failed".to_string(),
        ));
    }

    store.save(&Session::with_cookies(cookies))?;
    info!("new tracker session saved");
    progress.on_auth_state(AuthState::Authenticated).await;

    Ok(ActiveSession {
        tracker: fresh,
        source: SessionSource::FreshLogin,
    })
}
