//! Error types for tempo-logger

use thiserror::Error;

/// Why authentication could not produce a usable session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthFailure {
    /// Tracker rejected the login/password pair
    Credentials,
    /// Tracker demands a captcha; a browser login is required first
    Captcha,
    /// Login succeeded but the new session failed the probe request
    ProbeFailed,
}

impl std::fmt::Display for AuthFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Credentials => write!(f, "wrong login and/or password"),
            Self::Captcha => write!(f, "captcha requested"),
            Self::ProbeFailed => write!(f, "session probe failed after login"),
        }
    }
}

/// Errors that can occur in tempo-logger
#[derive(Error, Debug)]
pub enum Error {
    /// Invalid or missing setting
    #[error("config: {0}")]
    Config(String),

    /// Authentication failed; the run cannot continue
    #[error("auth: {0}. {1}")]
    Auth(AuthFailure, String),

    /// Persisted session is unreadable
    #[error("session: {0}")]
    Session(String),

    /// Report file problem
    #[error("report: {0}")]
    Report(String),

    /// Issue page did not expose a numeric id
    #[error("issue not found: {0}")]
    IssueNotFound(String),

    /// Tracker answered with a non-success status
    #[error("http {status}: {body}")]
    Http {
        /// Response status code
        status: u16,
        /// Response body text
        body: String,
    },

    /// Page markup did not match what the scraper expects
    #[error("scrape: {0}")]
    Scrape(String),

    /// Transport-level HTTP failure
    #[error("request: {0}")]
    Request(#[from] reqwest::Error),

    /// JSON encode/decode failure
    #[error("json: {0}")]
    Json(#[from] serde_json::Error),

    /// I/O error
    #[error("io: {0}")]
    Io(#[from] std::io::Error),

    /// Internal error
    #[error("internal: {0}")]
    Internal(String),
}

impl Error {
    /// Whether the error must abort the run before (or instead of) processing entries
    pub const fn is_fatal(&self) -> bool {
        matches!(
            self,
            Self::Config(_) | Self::Auth(..) | Self::Session(_) | Self::Report(_)
        )
    }

    /// HTTP status carried by the error, if any
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Http { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Result type alias for tempo-logger operations
pub type Result<T> = std::result::Result<T, Error>;
