//! Auth command - test and reset the tracker session

use crate::cli::Paths;
use crate::cli::progress::CliProgress;
use crate::cli::style::{Tone, mark_done, out};
use anstream::println;
use tempo_logger::auth::{SessionSource, authenticate};
use tempo_logger::config::Config;
use tempo_logger::error::Result;
use tempo_logger::session::SessionStore;
use tempo_logger::submit::{Phase, ProgressCallback};
use tempo_logger::tracker::TrackerClient;

/// Auth subcommand actions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthAction {
    /// Validate or refresh the session
    Test,
    /// Forget the saved session
    Logout,
}

/// Run the auth test command
pub async fn run_auth_test(paths: &Paths) -> Result<()> {
    let config = Config::load(paths.env_file.as_deref())?;
    let store = paths.session_store();
    let tracker = TrackerClient::new(&config.host)?;
    let progress = CliProgress::new();

    println!("Testing {} authentication...", out(Tone::Highlight, &config.host));
    progress.on_phase(Phase::Authenticating).await;
    let session = match authenticate(&config, &store, &tracker, &progress).await {
        Ok(session) => session,
        Err(e) => {
            progress.on_error(&e).await;
            return Err(e);
        }
    };

    let source = match session.source {
        SessionSource::Cached => "saved session",
        SessionSource::FreshLogin => "fresh login",
    };
    println!("Session source: {}", out(Tone::Accepted, source));
    println!("Session file: {}", out(Tone::Quiet, store.path().display()));
    Ok(())
}

/// Run the auth logout command
pub fn run_auth_logout(paths: &Paths) -> Result<()> {
    let store = paths.session_store();
    store.clear()?;
    println!(
        "{} Removed saved session {}",
        mark_done(),
        out(Tone::Quiet, store.path().display())
    );
    Ok(())
}

/// Wrapper for auth commands
pub async fn run_auth(paths: &Paths, action: AuthAction) -> Result<()> {
    match action {
        AuthAction::Test => run_auth_test(paths).await,
        AuthAction::Logout => run_auth_logout(paths),
    }
}
