//! tlog - push timesheet reports into Jira Tempo
//!
//! CLI binary for logging report entries as Tempo worklogs.

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod cli;

#[derive(Parser)]
#[command(name = "tlog")]
#[command(about = "Log timesheet report entries as Jira Tempo worklogs")]
#[command(version)]
struct Cli {
    /// Tab-separated report to read
    #[arg(short, long, global = true, default_value = "data.csv")]
    report: PathBuf,

    /// Session file (defaults to the user data directory)
    #[arg(long, global = true)]
    session: Option<PathBuf>,

    /// Env file with tracker settings (defaults to ./.env)
    #[arg(long, global = true)]
    env_file: Option<PathBuf>,

    /// Verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Log every valid report entry
    Submit {
        /// Dry run - show what would be logged without contacting the tracker
        #[arg(long)]
        dry_run: bool,
    },

    /// Validate the report without logging anything
    Check,

    /// Session management
    Auth {
        #[command(subcommand)]
        action: AuthCommand,
    },
}

#[derive(Subcommand)]
enum AuthCommand {
    /// Check the saved session, logging in again if needed
    Test,
    /// Remove the saved session
    Logout,
}

fn init_tracing(verbose: bool) {
    let filter = EnvFilter::try_from_env("TLOG_LOG").unwrap_or_else(|_| {
        EnvFilter::new(if verbose {
            "tempo_logger=debug,tlog=debug"
        } else {
            "warn"
        })
    });
    let _ = tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .with_target(false)
        .try_init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let paths = cli::Paths {
        report: cli.report,
        session: cli.session,
        env_file: cli.env_file,
    };

    match cli.command {
        None => {
            // Default: submit the report
            cli::run_submit(&paths, false).await?;
        }
        Some(Commands::Submit { dry_run }) => {
            cli::run_submit(&paths, dry_run).await?;
        }
        Some(Commands::Check) => {
            cli::run_check(&paths).await?;
        }
        Some(Commands::Auth { action }) => {
            let action = match action {
                AuthCommand::Test => cli::AuthAction::Test,
                AuthCommand::Logout => cli::AuthAction::Logout,
            };
            cli::run_auth(&paths, action).await?;
        }
    }

    Ok(())
}
