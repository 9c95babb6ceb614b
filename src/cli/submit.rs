//! Submit command - log every valid report entry on the tracker

use crate::cli::Paths;
use crate::cli::progress::CliProgress;
use crate::cli::style::{Tone, err, mark_done, mark_failed, out};
use anstream::{eprintln, println};
use tempo_logger::config::Config;
use tempo_logger::error::Result;
use tempo_logger::report::{parse_and_validate, read_report};
use tempo_logger::submit::{ProgressCallback, RunContext, report_dry_run, run_submission};
use tempo_logger::tracker::{RegexScraper, TrackerClient};
use tempo_logger::types::format_minutes;
use tracing::debug;

/// Run the submit command
pub async fn run_submit(paths: &Paths, dry_run: bool) -> Result<()> {
    let config = Config::load(paths.env_file.as_deref())?;
    debug!(?config, "config loaded");

    let rows = read_report(&paths.report)?;
    let partition = parse_and_validate(rows, &config.exclude_projects);

    let progress = CliProgress::new();

    if dry_run {
        progress
            .on_message("Dry run - no changes will be made")
            .await;
        let queue = report_dry_run(partition, &progress).await;
        println!();
        println!(
            "{} entr{} would be logged",
            out(Tone::Highlight, queue.len()),
            if queue.len() == 1 { "y" } else { "ies" }
        );
        return Ok(());
    }

    let store = paths.session_store();
    let tracker = TrackerClient::new(&config.host)?;
    let scraper = RegexScraper;
    let ctx = RunContext {
        config: &config,
        store: &store,
        tracker: &tracker,
        scraper: &scraper,
        progress: &progress,
    };

    let report = run_submission(partition, &ctx).await?;

    if report.outcomes.is_empty() {
        return Ok(());
    }

    println!();
    println!(
        "{} Logged {} entr{} ({})",
        mark_done(),
        out(Tone::Accepted, report.succeeded()),
        if report.succeeded() == 1 { "y" } else { "ies" },
        out(Tone::Highlight, format_minutes(report.logged_minutes()))
    );
    if report.failed() > 0 {
        eprintln!(
            "{} {} entr{} failed",
            mark_failed(),
            err(Tone::Rejected, report.failed()),
            if report.failed() == 1 { "y" } else { "ies" }
        );
    }

    Ok(())
}
