//! Check command - validate the report without contacting the tracker

use crate::cli::Paths;
use crate::cli::progress::CliProgress;
use crate::cli::style::{Tone, mark_done, out};
use anstream::println;
use tempo_logger::config::Config;
use tempo_logger::error::{Error, Result};
use tempo_logger::report::{parse_and_validate, read_report};
use tempo_logger::submit::{ColumnLayout, ProgressCallback, build_queue};
use tempo_logger::types::format_minutes;

/// Run the check command
///
/// Fails when any non-excluded row is invalid.
pub async fn run_check(paths: &Paths) -> Result<()> {
    let config = Config::load(paths.env_file.as_deref())?;
    let rows = read_report(&paths.report)?;
    let total = rows.len();
    let partition = parse_and_validate(rows, &config.exclude_projects);

    let progress = CliProgress::new();
    progress.on_invalid_rows(&partition.invalid).await;

    let invalid = partition.invalid.len();
    let excluded = total - partition.valid.len() - invalid;
    let queue = build_queue(partition.valid);
    let minutes: u32 = queue.iter().map(|e| e.minutes()).sum();

    let layout = ColumnLayout::for_entries(&queue);
    for entry in &queue {
        println!(
            "  {} | {:<tw$} | {:<dw$} | {}",
            out(Tone::Quiet, entry.date_label()),
            entry.task(),
            format_minutes(entry.minutes()),
            entry.description(),
            tw = layout.task_width,
            dw = layout.duration_width,
        );
    }

    println!(
        "{} {} valid, {} excluded, {} invalid ({} to log)",
        mark_done(),
        out(Tone::Highlight, queue.len()),
        out(Tone::Quiet, excluded),
        out(Tone::Skipped, invalid),
        out(Tone::Highlight, format_minutes(minutes))
    );

    if invalid > 0 {
        return Err(Error::Report(format!(
            "{invalid} invalid row{} in {}",
            if invalid == 1 { "" } else { "s" },
            paths.report.display()
        )));
    }
    Ok(())
}
