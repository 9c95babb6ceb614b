//! Terminal styling for `tlog` output
//!
//! Every colored fragment carries a [`Tone`] naming what it means for a
//! timesheet run. `owo-colors` decides per stream whether ANSI codes are
//! emitted (`NO_COLOR`, `CLICOLOR`, TTY detection).

use indicatif::ProgressStyle;
use owo_colors::{OwoColorize, Stream, Style};
use std::fmt::{self, Display};
use std::sync::LazyLock;
use tempo_logger::submit::{ColumnLayout, EntryOutcome};

/// Meaning of a piece of output
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    /// Counts, hosts, logged time
    Highlight,
    /// Worklogs the tracker accepted
    Accepted,
    /// Entries the tracker rejected
    Rejected,
    /// Rows dropped by validation
    Skipped,
    /// Paths, dates and other secondary detail
    Quiet,
    /// Phase headers
    Heading,
    /// No styling
    Plain,
}

impl Tone {
    const fn style(self) -> Style {
        match self {
            Self::Highlight => Style::new().cyan(),
            Self::Accepted => Style::new().green(),
            Self::Rejected => Style::new().red(),
            Self::Skipped => Style::new().yellow(),
            Self::Quiet => Style::new().dimmed(),
            Self::Heading => Style::new().bold(),
            Self::Plain => Style::new(),
        }
    }
}

/// A value painted in a [`Tone`] for one output stream
#[derive(Debug, Clone)]
pub struct Toned<T> {
    value: T,
    tone: Tone,
    stream: Stream,
}

impl<T: Display> Display for Toned<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let style = self.tone.style();
        write!(
            f,
            "{}",
            self.value.if_supports_color(self.stream, |v| v.style(style))
        )
    }
}

/// Paint `value` for stdout
pub const fn out<T>(tone: Tone, value: T) -> Toned<T> {
    Toned {
        value,
        tone,
        stream: Stream::Stdout,
    }
}

/// Paint `value` for stderr
pub const fn err<T>(tone: Tone, value: T) -> Toned<T> {
    Toned {
        value,
        tone,
        stream: Stream::Stderr,
    }
}

/// Green check printed next to completed steps
pub const fn mark_done() -> Toned<&'static str> {
    out(Tone::Accepted, "✓")
}

/// Red cross printed next to failure counts (stderr)
pub const fn mark_failed() -> Toned<&'static str> {
    err(Tone::Rejected, "✗")
}

/// Report line for one processed entry; rejected entries are shown in red
pub fn outcome_line(outcome: &EntryOutcome, layout: &ColumnLayout) -> Toned<String> {
    let tone = if outcome.is_success() {
        Tone::Plain
    } else {
        Tone::Rejected
    };
    out(tone, outcome.line(layout))
}

/// One line of the invalid-row block (stderr)
pub fn invalid_row(json: String) -> Toned<String> {
    err(Tone::Skipped, json)
}

static SPINNER: LazyLock<ProgressStyle> = LazyLock::new(|| {
    ProgressStyle::default_spinner()
        .template("{spinner:.cyan} {msg}")
        .expect("hardcoded spinner template is valid")
        .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏")
});

/// Spinner shown while the tracker session is being established
pub fn spinner_style() -> ProgressStyle {
    SPINNER.clone()
}
