//! tempo-logger - push timesheet reports into Jira Tempo worklogs
//!
//! Reads a tab-separated report, validates each row, and logs every valid
//! entry on the tracker one at a time, keeping each issue's remaining
//! estimate consistent with the time logged.

pub mod auth;
pub mod config;
pub mod error;
pub mod report;
pub mod session;
pub mod submit;
pub mod tracker;
pub mod types;
