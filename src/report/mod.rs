//! Report file reading and row validation
//!
//! Turns the tab-separated report into validated entries:
//! 1. Read - split lines into raw six-column rows
//! 2. Validate - parse dates and durations, drop excluded projects,
//!    partition into valid and invalid entries

mod read;
mod validate;

pub use read::{parse_report, read_report};
pub use validate::{Partition, parse_and_validate, parse_date, parse_duration_minutes};
