//! Submission queue ordering

use crate::types::ParsedEntry;
use std::collections::HashMap;

/// Order valid entries for sequential submission
///
/// Entries are grouped by task key. Groups keep the order in which their
/// task first appears; entries inside a group keep report order. The groups
/// are then flattened into one queue.
pub fn build_queue(entries: Vec<ParsedEntry>) -> Vec<ParsedEntry> {
    let mut index: HashMap<String, usize> = HashMap::new();
    let mut groups: Vec<Vec<ParsedEntry>> = Vec::new();

    for entry in entries {
        let slot = *index.entry(entry.task().to_string()).or_insert_with(|| {
            groups.push(Vec::new());
            groups.len() - 1
        });
        groups[slot].push(entry);
    }

    groups.into_iter().flatten().collect()
}
