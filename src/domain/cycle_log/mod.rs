//! Cycle log module - the append-only journal of daily entries.

mod entry;
mod flow;

pub use entry::CycleLogEntry;
pub use flow::Flow;

use serde::{Deserialize, Serialize};

/// Insertion-ordered sequence of log entries.
///
/// Entries can only be appended; nothing reorders or removes them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CycleLog {
    entries: Vec<CycleLogEntry>,
}

impl CycleLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&mut self, entry: CycleLogEntry) {
        self.entries.push(entry);
    }

    pub fn entries(&self) -> &[CycleLogEntry] {
        &self.entries
    }

    pub fn latest(&self) -> Option<&CycleLogEntry> {
        self.entries.last()
    }

    /// The last `n` entries, oldest first.
    pub fn recent(&self, n: usize) -> &[CycleLogEntry] {
        let start = self.entries.len().saturating_sub(n);
        &self.entries[start..]
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
