//! Run-scoped table of command strings already recorded.

use std::collections::HashMap;

use crate::core::types::ExecutionResult;

/// Maps an exact command string to every result recorded for it, in order.
///
/// The first entry for a key is the one that ran (or was simulated); later
/// entries are skips. The table only grows and lives for a single run.
#[derive(Debug, Default)]
pub struct DedupTable {
    entries: HashMap<String, Vec<ExecutionResult>>,
}

impl DedupTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, command: &str) -> bool {
        self.entries.contains_key(command)
    }

    /// Start the entry for a command seen for the first time.
    ///
    /// Returns `false` (and leaves the table untouched) if the key already exists.
    pub fn seed(&mut self, result: ExecutionResult) -> bool {
        if self.entries.contains_key(&result.command) {
            return false;
        }
        self.entries.insert(result.command.clone(), vec![result]);
        true
    }

    /// Append to an existing entry. Returns `false` if the command was never seeded.
    pub fn append(&mut self, result: ExecutionResult) -> bool {
        match self.entries.get_mut(&result.command) {
            Some(list) => {
                list.push(result);
                true
            }
            None => false,
        }
    }

    pub fn get(&self, command: &str) -> Option<&[ExecutionResult]> {
        self.entries.get(command).map(Vec::as_slice)
    }

    /// Number of distinct command strings.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
