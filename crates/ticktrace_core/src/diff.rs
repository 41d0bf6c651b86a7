//! Additive snapshot diffs.
//!
//! A diff entry lists only the top-level keys that appeared since the
//! previous snapshot. Removed keys and changed values are not reported, and
//! nested structure is never inspected.

use crate::snapshot::Snapshot;
use indexmap::IndexSet;
use serde_json::{Map, Value};

/// Engine for deriving diffs between consecutive snapshots
pub struct DiffEngine;

impl DiffEngine {
    /// Create a new diff engine (unit struct)
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Keys of `next` absent from `prev`, with their values from `next`
    #[must_use]
    pub fn added_keys(&self, prev: &Snapshot, next: &Snapshot) -> Map<String, Value> {
        let prev_keys: IndexSet<String> = prev.top_level_keys().into_iter().collect();

        let mut added = Map::new();
        for key in next.top_level_keys() {
            if prev_keys.contains(&key) {
                continue;
            }
            if let Some(value) = next.get(&key) {
                added.insert(key, value.clone());
            }
        }
        added
    }

    /// One entry per snapshot.
    ///
    /// Entry 0 is the first snapshot verbatim; every later entry is the
    /// object of keys added relative to its predecessor.
    #[must_use]
    pub fn diffs(&self, snapshots: &[Snapshot]) -> Vec<Value> {
        let Some(first) = snapshots.first() else {
            return Vec::new();
        };

        let mut out = Vec::with_capacity(snapshots.len());
        out.push(first.as_value().clone());
        for pair in snapshots.windows(2) {
            out.push(Value::Object(self.added_keys(&pair[0], &pair[1])));
        }
        out
    }
}

impl Default for DiffEngine {
    fn default() -> Self {
        Self::new()
    }
}
