//! Per-algorithm cache of the most recently recorded trace.

use indexmap::IndexMap;
use sortlab_core::{Algorithm, Trace, Value};
use std::sync::Arc;

/// Cached trace plus the input it was recorded from
#[derive(Debug, Clone)]
struct StoredTrace {
    input: Vec<Value>,
    trace: Arc<Trace>,
}

/// Holds the latest trace for each algorithm.
///
/// An entry is only served back for the exact input it was recorded from;
/// anything else counts as stale and is re-recorded.
#[derive(Debug, Clone, Default)]
pub struct TraceStore {
    entries: IndexMap<Algorithm, StoredTrace>,
    recorded: u64,
}

impl TraceStore {
    /// Create an empty store
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the cached trace for `algorithm` if it was recorded from `input`
    #[must_use]
    pub fn get(&self, algorithm: Algorithm, input: &[Value]) -> Option<Arc<Trace>> {
        self.entries
            .get(&algorithm)
            .filter(|entry| entry.input == input)
            .map(|entry| Arc::clone(&entry.trace))
    }

    /// Get the cached trace, recording a fresh one if missing or stale
    pub fn get_or_record(&mut self, algorithm: Algorithm, input: &[Value]) -> Arc<Trace> {
        if let Some(trace) = self.get(algorithm, input) {
            return trace;
        }

        tracing::debug!(algorithm = algorithm.slug(), "recording trace");
        let trace = Arc::new(crate::record(algorithm, input));
        self.recorded += 1;
        self.entries.insert(
            algorithm,
            StoredTrace {
                input: input.to_vec(),
                trace: Arc::clone(&trace),
            },
        );
        trace
    }

    /// Drop every cached trace
    pub fn invalidate(&mut self) {
        if !self.entries.is_empty() {
            tracing::debug!(dropped = self.entries.len(), "trace store invalidated");
        }
        self.entries.clear();
    }

    /// Drop the cached trace for one algorithm
    pub fn remove(&mut self, algorithm: Algorithm) -> bool {
        self.entries.shift_remove(&algorithm).is_some()
    }

    /// Number of cached traces
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the store is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Total traces recorded over the store's lifetime
    #[must_use]
    pub fn recorded_count(&self) -> u64 {
        self.recorded
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_reuses_trace_for_same_input() {
        let mut store = TraceStore::new();
        let first = store.get_or_record(Algorithm::Bubble, &[3, 1, 2]);
        let second = store.get_or_record(Algorithm::Bubble, &[3, 1, 2]);

        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(store.recorded_count(), 1);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_store_rerecords_stale_input() {
        let mut store = TraceStore::new();
        let first = store.get_or_record(Algorithm::Quick, &[3, 1, 2]);
        let second = store.get_or_record(Algorithm::Quick, &[2, 1]);

        assert!(!Arc::ptr_eq(&first, &second));
        assert_eq!(store.recorded_count(), 2);
        assert_eq!(store.len(), 1);
        assert!(store.get(Algorithm::Quick, &[3, 1, 2]).is_none());
    }

    #[test]
    fn test_store_invalidate() {
        let mut store = TraceStore::new();
        for alg in Algorithm::ALL {
            store.get_or_record(alg, &[2, 1]);
        }
        assert_eq!(store.len(), 6);

        store.invalidate();
        assert!(store.is_empty());
        assert!(store.get(Algorithm::Bubble, &[2, 1]).is_none());
    }

    #[test]
    fn test_store_remove() {
        let mut store = TraceStore::new();
        store.get_or_record(Algorithm::Shell, &[2, 1]);
        assert!(store.remove(Algorithm::Shell));
        assert!(!store.remove(Algorithm::Shell));
    }
}
