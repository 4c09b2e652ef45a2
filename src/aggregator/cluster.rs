//! Cluster state: representative trace and occurrence count per key.
//!
//! Both maps share one domain. Entries are only ever inserted or
//! incremented, never removed.

use super::normalizer::{stack_key, StackKey};
use log::warn;
use std::collections::HashMap;

/// Accumulated clusters for one leak log
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClusterState {
    traces: HashMap<StackKey, String>,
    counts: HashMap<StackKey, u64>,
    collisions: u64,
}

impl ClusterState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Normalize a raw stack and count it
    ///
    /// Returns the key the record was filed under.
    pub fn record(&mut self, raw_stack: &str) -> StackKey {
        let (key, normalized) = stack_key(raw_stack);
        self.record_normalized(key, normalized);
        key
    }

    /// Count an already normalized trace under `key`
    ///
    /// The first trace seen for a key stays its representative. A later
    /// trace with the same key but different text is merged into it and
    /// counted as a collision.
    pub fn record_normalized(&mut self, key: StackKey, normalized: &str) {
        match self.traces.get(&key) {
            Some(existing) => {
                if existing != normalized {
                    self.collisions += 1;
                    warn!("Hash collision on key {}; merging into first trace", key);
                }
            }
            None => {
                self.traces.insert(key, normalized.to_string());
            }
        }

        *self.counts.entry(key).or_insert(0) += 1;
    }

    /// Representative trace for a key
    pub fn lookup_trace(&self, key: StackKey) -> Option<&str> {
        self.traces.get(&key).map(String::as_str)
    }

    /// Occurrence count for a key (0 if unknown)
    pub fn count(&self, key: StackKey) -> u64 {
        self.counts.get(&key).copied().unwrap_or(0)
    }

    /// Number of distinct clusters
    pub fn distinct(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Sum of all counts, i.e. the number of records aggregated
    pub fn total_records(&self) -> u64 {
        self.counts.values().sum()
    }

    /// Records merged into a cluster whose representative text differed
    pub fn collisions(&self) -> u64 {
        self.collisions
    }

    pub fn counts(&self) -> &HashMap<StackKey, u64> {
        &self.counts
    }

    pub fn traces(&self) -> &HashMap<StackKey, String> {
        &self.traces
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_groups_by_trace() {
        let mut state = ClusterState::new();
        let a = state.record("t1\nfoo\nbar");
        let b = state.record("t2\nfoo\nbar");
        let c = state.record("t3\nbaz");

        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_eq!(state.distinct(), 2);
        assert_eq!(state.count(a), 2);
        assert_eq!(state.count(c), 1);
        assert_eq!(state.lookup_trace(a), Some("foo\nbar"));
        assert_eq!(state.lookup_trace(c), Some("baz"));
    }

    #[test]
    fn test_maps_share_domain() {
        let mut state = ClusterState::new();
        for raw in ["a\nx", "b\ny", "c\nx", "", "solo"] {
            state.record(raw);
        }

        assert_eq!(state.traces().len(), state.counts().len());
        for key in state.counts().keys() {
            assert!(state.traces().contains_key(key));
        }
    }

    #[test]
    fn test_order_independent() {
        let raws = ["t1\nfoo", "t2\nbar", "t3\nfoo", "t4\nbaz", "t5\nbar", "t6\nfoo"];

        let mut forward = ClusterState::new();
        raws.iter().for_each(|r| {
            forward.record(r);
        });

        let mut backward = ClusterState::new();
        raws.iter().rev().for_each(|r| {
            backward.record(r);
        });

        assert_eq!(forward.counts(), backward.counts());
        assert_eq!(forward.total_records(), raws.len() as u64);
    }

    #[test]
    fn test_empty_trace_is_a_cluster() {
        let mut state = ClusterState::new();
        let key = state.record("   ");
        state.record("");

        assert_eq!(state.count(key), 2);
        assert_eq!(state.lookup_trace(key), Some(""));
    }

    #[test]
    fn test_collision_merges_into_first_trace() {
        let mut state = ClusterState::new();
        let key = StackKey(7);
        state.record_normalized(key, "first");
        state.record_normalized(key, "second");
        state.record_normalized(key, "first");

        assert_eq!(state.count(key), 3);
        assert_eq!(state.lookup_trace(key), Some("first"));
        assert_eq!(state.collisions(), 1);
        assert_eq!(state.distinct(), 1);
    }

    #[test]
    fn test_unknown_key() {
        let state = ClusterState::new();
        assert_eq!(state.lookup_trace(StackKey(1)), None);
        assert_eq!(state.count(StackKey(1)), 0);
        assert!(state.is_empty());
    }
}
