//! Top-k ranking of clusters by occurrence count.

use super::cluster::ClusterState;
use super::normalizer::StackKey;
use crate::utils::error::InvalidArgumentError;
use log::debug;
use serde::Serialize;
use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;

/// One ranked cluster
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RankedEntry {
    pub count: u64,
    pub key: StackKey,
}

impl Ord for RankedEntry {
    /// Higher count ranks first; on equal counts the smaller key wins
    fn cmp(&self, other: &Self) -> Ordering {
        self.count
            .cmp(&other.count)
            .then_with(|| other.key.cmp(&self.key))
    }
}

impl PartialOrd for RankedEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// The `k` most frequent clusters, best first
///
/// Returns `min(k, distinct)` entries; an empty state yields an empty
/// list. Uses a bounded min-heap, so the cost is O(n log k).
///
/// # Errors
/// * `InvalidArgumentError` - `k` is zero
pub fn rank(state: &ClusterState, k: usize) -> Result<Vec<RankedEntry>, InvalidArgumentError> {
    if k == 0 {
        return Err(InvalidArgumentError(k));
    }

    // Never keep more than the state holds, whatever the caller asks for
    let k = k.min(state.distinct());
    let mut heap: BinaryHeap<Reverse<RankedEntry>> = BinaryHeap::with_capacity(k + 1);

    for (&key, &count) in state.counts() {
        heap.push(Reverse(RankedEntry { count, key }));
        if heap.len() > k {
            heap.pop();
        }
    }

    // Ascending order of Reverse is descending rank
    let ranked: Vec<RankedEntry> = heap
        .into_sorted_vec()
        .into_iter()
        .map(|Reverse(entry)| entry)
        .collect();

    debug!(
        "Ranked top {} of {} clusters",
        ranked.len(),
        state.distinct()
    );

    Ok(ranked)
}
