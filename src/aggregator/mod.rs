//! Aggregation of leak records into stack-trace clusters.
//!
//! This module turns raw stack texts into:
//! - Normalized traces and their 64-bit keys
//! - Per-key counts with a representative trace
//! - A top-k ranking of the most frequent clusters

pub mod cluster;
pub mod normalizer;
pub mod ranker;

// Re-export main types and functions
pub use cluster::ClusterState;
pub use normalizer::{normalize_stack, stack_key, StackKey};
pub use ranker::{rank, RankedEntry};
