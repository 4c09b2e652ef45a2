//! Stack trace normalization and cluster keys.
//!
//! The first line of a leak record carries per-occurrence noise (timestamp,
//! thread id) and must not take part in grouping. What remains is hashed
//! with seahash into a 64-bit `StackKey`. Seahash has a fixed algorithm and
//! no per-process seed, so keys are stable across runs. Two different
//! traces can in theory share a key; `ClusterState` merges them and counts
//! the event as a collision.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Content-derived identity of a normalized stack trace
///
/// Serialized as the 16-digit hex string shown by `Display`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct StackKey(pub u64);

impl StackKey {
    /// Key for text that has already been normalized
    pub fn of(normalized: &str) -> Self {
        Self(seahash::hash(normalized.as_bytes()))
    }
}

impl fmt::Display for StackKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:016x}", self.0)
    }
}

impl FromStr for StackKey {
    type Err = std::num::ParseIntError;

    /// Accepts the hex form printed by `Display`, with or without `0x`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let hex = s.trim();
        let hex = hex.strip_prefix("0x").unwrap_or(hex);
        u64::from_str_radix(hex, 16).map(StackKey)
    }
}

impl From<StackKey> for String {
    fn from(key: StackKey) -> Self {
        key.to_string()
    }
}

impl TryFrom<String> for StackKey {
    type Error = std::num::ParseIntError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// Drop the first line of a raw stack and trim surrounding whitespace
///
/// Text without a line break is kept whole. Empty input gives an empty
/// trace, which is still a valid cluster.
pub fn normalize_stack(raw: &str) -> &str {
    let trimmed = raw.trim();
    match trimmed.find('\n') {
        Some(idx) => &trimmed[idx + 1..],
        None => trimmed,
    }
}

/// Normalize and hash in one step
pub fn stack_key(raw: &str) -> (StackKey, &str) {
    let normalized = normalize_stack(raw);
    (StackKey::of(normalized), normalized)
}
