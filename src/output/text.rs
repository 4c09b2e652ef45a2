//! Plain-text cluster summary for the terminal.

use super::json::share;
use crate::aggregator::{ClusterState, RankedEntry};

const FRAME_WIDTH: usize = 60;

/// Render ranked clusters as a table: count, share, key, first frame
pub fn ranking_table(state: &ClusterState, ranked: &[RankedEntry]) -> String {
    let total = state.total_records();
    let mut lines = Vec::with_capacity(ranked.len() + 3);

    lines.push(format!(
        "  {:>4}  {:>8}  {:>7}  {:<16}  {}",
        "#", "COUNT", "%", "KEY", "TOP FRAME"
    ));
    lines.push(format!("  {}", "-".repeat(FRAME_WIDTH + 45)));

    for (i, entry) in ranked.iter().enumerate() {
        let trace = state.lookup_trace(entry.key).unwrap_or_default();
        lines.push(format!(
            "  {:>4}  {:>8}  {:>6.1}%  {:<16}  {}",
            i + 1,
            entry.count,
            share(entry.count, total),
            entry.key,
            first_frame(trace)
        ));
    }

    if ranked.is_empty() {
        lines.push("  (no clusters)".to_string());
    }

    lines.join("\n")
}

/// First non-empty line of a trace, shortened for display
fn first_frame(trace: &str) -> String {
    let frame = trace
        .lines()
        .map(str::trim)
        .find(|l| !l.is_empty())
        .unwrap_or("<empty>");

    if frame.chars().count() > FRAME_WIDTH {
        let head: String = frame.chars().take(FRAME_WIDTH - 3).collect();
        format!("{}...", head)
    } else {
        frame.to_string()
    }
}
