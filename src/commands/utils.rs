use crate::aggregator::StackKey;
use crate::output::read_report;
use crate::session::load_file;
use crate::utils::config::{REPORT_SCHEMA_VERSION, STACK_NOT_PRESENT};
use anyhow::{Context, Result};
use log::warn;
use std::path::Path;

/// Print the header block and the auxiliary fd list of a leak log
///
/// A missing sub-field is reported and the other one is still printed.
pub fn display_header(log_file: &Path) -> Result<()> {
    let outcome = load_file(log_file)
        .with_context(|| format!("Failed to load leak log {}", log_file.display()))?;

    println!("Printing Header Dict: ");
    match outcome.header.header() {
        Ok(header) => println!("{}", serde_json::to_string_pretty(header)?),
        Err(e) => warn!("{}", e),
    }

    println!("Printing FD List: ");
    match outcome.header.auxiliary_list() {
        Ok(list) => println!("{}", serde_json::to_string_pretty(list)?),
        Err(e) => warn!("{}", e),
    }

    Ok(())
}

/// Print the representative trace for a cluster key
pub fn lookup_stack(log_file: &Path, key: &str) -> Result<()> {
    let key: StackKey = key
        .parse()
        .with_context(|| format!("Invalid stack key '{}', expected hex", key))?;

    let outcome = load_file(log_file)
        .with_context(|| format!("Failed to load leak log {}", log_file.display()))?;

    match outcome.clusters.lookup_trace(key) {
        Some(trace) => {
            println!("Key {} ({} occurrences):", key, outcome.clusters.count(key));
            println!("{}", trace);
        }
        None => println!("{}", STACK_NOT_PRESENT),
    }

    Ok(())
}

/// Validate a report JSON file
pub fn validate_report_file(file_path: &Path) -> Result<()> {
    println!("Validating report: {}", file_path.display());

    let report = read_report(file_path)?;

    println!("✓ Valid report JSON");
    println!("  Version: {}", report.version);
    println!("  Source: {}", report.source);
    println!("  Records: {}", report.total_records);
    println!("  Distinct Clusters: {}", report.distinct_clusters);
    println!("  Skipped Records: {}", report.skipped_records.len());
    println!("  Top Clusters: {}", report.top_clusters.len());

    Ok(())
}

/// Display version information
pub fn display_version() {
    println!("FD Leak Cluster v{}", env!("CARGO_PKG_VERSION"));
    println!("Report Schema: v{}", REPORT_SCHEMA_VERSION);
    println!();
    println!("Groups file-descriptor leak reports by stack trace.");
}
