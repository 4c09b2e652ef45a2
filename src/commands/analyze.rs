//! Analyze command implementation.
//!
//! The analyze command:
//! 1. Loads the leak log
//! 2. Aggregates records into clusters
//! 3. Ranks the top clusters
//! 4. Writes the requested outputs

use super::models::AnalyzeArgs;
use crate::aggregator::rank;
use crate::output::{build_report, export_mapping, ranking_table, write_json, write_report};
use crate::session::{load_file, LoadOutcome};
use crate::utils::config::MAX_TOP_K;
use anyhow::{Context, Result};
use log::{debug, info, warn};
use std::time::Instant;

/// Execute the analyze command
///
/// **Public** - main entry point called from main.rs
///
/// Returns the loaded outcome so callers can inspect it further.
pub fn execute_analyze(args: &AnalyzeArgs) -> Result<LoadOutcome> {
    let start_time = Instant::now();

    info!("Analyzing leak log: {}", args.log_file.display());

    // Step 1: Load and aggregate
    info!("Step 1/3: Loading and clustering records...");
    let outcome = load_file(&args.log_file)
        .with_context(|| format!("Failed to load leak log {}", args.log_file.display()))?;

    if !outcome.skipped.is_empty() {
        warn!(
            "{} records skipped (indices: {:?})",
            outcome.skipped.count(),
            outcome.skipped.indices()
        );
    }

    // Step 2: Rank
    info!("Step 2/3: Ranking top {} clusters...", args.top_k);
    let ranked = rank(&outcome.clusters, args.top_k)?;

    for entry in &ranked {
        debug!("  count {:>6}  key {}", entry.count, entry.key);
    }

    // Step 3: Outputs
    info!("Step 3/3: Writing outputs...");

    let mapping = args
        .export_mapping
        .as_ref()
        .map(|_| export_mapping(&outcome.clusters, args.with_counts));

    if let (Some(path), Some(mapping)) = (&args.export_mapping, &mapping) {
        write_json(mapping, path).context("Failed to write cluster mapping")?;
        info!("✓ Mapping written to: {}", path.display());
    }

    if let Some(path) = &args.output_json {
        let source = args.log_file.display().to_string();
        let report = build_report(&source, &outcome, args.top_k, mapping)?;
        write_report(&report, path).context("Failed to write report JSON")?;
        info!("✓ Report written to: {}", path.display());
    }

    if args.print_summary {
        println!("\n{}", "=".repeat(80));
        println!("FD LEAK CLUSTERS");
        println!("{}", "=".repeat(80));
        println!("Log:              {}", args.log_file.display());
        println!("Records:          {}", outcome.clusters.total_records());
        println!("Distinct stacks:  {}", outcome.clusters.distinct());
        println!("Skipped records:  {}", outcome.skipped.count());
        if outcome.clusters.collisions() > 0 {
            println!("Hash collisions:  {}", outcome.clusters.collisions());
        }
        println!(
            "\nPrinting the first {} stack-hash with the most counts:",
            ranked.len()
        );
        println!("{}", ranking_table(&outcome.clusters, &ranked));
        println!("{}", "=".repeat(80));
    }

    let elapsed = start_time.elapsed();
    info!("Analysis completed in {:.2}s", elapsed.as_secs_f64());

    Ok(outcome)
}

/// Validate analyze arguments
///
/// **Public** - can be called before execute_analyze for early validation
pub fn validate_args(args: &AnalyzeArgs) -> Result<()> {
    if args.log_file.as_os_str().is_empty() {
        anyhow::bail!("Log file path cannot be empty");
    }

    if args.top_k == 0 {
        anyhow::bail!("top must be greater than 0");
    }

    if args.top_k > MAX_TOP_K {
        anyhow::bail!("top is too large (max {})", MAX_TOP_K);
    }

    if args.with_counts && args.export_mapping.is_none() {
        anyhow::bail!("--with-counts requires --export");
    }

    Ok(())
}
