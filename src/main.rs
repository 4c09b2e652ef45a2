//! FD Leak Cluster CLI
//!
//! Clusters file-descriptor leak logs by stack trace and prints the
//! most frequent leak sites.

use anyhow::Result;
use clap::{Parser, Subcommand};
use env_logger::Env;
use std::path::PathBuf;

use fd_leak_cluster::commands::{
    display_header, display_version, execute_analyze, lookup_stack, validate_args,
    validate_report_file, AnalyzeArgs,
};
use fd_leak_cluster::utils::config::{DEFAULT_TOP_K, LOG_PATH_ENV};

/// FD Leak Cluster - stack-trace clustering for fd leak logs
#[derive(Parser, Debug)]
#[command(name = "fd-cluster")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

/// Available commands
#[derive(Subcommand, Debug)]
enum Commands {
    /// Cluster a leak log and rank the top stacks
    Analyze {
        /// Leak log to analyze
        #[arg(short, long, env = LOG_PATH_ENV)]
        file: PathBuf,

        /// Number of top clusters to show
        #[arg(short = 'k', long, default_value_t = DEFAULT_TOP_K)]
        top: usize,

        /// Output path for the JSON report
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Output path for the key -> trace mapping
        #[arg(short, long)]
        export: Option<PathBuf>,

        /// Include key -> count in the exported mapping
        #[arg(long)]
        with_counts: bool,

        /// Do not print the ranking table
        #[arg(short, long)]
        quiet: bool,
    },

    /// Print the header block and fd list of a leak log
    Header {
        /// Leak log to read
        #[arg(short, long, env = LOG_PATH_ENV)]
        file: PathBuf,
    },

    /// Print the trace behind a cluster key
    Lookup {
        /// Leak log to read
        #[arg(short, long, env = LOG_PATH_ENV)]
        file: PathBuf,

        /// Cluster key in hex, as printed by analyze
        #[arg(short, long)]
        key: String,
    },

    /// Validate a report JSON file
    Validate {
        /// Path to report JSON file
        #[arg(short, long)]
        file: PathBuf,
    },

    /// Display version information
    Version,
}

fn main() -> Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Setup logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(Env::default().default_filter_or(log_level)).init();

    // Execute command
    match cli.command {
        Commands::Analyze {
            file,
            top,
            output,
            export,
            with_counts,
            quiet,
        } => {
            let args = AnalyzeArgs {
                log_file: file,
                top_k: top,
                output_json: output,
                export_mapping: export,
                with_counts,
                print_summary: !quiet,
            };

            // Validate args first
            validate_args(&args)?;

            execute_analyze(&args)?;
        }

        Commands::Header { file } => {
            display_header(&file)?;
        }

        Commands::Lookup { file, key } => {
            lookup_stack(&file, &key)?;
        }

        Commands::Validate { file } => {
            validate_report_file(&file)?;
        }

        Commands::Version => {
            display_version();
        }
    }

    Ok(())
}
