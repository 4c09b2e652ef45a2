//! FD Leak Cluster
//!
//! Groups file-descriptor leak reports by stack trace and ranks the
//! most frequent leak sites.
//!
//! ```ignore
//! use fd_leak_cluster::{aggregator::rank, session::load_file};
//!
//! let outcome = load_file("leak.log")?;
//! for entry in rank(&outcome.clusters, 5)? {
//!     println!("{} {}", entry.count, entry.key);
//! }
//! ```

pub mod aggregator;
pub mod commands;
pub mod output;
pub mod parser;
pub mod session;
pub mod utils;

pub use aggregator::{rank, ClusterState, RankedEntry, StackKey};
pub use session::{load, load_file, LoadOutcome, SkipReport};
