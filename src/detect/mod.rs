//! Deprecated API detection over syntax trees.

mod dedupe;
mod runner;
mod scanner;
mod types;

pub use dedupe::remove_duplicates;
pub use runner::{RunSummary, Runner, TreeFindings};
pub use scanner::{ScanKind, Scanner};
pub use types::{Finding, Findings};
