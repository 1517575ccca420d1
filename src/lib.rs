//! deprecheck - deprecated platform API usage analyzer.
//!
//! deprecheck reads syntax trees already bound by an external front end and
//! reports every use of a platform API that was deprecated at or before a
//! target SDK version. Deprecation metadata comes from a separately loaded
//! metadata module describing the platform binding.
//!
//! # Architecture
//!
//! - `semantic`: syntax tree and semantic model interfaces, plus the
//!   snapshot format the CLI loads
//! - `metadata`: the metadata module and the per-run `TargetContext`
//! - `analysis`: base-type walking and deprecation attribute resolution
//! - `detect`: the four scanners, de-duplication and the runner
//! - `report`: warning line formatting
//! - `config`: optional YAML settings
//! - `cli`: command-line entry point

pub mod analysis;
pub mod cli;
pub mod config;
pub mod detect;
pub mod error;
pub mod logging;
pub mod metadata;
pub mod report;
pub mod semantic;

#[cfg(test)]
mod testing;

pub use detect::{Finding, Findings, RunSummary, Runner, ScanKind, Scanner, TreeFindings};
pub use error::AnalyzerError;
pub use metadata::{MetadataModule, MetadataNames, ModuleBridge, TargetContext};
pub use semantic::{SemanticModel, SolutionSnapshot, SyntaxTree};
