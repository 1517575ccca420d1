//! Structural errors that abort an analysis run.
//!
//! Per-symbol resolution misses are not errors; they surface as `None`
//! from the resolvers and the symbol is skipped.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that halt the whole run.
#[derive(Error, Debug)]
pub enum AnalyzerError {
    #[error("cannot read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("cannot parse {path}: {message}")]
    Parse { path: PathBuf, message: String },
    #[error("metadata module not found (looked for {0})")]
    ModuleNotFound(String),
    #[error("unable to load expected type {0:?} from the metadata module")]
    MissingType(String),
    #[error("metadata module carries no title; its identity cannot be determined")]
    MissingTitle,
    #[error("attribute type {0:?} does not declare a Deprecated member")]
    MissingDeprecatedMember(String),
    #[error("attribute {attribute:?} has no unsigned Deprecated value")]
    MissingVersionField { attribute: String },
    #[error("invalid SDK version value {0:?}")]
    InvalidVersion(String),
    #[error("platform type {0:?} enumerates no versions")]
    NoPlatformVersions(String),
    #[error("write failed: {0}")]
    Write(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, AnalyzerError>;
