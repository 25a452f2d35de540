//! Setup errors that abort a run before any file is scanned.
//!
//! Per-file problems are not errors in this sense; they become diagnostics
//! in the scan report.

use std::path::PathBuf;
use thiserror::Error;

/// Fatal conditions detected while preparing a scan.
#[derive(Debug, Error)]
pub enum SetupError {
    #[error("root path does not exist: {}", .0.display())]
    RootNotFound(PathBuf),

    #[error("root path is not a directory: {}", .0.display())]
    RootNotDirectory(PathBuf),

    #[error("invalid glob pattern '{pattern}': {reason}")]
    InvalidPattern { pattern: String, reason: String },

    #[error("invalid marker prefix: {0}")]
    InvalidPrefix(String),

    #[error("could not read config file {}: {source}", .path.display())]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config file {}: {reason}", .path.display())]
    ConfigParse { path: PathBuf, reason: String },

    #[error("invalid output mode '{0}' (expected human or json)")]
    InvalidOutput(String),

    #[error("failed to start worker pool: {0}")]
    WorkerPool(String),
}

pub type Result<T> = std::result::Result<T, SetupError>;
