//! Scan runner: validates every candidate file and aggregates the report.
//!
//! Files are validated in parallel; results are collected in walk order and
//! folded into the summary afterwards, so counts and output do not depend on
//! scheduling.

use crate::error::{Result, SetupError};
use crate::models::{FileResult, ScanReport, ScanSummary};
use crate::tokenizer::Tokenizer;
use crate::validate::validate_file;
use crate::walker::{collect_files, FileFilter};
use rayon::prelude::*;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone)]
/// Everything a scan needs besides the root.
pub struct ScanOptions {
    pub include: Vec<String>,
    pub exclude: Vec<String>,
    pub follow_symlinks: bool,
    pub prefix: String,
    /// Worker threads; `None` uses rayon's default pool.
    pub jobs: Option<usize>,
}

/// Check that `root` exists and is a directory.
pub fn check_root(root: &Path) -> Result<()> {
    if !root.exists() {
        return Err(SetupError::RootNotFound(root.to_path_buf()));
    }
    if !root.is_dir() {
        return Err(SetupError::RootNotDirectory(root.to_path_buf()));
    }
    Ok(())
}

/// Fold per-file results into a report. Order of `files` is preserved.
pub fn aggregate(root: &Path, files: Vec<FileResult>) -> ScanReport {
    let mut summary = ScanSummary::default();
    for f in &files {
        summary.record(f);
    }
    ScanReport {
        root: root.to_path_buf(),
        files,
        summary,
    }
}

/// Validate `paths` with `tokenizer`, in parallel, returning results in input order.
pub fn validate_all(paths: &[PathBuf], tokenizer: &Tokenizer) -> Vec<FileResult> {
    paths
        .par_iter()
        .map(|path| {
            let res = validate_file(path, tokenizer);
            tracing::debug!(
                file = %path.display(),
                markers = res.had_any_marker,
                diagnostics = res.diagnostics.len(),
                "validated"
            );
            res
        })
        .collect()
}

/// Run a full scan of `root`.
///
/// Only setup problems (bad root, bad pattern, bad prefix, pool failure)
/// are returned as errors; unreadable files end up in the report.
pub fn run_scan(root: &Path, opts: &ScanOptions) -> Result<ScanReport> {
    check_root(root)?;
    let tokenizer = Tokenizer::new(&opts.prefix)?;
    let filter = FileFilter::new(&opts.include, &opts.exclude, opts.follow_symlinks)?;

    tracing::info!(root = %root.display(), "scan started");
    let paths = collect_files(root, &filter);
    tracing::debug!(candidates = paths.len(), "collected candidate files");

    let results = match opts.jobs {
        Some(n) if n > 0 => {
            let pool = rayon::ThreadPoolBuilder::new()
                .num_threads(n)
                .build()
                .map_err(|e| SetupError::WorkerPool(e.to_string()))?;
            pool.install(|| validate_all(&paths, &tokenizer))
        }
        _ => validate_all(&paths, &tokenizer),
    };

    let report = aggregate(root, results);
    tracing::info!(
        files_scanned = report.summary.files_scanned,
        files_with_markers = report.summary.files_with_markers,
        files_with_issues = report.summary.files_with_issues,
        "scan finished"
    );
    Ok(report)
}
