//! Shared data models for validation results and the scan report.

pub mod marker;

use serde::Serialize;
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
/// What went wrong at a diagnostic's location.
pub enum DiagnosticKind {
    UnmatchedRestore,
    UnmatchedPush { payload: String },
    ReadFailure { reason: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// A single reported violation. Read failures carry line/column 0.
pub struct Diagnostic {
    pub file: PathBuf,
    pub line: usize,
    pub column: usize,
    pub kind: DiagnosticKind,
}

impl Diagnostic {
    /// Human-readable message without the location prefix.
    pub fn message(&self) -> String {
        match &self.kind {
            DiagnosticKind::UnmatchedRestore => "RESTORE without matching push".to_string(),
            DiagnosticKind::UnmatchedPush { payload } => {
                format!("push '{}' without matching RESTORE", payload)
            }
            DiagnosticKind::ReadFailure { reason } => format!("could not read file: {}", reason),
        }
    }

    /// True when the diagnostic points at a line/column in the file.
    pub fn has_position(&self) -> bool {
        !matches!(self.kind, DiagnosticKind::ReadFailure { .. })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Outcome of validating one file.
pub struct FileResult {
    pub path: PathBuf,
    pub diagnostics: Vec<Diagnostic>,
    pub had_any_marker: bool,
}

impl FileResult {
    pub fn has_issues(&self) -> bool {
        !self.diagnostics.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
/// Counters accumulated over one scan.
pub struct ScanSummary {
    pub files_scanned: usize,
    pub files_with_markers: usize,
    pub files_with_issues: usize,
    pub ok: bool,
}

impl Default for ScanSummary {
    // An empty scan has nothing wrong with it.
    fn default() -> Self {
        ScanSummary {
            files_scanned: 0,
            files_with_markers: 0,
            files_with_issues: 0,
            ok: true,
        }
    }
}

impl ScanSummary {
    /// Fold one file's result into the counters.
    pub fn record(&mut self, result: &FileResult) {
        self.files_scanned += 1;
        if result.had_any_marker {
            self.files_with_markers += 1;
        }
        if result.has_issues() {
            self.files_with_issues += 1;
        }
        self.ok = self.files_with_issues == 0;
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Full result of a scan: per-file results in walk order plus the summary.
pub struct ScanReport {
    pub root: PathBuf,
    pub files: Vec<FileResult>,
    pub summary: ScanSummary,
}

impl ScanReport {
    /// Iterate every diagnostic, grouped by file in walk order.
    pub fn diagnostics(&self) -> impl Iterator<Item = &Diagnostic> {
        self.files.iter().flat_map(|f| f.diagnostics.iter())
    }
}
