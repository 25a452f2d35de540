//! Per-file marker nesting validation.
//!
//! A single pass over the file's lines keeps a stack of open pushes:
//! - a push opens a scope and is stacked with its position;
//! - a RESTORE closes the most recent open push, whatever its tag;
//! - a RESTORE with nothing open is reported where it stands;
//! - pushes still open at end of file are reported where they were opened,
//!   earliest first.
//!
//! Tags are informational only. `PUSH(A) PUSH(B) RESTORE RESTORE` is
//! balanced for any `A` and `B`.

use crate::models::marker::{MarkerKind, PendingPush};
use crate::models::{Diagnostic, DiagnosticKind, FileResult};
use crate::tokenizer::Tokenizer;
use std::fs;
use std::path::Path;

/// Validate already-materialized lines of `path`. Line numbers start at 1.
pub fn validate_lines<'a, I>(path: &Path, lines: I, tokenizer: &Tokenizer) -> FileResult
where
    I: IntoIterator<Item = &'a str>,
{
    let mut stack: Vec<PendingPush> = Vec::new();
    let mut diagnostics: Vec<Diagnostic> = Vec::new();
    let mut had_any_marker = false;

    for (idx, line) in lines.into_iter().enumerate() {
        for token in tokenizer.tokens(line, idx + 1) {
            had_any_marker = true;
            match token.kind {
                MarkerKind::Push { payload } => stack.push(PendingPush {
                    payload,
                    line: token.line,
                    column: token.column,
                }),
                MarkerKind::Restore => {
                    if stack.pop().is_none() {
                        diagnostics.push(Diagnostic {
                            file: path.to_path_buf(),
                            line: token.line,
                            column: token.column,
                            kind: DiagnosticKind::UnmatchedRestore,
                        });
                    }
                }
            }
        }
    }

    // Bottom of the stack is the earliest push.
    diagnostics.extend(stack.into_iter().map(|p| Diagnostic {
        file: path.to_path_buf(),
        line: p.line,
        column: p.column,
        kind: DiagnosticKind::UnmatchedPush { payload: p.payload },
    }));

    FileResult {
        path: path.to_path_buf(),
        diagnostics,
        had_any_marker,
    }
}

/// Validate a whole file in `text`.
pub fn validate_text(path: &Path, text: &str, tokenizer: &Tokenizer) -> FileResult {
    validate_lines(path, text.lines(), tokenizer)
}

/// Read and validate `path`.
///
/// An unreadable or non-UTF-8 file yields a single read-failure diagnostic
/// instead of an error, so one bad file never stops the scan.
pub fn validate_file(path: &Path, tokenizer: &Tokenizer) -> FileResult {
    match fs::read_to_string(path) {
        Ok(text) => validate_text(path, &text, tokenizer),
        Err(err) => {
            tracing::warn!(file = %path.display(), error = %err, "could not read file");
            FileResult {
                path: path.to_path_buf(),
                diagnostics: vec![Diagnostic {
                    file: path.to_path_buf(),
                    line: 0,
                    column: 0,
                    kind: DiagnosticKind::ReadFailure {
                        reason: err.to_string(),
                    },
                }],
                had_any_marker: false,
            }
        }
    }
}
