//! marknest core library.
//!
//! Checks that paired push/RESTORE markers (by default the
//! `ALIB_WARNINGS_*` family) are correctly nested in every file of a tree.
//!
//! High-level modules:
//! - `tokenizer`: Finds marker occurrences within one line.
//! - `validate`: Stack-based per-file nesting check.
//! - `walker`: Candidate file discovery with include/exclude globs.
//! - `scan`: Parallel validation and report aggregation.
//! - `models`: Tokens, diagnostics, per-file results and the scan summary.
//! - `output`: Human/JSON printers.
//! - `config`: Config file discovery and effective settings.
//! - `cli`: CLI argument parsing (binary uses this).
//! - `error`: Setup errors.
//! - `logging`: tracing subscriber setup.
pub mod cli;
pub mod config;
pub mod error;
pub mod logging;
pub mod models;
pub mod output;
pub mod scan;
pub mod tokenizer;
pub mod validate;
pub mod walker;
