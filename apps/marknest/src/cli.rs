//! CLI argument parsing via `clap`.

use crate::config::CliOverrides;
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "marknest",
    version,
    about = "Check that push/RESTORE markers are correctly nested in every file of a tree",
    long_about = "marknest scans a directory tree and checks, per file, that every marker push \
                  (e.g. ALIB_WARNINGS_IGNORE_DOCS) is closed by a later RESTORE marker and that no \
                  RESTORE appears without an open push.\n\nConfiguration precedence: CLI > marknest.toml > defaults.",
    after_help = "The root comes first: --include/--exclude take every following value.\n\nExamples:\n  marknest src\n  marknest . --include '*.hpp' '*.inl' '*.cpp' --list-ok\n  marknest src --exclude build third_party --output json"
)]
/// Top-level CLI options.
pub struct Cli {
    #[arg(help = "Root directory to scan")]
    pub root: PathBuf,
    #[arg(long, num_args = 1.., value_name = "GLOB", help = "File-name globs to check (default: all files)")]
    pub include: Vec<String>,
    #[arg(long, num_args = 1.., value_name = "GLOB", help = "Directory-name globs to skip (default: VCS, build and dependency dirs)")]
    pub exclude: Vec<String>,
    #[arg(long, action = clap::ArgAction::SetTrue, help = "Descend into symlinked directories")]
    pub follow_symlinks: bool,
    #[arg(long, action = clap::ArgAction::SetTrue, help = "Also report files whose markers are balanced")]
    pub list_ok: bool,
    #[arg(long, help = "Marker prefix (default: ALIB_WARNINGS_)")]
    pub prefix: Option<String>,
    #[arg(long, help = "Output mode: human|json (default: human)")]
    pub output: Option<String>,
    #[arg(long, action = clap::ArgAction::SetTrue, help = "Print file paths relative to the root")]
    pub relative: bool,
    #[arg(long, short = 'j', help = "Worker threads (default: one per CPU)")]
    pub jobs: Option<usize>,
    #[arg(long, help = "Config file (default: marknest.toml|yaml discovered upward from root)")]
    pub config: Option<PathBuf>,
    #[arg(long, help = "Log filter, e.g. warn, info, debug (env MARKNEST_LOG wins)")]
    pub log_level: Option<String>,
}

impl Cli {
    /// Split off everything except the root as config overrides.
    pub fn overrides(&self) -> CliOverrides {
        CliOverrides {
            config: self.config.clone(),
            include: self.include.clone(),
            exclude: self.exclude.clone(),
            follow_symlinks: self.follow_symlinks,
            list_ok: self.list_ok,
            prefix: self.prefix.clone(),
            output: self.output.clone(),
            relative: self.relative,
            jobs: self.jobs,
            log_level: self.log_level.clone(),
        }
    }
}
