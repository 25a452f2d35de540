//! Configuration discovery and effective settings resolution.
//!
//! marknest reads `marknest.toml|yaml|yml` from the scan root or the closest
//! ancestor (stopping at the directory holding `.git`) and merges it with CLI
//! flags to produce an `Effective` config. Defaults:
//! - `include`: empty (every file is a candidate)
//! - `exclude`: version-control, build-output and dependency directories
//! - `follow_symlinks`, `list_ok`, `relative`: false
//! - `prefix`: `ALIB_WARNINGS_`
//! - `output`: `human`
//! - `log_level`: `warn`
//!
//! Overrides precedence: CLI > config file > defaults.

use crate::error::{Result, SetupError};
use crate::tokenizer::DEFAULT_PREFIX;
use crate::walker::DEFAULT_EXCLUDES;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

const CONFIG_NAMES: [&str; 3] = ["marknest.toml", "marknest.yaml", "marknest.yml"];

#[derive(Debug, Default, Deserialize, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
/// Root configuration loaded from `marknest.toml|yaml`.
pub struct MarknestConfig {
    pub include: Option<Vec<String>>,
    pub exclude: Option<Vec<String>>,
    pub follow_symlinks: Option<bool>,
    pub list_ok: Option<bool>,
    pub prefix: Option<String>,
    pub output: Option<String>,
    pub relative: Option<bool>,
    pub jobs: Option<usize>,
    pub log_level: Option<String>,
}

#[derive(Debug, Default, Clone)]
/// Values given on the command line; `None`/empty means "not given".
pub struct CliOverrides {
    pub config: Option<PathBuf>,
    pub include: Vec<String>,
    pub exclude: Vec<String>,
    pub follow_symlinks: bool,
    pub list_ok: bool,
    pub prefix: Option<String>,
    pub output: Option<String>,
    pub relative: bool,
    pub jobs: Option<usize>,
    pub log_level: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    Human,
    Json,
}

impl OutputMode {
    pub fn parse(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "human" => Ok(OutputMode::Human),
            "json" => Ok(OutputMode::Json),
            _ => Err(SetupError::InvalidOutput(s.to_string())),
        }
    }
}

#[derive(Debug, Clone)]
/// Fully-resolved configuration used by the scan after applying precedence.
pub struct Effective {
    pub config_path: Option<PathBuf>,
    pub include: Vec<String>,
    pub exclude: Vec<String>,
    pub follow_symlinks: bool,
    pub list_ok: bool,
    pub prefix: String,
    pub output: OutputMode,
    pub relative: bool,
    pub jobs: Option<usize>,
    pub log_level: String,
}

/// Walk upward from `start` looking for a config file.
///
/// Stops at the first directory containing a `marknest.*` file, or at a
/// directory containing `.git` (repository top) without finding one.
pub fn find_config(start: &Path) -> Option<PathBuf> {
    let mut cur = start;
    loop {
        for name in CONFIG_NAMES {
            let p = cur.join(name);
            if p.is_file() {
                return Some(p);
            }
        }
        if cur.join(".git").exists() {
            return None;
        }
        cur = cur.parent()?;
    }
}

/// Parse a config file; the format follows the extension.
pub fn load_config(path: &Path) -> Result<MarknestConfig> {
    let s = fs::read_to_string(path).map_err(|source| SetupError::ConfigRead {
        path: path.to_path_buf(),
        source,
    })?;
    let is_yaml = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("yaml") || e.eq_ignore_ascii_case("yml"));
    let parsed = if is_yaml {
        serde_yaml::from_str::<MarknestConfig>(&s).map_err(|e| e.to_string())
    } else {
        toml::from_str::<MarknestConfig>(&s).map_err(|e| e.to_string())
    };
    parsed.map_err(|reason| SetupError::ConfigParse {
        path: path.to_path_buf(),
        reason,
    })
}

/// Resolve `Effective` by merging CLI flags, the config file, and defaults.
///
/// An explicit `--config` must exist; a discovered one is optional.
pub fn resolve_effective(root: &Path, cli: &CliOverrides) -> Result<Effective> {
    let config_path = match cli.config.as_ref() {
        Some(p) => Some(p.clone()),
        None => {
            let start = root.canonicalize().unwrap_or_else(|_| root.to_path_buf());
            find_config(&start)
        }
    };
    let cfg = match config_path.as_ref() {
        Some(p) => load_config(p)?,
        None => MarknestConfig::default(),
    };

    let include = if !cli.include.is_empty() {
        cli.include.clone()
    } else {
        cfg.include.unwrap_or_default()
    };
    let exclude = if !cli.exclude.is_empty() {
        cli.exclude.clone()
    } else {
        cfg.exclude
            .unwrap_or_else(|| DEFAULT_EXCLUDES.iter().map(|s| s.to_string()).collect())
    };

    // Boolean flags can only switch a feature on from the CLI.
    let follow_symlinks = cli.follow_symlinks || cfg.follow_symlinks.unwrap_or(false);
    let list_ok = cli.list_ok || cfg.list_ok.unwrap_or(false);
    let relative = cli.relative || cfg.relative.unwrap_or(false);

    let prefix = cli
        .prefix
        .clone()
        .or(cfg.prefix)
        .unwrap_or_else(|| DEFAULT_PREFIX.to_string());
    let output = OutputMode::parse(
        cli.output
            .as_deref()
            .or(cfg.output.as_deref())
            .unwrap_or("human"),
    )?;
    let jobs = cli.jobs.or(cfg.jobs);
    let log_level = cli
        .log_level
        .clone()
        .or(cfg.log_level)
        .unwrap_or_else(|| "warn".to_string());

    Ok(Effective {
        config_path,
        include,
        exclude,
        follow_symlinks,
        list_ok,
        prefix,
        output,
        relative,
        jobs,
        log_level,
    })
}
