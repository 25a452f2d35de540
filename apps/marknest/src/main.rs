//! marknest CLI binary entry point.
//! Resolves configuration, runs the scan and prints the report.

use clap::Parser;
use marknest::cli::Cli;
use marknest::config;
use marknest::error::SetupError;
use marknest::logging;
use marknest::output::{self, RenderOptions};
use marknest::scan::{self, ScanOptions};
use owo_colors::OwoColorize;
use std::io::IsTerminal;
use std::process::ExitCode;

fn error_prefix() -> String {
    if std::env::var_os("NO_COLOR").is_none() && std::io::stderr().is_terminal() {
        "error:".red().bold().to_string()
    } else {
        "error:".to_string()
    }
}

fn run(cli: Cli) -> Result<bool, SetupError> {
    // Bad roots fail before any config lookup.
    scan::check_root(&cli.root)?;
    let eff = config::resolve_effective(&cli.root, &cli.overrides())?;
    logging::init_logging(&eff.log_level);
    if let Some(p) = eff.config_path.as_ref() {
        tracing::info!(config = %p.display(), "using config file");
    }

    let opts = ScanOptions {
        include: eff.include.clone(),
        exclude: eff.exclude.clone(),
        follow_symlinks: eff.follow_symlinks,
        prefix: eff.prefix.clone(),
        jobs: eff.jobs,
    };
    let report = scan::run_scan(&cli.root, &opts)?;
    let render = RenderOptions {
        list_ok: eff.list_ok,
        relative: eff.relative,
        color: output::use_colors(eff.output),
    };
    output::print_report(&report, eff.output, &render);
    Ok(report.summary.ok)
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::from(1),
        Err(e) => {
            eprintln!("{} {}", error_prefix(), e);
            ExitCode::from(1)
        }
    }
}
