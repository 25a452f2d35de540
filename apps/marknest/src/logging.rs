//! Diagnostic logging to stderr via `tracing`.
//!
//! Logs never go to stdout, which carries the report.

use std::io::IsTerminal;
use tracing_subscriber::EnvFilter;

/// Environment variable that overrides the configured log filter.
pub const LOG_ENV: &str = "MARKNEST_LOG";

fn filter_for(level: &str) -> EnvFilter {
    match std::env::var(LOG_ENV) {
        Ok(directives) if !directives.trim().is_empty() => EnvFilter::new(directives),
        _ => EnvFilter::new(level),
    }
}

/// Install the global subscriber. A second call is a no-op.
pub fn init_logging(level: &str) {
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter_for(level))
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_ansi(std::io::stderr().is_terminal())
        .finish();

    // First subscriber wins (tests may initialise more than once).
    let _ = tracing::subscriber::set_global_default(subscriber);
}
