//! Tracing subscriber setup for the `folio` binary.
//!
//! The filter comes from `FOLIO_LOG`, then `RUST_LOG`, then defaults to
//! `warn`. `--verbose` forces `debug`. Output goes to stderr so command
//! output on stdout stays clean.

use tracing_subscriber::util::TryInitError;
use tracing_subscriber::{filter::EnvFilter, fmt, prelude::*};

/// Environment variable holding the log filter.
pub const ENV_LOG: &str = "FOLIO_LOG";

const DEFAULT_DIRECTIVE: &str = "warn";

/// Pick the filter directive from the environment lookup.
pub fn filter_directive<F>(lookup: F, verbose: bool) -> String
where
    F: Fn(&str) -> Option<String>,
{
    if verbose {
        return "debug".to_string();
    }
    lookup(ENV_LOG)
        .or_else(|| lookup("RUST_LOG"))
        .filter(|value| !value.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_DIRECTIVE.to_string())
}

/// Install the global subscriber.
///
/// An unparseable directive falls back to `warn`.
pub fn init_logging(verbose: bool) -> Result<(), TryInitError> {
    let directive = filter_directive(|key| std::env::var(key).ok(), verbose);
    let filter = EnvFilter::try_new(&directive).unwrap_or_else(|_| EnvFilter::new(DEFAULT_DIRECTIVE));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(verbose),
        )
        .try_init()
}
