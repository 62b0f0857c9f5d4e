//! Diagnostics for plugins.
//!
//! Stdout carries the status line and nothing else, so logs go to stderr.
//! The filter comes from `OXMON_LOG` (e.g. `OXMON_LOG=oxmon_plugin=debug`)
//! and defaults to `warn`.

use tracing_subscriber::EnvFilter;

pub const LOG_ENV: &str = "OXMON_LOG";

const DEFAULT_DIRECTIVE: &str = "warn";

pub fn env_filter() -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(DEFAULT_DIRECTIVE))
}

/// Installs the global subscriber. Safe to call more than once; later calls
/// keep the first subscriber.
pub fn init() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
