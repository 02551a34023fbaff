//! Diagnostic logging
//!
//! Logs go to stderr so they never mix with command output on stdout.

use std::io;
use tracing_subscriber::EnvFilter;

/// Environment variable holding the log filter, e.g. `PRISMA_LOG=debug`
pub const LOG_ENV: &str = "PRISMA_LOG";

const DEFAULT_FILTER: &str = "warn";

/// Install the global subscriber; later calls are no-ops
pub fn init() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    let _ = tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(filter)
        .with_target(false)
        .try_init();
}
