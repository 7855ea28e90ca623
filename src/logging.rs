//! Logging configuration
//!
//! Initializes tracing for the binary. Logs go to stderr so stdout only
//! ever carries the resolved version.

use tracing_subscriber::{fmt, EnvFilter};

/// Map the number of `-v` flags to a default filter level
pub fn level_for_verbosity(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

/// Initializes logging with the specified level; `RUST_LOG` takes precedence
pub fn init_logging(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    // A subscriber may already be installed (e.g. by a test harness)
    let _ = fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}
