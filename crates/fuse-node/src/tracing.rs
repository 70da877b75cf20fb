//! Log setup for node binaries.
//!
//! Node output goes to stdout, so logs are written to stderr.

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Install the global subscriber. `RUST_LOG` wins over `default_filter`.
pub fn init_with_filter(default_filter: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().compact().with_target(false).with_writer(std::io::stderr))
        .init();
}

/// Line prefixes marking runtime phases.
pub mod prefix {
    /// One batch item
    pub const PULSE: &str = "꩜";
    /// Runtime start
    pub const PULSE_OPEN: &str = "✿";
    /// Runtime finish
    pub const PULSE_CLOSE: &str = "❀";
}
