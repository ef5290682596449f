//! Logging utilities for the padel tools.
//!
//! Log output goes to stderr so that stdout stays reserved for command
//! output, including `--json` documents.

use tracing::{info, Level};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Initialize the tracing subscriber with a specific log level.
///
/// `RUST_LOG` is honoured; a `padel=<level>` directive is added on top of it.
/// Calling this more than once is harmless.
///
/// # Arguments
///
/// * `level` - The minimum log level to display for padel crates.
pub fn init_with_level(level: Level) {
    let mut filter = EnvFilter::from_default_env();
    if let Ok(directive) = format!("padel={}", level).parse() {
        filter = filter.add_directive(directive);
    }

    let result = tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(true)
                .with_file(true)
                .with_line_number(true),
        )
        .with(filter)
        .try_init();

    if result.is_ok() {
        info!("Logging initialized at level: {}", level);
    }
}

/// Parses a level name from configuration, defaulting to WARN.
pub fn level_from_str(level: &str) -> Level {
    level.trim().parse().unwrap_or(Level::WARN)
}
