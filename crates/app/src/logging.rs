//! Tracing setup for the `trivia` binary.

use std::io::IsTerminal;

use anyhow::Result;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Initialize logging on stderr.
///
/// `RUST_LOG` wins when set; otherwise the filter follows `-v`/`-q`.
///
/// # Errors
///
/// Returns an error if the filter is invalid or a global subscriber is already set.
pub fn init_logging(verbosity: u8, quiet: bool) -> Result<()> {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_filter(verbosity, quiet)))?;

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_level(true)
        .with_ansi(std::io::stderr().is_terminal());

    tracing::subscriber::set_global_default(
        tracing_subscriber::registry().with(env_filter).with(fmt_layer),
    )?;
    Ok(())
}

fn default_filter(verbosity: u8, quiet: bool) -> String {
    if quiet {
        return "error".to_string();
    }

    let crates = "trivia=LEVEL,api=LEVEL,services=LEVEL,storage=LEVEL";
    match verbosity {
        0 => crates.replace("LEVEL", "info"),
        1 => crates.replace("LEVEL", "debug"),
        2 => format!("{},sqlx=debug,axum=debug", crates.replace("LEVEL", "debug")),
        _ => crates.replace("LEVEL", "trace"),
    }
}
