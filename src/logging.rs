//! Logging setup
//!
//! Diagnostics go to stderr through `tracing`; stdout is left to the
//! interactive session and user-facing messages.

use anyhow::Result;
use tracing::Level;
use tracing_subscriber::EnvFilter;

/// Environment variable that overrides the verbosity flag (EnvFilter syntax)
pub const LOG_ENV: &str = "DCX_LOG";

/// Map `-v` occurrences to a level. Warnings show by default.
pub fn level_for(verbosity: u8) -> Level {
    match verbosity {
        0 => Level::WARN,
        1 => Level::DEBUG,
        _ => Level::TRACE,
    }
}

/// Initialize the tracing subscriber
pub fn init_logging(verbosity: u8) -> Result<()> {
    let filter = EnvFilter::try_from_env(LOG_ENV)
        .unwrap_or_else(|_| EnvFilter::new(format!("dcx={}", level_for(verbosity).as_str().to_lowercase())));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .compact()
        .try_init()
        .map_err(|e| anyhow::anyhow!("failed to initialize logging: {}", e))?;

    Ok(())
}
