//! Tracing setup for memoctl
//!
//! Usage:
//!   memoctl --debug ...               # Debug logging
//!   memoctl --log-format json ...     # One JSON object per line
//!   RUST_LOG=memo_server=debug memoctl serve
//!
//! Logs go to stderr so stdout stays clean for command output.

use anyhow::{anyhow, Result};
use clap::ValueEnum;
use tracing_subscriber::EnvFilter;

/// Log line format
#[derive(ValueEnum, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    #[default]
    Compact,
    Json,
}

/// Tracing configuration options
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingConfig {
    /// Debug level unless RUST_LOG is explicitly set
    pub debug: bool,
    pub format: LogFormat,
}

fn filter(config: &TracingConfig) -> EnvFilter {
    let default = if config.debug { "debug" } else { "info" };
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default))
}

/// Install the global subscriber.
pub fn init(config: &TracingConfig) -> Result<()> {
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter(config))
        .with_writer(std::io::stderr);

    match config.format {
        LogFormat::Compact => builder.with_target(config.debug).compact().try_init(),
        LogFormat::Json => builder.json().try_init(),
    }
    .map_err(|err| anyhow!(err))
}
