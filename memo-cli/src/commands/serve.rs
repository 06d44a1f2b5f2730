//! HTTP server command
//!
//! Resolves configuration and credentials, then runs the memo server.
//! Configuration errors stop the process before anything binds.

use std::net::SocketAddr;

use anyhow::{Context, Result};
use clap::Parser;

/// Arguments for the serve command
#[derive(Parser, Debug)]
pub struct ServeArgs {
    /// Address to bind to (overrides BIND_ADDRESS, default 0.0.0.0:8000)
    #[arg(long, short = 'b')]
    pub bind: Option<SocketAddr>,
}

/// Run the HTTP server
pub async fn run_serve(args: ServeArgs) -> Result<()> {
    let (env, mut config) = super::load_config()?;
    if let Some(bind) = args.bind {
        config.bind_addr = bind;
    }

    let creds = super::resolve_credentials(&env, &config).await?;

    tracing::info!(
        profile = %config.profile,
        addr = %config.bind_addr,
        "Starting memo server"
    );

    // Blocks until shutdown
    memo_server::serve(&config, &creds)
        .await
        .context("Server error")?;

    Ok(())
}
