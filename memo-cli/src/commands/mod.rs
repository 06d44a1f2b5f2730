//! Command implementations
//!
//! Every command snapshots the environment once and builds its
//! configuration from that snapshot.

pub mod check;
pub mod db;
pub mod github;
pub mod serve;

pub use check::run_check;
pub use db::{run_create_db, run_init_db};
pub use github::run_github_token;
pub use serve::run_serve;

use anyhow::{Context, Result};
use memo_core::{credentials, secrets, AppConfig, DbCredentials, Environment};

/// Environment snapshot plus the configuration built from it
pub(crate) fn load_config() -> Result<(Environment, AppConfig)> {
    let env = Environment::capture();
    let config = AppConfig::from_env(&env).context("Invalid configuration")?;
    Ok((env, config))
}

/// Resolve database credentials through the secret store (if enabled)
/// and the environment.
pub(crate) async fn resolve_credentials(
    env: &Environment,
    config: &AppConfig,
) -> Result<DbCredentials> {
    let store = secrets::store_from_config(&config.secrets).await;
    credentials::resolve(env, store.as_deref(), &config.secrets.db_secret_name)
        .await
        .context("Failed to resolve database credentials")
}
