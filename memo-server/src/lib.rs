//! memo-server: HTTP API for memos plus hosting of the built front-end
//!
//! Routes live under `/api`; every other path is served from the static
//! directory with an `index.html` fallback.

pub mod db;
pub mod http;
pub mod models;

use std::sync::Arc;

use memo_core::{AppConfig, DbCredentials};

pub use db::{BootstrapReport, MemoStore, PgMemoStore};
pub use http::{build_router, run_server, AppState, ServerConfig, ServerError};

/// Provision storage and run the server until shutdown.
///
/// Provisioning is best-effort: the server starts even when the database
/// cannot be created or reached.
pub async fn serve(config: &AppConfig, creds: &DbCredentials) -> Result<(), ServerError> {
    tracing::info!(database = %creds.redacted_url(), "Using database");

    let pool = db::create_pool(creds, config.max_connections);
    let report = db::bootstrap(creds, &pool).await;
    tracing::debug!(?report, "Bootstrap finished");

    let state = AppState::new(Arc::new(PgMemoStore::new(pool)));
    run_server(state, ServerConfig::from(config)).await
}
