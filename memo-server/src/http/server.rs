//! Axum server setup
//!
//! Server skeleton with:
//! - CORS limited to the front-end origin, credentials allowed
//! - Tracing middleware
//! - Graceful shutdown on SIGTERM/Ctrl+C

use std::net::SocketAddr;
use std::path::PathBuf;

use axum::http::{HeaderValue, StatusCode};
use axum::response::IntoResponse;
use axum::{Json, Router};
use memo_core::AppConfig;
use serde_json::json;
use tokio::net::TcpListener;
use tower_http::cors::{AllowHeaders, AllowMethods, CorsLayer};
use tower_http::trace::TraceLayer;

use super::routes;
use super::spa;
use super::state::AppState;

/// Prefix every API route lives under
pub const API_PREFIX: &str = "/api";

/// Server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Address to bind to (default: 0.0.0.0:8000)
    pub bind_addr: SocketAddr,

    /// The one origin allowed by CORS
    pub frontend_origin: String,

    /// Built front-end directory; `None` disables static serving
    pub static_dir: Option<PathBuf>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([0, 0, 0, 0], 8000)),
            frontend_origin: memo_core::config::DEFAULT_FRONTEND_DOMAIN.to_string(),
            static_dir: None,
        }
    }
}

impl From<&AppConfig> for ServerConfig {
    fn from(config: &AppConfig) -> Self {
        Self {
            bind_addr: config.bind_addr,
            frontend_origin: config.frontend_domain.clone(),
            static_dir: Some(config.static_dir.clone()),
        }
    }
}

/// Server error type
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid CORS origin '{0}'")]
    InvalidOrigin(String),
}

/// Build the application router with all routes.
///
/// # Errors
///
/// [`ServerError::InvalidOrigin`] if the front-end origin is not a valid
/// header value.
pub fn build_router(state: AppState, config: &ServerConfig) -> Result<Router, ServerError> {
    let origin = HeaderValue::from_str(&config.frontend_origin)
        .map_err(|_| ServerError::InvalidOrigin(config.frontend_origin.clone()))?;

    let cors = CorsLayer::new()
        .allow_origin(origin)
        .allow_credentials(true)
        .allow_methods(AllowMethods::mirror_request())
        .allow_headers(AllowHeaders::mirror_request());

    let api = Router::new()
        .merge(routes::health::router())
        .merge(routes::memos::router())
        .fallback(api_not_found);

    Ok(Router::new()
        .nest(API_PREFIX, api)
        .merge(spa::router(config.static_dir.as_deref()))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state))
}

async fn api_not_found() -> impl IntoResponse {
    (
        StatusCode::NOT_FOUND,
        Json(json!({
            "error": "not_found",
            "message": "no such API route"
        })),
    )
}

/// Run the HTTP server until shutdown.
///
/// # Example
///
/// ```ignore
/// let state = AppState::new(Arc::new(PgMemoStore::new(pool)));
/// run_server(state, ServerConfig::default()).await?;
/// ```
pub async fn run_server(state: AppState, config: ServerConfig) -> Result<(), ServerError> {
    let app = build_router(state, &config)?;

    let listener = TcpListener::bind(config.bind_addr).await?;
    tracing::info!(
        addr = %config.bind_addr,
        origin = %config.frontend_origin,
        "Server listening"
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server shutdown complete");
    Ok(())
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, starting shutdown");
        }
        _ = terminate => {
            tracing::info!("Received SIGTERM, starting shutdown");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use crate::db::InMemoryMemoStore;

    #[test]
    fn default_config() {
        let config = ServerConfig::default();
        assert_eq!(config.bind_addr.port(), 8000);
        assert_eq!(config.frontend_origin, "http://localhost:8500");
        assert!(config.static_dir.is_none());
    }

    #[test]
    fn rejects_invalid_origin() {
        let state = AppState::new(Arc::new(InMemoryMemoStore::new()));
        let config = ServerConfig {
            frontend_origin: "http://bad\norigin".into(),
            ..ServerConfig::default()
        };
        assert!(matches!(
            build_router(state, &config),
            Err(ServerError::InvalidOrigin(_))
        ));
    }
}
