//! Health check endpoint
//!
//! Static response; no dependency checks.

use axum::{routing::get, Json, Router};
use serde::Serialize;

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub message: &'static str,
}

/// GET /health
async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        message: "Service is healthy",
    })
}

/// Health routes
pub fn router<S>() -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    Router::new().route("/health", get(health))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn health_returns_ok() {
        let Json(body) = health().await;
        assert_eq!(body.status, "ok");
        assert_eq!(body.message, "Service is healthy");
    }

    #[test]
    fn serializes_in_field_order() {
        let body = HealthResponse {
            status: "ok",
            message: "Service is healthy",
        };
        assert_eq!(
            serde_json::to_string(&body).unwrap(),
            r#"{"status":"ok","message":"Service is healthy"}"#
        );
    }
}
