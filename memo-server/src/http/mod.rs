//! HTTP layer
//!
//! Axum server with:
//! - CORS restricted to the configured front-end origin
//! - Request tracing
//! - Graceful shutdown
//! - JSON error responses
//! - SPA hosting for non-API paths

pub mod error;
pub mod extractors;
pub mod routes;
pub mod server;
pub mod spa;
pub mod state;

pub use error::ApiError;
pub use server::{build_router, run_server, ServerConfig, ServerError};
pub use state::AppState;
