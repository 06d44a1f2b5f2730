//! Single-page application hosting
//!
//! Non-API paths are served from the built front-end directory. Paths that
//! match no file get `index.html` so client-side routes work on reload.
//! Without a build, every non-API path returns a "frontend not built" JSON
//! indicator.

use std::path::Path;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::any;
use axum::{Json, Router};
use serde_json::json;
use tower_http::services::{ServeDir, ServeFile};

/// Entry document of the built front-end
pub const INDEX_FILE: &str = "index.html";

/// True when `static_dir` contains a built front-end.
pub fn is_built(static_dir: &Path) -> bool {
    static_dir.join(INDEX_FILE).is_file()
}

/// Fallback router for everything outside the API prefix.
pub fn router<S>(static_dir: Option<&Path>) -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    match static_dir.filter(|dir| is_built(dir)) {
        Some(dir) => {
            tracing::info!(static_dir = %dir.display(), "Serving front-end");
            let index = ServeFile::new(dir.join(INDEX_FILE));
            Router::new().fallback_service(ServeDir::new(dir).fallback(index))
        }
        None => {
            tracing::warn!("Front-end not built; non-API paths return an indicator");
            Router::new().fallback(any(frontend_not_built))
        }
    }
}

async fn frontend_not_built() -> Response {
    (
        StatusCode::NOT_FOUND,
        Json(json!({
            "error": "frontend_not_built",
            "message": "Frontend not built. Build the front-end into STATIC_DIR to serve it."
        })),
    )
        .into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detects_build() {
        let dir = tempfile::tempdir().unwrap();
        assert!(!is_built(dir.path()));

        std::fs::write(dir.path().join(INDEX_FILE), "<html></html>").unwrap();
        assert!(is_built(dir.path()));
    }

    #[test]
    fn missing_directory_is_not_built() {
        assert!(!is_built(Path::new("/definitely/not/here")));
    }
}
