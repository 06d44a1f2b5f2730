//! Memo endpoints
//!
//! Each handler makes exactly one store call, which runs in its own
//! transaction.

use axum::{extract::State, http::StatusCode, routing::get, Json, Router};
use chrono::SecondsFormat;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::http::error::ApiError;
use crate::http::extractors::{MemoId, ValidJson};
use crate::http::state::AppState;
use crate::models::{Memo, MemoTitle, NewMemo, ValidationError};

/// Create memo request
///
/// `title` is optional here so an absent title is reported as a
/// validation error on `title`, not as a generic body error.
#[derive(Debug, Deserialize)]
pub struct CreateMemoRequest {
    pub title: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
}

impl CreateMemoRequest {
    /// Validate into a [`NewMemo`].
    pub fn validate(self) -> Result<NewMemo, ValidationError> {
        let title = self.title.ok_or(ValidationError::Empty { field: "title" })?;
        Ok(NewMemo {
            title: MemoTitle::new(&title)?,
            content: self.content,
        })
    }
}

/// Memo response, fields in stable order
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct MemoResponse {
    pub id: i64,
    pub title: String,
    pub content: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

impl From<Memo> for MemoResponse {
    fn from(m: Memo) -> Self {
        Self {
            id: m.id,
            title: m.title,
            content: m.content,
            created_at: m.created_at.to_rfc3339_opts(SecondsFormat::Micros, true),
            updated_at: m.updated_at.to_rfc3339_opts(SecondsFormat::Micros, true),
        }
    }
}

/// GET /memos - all memos, newest first
async fn list_memos(State(state): State<AppState>) -> Result<Json<Vec<MemoResponse>>, ApiError> {
    let memos = state.store().list().await?;
    Ok(Json(memos.into_iter().map(MemoResponse::from).collect()))
}

/// POST /memos - create a memo
async fn create_memo(
    State(state): State<AppState>,
    ValidJson(req): ValidJson<CreateMemoRequest>,
) -> Result<(StatusCode, Json<MemoResponse>), ApiError> {
    // Validation happens before the store is touched
    let memo = req.validate()?;
    let created = state.store().create(memo).await?;
    info!(id = created.id, "Memo created");

    Ok((StatusCode::CREATED, Json(MemoResponse::from(created))))
}

/// DELETE /memos/{id} - hard delete
async fn delete_memo(
    State(state): State<AppState>,
    MemoId(id): MemoId,
) -> Result<StatusCode, ApiError> {
    state.store().delete(id).await?;
    info!(id, "Memo deleted");
    Ok(StatusCode::NO_CONTENT)
}

/// Memo routes
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/memos", get(list_memos).post(create_memo))
        .route("/memos/{id}", axum::routing::delete(delete_memo))
}
