//! Memo storage trait
//!
//! Handlers depend on `dyn MemoStore`; production uses [`super::PgMemoStore`],
//! tests use [`super::InMemoryMemoStore`].

use async_trait::async_trait;

use crate::models::{Memo, NewMemo};

/// Database error type
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error("database error: {0}")]
    Sqlx(#[from] sqlx::Error),

    #[error("not found: {resource} '{id}'")]
    NotFound { resource: &'static str, id: String },
}

impl DbError {
    pub fn memo_not_found(id: i64) -> Self {
        Self::NotFound {
            resource: "memo",
            id: id.to_string(),
        }
    }
}

/// Memo persistence (testable)
#[async_trait]
pub trait MemoStore: Send + Sync {
    /// All memos, newest first (`created_at DESC`, then `id DESC`).
    async fn list(&self) -> Result<Vec<Memo>, DbError>;

    /// Insert one row; returns it with generated `id` and timestamps.
    async fn create(&self, memo: NewMemo) -> Result<Memo, DbError>;

    /// Hard-delete one row.
    ///
    /// Returns [`DbError::NotFound`] if no row has `id`.
    async fn delete(&self, id: i64) -> Result<(), DbError>;
}
