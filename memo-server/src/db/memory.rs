//! In-memory memo store for tests and local experiments

use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use chrono::{SubsecRound, Utc};

use super::store::{DbError, MemoStore};
use crate::models::{Memo, NewMemo};

#[derive(Default)]
struct Inner {
    last_id: i64,
    memos: Vec<Memo>,
}

/// Memo store holding rows in a Vec
///
/// Ids come from a counter that never goes backwards, like a sequence.
#[derive(Default)]
pub struct InMemoryMemoStore {
    inner: Mutex<Inner>,
}

impl InMemoryMemoStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored memos
    pub fn len(&self) -> usize {
        self.lock().memos.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[async_trait]
impl MemoStore for InMemoryMemoStore {
    async fn list(&self) -> Result<Vec<Memo>, DbError> {
        let mut memos = self.lock().memos.clone();
        memos.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then_with(|| b.id.cmp(&a.id))
        });
        Ok(memos)
    }

    async fn create(&self, memo: NewMemo) -> Result<Memo, DbError> {
        let mut inner = self.lock();
        inner.last_id += 1;
        // Postgres keeps microseconds
        let now = Utc::now().trunc_subsecs(6);

        let created = Memo {
            id: inner.last_id,
            title: memo.title.into_string(),
            content: memo.content,
            created_at: now,
            updated_at: now,
        };
        inner.memos.push(created.clone());
        Ok(created)
    }

    async fn delete(&self, id: i64) -> Result<(), DbError> {
        let mut inner = self.lock();
        let index = inner
            .memos
            .iter()
            .position(|m| m.id == id)
            .ok_or_else(|| DbError::memo_not_found(id))?;
        inner.memos.remove(index);
        Ok(())
    }
}
