//! PostgreSQL memo store
//!
//! Every call runs in its own transaction (the scoped session). Commit
//! happens only on success; any early return drops the transaction, which
//! rolls it back and releases the connection to the pool.

use async_trait::async_trait;
use sqlx::PgPool;

use super::store::{DbError, MemoStore};
use crate::models::{Memo, NewMemo};

/// Memo store backed by a PgPool
#[derive(Clone)]
pub struct PgMemoStore {
    pool: PgPool,
}

impl PgMemoStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl MemoStore for PgMemoStore {
    async fn list(&self) -> Result<Vec<Memo>, DbError> {
        let mut tx = self.pool.begin().await?;

        let memos = sqlx::query_as::<_, Memo>(
            r#"
            SELECT id, title, content, created_at, updated_at
            FROM memos
            ORDER BY created_at DESC, id DESC
            "#,
        )
        .fetch_all(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(memos)
    }

    async fn create(&self, memo: NewMemo) -> Result<Memo, DbError> {
        let mut tx = self.pool.begin().await?;

        // Both timestamps come from the same NOW(), so they are equal on insert
        let created = sqlx::query_as::<_, Memo>(
            r#"
            INSERT INTO memos (title, content, created_at, updated_at)
            VALUES ($1, $2, NOW(), NOW())
            RETURNING id, title, content, created_at, updated_at
            "#,
        )
        .bind(memo.title.as_str())
        .bind(memo.content.as_deref())
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;
        tracing::debug!(id = created.id, "Memo created");
        Ok(created)
    }

    async fn delete(&self, id: i64) -> Result<(), DbError> {
        let mut tx = self.pool.begin().await?;

        // Single statement: of two racing deletes, exactly one sees the row
        let deleted: Option<i64> = sqlx::query_scalar("DELETE FROM memos WHERE id = $1 RETURNING id")
            .bind(id)
            .fetch_optional(&mut *tx)
            .await?;

        if deleted.is_none() {
            return Err(DbError::memo_not_found(id));
        }

        tx.commit().await?;
        tracing::debug!(id, "Memo deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::schema::ensure_schema;
    use crate::models::MemoTitle;

    // Integration tests - run with DATABASE_URL set
    // cargo test -p memo-server -- --ignored

    async fn store() -> PgMemoStore {
        let url = std::env::var("DATABASE_URL").expect("DATABASE_URL required");
        let pool = PgPool::connect(&url).await.expect("connect failed");
        ensure_schema(&pool).await.expect("schema failed");
        PgMemoStore::new(pool)
    }

    fn new_memo(title: &str) -> NewMemo {
        NewMemo {
            title: MemoTitle::new(title).unwrap(),
            content: Some("body".into()),
        }
    }

    #[tokio::test]
    #[ignore = "requires database"]
    async fn create_sets_equal_timestamps() {
        let store = store().await;
        let memo = store.create(new_memo("pg create")).await.unwrap();

        assert!(memo.id > 0);
        assert_eq!(memo.created_at, memo.updated_at);
        assert_eq!(memo.content.as_deref(), Some("body"));

        store.delete(memo.id).await.unwrap();
    }

    #[tokio::test]
    #[ignore = "requires database"]
    async fn list_is_newest_first() {
        let store = store().await;
        let first = store.create(new_memo("older")).await.unwrap();
        let second = store.create(new_memo("newer")).await.unwrap();

        let memos = store.list().await.unwrap();
        let pos_first = memos.iter().position(|m| m.id == first.id).unwrap();
        let pos_second = memos.iter().position(|m| m.id == second.id).unwrap();
        assert!(pos_second < pos_first);

        store.delete(first.id).await.unwrap();
        store.delete(second.id).await.unwrap();
    }

    #[tokio::test]
    #[ignore = "requires database"]
    async fn delete_twice_is_not_found() {
        let store = store().await;
        let memo = store.create(new_memo("delete me")).await.unwrap();

        store.delete(memo.id).await.unwrap();
        let err = store.delete(memo.id).await.unwrap_err();
        assert!(matches!(err, DbError::NotFound { resource: "memo", .. }));
    }

    #[tokio::test]
    #[ignore = "requires database"]
    async fn ids_are_not_reused() {
        let store = store().await;
        let memo = store.create(new_memo("first")).await.unwrap();
        store.delete(memo.id).await.unwrap();

        let next = store.create(new_memo("second")).await.unwrap();
        assert!(next.id > memo.id);
        store.delete(next.id).await.unwrap();
    }
}
