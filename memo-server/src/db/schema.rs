//! Memo table definition
//!
//! Applied with create-if-missing statements at every startup. There is no
//! migrations system: existing objects are left untouched.

use sqlx::PgPool;
use tracing::info;

/// DDL statements, applied in order
pub const SCHEMA_STATEMENTS: &[&str] = &[
    r#"
    CREATE TABLE IF NOT EXISTS memos (
        id BIGSERIAL PRIMARY KEY,
        title VARCHAR(255) NOT NULL CHECK (char_length(title) >= 1),
        content TEXT,
        created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
        updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
        CONSTRAINT memos_timestamps_ordered CHECK (created_at <= updated_at)
    )
    "#,
    r#"
    CREATE INDEX IF NOT EXISTS memos_created_at_idx ON memos (created_at DESC)
    "#,
    // id and created_at are immutable; updated_at moves on every write
    r#"
    CREATE OR REPLACE FUNCTION memos_touch_updated_at() RETURNS TRIGGER AS $$
    BEGIN
        NEW.id = OLD.id;
        NEW.created_at = OLD.created_at;
        NEW.updated_at = GREATEST(NOW(), OLD.created_at);
        RETURN NEW;
    END;
    $$ LANGUAGE plpgsql
    "#,
    r#"
    DO $$
    BEGIN
        IF NOT EXISTS (
            SELECT 1 FROM pg_trigger WHERE tgname = 'memos_touch_updated_at'
        ) THEN
            CREATE TRIGGER memos_touch_updated_at
                BEFORE UPDATE ON memos
                FOR EACH ROW EXECUTE FUNCTION memos_touch_updated_at();
        END IF;
    END
    $$
    "#,
];

/// Create the memos table, index and trigger if missing.
pub async fn ensure_schema(pool: &PgPool) -> Result<(), sqlx::Error> {
    for statement in SCHEMA_STATEMENTS {
        sqlx::query(statement).execute(pool).await?;
    }
    info!("Schema ready");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn statements_are_non_destructive() {
        for statement in SCHEMA_STATEMENTS {
            let upper = statement.to_uppercase();
            assert!(!upper.contains("DROP "), "destructive DDL: {statement}");
            assert!(!upper.contains("TRUNCATE"), "destructive DDL: {statement}");
        }
    }

    #[test]
    fn table_is_create_if_missing() {
        assert!(SCHEMA_STATEMENTS[0].contains("CREATE TABLE IF NOT EXISTS memos"));
        assert!(SCHEMA_STATEMENTS[1].contains("IF NOT EXISTS"));
    }

    #[tokio::test]
    #[ignore = "requires database"]
    async fn ensure_schema_is_idempotent() {
        let url = std::env::var("DATABASE_URL").expect("DATABASE_URL required");
        let pool = PgPool::connect(&url).await.expect("connect failed");

        ensure_schema(&pool).await.expect("first run failed");
        ensure_schema(&pool).await.expect("second run failed");
    }

    #[tokio::test]
    #[ignore = "requires database"]
    async fn update_refreshes_updated_at() {
        let url = std::env::var("DATABASE_URL").expect("DATABASE_URL required");
        let pool = PgPool::connect(&url).await.expect("connect failed");
        ensure_schema(&pool).await.expect("schema failed");

        let (id, created_at): (i64, chrono::DateTime<chrono::Utc>) =
            sqlx::query_as("INSERT INTO memos (title) VALUES ('touch') RETURNING id, created_at")
                .fetch_one(&pool)
                .await
                .expect("insert failed");

        let (created_after, updated_after): (chrono::DateTime<chrono::Utc>, chrono::DateTime<chrono::Utc>) =
            sqlx::query_as(
                "UPDATE memos SET title = 'touched' WHERE id = $1 RETURNING created_at, updated_at",
            )
            .bind(id)
            .fetch_one(&pool)
            .await
            .expect("update failed");

        assert_eq!(created_after, created_at);
        assert!(updated_after >= created_after);

        sqlx::query("DELETE FROM memos WHERE id = $1")
            .bind(id)
            .execute(&pool)
            .await
            .expect("cleanup failed");
    }
}
