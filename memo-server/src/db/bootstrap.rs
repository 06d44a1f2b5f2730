//! Startup provisioning: create the database and schema if missing
//!
//! [`bootstrap`] is best-effort. Failures are logged and swallowed so the
//! server still starts when the database is managed elsewhere or briefly
//! unreachable; requests then fail until storage is available.
//! [`ensure_database`] and [`ensure_schema`](super::ensure_schema) return
//! errors for callers (like `memoctl create-db`) that must not tolerate them.

use std::fmt;

use memo_core::DbCredentials;
use once_cell::sync::Lazy;
use regex::Regex;
use sqlx::{Connection, PgConnection, PgPool};
use tracing::{error, info, warn};

use super::pool::connect_options;
use super::schema::ensure_schema;

/// Database used to issue `CREATE DATABASE`
pub const MAINTENANCE_DATABASE: &str = "postgres";

/// Database names we are willing to interpolate into DDL
static SAFE_NAME_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9_]+$").expect("invalid database name regex"));

/// Provisioning error
#[derive(Debug, thiserror::Error)]
pub enum ProvisionError {
    #[error("database error: {0}")]
    Sqlx(#[from] sqlx::Error),

    #[error("refusing to create database with unsafe name '{0}'")]
    UnsafeName(String),
}

/// Outcome of [`ensure_database`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DatabaseStatus {
    Existed,
    Created,
}

impl fmt::Display for DatabaseStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Existed => write!(f, "already exists"),
            Self::Created => write!(f, "created"),
        }
    }
}

/// What [`bootstrap`] managed to do
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BootstrapReport {
    /// `None` when the existence check or creation failed
    pub database: Option<DatabaseStatus>,
    pub schema_ready: bool,
}

/// True if `name` is safe to quote into `CREATE DATABASE`.
pub fn is_safe_database_name(name: &str) -> bool {
    SAFE_NAME_RE.is_match(name)
}

/// Create `creds.dbname` if it does not exist.
///
/// Connects to the maintenance database with the same login. The existence
/// check is parameterized; the name is validated before being quoted into
/// `CREATE DATABASE`, which cannot take parameters.
pub async fn ensure_database(creds: &DbCredentials) -> Result<DatabaseStatus, ProvisionError> {
    if !is_safe_database_name(&creds.dbname) {
        return Err(ProvisionError::UnsafeName(creds.dbname.clone()));
    }

    let admin = connect_options(&creds.with_database(MAINTENANCE_DATABASE));
    let mut conn = PgConnection::connect_with(&admin).await?;

    let exists: Option<i32> = sqlx::query_scalar("SELECT 1 FROM pg_database WHERE datname = $1")
        .bind(&creds.dbname)
        .fetch_optional(&mut conn)
        .await?;

    let status = if exists.is_some() {
        DatabaseStatus::Existed
    } else {
        // Simple-query protocol: CREATE DATABASE cannot run in a transaction
        let statement = format!(r#"CREATE DATABASE "{}""#, creds.dbname);
        sqlx::raw_sql(&statement).execute(&mut conn).await?;
        DatabaseStatus::Created
    };

    conn.close().await?;
    Ok(status)
}

/// Connect to `creds.dbname` and return `SELECT version()`.
pub async fn server_version(creds: &DbCredentials) -> Result<String, sqlx::Error> {
    let mut conn = PgConnection::connect_with(&connect_options(creds)).await?;
    let version: String = sqlx::query_scalar("SELECT version()")
        .fetch_one(&mut conn)
        .await?;
    conn.close().await?;
    Ok(version)
}

/// Best-effort provisioning run at startup.
///
/// Never fails; see [`BootstrapReport`] for what succeeded.
pub async fn bootstrap(creds: &DbCredentials, pool: &PgPool) -> BootstrapReport {
    let database = match ensure_database(creds).await {
        Ok(status) => {
            info!(dbname = %creds.dbname, %status, "Database check complete");
            Some(status)
        }
        Err(e) => {
            // The database may already exist or be managed externally
            warn!(dbname = %creds.dbname, error = %e, "Database creation check failed");
            None
        }
    };

    let schema_ready = match ensure_schema(pool).await {
        Ok(()) => true,
        Err(e) => {
            error!(error = %e, "Table creation failed; requests will fail until storage is available");
            false
        }
    };

    BootstrapReport {
        database,
        schema_ready,
    }
}
