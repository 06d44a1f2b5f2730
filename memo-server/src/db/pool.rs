//! Database connection pool management
//!
//! Uses sqlx PgPool with explicit connection limits. The pool connects
//! lazily so the process can start while the database is unreachable;
//! the first request then surfaces the failure.

use std::time::Duration;

use memo_core::DbCredentials;
use sqlx::postgres::{PgConnectOptions, PgPoolOptions};
use sqlx::PgPool;

/// How long a request waits for a free connection
const ACQUIRE_TIMEOUT_SECS: u64 = 10;

/// Connection options for `creds`.
///
/// Built field by field so passwords never need URL escaping.
pub fn connect_options(creds: &DbCredentials) -> PgConnectOptions {
    PgConnectOptions::new()
        .host(&creds.host)
        .port(creds.port)
        .username(&creds.user)
        .password(&creds.password)
        .database(&creds.dbname)
}

/// Create a lazily-connecting PostgreSQL pool.
///
/// Connections are pinged before being handed out.
///
/// # Example
///
/// ```ignore
/// let pool = create_pool(&creds, 5);
/// ```
pub fn create_pool(creds: &DbCredentials, max_connections: u32) -> PgPool {
    PgPoolOptions::new()
        .max_connections(max_connections)
        .acquire_timeout(Duration::from_secs(ACQUIRE_TIMEOUT_SECS))
        .test_before_acquire(true)
        .connect_lazy_with(connect_options(creds))
}
