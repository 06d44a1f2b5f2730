//! Database layer - connection pool, schema, provisioning and stores
//!
//! # Design Principles
//!
//! - One pool per process, built from resolved credentials
//! - One transaction per store call, rolled back on drop unless committed
//! - Rely on DB constraints; single-statement writes (no check-then-delete)
//! - Provisioning is create-if-missing only, never destructive

pub mod bootstrap;
pub mod memory;
pub mod pool;
pub mod postgres;
pub mod schema;
pub mod store;

pub use bootstrap::{
    bootstrap, ensure_database, server_version, BootstrapReport, DatabaseStatus, ProvisionError,
};
pub use memory::InMemoryMemoStore;
pub use pool::{connect_options, create_pool};
pub use postgres::PgMemoStore;
pub use schema::ensure_schema;
pub use store::{DbError, MemoStore};
