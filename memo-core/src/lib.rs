//! memo-core: configuration and credentials for the memo service
//!
//! Everything here is resolved once at startup into immutable values that
//! the server and CLI pass around explicitly.

pub mod config;
pub mod credentials;
pub mod env;
pub mod error;
pub mod github;
pub mod secrets;

pub use config::{AppConfig, SecretsConfig};
pub use credentials::DbCredentials;
pub use env::Environment;
pub use error::{ConfigError, Result};
pub use secrets::{SecretPayload, SecretStore, StaticSecretStore};
