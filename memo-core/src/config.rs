use std::net::SocketAddr;
use std::path::PathBuf;

use crate::env::{Environment, DEFAULT_PROFILE};
use crate::error::{ConfigError, Result};

/// Default CORS origin for the front-end dev server
pub const DEFAULT_FRONTEND_DOMAIN: &str = "http://localhost:8500";

/// Default listen address
pub const DEFAULT_BIND_ADDRESS: &str = "0.0.0.0:8000";

/// Default location of the built single-page application
pub const DEFAULT_STATIC_DIR: &str = "frontend/dist";

/// Default pool size, kept low for a single-entity service
pub const DEFAULT_MAX_CONNECTIONS: u32 = 5;

/// Region used when neither `AWS_REGION` nor `AWS_DEFAULT_REGION` is set
pub const DEFAULT_AWS_REGION: &str = "ap-northeast-2";

/// Secret holding the PostgreSQL credential object
pub const DEFAULT_DB_SECRET_NAME: &str = "memo/postgres";

/// Secret holding the deployment GitHub token
pub const DEFAULT_GITHUB_SECRET_NAME: &str = "memo/github";

/// Secret store settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SecretsConfig {
    /// `USE_AWS_SECRETS=true`
    pub enabled: bool,
    pub region: String,
    pub db_secret_name: String,
    pub github_secret_name: String,
}

impl SecretsConfig {
    pub fn from_env(env: &Environment) -> Self {
        let region = env
            .get("AWS_REGION")
            .or_else(|| env.get("AWS_DEFAULT_REGION"))
            .unwrap_or(DEFAULT_AWS_REGION)
            .to_string();

        Self {
            enabled: env.flag("USE_AWS_SECRETS"),
            region,
            db_secret_name: env
                .get_or("DB_SECRET_NAME", DEFAULT_DB_SECRET_NAME)
                .to_string(),
            github_secret_name: env
                .get_or("GITHUB_SECRET_NAME", DEFAULT_GITHUB_SECRET_NAME)
                .to_string(),
        }
    }
}

/// Process-wide configuration, built once at startup and passed explicitly.
///
/// Database credentials are resolved separately (they may need the secret
/// store) by [`crate::credentials::resolve`].
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub profile: String,
    pub bind_addr: SocketAddr,
    /// Single origin allowed by CORS
    pub frontend_domain: String,
    pub static_dir: PathBuf,
    pub max_connections: u32,
    pub secrets: SecretsConfig,
}

impl AppConfig {
    /// Build configuration from an environment snapshot.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] when a set variable cannot be
    /// parsed (bind address, pool size).
    pub fn from_env(env: &Environment) -> Result<Self> {
        let bind_raw = env.get_or("BIND_ADDRESS", DEFAULT_BIND_ADDRESS);
        let bind_addr = bind_raw
            .parse()
            .map_err(|e| ConfigError::invalid_value("BIND_ADDRESS", format!("{bind_raw}: {e}")))?;

        let max_connections = match env.get("DB_MAX_CONNECTIONS") {
            Some(raw) => match raw.parse::<u32>() {
                Ok(n) if n > 0 => n,
                _ => {
                    return Err(ConfigError::invalid_value(
                        "DB_MAX_CONNECTIONS",
                        format!("expected a positive integer, got '{raw}'"),
                    ))
                }
            },
            None => DEFAULT_MAX_CONNECTIONS,
        };

        Ok(Self {
            profile: env.get_or("APP_PROFILE", DEFAULT_PROFILE).to_string(),
            bind_addr,
            frontend_domain: env
                .get_or("FRONTEND_DOMAIN", DEFAULT_FRONTEND_DOMAIN)
                .to_string(),
            static_dir: PathBuf::from(env.get_or("STATIC_DIR", DEFAULT_STATIC_DIR)),
            max_connections,
            secrets: SecretsConfig::from_env(env),
        })
    }
}
