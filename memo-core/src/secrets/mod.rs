//! Secret store access
//!
//! The secret store is an opaque name → payload lookup. Payloads are JSON
//! objects; a payload that is not a JSON object is wrapped as
//! `{"value": <raw>}`. Field lookup goes through explicit, ordered key
//! lists so the precedence of synonyms is fixed and testable.

#[cfg(feature = "aws")]
mod aws;

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde_json::{Map, Value};

use crate::config::SecretsConfig;

#[cfg(feature = "aws")]
pub use aws::AwsSecretStore;

/// Accepted keys for each credential field, in precedence order
pub const HOST_KEYS: &[&str] = &["host", "HOST", "hostname"];
pub const PORT_KEYS: &[&str] = &["port", "PORT"];
pub const USER_KEYS: &[&str] = &["user", "USER", "username", "USERNAME"];
pub const PASSWORD_KEYS: &[&str] = &["password", "PASSWORD"];
pub const DBNAME_KEYS: &[&str] = &["dbname", "DBNAME", "database", "DATABASE"];

/// Accepted keys for the deployment token
pub const GITHUB_TOKEN_KEYS: &[&str] = &["token", "github_token", "GITHUB_TOKEN", "value"];

/// Decoded secret payload
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SecretPayload(Map<String, Value>);

impl SecretPayload {
    /// Decode a raw secret string.
    ///
    /// JSON objects are used as-is; anything else becomes `{"value": raw}`.
    pub fn parse(raw: &str) -> Self {
        match serde_json::from_str::<Value>(raw) {
            Ok(Value::Object(map)) => Self(map),
            _ => {
                let mut map = Map::new();
                map.insert("value".to_string(), Value::String(raw.to_string()));
                Self(map)
            }
        }
    }

    /// First non-empty value among `keys`, in order.
    ///
    /// Strings are returned as-is, numbers and booleans are stringified,
    /// other JSON types are skipped.
    pub fn first(&self, keys: &[&str]) -> Option<String> {
        keys.iter().find_map(|key| match self.0.get(*key)? {
            Value::String(s) if !s.is_empty() => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            Value::Bool(b) => Some(b.to_string()),
            _ => None,
        })
    }
}

/// Error talking to a secret store backend
#[derive(Debug, thiserror::Error)]
pub enum SecretError {
    #[error("secret store error ({code}): {message}")]
    Backend { code: String, message: String },

    #[error("secret '{name}' has no string value")]
    NotAString { name: String },
}

/// Named secret lookup (testable seam)
#[async_trait]
pub trait SecretStore: Send + Sync {
    /// Fetch the payload stored under `name`.
    ///
    /// `Ok(None)` means the secret does not exist.
    async fn fetch(&self, name: &str) -> Result<Option<SecretPayload>, SecretError>;
}

/// In-memory secret store, for tests and local overrides
#[derive(Default)]
pub struct StaticSecretStore {
    secrets: HashMap<String, String>,
    requests: Mutex<Vec<String>>,
}

impl StaticSecretStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a raw secret string under `name`.
    pub fn with_secret(mut self, name: impl Into<String>, raw: impl Into<String>) -> Self {
        self.secrets.insert(name.into(), raw.into());
        self
    }

    /// Names requested so far, in order.
    pub fn requests(&self) -> Vec<String> {
        self.requests
            .lock()
            .map(|r| r.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl SecretStore for StaticSecretStore {
    async fn fetch(&self, name: &str) -> Result<Option<SecretPayload>, SecretError> {
        if let Ok(mut requests) = self.requests.lock() {
            requests.push(name.to_string());
        }
        Ok(self.secrets.get(name).map(|raw| SecretPayload::parse(raw)))
    }
}

/// Fetch `name`, logging and swallowing backend failures.
///
/// Used by resolvers where a failing store must fall through to the
/// next configuration source.
pub async fn fetch_or_none(store: &dyn SecretStore, name: &str) -> Option<SecretPayload> {
    match store.fetch(name).await {
        Ok(Some(payload)) => {
            tracing::debug!(secret = %name, "Secret retrieved");
            Some(payload)
        }
        Ok(None) => {
            tracing::warn!(secret = %name, "Secret not found in secret store");
            None
        }
        Err(e) => {
            tracing::warn!(secret = %name, error = %e, "Failed to retrieve secret");
            None
        }
    }
}

/// Build the configured secret store, if enabled.
///
/// Returns `None` when `USE_AWS_SECRETS` is off, or when the binary was
/// built without the `aws` feature (logged).
pub async fn store_from_config(config: &SecretsConfig) -> Option<Arc<dyn SecretStore>> {
    if !config.enabled {
        return None;
    }

    #[cfg(feature = "aws")]
    {
        let store = AwsSecretStore::connect(&config.region).await;
        tracing::info!(region = %config.region, "Using AWS Secrets Manager");
        Some(Arc::new(store))
    }

    #[cfg(not(feature = "aws"))]
    {
        tracing::warn!("USE_AWS_SECRETS=true but this build has no `aws` feature; ignoring secret store");
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_json_object() {
        let payload = SecretPayload::parse(r#"{"host":"db.internal","port":5432}"#);
        assert_eq!(payload.first(HOST_KEYS).as_deref(), Some("db.internal"));
        assert_eq!(payload.first(PORT_KEYS).as_deref(), Some("5432"));
    }

    #[test]
    fn wraps_plain_text() {
        let payload = SecretPayload::parse("ghp_plaintoken");
        assert_eq!(payload.first(&["value"]).as_deref(), Some("ghp_plaintoken"));
        assert_eq!(payload.first(HOST_KEYS), None);
    }

    #[test]
    fn wraps_non_object_json() {
        let payload = SecretPayload::parse("[1,2,3]");
        assert_eq!(payload.first(&["value"]).as_deref(), Some("[1,2,3]"));
    }

    #[test]
    fn key_order_decides_precedence() {
        let payload =
            SecretPayload::parse(r#"{"USERNAME":"last","username":"third","USER":"second"}"#);
        assert_eq!(payload.first(USER_KEYS).as_deref(), Some("second"));

        let payload = SecretPayload::parse(r#"{"DATABASE":"b","database":"a"}"#);
        assert_eq!(payload.first(DBNAME_KEYS).as_deref(), Some("a"));
    }

    #[test]
    fn empty_values_fall_through_to_next_key() {
        let payload = SecretPayload::parse(r#"{"host":"","hostname":"fallback"}"#);
        assert_eq!(payload.first(HOST_KEYS).as_deref(), Some("fallback"));
    }

    #[test]
    fn github_keys_prefer_token() {
        let payload = SecretPayload::parse(r#"{"value":"v","GITHUB_TOKEN":"g","token":"t"}"#);
        assert_eq!(payload.first(GITHUB_TOKEN_KEYS).as_deref(), Some("t"));
    }

    #[tokio::test]
    async fn static_store_records_requests() {
        let store = StaticSecretStore::new().with_secret("a", r#"{"host":"x"}"#);
        assert!(store.fetch("a").await.unwrap().is_some());
        assert!(store.fetch("b").await.unwrap().is_none());
        assert_eq!(store.requests(), vec!["a".to_string(), "b".to_string()]);
    }

    #[tokio::test]
    async fn disabled_config_has_no_store() {
        let config = SecretsConfig {
            enabled: false,
            region: "ap-northeast-2".into(),
            db_secret_name: "memo/postgres".into(),
            github_secret_name: "memo/github".into(),
        };
        assert!(store_from_config(&config).await.is_none());
    }
}
