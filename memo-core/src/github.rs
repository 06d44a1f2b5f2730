//! Deployment GitHub token lookup
//!
//! On AWS (or with `USE_AWS_SECRETS=true`) the token comes from the secret
//! store only. Elsewhere `GITHUB_TOKEN` / `GITHUB_ACCESS_TOKEN` are used.

use std::fmt;

use crate::env::Environment;
use crate::secrets::{fetch_or_none, SecretStore, GITHUB_TOKEN_KEYS};

/// Variables whose presence means we are running inside AWS
pub const AWS_ENV_INDICATORS: &[&str] = &[
    "AWS_EXECUTION_ENV",
    "ECS_CONTAINER_METADATA_URI",
    "LAMBDA_TASK_ROOT",
];

/// Environment variables checked for a token, in order
pub const GITHUB_TOKEN_VARS: &[&str] = &["GITHUB_TOKEN", "GITHUB_ACCESS_TOKEN"];

/// Where a token was found
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenSource {
    Environment(&'static str),
    SecretStore(String),
}

impl fmt::Display for TokenSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Environment(var) => write!(f, "environment variable {var}"),
            Self::SecretStore(name) => write!(f, "secret '{name}'"),
        }
    }
}

#[derive(Clone, PartialEq, Eq)]
pub struct GithubToken {
    pub token: String,
    pub source: TokenSource,
}

impl fmt::Debug for GithubToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GithubToken")
            .field("token", &format_args!("<{} chars>", self.token.len()))
            .field("source", &self.source)
            .finish()
    }
}

/// True when running on AWS compute.
pub fn running_on_aws(env: &Environment) -> bool {
    AWS_ENV_INDICATORS.iter().any(|var| env.is_set(var))
}

/// True when the token must come from the secret store.
pub fn uses_secret_store(env: &Environment) -> bool {
    env.flag("USE_AWS_SECRETS") || running_on_aws(env)
}

/// Token from `GITHUB_TOKEN` or `GITHUB_ACCESS_TOKEN`.
pub fn env_token(env: &Environment) -> Option<GithubToken> {
    GITHUB_TOKEN_VARS.iter().copied().find_map(|var| {
        env.get(var).map(|token| GithubToken {
            token: token.to_string(),
            source: TokenSource::Environment(var),
        })
    })
}

/// Token from the secret payload under `secret_name`.
pub async fn secret_token(store: &dyn SecretStore, secret_name: &str) -> Option<GithubToken> {
    let payload = fetch_or_none(store, secret_name).await?;
    payload.first(GITHUB_TOKEN_KEYS).map(|token| GithubToken {
        token,
        source: TokenSource::SecretStore(secret_name.to_string()),
    })
}

/// Resolve the deployment token.
///
/// `store` should be present whenever [`uses_secret_store`] is true; if it
/// is not, no token is found.
pub async fn resolve(
    env: &Environment,
    store: Option<&dyn SecretStore>,
    secret_name: &str,
) -> Option<GithubToken> {
    if !uses_secret_store(env) {
        return env_token(env);
    }

    match store {
        Some(store) => secret_token(store, secret_name).await,
        None => {
            tracing::warn!("Secret store required for GitHub token but none is available");
            None
        }
    }
}
