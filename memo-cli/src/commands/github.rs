//! GitHub token lookup command

use anyhow::{anyhow, Result};
use memo_core::github::{self, GithubToken};
use memo_core::{secrets, AppConfig, Environment, SecretsConfig};

/// Look up the deployment token.
///
/// On AWS the secret store is used even when `USE_AWS_SECRETS` is unset.
pub(crate) async fn lookup_token(env: &Environment, config: &AppConfig) -> Option<GithubToken> {
    let store = if github::uses_secret_store(env) {
        let secrets = SecretsConfig {
            enabled: true,
            ..config.secrets.clone()
        };
        secrets::store_from_config(&secrets).await
    } else {
        None
    };

    github::resolve(env, store.as_deref(), &config.secrets.github_secret_name).await
}

/// `memoctl github-token`: print the token to stdout.
pub async fn run_github_token() -> Result<()> {
    let (env, config) = super::load_config()?;

    let token = lookup_token(&env, &config).await.ok_or_else(|| {
        anyhow!(
            "GitHub token not found (checked {})",
            if github::uses_secret_store(&env) {
                format!("secret '{}'", config.secrets.github_secret_name)
            } else {
                github::GITHUB_TOKEN_VARS.join(", ")
            }
        )
    })?;

    tracing::info!(source = %token.source, "GitHub token found");
    println!("{}", token.token);
    Ok(())
}
