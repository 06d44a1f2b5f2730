//! Connectivity report: secret store, GitHub and PostgreSQL
//!
//! Variable values are never printed, only whether they are set and
//! their length.

use std::time::Duration;

use anyhow::{bail, Context, Result};
use memo_core::{AppConfig, Environment};
use serde::Deserialize;

use super::db::preview;
use super::github::lookup_token;

/// AWS credential variables reported by `check`
pub const AWS_CREDENTIAL_VARS: &[&str] = &[
    "AWS_ACCESS_KEY_ID",
    "AWS_SECRET_ACCESS_KEY",
    "AWS_SESSION_TOKEN",
];

const GITHUB_USER_URL: &str = "https://api.github.com/user";
const GITHUB_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Deserialize)]
struct GithubUser {
    login: Option<String>,
}

/// Name and value length of each AWS credential variable.
pub(crate) fn aws_variable_lengths(env: &Environment) -> Vec<(&'static str, Option<usize>)> {
    AWS_CREDENTIAL_VARS
        .iter()
        .map(|&var| (var, env.get(var).map(str::len)))
        .collect()
}

fn section(title: &str) {
    println!();
    println!("{}", "=".repeat(60));
    println!("{title}");
    println!("{}", "=".repeat(60));
}

fn report_aws(env: &Environment, config: &AppConfig) {
    section("AWS credentials");
    for (var, len) in aws_variable_lengths(env) {
        match len {
            Some(len) => println!("✅ {var} is set (length: {len})"),
            None => println!("ℹ️  {var} is not set"),
        }
    }
    println!("ℹ️  Region: {}", config.secrets.region);
}

async fn check_github(env: &Environment, config: &AppConfig) -> bool {
    section("GitHub token");

    let Some(token) = lookup_token(env, config).await else {
        println!("❌ GitHub token not found");
        return false;
    };
    println!(
        "✅ Token retrieved from {} (length: {})",
        token.source,
        token.token.len()
    );

    match github_login(&token.token).await {
        Ok(login) => {
            println!("✅ GitHub API access successful");
            println!("   Authenticated as: {}", login.as_deref().unwrap_or("unknown"));
            true
        }
        Err(e) => {
            println!("❌ GitHub API access failed: {e:#}");
            false
        }
    }
}

async fn github_login(token: &str) -> Result<Option<String>> {
    let client = reqwest::Client::builder()
        .timeout(Duration::from_secs(GITHUB_TIMEOUT_SECS))
        .user_agent(concat!("memoctl/", env!("CARGO_PKG_VERSION")))
        .build()
        .context("Failed to build HTTP client")?;

    let response = client
        .get(GITHUB_USER_URL)
        .header(reqwest::header::AUTHORIZATION, format!("token {token}"))
        .header(reqwest::header::ACCEPT, "application/vnd.github+json")
        .send()
        .await
        .context("Request to GitHub failed")?;

    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        bail!("{status}: {}", preview(&body));
    }

    let user: GithubUser = response
        .json()
        .await
        .context("Unexpected GitHub response")?;
    Ok(user.login)
}

async fn check_postgres(env: &Environment, config: &AppConfig) -> bool {
    section("PostgreSQL");

    let creds = match super::resolve_credentials(env, config).await {
        Ok(creds) => creds,
        Err(e) => {
            println!("❌ {e:#}");
            return false;
        }
    };
    println!("✅ Credentials resolved");
    println!("   Host: {}", creds.host);
    println!("   Port: {}", creds.port);
    println!("   User: {}", creds.user);
    println!("   Database: {}", creds.dbname);

    match memo_server::db::server_version(&creds).await {
        Ok(version) => {
            println!("✅ Database connection successful");
            println!("   PostgreSQL version: {}", preview(&version));
            true
        }
        Err(e) => {
            println!("❌ Database connection failed: {e}");
            false
        }
    }
}

fn verdict(ok: bool) -> &'static str {
    if ok {
        "✅ PASS"
    } else {
        "❌ FAIL"
    }
}

/// `memoctl check`: exit 0 only when GitHub and PostgreSQL both pass.
pub async fn run_check() -> Result<()> {
    let (env, config) = super::load_config()?;

    if config.secrets.enabled {
        println!("ℹ️  USE_AWS_SECRETS=true, using the secret store");
        report_aws(&env, &config);
    } else {
        println!("ℹ️  USE_AWS_SECRETS=false, using environment variables");
    }

    let github_ok = check_github(&env, &config).await;
    let postgres_ok = check_postgres(&env, &config).await;

    section("Summary");
    println!("GitHub token: {}", verdict(github_ok));
    println!("PostgreSQL:   {}", verdict(postgres_ok));

    if !(github_ok && postgres_ok) {
        bail!("Connectivity check failed");
    }
    println!("\n✅ All checks passed");
    Ok(())
}
