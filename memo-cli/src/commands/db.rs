//! Database provisioning commands

use anyhow::{bail, Context, Result};
use memo_server::db::{bootstrap, create_pool, ensure_database, server_version};

/// Length of the version string shown to the user
const VERSION_PREVIEW_CHARS: usize = 50;

/// `memoctl init-db`: run startup provisioning once.
pub async fn run_init_db() -> Result<()> {
    let (env, config) = super::load_config()?;
    let creds = super::resolve_credentials(&env, &config).await?;

    let pool = create_pool(&creds, config.max_connections);
    let report = bootstrap(&creds, &pool).await;
    pool.close().await;

    match report.database {
        Some(status) => println!("✅ Database '{}' {}", creds.dbname, status),
        None => println!("⚠️  Database '{}' could not be checked", creds.dbname),
    }

    if !report.schema_ready {
        bail!("Schema setup failed for database '{}'", creds.dbname);
    }
    println!("✅ Schema ready");
    Ok(())
}

/// `memoctl create-db`: create the database if absent and verify it.
///
/// Unlike server startup, every failure here is fatal.
pub async fn run_create_db() -> Result<()> {
    let (env, config) = super::load_config()?;
    let creds = super::resolve_credentials(&env, &config).await?;

    println!("📊 Database configuration:");
    println!("   Host: {}", creds.host);
    println!("   Port: {}", creds.port);
    println!("   User: {}", creds.user);
    println!("   Database: {}", creds.dbname);

    let status = ensure_database(&creds)
        .await
        .with_context(|| format!("Failed to create database '{}'", creds.dbname))?;
    println!("✅ Database '{}' {}", creds.dbname, status);

    let version = server_version(&creds)
        .await
        .with_context(|| format!("Failed to connect to database '{}'", creds.dbname))?;
    println!("✅ Connection successful");
    println!("   PostgreSQL version: {}", preview(&version));

    Ok(())
}

/// First few characters of a long server string.
pub(crate) fn preview(s: &str) -> String {
    if s.chars().count() <= VERSION_PREVIEW_CHARS {
        return s.to_string();
    }
    let head: String = s.chars().take(VERSION_PREVIEW_CHARS).collect();
    format!("{head}...")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn preview_truncates_long_versions() {
        let version = "PostgreSQL 16.2 on x86_64-pc-linux-gnu, compiled by gcc (GCC) 12.2.0, 64-bit";
        let shown = preview(version);
        assert!(shown.ends_with("..."));
        assert_eq!(shown.chars().count(), VERSION_PREVIEW_CHARS + 3);

        assert_eq!(preview("PostgreSQL 16.2"), "PostgreSQL 16.2");
    }
}
