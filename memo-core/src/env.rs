//! Environment snapshot and profile loading
//!
//! Configuration is never read from the live process environment after
//! startup. `load_profile` merges the profile env file into the process
//! environment once, then `Environment::capture` takes an immutable
//! snapshot that every resolver reads from.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

/// Profile used when `APP_PROFILE` is not set
pub const DEFAULT_PROFILE: &str = "local";

/// Directory holding `config.<profile>.env` files when `CONFIG_DIR` is not set
pub const DEFAULT_CONFIG_DIR: &str = "config";

/// Immutable view of environment variables
#[derive(Debug, Clone, Default)]
pub struct Environment {
    vars: HashMap<String, String>,
}

impl Environment {
    /// Snapshot the current process environment.
    pub fn capture() -> Self {
        Self {
            vars: std::env::vars().collect(),
        }
    }

    /// Build an environment from explicit pairs (tests, embedding).
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            vars: pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    /// Value of `key`, treating empty strings as unset.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.vars
            .get(key)
            .map(String::as_str)
            .filter(|v| !v.is_empty())
    }

    /// Value of `key` or `default`.
    pub fn get_or<'a>(&'a self, key: &str, default: &'a str) -> &'a str {
        self.get(key).unwrap_or(default)
    }

    /// True when `key` is set to `true` (case-insensitive).
    pub fn flag(&self, key: &str) -> bool {
        self.get(key)
            .map(|v| v.eq_ignore_ascii_case("true"))
            .unwrap_or(false)
    }

    /// True when `key` is set to anything non-empty.
    pub fn is_set(&self, key: &str) -> bool {
        self.get(key).is_some()
    }
}

/// Path of the env file for `profile` inside `config_dir`.
pub fn profile_path(config_dir: &Path, profile: &str) -> PathBuf {
    config_dir.join(format!("config.{profile}.env"))
}

/// Load the env file selected by `APP_PROFILE` into the process environment.
///
/// Variables already present in the environment are never overwritten.
/// A missing profile file is not an error. Returns the path that was
/// loaded, if any.
pub fn load_profile() -> Option<PathBuf> {
    let profile = std::env::var("APP_PROFILE").unwrap_or_else(|_| DEFAULT_PROFILE.to_string());
    let config_dir = std::env::var("CONFIG_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from(DEFAULT_CONFIG_DIR));

    let path = profile_path(&config_dir, &profile);
    if !path.exists() {
        debug!(profile = %profile, path = %path.display(), "No profile env file found");
        info!(profile = %profile, "Using environment variables only");
        return None;
    }

    match dotenvy::from_path(&path) {
        Ok(()) => {
            info!(profile = %profile, path = %path.display(), "Loaded profile env file");
            Some(path)
        }
        Err(e) => {
            debug!(path = %path.display(), error = %e, "Failed to load profile env file");
            None
        }
    }
}
