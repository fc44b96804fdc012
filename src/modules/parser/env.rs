//! Environment variable handling
//!
//! Two entry points: `{{ env.NAME }}` substitution inside configuration
//! files, and building a whole [`Conf`] from prefixed variables.

use moorage_core::{Conf, MoorageError};
use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use std::collections::HashMap;

/// Regex pattern for environment variable placeholders: {{ env.VAR_NAME }}
static ENV_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\{\{\s*env\.([A-Za-z_][A-Za-z0-9_]*)\s*\}\}").unwrap()
});

/// Prefix used by [`conf_from_env`] when none is given
pub const DEFAULT_ENV_PREFIX: &str = "MONGO_DB";

/// Environment variable substitutor
///
/// Every placeholder must resolve; missing variables are reported together.
pub struct EnvSubstitutor;

impl EnvSubstitutor {
    pub fn new() -> Self {
        Self
    }

    /// Substitute environment variables in the given content
    pub fn substitute(&self, content: &str) -> Result<String, MoorageError> {
        // Load .env file if present (ignores errors)
        let _ = dotenvy::dotenv();

        let mut missing: Vec<String> = Vec::new();
        let result = ENV_PATTERN.replace_all(content, |cap: &Captures| {
            match std::env::var(&cap[1]) {
                Ok(value) => value,
                Err(_) => {
                    if !missing.iter().any(|m| m == &cap[1]) {
                        missing.push(cap[1].to_string());
                    }
                    cap[0].to_string()
                }
            }
        });

        if !missing.is_empty() {
            return Err(MoorageError::EnvVarNotFound(missing.join(", ")));
        }

        Ok(result.into_owned())
    }
}

impl Default for EnvSubstitutor {
    fn default() -> Self {
        Self::new()
    }
}

/// Build a configuration from `{prefix}_*` environment variables
///
/// Reads `_NAME`, `_HOST`, `_USERNAME`, `_PASSWORD`, `_AUTH_SOURCE` (required),
/// `_PORT`, `_TIMEOUT` and `_OPTIONS` (optional, options as `k=v,k2=v2`).
pub fn conf_from_env(prefix: &str) -> Result<Conf, MoorageError> {
    let _ = dotenvy::dotenv();
    conf_from_lookup(prefix, |name| std::env::var(name).ok())
}

fn conf_from_lookup<F>(prefix: &str, lookup: F) -> Result<Conf, MoorageError>
where
    F: Fn(&str) -> Option<String>,
{
    let var = |suffix: &str| format!("{}_{}", prefix, suffix);

    let mut missing = Vec::new();
    let mut required = |suffix: &str| {
        let name = var(suffix);
        lookup(&name).unwrap_or_else(|| {
            missing.push(name);
            String::new()
        })
    };

    let db = required("NAME");
    let host = required("HOST");
    let username = required("USERNAME");
    let password = required("PASSWORD");
    let auth_source = required("AUTH_SOURCE");

    if !missing.is_empty() {
        return Err(MoorageError::EnvVarNotFound(missing.join(", ")));
    }

    let port = match lookup(&var("PORT")) {
        Some(raw) => raw.trim().parse::<u16>().map_err(|e| {
            MoorageError::Config(format!("Invalid {}: '{}': {}", var("PORT"), raw, e))
        })?,
        None => 0,
    };

    let timeout = match lookup(&var("TIMEOUT")) {
        Some(raw) => raw.trim().parse::<u64>().map_err(|e| {
            MoorageError::Config(format!("Invalid {}: '{}': {}", var("TIMEOUT"), raw, e))
        })?,
        None => 10,
    };

    let options = match lookup(&var("OPTIONS")) {
        Some(raw) => parse_option_list(&raw)
            .map_err(|e| MoorageError::Config(format!("Invalid {}: {}", var("OPTIONS"), e)))?,
        None => HashMap::new(),
    };

    Ok(Conf {
        db,
        host,
        port,
        username,
        password,
        auth_source,
        timeout,
        options,
    })
}

/// Parse `k=v,k2=v2` into an options map
fn parse_option_list(raw: &str) -> Result<HashMap<String, String>, String> {
    let mut options = HashMap::new();
    for pair in raw.split(',').map(str::trim).filter(|p| !p.is_empty()) {
        let (key, value) = pair
            .split_once('=')
            .ok_or_else(|| format!("expected key=value, got '{}'", pair))?;
        options.insert(key.trim().to_string(), value.trim().to_string());
    }
    Ok(options)
}
