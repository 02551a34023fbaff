//! Environment validation
//!
//! Only the shape of each recognized variable is checked here; whether a
//! database is actually reachable is not this crate's concern.

use crate::config::types::{Environment, DATABASE_URL, MIGRATIONS_DIR, SCHEMA_PATH};
use crate::error::{ConfigError, ConfigResult};
use regex::Regex;
use std::sync::OnceLock;

fn url_scheme() -> &'static Regex {
    static SCHEME: OnceLock<Regex> = OnceLock::new();
    SCHEME.get_or_init(|| Regex::new(r"(?i)^[a-z][a-z0-9+.\-]*:").expect("valid regex"))
}

/// Validate a loaded environment
pub fn validate_environment(env: &Environment) -> ConfigResult<()> {
    if let Some(url) = &env.database_url {
        validate_database_url(url)?;
    }

    for key in [SCHEMA_PATH, MIGRATIONS_DIR] {
        if let Some(value) = env.var(key) {
            if value.trim().is_empty() {
                return Err(invalid(key, "must not be empty"));
            }
        }
    }

    Ok(())
}

/// Check that a connection string starts with a URL scheme
pub fn validate_database_url(url: &str) -> ConfigResult<()> {
    if url.trim().is_empty() {
        return Err(invalid(DATABASE_URL, "must not be empty"));
    }
    if !url_scheme().is_match(url) {
        return Err(invalid(
            DATABASE_URL,
            "must start with a scheme such as postgresql:, mysql: or file:",
        ));
    }
    Ok(())
}

fn invalid(key: &str, reason: &str) -> ConfigError {
    ConfigError::Invalid {
        key: key.to_string(),
        reason: reason.to_string(),
    }
}
