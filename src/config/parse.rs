//! Environment discovery and loading

use crate::config::schema::validate_environment;
use crate::config::types::{
    Environment, DATABASE_URL, DEFAULT_MIGRATIONS_DIR, DEFAULT_SCHEMA_PATH, MIGRATIONS_DIR,
    SCHEMA_PATH,
};
use crate::error::{ConfigError, ConfigResult};
use std::collections::HashMap;
use std::env;
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Env files to read, relative to the working directory, in priority order
const ENV_FILE_NAMES: &[&str] = &[".env", "prisma/.env"];

/// Find the env files that exist under `dir`
pub fn find_env_files(dir: &Path) -> Vec<PathBuf> {
    ENV_FILE_NAMES
        .iter()
        .map(|name| dir.join(name))
        .filter(|path| path.is_file())
        .collect()
}

/// Load the environment for a working directory
///
/// Process variables take precedence over env files, and earlier env files
/// take precedence over later ones.
pub fn load_environment(dir: &Path) -> ConfigResult<Environment> {
    let mut vars = collect_vars(env::vars_os())?;

    for path in find_env_files(dir) {
        debug!(path = %path.display(), "reading env file");
        for (key, value) in read_env_file(&path)? {
            vars.entry(key).or_insert(value);
        }
    }

    Environment::from_vars(vars)
}

/// Keep the variables that are valid Unicode
///
/// Other variables are skipped, unless they are one the CLI reads, in which
/// case the value cannot be used and loading fails.
pub fn collect_vars<I>(vars: I) -> ConfigResult<HashMap<String, String>>
where
    I: IntoIterator<Item = (OsString, OsString)>,
{
    let mut collected = HashMap::new();

    for (key, value) in vars {
        match (key.into_string(), value.into_string()) {
            (Ok(key), Ok(value)) => {
                collected.insert(key, value);
            }
            (Ok(key), Err(_)) if RECOGNIZED_VARS.contains(&key.as_str()) => {
                return Err(ConfigError::Invalid {
                    key,
                    reason: "value is not valid Unicode".to_string(),
                });
            }
            (key, _) => {
                debug!(key = ?key, "skipping variable that is not valid Unicode");
            }
        }
    }

    Ok(collected)
}

/// Variables the CLI reads
const RECOGNIZED_VARS: &[&str] = &[DATABASE_URL, SCHEMA_PATH, MIGRATIONS_DIR];

/// Parse an env file into key/value pairs, without touching the process environment
pub fn read_env_file(path: &Path) -> ConfigResult<Vec<(String, String)>> {
    let env_file_error = |error| ConfigError::EnvFile {
        path: path.to_path_buf(),
        error,
    };

    dotenvy::from_path_iter(path)
        .map_err(env_file_error)?
        .collect::<Result<Vec<_>, _>>()
        .map_err(env_file_error)
}

impl Environment {
    /// Build and validate an environment from a raw variable mapping
    pub fn from_vars(vars: HashMap<String, String>) -> ConfigResult<Self> {
        let env = Environment {
            database_url: vars.get(DATABASE_URL).cloned(),
            schema_path: PathBuf::from(
                vars.get(SCHEMA_PATH)
                    .map(String::as_str)
                    .unwrap_or(DEFAULT_SCHEMA_PATH),
            ),
            migrations_dir: PathBuf::from(
                vars.get(MIGRATIONS_DIR)
                    .map(String::as_str)
                    .unwrap_or(DEFAULT_MIGRATIONS_DIR),
            ),
            vars,
        };

        validate_environment(&env)?;
        Ok(env)
    }
}
