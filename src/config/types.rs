//! Core configuration types
//!
//! This module defines the environment the CLI runs against.

use std::collections::HashMap;
use std::path::PathBuf;

/// Connection string of the target database
pub const DATABASE_URL: &str = "DATABASE_URL";

/// Location of the schema file
pub const SCHEMA_PATH: &str = "PRISMA_SCHEMA_PATH";

/// Directory holding migration folders
pub const MIGRATIONS_DIR: &str = "PRISMA_MIGRATIONS_DIR";

pub const DEFAULT_SCHEMA_PATH: &str = "prisma/schema.prisma";
pub const DEFAULT_MIGRATIONS_DIR: &str = "prisma/migrations";

/// Validated environment, loaded once at startup
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Environment {
    /// Database connection string, if configured
    pub database_url: Option<String>,

    /// Path to the schema file
    pub schema_path: PathBuf,

    /// Directory where migrations live
    pub migrations_dir: PathBuf,

    /// Every variable seen while loading
    pub vars: HashMap<String, String>,
}

impl Default for Environment {
    fn default() -> Self {
        Environment {
            database_url: None,
            schema_path: PathBuf::from(DEFAULT_SCHEMA_PATH),
            migrations_dir: PathBuf::from(DEFAULT_MIGRATIONS_DIR),
            vars: HashMap::new(),
        }
    }
}

impl Environment {
    /// Look up a raw variable
    pub fn var(&self, key: &str) -> Option<&str> {
        self.vars.get(key).map(String::as_str)
    }
}
