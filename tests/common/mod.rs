//! Common test utilities

use assert_cmd::Command;
use std::fs;
use tempfile::TempDir;

/// Variables that would leak the developer's environment into a run
const ISOLATED_VARS: &[&str] = &[
    "DATABASE_URL",
    "PRISMA_SCHEMA_PATH",
    "PRISMA_MIGRATIONS_DIR",
    "PRISMA_LOG",
];

/// The `prisma` binary, run from an empty temporary directory
pub fn prisma() -> (TempDir, Command) {
    let temp_dir = TempDir::new().unwrap();
    let cmd = prisma_in(&temp_dir);
    (temp_dir, cmd)
}

/// The `prisma` binary, run from `dir`
pub fn prisma_in(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("prisma").unwrap();
    cmd.current_dir(dir.path());
    for var in ISOLATED_VARS {
        cmd.env_remove(var);
    }
    cmd
}

/// Create a temporary directory with a .env file
pub fn create_env_file(content: &str) -> TempDir {
    let temp_dir = TempDir::new().unwrap();
    fs::write(temp_dir.path().join(".env"), content).unwrap();
    temp_dir
}

pub fn argv(tokens: &[&str]) -> Vec<String> {
    tokens.iter().map(|t| t.to_string()).collect()
}
