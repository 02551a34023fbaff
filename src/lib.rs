//! Prisma CLI - command dispatch for database tooling
//!
//! Arguments are routed through a tree of commands. Every command parses only
//! its own flags and hands the remaining tokens to a child, and every failure
//! that calls for usage text comes back as a displayable help error.

// Public modules
pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod logging;
pub mod ui;

// Re-export commonly used types
pub use error::{CliError, Outcome};

/// Current version of the Prisma CLI
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
