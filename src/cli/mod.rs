//! CLI interface and argument dispatch
//!
//! This module handles per-command flag parsing, help rendering, the
//! command tree and the process boundary.

pub mod app;
pub mod args;
pub mod command;
pub mod help;

// Re-export main types
pub use app::*;
pub use command::{Command, CommandGroup};
pub use help::HelpText;
