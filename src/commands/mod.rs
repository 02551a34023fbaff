//! Concrete commands
//!
//! Each leaf owns its help text and flag spec; the root group is assembled in
//! [`crate::cli::app`].

pub mod migrate;
pub mod version;

// Re-export main types
pub use migrate::{migrate_command, Direction, MigrateApply, MigrateNew, Selector};
pub use version::Version;
