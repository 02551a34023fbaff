//! User interaction
//!
//! This module holds the interactive collaborators commands may call into.

pub mod prompt;

// Re-export main types
pub use prompt::*;
