//! Environment configuration
//!
//! This module loads the process environment and `.env` files once at
//! startup and validates the variables the CLI understands.

pub mod parse;
pub mod schema;
pub mod types;

// Re-export main types
pub use parse::*;
pub use schema::*;
pub use types::*;
