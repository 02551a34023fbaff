//! Error types for the Prisma CLI

use crate::cli::help::HelpText;
use thiserror::Error;

/// Result of running a command: a payload to print, or an error to report
pub type Outcome = std::result::Result<String, CliError>;

/// Main error type returned by every command
///
/// The two variants are reported differently at the process boundary: a help
/// error is printed as-is, anything else is printed with its full cause chain.
#[derive(Error, Debug)]
pub enum CliError {
    /// Usage text to show the user, optionally with an error banner
    #[error(transparent)]
    Help(#[from] HelpError),

    /// Unexpected failure
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl CliError {
    /// Whether this error is display-only usage text
    pub fn is_help(&self) -> bool {
        matches!(self, CliError::Help(_))
    }
}

/// Pre-rendered usage text, shown to the user without a trace
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{text}")]
pub struct HelpError {
    text: String,
}

impl HelpError {
    /// Plain help text, no banner
    pub fn help(help: &HelpText) -> Self {
        HelpError {
            text: help.render(None),
        }
    }

    /// Help text prefixed with an error banner
    pub fn with_message(help: &HelpText, message: &str) -> Self {
        HelpError {
            text: help.render(Some(message)),
        }
    }

    /// `Unknown command "<token>"` over the given help text
    pub fn unknown_command(help: &HelpText, token: &str) -> Self {
        Self::with_message(help, &format!("Unknown command \"{}\"", token))
    }

    /// The full text to display
    pub fn text(&self) -> &str {
        &self.text
    }
}

/// Flag parsing errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct ArgError {
    message: String,
}

impl ArgError {
    pub fn new(message: impl Into<String>) -> Self {
        ArgError {
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Environment loading and validation errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Environment variable {key} is invalid: {reason}")]
    Invalid { key: String, reason: String },

    #[error("Failed to read env file '{path}': {error}")]
    EnvFile {
        path: std::path::PathBuf,
        error: dotenvy::Error,
    },
}

/// Specialized result type for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Specialized result type for flag parsing
pub type ArgResult<T> = std::result::Result<T, ArgError>;
