//! Flag parsing for a single command level
//!
//! Each command parses only its own flags. Parsing stops at the first
//! positional token: that token and everything after it are handed back
//! untouched so a subcommand can interpret them, even the ones that look like
//! flags.

use crate::error::{ArgError, ArgResult};
use clap::{Arg, ArgAction, ColorChoice, Command};
use std::collections::HashMap;

/// Id of the catch-all positional argument
const POSITIONALS: &str = "__positionals";

/// How a flag takes its value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlagKind {
    /// Presence flag, takes no value
    Bool,
    /// Takes the next token as its value
    Text,
}

/// A single recognized flag
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Flag {
    pub name: &'static str,
    pub short: Option<char>,
    pub kind: FlagKind,
}

impl Flag {
    pub const fn boolean(name: &'static str) -> Self {
        Flag {
            name,
            short: None,
            kind: FlagKind::Bool,
        }
    }

    pub const fn text(name: &'static str) -> Self {
        Flag {
            name,
            short: None,
            kind: FlagKind::Text,
        }
    }

    pub const fn with_short(mut self, short: char) -> Self {
        self.short = Some(short);
        self
    }

    fn to_arg(self) -> Arg {
        let mut arg = Arg::new(self.name).long(self.name);
        if let Some(short) = self.short {
            arg = arg.short(short);
        }
        match self.kind {
            FlagKind::Bool => arg.action(ArgAction::SetTrue),
            FlagKind::Text => arg
                .action(ArgAction::Set)
                .value_name(self.name.to_uppercase()),
        }
    }
}

/// `--help` / `-h`, understood by every command
pub const HELP_FLAG: Flag = Flag::boolean("help").with_short('h');

/// The flags one command recognizes
#[derive(Debug, Clone, Copy)]
pub struct FlagSpec {
    flags: &'static [Flag],
}

impl FlagSpec {
    pub const fn new(flags: &'static [Flag]) -> Self {
        FlagSpec { flags }
    }

    pub fn flags(&self) -> &[Flag] {
        self.flags
    }

    fn to_command(self) -> Command {
        let cmd = Command::new("flags")
            .no_binary_name(true)
            .disable_help_flag(true)
            .disable_version_flag(true)
            .args_override_self(true)
            .color(ColorChoice::Never);

        self.flags
            .iter()
            .fold(cmd, |cmd, flag| cmd.arg(flag.to_arg()))
            .arg(
                Arg::new(POSITIONALS)
                    .num_args(1..)
                    .action(ArgAction::Append)
                    .trailing_var_arg(true),
            )
    }
}

/// A recognized flag value
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FlagValue {
    Present,
    Text(String),
}

/// Flags recognized at one level plus the tokens left for the next
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedArgs {
    values: HashMap<&'static str, FlagValue>,
    positionals: Vec<String>,
}

impl ParsedArgs {
    /// Whether a flag was given (boolean or text)
    pub fn is_set(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    /// The value of a text flag, if given
    pub fn value(&self, name: &str) -> Option<&str> {
        match self.values.get(name) {
            Some(FlagValue::Text(value)) => Some(value),
            _ => None,
        }
    }

    /// Unconsumed tokens, in order
    pub fn positionals(&self) -> &[String] {
        &self.positionals
    }
}

/// Parse `argv` against `spec`
pub fn parse(argv: &[String], spec: &FlagSpec) -> ArgResult<ParsedArgs> {
    let matches = spec
        .to_command()
        .try_get_matches_from(argv)
        .map_err(|e| ArgError::new(summarize(&e)))?;

    let mut values = HashMap::new();
    for flag in spec.flags() {
        match flag.kind {
            FlagKind::Bool => {
                if matches.get_flag(flag.name) {
                    values.insert(flag.name, FlagValue::Present);
                }
            }
            FlagKind::Text => {
                if let Some(value) = matches.get_one::<String>(flag.name) {
                    values.insert(flag.name, FlagValue::Text(value.clone()));
                }
            }
        }
    }

    let positionals = matches
        .get_many::<String>(POSITIONALS)
        .map(|values| values.cloned().collect())
        .unwrap_or_default();

    Ok(ParsedArgs {
        values,
        positionals,
    })
}

/// First line of a clap error, without its `error: ` prefix
fn summarize(err: &clap::Error) -> String {
    let rendered = err.to_string();
    let first = rendered.lines().next().unwrap_or("invalid arguments").trim();
    first.strip_prefix("error: ").unwrap_or(first).to_string()
}
