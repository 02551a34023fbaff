//! Commands and command groups
//!
//! A [`Command`] consumes a slice of argument tokens and produces an
//! [`Outcome`]. A [`CommandGroup`] is a command that owns named children: it
//! strips its own flags, picks a child by the first remaining token, and hands
//! the rest of the tokens to that child. Leaves implement [`Command`] directly.

use crate::cli::args::{self, FlagSpec, ParsedArgs, HELP_FLAG};
use crate::cli::help::HelpText;
use crate::error::{HelpError, Outcome};
use std::collections::BTreeMap;
use tracing::debug;

/// Something that can handle its slice of the argument vector
pub trait Command {
    fn parse(&self, argv: &[String]) -> Outcome;
}

impl<F> Command for F
where
    F: Fn(&[String]) -> Outcome,
{
    fn parse(&self, argv: &[String]) -> Outcome {
        self(argv)
    }
}

/// Parse a command's own flags, turning failures and `--help` into help errors
pub fn parse_flags(
    argv: &[String],
    spec: &FlagSpec,
    help: &HelpText,
) -> Result<ParsedArgs, HelpError> {
    let parsed =
        args::parse(argv, spec).map_err(|e| HelpError::with_message(help, e.message()))?;

    if parsed.is_set(HELP_FLAG.name) {
        return Err(HelpError::help(help));
    }

    Ok(parsed)
}

const GROUP_FLAGS: FlagSpec = FlagSpec::new(&[HELP_FLAG]);

/// A command that dispatches to named subcommands
pub struct CommandGroup {
    help: HelpText,
    commands: BTreeMap<String, Box<dyn Command>>,
}

impl CommandGroup {
    pub fn new<I, S>(help: &str, commands: I) -> Self
    where
        I: IntoIterator<Item = (S, Box<dyn Command>)>,
        S: Into<String>,
    {
        CommandGroup {
            help: HelpText::new(help),
            commands: commands
                .into_iter()
                .map(|(name, cmd)| (name.into(), cmd))
                .collect(),
        }
    }

    pub fn help(&self) -> &HelpText {
        &self.help
    }

    /// Names of the subcommands, sorted
    pub fn command_names(&self) -> impl Iterator<Item = &str> {
        self.commands.keys().map(String::as_str)
    }
}

impl Command for CommandGroup {
    fn parse(&self, argv: &[String]) -> Outcome {
        let parsed = parse_flags(argv, &GROUP_FLAGS, &self.help)?;

        let Some((name, rest)) = parsed.positionals().split_first() else {
            return Err(HelpError::help(&self.help).into());
        };

        match self.commands.get(name) {
            Some(cmd) => {
                debug!(command = %name, args = ?rest, "dispatching");
                cmd.parse(rest)
            }
            None => {
                debug!(command = %name, "unknown command");
                Err(HelpError::unknown_command(&self.help, name).into())
            }
        }
    }
}
