//! Main CLI application
//!
//! This is the process boundary: it loads the environment, builds the command
//! tree, runs the root command and is the only place that decides what goes to
//! stdout, what goes to stderr, and the exit code.

use crate::cli::command::{Command, CommandGroup};
use crate::commands::{migrate_command, Version};
use crate::config::{load_environment, Environment};
use crate::error::{CliError, Outcome};
use crate::logging;
use crate::ui::{Prompt, TerminalPrompt};
use std::env;
use std::io::{self, Write};
use std::process::ExitCode;
use tracing::debug;

const ROOT_HELP: &str = r#"
    Prisma is a modern DB toolkit to query, migrate and model your database

    Usage

      prisma [command] [options]

    Options

      -h, --help   Display this help message

    Commands

      migrate   Migrate your database
      version   Print version information

    Examples

      Create a new migration
      $ prisma migrate new --name init

      Apply all pending migrations
      $ prisma migrate up
"#;

/// Exit status for a successful run
pub const EXIT_SUCCESS: u8 = 0;

/// Exit status for help output and every kind of failure
pub const EXIT_FAILURE: u8 = 1;

/// CLI application
pub struct App {
    /// Root of the command tree
    root: CommandGroup,
}

impl App {
    /// Build the command tree for an environment
    pub fn new(env: &Environment, prompt: Box<dyn Prompt>) -> Self {
        let root = CommandGroup::new(
            ROOT_HELP,
            [
                (
                    "migrate",
                    Box::new(migrate_command(env, prompt)) as Box<dyn Command>,
                ),
                ("version", Box::new(Version::new(env)) as Box<dyn Command>),
            ],
        );

        App { root }
    }

    pub fn root(&self) -> &CommandGroup {
        &self.root
    }

    /// Run the command tree against arguments that exclude the program name
    pub fn run(&self, args: &[String]) -> Outcome {
        debug!(?args, "running");
        self.root.parse(args)
    }
}

/// Print an outcome to the right stream and return the exit status
pub fn report<O: Write, E: Write>(outcome: Outcome, stdout: &mut O, stderr: &mut E) -> u8 {
    // Nothing sensible can be done when writing to a closed stream fails.
    match outcome {
        Ok(payload) => {
            if !payload.is_empty() {
                let _ = writeln!(stdout, "{}", payload);
            }
            EXIT_SUCCESS
        }
        Err(CliError::Help(help)) => {
            let _ = write!(stderr, "{}", help.text());
            EXIT_FAILURE
        }
        Err(CliError::Other(err)) => {
            debug!("{:#}", err);
            let _ = writeln!(stderr, "Error: {:?}", err);
            EXIT_FAILURE
        }
    }
}

/// Run the CLI application with the process arguments
pub fn run() -> ExitCode {
    logging::init();

    let environment = match env::current_dir()
        .map_err(anyhow::Error::from)
        .and_then(|dir| load_environment(&dir).map_err(anyhow::Error::from))
    {
        Ok(environment) => environment,
        Err(err) => {
            eprintln!("Error: {:#}", err);
            return ExitCode::from(EXIT_FAILURE);
        }
    };

    let app = App::new(&environment, Box::new(TerminalPrompt));

    let args: Vec<String> = env::args_os()
        .skip(1)
        .map(|arg| arg.to_string_lossy().into_owned())
        .collect();

    let outcome = app.run(&args);
    let code = report(outcome, &mut io::stdout().lock(), &mut io::stderr().lock());
    ExitCode::from(code)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::PromptSpec;

    struct NoAnswer;

    impl Prompt for NoAnswer {
        fn ask(&self, _spec: &PromptSpec) -> anyhow::Result<Option<String>> {
            Ok(None)
        }
    }

    fn app() -> App {
        App::new(&Environment::default(), Box::new(NoAnswer))
    }

    fn argv(tokens: &[&str]) -> Vec<String> {
        tokens.iter().map(|t| t.to_string()).collect()
    }

    fn run_and_report(args: &[&str]) -> (u8, String, String) {
        let mut stdout = Vec::new();
        let mut stderr = Vec::new();
        let code = report(app().run(&argv(args)), &mut stdout, &mut stderr);
        (
            code,
            String::from_utf8(stdout).unwrap(),
            String::from_utf8(stderr).unwrap(),
        )
    }

    #[test]
    fn test_no_args_prints_root_help() {
        let app = app();
        let (code, stdout, stderr) = run_and_report(&[]);
        assert_eq!(code, EXIT_FAILURE);
        assert!(stdout.is_empty());
        assert_eq!(stderr, app.root().help().as_str());
    }

    #[test]
    fn test_success_goes_to_stdout() {
        let (code, stdout, stderr) = run_and_report(&["migrate", "new", "--name", "foo"]);
        assert_eq!(code, EXIT_SUCCESS);
        assert!(stdout.contains("foo"));
        assert!(stdout.ends_with('\n'));
        assert!(stderr.is_empty());
    }

    #[test]
    fn test_unknown_command() {
        let (code, stdout, stderr) = run_and_report(&["bogus"]);
        assert_eq!(code, EXIT_FAILURE);
        assert!(stdout.is_empty());
        assert!(stderr.contains("Unknown command \"bogus\""));
    }

    #[test]
    fn test_root_does_not_consume_leaf_flags() {
        let (code, stdout, _) = run_and_report(&["migrate", "up", "1", "--preview"]);
        assert_eq!(code, EXIT_SUCCESS);
        assert!(stdout.starts_with("Preview: Applying 1 migration"));
    }

    #[test]
    fn test_generic_error_is_reported_with_chain() {
        let err = anyhow::anyhow!("disk on fire").context("could not write migration");
        let mut stdout = Vec::new();
        let mut stderr = Vec::new();

        let code = report(Err(err.into()), &mut stdout, &mut stderr);
        let stderr = String::from_utf8(stderr).unwrap();

        assert_eq!(code, EXIT_FAILURE);
        assert!(stderr.contains("could not write migration"));
        assert_eq!(stderr.matches("disk on fire").count(), 1);
    }

    #[test]
    fn test_empty_success_prints_nothing() {
        let mut stdout = Vec::new();
        let mut stderr = Vec::new();
        let code = report(Ok(String::new()), &mut stdout, &mut stderr);
        assert_eq!(code, EXIT_SUCCESS);
        assert!(stdout.is_empty());
        assert!(stderr.is_empty());
    }
}
