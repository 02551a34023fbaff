//! `prisma version`

use crate::cli::args::{FlagSpec, HELP_FLAG};
use crate::cli::command::{parse_flags, Command};
use crate::cli::help::HelpText;
use crate::config::Environment;
use crate::error::{HelpError, Outcome};
use std::path::PathBuf;

const VERSION_HELP: &str = r#"
    Print version information

    Usage

      prisma version [options]

    Options

      -h, --help   Display this help message
"#;

const VERSION_FLAGS: FlagSpec = FlagSpec::new(&[HELP_FLAG]);

pub struct Version {
    help: HelpText,
    schema_path: PathBuf,
}

impl Version {
    pub fn new(env: &Environment) -> Self {
        Version {
            help: HelpText::new(VERSION_HELP),
            schema_path: env.schema_path.clone(),
        }
    }
}

impl Command for Version {
    fn parse(&self, argv: &[String]) -> Outcome {
        let parsed = parse_flags(argv, &VERSION_FLAGS, &self.help)?;

        if let Some(token) = parsed.positionals().first() {
            return Err(HelpError::unknown_command(&self.help, token).into());
        }

        Ok(format!(
            "prisma-cli {}\nschema     {}",
            crate::VERSION,
            self.schema_path.display()
        ))
    }
}
