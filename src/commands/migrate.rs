//! `prisma migrate` and its subcommands

use crate::cli::args::{Flag, FlagSpec, HELP_FLAG};
use crate::cli::command::{parse_flags, Command, CommandGroup};
use crate::cli::help::HelpText;
use crate::config::Environment;
use crate::error::{HelpError, Outcome};
use crate::ui::{Prompt, PromptSpec};
use regex::Regex;
use std::fmt;
use std::path::PathBuf;
use std::sync::OnceLock;
use tracing::info;

const MIGRATE_HELP: &str = r#"
    Migrate your database with confidence

    Usage

      prisma migrate [command] [options]

    Options

      -h, --help   Display this help message

    Commands

          new   Create a new migration
           up   Migrate your database up to a specific state
         down   Migrate your database down to a specific state

    Examples

      Create a new migration
      $ prisma migrate new --name add_unique_to_email

      Apply all pending migrations
      $ prisma migrate up

      Preview the next migration without applying it
      $ prisma migrate up 1 --preview
"#;

const NEW_HELP: &str = r#"
    Create a new migration

    Usage

      prisma migrate new [options]

    Options

      -h, --help   Display this help message
      -n, --name   Name the migration

    Examples

      Create a new migration
      $ prisma migrate new --name add_unique_to_email

      Create a new migration, asking for its name
      $ prisma migrate new
"#;

const UP_HELP: &str = r#"
    Migrate your database up to a specific state

    Usage

      prisma migrate up [<inc|timestamp|name>] [options]

    Arguments

      [<inc>]         go up by an increment [default: latest]
      [<timestamp>]   apply up to a 14 digit timestamp
      [<name>]        apply up to a migration name

    Options

      -h, --help      Display this help message
      -p, --preview   Preview the migration changes

    Examples

      Apply all pending migrations
      $ prisma migrate up

      Apply the next 2 migrations
      $ prisma migrate up 2

      Preview the next migration without applying it
      $ prisma migrate up 1 --preview
"#;

const DOWN_HELP: &str = r#"
    Migrate your database down to a specific state

    Usage

      prisma migrate down [<dec|timestamp|name>] [options]

    Arguments

      [<dec>]         go down by an amount [default: 1]
      [<timestamp>]   revert down to a 14 digit timestamp
      [<name>]        revert down to a migration name

    Options

      -h, --help      Display this help message
      -p, --preview   Preview the migration changes

    Examples

      Revert the last migration
      $ prisma migrate down

      Preview reverting the last 2 migrations
      $ prisma migrate down 2 --preview
"#;

const NEW_FLAGS: FlagSpec = FlagSpec::new(&[HELP_FLAG, Flag::text("name").with_short('n')]);

const APPLY_FLAGS: FlagSpec =
    FlagSpec::new(&[HELP_FLAG, Flag::boolean("preview").with_short('p')]);

fn migration_name_pattern() -> &'static Regex {
    static NAME: OnceLock<Regex> = OnceLock::new();
    NAME.get_or_init(|| Regex::new(r"^[A-Za-z0-9_-]+$").expect("valid regex"))
}

/// Check a migration name typed by the user
pub fn validate_migration_name(name: &str) -> Result<(), String> {
    if name.is_empty() {
        return Err("Please provide a name for the migration".to_string());
    }
    if !migration_name_pattern().is_match(name) {
        return Err(format!(
            "Invalid migration name \"{}\": use letters, digits, '-' and '_' only",
            name
        ));
    }
    Ok(())
}

/// Build the `migrate` command group
pub fn migrate_command(env: &Environment, prompt: Box<dyn Prompt>) -> CommandGroup {
    CommandGroup::new(
        MIGRATE_HELP,
        [
            (
                "new",
                Box::new(MigrateNew::new(env, prompt)) as Box<dyn Command>,
            ),
            (
                "up",
                Box::new(MigrateApply::new(Direction::Up, env)) as Box<dyn Command>,
            ),
            (
                "down",
                Box::new(MigrateApply::new(Direction::Down, env)) as Box<dyn Command>,
            ),
        ],
    )
}

/// `prisma migrate new`
pub struct MigrateNew {
    help: HelpText,
    migrations_dir: PathBuf,
    prompt: Box<dyn Prompt>,
}

impl MigrateNew {
    pub fn new(env: &Environment, prompt: Box<dyn Prompt>) -> Self {
        MigrateNew {
            help: HelpText::new(NEW_HELP),
            migrations_dir: env.migrations_dir.clone(),
            prompt,
        }
    }

    fn ask_name(&self) -> Outcome {
        let spec = PromptSpec::text("Name of migration", validate_migration_name);
        match self.prompt.ask(&spec)? {
            Some(name) if !name.trim().is_empty() => Ok(name.trim().to_string()),
            _ => Err(HelpError::with_message(&self.help, "No migration name provided").into()),
        }
    }
}

impl Command for MigrateNew {
    fn parse(&self, argv: &[String]) -> Outcome {
        let parsed = parse_flags(argv, &NEW_FLAGS, &self.help)?;

        if let Some(token) = parsed.positionals().first() {
            return Err(HelpError::unknown_command(&self.help, token).into());
        }

        let name = match parsed.value("name").map(str::trim).filter(|n| !n.is_empty()) {
            Some(name) => name.to_string(),
            None => self.ask_name()?,
        };

        validate_migration_name(&name)
            .map_err(|reason| HelpError::with_message(&self.help, &reason))?;

        info!(name = %name, "planning new migration");
        Ok(format!(
            "Planned migration \"{}\" in {}",
            name,
            self.migrations_dir.join(&name).display()
        ))
    }
}

/// Which way `migrate up` / `migrate down` moves
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
}

/// Target of `migrate up` / `migrate down`
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selector {
    /// Move by this many migrations
    Increment(u32),
    /// Move to the migration with this 14 digit timestamp
    Timestamp(String),
    /// Move to the migration with this name
    Name(String),
}

impl Selector {
    /// Interpret a positional token, `None` if it fits no selector form
    pub fn from_token(token: &str) -> Option<Self> {
        if !token.is_empty() && token.bytes().all(|b| b.is_ascii_digit()) {
            if token.len() == 14 {
                return Some(Selector::Timestamp(token.to_string()));
            }
            return match token.parse::<u32>() {
                Ok(n) if n > 0 => Some(Selector::Increment(n)),
                _ => None,
            };
        }
        if migration_name_pattern().is_match(token) {
            return Some(Selector::Name(token.to_string()));
        }
        None
    }

    pub fn is_increment(&self) -> bool {
        matches!(self, Selector::Increment(_))
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Selector::Increment(n) if *n == 1 => write!(f, "1 migration"),
            Selector::Increment(n) => write!(f, "{} migrations", n),
            Selector::Timestamp(ts) => write!(f, "timestamp {}", ts),
            Selector::Name(name) => write!(f, "\"{}\"", name),
        }
    }
}

impl Direction {
    fn describe(self, selector: Option<&Selector>) -> String {
        match (self, selector) {
            (Direction::Up, None) => "Applying all pending migrations".to_string(),
            (Direction::Up, Some(s)) if s.is_increment() => format!("Applying {}", s),
            (Direction::Up, Some(s)) => format!("Applying migrations up to {}", s),
            (Direction::Down, None) => "Reverting 1 migration".to_string(),
            (Direction::Down, Some(s)) if s.is_increment() => format!("Reverting {}", s),
            (Direction::Down, Some(s)) => format!("Reverting migrations down to {}", s),
        }
    }
}

/// `prisma migrate up` and `prisma migrate down`
pub struct MigrateApply {
    direction: Direction,
    help: HelpText,
    migrations_dir: PathBuf,
}

impl MigrateApply {
    pub fn new(direction: Direction, env: &Environment) -> Self {
        let help = match direction {
            Direction::Up => UP_HELP,
            Direction::Down => DOWN_HELP,
        };
        MigrateApply {
            direction,
            help: HelpText::new(help),
            migrations_dir: env.migrations_dir.clone(),
        }
    }
}

impl Command for MigrateApply {
    fn parse(&self, argv: &[String]) -> Outcome {
        let parsed = parse_flags(argv, &APPLY_FLAGS, &self.help)?;
        let mut preview = parsed.is_set("preview");

        // Flags may also follow the selector, so parse what trails it again.
        let selector = match parsed.positionals().split_first() {
            None => None,
            Some((token, rest)) => {
                let selector = Selector::from_token(token)
                    .ok_or_else(|| HelpError::unknown_command(&self.help, token))?;

                let trailing = parse_flags(rest, &APPLY_FLAGS, &self.help)?;
                if let Some(extra) = trailing.positionals().first() {
                    return Err(HelpError::unknown_command(&self.help, extra).into());
                }
                preview |= trailing.is_set("preview");

                Some(selector)
            }
        };

        let plan = format!(
            "{} from {}",
            self.direction.describe(selector.as_ref()),
            self.migrations_dir.display()
        );
        info!(direction = ?self.direction, ?selector, preview, "migration plan");

        if preview {
            Ok(format!("Preview: {} (no changes applied)", plan))
        } else {
            Ok(plan)
        }
    }
}
