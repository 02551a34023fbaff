//! Interactive prompts
//!
//! Commands that need a value the user did not pass as a flag can ask for it
//! through a [`Prompt`]. Prompting is a blocking call; at most one prompt is
//! open at a time.

use anyhow::Context as _;
use std::io::{self, BufRead, IsTerminal, Write};
use tracing::debug;

/// Kind of answer a prompt expects
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptKind {
    /// Free-form single line of text
    Text,
}

/// Validation hook: `Err` carries the reason shown to the user
pub type Validator = fn(&str) -> Result<(), String>;

/// What to ask and how to check the answer
#[derive(Clone)]
pub struct PromptSpec {
    pub kind: PromptKind,
    pub message: String,
    pub validate: Validator,
}

impl PromptSpec {
    /// The line shown before reading an answer
    pub fn header(&self) -> String {
        match self.kind {
            PromptKind::Text => format!("? {} › ", self.message),
        }
    }

    pub fn text(message: impl Into<String>, validate: Validator) -> Self {
        PromptSpec {
            kind: PromptKind::Text,
            message: message.into(),
            validate,
        }
    }
}

/// Source of interactive answers
///
/// `Ok(None)` means no usable value was obtained.
pub trait Prompt {
    fn ask(&self, spec: &PromptSpec) -> anyhow::Result<Option<String>>;
}

/// Asks on stderr and reads answers from stdin
#[derive(Debug, Default, Clone, Copy)]
pub struct TerminalPrompt;

impl TerminalPrompt {
    fn ask_from<R: BufRead, W: Write>(
        spec: &PromptSpec,
        input: &mut R,
        output: &mut W,
    ) -> anyhow::Result<Option<String>> {
        loop {
            write!(output, "{}", spec.header())?;
            output.flush()?;

            let mut line = String::new();
            let read = input
                .read_line(&mut line)
                .context("Failed to read answer from stdin")?;
            if read == 0 {
                writeln!(output)?;
                return Ok(None);
            }

            let answer = line.trim();
            match (spec.validate)(answer) {
                Ok(()) => return Ok(Some(answer.to_string())),
                Err(reason) => writeln!(output, "  {}", reason)?,
            }
        }
    }
}

impl Prompt for TerminalPrompt {
    fn ask(&self, spec: &PromptSpec) -> anyhow::Result<Option<String>> {
        if !io::stdin().is_terminal() {
            debug!(message = %spec.message, "stdin is not a terminal, skipping prompt");
            return Ok(None);
        }

        let stdin = io::stdin();
        Self::ask_from(spec, &mut stdin.lock(), &mut io::stderr())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn non_empty(value: &str) -> Result<(), String> {
        if value.is_empty() {
            Err("A value is required".to_string())
        } else {
            Ok(())
        }
    }

    #[test]
    fn test_text_header() {
        let spec = PromptSpec::text("Name of migration", non_empty);
        assert_eq!(spec.kind, PromptKind::Text);
        assert_eq!(spec.header(), "? Name of migration › ");
    }

    #[test]
    fn test_ask_returns_answer() {
        let spec = PromptSpec::text("Name", non_empty);
        let mut input = Cursor::new("init\n");
        let mut output = Vec::new();

        let answer = TerminalPrompt::ask_from(&spec, &mut input, &mut output).unwrap();
        assert_eq!(answer, Some("init".to_string()));
        assert!(String::from_utf8(output).unwrap().contains("? Name"));
    }

    #[test]
    fn test_ask_retries_on_invalid() {
        let spec = PromptSpec::text("Name", non_empty);
        let mut input = Cursor::new("\n  \nfinal\n");
        let mut output = Vec::new();

        let answer = TerminalPrompt::ask_from(&spec, &mut input, &mut output).unwrap();
        assert_eq!(answer, Some("final".to_string()));
        let output = String::from_utf8(output).unwrap();
        assert_eq!(output.matches("A value is required").count(), 2);
    }

    #[test]
    fn test_ask_eof_is_none() {
        let spec = PromptSpec::text("Name", non_empty);
        let mut input = Cursor::new("\n");
        let mut output = Vec::new();

        let answer = TerminalPrompt::ask_from(&spec, &mut input, &mut output).unwrap();
        assert_eq!(answer, None);
    }
}
