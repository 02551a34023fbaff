//! Help text rendering

use colored::Colorize;

/// Usage text owned by a single command
///
/// The template is reflowed once, when the command is built: common leading
/// indentation is removed, trailing whitespace is trimmed from every line, and
/// the result ends with exactly one newline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HelpText {
    text: String,
}

impl HelpText {
    pub fn new(template: &str) -> Self {
        HelpText {
            text: reflow(template),
        }
    }

    /// Render the help text, optionally prefixed with an error banner
    pub fn render(&self, error: Option<&str>) -> String {
        match error {
            Some(message) => format!("\n{} {}\n{}", marker(), message, self.text),
            None => self.text.clone(),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }
}

/// The "!" shown in front of error messages
pub(crate) fn marker() -> String {
    "!".red().bold().to_string()
}

fn reflow(template: &str) -> String {
    let lines: Vec<&str> = template.lines().map(str::trim_end).collect();

    // Only ASCII spaces and tabs count as indentation, and only the prefix
    // shared by every non-blank line is removed.
    let indent = lines
        .iter()
        .filter(|line| !line.is_empty())
        .map(|line| leading_indent(line))
        .reduce(common_prefix)
        .unwrap_or("");

    let start = lines.iter().position(|line| !line.is_empty());
    let end = lines.iter().rposition(|line| !line.is_empty());

    let body = match (start, end) {
        (Some(start), Some(end)) => lines[start..=end]
            .iter()
            .map(|line| line.strip_prefix(indent).unwrap_or(line))
            .collect::<Vec<_>>()
            .join("\n"),
        _ => String::new(),
    };

    format!("{}\n", body)
}

fn leading_indent(line: &str) -> &str {
    let content = line.trim_start_matches([' ', '\t']);
    &line[..line.len() - content.len()]
}

fn common_prefix<'a>(a: &'a str, b: &'a str) -> &'a str {
    let len = a
        .bytes()
        .zip(b.bytes())
        .take_while(|(x, y)| x == y)
        .count();
    &a[..len]
}
