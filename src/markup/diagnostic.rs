use std::fmt;

use serde::Serialize;

/// How bad a markup diagnostic is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// The parser recovered and kept going (e.g. an undefined entity).
    Error,
    /// A well-formedness violation.
    Fatal,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Error => f.write_str("ERROR"),
            Severity::Fatal => f.write_str("FATAL"),
        }
    }
}

/// One diagnostic emitted while parsing code-block markup.
///
/// The raw message (`Display`) has the shape
/// `"{line}:{column}: {SEVERITY}: {message}"`. Callers that only need the
/// human readable part should go through [`ParseError::summary`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParseError {
    pub line: usize,
    pub column: usize,
    pub severity: Severity,
    pub message: String,
}

impl ParseError {
    pub fn new(line: usize, column: usize, severity: Severity, message: impl Into<String>) -> Self {
        Self {
            line,
            column,
            severity,
            message: message.into(),
        }
    }

    /// The short, user facing snippet of this diagnostic.
    ///
    /// Empty when the raw message does not have the expected layout.
    pub fn summary(&self) -> String {
        readable_message(&self.to_string())
            .unwrap_or_default()
            .to_string()
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{}: {}: {}",
            self.line, self.column, self.severity, self.message
        )
    }
}

/// Pulls the fourth `:` separated segment out of a raw diagnostic.
///
/// This is coupled to the raw message layout above: `line`, `column`,
/// `severity`, then the message kind. Returns `None` when there are fewer
/// than four segments.
pub fn readable_message(raw: &str) -> Option<&str> {
    raw.split(':').nth(3).map(str::trim)
}
