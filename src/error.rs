//! Error types for config validation

use ariadne::{Color, Label, Report, ReportKind, Source};
use thiserror::Error;

/// Byte range in source text
pub type Span = std::ops::Range<usize>;

/// A validation error found while scanning the host/group config file.
///
/// These are collected across the whole scan rather than aborting at the
/// first one, so the operator gets a complete report in a single run. Any
/// collected error fails the run; no output file is written.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// A tokenized item's first token lacks a `$` or `@` sigil
    #[error("line {line_no}: invalid source line: {text}")]
    InvalidSourceLine {
        line_no: usize,
        text: String,
        span: Span,
    },

    /// A referenced source template does not exist in the registry
    #[error("line {line_no}: unknown source '${name}'")]
    UnknownSource {
        line_no: usize,
        name: String,
        span: Span,
    },

    /// A host references a group that was never declared
    #[error("line {line_no}: host '{host}' references unknown group '@{name}'")]
    UnknownGroup {
        line_no: usize,
        host: String,
        name: String,
        span: Span,
    },

    /// A group declaration contains a group reference (groups cannot nest)
    #[error("line {line_no}: group '@{group}' cannot contain group reference '@{name}'")]
    NestedGroup {
        line_no: usize,
        group: String,
        name: String,
        span: Span,
    },
}

impl ConfigError {
    /// The byte range of the offending line in the config text
    pub fn span(&self) -> &Span {
        match self {
            ConfigError::InvalidSourceLine { span, .. }
            | ConfigError::UnknownSource { span, .. }
            | ConfigError::UnknownGroup { span, .. }
            | ConfigError::NestedGroup { span, .. } => span,
        }
    }

    /// Format the error with source context using ariadne
    pub fn format(&self, source: &str, filename: &str) -> String {
        let span = self.span().clone();
        let mut buf = Vec::new();

        Report::build(ReportKind::Error, filename, span.start)
            .with_message(self.to_string())
            .with_label(
                Label::new((filename, span))
                    .with_message(self.label())
                    .with_color(Color::Red),
            )
            .finish()
            .write((filename, Source::from(source)), &mut buf)
            .unwrap();

        String::from_utf8(buf).unwrap()
    }

    /// Short label text for the report's underline
    fn label(&self) -> String {
        match self {
            ConfigError::InvalidSourceLine { .. } => {
                "expected a '$source' or '@group' reference here".to_string()
            }
            ConfigError::UnknownSource { name, .. } => {
                format!("'${}' is not defined in the sources file", name)
            }
            ConfigError::UnknownGroup { name, .. } => {
                format!("'@{}' was never declared", name)
            }
            ConfigError::NestedGroup { .. } => "groups cannot nest".to_string(),
        }
    }
}
