//! Stanzagen - generates monitoring configuration from stanza templates
//!
//! This library turns two operator-authored text files into one generated
//! monitoring configuration: a catalog of reusable stanza templates (the
//! "sources" file) and a host/group declaration file. Hosts declare which
//! checks they get; groups bundle repeated check sets under one alias.
//!
//! # Example
//!
//! ```rust
//! use stanzagen::generate;
//!
//! let sources = "$ping\ncheck_ping $1\n";
//! let config = "web01 $ping\n";
//!
//! let output = generate(sources, config).unwrap();
//! assert!(output.contains("check_ping web01"));
//! ```

pub mod error;
pub mod registry;
pub mod renderer;
pub mod resolver;
pub mod tokenizer;

pub use error::{ConfigError, Span};
pub use registry::SourceRegistry;
pub use renderer::render;
pub use resolver::{resolve, Binding, HostBindings};
pub use tokenizer::{tokenize, Invocation, Reference, TokenizeError};

use thiserror::Error;

/// Errors that can occur during the generate pipeline
#[derive(Debug, Error)]
pub enum GenerateError {
    /// Config validation failed; every problem found in the pass is listed
    #[error("config errors: {}", format_config_errors(.0))]
    Config(Vec<ConfigError>),
}

impl From<Vec<ConfigError>> for GenerateError {
    fn from(errors: Vec<ConfigError>) -> Self {
        GenerateError::Config(errors)
    }
}

fn format_config_errors(errors: &[ConfigError]) -> String {
    errors
        .iter()
        .map(|e| e.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}

/// Configuration for the generate pipeline
#[derive(Debug, Clone, Default)]
pub struct GenerateConfig {
    /// Banner timestamp override; defaults to the current local time
    pub timestamp: Option<String>,
}

impl GenerateConfig {
    /// Create a new configuration with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Use a fixed banner timestamp (reproducible output, mainly for tests)
    pub fn with_timestamp(mut self, timestamp: impl Into<String>) -> Self {
        self.timestamp = Some(timestamp.into());
        self
    }
}

/// Generate the output configuration with default settings.
///
/// This is the main entry point for the library: it parses the source
/// catalog, resolves the host/group declarations against it, and renders
/// every binding. Validation errors anywhere in the config fail the whole
/// run; no partial output is produced.
pub fn generate(sources_text: &str, config_text: &str) -> Result<String, GenerateError> {
    generate_with_config(sources_text, config_text, GenerateConfig::default())
}

/// Generate the output configuration with custom settings
pub fn generate_with_config(
    sources_text: &str,
    config_text: &str,
    config: GenerateConfig,
) -> Result<String, GenerateError> {
    let registry = SourceRegistry::parse(sources_text);
    let hosts = resolve(config_text, &registry)?;

    let timestamp = config
        .timestamp
        .unwrap_or_else(|| chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string());

    Ok(render(&registry, &hosts, &timestamp))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_simple_check() {
        let output = generate("$ping\ncheck_ping $1\n", "web01 $ping\n").unwrap();
        assert!(output.contains("check_ping web01"));
        assert!(output.contains("DO NOT EDIT"));
    }

    #[test]
    fn test_generate_unknown_source_fails() {
        let result = generate("$ping\ncheck_ping $1\n", "web01 $nosuch\n");
        let err = result.unwrap_err();
        let GenerateError::Config(errors) = err;
        assert_eq!(errors.len(), 1);
    }

    #[test]
    fn test_generate_reports_all_errors() {
        let config = "host1 $nosuchsource\nhost2 $othernosuchsource\n";
        let GenerateError::Config(errors) =
            generate("$ping\ncheck_ping $1\n", config).unwrap_err();
        assert_eq!(errors.len(), 2);
    }

    #[test]
    fn test_generate_fixed_timestamp() {
        let config = GenerateConfig::new().with_timestamp("2026-01-01 00:00:00");
        let output =
            generate_with_config("$ping\ncheck_ping $1\n", "web01 $ping\n", config).unwrap();
        assert!(output.starts_with(
            "# automatically generated by stanzagen at 2026-01-01 00:00:00\n"
        ));
    }
}
