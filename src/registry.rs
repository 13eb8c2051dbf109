//! Source registry - parses the template catalog into name -> template text
//!
//! The catalog file is a sequence of blocks. A line starting with `$`
//! introduces a template name; every following line is appended verbatim
//! (with its newline restored) to that template's text until the next `$`
//! header or end of file. Template text may embed positional placeholders
//! `$1`..`$N` which the renderer fills in later.

use std::collections::HashMap;

/// Registry of named source templates
#[derive(Debug, Default)]
pub struct SourceRegistry {
    templates: HashMap<String, String>,
}

impl SourceRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a catalog file's text into a registry.
    ///
    /// Lines before the first `$name` header are discarded. A repeated
    /// header keeps appending to the same template, so a catalog may be
    /// split into multiple blocks sharing one name.
    pub fn parse(text: &str) -> Self {
        let mut templates: HashMap<String, String> = HashMap::new();
        let mut current: Option<String> = None;

        for line in text.lines() {
            if let Some(name) = line.strip_prefix('$') {
                let name = name.trim().to_string();
                templates.entry(name.clone()).or_default();
                current = Some(name);
            } else if let Some(name) = &current {
                if let Some(body) = templates.get_mut(name) {
                    body.push_str(line);
                    body.push('\n');
                }
            }
        }

        Self { templates }
    }

    /// Get a template's text by name
    pub fn get(&self, name: &str) -> Option<&str> {
        self.templates.get(name).map(|s| s.as_str())
    }

    /// Check if a template exists
    pub fn contains(&self, name: &str) -> bool {
        self.templates.contains_key(name)
    }

    /// Get all template names
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.templates.keys().map(|s| s.as_str())
    }

    /// Number of registered templates
    pub fn len(&self) -> usize {
        self.templates.len()
    }

    /// Check if the registry holds no templates
    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }
}
