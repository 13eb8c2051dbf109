//! Declaration resolver - expands host/group declarations into bindings
//!
//! The config file has two line shapes, told apart by the first character:
//!
//! ```text
//! @webstack $http $1 80, $ssl $1 443
//! web01 @webstack, $disk "/var/log"
//! ```
//!
//! A `@name ...` line declares (or extends) a group: a named bundle of
//! source invocations. Any other non-blank, non-comment line declares a
//! host followed by a comma-separated list of items, each either a group
//! reference or a direct source invocation. Every binding gets the owning
//! hostname prepended as its first substitution argument.
//!
//! Validation errors are collected across the entire scan and returned
//! together; any error means no usable mapping is produced.

use std::collections::{BTreeMap, HashMap};

use crate::error::{ConfigError, Span};
use crate::registry::SourceRegistry;
use crate::tokenizer::{tokenize, Reference};

/// One concrete (source template, argument list) pairing for a host
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Binding {
    /// Name of the source template to instantiate
    pub source: String,
    /// Substitution arguments, hostname first
    pub args: Vec<String>,
}

/// Bindings per host, keyed by hostname.
///
/// A BTreeMap keeps hosts in sorted name order for deterministic output;
/// each host's Vec preserves declaration order, which matters because later
/// bindings append text after earlier ones.
pub type HostBindings = BTreeMap<String, Vec<Binding>>;

/// Entries contributed by group declarations, in declaration order
type Groups = HashMap<String, Vec<(String, Vec<String>)>>;

/// Resolve the config text against the source registry.
///
/// The scan always runs to completion so that every problem is reported in
/// one pass; if any error was collected the whole parse fails.
pub fn resolve(config: &str, registry: &SourceRegistry) -> Result<HostBindings, Vec<ConfigError>> {
    let mut groups: Groups = HashMap::new();
    let mut hosts: HostBindings = BTreeMap::new();
    let mut errors: Vec<ConfigError> = Vec::new();

    let mut offset = 0;
    for (idx, raw) in config.split('\n').enumerate() {
        let line = raw.strip_suffix('\r').unwrap_or(raw);
        let line_no = idx + 1;
        let span: Span = offset..offset + line.len();
        offset += raw.len() + 1;

        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        if let Some(rest) = trimmed.strip_prefix('@') {
            let (name, items) = split_declaration(rest);
            resolve_group_line(name, items, line_no, &span, registry, &mut groups, &mut errors);
        } else {
            let (host, items) = split_declaration(trimmed);
            resolve_host_line(
                host,
                items,
                line_no,
                &span,
                registry,
                &groups,
                &mut hosts,
                &mut errors,
            );
        }
    }

    if errors.is_empty() {
        Ok(hosts)
    } else {
        Err(errors)
    }
}

/// Split a declaration into its leading name and the item list after it
fn split_declaration(line: &str) -> (&str, &str) {
    match line.split_once(' ') {
        Some((name, items)) => (name, items),
        None => (line, ""),
    }
}

/// Comma-separated items, trimmed, empty entries dropped
fn split_items(items: &str) -> impl Iterator<Item = &str> {
    items.split(',').map(str::trim).filter(|s| !s.is_empty())
}

fn resolve_group_line(
    name: &str,
    items: &str,
    line_no: usize,
    span: &Span,
    registry: &SourceRegistry,
    groups: &mut Groups,
    errors: &mut Vec<ConfigError>,
) {
    // Repeated @name lines keep extending the same group.
    let entries = groups.entry(name.to_string()).or_default();

    for item in split_items(items) {
        match tokenize(item) {
            Ok(invocation) => match invocation.reference {
                Reference::Source(source) => {
                    if registry.contains(&source) {
                        entries.push((source, invocation.args));
                    } else {
                        errors.push(ConfigError::UnknownSource {
                            line_no,
                            name: source,
                            span: span.clone(),
                        });
                    }
                }
                Reference::Group(nested) => {
                    errors.push(ConfigError::NestedGroup {
                        line_no,
                        group: name.to_string(),
                        name: nested,
                        span: span.clone(),
                    });
                }
            },
            Err(_) => {
                errors.push(ConfigError::InvalidSourceLine {
                    line_no,
                    text: item.to_string(),
                    span: span.clone(),
                });
            }
        }
    }
}

#[allow(clippy::too_many_arguments)]
fn resolve_host_line(
    host: &str,
    items: &str,
    line_no: usize,
    span: &Span,
    registry: &SourceRegistry,
    groups: &Groups,
    hosts: &mut HostBindings,
    errors: &mut Vec<ConfigError>,
) {
    let bindings = hosts.entry(host.to_string()).or_default();

    for item in split_items(items) {
        match tokenize(item) {
            Ok(invocation) => match invocation.reference {
                Reference::Source(source) => {
                    if registry.contains(&source) {
                        bindings.push(Binding {
                            source,
                            args: prepend_host(host, invocation.args),
                        });
                    } else {
                        errors.push(ConfigError::UnknownSource {
                            line_no,
                            name: source,
                            span: span.clone(),
                        });
                    }
                }
                Reference::Group(group) => match groups.get(&group) {
                    Some(entries) => {
                        for (source, args) in entries {
                            bindings.push(Binding {
                                source: source.clone(),
                                args: prepend_host(host, args.clone()),
                            });
                        }
                    }
                    None => {
                        errors.push(ConfigError::UnknownGroup {
                            line_no,
                            host: host.to_string(),
                            name: group,
                            span: span.clone(),
                        });
                    }
                },
            },
            Err(_) => {
                errors.push(ConfigError::InvalidSourceLine {
                    line_no,
                    text: item.to_string(),
                    span: span.clone(),
                });
            }
        }
    }
}

/// The owning hostname is always substitution argument 1
fn prepend_host(host: &str, args: Vec<String>) -> Vec<String> {
    let mut full = Vec::with_capacity(args.len() + 1);
    full.push(host.to_string());
    full.extend(args);
    full
}
