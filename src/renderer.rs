//! Renderer - substitutes arguments into templates and assembles the output
//!
//! Hosts are emitted in sorted name order so that regenerating from
//! unchanged inputs produces a byte-identical file (apart from the banner
//! timestamp), which keeps diffs readable. Within a host, bindings render
//! in declaration order.

use crate::registry::SourceRegistry;
use crate::resolver::HostBindings;

/// Render all host bindings into the final output text.
///
/// The output starts with a two-line generated-file banner carrying the
/// given timestamp, then one stanza per binding, each followed by a blank
/// line.
pub fn render(registry: &SourceRegistry, hosts: &HostBindings, timestamp: &str) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "# automatically generated by stanzagen at {}\n",
        timestamp
    ));
    out.push_str("# DO NOT EDIT THIS MANUALLY, YOUR CHANGES WILL BE LOST\n\n");

    for bindings in hosts.values() {
        for binding in bindings {
            if let Some(template) = registry.get(&binding.source) {
                out.push_str(&substitute(template, &binding.args));
                out.push('\n');
            }
        }
    }

    out
}

/// Replace each `$N` placeholder with the Nth argument (1-based).
///
/// A placeholder is `$` followed by the longest run of ASCII digits. An
/// index with no matching argument is left in the text verbatim, and a `$`
/// with no digits after it passes through untouched; a short argument list
/// never makes substitution fail.
pub fn substitute(template: &str, args: &[String]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(pos) = rest.find('$') {
        out.push_str(&rest[..pos]);
        let after = &rest[pos + 1..];

        let digits = after
            .bytes()
            .take_while(|b| b.is_ascii_digit())
            .count();
        if digits == 0 {
            out.push('$');
            rest = after;
            continue;
        }

        match after[..digits].parse::<usize>() {
            Ok(index) if index >= 1 && index <= args.len() => {
                out.push_str(&args[index - 1]);
            }
            _ => {
                // Out of range (or absurdly long digit run): keep the
                // placeholder as-is.
                out.push('$');
                out.push_str(&after[..digits]);
            }
        }
        rest = &after[digits..];
    }

    out.push_str(rest);
    out
}
