//! Tokenizer for source-invocation lines
//!
//! An invocation line looks like `$redis arg1 "arg with spaces" arg3` or
//! `@webstack`. The leading sigil decides whether the line refers to a
//! source template (`$`) or a group (`@`); the remaining tokens are the
//! arguments, with double quotes grouping spaces into a single token.

use thiserror::Error;

/// A sigil-tagged reference to a source template or a group
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reference {
    /// `$name` - a source template reference
    Source(String),
    /// `@name` - a group reference
    Group(String),
}

impl Reference {
    /// The referenced name without its sigil
    pub fn name(&self) -> &str {
        match self {
            Reference::Source(name) | Reference::Group(name) => name,
        }
    }
}

/// One tokenized invocation: what is referenced, and with which arguments
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub reference: Reference,
    pub args: Vec<String>,
}

/// Errors produced while tokenizing a single invocation line
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TokenizeError {
    /// The first token does not start with `$` or `@`
    #[error("invalid source line (missing '$' or '@' sigil): {line}")]
    MissingSigil { line: String },
}

/// Tokenize one invocation line into a tagged reference plus arguments.
///
/// Quoting rules: a `"` toggles quoted mode and is never part of a token;
/// spaces inside quotes are kept literally, spaces outside quotes separate
/// tokens. `""` produces an empty token. There are no escape sequences, and
/// an unterminated quote simply runs to the end of the line.
pub fn tokenize(line: &str) -> Result<Invocation, TokenizeError> {
    let mut tokens = split_tokens(line);

    if tokens.is_empty() {
        return Err(TokenizeError::MissingSigil {
            line: line.to_string(),
        });
    }

    let head = tokens.remove(0);
    let reference = if let Some(name) = head.strip_prefix('$') {
        Reference::Source(name.to_string())
    } else if let Some(name) = head.strip_prefix('@') {
        Reference::Group(name.to_string())
    } else {
        return Err(TokenizeError::MissingSigil {
            line: line.to_string(),
        });
    };

    Ok(Invocation {
        reference,
        args: tokens,
    })
}

/// Split a line into whitespace-separated tokens, honoring quoted spans
fn split_tokens(line: &str) -> Vec<String> {
    let mut tokens: Vec<String> = Vec::new();
    let mut in_quotes = false;
    let mut at_boundary = true;

    for ch in line.chars() {
        match ch {
            '"' => {
                // The quote itself is dropped, but it still starts a token
                // so that `""` yields an empty argument.
                in_quotes = !in_quotes;
                if at_boundary {
                    tokens.push(String::new());
                    at_boundary = false;
                }
            }
            ' ' if !in_quotes => {
                at_boundary = true;
            }
            _ => {
                if at_boundary {
                    tokens.push(String::new());
                    at_boundary = false;
                }
                if let Some(token) = tokens.last_mut() {
                    token.push(ch);
                }
            }
        }
    }

    tokens
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_tokenize_source_with_quoted_arg() {
        let inv = tokenize(r#"$redis "a b" c"#).expect("Should tokenize");
        assert_eq!(inv.reference, Reference::Source("redis".to_string()));
        assert_eq!(inv.args, vec!["a b".to_string(), "c".to_string()]);
    }

    #[test]
    fn test_tokenize_group_reference() {
        let inv = tokenize("@webstack").expect("Should tokenize");
        assert_eq!(inv.reference, Reference::Group("webstack".to_string()));
        assert!(inv.args.is_empty());
    }

    #[test]
    fn test_tokenize_missing_sigil() {
        let result = tokenize("redis a b");
        assert_eq!(
            result,
            Err(TokenizeError::MissingSigil {
                line: "redis a b".to_string()
            })
        );
    }

    #[test]
    fn test_tokenize_empty_line() {
        let result = tokenize("");
        assert!(matches!(result, Err(TokenizeError::MissingSigil { .. })));
    }

    #[test]
    fn test_tokenize_empty_quotes_make_empty_arg() {
        let inv = tokenize(r#"$check "" after"#).expect("Should tokenize");
        assert_eq!(inv.args, vec![String::new(), "after".to_string()]);
    }

    #[test]
    fn test_tokenize_unterminated_quote_runs_to_end() {
        let inv = tokenize(r#"$check "a b c"#).expect("Should tokenize");
        assert_eq!(inv.args, vec!["a b c".to_string()]);
    }

    #[test]
    fn test_tokenize_quote_inside_token_joins() {
        // ab"c d"e is one token: the quotes vanish, the quoted space stays
        let inv = tokenize(r#"$check ab"c d"e"#).expect("Should tokenize");
        assert_eq!(inv.args, vec!["abc de".to_string()]);
    }

    #[test]
    fn test_tokenize_collapses_repeated_spaces() {
        let inv = tokenize("$check   one    two").expect("Should tokenize");
        assert_eq!(inv.args, vec!["one".to_string(), "two".to_string()]);
    }

    #[test]
    fn test_reference_name_strips_sigil() {
        let inv = tokenize("$disk /var").expect("Should tokenize");
        assert_eq!(inv.reference.name(), "disk");
    }
}
