use super::Pattern;
use crate::error::RouterError;

use std::sync::Arc;

use regex::Regex;

const OPEN_BRACE: char = '{';
const CLOSE_BRACE: char = '}';
const OPEN_PAREN: char = '(';
const CLOSE_PAREN: char = ')';
const OPEN_BRACKET: char = '[';
const CLOSE_BRACKET: char = ']';
const BACKSLASH: char = '\\';

/// Lazy unit a `{name}` placeholder expands to. It may be empty but never
/// crosses a segment.
const PLACEHOLDER: &str = "[^/]*?";

/// Generated group names carry this prefix so they can be told apart from
/// named groups written inside raw `( … )` sections.
const SLOT_PREFIX: &str = "wp__";

pub(super) fn compile(template: &str) -> Result<Pattern, RouterError> {
    let mut expr = String::with_capacity(template.len() * 2 + 2);
    let mut literal = String::new();
    let mut placeholders: Vec<Arc<str>> = Vec::new();
    let mut after_group = false;

    expr.push('^');

    let mut chars = template.chars();
    while let Some(c) = chars.next() {
        match c {
            OPEN_BRACE => {
                flush(&mut expr, &mut literal);
                let mut name = String::new();
                let mut closed = false;
                for c in chars.by_ref() {
                    match c {
                        CLOSE_BRACE => {
                            closed = true;
                            break;
                        }
                        OPEN_BRACE => {
                            return Err(RouterError::malformed(template, "nested '{'"));
                        }
                        _ => name.push(c),
                    }
                }
                if !closed {
                    return Err(RouterError::malformed(template, "unclosed '{'"));
                }
                let name = name.trim();
                if name.is_empty() {
                    return Err(RouterError::malformed(template, "placeholder name can not be empty"));
                }
                expr.push_str("(?P<");
                expr.push_str(SLOT_PREFIX);
                expr.push_str(&placeholders.len().to_string());
                expr.push('>');
                expr.push_str(PLACEHOLDER);
                expr.push(')');
                placeholders.push(name.into());
                after_group = true;
            }
            OPEN_PAREN => {
                flush(&mut expr, &mut literal);
                expr.push(OPEN_PAREN);
                raw_group(template, &mut chars, &mut expr)?;
                after_group = true;
            }
            CLOSE_BRACE => return Err(RouterError::malformed(template, "unmatched '}'")),
            CLOSE_PAREN => return Err(RouterError::malformed(template, "unmatched ')'")),
            '?' | '*' | '+' if after_group && literal.is_empty() => {
                expr.push(c);
                after_group = false;
            }
            _ => {
                literal.push(c);
                after_group = false;
            }
        }
    }

    flush(&mut expr, &mut literal);
    expr.push('$');

    let regex = Regex::new(&expr).map_err(|source| RouterError::InvalidPattern {
        template: template.to_owned(),
        source,
    })?;

    let names = regex
        .capture_names()
        .skip(1)
        .map(|name| match name {
            Some(n) if n.starts_with(SLOT_PREFIX) => n[SLOT_PREFIX.len()..]
                .parse::<usize>()
                .ok()
                .and_then(|i| placeholders.get(i).cloned()),
            Some(n) => Some(n.into()),
            None => None,
        })
        .collect();

    Ok(Pattern { regex, names })
}

fn flush(expr: &mut String, literal: &mut String) {
    if !literal.is_empty() {
        expr.push_str(&regex::escape(literal));
        literal.clear();
    }
}

/// Copies a raw group verbatim, the opening paren already consumed.
fn raw_group(
    template: &str,
    chars: &mut std::str::Chars<'_>,
    expr: &mut String,
) -> Result<(), RouterError> {
    let mut depth: usize = 1;
    // nesting of `[...]` classes; parens inside them are literal
    let mut class: usize = 0;
    while let Some(c) = chars.next() {
        expr.push(c);
        match c {
            BACKSLASH => match chars.next() {
                Some(escaped) => expr.push(escaped),
                None => break,
            },
            OPEN_BRACKET => {
                class += 1;
                // a `]` right after `[` or `[^` is a literal member
                let mut ahead = chars.clone();
                match ahead.next() {
                    Some('^') => {
                        if ahead.next() == Some(CLOSE_BRACKET) {
                            expr.push_str("^]");
                            chars.nth(1);
                        }
                    }
                    Some(CLOSE_BRACKET) => {
                        expr.push(CLOSE_BRACKET);
                        chars.next();
                    }
                    _ => {}
                }
            }
            CLOSE_BRACKET if class > 0 => class -= 1,
            _ if class > 0 => {}
            OPEN_PAREN => depth += 1,
            CLOSE_PAREN => {
                depth -= 1;
                if depth == 0 {
                    return Ok(());
                }
            }
            _ => {}
        }
    }
    Err(RouterError::malformed(template, "unclosed '('"))
}
