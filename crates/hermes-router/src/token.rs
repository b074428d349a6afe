//! Route pattern grammar.
//!
//! A route definition is parsed into a token tree before anything is
//! compiled: literal text, `:name` parameters, parenthesized optional
//! groups (which nest), and a trailing `*` splat that collects leftover
//! path segments. Parsing and matcher compilation are separate passes;
//! this module owns the parse.

use std::iter::Peekable;
use std::str::CharIndices;

use crate::RouteCompileError;

/// One node of a parsed route pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    /// Literal text, emitted and matched verbatim.
    Literal(String),
    /// A named parameter (`:id`).
    Param(String),
    /// An optional group (`(...)`), containing a nested sequence.
    Group(Vec<Token>),
    /// The trailing splat (`*`), collecting leftover segments.
    Splat,
}

/// Parses a route definition into its token tree.
///
/// # Errors
///
/// Returns [`RouteCompileError`] for unbalanced parentheses, an invalid
/// parameter name, a parameter name reused anywhere in the tree, or a
/// splat that is not the final token.
pub fn parse(raw: &str) -> Result<Vec<Token>, RouteCompileError> {
    let mut chars = raw.char_indices().peekable();
    let tokens = parse_sequence(raw, &mut chars, None)?;
    check_splat_position(raw, &tokens, true)?;
    check_duplicate_params(raw, &tokens)?;
    Ok(tokens)
}

/// Collects every parameter name in the tree, in appearance order.
pub fn param_names(tokens: &[Token]) -> Vec<&str> {
    let mut names = Vec::new();
    collect_param_names(tokens, &mut names);
    names
}

fn collect_param_names<'a>(tokens: &'a [Token], names: &mut Vec<&'a str>) {
    for token in tokens {
        match token {
            Token::Param(name) => names.push(name),
            Token::Group(inner) => collect_param_names(inner, names),
            Token::Literal(_) | Token::Splat => {}
        }
    }
}

/// Parses one sequence, stopping at the `)` closing the group opened at
/// `open` (or at end of input for the top level).
fn parse_sequence(
    raw: &str,
    chars: &mut Peekable<CharIndices<'_>>,
    open: Option<usize>,
) -> Result<Vec<Token>, RouteCompileError> {
    let mut tokens = Vec::new();
    let mut literal = String::new();

    while let Some(&(position, ch)) = chars.peek() {
        match ch {
            '(' => {
                flush_literal(&mut tokens, &mut literal);
                chars.next();
                let inner = parse_sequence(raw, chars, Some(position))?;
                tokens.push(Token::Group(inner));
            }
            ')' => {
                if open.is_none() {
                    return Err(RouteCompileError::UnbalancedGroup {
                        pattern: raw.to_string(),
                        position,
                    });
                }
                flush_literal(&mut tokens, &mut literal);
                chars.next();
                return Ok(tokens);
            }
            ':' => {
                flush_literal(&mut tokens, &mut literal);
                chars.next();
                tokens.push(Token::Param(parse_param_name(raw, chars, position)?));
            }
            '*' => {
                flush_literal(&mut tokens, &mut literal);
                chars.next();
                tokens.push(Token::Splat);
            }
            _ => {
                literal.push(ch);
                chars.next();
            }
        }
    }

    if let Some(position) = open {
        return Err(RouteCompileError::UnbalancedGroup {
            pattern: raw.to_string(),
            position,
        });
    }
    flush_literal(&mut tokens, &mut literal);
    Ok(tokens)
}

/// Parameter names follow identifier rules so they can double as regex
/// capture-group names: leading alphabetic or `_`, then alphanumeric or `_`.
fn parse_param_name(
    raw: &str,
    chars: &mut Peekable<CharIndices<'_>>,
    marker: usize,
) -> Result<String, RouteCompileError> {
    let mut name = String::new();
    while let Some(&(_, ch)) = chars.peek() {
        let valid = if name.is_empty() {
            ch.is_ascii_alphabetic() || ch == '_'
        } else {
            ch.is_ascii_alphanumeric() || ch == '_'
        };
        if !valid {
            break;
        }
        name.push(ch);
        chars.next();
    }
    if name.is_empty() {
        return Err(RouteCompileError::InvalidParamName {
            pattern: raw.to_string(),
            position: marker,
        });
    }
    Ok(name)
}

fn flush_literal(tokens: &mut Vec<Token>, literal: &mut String) {
    if !literal.is_empty() {
        tokens.push(Token::Literal(std::mem::take(literal)));
    }
}

fn check_splat_position(
    raw: &str,
    tokens: &[Token],
    top_level: bool,
) -> Result<(), RouteCompileError> {
    for (index, token) in tokens.iter().enumerate() {
        match token {
            Token::Splat => {
                if !top_level || index != tokens.len() - 1 {
                    return Err(RouteCompileError::SplatNotLast {
                        pattern: raw.to_string(),
                    });
                }
            }
            Token::Group(inner) => check_splat_position(raw, inner, false)?,
            Token::Literal(_) | Token::Param(_) => {}
        }
    }
    Ok(())
}

fn check_duplicate_params(raw: &str, tokens: &[Token]) -> Result<(), RouteCompileError> {
    let names = param_names(tokens);
    for (index, name) in names.iter().enumerate() {
        if names[..index].contains(name) {
            return Err(RouteCompileError::DuplicateParam {
                pattern: raw.to_string(),
                name: (*name).to_string(),
            });
        }
    }
    Ok(())
}
