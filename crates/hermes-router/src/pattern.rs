//! Compiled route patterns.
//!
//! A [`RoutePattern`] is compiled once from a route definition and is
//! immutable afterwards. Compilation runs in two decoupled passes: the
//! grammar parse ([`crate::token`]) produces a token tree, then this
//! module translates the tree into an anchored [`regex::Regex`] matcher.
//! The same token tree drives reverse generation, so matching and
//! generation cannot drift apart.

use std::fmt::Write as _;

use indexmap::IndexMap;
use regex::Regex;

use crate::token::{self, Token};
use crate::{Params, RouteCompileError};

/// Matcher fragment used for parameters without an explicit constraint.
const DEFAULT_CONSTRAINT: &str = "[^/]+";

/// Reserved capture name for the trailing splat.
const SPLAT_GROUP: &str = "__splat";

/// A successful pattern match: extracted parameters plus any leftover
/// trailing text collected by a splat.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatternMatch {
    /// Named parameters extracted from the path.
    pub params: Params,
    /// Leftover trailing segments (splat patterns only), without the
    /// leading separator. `None` when nothing was left over.
    pub leftover: Option<String>,
}

/// A compiled route pattern: matcher and reverse-generator in one.
///
/// # Example
///
/// ```
/// use hermes_router::RoutePattern;
/// use indexmap::IndexMap;
///
/// let pattern = RoutePattern::compile(
///     "users/:id",
///     IndexMap::new(),
///     IndexMap::from([("id".to_string(), r"\d+".to_string())]),
/// ).unwrap();
///
/// let matched = pattern.match_path("users/42").unwrap();
/// assert_eq!(matched.params.get("id"), Some("42"));
/// assert!(pattern.match_path("users/alice").is_none());
/// ```
#[derive(Debug, Clone)]
pub struct RoutePattern {
    raw: String,
    tokens: Vec<Token>,
    matcher: Regex,
    defaults: IndexMap<String, String>,
    param_names: Vec<String>,
    has_splat: bool,
    literal: Option<String>,
}

impl RoutePattern {
    /// Compiles a route definition into a pattern.
    ///
    /// `defaults` supplies parameter values a match does not extract from
    /// the path (including the reserved `_controller`/`_action` target
    /// keys). `constraints` maps parameter names to regular-expression
    /// fragments; unconstrained parameters match one or more
    /// non-separator characters.
    ///
    /// A constraint may contain the path separator. That is allowed, but
    /// it lets a single parameter span several segments and can make the
    /// pattern ambiguous against later routes.
    ///
    /// # Errors
    ///
    /// Returns [`RouteCompileError`] for grammar errors (unbalanced
    /// groups, duplicate or invalid parameter names, misplaced splat) and
    /// for constraint fragments that are not valid regular expressions.
    pub fn compile(
        raw: &str,
        defaults: IndexMap<String, String>,
        constraints: IndexMap<String, String>,
    ) -> Result<Self, RouteCompileError> {
        let tokens = token::parse(raw)?;

        for (name, fragment) in &constraints {
            Regex::new(&format!("^(?:{fragment})$")).map_err(|source| {
                RouteCompileError::InvalidConstraint {
                    name: name.clone(),
                    source: Box::new(source),
                }
            })?;
        }

        let literal = literal_path(&tokens);
        let has_splat = tokens.last() == Some(&Token::Splat);
        let tokens = trim_splat_separator(tokens);
        let param_names = token::param_names(&tokens)
            .into_iter()
            .map(ToString::to_string)
            .collect();

        let mut source = String::from("^");
        emit_regex(&tokens, &constraints, true, &mut source);
        source.push('$');
        let matcher = Regex::new(&source).map_err(|source| RouteCompileError::Matcher {
            pattern: raw.to_string(),
            source: Box::new(source),
        })?;

        Ok(Self {
            raw: raw.to_string(),
            tokens,
            matcher,
            defaults,
            param_names,
            has_splat,
            literal,
        })
    }

    /// Returns the route definition as authored.
    #[must_use]
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// Iterates over the default parameter values.
    pub fn defaults(&self) -> impl Iterator<Item = (&str, &str)> {
        self.defaults.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Returns a single default value by name.
    #[must_use]
    pub fn default_value(&self, name: &str) -> Option<&str> {
        self.defaults.get(name).map(String::as_str)
    }

    /// Returns true if the pattern ends in a splat.
    #[must_use]
    pub fn has_splat(&self) -> bool {
        self.has_splat
    }

    /// For fully-literal patterns, the exact path they match.
    #[must_use]
    pub fn literal(&self) -> Option<&str> {
        self.literal.as_deref()
    }

    /// Matches a normalized path against this pattern.
    ///
    /// The entire path must be accepted; there are no partial matches. An
    /// omitted optional group contributes no parameters at all, so its
    /// parameters are absent from the result rather than empty.
    #[must_use]
    pub fn match_path(&self, path: &str) -> Option<PatternMatch> {
        let captures = self.matcher.captures(path)?;
        let mut params = Params::new();
        let mut leftover = None;

        for name in self.matcher.capture_names().flatten() {
            let Some(matched) = captures.name(name) else {
                continue;
            };
            if name == SPLAT_GROUP {
                let trailing = matched.as_str().trim_start_matches('/');
                if !trailing.is_empty() {
                    leftover = Some(trailing.to_string());
                }
            } else {
                params.insert(name, matched.as_str());
            }
        }

        Some(PatternMatch { params, leftover })
    }

    /// Generates a concrete path by substituting `params` into the token
    /// tree.
    ///
    /// Parameters are consumed (removed) as they are emitted. An optional
    /// group is emitted only when every parameter directly inside it is
    /// available; an omitted group contributes nothing. On a splat
    /// pattern, all still-unconsumed parameters are appended as
    /// alternating `/name/value` pairs (numeric names emit the value
    /// only).
    ///
    /// Returns `None` when a required (non-optional) parameter is missing
    /// or when a supplied parameter named by the pattern could not be
    /// consumed (its group was omitted).
    #[must_use]
    pub fn generate(&self, params: &mut Params) -> Option<String> {
        let mut out = String::new();
        if !emit_path(&self.tokens, params, &mut out) {
            return None;
        }
        if self.param_names.iter().any(|name| params.contains(name)) {
            return None;
        }
        Some(out)
    }
}

/// Concatenated path for patterns with no parameters, groups, or splat.
fn literal_path(tokens: &[Token]) -> Option<String> {
    let mut path = String::new();
    for tok in tokens {
        match tok {
            Token::Literal(text) => path.push_str(text),
            _ => return None,
        }
    }
    Some(path)
}

/// Folds the separator before a trailing splat into the splat itself, so
/// `rest/*` accepts a bare `rest` as well.
fn trim_splat_separator(mut tokens: Vec<Token>) -> Vec<Token> {
    if tokens.last() != Some(&Token::Splat) || tokens.len() < 2 {
        return tokens;
    }
    let before_splat = tokens.len() - 2;
    let mut drop_literal = false;
    if let Token::Literal(text) = &mut tokens[before_splat] {
        if text.ends_with('/') {
            text.pop();
            drop_literal = text.is_empty();
        }
    }
    if drop_literal {
        tokens.remove(before_splat);
    }
    tokens
}

fn emit_regex(
    tokens: &[Token],
    constraints: &IndexMap<String, String>,
    top_level: bool,
    out: &mut String,
) {
    for (index, tok) in tokens.iter().enumerate() {
        match tok {
            Token::Literal(text) => out.push_str(&regex::escape(text)),
            Token::Param(name) => {
                let fragment = constraints
                    .get(name)
                    .map_or(DEFAULT_CONSTRAINT, String::as_str);
                let _ = write!(out, "(?P<{name}>{fragment})");
            }
            Token::Group(inner) => {
                out.push_str("(?:");
                emit_regex(inner, constraints, false, out);
                out.push_str(")?");
            }
            Token::Splat => {
                // A splat at the very start has no separator to fold in.
                if top_level && index == 0 {
                    let _ = write!(out, "(?P<{SPLAT_GROUP}>[^/]+(?:/[^/]+)*)?");
                } else {
                    let _ = write!(out, "(?P<{SPLAT_GROUP}>(?:/[^/]+)*)");
                }
            }
        }
    }
}

fn emit_path(tokens: &[Token], params: &mut Params, out: &mut String) -> bool {
    for tok in tokens {
        match tok {
            Token::Literal(text) => out.push_str(text),
            Token::Param(name) => match params.remove(name) {
                Some(value) => out.push_str(&value),
                None => return false,
            },
            Token::Group(inner) => {
                if group_params_available(inner, params) {
                    emit_path(inner, params, out);
                }
            }
            Token::Splat => {
                let splat_start = out.len();
                let names = params.names();
                for name in names {
                    let Some(value) = params.remove(&name) else {
                        continue;
                    };
                    if name.parse::<usize>().is_ok() {
                        let _ = write!(out, "/{value}");
                    } else {
                        let _ = write!(out, "/{name}/{value}");
                    }
                }
                if splat_start == 0 && out.starts_with('/') {
                    out.remove(0);
                }
            }
        }
    }
    true
}

/// A group is emitted only when every parameter directly inside it has a
/// value; nested groups decide for themselves.
fn group_params_available(tokens: &[Token], params: &Params) -> bool {
    tokens.iter().all(|tok| match tok {
        Token::Param(name) => params.contains(name),
        _ => true,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn compile(raw: &str) -> RoutePattern {
        RoutePattern::compile(raw, IndexMap::new(), IndexMap::new()).unwrap()
    }

    fn compile_constrained(raw: &str, constraints: &[(&str, &str)]) -> RoutePattern {
        let constraints = constraints
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        RoutePattern::compile(raw, IndexMap::new(), constraints).unwrap()
    }

    fn params(pairs: &[(&str, &str)]) -> Params {
        pairs.iter().copied().collect()
    }

    #[test]
    fn test_match_literal() {
        let pattern = compile("users/list");
        assert!(pattern.match_path("users/list").is_some());
        assert!(pattern.match_path("users").is_none());
        assert!(pattern.match_path("users/list/extra").is_none());
        assert_eq!(pattern.literal(), Some("users/list"));
    }

    #[test]
    fn test_match_param() {
        let pattern = compile("users/:id");
        let matched = pattern.match_path("users/42").unwrap();
        assert_eq!(matched.params.get("id"), Some("42"));
        assert!(pattern.match_path("users").is_none());
        assert!(pattern.literal().is_none());
    }

    #[test]
    fn test_param_does_not_span_segments() {
        let pattern = compile("users/:id");
        assert!(pattern.match_path("users/42/edit").is_none());
    }

    #[test]
    fn test_rest_scenario() {
        let pattern =
            compile_constrained("rest(/:method)(/:id)", &[("method", r"[^\d]+"), ("id", r"\d+")]);

        let matched = pattern.match_path("rest/update/42").unwrap();
        assert_eq!(matched.params.get("method"), Some("update"));
        assert_eq!(matched.params.get("id"), Some("42"));

        let bare = pattern.match_path("rest").unwrap();
        assert!(bare.params.is_empty());

        // Wrong order: the id group requires digits.
        assert!(pattern.match_path("rest/42/update").is_none());
    }

    #[test]
    fn test_leading_optional_group_scenario() {
        let pattern = compile("(:lang/)welcome/:id");

        let matched = pattern.match_path("en/welcome/7").unwrap();
        assert_eq!(matched.params.get("lang"), Some("en"));
        assert_eq!(matched.params.get("id"), Some("7"));

        let matched = pattern.match_path("welcome/7").unwrap();
        assert_eq!(matched.params.get("lang"), None);
        assert_eq!(matched.params.get("id"), Some("7"));
    }

    #[test]
    fn test_omitted_group_param_is_absent_not_empty() {
        let pattern = compile("rest(/:method)");
        let matched = pattern.match_path("rest").unwrap();
        assert!(!matched.params.contains("method"));
    }

    #[test]
    fn test_nested_groups() {
        let pattern = compile("archive(/:year(/:month))");
        let matched = pattern.match_path("archive/2024/06").unwrap();
        assert_eq!(matched.params.get("year"), Some("2024"));
        assert_eq!(matched.params.get("month"), Some("06"));

        let matched = pattern.match_path("archive/2024").unwrap();
        assert_eq!(matched.params.get("year"), Some("2024"));
        assert_eq!(matched.params.get("month"), None);

        assert!(pattern.match_path("archive").unwrap().params.is_empty());
    }

    #[test]
    fn test_splat_collects_leftover() {
        let pattern = compile("rest/*");
        let matched = pattern.match_path("rest/a/1/b").unwrap();
        assert_eq!(matched.leftover.as_deref(), Some("a/1/b"));

        let matched = pattern.match_path("rest").unwrap();
        assert_eq!(matched.leftover, None);
    }

    #[test]
    fn test_generate_literal_and_param() {
        let pattern = compile("users/:id");
        let mut p = params(&[("id", "42")]);
        assert_eq!(pattern.generate(&mut p).as_deref(), Some("users/42"));
        assert!(p.is_empty());
    }

    #[test]
    fn test_generate_missing_required_param() {
        let pattern = compile("users/:id");
        assert_eq!(pattern.generate(&mut Params::new()), None);
    }

    #[test]
    fn test_generate_optional_group_included_and_omitted() {
        let pattern = compile("(:lang/)welcome/:id");

        let mut with_lang = params(&[("lang", "en"), ("id", "7")]);
        assert_eq!(
            pattern.generate(&mut with_lang).as_deref(),
            Some("en/welcome/7")
        );

        let mut without_lang = params(&[("id", "7")]);
        assert_eq!(
            pattern.generate(&mut without_lang).as_deref(),
            Some("welcome/7")
        );
    }

    #[test]
    fn test_generate_fails_when_supplied_param_unconsumable() {
        // `month` is nested under the `year` group; without `year` the
        // group is omitted and `month` cannot be placed.
        let pattern = compile("archive(/:year(/:month))");
        let mut p = params(&[("month", "06")]);
        assert_eq!(pattern.generate(&mut p), None);
    }

    #[test]
    fn test_generate_splat_appends_leftover_pairs() {
        let pattern = compile("rest/*");
        let mut p = params(&[("sort", "asc"), ("0", "extra")]);
        assert_eq!(
            pattern.generate(&mut p).as_deref(),
            Some("rest/sort/asc/extra")
        );
    }

    #[test]
    fn test_generate_splat_pattern_without_leftover() {
        let pattern = compile("rest/*");
        assert_eq!(pattern.generate(&mut Params::new()).as_deref(), Some("rest"));
    }

    #[test]
    fn test_constraint_with_separator_is_allowed() {
        let pattern = compile_constrained("docs/:path", &[("path", ".+")]);
        let matched = pattern.match_path("docs/guide/install").unwrap();
        assert_eq!(matched.params.get("path"), Some("guide/install"));
    }

    #[test]
    fn test_invalid_constraint_rejected() {
        let err = RoutePattern::compile(
            "users/:id",
            IndexMap::new(),
            IndexMap::from([("id".to_string(), "[".to_string())]),
        )
        .unwrap_err();
        assert!(matches!(
            err,
            RouteCompileError::InvalidConstraint { name, .. } if name == "id"
        ));
    }

    #[test]
    fn test_defaults_accessors() {
        let pattern = RoutePattern::compile(
            "welcome/:id",
            IndexMap::from([
                ("_controller".to_string(), "welcome".to_string()),
                ("_action".to_string(), "show".to_string()),
            ]),
            IndexMap::new(),
        )
        .unwrap();
        assert_eq!(pattern.default_value("_controller"), Some("welcome"));
        assert_eq!(pattern.default_value("_action"), Some("show"));
        assert_eq!(pattern.raw(), "welcome/:id");
    }
}
