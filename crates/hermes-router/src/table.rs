//! Route table: ordered forward matching and reverse routing.
//!
//! The table is built once at configuration-load time and is read-only
//! during request handling, so it can be shared across requests behind an
//! `Arc` without locking.

use std::collections::HashMap;

use indexmap::IndexMap;

use crate::{Params, RouteCompileError, RoutePattern};

/// Reserved parameter key naming the dispatch controller.
pub const CONTROLLER_PARAM: &str = "_controller";

/// Reserved parameter key naming the dispatch action.
pub const ACTION_PARAM: &str = "_action";

/// Conventional suffix stripped from controller type names.
const CONTROLLER_SUFFIX: &str = "controller";

/// The outcome of a successful forward match.
///
/// The dispatch target is split out of the parameter map: `params` holds
/// everything except the reserved `_controller`/`_action` keys.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchResult {
    /// Matched controller name, normalized.
    pub controller: Option<String>,
    /// Matched action name, normalized.
    pub action: Option<String>,
    /// Merged parameters: extracted values, defaults, leftovers.
    pub params: Params,
}

/// An ordered collection of compiled route patterns.
///
/// Matching precedence:
///
/// 1. An exact hit in the literal index (fully-literal routes) wins
///    unconditionally, regardless of insertion order.
/// 2. Otherwise patterns are tried in insertion order; the first whose
///    matcher accepts the whole path is selected.
///
/// # Example
///
/// ```
/// use hermes_router::RouteTable;
/// use indexmap::IndexMap;
///
/// let mut table = RouteTable::new();
/// table.add_route(
///     "welcome/:id",
///     IndexMap::from([
///         ("_controller".to_string(), "welcome".to_string()),
///         ("_action".to_string(), "show".to_string()),
///     ]),
///     IndexMap::new(),
/// ).unwrap();
///
/// let matched = table.match_path("/welcome/7").unwrap();
/// assert_eq!(matched.controller.as_deref(), Some("welcome"));
/// assert_eq!(matched.params.get("id"), Some("7"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct RouteTable {
    ordered_routes: Vec<RoutePattern>,
    literal_index: HashMap<String, usize>,
    reverse_index: HashMap<String, Vec<usize>>,
}

impl RouteTable {
    /// Creates an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Compiles and appends a route. Insertion order is priority order.
    ///
    /// Fully-literal patterns are additionally indexed for the exact-path
    /// short circuit; routes whose defaults name both `_controller` and
    /// `_action` are indexed for reverse routing.
    ///
    /// # Errors
    ///
    /// Returns [`RouteCompileError`] if the pattern does not compile;
    /// this is fatal to configuration loading.
    pub fn add_route(
        &mut self,
        pattern: &str,
        defaults: IndexMap<String, String>,
        constraints: IndexMap<String, String>,
    ) -> Result<(), RouteCompileError> {
        let route = RoutePattern::compile(pattern, defaults, constraints)?;
        let index = self.ordered_routes.len();

        if let Some(path) = route.literal() {
            let normalized = normalize_path(path).to_string();
            self.literal_index.entry(normalized).or_insert(index);
        }
        if let (Some(controller), Some(action)) = (
            route.default_value(CONTROLLER_PARAM),
            route.default_value(ACTION_PARAM),
        ) {
            self.reverse_index
                .entry(reverse_key(controller, action))
                .or_default()
                .push(index);
        }

        self.ordered_routes.push(route);
        Ok(())
    }

    /// Matches a path against the table.
    ///
    /// The path is normalized (enclosing slashes trimmed) first. Leftover
    /// trailing segments collected by a splat are decomposed as an
    /// alternating `key/value` list and merged into the parameter map; a
    /// final unpaired token is stored under a numeric index.
    #[must_use]
    pub fn match_path(&self, path: &str) -> Option<MatchResult> {
        let path = normalize_path(path);

        if let Some(&index) = self.literal_index.get(path) {
            let route = &self.ordered_routes[index];
            let mut params = Params::new();
            params.merge_defaults(route.defaults());
            return Some(split_target(params));
        }

        for route in &self.ordered_routes {
            let Some(matched) = route.match_path(path) else {
                continue;
            };
            let mut params = matched.params;
            params.merge_defaults(route.defaults());
            if let Some(leftover) = matched.leftover {
                merge_leftover(&mut params, &leftover);
            }
            return Some(split_target(params));
        }

        None
    }

    /// Generates a path for a controller/action/parameter set.
    ///
    /// Candidates registered for the normalized `controller#action` pair
    /// are tried in insertion order; the first whose pattern can be
    /// satisfied by `params` wins. When no candidate fits, a generic
    /// `controller[/action[/key/value…]]` path is built, numeric-keyed
    /// parameters emitting only their value.
    #[must_use]
    pub fn reverse(&self, controller: &str, action: &str, params: &Params) -> String {
        if let Some(candidates) = self.reverse_index.get(&reverse_key(controller, action)) {
            for &index in candidates {
                let mut attempt = params.clone();
                if let Some(path) = self.ordered_routes[index].generate(&mut attempt) {
                    return path;
                }
            }
        }

        let mut out = normalize_controller(controller);
        let action = normalize_action(action);
        if !action.is_empty() {
            out.push('/');
            out.push_str(&action);
            for (name, value) in params.iter() {
                out.push('/');
                if name.parse::<usize>().is_err() {
                    out.push_str(name);
                    out.push('/');
                }
                out.push_str(value);
            }
        }
        out
    }

    /// Returns the number of registered routes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.ordered_routes.len()
    }

    /// Returns true if no routes are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ordered_routes.is_empty()
    }
}

/// Trims enclosing slashes; paths arrive percent-decoded already.
#[must_use]
pub fn normalize_path(path: &str) -> &str {
    path.trim_matches('/')
}

/// Case-normalizes a controller name: the namespace path up to the last
/// `::` or `.` separator is dropped, the remainder lowercased, and a
/// conventional `controller` suffix stripped (`App::UsersController`
/// becomes `users`).
#[must_use]
pub fn normalize_controller(name: &str) -> String {
    let tail = name.rsplit("::").next().unwrap_or(name);
    let tail = tail.rsplit('.').next().unwrap_or(tail);
    let mut tail = tail.to_ascii_lowercase();
    if tail.len() > CONTROLLER_SUFFIX.len() && tail.ends_with(CONTROLLER_SUFFIX) {
        tail.truncate(tail.len() - CONTROLLER_SUFFIX.len());
    }
    tail
}

/// Case-normalizes an action name.
#[must_use]
pub fn normalize_action(name: &str) -> String {
    name.to_ascii_lowercase()
}

fn reverse_key(controller: &str, action: &str) -> String {
    format!(
        "{}#{}",
        normalize_controller(controller),
        normalize_action(action)
    )
}

/// Splits the reserved target keys out of a merged parameter map.
fn split_target(mut params: Params) -> MatchResult {
    let controller = params
        .remove(CONTROLLER_PARAM)
        .map(|c| normalize_controller(&c));
    let action = params.remove(ACTION_PARAM).map(|a| normalize_action(&a));
    MatchResult {
        controller,
        action,
        params,
    }
}

/// Decomposes leftover segments as alternating key/value pairs. A final
/// unpaired token lands under the next free numeric index.
fn merge_leftover(params: &mut Params, leftover: &str) {
    let mut parts = leftover.split('/').filter(|part| !part.is_empty());
    while let Some(key) = parts.next() {
        match parts.next() {
            Some(value) => params.insert(key, value),
            None => params.push_positional(key),
        }
    }
}
