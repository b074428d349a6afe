//! Per-request environment.
//!
//! The [`Environment`] is the single mutable value that represents one
//! in-flight request. Middleware units enrich it in place (the router
//! stores the matched target here, guards read transport metadata from
//! it), and exactly one instance exists per request.

use indexmap::IndexMap;
use serde_json::Value;

/// Key holding the request path (percent-decoded, as handed in by the
/// transport adapter).
pub const PATH_KEY: &str = "path";

/// Key holding the request method.
pub const METHOD_KEY: &str = "method";

/// Key the router assigns the matched controller name to.
pub const CONTROLLER_KEY: &str = "route.controller";

/// Key the router assigns the matched action name to.
pub const ACTION_KEY: &str = "route.action";

/// Key the router assigns the matched parameter map to.
pub const PARAMS_KEY: &str = "route.params";

/// The mutable key/value map representing one in-flight request.
///
/// Keys are strings, values are heterogeneous ([`serde_json::Value`]).
/// Insertion order is preserved, so dumping an environment in a log line
/// shows fields in the order they were assigned.
///
/// # Example
///
/// ```
/// use hermes_core::Environment;
///
/// let mut env = Environment::new("GET", "users/42");
/// env.set("client.addr", "10.0.0.1");
///
/// assert_eq!(env.method(), "GET");
/// assert_eq!(env.path(), "users/42");
/// assert_eq!(env.get("client.addr").and_then(|v| v.as_str()), Some("10.0.0.1"));
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Environment {
    entries: IndexMap<String, Value>,
}

impl Environment {
    /// Creates an environment for a request with the given method and path.
    #[must_use]
    pub fn new(method: impl Into<String>, path: impl Into<String>) -> Self {
        let mut env = Self::default();
        env.set(METHOD_KEY, method.into());
        env.set(PATH_KEY, path.into());
        env
    }

    /// Returns the value stored under `key`, if any.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries.get(key)
    }

    /// Returns the value under `key` as a string slice, if it is a string.
    #[must_use]
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.entries.get(key).and_then(Value::as_str)
    }

    /// Stores `value` under `key`, replacing any previous value.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.entries.insert(key.into(), value.into());
    }

    /// Removes and returns the value under `key`.
    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.entries.shift_remove(key)
    }

    /// Returns true if `key` is present.
    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Returns the request path, or an empty string if unset.
    #[must_use]
    pub fn path(&self) -> &str {
        self.get_str(PATH_KEY).unwrap_or("")
    }

    /// Replaces the request path.
    pub fn set_path(&mut self, path: impl Into<String>) {
        self.set(PATH_KEY, path.into());
    }

    /// Returns the request method, or an empty string if unset.
    #[must_use]
    pub fn method(&self) -> &str {
        self.get_str(METHOD_KEY).unwrap_or("")
    }

    /// Returns the matched controller name, once the router has run.
    #[must_use]
    pub fn controller(&self) -> Option<&str> {
        self.get_str(CONTROLLER_KEY)
    }

    /// Returns the matched action name, once the router has run.
    #[must_use]
    pub fn action(&self) -> Option<&str> {
        self.get_str(ACTION_KEY)
    }

    /// Stores the matched dispatch target and its parameter map.
    ///
    /// Called by the routing endpoint; `params` is expected to be a JSON
    /// object mapping parameter names to string values.
    pub fn set_route_target(
        &mut self,
        controller: impl Into<String>,
        action: impl Into<String>,
        params: Value,
    ) {
        self.set(CONTROLLER_KEY, controller.into());
        self.set(ACTION_KEY, action.into());
        self.set(PARAMS_KEY, params);
    }

    /// Returns the matched parameter map, once the router has run.
    #[must_use]
    pub fn route_params(&self) -> Option<&Value> {
        self.get(PARAMS_KEY)
    }

    /// Returns a single matched route parameter as a string.
    #[must_use]
    pub fn route_param(&self, name: &str) -> Option<&str> {
        self.route_params()?.get(name)?.as_str()
    }

    /// Returns the number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the environment holds no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates over entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }
}
