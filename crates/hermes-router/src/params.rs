//! Route parameter storage.
//!
//! [`Params`] is the named parameter map produced by a route match and
//! consumed by reverse routing. Insertion order is preserved so leftover
//! key/value generation and log output are deterministic.

use indexmap::IndexMap;

/// Named route parameters.
///
/// # Example
///
/// ```
/// use hermes_router::Params;
///
/// let mut params = Params::new();
/// params.insert("id", "42");
///
/// assert_eq!(params.get("id"), Some("42"));
/// assert_eq!(params.get("unknown"), None);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Params {
    inner: IndexMap<String, String>,
}

impl Params {
    /// Creates an empty parameter set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores a parameter, replacing any existing value for the name.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.inner.insert(name.into(), value.into());
    }

    /// Returns the value for a parameter by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.inner.get(name).map(String::as_str)
    }

    /// Removes and returns a parameter by name.
    pub fn remove(&mut self, name: &str) -> Option<String> {
        self.inner.shift_remove(name)
    }

    /// Returns true if a parameter with this name exists.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.inner.contains_key(name)
    }

    /// Fills in defaults: entries already present (extracted from the
    /// path) take precedence, missing names are taken from `defaults`.
    pub fn merge_defaults<'a, I>(&mut self, defaults: I)
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        for (name, value) in defaults {
            if !self.inner.contains_key(name) {
                self.inner.insert(name.to_string(), value.to_string());
            }
        }
    }

    /// Stores a value under the next free numeric index.
    ///
    /// This is where the final unpaired token of an alternating
    /// `/key/value` leftover run ends up: `"0"`, then `"1"`, and so on.
    pub fn push_positional(&mut self, value: impl Into<String>) {
        let mut index = 0usize;
        while self.inner.contains_key(&index.to_string()) {
            index += 1;
        }
        self.inner.insert(index.to_string(), value.into());
    }

    /// Returns true if there are no parameters.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    /// Returns the number of parameters.
    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    /// Iterates over parameters in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.inner.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Returns the parameter names in insertion order.
    #[must_use]
    pub fn names(&self) -> Vec<String> {
        self.inner.keys().cloned().collect()
    }
}

impl FromIterator<(String, String)> for Params {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        Self {
            inner: iter.into_iter().collect(),
        }
    }
}

impl<'a> FromIterator<(&'a str, &'a str)> for Params {
    fn from_iter<I: IntoIterator<Item = (&'a str, &'a str)>>(iter: I) -> Self {
        Self {
            inner: iter
                .into_iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        }
    }
}
