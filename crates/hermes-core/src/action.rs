//! Controller action lookup.
//!
//! Dispatch targets resolve through an explicit table: a registry maps
//! `controller#action` keys to boxed [`Action`] values, with a single
//! declared fallback entry for targets with no exact registration. There
//! is no runtime-synthesized dispatch; an ordinary lookup either finds a
//! handler or it does not.

use std::collections::HashMap;

use crate::{Environment, HermesResult, Response};

/// A controller action: the terminal request handler the engine invokes
/// once routing has resolved a target.
pub trait Action: Send + Sync + 'static {
    /// Handles the request described by `env` and produces a response.
    ///
    /// The environment carries the matched target and parameter map under
    /// the `route.*` keys by the time an action runs.
    ///
    /// # Errors
    ///
    /// Returns [`HermesError`](crate::HermesError) on failure; an
    /// exception-boundary unit earlier in the pipeline (or the engine
    /// itself) converts it into an error response.
    fn call(&self, env: &mut Environment) -> HermesResult<Response>;
}

/// A function-based action wrapper.
///
/// # Example
///
/// ```
/// use hermes_core::{FnAction, Response};
///
/// let action = FnAction::new(|env| {
///     Ok(Response::ok(format!("hello from {}", env.path())))
/// });
/// ```
pub struct FnAction<F> {
    func: F,
}

impl<F> FnAction<F>
where
    F: Fn(&mut Environment) -> HermesResult<Response> + Send + Sync + 'static,
{
    /// Creates a new function-based action.
    #[must_use]
    pub const fn new(func: F) -> Self {
        Self { func }
    }
}

impl<F> Action for FnAction<F>
where
    F: Fn(&mut Environment) -> HermesResult<Response> + Send + Sync + 'static,
{
    fn call(&self, env: &mut Environment) -> HermesResult<Response> {
        (self.func)(env)
    }
}

/// Explicit `controller#action` lookup table with a declared fallback.
///
/// # Example
///
/// ```
/// use hermes_core::{ActionRegistry, Environment, FnAction, Response};
///
/// let mut registry = ActionRegistry::new();
/// registry.register("users", "show", FnAction::new(|_env| Ok(Response::ok("user"))));
///
/// assert!(registry.resolve("users", "show").is_some());
/// assert!(registry.resolve("users", "destroy").is_none());
/// ```
#[derive(Default)]
pub struct ActionRegistry {
    actions: HashMap<String, Box<dyn Action>>,
    fallback: Option<Box<dyn Action>>,
}

impl ActionRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers an action under `controller#action`.
    ///
    /// Names are case-normalized, so `register("Users", "Show", …)` and
    /// `resolve("users", "show")` agree.
    pub fn register(
        &mut self,
        controller: impl AsRef<str>,
        action: impl AsRef<str>,
        handler: impl Action,
    ) {
        self.actions.insert(
            Self::key(controller.as_ref(), action.as_ref()),
            Box::new(handler),
        );
    }

    /// Registers a closure as an action.
    pub fn register_fn<F>(&mut self, controller: impl AsRef<str>, action: impl AsRef<str>, func: F)
    where
        F: Fn(&mut Environment) -> HermesResult<Response> + Send + Sync + 'static,
    {
        self.register(controller, action, FnAction::new(func));
    }

    /// Declares the fallback action used when no exact entry exists.
    pub fn set_fallback(&mut self, handler: impl Action) {
        self.fallback = Some(Box::new(handler));
    }

    /// Resolves a target: exact entry first, declared fallback otherwise.
    #[must_use]
    pub fn resolve(&self, controller: &str, action: &str) -> Option<&dyn Action> {
        self.actions
            .get(&Self::key(controller, action))
            .or(self.fallback.as_ref())
            .map(AsRef::as_ref)
    }

    /// Returns the number of registered actions (excluding the fallback).
    #[must_use]
    pub fn len(&self) -> usize {
        self.actions.len()
    }

    /// Returns true if no actions are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    fn key(controller: &str, action: &str) -> String {
        format!(
            "{}#{}",
            controller.to_ascii_lowercase(),
            action.to_ascii_lowercase()
        )
    }
}
