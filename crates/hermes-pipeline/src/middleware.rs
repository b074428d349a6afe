//! Core middleware trait and chain types.
//!
//! A middleware unit receives the mutable request [`Environment`] and a
//! [`Next`] value representing the rest of the chain. It may delegate and
//! return the downstream result unchanged, post-process that result,
//! short-circuit with its own response without delegating, or catch a
//! downstream error and convert it into a response.
//!
//! # Example
//!
//! ```
//! use hermes_core::{Environment, HermesResult, Response};
//! use hermes_pipeline::{Middleware, Next};
//!
//! struct Tagger;
//!
//! impl Middleware for Tagger {
//!     fn name(&self) -> &'static str {
//!         "tagger"
//!     }
//!
//!     fn process(&self, env: &mut Environment, next: Next<'_>) -> HermesResult<Response> {
//!         let response = next.run(env)?;
//!         Ok(response.header("x-tagged", "yes"))
//!     }
//! }
//! ```

use hermes_core::{Environment, HermesResult, Response};

/// The terminal callable at the inner end of a pipeline.
pub type Endpoint = Box<dyn Fn(&mut Environment) -> HermesResult<Response> + Send + Sync + 'static>;

/// A request/response filter composed into the pipeline.
///
/// # Invariants
///
/// - A unit calls `next.run()` at most once; [`Next`] is consumed by
///   `run`, so the type system enforces this.
/// - A unit that does not call `next` short-circuits the chain and must
///   produce the response itself.
pub trait Middleware: Send + Sync + 'static {
    /// Returns the unique name of this unit, used for lint and logging.
    fn name(&self) -> &'static str;

    /// Processes the request, delegating downstream via `next` as needed.
    ///
    /// # Errors
    ///
    /// Returns [`hermes_core::HermesError`] on failure; errors propagate
    /// up the chain unless an exception-boundary unit converts them.
    fn process(&self, env: &mut Environment, next: Next<'_>) -> HermesResult<Response>;
}

/// The remainder of the chain, handed to each unit.
///
/// Consumed by [`Next::run`], so a unit can delegate at most once.
pub struct Next<'a> {
    inner: NextInner<'a>,
}

enum NextInner<'a> {
    /// More units to process.
    Chain {
        unit: &'a dyn Middleware,
        next: Box<Next<'a>>,
    },
    /// End of chain: invoke the endpoint.
    Endpoint(&'a Endpoint),
}

impl<'a> Next<'a> {
    /// Creates a `Next` that will invoke the given unit.
    pub(crate) fn new(unit: &'a dyn Middleware, next: Next<'a>) -> Self {
        Self {
            inner: NextInner::Chain {
                unit,
                next: Box::new(next),
            },
        }
    }

    /// Creates the terminal `Next` that invokes the endpoint.
    pub(crate) fn endpoint(endpoint: &'a Endpoint) -> Self {
        Self {
            inner: NextInner::Endpoint(endpoint),
        }
    }

    /// Invokes the next unit or the endpoint.
    ///
    /// # Errors
    ///
    /// Propagates whatever the downstream chain returns.
    pub fn run(self, env: &mut Environment) -> HermesResult<Response> {
        match self.inner {
            NextInner::Chain { unit, next } => unit.process(env, *next),
            NextInner::Endpoint(endpoint) => endpoint(env),
        }
    }
}

/// A middleware unit defined by a closure.
///
/// # Example
///
/// ```
/// use hermes_pipeline::FnMiddleware;
///
/// let unit = FnMiddleware::new("pass-through", |env, next| next.run(env));
/// ```
pub struct FnMiddleware<F> {
    name: &'static str,
    func: F,
}

impl<F> FnMiddleware<F>
where
    F: Fn(&mut Environment, Next<'_>) -> HermesResult<Response> + Send + Sync + 'static,
{
    /// Creates a new function-based unit.
    #[must_use]
    pub const fn new(name: &'static str, func: F) -> Self {
        Self { name, func }
    }
}

impl<F> Middleware for FnMiddleware<F>
where
    F: Fn(&mut Environment, Next<'_>) -> HermesResult<Response> + Send + Sync + 'static,
{
    fn name(&self) -> &'static str {
        self.name
    }

    fn process(&self, env: &mut Environment, next: Next<'_>) -> HermesResult<Response> {
        (self.func)(env, next)
    }
}
