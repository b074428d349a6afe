//! Pipeline construction and execution.
//!
//! A [`Pipeline`] has two phases. During **build**, units are appended in
//! execution order and an endpoint is assigned. After build the pipeline
//! is frozen: it holds no per-request state and one instance serves every
//! request. During **run**, the effective call chain is composed
//! back-to-front from the immutable unit list (the endpoint innermost,
//! the first unit outermost) and invoked once with the request
//! environment.

use std::sync::Arc;

use hermes_core::{Environment, HermesError, HermesResult, Response};
use thiserror::Error;

use crate::middleware::{Endpoint, Middleware, Next};

/// A type-erased unit stored in the pipeline.
pub type BoxedMiddleware = Arc<dyn Middleware>;

/// Errors raised by pipeline construction and execution.
#[derive(Error, Debug)]
pub enum PipelineError {
    /// `run` was invoked with no endpoint configured. A configuration
    /// defect: raised immediately, before any unit executes.
    #[error("pipeline endpoint is not set")]
    NoEndpoint,

    /// Pre-flight validation failed; fatal to startup, not per-request.
    #[error("pipeline lint failed: {reason}")]
    Lint {
        /// What the lint pass found.
        reason: String,
    },

    /// An error escaped every unit in the chain. The host converts this
    /// into a 500-class response.
    #[error(transparent)]
    Unit(#[from] HermesError),
}

/// The ordered, frozen chain of middleware units plus its endpoint.
///
/// # Example
///
/// ```
/// use hermes_core::{Environment, Response};
/// use hermes_pipeline::{FnMiddleware, Pipeline};
///
/// let pipeline = Pipeline::builder()
///     .unit(FnMiddleware::new("noop", |env, next| next.run(env)))
///     .endpoint(|_env| Ok(Response::ok("hello")))
///     .build();
///
/// let mut env = Environment::new("GET", "hello");
/// let response = pipeline.run(&mut env).unwrap();
/// assert_eq!(response.body_string(), "hello");
/// ```
pub struct Pipeline {
    units: Vec<BoxedMiddleware>,
    endpoint: Option<Endpoint>,
    endpoint_reassigned: bool,
}

impl Pipeline {
    /// Creates a new pipeline builder.
    #[must_use]
    pub fn builder() -> PipelineBuilder {
        PipelineBuilder::new()
    }

    /// Executes the pipeline against a request environment.
    ///
    /// The chain is composed back-to-front: the endpoint is the innermost
    /// callable, each unit from last to first wraps what was built so
    /// far, and the front of the chain is invoked once.
    ///
    /// # Errors
    ///
    /// [`PipelineError::NoEndpoint`] when no endpoint is configured (no
    /// unit runs in that case); [`PipelineError::Unit`] when an error
    /// escapes the whole chain.
    pub fn run(&self, env: &mut Environment) -> Result<Response, PipelineError> {
        let endpoint = self.endpoint.as_ref().ok_or(PipelineError::NoEndpoint)?;

        let mut next = Next::endpoint(endpoint);
        for unit in self.units.iter().rev() {
            next = Next::new(unit.as_ref(), next);
        }
        next.run(env).map_err(PipelineError::Unit)
    }

    /// Pre-flight validation, separate from execution.
    ///
    /// Checks that an endpoint is present and was assigned exactly once,
    /// and that unit names are non-empty and unique.
    ///
    /// # Errors
    ///
    /// [`PipelineError::NoEndpoint`] or [`PipelineError::Lint`].
    pub fn lint(&self) -> Result<(), PipelineError> {
        if self.endpoint_reassigned {
            return Err(PipelineError::Lint {
                reason: "endpoint assigned more than once".to_string(),
            });
        }
        if self.endpoint.is_none() {
            return Err(PipelineError::NoEndpoint);
        }
        for (index, unit) in self.units.iter().enumerate() {
            let name = unit.name();
            if name.is_empty() {
                return Err(PipelineError::Lint {
                    reason: format!("unit at position {index} has an empty name"),
                });
            }
            if self.units[..index].iter().any(|u| u.name() == name) {
                return Err(PipelineError::Lint {
                    reason: format!("duplicate unit name `{name}`"),
                });
            }
        }
        Ok(())
    }

    /// Returns the unit names in execution order.
    #[must_use]
    pub fn unit_names(&self) -> Vec<&'static str> {
        self.units.iter().map(|unit| unit.name()).collect()
    }

    /// Returns the number of units.
    #[must_use]
    pub fn unit_count(&self) -> usize {
        self.units.len()
    }
}

/// Builder for a [`Pipeline`].
pub struct PipelineBuilder {
    units: Vec<BoxedMiddleware>,
    endpoint: Option<Endpoint>,
    endpoint_reassigned: bool,
}

impl PipelineBuilder {
    /// Creates an empty builder.
    #[must_use]
    pub fn new() -> Self {
        Self {
            units: Vec::new(),
            endpoint: None,
            endpoint_reassigned: false,
        }
    }

    /// Appends a unit; units execute in the order they are appended.
    #[must_use]
    pub fn unit<M: Middleware>(mut self, unit: M) -> Self {
        self.units.push(Arc::new(unit));
        self
    }

    /// Appends an already type-erased unit.
    #[must_use]
    pub fn boxed_unit(mut self, unit: BoxedMiddleware) -> Self {
        self.units.push(unit);
        self
    }

    /// Assigns the terminal endpoint.
    ///
    /// Assigning twice is recorded and reported by
    /// [`Pipeline::lint`] as a lint failure.
    #[must_use]
    pub fn endpoint<F>(self, endpoint: F) -> Self
    where
        F: Fn(&mut Environment) -> HermesResult<Response> + Send + Sync + 'static,
    {
        self.boxed_endpoint(Box::new(endpoint))
    }

    /// Assigns an already boxed endpoint.
    #[must_use]
    pub fn boxed_endpoint(mut self, endpoint: Endpoint) -> Self {
        if self.endpoint.is_some() {
            self.endpoint_reassigned = true;
        }
        self.endpoint = Some(endpoint);
        self
    }

    /// Freezes the pipeline.
    #[must_use]
    pub fn build(self) -> Pipeline {
        Pipeline {
            units: self.units,
            endpoint: self.endpoint,
            endpoint_reassigned: self.endpoint_reassigned,
        }
    }
}

impl Default for PipelineBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::middleware::FnMiddleware;
    use std::sync::Mutex;

    /// A unit that records entry and exit so ordering is observable.
    struct Recording {
        name: &'static str,
        log: Arc<Mutex<Vec<String>>>,
    }

    impl Middleware for Recording {
        fn name(&self) -> &'static str {
            self.name
        }

        fn process(&self, env: &mut Environment, next: Next<'_>) -> HermesResult<Response> {
            self.log.lock().unwrap().push(format!("enter:{}", self.name));
            let response = next.run(env)?;
            self.log.lock().unwrap().push(format!("leave:{}", self.name));
            Ok(response)
        }
    }

    fn recording(name: &'static str, log: &Arc<Mutex<Vec<String>>>) -> Recording {
        Recording {
            name,
            log: log.clone(),
        }
    }

    #[test]
    fn test_units_run_in_order_and_unwind_in_reverse() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let endpoint_log = log.clone();

        let pipeline = Pipeline::builder()
            .unit(recording("first", &log))
            .unit(recording("second", &log))
            .unit(recording("third", &log))
            .endpoint(move |_env| {
                endpoint_log.lock().unwrap().push("endpoint".to_string());
                Ok(Response::ok("ok"))
            })
            .build();

        let mut env = Environment::new("GET", "x");
        let response = pipeline.run(&mut env).unwrap();
        assert_eq!(response.body_string(), "ok");

        let entries = log.lock().unwrap();
        assert_eq!(
            *entries,
            vec![
                "enter:first",
                "enter:second",
                "enter:third",
                "endpoint",
                "leave:third",
                "leave:second",
                "leave:first",
            ]
        );
    }

    #[test]
    fn test_every_unit_runs_exactly_once() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let pipeline = Pipeline::builder()
            .unit(recording("a", &log))
            .unit(recording("b", &log))
            .endpoint(|_env| Ok(Response::ok("ok")))
            .build();

        let mut env = Environment::new("GET", "x");
        pipeline.run(&mut env).unwrap();

        let entries = log.lock().unwrap();
        assert_eq!(entries.iter().filter(|e| *e == "enter:a").count(), 1);
        assert_eq!(entries.iter().filter(|e| *e == "enter:b").count(), 1);
    }

    #[test]
    fn test_pipeline_is_reusable_across_requests() {
        let pipeline = Pipeline::builder()
            .endpoint(|env| Ok(Response::ok(env.path().to_string())))
            .build();

        let mut first = Environment::new("GET", "one");
        let mut second = Environment::new("GET", "two");
        assert_eq!(pipeline.run(&mut first).unwrap().body_string(), "one");
        assert_eq!(pipeline.run(&mut second).unwrap().body_string(), "two");
    }

    #[test]
    fn test_run_without_endpoint_does_no_partial_work() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let pipeline = Pipeline::builder().unit(recording("only", &log)).build();

        let mut env = Environment::new("GET", "x");
        let err = pipeline.run(&mut env).unwrap_err();
        assert!(matches!(err, PipelineError::NoEndpoint));
        assert!(log.lock().unwrap().is_empty());
    }

    #[test]
    fn test_lint_accepts_well_formed_pipeline() {
        let pipeline = Pipeline::builder()
            .unit(FnMiddleware::new("one", |env, next| next.run(env)))
            .unit(FnMiddleware::new("two", |env, next| next.run(env)))
            .endpoint(|_env| Ok(Response::ok("ok")))
            .build();
        assert!(pipeline.lint().is_ok());
    }

    #[test]
    fn test_lint_rejects_missing_endpoint() {
        let pipeline = Pipeline::builder().build();
        assert!(matches!(
            pipeline.lint().unwrap_err(),
            PipelineError::NoEndpoint
        ));
    }

    #[test]
    fn test_lint_rejects_duplicate_endpoint_assignment() {
        let pipeline = Pipeline::builder()
            .endpoint(|_env| Ok(Response::ok("a")))
            .endpoint(|_env| Ok(Response::ok("b")))
            .build();
        assert!(matches!(
            pipeline.lint().unwrap_err(),
            PipelineError::Lint { .. }
        ));
    }

    #[test]
    fn test_lint_rejects_duplicate_unit_names() {
        let pipeline = Pipeline::builder()
            .unit(FnMiddleware::new("dup", |env, next| next.run(env)))
            .unit(FnMiddleware::new("dup", |env, next| next.run(env)))
            .endpoint(|_env| Ok(Response::ok("ok")))
            .build();
        let err = pipeline.lint().unwrap_err();
        assert!(err.to_string().contains("dup"));
    }

    #[test]
    fn test_error_escapes_chain_as_unit_error() {
        let pipeline = Pipeline::builder()
            .unit(FnMiddleware::new("noop", |env, next| next.run(env)))
            .endpoint(|_env| Err(HermesError::internal("boom")))
            .build();

        let mut env = Environment::new("GET", "x");
        let err = pipeline.run(&mut env).unwrap_err();
        assert!(matches!(err, PipelineError::Unit(_)));
    }

    #[test]
    fn test_unit_names_in_order() {
        let pipeline = Pipeline::builder()
            .unit(FnMiddleware::new("one", |env, next| next.run(env)))
            .unit(FnMiddleware::new("two", |env, next| next.run(env)))
            .build();
        assert_eq!(pipeline.unit_names(), vec!["one", "two"]);
        assert_eq!(pipeline.unit_count(), 2);
    }
}
