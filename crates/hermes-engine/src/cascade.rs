//! Cascade dispatcher.
//!
//! A [`Cascade`] runs an ordered list of dispatch stages against the
//! same request environment, advancing to the next stage only while the
//! previous stage's response carries `X-Cascade: pass`. The engine's
//! routing endpoint is a valid stage, so several dispatch attempts (for
//! example different controller namespaces) compose in sequence.

use hermes_core::{Environment, HermesResult, Response};
use hermes_pipeline::Endpoint;

/// An ordered sequence of dispatch stages joined by the cascade
/// convention.
///
/// # Example
///
/// ```
/// use hermes_core::{Environment, Response};
/// use hermes_engine::Cascade;
///
/// let cascade = Cascade::new()
///     .stage(|_env| Ok(Response::not_found_pass()))
///     .stage(|_env| Ok(Response::ok("second stage")));
///
/// let mut env = Environment::new("GET", "x");
/// let response = cascade.run(&mut env).unwrap();
/// assert_eq!(response.body_string(), "second stage");
/// ```
#[derive(Default)]
pub struct Cascade {
    stages: Vec<Endpoint>,
}

impl Cascade {
    /// Creates an empty cascade.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a dispatch stage; stages are tried in the order appended.
    #[must_use]
    pub fn stage<F>(self, stage: F) -> Self
    where
        F: Fn(&mut Environment) -> HermesResult<Response> + Send + Sync + 'static,
    {
        self.boxed_stage(Box::new(stage))
    }

    /// Appends an already boxed stage (e.g. an engine endpoint).
    #[must_use]
    pub fn boxed_stage(mut self, stage: Endpoint) -> Self {
        self.stages.push(stage);
        self
    }

    /// Returns the number of stages.
    #[must_use]
    pub fn len(&self) -> usize {
        self.stages.len()
    }

    /// Returns true if no stages are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }

    /// Runs stages in order until one produces a response without the
    /// cascade header.
    ///
    /// On exhaustion the last declining response is returned (so its
    /// status and headers reach the caller); an empty cascade produces
    /// the stock 404 pass response.
    ///
    /// # Errors
    ///
    /// A stage error aborts the cascade and propagates; later stages do
    /// not run.
    pub fn run(&self, env: &mut Environment) -> HermesResult<Response> {
        let mut declined = None;
        for stage in &self.stages {
            let response = stage(env)?;
            if !response.is_cascade_pass() {
                return Ok(response);
            }
            declined = Some(response);
        }
        Ok(declined.unwrap_or_else(Response::not_found_pass))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hermes_core::HermesError;
    use http::StatusCode;

    #[test]
    fn test_first_non_pass_response_wins() {
        let cascade = Cascade::new()
            .stage(|_env| Ok(Response::ok("first")))
            .stage(|_env| Ok(Response::ok("second")));

        let mut env = Environment::new("GET", "x");
        let response = cascade.run(&mut env).unwrap();
        assert_eq!(response.body_string(), "first");
    }

    #[test]
    fn test_pass_advances_to_next_stage() {
        let cascade = Cascade::new()
            .stage(|_env| Ok(Response::not_found_pass()))
            .stage(|_env| Ok(Response::ok("second")));

        let mut env = Environment::new("GET", "x");
        let response = cascade.run(&mut env).unwrap();
        assert_eq!(response.body_string(), "second");
    }

    #[test]
    fn test_exhaustion_returns_last_pass_response() {
        let cascade = Cascade::new()
            .stage(|_env| Ok(Response::not_found_pass()))
            .stage(|_env| Ok(Response::not_found_pass().header("x-stage", "last")));

        let mut env = Environment::new("GET", "x");
        let response = cascade.run(&mut env).unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert!(response.is_cascade_pass());
        assert_eq!(response.header_value("x-stage"), Some("last"));
    }

    #[test]
    fn test_empty_cascade_degrades_to_404() {
        let cascade = Cascade::new();
        let mut env = Environment::new("GET", "x");
        let response = cascade.run(&mut env).unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_stage_error_aborts_cascade() {
        let cascade = Cascade::new()
            .stage(|_env| Err(HermesError::internal("boom")))
            .stage(|env: &mut Environment| {
                env.set("second.ran", true);
                Ok(Response::ok("second"))
            });

        let mut env = Environment::new("GET", "x");
        assert!(cascade.run(&mut env).is_err());
        assert!(!env.contains("second.ran"));
    }
}
