//! Request timing unit.

use std::time::Instant;

use hermes_core::{Environment, HermesResult, Response};

use crate::middleware::{Middleware, Next};

/// Header carrying the downstream processing time in milliseconds.
pub const RUNTIME_HEADER: &str = "x-runtime";

/// Wall-clocks the downstream chain and attaches the elapsed time as an
/// `x-runtime` header to whatever response comes back up, including
/// responses produced by an exception boundary further down.
#[derive(Debug, Clone, Copy, Default)]
pub struct Timer;

impl Timer {
    /// Creates a new timer unit.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Middleware for Timer {
    fn name(&self) -> &'static str {
        "timer"
    }

    fn process(&self, env: &mut Environment, next: Next<'_>) -> HermesResult<Response> {
        let started = Instant::now();
        let response = next.run(env)?;
        let elapsed_ms = started.elapsed().as_millis();
        Ok(response.header(RUNTIME_HEADER, elapsed_ms.to_string()))
    }
}
