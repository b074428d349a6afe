//! Exception boundary unit.

use hermes_core::{Environment, HermesResult, Response};

use crate::middleware::{Middleware, Next};

/// Converts a downstream error into an error response instead of letting
/// it propagate further up the chain.
///
/// Position matters: only errors raised *after* this unit in the chain
/// (closer to the endpoint) are caught. The error is always logged; the
/// response body carries full detail only in development mode, a generic
/// status message otherwise.
#[derive(Debug, Clone, Copy)]
pub struct ErrorCatcher {
    dev_mode: bool,
}

impl ErrorCatcher {
    /// Creates an exception boundary.
    #[must_use]
    pub fn new(dev_mode: bool) -> Self {
        Self { dev_mode }
    }
}

impl Middleware for ErrorCatcher {
    fn name(&self) -> &'static str {
        "error_catcher"
    }

    fn process(&self, env: &mut Environment, next: Next<'_>) -> HermesResult<Response> {
        match next.run(env) {
            Ok(response) => Ok(response),
            Err(error) => {
                tracing::error!(
                    method = %env.method(),
                    path = %env.path(),
                    error = %error.detail(),
                    "request failed"
                );
                Ok(error.to_response(self.dev_mode))
            }
        }
    }
}
