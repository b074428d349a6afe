//! Request logging unit.

use std::time::Instant;

use hermes_core::{Environment, HermesResult, Response};

use crate::middleware::{Middleware, Next};

/// Emits one structured log line per request with method, path, status,
/// and elapsed time.
///
/// Errors are passed through untouched; the exception boundary is the
/// unit responsible for reporting them.
#[derive(Debug, Clone, Copy, Default)]
pub struct RequestLog;

impl RequestLog {
    /// Creates a request logging unit.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Middleware for RequestLog {
    fn name(&self) -> &'static str {
        "request_log"
    }

    fn process(&self, env: &mut Environment, next: Next<'_>) -> HermesResult<Response> {
        let started = Instant::now();
        let method = env.method().to_string();
        let path = env.path().to_string();

        let result = next.run(env);
        let elapsed_ms = started.elapsed().as_millis();
        match &result {
            Ok(response) => {
                tracing::info!(
                    %method,
                    %path,
                    status = response.status().as_u16(),
                    elapsed_ms,
                    "request"
                );
            }
            Err(error) => {
                tracing::warn!(%method, %path, %error, elapsed_ms, "request errored");
            }
        }
        result
    }
}
