//! Access guard unit.

use hermes_core::{Environment, HermesResult, Response};
use http::StatusCode;

use crate::middleware::{Middleware, Next};

/// Denies requests failing a predicate over the environment.
///
/// A denied request short-circuits the chain: `next` is never invoked
/// and a `403 Forbidden` response is returned directly.
///
/// # Example
///
/// ```
/// use hermes_pipeline::stages::AccessGuard;
///
/// let guard = AccessGuard::new(|env| env.get_str("user.role") == Some("admin"));
/// ```
pub struct AccessGuard<F> {
    predicate: F,
}

impl<F> AccessGuard<F>
where
    F: Fn(&Environment) -> bool + Send + Sync + 'static,
{
    /// Creates a guard from an allow predicate.
    #[must_use]
    pub const fn new(predicate: F) -> Self {
        Self { predicate }
    }
}

impl<F> Middleware for AccessGuard<F>
where
    F: Fn(&Environment) -> bool + Send + Sync + 'static,
{
    fn name(&self) -> &'static str {
        "access_guard"
    }

    fn process(&self, env: &mut Environment, next: Next<'_>) -> HermesResult<Response> {
        if (self.predicate)(env) {
            next.run(env)
        } else {
            tracing::warn!(method = %env.method(), path = %env.path(), "access denied");
            Ok(Response::text(StatusCode::FORBIDDEN, "Forbidden"))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Pipeline;

    fn guarded_pipeline() -> Pipeline {
        Pipeline::builder()
            .unit(AccessGuard::new(|env| {
                env.get_str("user.role") == Some("admin")
            }))
            .endpoint(|env: &mut Environment| {
                env.set("endpoint.ran", true);
                Ok(Response::ok("secret"))
            })
            .build()
    }

    #[test]
    fn test_guard_allows_matching_requests() {
        let pipeline = guarded_pipeline();
        let mut env = Environment::new("GET", "admin");
        env.set("user.role", "admin");

        let response = pipeline.run(&mut env).unwrap();
        assert_eq!(response.body_string(), "secret");
    }

    #[test]
    fn test_guard_denies_without_invoking_downstream() {
        let pipeline = guarded_pipeline();
        let mut env = Environment::new("GET", "admin");

        let response = pipeline.run(&mut env).unwrap();
        assert_eq!(response.status(), StatusCode::FORBIDDEN);
        assert!(!env.contains("endpoint.ran"));
    }
}
