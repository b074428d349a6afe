//! The dispatcher engine.
//!
//! The [`Engine`] owns the compiled route table and the action registry,
//! and produces the pipeline every request runs through. Its routing
//! endpoint turns a matched route into a controller invocation; a miss
//! (no route, incomplete target, or unregistered action) becomes a 404
//! carrying `X-Cascade: pass`, so the engine composes under an enclosing
//! cascade dispatcher like any other candidate.

use std::sync::Arc;

use hermes_config::{build_route_table, AppConfig, ConfigError};
use hermes_core::{ActionRegistry, Environment, Response};
use hermes_pipeline::stages::{ErrorCatcher, RequestLog, Timer};
use hermes_pipeline::{Endpoint, Pipeline, PipelineError};
use hermes_router::{MatchResult, Params, RouteTable};
use http::StatusCode;
use serde_json::Value;

/// Engine settings, threaded in explicitly at construction.
#[derive(Debug, Clone, Copy, Default)]
pub struct EngineConfig {
    /// Expose full error detail in responses.
    pub dev_mode: bool,
}

impl From<&AppConfig> for EngineConfig {
    fn from(config: &AppConfig) -> Self {
        Self {
            dev_mode: config.dev_mode,
        }
    }
}

/// Converts matched routes into controller invocations.
///
/// The route table and action registry are shared read-only state; the
/// engine holds no per-request data and one instance serves every
/// request.
pub struct Engine {
    routes: Arc<RouteTable>,
    actions: Arc<ActionRegistry>,
    config: EngineConfig,
}

impl std::fmt::Debug for Engine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Engine")
            .field("routes", &self.routes)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl Engine {
    /// Creates an engine from its collaborators.
    #[must_use]
    pub fn new(routes: Arc<RouteTable>, actions: Arc<ActionRegistry>, config: EngineConfig) -> Self {
        Self {
            routes,
            actions,
            config,
        }
    }

    /// Builds the route table from configuration and wires the engine.
    ///
    /// # Errors
    ///
    /// [`ConfigError::Route`] when a declared pattern does not compile;
    /// fatal to startup.
    pub fn from_config(config: &AppConfig, actions: Arc<ActionRegistry>) -> Result<Self, ConfigError> {
        let routes = Arc::new(build_route_table(config)?);
        Ok(Self::new(routes, actions, EngineConfig::from(config)))
    }

    /// Returns the shared route table.
    #[must_use]
    pub fn routes(&self) -> &RouteTable {
        &self.routes
    }

    /// Generates a path for a controller/action/parameter set through the
    /// owned route table.
    #[must_use]
    pub fn reverse(&self, controller: &str, action: &str, params: &Params) -> String {
        self.routes.reverse(controller, action, params)
    }

    /// Returns the routing endpoint: match the path, store the target in
    /// the environment, invoke the resolved action.
    ///
    /// Every kind of miss returns a 404 carrying the cascade header, so
    /// an enclosing dispatcher can try its next candidate.
    #[must_use]
    pub fn endpoint(&self) -> Endpoint {
        let routes = Arc::clone(&self.routes);
        let actions = Arc::clone(&self.actions);

        Box::new(move |env: &mut Environment| {
            let Some(matched) = routes.match_path(env.path()) else {
                tracing::debug!(path = %env.path(), "no route matched");
                return Ok(Response::not_found_pass());
            };
            let MatchResult {
                controller,
                action,
                params,
            } = matched;
            let (Some(controller), Some(action)) = (controller, action) else {
                tracing::debug!(path = %env.path(), "matched route names no dispatch target");
                return Ok(Response::not_found_pass());
            };
            let Some(handler) = actions.resolve(&controller, &action) else {
                tracing::debug!(%controller, %action, "no action registered for target");
                return Ok(Response::not_found_pass());
            };

            env.set_route_target(controller.as_str(), action.as_str(), params_to_value(&params));
            handler.call(env)
        })
    }

    /// Assembles the stock pipeline around the routing endpoint:
    /// request log, timer, exception boundary, then the endpoint.
    ///
    /// # Errors
    ///
    /// [`PipelineError`] if the assembled pipeline fails its pre-flight
    /// lint.
    pub fn pipeline(&self) -> Result<Pipeline, PipelineError> {
        let pipeline = Pipeline::builder()
            .unit(RequestLog::new())
            .unit(Timer::new())
            .unit(ErrorCatcher::new(self.config.dev_mode))
            .boxed_endpoint(self.endpoint())
            .build();
        pipeline.lint()?;
        Ok(pipeline)
    }

    /// Runs a request through `pipeline` and always produces a response.
    ///
    /// An error that escaped every unit degrades to a 500-class response
    /// (full detail only in dev mode) and is logged; it never crashes
    /// silently.
    #[must_use]
    pub fn handle(&self, pipeline: &Pipeline, env: &mut Environment) -> Response {
        match pipeline.run(env) {
            Ok(response) => response,
            Err(PipelineError::Unit(error)) => {
                tracing::error!(
                    path = %env.path(),
                    error = %error.detail(),
                    "unhandled error escaped the pipeline"
                );
                error.to_response(self.config.dev_mode)
            }
            Err(error) => {
                tracing::error!(%error, "pipeline configuration error");
                Response::text(StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error")
            }
        }
    }
}

/// Converts router params into the JSON object stored in the environment.
fn params_to_value(params: &Params) -> Value {
    let mut object = serde_json::Map::new();
    for (name, value) in params.iter() {
        object.insert(name.to_string(), Value::String(value.to_string()));
    }
    Value::Object(object)
}
