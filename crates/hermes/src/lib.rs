//! # Hermes
//!
//! **Request-dispatch core for web-style applications**
//!
//! Hermes turns an incoming request path into a controller/action
//! invocation and runs every request through an ordered, composable
//! pipeline of middleware units:
//!
//! - **Pattern router** — route definitions with named parameters,
//!   nestable optional groups, and per-parameter constraints compile
//!   into matchers with deterministic precedence; the same definitions
//!   drive reverse routing (controller/action/params back to a path).
//! - **Middleware pipeline** — a chain-of-responsibility executor with a
//!   cascade protocol (`X-Cascade: pass`) letting a handler decline and
//!   defer to the next candidate.
//!
//! ## Quick Start
//!
//! ```rust
//! use std::sync::Arc;
//! use hermes::prelude::*;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut routes = RouteTable::new();
//! routes.add_route(
//!     "welcome/:id",
//!     [
//!         ("_controller".to_string(), "welcome".to_string()),
//!         ("_action".to_string(), "show".to_string()),
//!     ].into_iter().collect(),
//!     Default::default(),
//! )?;
//!
//! let mut actions = ActionRegistry::new();
//! actions.register_fn("welcome", "show", |env| {
//!     let id = env.route_param("id").unwrap_or("?").to_string();
//!     Ok(Response::ok(format!("hello {id}")))
//! });
//!
//! let engine = Engine::new(Arc::new(routes), Arc::new(actions), EngineConfig::default());
//! let pipeline = engine.pipeline()?;
//!
//! let mut env = Environment::new("GET", "welcome/7");
//! let response = engine.handle(&pipeline, &mut env);
//! assert_eq!(response.body_string(), "hello 7");
//! # Ok(())
//! # }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! Request → RequestLog → Timer → ErrorCatcher → routing endpoint
//!                                                      ↓
//! Response ←──────(post-processing on the way out)←────┘
//! ```

#![doc(html_root_url = "https://docs.rs/hermes/0.1.0")]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Re-export core types
pub use hermes_core as core;

// Re-export router types
pub use hermes_router as router;

// Re-export pipeline types
pub use hermes_pipeline as pipeline;

// Re-export engine types
pub use hermes_engine as engine;

// Re-export configuration types
pub use hermes_config as config;

/// Prelude module for convenient imports.
///
/// # Example
///
/// ```rust
/// use hermes::prelude::*;
/// ```
pub mod prelude {
    pub use hermes_core::{
        Action, ActionRegistry, Environment, FnAction, HermesError, HermesResult, Response,
    };

    pub use hermes_router::{MatchResult, Params, RoutePattern, RouteTable};

    pub use hermes_pipeline::{
        stages::{AccessGuard, ErrorCatcher, RequestLog, Timer},
        FnMiddleware, Middleware, Next, Pipeline, PipelineError,
    };

    pub use hermes_engine::{Cascade, Engine, EngineConfig};

    pub use hermes_config::{AppConfig, ConfigLoader};
}
