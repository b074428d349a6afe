//! Middleware pipeline implementation for the Hermes framework.
//!
//! A pipeline is an ordered chain of [`Middleware`] units terminated by
//! an endpoint. Units are appended during the build phase; at run time
//! the effective call chain is composed back-to-front into a single
//! callable and invoked once per request. Each unit may pass through,
//! post-process, short-circuit, or act as an exception boundary.
//!
//! # Example
//!
//! ```
//! use hermes_core::{Environment, Response};
//! use hermes_pipeline::stages::{ErrorCatcher, Timer};
//! use hermes_pipeline::Pipeline;
//!
//! let pipeline = Pipeline::builder()
//!     .unit(Timer::new())
//!     .unit(ErrorCatcher::new(false))
//!     .endpoint(|_env| Ok(Response::ok("hello")))
//!     .build();
//!
//! pipeline.lint().unwrap();
//!
//! let mut env = Environment::new("GET", "hello");
//! let response = pipeline.run(&mut env).unwrap();
//! assert_eq!(response.body_string(), "hello");
//! ```

pub mod middleware;
pub mod pipeline;
pub mod stages;

pub use middleware::{Endpoint, FnMiddleware, Middleware, Next};
pub use pipeline::{BoxedMiddleware, Pipeline, PipelineBuilder, PipelineError};
