//! Dispatcher engine wiring the Hermes router and middleware pipeline.
//!
//! The [`Engine`] owns the compiled route table and the controller
//! action registry. For each request it provides the pipeline endpoint
//! that matches the path and invokes the resolved action; misses decline
//! via the `X-Cascade: pass` convention, which the [`Cascade`]
//! dispatcher uses to chain several dispatch attempts.
//!
//! The CLI adapter ([`cli::environment_from_argv`]) produces the same
//! environment shape from argv tokens, so command invocations flow
//! through the identical pipeline.

pub mod cascade;
pub mod cli;
pub mod engine;
pub mod telemetry;

pub use cascade::Cascade;
pub use engine::{Engine, EngineConfig};
pub use telemetry::{init_logging, TelemetryError};
