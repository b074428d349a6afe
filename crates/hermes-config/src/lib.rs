//! Typed configuration system for the Hermes dispatch framework.
//!
//! Configuration is an explicit, constructed value: it is loaded once at
//! startup via [`ConfigLoader`], validated, and passed by reference into
//! the engine. There is no process-wide configuration state.
//!
//! Route declarations live in the configuration file as an ordered list
//! of `(pattern, defaults, constraints)` triples; [`build_route_table`]
//! turns them into a compiled [`hermes_router::RouteTable`], aborting
//! startup on the first pattern that fails to compile.

mod error;
mod loader;
mod schema;

pub use error::ConfigError;
pub use loader::{build_route_table, ConfigLoader};
pub use schema::{AppConfig, LogFormat, LoggingConfig, RouteConfig};
