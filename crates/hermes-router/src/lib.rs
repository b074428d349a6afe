//! Pattern router with reverse routing for the Hermes framework.
//!
//! Route definitions combine literal text, `:name` parameters,
//! parenthesized optional groups, and a trailing `*` splat. Definitions
//! compile once into [`RoutePattern`] matchers collected in an ordered
//! [`RouteTable`]:
//!
//! - **Forward matching** is first-match-wins in insertion order, with an
//!   exact-path literal index consulted first.
//! - **Reverse routing** regenerates a path from a
//!   controller/action/parameter set through the same compiled patterns,
//!   so matching and generation cannot disagree.
//!
//! # Example
//!
//! ```rust
//! use hermes_router::{Params, RouteTable};
//! use indexmap::IndexMap;
//!
//! let mut table = RouteTable::new();
//! table.add_route(
//!     "rest(/:method)(/:id)",
//!     IndexMap::from([
//!         ("_controller".to_string(), "rest".to_string()),
//!         ("_action".to_string(), "dispatch".to_string()),
//!     ]),
//!     IndexMap::from([
//!         ("method".to_string(), r"[^\d]+".to_string()),
//!         ("id".to_string(), r"\d+".to_string()),
//!     ]),
//! ).unwrap();
//!
//! let matched = table.match_path("rest/update/42").unwrap();
//! assert_eq!(matched.params.get("method"), Some("update"));
//! assert_eq!(matched.params.get("id"), Some("42"));
//!
//! let path = table.reverse("rest", "dispatch", &matched.params);
//! assert_eq!(path, "rest/update/42");
//! ```

mod error;
mod params;
mod pattern;
mod table;
mod token;

pub use error::RouteCompileError;
pub use params::Params;
pub use pattern::{PatternMatch, RoutePattern};
pub use table::{
    normalize_action, normalize_controller, normalize_path, MatchResult, RouteTable, ACTION_PARAM,
    CONTROLLER_PARAM,
};
