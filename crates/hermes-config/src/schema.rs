//! Configuration schema types.
//!
//! The schema covers the dispatch core: a development-mode flag, logging
//! settings, and the ordered route declaration list. Unknown fields are
//! rejected so typos fail loudly at startup.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Top-level application configuration.
///
/// # Example
///
/// ```
/// use hermes_config::AppConfig;
///
/// let config: AppConfig = toml::from_str(r#"
///     dev_mode = true
///
///     [[routes]]
///     pattern = "welcome/:id"
///     defaults = { _controller = "welcome", _action = "show" }
/// "#).unwrap();
///
/// assert!(config.dev_mode);
/// assert_eq!(config.routes.len(), 1);
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct AppConfig {
    /// Expose full error detail in responses and enable verbose logging.
    #[serde(default)]
    pub dev_mode: bool,

    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Route declarations, in priority order.
    #[serde(default)]
    pub routes: Vec<RouteConfig>,
}

impl AppConfig {
    /// Development preset: dev mode on, debug logging.
    #[must_use]
    pub fn development() -> Self {
        Self {
            dev_mode: true,
            logging: LoggingConfig {
                level: "debug".to_string(),
                format: LogFormat::Pretty,
            },
            routes: Vec::new(),
        }
    }
}

/// Logging configuration section.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct LoggingConfig {
    /// Log level filter (`trace`, `debug`, `info`, `warn`, `error`).
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Log output format.
    #[serde(default)]
    pub format: LogFormat,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: LogFormat::default(),
        }
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Single-line output.
    #[default]
    Compact,
    /// Multi-line human-oriented output.
    Pretty,
}

/// One route declaration: pattern plus defaults and constraints maps.
///
/// Declarations are equivalent to calling
/// [`RouteTable::add_route`](hermes_router::RouteTable::add_route) in
/// file order.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct RouteConfig {
    /// The route definition string.
    pub pattern: String,

    /// Default parameter values, including the `_controller`/`_action`
    /// dispatch target.
    #[serde(default)]
    pub defaults: IndexMap<String, String>,

    /// Per-parameter constraint fragments.
    #[serde(default)]
    pub constraints: IndexMap<String, String>,
}

fn default_log_level() -> String {
    "info".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert!(!config.dev_mode);
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.logging.format, LogFormat::Compact);
        assert!(config.routes.is_empty());
    }

    #[test]
    fn test_development_preset() {
        let config = AppConfig::development();
        assert!(config.dev_mode);
        assert_eq!(config.logging.level, "debug");
    }

    #[test]
    fn test_parse_full_config() {
        let config: AppConfig = toml::from_str(
            r#"
            dev_mode = true

            [logging]
            level = "debug"
            format = "pretty"

            [[routes]]
            pattern = "rest(/:method)(/:id)"
            defaults = { _controller = "rest", _action = "dispatch" }
            constraints = { method = "[^\\d]+", id = "\\d+" }

            [[routes]]
            pattern = ":_controller/:_action/*"
            "#,
        )
        .unwrap();

        assert!(config.dev_mode);
        assert_eq!(config.logging.format, LogFormat::Pretty);
        assert_eq!(config.routes.len(), 2);
        assert_eq!(config.routes[0].pattern, "rest(/:method)(/:id)");
        assert_eq!(
            config.routes[0].defaults.get("_controller").map(String::as_str),
            Some("rest")
        );
        assert_eq!(
            config.routes[0].constraints.get("id").map(String::as_str),
            Some(r"\d+")
        );
        assert!(config.routes[1].defaults.is_empty());
    }

    #[test]
    fn test_unknown_field_rejected() {
        let result: Result<AppConfig, _> = toml::from_str("does_not_exist = 1");
        assert!(result.is_err());
    }

    #[test]
    fn test_route_defaults_preserve_declaration_order() {
        let route: RouteConfig = toml::from_str(
            r#"
            pattern = "x"
            defaults = { b = "2", a = "1" }
            "#,
        )
        .unwrap();
        let keys: Vec<&String> = route.defaults.keys().collect();
        assert_eq!(keys, vec!["b", "a"]);
    }
}
