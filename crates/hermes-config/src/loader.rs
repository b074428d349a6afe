//! Configuration loader with layered approach.
//!
//! The loader applies configuration in layers, later layers overriding
//! earlier ones:
//!
//! 1. Default values (built into the code)
//! 2. Configuration file (TOML)
//! 3. Environment variables
//!
//! # Example
//!
//! ```no_run
//! use hermes_config::ConfigLoader;
//!
//! # fn main() -> Result<(), hermes_config::ConfigError> {
//! let config = ConfigLoader::new()
//!     .with_file("app.toml")?
//!     .with_env_prefix("HERMES")
//!     .load()?;
//! # Ok(())
//! # }
//! ```

use std::env;
use std::fs;
use std::path::Path;

use hermes_router::RouteTable;

use crate::{AppConfig, ConfigError};

/// Recognized log level filters.
const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// Layered configuration loader.
#[derive(Debug, Default)]
pub struct ConfigLoader {
    config: AppConfig,
    env_prefix: Option<String>,
}

impl ConfigLoader {
    /// Creates a loader starting from default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts from the development preset instead of plain defaults.
    #[must_use]
    pub fn with_development(mut self) -> Self {
        self.config = AppConfig::development();
        self
    }

    /// Loads a TOML configuration file over the current layer.
    ///
    /// # Errors
    ///
    /// [`ConfigError::FileNotFound`], [`ConfigError::Read`], or
    /// [`ConfigError::Toml`].
    pub fn with_file(mut self, path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(ConfigError::file_not_found(path));
        }
        let raw = fs::read_to_string(path).map_err(|source| ConfigError::read(path, source))?;
        self.config = toml::from_str(&raw).map_err(|source| ConfigError::Toml(Box::new(source)))?;
        Ok(self)
    }

    /// Enables environment variable overrides with the given prefix.
    ///
    /// Recognized variables: `{PREFIX}__DEV_MODE` (bool) and
    /// `{PREFIX}__LOG_LEVEL`.
    #[must_use]
    pub fn with_env_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.env_prefix = Some(prefix.into());
        self
    }

    /// Applies environment overrides, validates, and returns the final
    /// configuration.
    ///
    /// # Errors
    ///
    /// [`ConfigError::EnvParse`] for malformed overrides,
    /// [`ConfigError::InvalidValue`] for validation failures.
    pub fn load(mut self) -> Result<AppConfig, ConfigError> {
        if let Some(prefix) = &self.env_prefix {
            let dev_mode_var = format!("{prefix}__DEV_MODE");
            if let Ok(raw) = env::var(&dev_mode_var) {
                self.config.dev_mode = raw
                    .parse::<bool>()
                    .map_err(|_| ConfigError::env_parse(&dev_mode_var, "expected true or false"))?;
            }
            if let Ok(raw) = env::var(format!("{prefix}__LOG_LEVEL")) {
                self.config.logging.level = raw;
            }
        }

        validate(&self.config)?;
        Ok(self.config)
    }
}

fn validate(config: &AppConfig) -> Result<(), ConfigError> {
    if !LOG_LEVELS.contains(&config.logging.level.as_str()) {
        return Err(ConfigError::invalid_value(
            "logging.level",
            format!(
                "`{}` is not one of {}",
                config.logging.level,
                LOG_LEVELS.join(", ")
            ),
        ));
    }
    Ok(())
}

/// Builds the route table from the declaration list, in file order.
///
/// # Errors
///
/// [`ConfigError::Route`] when a pattern fails to compile; fatal to
/// startup.
pub fn build_route_table(config: &AppConfig) -> Result<RouteTable, ConfigError> {
    let mut table = RouteTable::new();
    for route in &config.routes {
        table.add_route(
            &route.pattern,
            route.defaults.clone(),
            route.constraints.clone(),
        )?;
    }
    Ok(table)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_config(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_defaults_without_file() {
        let config = ConfigLoader::new().load().unwrap();
        assert!(!config.dev_mode);
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_load_from_file() {
        let file = write_config(
            r#"
            dev_mode = true

            [[routes]]
            pattern = "welcome/:id"
            defaults = { _controller = "welcome", _action = "show" }
            "#,
        );

        let config = ConfigLoader::new().with_file(file.path()).unwrap().load().unwrap();
        assert!(config.dev_mode);
        assert_eq!(config.routes.len(), 1);
    }

    #[test]
    fn test_missing_file() {
        let err = ConfigLoader::new()
            .with_file("/no/such/hermes.toml")
            .unwrap_err();
        assert!(matches!(err, ConfigError::FileNotFound { .. }));
    }

    #[test]
    fn test_invalid_toml() {
        let file = write_config("dev_mode = maybe");
        let err = ConfigLoader::new().with_file(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::Toml(_)));
    }

    #[test]
    fn test_env_override_dev_mode() {
        env::set_var("HERMES_LOADER_TEST__DEV_MODE", "true");
        let config = ConfigLoader::new()
            .with_env_prefix("HERMES_LOADER_TEST")
            .load()
            .unwrap();
        env::remove_var("HERMES_LOADER_TEST__DEV_MODE");
        assert!(config.dev_mode);
    }

    #[test]
    fn test_env_override_rejects_garbage() {
        env::set_var("HERMES_LOADER_BAD__DEV_MODE", "yes please");
        let err = ConfigLoader::new()
            .with_env_prefix("HERMES_LOADER_BAD")
            .load()
            .unwrap_err();
        env::remove_var("HERMES_LOADER_BAD__DEV_MODE");
        assert!(matches!(err, ConfigError::EnvParse { .. }));
    }

    #[test]
    fn test_invalid_log_level_rejected() {
        let file = write_config(
            r#"
            [logging]
            level = "shouting"
            "#,
        );
        let err = ConfigLoader::new().with_file(file.path()).unwrap().load().unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { .. }));
    }

    #[test]
    fn test_build_route_table_in_file_order() {
        let file = write_config(
            r#"
            [[routes]]
            pattern = ":page"
            defaults = { _controller = "pages", _action = "first" }

            [[routes]]
            pattern = ":slug"
            defaults = { _controller = "pages", _action = "second" }
            "#,
        );

        let config = ConfigLoader::new().with_file(file.path()).unwrap().load().unwrap();
        let table = build_route_table(&config).unwrap();
        assert_eq!(table.len(), 2);

        let matched = table.match_path("about").unwrap();
        assert_eq!(matched.action.as_deref(), Some("first"));
    }

    #[test]
    fn test_bad_route_pattern_fails_load() {
        let config: AppConfig = toml::from_str(
            r#"
            [[routes]]
            pattern = "rest(/:method"
            "#,
        )
        .unwrap();

        let err = build_route_table(&config).unwrap_err();
        assert!(matches!(err, ConfigError::Route(_)));
    }
}
