//! # Configuration Module
//!
//! Router configuration loaded from YAML or JSON files and environment
//! variables.
//!
//! ## File format
//!
//! ```yaml
//! base_path: /app
//! update_history: true
//! pattern:
//!   sensitive: false
//!   strict: false
//! routes:
//!   - path: /user/:id
//!   - path: /About
//!     options:
//!       sensitive: true
//! ```
//!
//! Every field is optional. `pattern` holds the router-wide
//! [`PatternOptions`]; each route's `options` are [`PatternOverrides`] merged
//! over them.
//!
//! ## Environment Variables
//!
//! ### `RIOUTER_BASE_PATH`
//!
//! Prefix stripped from pushed paths before matching. Default: empty.
//!
//! ### `RIOUTER_UPDATE_HISTORY`
//!
//! `true`/`false` (or `1`/`0`). Whether accepted paths are written to the
//! navigation sink. Default: `false`.
//!
//! Environment values override file values when applied with
//! [`RouterConfig::apply_env`].
//!
//! ## Usage
//!
//! ```rust
//! use riouter::config::RouterConfig;
//!
//! let config = RouterConfig::from_yaml_str("base_path: /app\nroutes:\n  - path: /a\n").unwrap();
//! assert_eq!(config.base_path, "/app");
//! assert_eq!(config.routes.len(), 1);
//! ```

use serde::{Deserialize, Serialize};
use std::env;
use std::fmt;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use crate::pattern::{PatternOptions, PatternOverrides};

/// Environment variable overriding [`RouterConfig::base_path`]
pub const ENV_BASE_PATH: &str = "RIOUTER_BASE_PATH";
/// Environment variable overriding [`RouterConfig::update_history`]
pub const ENV_UPDATE_HISTORY: &str = "RIOUTER_UPDATE_HISTORY";

/// One route entry of a configuration file
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RouteConfig {
    /// Path template
    pub path: String,
    /// Per-route option overrides
    #[serde(default)]
    pub options: PatternOverrides,
}

/// Router-wide configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RouterConfig {
    /// Prefix stripped from pushed paths
    pub base_path: String,
    /// Mirror accepted paths into the navigation sink
    pub update_history: bool,
    /// Default options for every route
    pub pattern: PatternOptions,
    /// Routes registered by [`Router::from_config`](crate::router::Router::from_config)
    pub routes: Vec<RouteConfig>,
}

/// Error loading a [`RouterConfig`]
#[derive(Debug)]
pub enum ConfigError {
    /// The file could not be read
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    /// The YAML document is malformed
    Yaml(serde_yaml::Error),
    /// The JSON document is malformed
    Json(serde_json::Error),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io { path, source } => {
                write!(f, "Failed to read config '{}': {source}", path.display())
            }
            ConfigError::Yaml(err) => write!(f, "Invalid YAML config: {err}"),
            ConfigError::Json(err) => write!(f, "Invalid JSON config: {err}"),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Io { source, .. } => Some(source),
            ConfigError::Yaml(err) => Some(err),
            ConfigError::Json(err) => Some(err),
        }
    }
}

impl RouterConfig {
    /// Parse a YAML document
    ///
    /// # Errors
    ///
    /// [`ConfigError::Yaml`] if the document is malformed.
    pub fn from_yaml_str(content: &str) -> Result<Self, ConfigError> {
        serde_yaml::from_str(content).map_err(ConfigError::Yaml)
    }

    /// Parse a JSON document
    ///
    /// # Errors
    ///
    /// [`ConfigError::Json`] if the document is malformed.
    pub fn from_json_str(content: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(content).map_err(ConfigError::Json)
    }

    /// Load a configuration file; `.json` files are parsed as JSON, anything
    /// else as YAML
    ///
    /// # Errors
    ///
    /// IO and parse failures.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = if path.extension().and_then(|s| s.to_str()) == Some("json") {
            Self::from_json_str(&content)?
        } else {
            Self::from_yaml_str(&content)?
        };
        debug!(
            path = %path.display(),
            base_path = %config.base_path,
            routes = config.routes.len(),
            "Router config loaded"
        );
        Ok(config)
    }

    /// Defaults with environment overrides applied
    #[must_use]
    pub fn from_env() -> Self {
        let mut config = Self::default();
        config.apply_env();
        config
    }

    /// Override fields from the process environment
    pub fn apply_env(&mut self) {
        self.apply_env_from(|key| env::var(key).ok());
    }

    /// Override fields from `lookup`, which maps variable names to values
    pub fn apply_env_from(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(base_path) = lookup(ENV_BASE_PATH) {
            self.base_path = base_path;
        }
        if let Some(value) = lookup(ENV_UPDATE_HISTORY) {
            match parse_flag(&value) {
                Some(flag) => self.update_history = flag,
                None => warn!(
                    variable = ENV_UPDATE_HISTORY,
                    value = %value,
                    "Ignoring unrecognized boolean"
                ),
            }
        }
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" | "" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_yaml_config() {
        let yaml = r#"
base_path: /app
update_history: true
pattern:
  strict: true
routes:
  - path: /user/:id
  - path: /About
    options:
      sensitive: true
"#;
        let config = RouterConfig::from_yaml_str(yaml).unwrap();
        assert_eq!(config.base_path, "/app");
        assert!(config.update_history);
        assert!(config.pattern.strict);
        assert!(!config.pattern.sensitive);
        assert_eq!(config.pattern.delimiter(), "/#?");
        assert_eq!(config.routes.len(), 2);
        assert_eq!(config.routes[1].options.sensitive, Some(true));
        assert_eq!(config.routes[0].options.sensitive, None);
    }

    #[test]
    fn test_empty_document_is_default() {
        let config = RouterConfig::from_yaml_str("{}").unwrap();
        assert_eq!(config.base_path, "");
        assert!(!config.update_history);
        assert!(config.routes.is_empty());
    }

    #[test]
    fn test_invalid_yaml() {
        let err = RouterConfig::from_yaml_str("routes: [").unwrap_err();
        assert!(matches!(err, ConfigError::Yaml(_)));
        assert!(err.to_string().starts_with("Invalid YAML config"));
    }

    #[test]
    fn test_env_overrides() {
        let vars: HashMap<&str, &str> =
            [(ENV_BASE_PATH, "/base"), (ENV_UPDATE_HISTORY, "TRUE")].into();
        let mut config = RouterConfig::default();
        config.apply_env_from(|key| vars.get(key).map(|v| (*v).to_string()));
        assert_eq!(config.base_path, "/base");
        assert!(config.update_history);
    }

    #[test]
    fn test_env_invalid_flag_is_ignored() {
        let mut config = RouterConfig {
            update_history: true,
            ..RouterConfig::default()
        };
        config.apply_env_from(|key| (key == ENV_UPDATE_HISTORY).then(|| "maybe".to_string()));
        assert!(config.update_history);
    }
}
