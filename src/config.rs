use crate::error::ConfigError;

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::Deserialize;

pub const DEFAULT_OVERRIDE_HEADER: &str = "X-HTTP-Method-Override";

/// Settings the dispatcher and its handlers read. Immutable once the
/// dispatcher is built.
///
/// ```toml
/// base_path = "/app"
/// strict_not_found = false
///
/// [settings]
/// views = "/srv/views"
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Stripped from request paths before matching.
    pub base_path: String,
    pub method_override_header: String,
    /// Whether a response from before-middleware preempts the route.
    pub before_short_circuit: bool,
    /// Whether an unmatched request without a not-found fallback is a
    /// failure instead of a bare 404.
    pub strict_not_found: bool,
    /// Free-form application settings.
    pub settings: BTreeMap<String, toml::Value>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_path: String::new(),
            method_override_header: DEFAULT_OVERRIDE_HEADER.to_owned(),
            before_short_circuit: true,
            strict_not_found: false,
            settings: BTreeMap::new(),
        }
    }
}

impl Config {
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.base_path.is_empty() && !self.base_path.starts_with('/') {
            return Err(ConfigError::Invalid("base_path must start with '/'"));
        }
        if http::HeaderName::from_bytes(self.method_override_header.as_bytes()).is_err() {
            return Err(ConfigError::Invalid("method_override_header is not a valid header name"));
        }
        Ok(())
    }

    pub fn setting(&self, key: &str) -> Option<&toml::Value> {
        self.settings.get(key)
    }

    pub(crate) fn base_path(&self) -> &str {
        self.base_path.trim_end_matches('/')
    }
}
