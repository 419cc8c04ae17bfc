//! Server configuration from environment variables.
//!
//! Every setting has a default so the server starts with no environment at
//! all. `PORT` keeps its bare name for compatibility with hosting platforms.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {key}: {value:?}")]
    Invalid { key: &'static str, value: String },

    #[error("port must be non-zero")]
    ZeroPort,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub host: String,
    pub port: u16,
    /// Directory holding the compiled browser bundle, served under `/pkg`.
    pub assets_dir: PathBuf,
    /// `tracing-subscriber` filter directive.
    pub log_filter: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 3000,
            assets_dir: PathBuf::from("web/pkg"),
            log_filter: "info".to_string(),
        }
    }
}

impl Config {
    /// # Errors
    ///
    /// Returns an error if `PORT` is not a non-zero `u16`.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();
        if let Some(host) = lookup("TODO_HOST") {
            config.host = host;
        }
        if let Some(port) = lookup("PORT") {
            config.port = port.parse().map_err(|_| ConfigError::Invalid {
                key: "PORT",
                value: port.clone(),
            })?;
        }
        if let Some(dir) = lookup("TODO_ASSETS_DIR") {
            config.assets_dir = PathBuf::from(dir);
        }
        if let Some(filter) = lookup("RUST_LOG") {
            config.log_filter = filter;
        }
        if config.port == 0 {
            return Err(ConfigError::ZeroPort);
        }
        Ok(config)
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_without_environment() {
        let config = Config::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.bind_addr(), "127.0.0.1:3000");
    }

    #[test]
    fn environment_overrides_defaults() {
        let config = Config::from_lookup(lookup(&[
            ("TODO_HOST", "0.0.0.0"),
            ("PORT", "5000"),
            ("TODO_ASSETS_DIR", "/srv/pkg"),
            ("RUST_LOG", "debug"),
        ]))
        .unwrap();
        assert_eq!(config.bind_addr(), "0.0.0.0:5000");
        assert_eq!(config.assets_dir, PathBuf::from("/srv/pkg"));
        assert_eq!(config.log_filter, "debug");
    }

    #[test]
    fn rejects_bad_ports() {
        let err = Config::from_lookup(lookup(&[("PORT", "http")])).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { key: "PORT", .. }));

        let err = Config::from_lookup(lookup(&[("PORT", "0")])).unwrap_err();
        assert!(matches!(err, ConfigError::ZeroPort));
    }
}
