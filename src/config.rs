//! Configuration management for the person registry.
//!
//! Settings come from environment variables, optionally seeded from a `.env`
//! file in the working directory.

use crate::codec::{Separators, DEFAULT_HEADER};
use crate::error::{ConfigError, ConfigResult};
use std::env;
use std::path::PathBuf;

/// Configuration for the person registry shell.
#[derive(Debug, Clone)]
pub struct Config {
    /// File used by `load` and `save` when no path is typed (optional)
    pub registry_file: Option<PathBuf>,

    /// Header line used until a file is loaded (default: "Name:Number,Email")
    pub header: String,

    /// Log level (default: "info")
    pub log_level: String,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Optional environment variables:
    /// - `REGISTRY_FILE`: Default registry file path
    /// - `REGISTRY_HEADER`: Initial header line (default: "Name:Number,Email")
    /// - `LOG_LEVEL`: Logging level (default: "info")
    pub fn from_env() -> ConfigResult<Self> {
        // A missing .env file is fine
        let _ = dotenvy::dotenv();

        let registry_file = Self::parse_env_path("REGISTRY_FILE");

        let header = env::var("REGISTRY_HEADER").unwrap_or_else(|_| DEFAULT_HEADER.to_string());
        if let Err(e) = Separators::from_header(&header) {
            return Err(ConfigError::InvalidValue {
                var: "REGISTRY_HEADER".to_string(),
                reason: e.to_string(),
            });
        }

        let log_level = env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string());
        if log_level.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                var: "LOG_LEVEL".to_string(),
                reason: "Cannot be empty".to_string(),
            });
        }

        Ok(Config {
            registry_file,
            header: header.trim().to_string(),
            log_level,
        })
    }

    /// Separators declared by the configured header.
    pub fn separators(&self) -> ConfigResult<Separators> {
        Separators::from_header(&self.header).map_err(|e| ConfigError::InvalidValue {
            var: "REGISTRY_HEADER".to_string(),
            reason: e.to_string(),
        })
    }

    /// Read an environment variable as a path, treating blank values as unset.
    fn parse_env_path(var_name: &str) -> Option<PathBuf> {
        env::var(var_name)
            .ok()
            .map(|val| val.trim().to_string())
            .filter(|val| !val.is_empty())
            .map(PathBuf::from)
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            registry_file: None,
            header: DEFAULT_HEADER.to_string(),
            log_level: "info".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::env;

    // Helper to set and unset env vars for testing
    struct EnvGuard {
        vars: Vec<String>,
    }

    impl EnvGuard {
        fn new() -> Self {
            EnvGuard { vars: Vec::new() }
        }

        fn set(&mut self, key: &str, value: &str) {
            env::set_var(key, value);
            self.vars.push(key.to_string());
        }
    }

    impl Drop for EnvGuard {
        fn drop(&mut self) {
            for var in &self.vars {
                env::remove_var(var);
            }
        }
    }

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert!(config.registry_file.is_none());
        assert_eq!(config.header, "Name:Number,Email");
        assert_eq!(config.log_level, "info");
        assert_eq!(config.separators().unwrap(), Separators::default());
    }

    #[test]
    #[serial]
    fn test_config_from_env_valid() {
        let mut guard = EnvGuard::new();
        guard.set("REGISTRY_FILE", "  people.txt ");
        guard.set("REGISTRY_HEADER", "Name;Number|Email");
        guard.set("LOG_LEVEL", "debug");

        let config = Config::from_env().unwrap();
        assert_eq!(config.registry_file, Some(PathBuf::from("people.txt")));
        assert_eq!(config.header, "Name;Number|Email");
        assert_eq!(config.log_level, "debug");

        let separators = config.separators().unwrap();
        assert_eq!(separators.name_number(), ';');
        assert_eq!(separators.number_email(), '|');
    }

    #[test]
    #[serial]
    fn test_config_invalid_header() {
        let mut guard = EnvGuard::new();
        guard.set("REGISTRY_HEADER", "Number,Email");

        match Config::from_env() {
            Err(ConfigError::InvalidValue { var, .. }) => assert_eq!(var, "REGISTRY_HEADER"),
            other => panic!("Expected InvalidValue error, got: {:?}", other),
        }
    }

    #[test]
    #[serial]
    fn test_config_empty_log_level() {
        let mut guard = EnvGuard::new();
        guard.set("LOG_LEVEL", "  ");

        let result = Config::from_env();
        assert!(result.is_err());
        if let Err(ConfigError::InvalidValue { var, .. }) = result {
            assert_eq!(var, "LOG_LEVEL");
        }
    }

    #[test]
    #[serial]
    fn test_parse_env_path() {
        let mut guard = EnvGuard::new();
        guard.set("TEST_REGISTRY_PATH", "/tmp/registry.txt");
        guard.set("TEST_REGISTRY_BLANK", "   ");

        assert_eq!(
            Config::parse_env_path("TEST_REGISTRY_PATH"),
            Some(PathBuf::from("/tmp/registry.txt"))
        );
        assert_eq!(Config::parse_env_path("TEST_REGISTRY_BLANK"), None);
        assert_eq!(Config::parse_env_path("NONEXISTENT_REGISTRY_PATH"), None);
    }
}
