//! Configuration loading.

use anyhow::{Context, Result};
use figment::providers::{Env, Format, Serialized, Yaml};
use figment::Figment;
use thiserror::Error;

use crate::domain::models::Config;
use crate::services::Dialect;

/// Configuration error types.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Unknown dialect: {0}. Must be one of: useradd, solaris")]
    UnknownDialect(String),

    #[error("Invalid executor timeout: {0}. Must be positive")]
    InvalidTimeout(u64),

    #[error("Invalid log level: {0}. Must be one of: trace, debug, info, warn, error")]
    InvalidLogLevel(String),

    #[error("Invalid log format: {0}. Must be one of: json, pretty")]
    InvalidLogFormat(String),

    #[error("Passwd database path cannot be empty")]
    EmptyPasswdPath,
}

/// Configuration loader with hierarchical merging.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration with hierarchical merging.
    ///
    /// Precedence (lowest to highest):
    /// 1. Programmatic defaults
    /// 2. `/etc/accord/config.yaml` (system config)
    /// 3. `accord.yaml` in the working directory
    /// 4. Environment variables (`ACCORD_` prefix, highest priority)
    ///
    /// # Errors
    ///
    /// Fails when a config source cannot be parsed or the merged result does
    /// not validate.
    pub fn load() -> Result<Config> {
        let config: Config = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Yaml::file("/etc/accord/config.yaml"))
            .merge(Yaml::file("accord.yaml"))
            .merge(Env::prefixed("ACCORD_").split("__"))
            .extract()
            .context("Failed to extract configuration from figment")?;

        Self::validate(&config)?;
        Ok(config)
    }

    /// Load configuration from a specific file.
    ///
    /// # Errors
    ///
    /// Fails when the file cannot be parsed or does not validate.
    pub fn load_from_file(path: impl AsRef<std::path::Path>) -> Result<Config> {
        let config: Config = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Yaml::file(path.as_ref()))
            .extract()
            .context(format!(
                "Failed to load config from {}",
                path.as_ref().display()
            ))?;

        Self::validate(&config)?;
        Ok(config)
    }

    /// Validate configuration after loading.
    ///
    /// # Errors
    ///
    /// Returns the first [`ConfigError`] found.
    pub fn validate(config: &Config) -> Result<(), ConfigError> {
        if Dialect::by_name(&config.dialect).is_none() {
            return Err(ConfigError::UnknownDialect(config.dialect.clone()));
        }

        if config.executor.timeout_secs == 0 {
            return Err(ConfigError::InvalidTimeout(config.executor.timeout_secs));
        }

        if config.lookup.passwd_path.is_empty() {
            return Err(ConfigError::EmptyPasswdPath);
        }

        let valid_log_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_log_levels.contains(&config.logging.level.as_str()) {
            return Err(ConfigError::InvalidLogLevel(config.logging.level.clone()));
        }

        let valid_log_formats = ["json", "pretty"];
        if !valid_log_formats.contains(&config.logging.format.as_str()) {
            return Err(ConfigError::InvalidLogFormat(config.logging.format.clone()));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::{ExecutorConfig, LoggingConfig, LookupConfig};

    #[test]
    fn test_default_config_is_valid() {
        let config = Config::default();
        ConfigLoader::validate(&config).expect("default config should be valid");
    }

    #[test]
    fn test_validate_unknown_dialect() {
        let config = Config {
            dialect: "plan9".to_string(),
            ..Config::default()
        };
        assert!(matches!(
            ConfigLoader::validate(&config).unwrap_err(),
            ConfigError::UnknownDialect(_)
        ));
    }

    #[test]
    fn test_validate_zero_timeout() {
        let config = Config {
            executor: ExecutorConfig { timeout_secs: 0 },
            ..Config::default()
        };
        assert!(matches!(
            ConfigLoader::validate(&config).unwrap_err(),
            ConfigError::InvalidTimeout(0)
        ));
    }

    #[test]
    fn test_validate_invalid_log_level() {
        let config = Config {
            logging: LoggingConfig {
                level: "loud".to_string(),
                ..LoggingConfig::default()
            },
            ..Config::default()
        };
        assert!(matches!(
            ConfigLoader::validate(&config).unwrap_err(),
            ConfigError::InvalidLogLevel(_)
        ));
    }

    #[test]
    fn test_validate_empty_passwd_path() {
        let config = Config {
            lookup: LookupConfig {
                passwd_path: String::new(),
                ..LookupConfig::default()
            },
            ..Config::default()
        };
        assert!(matches!(
            ConfigLoader::validate(&config).unwrap_err(),
            ConfigError::EmptyPasswdPath
        ));
    }

    #[test]
    fn test_load_from_file_merges_defaults() {
        use std::io::Write;
        use tempfile::NamedTempFile;

        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "dialect: solaris\nexecutor:\n  timeout_secs: 5").unwrap();
        file.flush().unwrap();

        let config = ConfigLoader::load_from_file(file.path()).unwrap();
        assert_eq!(config.dialect, "solaris");
        assert_eq!(config.executor.timeout_secs, 5);
        assert_eq!(config.logging.level, "info", "default should persist");
    }
}
