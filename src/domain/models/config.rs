//! Crate configuration model.

use serde::{Deserialize, Serialize};

/// Top-level configuration for the accord binary.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Command dialect to use: `useradd` or `solaris`.
    pub dialect: String,

    /// Observed-state source configuration.
    pub lookup: LookupConfig,

    /// External command executor configuration.
    pub executor: ExecutorConfig,

    /// Logging configuration.
    pub logging: LoggingConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            dialect: "useradd".to_string(),
            lookup: LookupConfig::default(),
            executor: ExecutorConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

/// Where observed account state is read from.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LookupConfig {
    /// Path to the passwd-format account database.
    pub passwd_path: String,

    /// Optional path to the shadow-format password database. When unset,
    /// observed specs carry no password hash.
    pub shadow_path: Option<String>,
}

impl Default for LookupConfig {
    fn default() -> Self {
        Self {
            passwd_path: "/etc/passwd".to_string(),
            shadow_path: Some("/etc/shadow".to_string()),
        }
    }
}

/// External command executor configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExecutorConfig {
    /// Maximum seconds to wait for one external command.
    pub timeout_secs: u64,
}

impl Default for ExecutorConfig {
    fn default() -> Self {
        Self { timeout_secs: 60 }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level: trace, debug, info, warn, error.
    pub level: String,

    /// Log format: json or pretty.
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_values() {
        let config = Config::default();
        assert_eq!(config.dialect, "useradd");
        assert_eq!(config.lookup.passwd_path, "/etc/passwd");
        assert_eq!(config.executor.timeout_secs, 60);
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.logging.format, "pretty");
    }

    #[test]
    fn test_partial_yaml_fills_defaults() {
        let yaml = r"
dialect: solaris
executor:
  timeout_secs: 10
";
        let config: Config = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.dialect, "solaris");
        assert_eq!(config.executor.timeout_secs, 10);
        assert_eq!(config.logging.level, "info");
    }
}
