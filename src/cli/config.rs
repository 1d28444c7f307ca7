// Server Configuration Module
// Handles configuration from files and environment variables.

use crate::errors::FailureConfig;
use crate::generator::DEMO_HANDLE;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub simulator: SimulatorConfig,
    #[serde(default)]
    pub failures: FailuresConfig,
}

impl Config {
    /// Load configuration from a YAML file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content =
            std::fs::read_to_string(path.as_ref()).map_err(|e| ConfigError::Io(e.to_string()))?;
        Self::from_yaml(&content)
    }

    /// Parse configuration from YAML string
    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigError> {
        let config: Self =
            serde_yaml::from_str(yaml).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Reject settings the server cannot honor
    pub fn validate(&self) -> Result<(), ConfigError> {
        let rates = [
            ("user_not_found_rate", self.failures.user_not_found_rate),
            ("upstream_error_rate", self.failures.upstream_error_rate),
            ("empty_media_rate", self.failures.empty_media_rate),
        ];
        for (name, rate) in rates {
            if !(0.0..=1.0).contains(&rate) {
                return Err(ConfigError::Validation(format!(
                    "failures.{} must be within 0.0-1.0, got {}",
                    name, rate
                )));
            }
        }

        if self.simulator.demo_handle.trim().is_empty() {
            return Err(ConfigError::Validation(
                "simulator.demo_handle must not be empty".to_string(),
            ));
        }

        Ok(())
    }

    /// Apply command-line overrides; only values that were given replace
    /// what the file (or the defaults) set.
    pub fn apply_overrides(&mut self, overrides: Overrides) {
        if let Some(port) = overrides.port {
            self.server.port = port;
        }
        if let Some(host) = overrides.host {
            self.server.host = host;
        }
        if let Some(rate) = overrides.user_not_found_rate {
            self.failures.user_not_found_rate = rate;
        }
        if let Some(rate) = overrides.upstream_error_rate {
            self.failures.upstream_error_rate = rate;
        }
        if let Some(rate) = overrides.empty_media_rate {
            self.failures.empty_media_rate = rate;
        }
    }

    /// Create a failure config from the configuration
    pub fn failure_config(&self) -> FailureConfig {
        FailureConfig {
            user_not_found_rate: self.failures.user_not_found_rate,
            upstream_error_rate: self.failures.upstream_error_rate,
            empty_media_rate: self.failures.empty_media_rate,
        }
    }
}

/// Values given on the command line or through the environment
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub port: Option<u16>,
    pub host: Option<String>,
    pub user_not_found_rate: Option<f64>,
    pub upstream_error_rate: Option<f64>,
    pub empty_media_rate: Option<f64>,
}

/// Server network configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default = "default_host")]
    pub host: String,
}

fn default_port() -> u16 {
    8080
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: default_port(),
            host: default_host(),
        }
    }
}

/// Simulator configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulatorConfig {
    /// Handle used by `feedsim generate` when none is given
    #[serde(default = "default_demo_handle")]
    pub demo_handle: String,
}

fn default_demo_handle() -> String {
    DEMO_HANDLE.to_string()
}

impl Default for SimulatorConfig {
    fn default() -> Self {
        Self {
            demo_handle: default_demo_handle(),
        }
    }
}

/// Provider failure injection configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct FailuresConfig {
    /// Rate of 404 user-not-found answers (0.0-1.0)
    #[serde(default)]
    pub user_not_found_rate: f64,
    /// Rate of 500 provider errors (0.0-1.0)
    #[serde(default)]
    pub upstream_error_rate: f64,
    /// Rate of empty media answers (0.0-1.0)
    #[serde(default)]
    pub empty_media_rate: f64,
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read configuration file: {0}")]
    Io(String),
    #[error("Failed to parse configuration: {0}")]
    Parse(String),
    #[error("Invalid configuration: {0}")]
    Validation(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.simulator.demo_handle, "@avasummers");
        assert_eq!(config.failure_config(), FailureConfig::none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_parse_yaml() {
        let yaml = r#"
server:
  port: 9000
  host: "127.0.0.1"

simulator:
  demo_handle: "@jane_smith"

failures:
  upstream_error_rate: 0.25
"#;
        let config = Config::from_yaml(yaml).unwrap();
        assert_eq!(config.server.port, 9000);
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.simulator.demo_handle, "@jane_smith");
        assert_eq!(config.failures.upstream_error_rate, 0.25);
        assert_eq!(config.failures.empty_media_rate, 0.0);
    }

    #[test]
    fn test_failure_config() {
        let yaml = r#"
failures:
  user_not_found_rate: 0.1
  empty_media_rate: 0.05
"#;
        let config = Config::from_yaml(yaml).unwrap();
        let failures = config.failure_config();
        assert_eq!(failures.user_not_found_rate, 0.1);
        assert_eq!(failures.empty_media_rate, 0.05);
    }

    #[test]
    fn test_overrides_keep_file_values_when_absent() {
        let yaml = r#"
server:
  port: 9000
  host: "127.0.0.1"
failures:
  empty_media_rate: 0.2
"#;
        let mut config = Config::from_yaml(yaml).unwrap();
        config.apply_overrides(Overrides::default());
        assert_eq!(config.server.port, 9000);
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.failures.empty_media_rate, 0.2);
    }

    #[test]
    fn test_overrides_replace_given_values() {
        let yaml = r#"
server:
  port: 9000
  host: "127.0.0.1"
failures:
  upstream_error_rate: 0.5
"#;
        let mut config = Config::from_yaml(yaml).unwrap();
        config.apply_overrides(Overrides {
            port: Some(3000),
            user_not_found_rate: Some(0.1),
            empty_media_rate: Some(0.3),
            ..Default::default()
        });
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.failures.user_not_found_rate, 0.1);
        assert_eq!(config.failures.upstream_error_rate, 0.5);
        assert_eq!(config.failures.empty_media_rate, 0.3);
    }

    #[test]
    fn test_out_of_range_override_fails_validation() {
        let mut config = Config::default();
        config.apply_overrides(Overrides {
            user_not_found_rate: Some(2.0),
            ..Default::default()
        });
        assert!(matches!(config.validate(), Err(ConfigError::Validation(_))));
    }

    #[test]
    fn test_rejects_out_of_range_rate() {
        let yaml = r#"
failures:
  upstream_error_rate: 1.5
"#;
        let err = Config::from_yaml(yaml).unwrap_err();
        assert!(matches!(err, ConfigError::Validation(_)));
    }

    #[test]
    fn test_rejects_empty_demo_handle() {
        let yaml = r#"
simulator:
  demo_handle: "  "
"#;
        assert!(matches!(
            Config::from_yaml(yaml),
            Err(ConfigError::Validation(_))
        ));
    }

    #[test]
    fn test_malformed_yaml() {
        assert!(matches!(
            Config::from_yaml("server: [1, 2"),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_missing_file() {
        assert!(matches!(
            Config::from_file("/nonexistent/feedsim.yaml"),
            Err(ConfigError::Io(_))
        ));
    }
}
