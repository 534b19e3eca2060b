use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use super::daemon::DaemonConfig;
use super::errors::ConfigError;
use super::logging::LoggingConfig;
use super::policy::PolicyConfig;

/// Main configuration structure for dnsguard
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct Config {
    /// Classification daemon endpoint and timeouts
    #[serde(default)]
    pub daemon: DaemonConfig,

    /// Policy directory, fallback block addresses and reload behaviour
    #[serde(default)]
    pub policy: PolicyConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from file or use defaults
    ///
    /// Priority order:
    /// 1. Explicitly provided path
    /// 2. dnsguard.toml in current directory
    /// 3. /etc/dnsguard/config.toml
    /// 4. Default configuration
    pub fn load(path: Option<&str>, cli_overrides: CliOverrides) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = path {
            Self::from_file(path)?
        } else if std::path::Path::new("dnsguard.toml").exists() {
            Self::from_file("dnsguard.toml")?
        } else if std::path::Path::new("/etc/dnsguard/config.toml").exists() {
            Self::from_file("/etc/dnsguard/config.toml")?
        } else {
            Self::default()
        };

        config.apply_cli_overrides(cli_overrides);
        config.validate()?;
        Ok(config)
    }

    fn from_file(path: &str) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::FileRead(path.to_string(), e.to_string()))?;
        Self::from_toml(&contents)
    }

    pub fn from_toml(contents: &str) -> Result<Self, ConfigError> {
        toml::from_str(contents).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    fn apply_cli_overrides(&mut self, overrides: CliOverrides) {
        if let Some(address) = overrides.daemon_address {
            self.daemon.address = address;
        }
        if let Some(port) = overrides.daemon_port {
            self.daemon.port = port;
        }
        if let Some(root) = overrides.policy_root {
            self.policy.config_root = root;
        }
        if let Some(level) = overrides.log_level {
            self.logging.level = level;
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.daemon.address.trim().is_empty() {
            return Err(ConfigError::Validation(
                "Daemon address cannot be empty".to_string(),
            ));
        }

        if self.daemon.port == 0 {
            return Err(ConfigError::Validation("Daemon port cannot be 0".to_string()));
        }

        if self.daemon.connect_timeout_ms == 0 || self.daemon.read_timeout_ms == 0 {
            return Err(ConfigError::Validation(
                "Daemon timeouts must be greater than 0".to_string(),
            ));
        }

        if self.daemon.max_response_bytes == 0 {
            return Err(ConfigError::Validation(
                "Daemon max_response_bytes must be greater than 0".to_string(),
            ));
        }

        if self.policy.config_root.as_os_str().is_empty() {
            return Err(ConfigError::Validation(
                "Policy config_root cannot be empty".to_string(),
            ));
        }

        if self.policy.block_ipv4_addr().is_none() {
            return Err(ConfigError::Validation(format!(
                "block_ipv4 '{}' is not an IPv4 address",
                self.policy.block_ipv4
            )));
        }

        if self.policy.block_ipv6_addr().is_none() {
            return Err(ConfigError::Validation(format!(
                "block_ipv6 '{}' is not an IPv6 address",
                self.policy.block_ipv6
            )));
        }

        Ok(())
    }
}

/// Command-line overrides for configuration
#[derive(Debug, Default)]
pub struct CliOverrides {
    pub daemon_address: Option<String>,
    pub daemon_port: Option<u16>,
    pub policy_root: Option<PathBuf>,
    pub log_level: Option<String>,
}
