//! Configuration management
//!
//! Startup configuration for the transfer server: network binding, the
//! resolved server root, and the dial-back retry policy. Loaded from an
//! optional `config.toml` with `FTSERVE_*` environment overrides; every
//! field has a default, so a bare port argument is enough to run.

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct ServerConfig {
    /// IP address to bind the control listener
    pub bind_address: String,

    /// Port for the control listener; the command-line argument wins
    pub port: u16,

    /// Directory served by listing and file requests
    pub server_root: String,

    /// Dial-back attempts before a session is abandoned
    pub dial_attempts: u32,

    /// Initial pause between dial attempts, doubled on each retry
    pub dial_backoff_ms: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0".to_string(),
            port: 0,
            server_root: ".".to_string(),
            dial_attempts: 5,
            dial_backoff_ms: 100,
        }
    }
}

impl ServerConfig {
    /// Load configuration, overriding the configured port with the one
    /// given on the command line.
    pub fn load(port: u16) -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::with_name("config").required(false))
            .add_source(Environment::with_prefix("FTSERVE"))
            .build()?;

        let mut config: ServerConfig = settings.try_deserialize()?;
        config.port = port;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.port == 0 {
            return Err(ConfigError::Message("Control port cannot be 0".into()));
        }

        if self.server_root.is_empty() {
            return Err(ConfigError::Message("server_root cannot be empty".into()));
        }

        if self.dial_attempts == 0 {
            return Err(ConfigError::Message(
                "dial_attempts must be greater than 0".into(),
            ));
        }

        Ok(())
    }

    /// Get bind address and control port as a socket address
    pub fn control_socket(&self) -> String {
        format!("{}:{}", self.bind_address, self.port)
    }

    /// Get server root as PathBuf
    pub fn server_root_path(&self) -> PathBuf {
        PathBuf::from(&self.server_root)
    }

    /// Get server root as string
    pub fn server_root_str(&self) -> String {
        self.server_root.clone()
    }

    /// Initial dial backoff as a Duration
    pub fn dial_backoff(&self) -> Duration {
        Duration::from_millis(self.dial_backoff_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ServerConfig::default();
        assert_eq!(config.bind_address, "0.0.0.0");
        assert_eq!(config.server_root, ".");
        assert_eq!(config.dial_attempts, 5);
        assert_eq!(config.dial_backoff(), Duration::from_millis(100));
    }

    #[test]
    fn test_control_socket_format() {
        let config = ServerConfig {
            bind_address: "127.0.0.1".to_string(),
            port: 3030,
            ..ServerConfig::default()
        };
        assert_eq!(config.control_socket(), "127.0.0.1:3030");
    }

    #[test]
    fn test_validate_rejects_port_zero() {
        let config = ServerConfig::default();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_empty_root() {
        let config = ServerConfig {
            port: 3030,
            server_root: String::new(),
            ..ServerConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_zero_attempts() {
        let config = ServerConfig {
            port: 3030,
            dial_attempts: 0,
            ..ServerConfig::default()
        };
        assert!(config.validate().is_err());
    }
}
