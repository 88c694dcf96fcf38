//! Configuration for monit-collector

use crate::error::{DaemonError, DaemonResult};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::time::Duration;

/// Main daemon configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DaemonConfig {
    /// Server configuration
    #[serde(default)]
    pub server: ServerConfig,

    /// Collector endpoint and hand-off queue
    #[serde(default)]
    pub collector: CollectorConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Listen address
    #[serde(default = "default_listen_addr")]
    pub listen_addr: SocketAddr,

    /// Maximum request body size in bytes
    #[serde(default = "default_max_body_size")]
    pub max_body_size: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen_addr: default_listen_addr(),
            max_body_size: default_max_body_size(),
        }
    }
}

/// Collector configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CollectorConfig {
    /// Route the agent posts notifications to
    #[serde(default = "default_collector_path")]
    pub path: String,

    /// Documents that may wait for the consumer before publishers block
    #[serde(default = "default_queue_capacity")]
    pub queue_capacity: usize,

    /// How long a request may wait for a queue slot, in milliseconds
    #[serde(default = "default_publish_timeout")]
    pub publish_timeout_ms: u64,
}

impl Default for CollectorConfig {
    fn default() -> Self {
        Self {
            path: default_collector_path(),
            queue_capacity: default_queue_capacity(),
            publish_timeout_ms: default_publish_timeout(),
        }
    }
}

impl CollectorConfig {
    pub fn publish_timeout(&self) -> Duration {
        Duration::from_millis(self.publish_timeout_ms)
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level
    #[serde(default = "default_log_level")]
    pub level: String,

    /// JSON format
    #[serde(default)]
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}

// Default value helpers
fn default_listen_addr() -> SocketAddr {
    SocketAddr::from(([127, 0, 0, 1], 8080))
}

fn default_max_body_size() -> usize {
    1024 * 1024
}

fn default_collector_path() -> String {
    "/collector".to_string()
}

fn default_queue_capacity() -> usize {
    1
}

fn default_publish_timeout() -> u64 {
    5_000
}

fn default_log_level() -> String {
    "info".to_string()
}

impl DaemonConfig {
    /// Load configuration from file
    pub fn load(path: Option<&str>) -> Result<Self, config::ConfigError> {
        let mut builder = config::Config::builder();

        // Add default configuration
        builder = builder.add_source(config::Config::try_from(&DaemonConfig::default())?);

        // Add file configuration if provided
        if let Some(path) = path {
            builder = builder.add_source(config::File::with_name(path).required(false));
        }

        // Environment: MONIT_COLLECTOR_COLLECTOR__QUEUE_CAPACITY=4
        builder = builder.add_source(
            config::Environment::with_prefix("MONIT_COLLECTOR")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        builder.build()?.try_deserialize()
    }

    /// Reject settings the collector cannot run with
    pub fn validate(&self) -> DaemonResult<()> {
        if self.collector.queue_capacity == 0 {
            return Err(DaemonError::Config(
                "collector.queue_capacity must be at least 1".to_string(),
            ));
        }

        if !self.collector.path.starts_with('/') {
            return Err(DaemonError::Config(format!(
                "collector.path must start with '/': {:?}",
                self.collector.path
            )));
        }

        if self.server.max_body_size == 0 {
            return Err(DaemonError::Config(
                "server.max_body_size must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = DaemonConfig::default();
        assert_eq!(config.server.listen_addr.port(), 8080);
        assert_eq!(config.collector.path, "/collector");
        assert_eq!(config.collector.queue_capacity, 1);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_publish_timeout() {
        let config = CollectorConfig {
            publish_timeout_ms: 250,
            ..Default::default()
        };
        assert_eq!(config.publish_timeout(), Duration::from_millis(250));
    }

    #[test]
    fn test_zero_capacity_is_rejected() {
        let mut config = DaemonConfig::default();
        config.collector.queue_capacity = 0;
        assert!(matches!(config.validate(), Err(DaemonError::Config(_))));
    }

    #[test]
    fn test_relative_path_is_rejected() {
        let mut config = DaemonConfig::default();
        config.collector.path = "collector".to_string();
        assert!(matches!(config.validate(), Err(DaemonError::Config(_))));
        config.collector.path = String::new();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_load_without_file_uses_defaults() {
        let config = DaemonConfig::load(None).unwrap();
        assert_eq!(config.collector.publish_timeout_ms, 5_000);
        assert_eq!(config.logging.level, "info");
    }
}
