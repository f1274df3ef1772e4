//! Configuration for the forum

use reputation::ReputationConfig;
use serde::{Deserialize, Serialize};

/// Forum configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Service name (logging/metrics)
    pub service_name: String,

    /// Service version
    pub service_version: String,

    /// Engine actor mailbox capacity
    pub mailbox_capacity: usize,

    /// Reputation scoring weights
    pub reputation: ReputationConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            service_name: "forum-core".to_string(),
            service_version: env!("CARGO_PKG_VERSION").to_string(),
            mailbox_capacity: 1000,
            reputation: ReputationConfig::default(),
        }
    }
}

impl Config {
    /// Load from file
    pub fn from_file(path: impl AsRef<std::path::Path>) -> crate::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)
            .map_err(|e| crate::Error::Config(format!("Failed to parse config: {}", e)))?;
        Ok(config)
    }

    /// Load from environment variables
    pub fn from_env() -> crate::Result<Self> {
        let mut config = Config::default();

        if let Ok(name) = std::env::var("FORUM_SERVICE_NAME") {
            config.service_name = name;
        }

        if let Ok(capacity) = std::env::var("FORUM_MAILBOX_CAPACITY") {
            config.mailbox_capacity = capacity.parse().map_err(|_| {
                crate::Error::Config(format!("Invalid FORUM_MAILBOX_CAPACITY: {}", capacity))
            })?;
        }

        Ok(config)
    }

    /// Validate configuration invariants
    pub fn validate(&self) -> crate::Result<()> {
        if self.mailbox_capacity == 0 {
            return Err(crate::Error::Config(
                "mailbox_capacity must be nonzero".to_string(),
            ));
        }
        Ok(())
    }
}
