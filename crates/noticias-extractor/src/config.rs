//! Configuration for ingestion runs

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Listing page scraped when no URL is given
pub const DEFAULT_URL: &str = "https://g1.globo.com/";

/// Identifying header sent with every fetch
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36";

/// Configuration for the IngestionRunner and HttpFetcher
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct IngestConfig {
    /// URL scraped when the caller does not pass one
    pub default_url: String,

    /// Value of the User-Agent header
    pub user_agent: String,

    /// Maximum time for the page fetch (seconds)
    pub timeout_secs: u64,

    /// Label stamped into `source` on every ingested article
    pub source_label: String,
}

impl IngestConfig {
    /// Get the fetch timeout as a Duration
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.timeout_secs == 0 {
            return Err("timeout_secs must be greater than 0".to_string());
        }
        if self.user_agent.trim().is_empty() {
            return Err("user_agent must not be empty".to_string());
        }
        if self.source_label.trim().is_empty() {
            return Err("source_label must not be empty".to_string());
        }
        if url::Url::parse(&self.default_url).is_err() {
            return Err(format!("default_url is not an absolute URL: {}", self.default_url));
        }
        Ok(())
    }
}

impl Default for IngestConfig {
    fn default() -> Self {
        Self {
            default_url: DEFAULT_URL.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout_secs: 10,
            source_label: noticias_domain::fields::DEFAULT_SOURCE.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = IngestConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.timeout(), Duration::from_secs(10));
        assert_eq!(config.source_label, "G1");
    }

    #[test]
    fn test_zero_timeout_rejected() {
        let mut config = IngestConfig::default();
        config.timeout_secs = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_relative_default_url_rejected() {
        let mut config = IngestConfig::default();
        config.default_url = "/noticias".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config: IngestConfig = toml::from_str(r#"source_label = "Folha""#).unwrap();
        assert_eq!(config.source_label, "Folha");
        assert_eq!(config.timeout_secs, 10);
        assert_eq!(config.default_url, DEFAULT_URL);
    }

    #[test]
    fn test_toml_round_trip() {
        let config = IngestConfig::default();
        let toml_str = toml::to_string_pretty(&config).unwrap();
        let parsed: IngestConfig = toml::from_str(&toml_str).unwrap();

        assert_eq!(config.user_agent, parsed.user_agent);
        assert_eq!(config.timeout_secs, parsed.timeout_secs);
    }
}
