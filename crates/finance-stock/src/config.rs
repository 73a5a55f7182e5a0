//! Configuration for stock data lookups

use crate::error::{Result, StockError};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use std::time::Duration;

/// Browser-like agent; Yahoo rejects requests without one
pub const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0 Safari/537.36";

/// Data provider for stock information
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DataProvider {
    /// Yahoo Finance (default, no API key required)
    #[default]
    Yahoo,
    /// Alpha Vantage (requires API key)
    AlphaVantage,
}

impl FromStr for DataProvider {
    type Err = StockError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "yahoo" | "yahoo-finance" => Ok(Self::Yahoo),
            "alpha-vantage" | "alpha_vantage" | "alphavantage" => Ok(Self::AlphaVantage),
            other => Err(StockError::ConfigError(format!(
                "unknown data provider '{other}', expected yahoo or alpha-vantage"
            ))),
        }
    }
}

/// Configuration for stock data lookups
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StockConfig {
    /// Data provider to query
    pub provider: DataProvider,

    /// Request timeout duration
    pub request_timeout: Duration,

    /// User-Agent header sent to providers
    pub user_agent: String,

    /// Alpha Vantage API key (optional)
    pub alpha_vantage_api_key: Option<String>,

    /// Alpha Vantage requests per minute
    pub alpha_vantage_rate_limit: u32,
}

impl Default for StockConfig {
    fn default() -> Self {
        Self {
            provider: DataProvider::Yahoo,
            request_timeout: Duration::from_secs(30),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            alpha_vantage_api_key: None,
            alpha_vantage_rate_limit: 5, // free tier
        }
    }
}

impl StockConfig {
    /// Create a new configuration builder
    pub fn builder() -> StockConfigBuilder {
        StockConfigBuilder::default()
    }

    /// Defaults overridden by `FINANCE_DATA_PROVIDER`,
    /// `FINANCE_REQUEST_TIMEOUT_SECS` and `ALPHA_VANTAGE_API_KEY`
    pub fn from_env() -> Result<Self> {
        Self::builder().with_env().build()
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.provider == DataProvider::AlphaVantage && self.alpha_vantage_api_key.is_none() {
            return Err(StockError::ConfigError(
                "Alpha Vantage API key required when using AlphaVantage provider".to_string(),
            ));
        }

        if self.request_timeout.is_zero() {
            return Err(StockError::ConfigError(
                "request_timeout must be greater than 0".to_string(),
            ));
        }

        if self.alpha_vantage_rate_limit == 0 {
            return Err(StockError::ConfigError(
                "alpha_vantage_rate_limit must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }
}

/// Builder for StockConfig
#[derive(Debug, Default)]
pub struct StockConfigBuilder {
    provider: Option<DataProvider>,
    request_timeout: Option<Duration>,
    user_agent: Option<String>,
    alpha_vantage_api_key: Option<String>,
    alpha_vantage_rate_limit: Option<u32>,
    env_error: Option<StockError>,
}

impl StockConfigBuilder {
    /// Set the data provider
    pub fn provider(mut self, provider: DataProvider) -> Self {
        self.provider = Some(provider);
        self
    }

    /// Set request timeout
    pub fn request_timeout(mut self, duration: Duration) -> Self {
        self.request_timeout = Some(duration);
        self
    }

    /// Set the User-Agent header
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Set Alpha Vantage API key
    pub fn alpha_vantage_api_key(mut self, key: impl Into<String>) -> Self {
        self.alpha_vantage_api_key = Some(key.into());
        self
    }

    /// Set Alpha Vantage requests per minute
    pub fn alpha_vantage_rate_limit(mut self, per_minute: u32) -> Self {
        self.alpha_vantage_rate_limit = Some(per_minute);
        self
    }

    /// Fill unset values from the environment
    ///
    /// Values already set on the builder win. A malformed variable is
    /// reported by [`build`](Self::build).
    pub fn with_env(mut self) -> Self {
        if self.provider.is_none() {
            if let Ok(raw) = std::env::var("FINANCE_DATA_PROVIDER") {
                match raw.parse() {
                    Ok(provider) => self.provider = Some(provider),
                    Err(e) => self.env_error = Some(e),
                }
            }
        }

        if self.request_timeout.is_none() {
            if let Ok(raw) = std::env::var("FINANCE_REQUEST_TIMEOUT_SECS") {
                match raw.trim().parse::<u64>() {
                    Ok(secs) => self.request_timeout = Some(Duration::from_secs(secs)),
                    Err(e) => {
                        self.env_error = Some(StockError::ConfigError(format!(
                            "FINANCE_REQUEST_TIMEOUT_SECS: {e}"
                        )));
                    }
                }
            }
        }

        if self.alpha_vantage_api_key.is_none() {
            if let Ok(key) = std::env::var("ALPHA_VANTAGE_API_KEY") {
                if !key.trim().is_empty() {
                    self.alpha_vantage_api_key = Some(key);
                }
            }
        }

        self
    }

    /// Build the configuration
    pub fn build(self) -> Result<StockConfig> {
        if let Some(err) = self.env_error {
            return Err(err);
        }

        let defaults = StockConfig::default();

        let config = StockConfig {
            provider: self.provider.unwrap_or(defaults.provider),
            request_timeout: self.request_timeout.unwrap_or(defaults.request_timeout),
            user_agent: self.user_agent.unwrap_or(defaults.user_agent),
            alpha_vantage_api_key: self.alpha_vantage_api_key,
            alpha_vantage_rate_limit: self
                .alpha_vantage_rate_limit
                .unwrap_or(defaults.alpha_vantage_rate_limit),
        };

        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = StockConfig::default();
        assert_eq!(config.provider, DataProvider::Yahoo);
        assert_eq!(config.request_timeout, Duration::from_secs(30));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_builder() {
        let config = StockConfig::builder()
            .provider(DataProvider::Yahoo)
            .request_timeout(Duration::from_secs(60))
            .user_agent("test-agent")
            .build()
            .unwrap();

        assert_eq!(config.request_timeout, Duration::from_secs(60));
        assert_eq!(config.user_agent, "test-agent");
    }

    #[test]
    fn test_validation_alpha_vantage_no_key() {
        let config = StockConfig {
            provider: DataProvider::AlphaVantage,
            alpha_vantage_api_key: None,
            ..Default::default()
        };

        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_alpha_vantage_with_key() {
        let config = StockConfig::builder()
            .provider(DataProvider::AlphaVantage)
            .alpha_vantage_api_key("test_key")
            .build()
            .unwrap();

        assert_eq!(config.alpha_vantage_api_key.as_deref(), Some("test_key"));
    }

    #[test]
    fn test_validation_zero_timeout() {
        let result = StockConfig::builder()
            .request_timeout(Duration::ZERO)
            .build();
        assert!(result.is_err());
    }

    #[test]
    fn test_provider_parse() {
        assert_eq!("yahoo".parse::<DataProvider>().unwrap(), DataProvider::Yahoo);
        assert_eq!(
            "Alpha-Vantage".parse::<DataProvider>().unwrap(),
            DataProvider::AlphaVantage
        );
        assert!("bloomberg".parse::<DataProvider>().is_err());
    }
}
