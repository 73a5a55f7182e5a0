//! Data provider clients
//!
//! Every provider answers one question: what does it know about a ticker
//! right now. There is no caching and no retry; each lookup is a fresh
//! round trip.

pub mod alpha_vantage;
pub mod yahoo;

pub use alpha_vantage::AlphaVantageClient;
pub use yahoo::YahooFinanceClient;

use crate::config::{DataProvider, StockConfig};
use crate::error::{Result, StockError};
use crate::record::TickerRecord;
use async_trait::async_trait;
use reqwest::Client;
use std::sync::Arc;

/// Result of a single ticker lookup
#[derive(Debug)]
pub enum LookupOutcome {
    /// Provider returned data for the ticker
    Found(TickerRecord),
    /// Provider does not know the ticker
    NotFound,
    /// Lookup could not be completed
    Failed(StockError),
}

impl LookupOutcome {
    /// Collapse a provider result, treating an empty record as unknown
    pub fn from_result(result: Result<Option<TickerRecord>>) -> Self {
        match result {
            Ok(Some(record)) if !record.is_empty() => Self::Found(record),
            Ok(_) => Self::NotFound,
            Err(e) => Self::Failed(e),
        }
    }
}

/// Source of ticker records
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TickerLookup: Send + Sync {
    /// Fetch everything the provider has for `ticker`
    async fn lookup(&self, ticker: &str) -> LookupOutcome;
}

/// Shared HTTP client with the configured timeout and agent
pub fn http_client(config: &StockConfig) -> Result<Client> {
    Client::builder()
        .timeout(config.request_timeout)
        .user_agent(config.user_agent.as_str())
        .build()
        .map_err(StockError::from)
}

/// Build the lookup for the configured provider
pub fn provider_from_config(config: &StockConfig) -> Result<Arc<dyn TickerLookup>> {
    config.validate()?;
    let client = http_client(config)?;

    match config.provider {
        DataProvider::Yahoo => Ok(Arc::new(YahooFinanceClient::with_client(client))),
        DataProvider::AlphaVantage => {
            let api_key = config.alpha_vantage_api_key.clone().ok_or_else(|| {
                StockError::ConfigError("ALPHA_VANTAGE_API_KEY is not set".to_string())
            })?;
            Ok(Arc::new(AlphaVantageClient::with_client(
                client,
                api_key,
                config.alpha_vantage_rate_limit,
            )))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outcome_from_result() {
        let record = TickerRecord {
            market_cap: Some(1.0),
            ..Default::default()
        };
        assert!(matches!(
            LookupOutcome::from_result(Ok(Some(record))),
            LookupOutcome::Found(_)
        ));
        assert!(matches!(
            LookupOutcome::from_result(Ok(Some(TickerRecord::default()))),
            LookupOutcome::NotFound
        ));
        assert!(matches!(
            LookupOutcome::from_result(Ok(None)),
            LookupOutcome::NotFound
        ));
        assert!(matches!(
            LookupOutcome::from_result(Err(StockError::YahooFinanceError("boom".into()))),
            LookupOutcome::Failed(_)
        ));
    }

    #[test]
    fn test_provider_from_config() {
        let config = StockConfig::default();
        assert!(provider_from_config(&config).is_ok());

        let config = StockConfig {
            provider: DataProvider::AlphaVantage,
            alpha_vantage_api_key: None,
            ..Default::default()
        };
        assert!(provider_from_config(&config).is_err());

        let config = StockConfig {
            provider: DataProvider::AlphaVantage,
            alpha_vantage_api_key: Some("demo".to_string()),
            ..Default::default()
        };
        assert!(provider_from_config(&config).is_ok());
    }
}
