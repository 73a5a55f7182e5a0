//! Error types for stock data lookups

use thiserror::Error;

/// Stock data specific errors
#[derive(Debug, Error)]
pub enum StockError {
    /// Rate limit exceeded for API
    #[error("Rate limit exceeded for {provider}")]
    RateLimitExceeded { provider: String },

    /// Network or HTTP error
    #[error("Network error: {0}")]
    NetworkError(#[from] reqwest::Error),

    /// Yahoo Finance API error
    #[error("Yahoo Finance error: {0}")]
    YahooFinanceError(String),

    /// Alpha Vantage API error
    #[error("Alpha Vantage error: {0}")]
    AlphaVantageError(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(String),
}

/// Result type alias for stock operations
pub type Result<T> = std::result::Result<T, StockError>;

/// Convert StockError to a tool error
impl From<StockError> for finance_tools::ToolError {
    fn from(err: StockError) -> Self {
        finance_tools::ToolError::ExecutionFailed(err.to_string())
    }
}
