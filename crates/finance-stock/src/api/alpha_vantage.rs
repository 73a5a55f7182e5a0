//! Alpha Vantage API client
//!
//! A lookup combines the OVERVIEW and GLOBAL_QUOTE functions. Both calls go
//! through the same rate limiter.

use super::{LookupOutcome, TickerLookup};
use crate::error::{Result, StockError};
use crate::record::TickerRecord;
use async_trait::async_trait;
use governor::clock::DefaultClock;
use governor::state::{InMemoryState, NotKeyed};
use governor::{Quota, RateLimiter};
use reqwest::Client;
use serde_json::{Map, Value};
use std::num::NonZeroU32;
use std::sync::Arc;

const BASE_URL: &str = "https://www.alphavantage.co/query";
const PROVIDER: &str = "Alpha Vantage";

type SharedRateLimiter = Arc<RateLimiter<NotKeyed, InMemoryState, DefaultClock>>;

/// OVERVIEW keys and the record keys they feed
const OVERVIEW_KEYS: &[(&str, &str)] = &[
    ("Name", "longName"),
    ("Sector", "sector"),
    ("Industry", "industry"),
    ("Country", "country"),
    ("OfficialSite", "website"),
    ("FullTimeEmployees", "fullTimeEmployees"),
    ("Description", "longBusinessSummary"),
    ("MarketCapitalization", "marketCap"),
    ("PERatio", "trailingPE"),
    ("ForwardPE", "forwardPE"),
    ("PriceToBookRatio", "priceToBook"),
    ("PriceToSalesRatioTTM", "priceToSalesTrailing12Months"),
    ("PEGRatio", "pegRatio"),
    ("EVToRevenue", "enterpriseToRevenue"),
    ("EVToEBITDA", "enterpriseToEbitda"),
    ("BookValue", "bookValue"),
    ("RevenueTTM", "totalRevenue"),
    ("EBITDA", "ebitda"),
    ("ProfitMargin", "profitMargins"),
    ("OperatingMarginTTM", "operatingMargins"),
    ("ReturnOnEquityTTM", "returnOnEquity"),
    ("ReturnOnAssetsTTM", "returnOnAssets"),
    ("EPS", "trailingEps"),
    ("RevenuePerShareTTM", "revenuePerShare"),
    ("QuarterlyRevenueGrowthYOY", "revenueGrowth"),
    ("QuarterlyEarningsGrowthYOY", "earningsQuarterlyGrowth"),
    ("DividendPerShare", "dividendRate"),
    ("DividendYield", "dividendYield"),
    ("PayoutRatio", "payoutRatio"),
    ("ExDividendDate", "exDividendDate"),
    ("DividendDate", "lastDividendDate"),
    ("SharesOutstanding", "sharesOutstanding"),
    ("SharesFloat", "floatShares"),
    ("ShortRatio", "shortRatio"),
    ("ShortPercentFloat", "shortPercentOfFloat"),
    ("52WeekHigh", "fiftyTwoWeekHigh"),
    ("52WeekLow", "fiftyTwoWeekLow"),
    ("50DayMovingAverage", "fiftyDayAverage"),
    ("200DayMovingAverage", "twoHundredDayAverage"),
    ("Beta", "beta"),
    ("AnalystTargetPrice", "targetMeanPrice"),
];

/// GLOBAL_QUOTE keys and the record keys they feed
const QUOTE_KEYS: &[(&str, &str)] = &[
    ("05. price", "regularMarketPrice"),
    ("02. open", "regularMarketOpen"),
    ("03. high", "regularMarketDayHigh"),
    ("04. low", "regularMarketDayLow"),
    ("06. volume", "regularMarketVolume"),
    ("08. previous close", "regularMarketPreviousClose"),
];

/// Alpha Vantage API client
#[derive(Debug, Clone)]
pub struct AlphaVantageClient {
    client: Client,
    api_key: String,
    rate_limiter: SharedRateLimiter,
}

impl AlphaVantageClient {
    /// Create a client around a shared HTTP client
    ///
    /// # Arguments
    /// * `client` - HTTP client carrying timeout and User-Agent
    /// * `api_key` - Alpha Vantage API key
    /// * `rate_limit` - Maximum requests per minute (5 on the free tier)
    pub fn with_client(client: Client, api_key: impl Into<String>, rate_limit: u32) -> Self {
        let per_minute = NonZeroU32::new(rate_limit).unwrap_or(NonZeroU32::MIN.saturating_add(4));
        let rate_limiter = Arc::new(RateLimiter::direct(Quota::per_minute(per_minute)));

        Self {
            client,
            api_key: api_key.into(),
            rate_limiter,
        }
    }

    async fn query(&self, function: &str, symbol: &str) -> Result<Map<String, Value>> {
        self.rate_limiter.until_ready().await;

        let params = [
            ("function", function),
            ("symbol", symbol),
            ("apikey", self.api_key.as_str()),
        ];

        let response = self.client.get(BASE_URL).query(&params).send().await?;

        if !response.status().is_success() {
            return Err(StockError::AlphaVantageError(format!(
                "HTTP error: {}",
                response.status()
            )));
        }

        let data: Value = response.json().await?;
        check_response(data)
    }

    /// Fetch overview and quote for `ticker`
    ///
    /// `Ok(None)` means Alpha Vantage returned nothing for either call.
    pub async fn fetch(&self, ticker: &str) -> Result<Option<TickerRecord>> {
        tracing::debug!(ticker, "requesting OVERVIEW and GLOBAL_QUOTE");

        let overview = self.query("OVERVIEW", ticker).await?;
        let quote = self.query("GLOBAL_QUOTE", ticker).await?;

        let quote = quote
            .get("Global Quote")
            .and_then(Value::as_object)
            .cloned()
            .unwrap_or_default();

        if overview.is_empty() && quote.is_empty() {
            return Ok(None);
        }

        Ok(Some(merge(&overview, &quote)))
    }
}

#[async_trait]
impl TickerLookup for AlphaVantageClient {
    async fn lookup(&self, ticker: &str) -> LookupOutcome {
        LookupOutcome::from_result(self.fetch(ticker).await)
    }
}

/// Reject error and throttling payloads
fn check_response(data: Value) -> Result<Map<String, Value>> {
    let Value::Object(map) = data else {
        return Err(StockError::AlphaVantageError(
            "unexpected response shape".to_string(),
        ));
    };

    if let Some(error) = map.get("Error Message") {
        return Err(StockError::AlphaVantageError(
            error.as_str().map_or_else(|| error.to_string(), str::to_string),
        ));
    }

    if map.contains_key("Note") || map.contains_key("Information") {
        return Err(StockError::RateLimitExceeded {
            provider: PROVIDER.to_string(),
        });
    }

    Ok(map)
}

/// Translate overview and quote payloads into one record
pub fn merge(overview: &Map<String, Value>, quote: &Map<String, Value>) -> TickerRecord {
    let mut flat = Map::new();
    for (table, source) in [(OVERVIEW_KEYS, overview), (QUOTE_KEYS, quote)] {
        for (from, to) in table {
            if let Some(value) = source.get(*from) {
                flat.insert((*to).to_string(), value.clone());
            }
        }
    }
    TickerRecord::from_flat_map(&flat)
}
