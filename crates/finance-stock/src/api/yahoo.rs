//! Yahoo Finance quoteSummary client
//!
//! Yahoo requires a session cookie and a matching crumb on quoteSummary
//! requests. Both are fetched fresh for every lookup.

use super::{LookupOutcome, TickerLookup};
use crate::error::{Result, StockError};
use crate::record::TickerRecord;
use async_trait::async_trait;
use reqwest::header::{COOKIE, SET_COOKIE};
use reqwest::{Client, StatusCode};
use serde_json::{Map, Value};
use url::Url;

const COOKIE_URL: &str = "https://fc.yahoo.com";
const CRUMB_URL: &str = "https://query1.finance.yahoo.com/v1/test/getcrumb";
const QUOTE_SUMMARY_URL: &str = "https://query2.finance.yahoo.com/v10/finance/quoteSummary/";

/// quoteSummary modules merged into one record, earlier modules win on
/// duplicate keys
pub const MODULES: &[&str] = &[
    "price",
    "summaryDetail",
    "defaultKeyStatistics",
    "financialData",
    "assetProfile",
    "calendarEvents",
];

/// Yahoo Finance API client
#[derive(Debug, Clone)]
pub struct YahooFinanceClient {
    client: Client,
}

impl YahooFinanceClient {
    /// Create a client around an existing HTTP client
    pub fn with_client(client: Client) -> Self {
        Self { client }
    }

    async fn session(&self) -> Result<(String, String)> {
        let response = self.client.get(COOKIE_URL).send().await?;
        let cookie = response
            .headers()
            .get_all(SET_COOKIE)
            .iter()
            .filter_map(|v| v.to_str().ok())
            .filter_map(|v| v.split(';').next())
            .collect::<Vec<_>>()
            .join("; ");

        if cookie.is_empty() {
            return Err(StockError::YahooFinanceError(
                "no session cookie returned".to_string(),
            ));
        }

        let response = self
            .client
            .get(CRUMB_URL)
            .header(COOKIE, &cookie)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(StockError::YahooFinanceError(format!(
                "crumb request failed: {}",
                response.status()
            )));
        }

        let crumb = response.text().await?.trim().to_string();
        if crumb.is_empty() || crumb.contains('<') {
            return Err(StockError::YahooFinanceError(
                "invalid crumb returned".to_string(),
            ));
        }

        Ok((cookie, crumb))
    }

    /// Fetch and merge the quoteSummary modules for `ticker`
    ///
    /// `Ok(None)` means Yahoo does not know the ticker.
    pub async fn fetch(&self, ticker: &str) -> Result<Option<TickerRecord>> {
        let (cookie, crumb) = self.session().await?;
        let url = quote_summary_url(ticker, &crumb)?;

        tracing::debug!(ticker, "requesting quoteSummary");

        let response = self
            .client
            .get(url)
            .header(COOKIE, cookie)
            .send()
            .await?;

        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }

        if !response.status().is_success() {
            return Err(StockError::YahooFinanceError(format!(
                "HTTP error: {}",
                response.status()
            )));
        }

        let body: Value = response.json().await?;
        parse_quote_summary(&body)
    }
}

#[async_trait]
impl TickerLookup for YahooFinanceClient {
    async fn lookup(&self, ticker: &str) -> LookupOutcome {
        LookupOutcome::from_result(self.fetch(ticker).await)
    }
}

fn quote_summary_url(ticker: &str, crumb: &str) -> Result<Url> {
    let mut url = Url::parse(QUOTE_SUMMARY_URL)
        .map_err(|e| StockError::YahooFinanceError(e.to_string()))?;
    url.path_segments_mut()
        .map_err(|()| StockError::YahooFinanceError("invalid base url".to_string()))?
        .pop_if_empty()
        .push(ticker);
    url.query_pairs_mut()
        .append_pair("modules", &MODULES.join(","))
        .append_pair("crumb", crumb);
    Ok(url)
}

/// Turn a quoteSummary body into a record
pub fn parse_quote_summary(body: &Value) -> Result<Option<TickerRecord>> {
    let summary = body.get("quoteSummary").ok_or_else(|| {
        StockError::YahooFinanceError("response has no quoteSummary".to_string())
    })?;

    if let Some(error) = summary.get("error").filter(|e| !e.is_null()) {
        let code = error.get("code").and_then(Value::as_str).unwrap_or_default();
        if code.eq_ignore_ascii_case("Not Found") {
            return Ok(None);
        }
        let description = error
            .get("description")
            .and_then(Value::as_str)
            .unwrap_or(code);
        return Err(StockError::YahooFinanceError(description.to_string()));
    }

    let Some(result) = summary
        .get("result")
        .and_then(Value::as_array)
        .and_then(|r| r.first())
    else {
        return Ok(None);
    };

    Ok(Some(TickerRecord::from_flat_map(&flatten_modules(result))))
}

/// Merge module objects into one map keyed by field name
pub fn flatten_modules(result: &Value) -> Map<String, Value> {
    let mut flat = Map::new();
    for module in MODULES {
        let Some(fields) = result.get(*module).and_then(Value::as_object) else {
            continue;
        };
        for (key, value) in fields {
            flat.entry(key.clone()).or_insert_with(|| value.clone());
        }
    }
    flat
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn fixture() -> Value {
        json!({
            "quoteSummary": {
                "result": [{
                    "price": {
                        "longName": "Apple Inc.",
                        "regularMarketPrice": {"raw": 190.5, "fmt": "190.50"},
                        "marketCap": {"raw": 3.0e12, "fmt": "3T"}
                    },
                    "summaryDetail": {
                        "marketCap": {"raw": 1.0, "fmt": "1"},
                        "trailingPE": {"raw": 31.25, "fmt": "31.25"},
                        "dividendYield": {"raw": 0.005, "fmt": "0.50%"},
                        "exDividendDate": {"raw": 1_715_299_200, "fmt": "2024-05-10"}
                    },
                    "defaultKeyStatistics": {
                        "52WeekChange": {"raw": 0.12, "fmt": "12%"},
                        "pegRatio": {}
                    },
                    "assetProfile": {
                        "sector": "Technology",
                        "fullTimeEmployees": 161000
                    }
                }],
                "error": null
            }
        })
    }

    #[test]
    fn test_parse_quote_summary() {
        let record = parse_quote_summary(&fixture()).unwrap().unwrap();

        assert_eq!(record.long_name.as_deref(), Some("Apple Inc."));
        assert_eq!(record.regular_market_price, Some(190.5));
        assert_eq!(record.trailing_pe, Some(31.25));
        assert_eq!(record.fifty_two_week_change, Some(0.12));
        assert_eq!(record.sector.as_deref(), Some("Technology"));
        assert_eq!(record.full_time_employees, Some(161_000.0));
        assert_eq!(record.peg_ratio, None);
        assert_eq!(
            record.ex_dividend_date.map(|d| d.to_string()),
            Some("2024-05-10".to_string())
        );
    }

    #[test]
    fn test_first_module_wins() {
        let record = parse_quote_summary(&fixture()).unwrap().unwrap();
        assert_eq!(record.market_cap, Some(3.0e12));
    }

    #[test]
    fn test_not_found() {
        let body = json!({
            "quoteSummary": {
                "result": null,
                "error": {"code": "Not Found", "description": "Quote not found for symbol: ZZZZ"}
            }
        });
        assert!(parse_quote_summary(&body).unwrap().is_none());

        let body = json!({"quoteSummary": {"result": [], "error": null}});
        assert!(parse_quote_summary(&body).unwrap().is_none());
    }

    #[test]
    fn test_provider_error() {
        let body = json!({
            "quoteSummary": {
                "result": null,
                "error": {"code": "Unauthorized", "description": "Invalid Crumb"}
            }
        });
        let err = parse_quote_summary(&body).unwrap_err();
        assert!(err.to_string().contains("Invalid Crumb"));

        assert!(parse_quote_summary(&json!({"finance": {}})).is_err());
    }

    #[test]
    fn test_quote_summary_url() {
        let url = quote_summary_url("BRK-B", "abc/def").unwrap();
        assert!(url.path().ends_with("/quoteSummary/BRK-B"));
        let query = url.query().unwrap();
        assert!(query.contains("modules=price%2CsummaryDetail"));
        assert!(query.contains("crumb=abc%2Fdef"));
    }

    #[tokio::test]
    #[ignore] // requires network access
    async fn test_live_lookup() {
        let config = crate::config::StockConfig::default();
        let client = YahooFinanceClient::with_client(crate::api::http_client(&config).unwrap());
        let outcome = client.lookup("AAPL").await;
        assert!(matches!(outcome, LookupOutcome::Found(_)));
    }
}
