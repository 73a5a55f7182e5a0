//! Agent-facing tools backed by the dispatcher

use crate::dispatcher::{ToolDispatcher, ToolKind};
use async_trait::async_trait;
use finance_mcp::schema;
use finance_tools::{Result, Tool, ToolError, ToolRegistry};
use serde::Deserialize;
use serde_json::{Value, json};
use std::sync::Arc;

/// One stock tool, identified by its [`ToolKind`]
pub struct StockTool {
    kind: ToolKind,
    dispatcher: Arc<ToolDispatcher>,
}

#[derive(Debug, Deserialize)]
struct TickerParams {
    ticker: String,
}

impl StockTool {
    /// Wrap `kind` so it can be registered with a [`ToolRegistry`]
    pub fn new(kind: ToolKind, dispatcher: Arc<ToolDispatcher>) -> Self {
        Self { kind, dispatcher }
    }
}

#[async_trait]
impl Tool for StockTool {
    async fn execute(&self, params: Value) -> Result<Value> {
        let ticker = if self.kind.requires_ticker() {
            let params: TickerParams = serde_json::from_value(params)?;
            if params.ticker.trim().is_empty() {
                return Err(ToolError::InvalidParameters(
                    "ticker must not be empty".to_string(),
                ));
            }
            params.ticker
        } else {
            String::new()
        };

        let report = self.dispatcher.dispatch(self.kind, &ticker).await;
        Ok(Value::String(report))
    }

    fn name(&self) -> &str {
        self.kind.name()
    }

    fn description(&self) -> &str {
        self.kind.description()
    }

    fn input_schema(&self) -> Value {
        if self.kind.requires_ticker() {
            schema::object(
                json!({
                    "ticker": schema::string(Some(
                        "Stock ticker symbol (e.g., 'AAPL', 'GOOGL', 'MSFT')"
                    ))
                }),
                &["ticker"],
            )
        } else {
            schema::empty_object()
        }
    }
}

/// Register every stock tool, in catalogue order
pub fn register_stock_tools(registry: &mut ToolRegistry, dispatcher: Arc<ToolDispatcher>) {
    for kind in ToolKind::ALL {
        registry.register(Arc::new(StockTool::new(*kind, Arc::clone(&dispatcher))));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{LookupOutcome, MockTickerLookup};
    use crate::record::TickerRecord;

    fn dispatcher() -> Arc<ToolDispatcher> {
        let mut mock = MockTickerLookup::new();
        mock.expect_lookup().returning(|ticker| {
            if ticker == "AAPL" {
                LookupOutcome::Found(TickerRecord {
                    market_cap: Some(1_000_000.0),
                    ..Default::default()
                })
            } else {
                LookupOutcome::NotFound
            }
        });
        Arc::new(ToolDispatcher::new(Arc::new(mock)))
    }

    #[test]
    fn test_register_all_tools() {
        let mut registry = ToolRegistry::new();
        register_stock_tools(&mut registry, dispatcher());

        let names: Vec<String> = registry
            .list_tools()
            .iter()
            .map(|t| t.name().to_string())
            .collect();
        let expected: Vec<String> = ToolKind::ALL.iter().map(|k| k.name().to_string()).collect();
        assert_eq!(names, expected);
    }

    #[test]
    fn test_input_schema() {
        let tool = StockTool::new(ToolKind::MarketCap, dispatcher());
        let schema = tool.input_schema();
        assert_eq!(schema["required"], json!(["ticker"]));
        assert_eq!(schema["properties"]["ticker"]["type"], "string");

        let tool = StockTool::new(ToolKind::ListAvailableKpis, dispatcher());
        assert!(tool.input_schema()["required"].is_null());
    }

    #[tokio::test]
    async fn test_execute_market_cap() {
        let tool = StockTool::new(ToolKind::MarketCap, dispatcher());
        let out = tool.execute(json!({"ticker": "aapl"})).await.unwrap();
        assert_eq!(out, json!("The market cap for AAPL is: $1,000,000"));
    }

    #[tokio::test]
    async fn test_execute_not_found_is_text() {
        let tool = StockTool::new(ToolKind::AnalystData, dispatcher());
        let out = tool.execute(json!({"ticker": "zzzz"})).await.unwrap();
        assert_eq!(out, json!("No data found for ticker ZZZZ"));
    }

    #[tokio::test]
    async fn test_execute_rejects_bad_params() {
        let tool = StockTool::new(ToolKind::GrowthMetrics, dispatcher());

        let err = tool.execute(json!({})).await.unwrap_err();
        assert!(matches!(err, ToolError::InvalidParameters(_)));

        let err = tool.execute(json!({"ticker": "   "})).await.unwrap_err();
        assert!(matches!(err, ToolError::InvalidParameters(_)));

        let err = tool.execute(json!({"ticker": 42})).await.unwrap_err();
        assert!(matches!(err, ToolError::InvalidParameters(_)));
    }

    #[tokio::test]
    async fn test_list_kpis_takes_no_arguments() {
        let tool = StockTool::new(ToolKind::ListAvailableKpis, dispatcher());
        let out = tool.execute(json!({})).await.unwrap();
        assert!(out.as_str().unwrap().contains("get_market_cap"));
    }
}
