//! Stock KPI reports for agent tool calls
//!
//! This crate turns a ticker symbol into a formatted, human-readable report.
//! It includes:
//!
//! - A typed [`TickerRecord`] built from provider payloads
//! - Formatting primitives (currency, percentage, thousands separators)
//! - One report builder per KPI category plus a combined analysis
//! - Yahoo Finance and Alpha Vantage lookups behind [`TickerLookup`]
//! - A [`ToolDispatcher`] and the [`StockTool`] wrappers registered with a
//!   [`finance_tools::ToolRegistry`]
//!
//! # Example
//!
//! ```rust,ignore
//! use finance_stock::{StockConfig, ToolDispatcher, provider_from_config};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = StockConfig::from_env()?;
//!     let dispatcher = ToolDispatcher::new(provider_from_config(&config)?);
//!
//!     println!("{}", dispatcher.valuation_metrics("AAPL").await);
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod config;
pub mod dispatcher;
pub mod error;
pub mod format;
pub mod record;
pub mod report;
pub mod tools;

pub use api::{LookupOutcome, TickerLookup, provider_from_config};
pub use config::{DataProvider, StockConfig};
pub use dispatcher::{ToolDispatcher, ToolKind};
pub use error::{Result, StockError};
pub use record::{Field, FieldValue, TickerRecord};
pub use tools::{StockTool, register_stock_tools};
