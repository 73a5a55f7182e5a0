//! Tool name to report pipeline
//!
//! Each call normalises the ticker, performs one lookup through the injected
//! [`TickerLookup`] and renders the matching report. Every outcome, failures
//! included, comes back as text.

use crate::api::{LookupOutcome, TickerLookup};
use crate::record::TickerRecord;
use crate::report;
use std::fmt;
use std::sync::Arc;

/// The tools exposed to agents, in catalogue order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ToolKind {
    MarketCap,
    CompanyOverview,
    ValuationMetrics,
    FinancialHealth,
    ProfitabilityMetrics,
    GrowthMetrics,
    DividendMetrics,
    TradingMetrics,
    AnalystData,
    CompleteStockAnalysis,
    ListAvailableKpis,
}

impl ToolKind {
    /// Every tool, in the order `list_available_kpis` presents them
    pub const ALL: &'static [ToolKind] = &[
        ToolKind::MarketCap,
        ToolKind::CompanyOverview,
        ToolKind::ValuationMetrics,
        ToolKind::FinancialHealth,
        ToolKind::ProfitabilityMetrics,
        ToolKind::GrowthMetrics,
        ToolKind::DividendMetrics,
        ToolKind::TradingMetrics,
        ToolKind::AnalystData,
        ToolKind::CompleteStockAnalysis,
        ToolKind::ListAvailableKpis,
    ];

    /// Name agents call the tool by
    pub fn name(self) -> &'static str {
        match self {
            Self::MarketCap => "get_market_cap",
            Self::CompanyOverview => "get_company_overview",
            Self::ValuationMetrics => "get_valuation_metrics",
            Self::FinancialHealth => "get_financial_health",
            Self::ProfitabilityMetrics => "get_profitability_metrics",
            Self::GrowthMetrics => "get_growth_metrics",
            Self::DividendMetrics => "get_dividend_metrics",
            Self::TradingMetrics => "get_trading_metrics",
            Self::AnalystData => "get_analyst_data",
            Self::CompleteStockAnalysis => "get_complete_stock_analysis",
            Self::ListAvailableKpis => "list_available_kpis",
        }
    }

    /// Summary shown to agents in `tools/list`
    pub fn description(self) -> &'static str {
        match self {
            Self::MarketCap => {
                "Retrieves the current market capitalization for a given stock ticker. \
                 Returns the market capitalization or a message if the ticker is not \
                 found or data is unavailable."
            }
            Self::CompanyOverview => {
                "Get basic company information and overview, including name, sector, \
                 industry, and description."
            }
            Self::ValuationMetrics => {
                "Get comprehensive valuation metrics and ratios (P/E, P/B, P/S, PEG, \
                 EV multiples)."
            }
            Self::FinancialHealth => {
                "Get financial health indicators and balance sheet metrics (cash, debt, \
                 liquidity ratios)."
            }
            Self::ProfitabilityMetrics => {
                "Get profitability and efficiency metrics (revenue, margins, returns, EPS)."
            }
            Self::GrowthMetrics => "Get growth-related metrics and estimates.",
            Self::DividendMetrics => "Get dividend and shareholder return metrics.",
            Self::TradingMetrics => {
                "Get trading and market performance metrics (price, ranges, averages, \
                 volume, beta)."
            }
            Self::AnalystData => "Get analyst recommendations and target prices.",
            Self::CompleteStockAnalysis => {
                "Get a comprehensive analysis combining all major KPIs and metrics."
            }
            Self::ListAvailableKpis => {
                "List all available KPIs and metrics that can be retrieved for stocks."
            }
        }
    }

    /// Whether the tool takes a `ticker` argument
    pub fn requires_ticker(self) -> bool {
        self != Self::ListAvailableKpis
    }

    /// Look a tool up by its [`name`](Self::name)
    ///
    /// # Returns
    ///
    /// `None` for names outside the catalogue.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|kind| kind.name() == name)
    }

    /// Category used in failure messages
    fn subject(self) -> &'static str {
        match self {
            Self::MarketCap => "market cap",
            Self::CompanyOverview => "company overview",
            Self::ValuationMetrics => "valuation metrics",
            Self::FinancialHealth => "financial health",
            Self::ProfitabilityMetrics => "profitability metrics",
            Self::GrowthMetrics => "growth metrics",
            Self::DividendMetrics => "dividend metrics",
            Self::TradingMetrics => "trading metrics",
            Self::AnalystData => "analyst data",
            Self::CompleteStockAnalysis => "complete analysis",
            Self::ListAvailableKpis => "available KPIs",
        }
    }

    fn builder(self) -> Option<fn(&str, &TickerRecord) -> String> {
        Some(match self {
            Self::CompanyOverview => report::company_overview,
            Self::ValuationMetrics => report::valuation_metrics,
            Self::FinancialHealth => report::financial_health,
            Self::ProfitabilityMetrics => report::profitability_metrics,
            Self::GrowthMetrics => report::growth_metrics,
            Self::DividendMetrics => report::dividend_metrics,
            Self::TradingMetrics => report::trading_metrics,
            Self::AnalystData => report::analyst_data,
            Self::CompleteStockAnalysis => report::complete_stock_analysis,
            Self::MarketCap | Self::ListAvailableKpis => return None,
        })
    }
}

impl fmt::Display for ToolKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Routes tool calls to the lookup collaborator and report builders
pub struct ToolDispatcher {
    lookup: Arc<dyn TickerLookup>,
}

impl ToolDispatcher {
    /// Create a dispatcher around the lookup every call goes through
    pub fn new(lookup: Arc<dyn TickerLookup>) -> Self {
        Self { lookup }
    }

    /// Run one tool
    ///
    /// `ticker` is ignored by [`ToolKind::ListAvailableKpis`].
    pub async fn dispatch(&self, kind: ToolKind, ticker: &str) -> String {
        match kind {
            ToolKind::ListAvailableKpis => self.list_available_kpis(),
            ToolKind::MarketCap => self.market_cap(ticker).await,
            _ => self.category(kind, ticker).await,
        }
    }

    /// Market capitalisation sentence for `ticker`
    ///
    /// # Returns
    ///
    /// The formatted cap, a "might be a valid ticker" note when only a price
    /// is known, an "ensure it's a valid stock ticker" note otherwise, or the
    /// lookup error.
    pub async fn market_cap(&self, ticker: &str) -> String {
        let ticker = normalize(ticker);
        tracing::info!(ticker = %ticker, "fetching market cap");

        match self.lookup.lookup(&ticker).await {
            LookupOutcome::Found(record) => match record.market_cap.filter(|cap| *cap != 0.0) {
                Some(cap) => {
                    tracing::info!(ticker = %ticker, market_cap = cap, "found market cap");
                    report::market_cap_found(&ticker, cap)
                }
                None if record.regular_market_price.is_some() => {
                    tracing::warn!(ticker = %ticker, "ticker has a price but no market cap");
                    report::market_cap_maybe_valid(&ticker)
                }
                None => {
                    tracing::warn!(ticker = %ticker, "no market cap or price, likely invalid");
                    report::market_cap_invalid(&ticker)
                }
            },
            LookupOutcome::NotFound => {
                tracing::warn!(ticker = %ticker, "no data for ticker, likely invalid");
                report::market_cap_invalid(&ticker)
            }
            LookupOutcome::Failed(e) => {
                tracing::error!(ticker = %ticker, error = %e, "market cap lookup failed");
                format!("An error occurred while trying to fetch data for {ticker}: {e}")
            }
        }
    }

    /// Profile and business summary
    pub async fn company_overview(&self, ticker: &str) -> String {
        self.category(ToolKind::CompanyOverview, ticker).await
    }

    /// Price and enterprise multiples
    pub async fn valuation_metrics(&self, ticker: &str) -> String {
        self.category(ToolKind::ValuationMetrics, ticker).await
    }

    /// Cash, debt, liquidity and cash flow
    pub async fn financial_health(&self, ticker: &str) -> String {
        self.category(ToolKind::FinancialHealth, ticker).await
    }

    /// Income, margins, returns and per-share earnings
    pub async fn profitability_metrics(&self, ticker: &str) -> String {
        self.category(ToolKind::ProfitabilityMetrics, ticker).await
    }

    /// Revenue and earnings growth
    pub async fn growth_metrics(&self, ticker: &str) -> String {
        self.category(ToolKind::GrowthMetrics, ticker).await
    }

    /// Dividends, payout and share structure
    pub async fn dividend_metrics(&self, ticker: &str) -> String {
        self.category(ToolKind::DividendMetrics, ticker).await
    }

    /// Price action, ranges, averages and volume
    pub async fn trading_metrics(&self, ticker: &str) -> String {
        self.category(ToolKind::TradingMetrics, ticker).await
    }

    /// Target prices and recommendation
    pub async fn analyst_data(&self, ticker: &str) -> String {
        self.category(ToolKind::AnalystData, ticker).await
    }

    /// Every category in one report
    pub async fn complete_stock_analysis(&self, ticker: &str) -> String {
        self.category(ToolKind::CompleteStockAnalysis, ticker).await
    }

    /// Static KPI catalogue, no lookup involved
    pub fn list_available_kpis(&self) -> String {
        report::list_available_kpis().to_string()
    }

    async fn category(&self, kind: ToolKind, ticker: &str) -> String {
        let ticker = normalize(ticker);
        let Some(build) = kind.builder() else {
            return self.list_available_kpis();
        };

        match self.lookup.lookup(&ticker).await {
            LookupOutcome::Found(record) => {
                tracing::info!(
                    tool = kind.name(),
                    ticker = %ticker,
                    fields = record.populated(),
                    "rendering report"
                );
                build(&ticker, &record)
            }
            LookupOutcome::NotFound => {
                tracing::warn!(tool = kind.name(), ticker = %ticker, "no data found");
                format!("No data found for ticker {ticker}")
            }
            LookupOutcome::Failed(e) => {
                tracing::error!(tool = kind.name(), ticker = %ticker, error = %e, "lookup failed");
                format!("Error fetching {} for {ticker}: {e}", kind.subject())
            }
        }
    }
}

fn normalize(ticker: &str) -> String {
    ticker.trim().to_uppercase()
}
