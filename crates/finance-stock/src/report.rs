//! Category report builders
//!
//! Each builder selects a fixed list of fields from a [`TickerRecord`] and
//! lays them out in a fixed text template. Every value shown is a direct
//! passthrough of one record field, except the net cash line of the
//! financial health report.

use crate::format::Unit::{Currency, Percentage, Plain};
use crate::format::{
    Unit, format_field, format_number, net_cash, safe_get, safe_get_or_na, truncate_summary,
    with_thousands,
};
use crate::record::{Field, FieldValue, TickerRecord};

/// Rule under the title of a category report
const RULE: &str = "━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━";

/// Wider rule framing the complete analysis
const WIDE_RULE: &str =
    "━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━";

const BULLET: &str = "  • ";

/// Where a displayed value comes from
#[derive(Debug, Clone, Copy)]
enum Source {
    /// Field formatted with a unit, `N/A` when absent
    Field(Field, Unit),
    /// Field formatted with a unit, `0` when absent
    FieldOrZero(Field, Unit),
    /// Field shown as-is, `N/A` when absent
    Raw(Field),
    /// `totalCash - totalDebt` as currency
    NetCash,
}

#[derive(Debug, Clone, Copy)]
struct Metric {
    label: &'static str,
    source: Source,
}

const fn m(label: &'static str, field: Field, unit: Unit) -> Metric {
    Metric {
        label,
        source: Source::Field(field, unit),
    }
}

const fn raw(label: &'static str, field: Field) -> Metric {
    Metric {
        label,
        source: Source::Raw(field),
    }
}

const fn or_zero(label: &'static str, field: Field, unit: Unit) -> Metric {
    Metric {
        label,
        source: Source::FieldOrZero(field, unit),
    }
}

fn render_value(record: &TickerRecord, source: Source) -> String {
    match source {
        Source::Field(field, unit) => format_field(record, field, unit),
        Source::FieldOrZero(field, unit) => {
            format_number(&safe_get(record, field, FieldValue::Number(0.0)), unit)
        }
        Source::Raw(field) => safe_get_or_na(record, field).to_string(),
        Source::NetCash => format_number(&FieldValue::Number(net_cash(record)), Currency),
    }
}

fn render_metric(record: &TickerRecord, metric: &Metric) -> String {
    format!("{}: {}", metric.label, render_value(record, metric.source))
}

/// Unbulleted lines; metrics sharing a row are joined with ` | `
fn plain_block(record: &TickerRecord, header: Option<&str>, rows: &[&[Metric]]) -> String {
    let mut lines: Vec<String> = header.map(str::to_string).into_iter().collect();
    lines.extend(rows.iter().map(|row| {
        row.iter()
            .map(|metric| render_metric(record, metric))
            .collect::<Vec<_>>()
            .join(" | ")
    }));
    lines.join("\n")
}

/// `Header:` followed by one bullet per metric
fn bullet_section(record: &TickerRecord, header: &str, metrics: &[Metric]) -> String {
    let mut out = format!("{header}:");
    for metric in metrics {
        out.push('\n');
        out.push_str(BULLET);
        out.push_str(&render_metric(record, metric));
    }
    out
}

fn category_report(title: &str, ticker: &str, blocks: &[String]) -> String {
    format!("{title} for {ticker}:\n{RULE}\n{}", blocks.join("\n\n"))
}

/// Name, sector, industry, location, headcount and business summary
pub fn company_overview(ticker: &str, record: &TickerRecord) -> String {
    const PROFILE: &[&[Metric]] = &[
        &[raw("Company Name", Field::LongName)],
        &[raw("Sector", Field::Sector)],
        &[raw("Industry", Field::Industry)],
        &[raw("Country", Field::Country)],
        &[raw("Website", Field::Website)],
        &[m("Employees", Field::FullTimeEmployees, Plain)],
    ];

    let summary = record
        .long_business_summary
        .as_deref()
        .unwrap_or("No description available");

    category_report(
        "Company Overview",
        ticker,
        &[
            plain_block(record, None, PROFILE),
            format!("Business Summary:\n{}", truncate_summary(summary)),
        ],
    )
}

/// Market value, price ratios and enterprise ratios
pub fn valuation_metrics(ticker: &str, record: &TickerRecord) -> String {
    category_report(
        "Valuation Metrics",
        ticker,
        &[
            plain_block(
                record,
                None,
                &[
                    &[m("Market Cap", Field::MarketCap, Currency)],
                    &[m("Enterprise Value", Field::EnterpriseValue, Currency)],
                ],
            ),
            bullet_section(
                record,
                "Price Ratios",
                &[
                    m("P/E Ratio (TTM)", Field::TrailingPe, Plain),
                    m("Forward P/E", Field::ForwardPe, Plain),
                    m("P/B Ratio", Field::PriceToBook, Plain),
                    m("P/S Ratio (TTM)", Field::PriceToSales, Plain),
                    m("PEG Ratio", Field::PegRatio, Plain),
                ],
            ),
            bullet_section(
                record,
                "Enterprise Ratios",
                &[
                    m("EV/Revenue", Field::EnterpriseToRevenue, Plain),
                    m("EV/EBITDA", Field::EnterpriseToEbitda, Plain),
                ],
            ),
            plain_block(
                record,
                None,
                &[&[m("Book Value per Share", Field::BookValue, Currency)]],
            ),
        ],
    )
}

/// Balance sheet, liquidity and leverage
pub fn financial_health(ticker: &str, record: &TickerRecord) -> String {
    category_report(
        "Financial Health",
        ticker,
        &[
            bullet_section(
                record,
                "Balance Sheet",
                &[
                    m("Total Cash", Field::TotalCash, Currency),
                    m("Total Debt", Field::TotalDebt, Currency),
                    Metric {
                        label: "Net Cash",
                        source: Source::NetCash,
                    },
                ],
            ),
            bullet_section(
                record,
                "Liquidity Ratios",
                &[
                    m("Current Ratio", Field::CurrentRatio, Plain),
                    m("Quick Ratio", Field::QuickRatio, Plain),
                ],
            ),
            bullet_section(
                record,
                "Debt Ratios",
                &[
                    m("Debt-to-Equity", Field::DebtToEquity, Plain),
                    m("Total Cash per Share", Field::TotalCashPerShare, Currency),
                ],
            ),
            bullet_section(
                record,
                "Other Metrics",
                &[
                    m("Working Capital", Field::WorkingCapital, Currency),
                    m("Free Cash Flow", Field::FreeCashflow, Currency),
                ],
            ),
        ],
    )
}

/// Revenue, margins, returns and per-share earnings
pub fn profitability_metrics(ticker: &str, record: &TickerRecord) -> String {
    category_report(
        "Profitability Metrics",
        ticker,
        &[
            bullet_section(
                record,
                "Revenue & Earnings",
                &[
                    m("Total Revenue (TTM)", Field::TotalRevenue, Currency),
                    m("Net Income (TTM)", Field::NetIncomeToCommon, Currency),
                    m("EBITDA", Field::Ebitda, Currency),
                ],
            ),
            bullet_section(
                record,
                "Margins",
                &[
                    m("Profit Margin", Field::ProfitMargins, Percentage),
                    m("Operating Margin", Field::OperatingMargins, Percentage),
                    m("Gross Margin", Field::GrossMargins, Percentage),
                    m("EBITDA Margin", Field::EbitdaMargins, Percentage),
                ],
            ),
            bullet_section(
                record,
                "Returns",
                &[
                    m("Return on Equity (ROE)", Field::ReturnOnEquity, Percentage),
                    m("Return on Assets (ROA)", Field::ReturnOnAssets, Percentage),
                ],
            ),
            bullet_section(
                record,
                "Per Share Metrics",
                &[
                    m("EPS (TTM)", Field::TrailingEps, Currency),
                    m("Forward EPS", Field::ForwardEps, Currency),
                    m("Revenue per Share", Field::RevenuePerShare, Currency),
                ],
            ),
        ],
    )
}

/// Historical growth rates and book value
///
/// The provider has no forward growth estimates, so the two estimate lines
/// both show trailing earnings growth.
pub fn growth_metrics(ticker: &str, record: &TickerRecord) -> String {
    category_report(
        "Growth Metrics",
        ticker,
        &[
            bullet_section(
                record,
                "Historical Growth",
                &[
                    m("Revenue Growth (TTM)", Field::RevenueGrowth, Percentage),
                    m("Earnings Growth", Field::EarningsGrowth, Percentage),
                    m("Quarterly Revenue Growth", Field::RevenueQuarterlyGrowth, Percentage),
                    m("Quarterly Earnings Growth", Field::EarningsQuarterlyGrowth, Percentage),
                ],
            ),
            bullet_section(
                record,
                "Analyst Estimates",
                &[
                    m("Next Year EPS Growth", Field::EarningsGrowth, Percentage),
                    m("Next 5 Years Growth", Field::EarningsGrowth, Percentage),
                ],
            ),
            bullet_section(
                record,
                "Book Value Growth",
                &[
                    m("Book Value", Field::BookValue, Currency),
                    m("Tangible Book Value", Field::TangibleBookValue, Currency),
                ],
            ),
        ],
    )
}

/// Dividends, share counts and short interest
pub fn dividend_metrics(ticker: &str, record: &TickerRecord) -> String {
    category_report(
        "Dividend & Shareholder Returns",
        ticker,
        &[
            bullet_section(
                record,
                "Dividend Information",
                &[
                    or_zero("Annual Dividend Rate", Field::DividendRate, Currency),
                    m("Dividend Yield", Field::DividendYield, Percentage),
                    m("Payout Ratio", Field::PayoutRatio, Percentage),
                    raw("Ex-Dividend Date", Field::ExDividendDate),
                    raw("Last Dividend Date", Field::LastDividendDate),
                ],
            ),
            bullet_section(
                record,
                "Share Information",
                &[
                    m("Shares Outstanding", Field::SharesOutstanding, Plain),
                    m("Float", Field::FloatShares, Plain),
                    m("Shares Short", Field::SharesShort, Plain),
                    m("Short Ratio", Field::ShortRatio, Plain),
                    m("Short % of Float", Field::ShortPercentOfFloat, Percentage),
                ],
            ),
            bullet_section(
                record,
                "Share Buybacks",
                &[m(
                    "Shares Short Prior Month",
                    Field::SharesShortPriorMonth,
                    Plain,
                )],
            ),
        ],
    )
}

/// Prices, ranges, volume and risk
pub fn trading_metrics(ticker: &str, record: &TickerRecord) -> String {
    category_report(
        "Trading & Market Metrics",
        ticker,
        &[
            bullet_section(
                record,
                "Current Price Information",
                &[
                    m("Current Price", Field::RegularMarketPrice, Currency),
                    m("Previous Close", Field::RegularMarketPreviousClose, Currency),
                    m("Open", Field::RegularMarketOpen, Currency),
                    m("Day High", Field::RegularMarketDayHigh, Currency),
                    m("Day Low", Field::RegularMarketDayLow, Currency),
                ],
            ),
            bullet_section(
                record,
                "Price Ranges",
                &[
                    m("52-Week High", Field::FiftyTwoWeekHigh, Currency),
                    m("52-Week Low", Field::FiftyTwoWeekLow, Currency),
                    m("50-Day Average", Field::FiftyDayAverage, Currency),
                    m("200-Day Average", Field::TwoHundredDayAverage, Currency),
                ],
            ),
            bullet_section(
                record,
                "Volume & Liquidity",
                &[
                    m("Volume", Field::RegularMarketVolume, Plain),
                    m("Average Volume (10d)", Field::AverageVolume10Days, Plain),
                    m("Average Volume (3m)", Field::AverageVolume, Plain),
                ],
            ),
            bullet_section(
                record,
                "Risk Metrics",
                &[
                    m("Beta", Field::Beta, Plain),
                    m("52-Week Change", Field::FiftyTwoWeekChange, Percentage),
                ],
            ),
        ],
    )
}

/// Price targets and recommendations
pub fn analyst_data(ticker: &str, record: &TickerRecord) -> String {
    category_report(
        "Analyst Data",
        ticker,
        &[
            bullet_section(
                record,
                "Price Targets",
                &[
                    m("Target High Price", Field::TargetHighPrice, Currency),
                    m("Target Low Price", Field::TargetLowPrice, Currency),
                    m("Target Mean Price", Field::TargetMeanPrice, Currency),
                    m("Target Median Price", Field::TargetMedianPrice, Currency),
                ],
            ),
            bullet_section(
                record,
                "Recommendations",
                &[
                    m("Recommendation Mean", Field::RecommendationMean, Plain),
                    raw("Recommendation Key", Field::RecommendationKey),
                    m(
                        "Number of Analyst Opinions",
                        Field::NumberOfAnalystOpinions,
                        Plain,
                    ),
                ],
            ),
            bullet_section(
                record,
                "Estimates",
                &[
                    m(
                        "Current Quarter Estimate",
                        Field::EarningsQuarterlyGrowth,
                        Percentage,
                    ),
                    m("Next Quarter Estimate", Field::EarningsGrowth, Percentage),
                ],
            ),
        ],
    )
}

/// One-page summary drawing a subset of every category
pub fn complete_stock_analysis(ticker: &str, record: &TickerRecord) -> String {
    let sections = [
        plain_block(
            record,
            Some("📊 SNAPSHOT"),
            &[
                &[raw("Company", Field::LongName)],
                &[raw("Sector", Field::Sector), raw("Industry", Field::Industry)],
                &[or_zero("Current Price", Field::RegularMarketPrice, Currency)],
                &[or_zero("Market Cap", Field::MarketCap, Currency)],
            ],
        ),
        plain_block(
            record,
            Some("💰 VALUATION METRICS"),
            &[
                &[
                    m("P/E Ratio", Field::TrailingPe, Plain),
                    m("Forward P/E", Field::ForwardPe, Plain),
                ],
                &[
                    m("P/B Ratio", Field::PriceToBook, Plain),
                    m("P/S Ratio", Field::PriceToSales, Plain),
                ],
                &[
                    m("EV/EBITDA", Field::EnterpriseToEbitda, Plain),
                    m("PEG Ratio", Field::PegRatio, Plain),
                ],
            ],
        ),
        plain_block(
            record,
            Some("📈 PROFITABILITY & EFFICIENCY"),
            &[
                &[m("Revenue (TTM)", Field::TotalRevenue, Currency)],
                &[m("Net Income", Field::NetIncomeToCommon, Currency)],
                &[m("Profit Margin", Field::ProfitMargins, Percentage)],
                &[
                    m("ROE", Field::ReturnOnEquity, Percentage),
                    m("ROA", Field::ReturnOnAssets, Percentage),
                ],
            ],
        ),
        plain_block(
            record,
            Some("🚀 GROWTH METRICS"),
            &[
                &[m("Revenue Growth", Field::RevenueGrowth, Percentage)],
                &[m("Earnings Growth", Field::EarningsGrowth, Percentage)],
                &[m("EPS (TTM)", Field::TrailingEps, Currency)],
            ],
        ),
        plain_block(
            record,
            Some("💎 FINANCIAL HEALTH"),
            &[
                &[m("Current Ratio", Field::CurrentRatio, Plain)],
                &[m("Debt-to-Equity", Field::DebtToEquity, Plain)],
                &[m("Free Cash Flow", Field::FreeCashflow, Currency)],
                &[m("Total Cash", Field::TotalCash, Currency)],
            ],
        ),
        plain_block(
            record,
            Some("💸 SHAREHOLDER RETURNS"),
            &[
                &[m("Dividend Yield", Field::DividendYield, Percentage)],
                &[m("Dividend Rate", Field::DividendRate, Currency)],
                &[m("Payout Ratio", Field::PayoutRatio, Percentage)],
            ],
        ),
        plain_block(
            record,
            Some("📊 TRADING METRICS"),
            &[
                &[
                    m("52W High", Field::FiftyTwoWeekHigh, Currency),
                    m("52W Low", Field::FiftyTwoWeekLow, Currency),
                ],
                &[m("Beta", Field::Beta, Plain)],
                &[m("Average Volume", Field::AverageVolume, Plain)],
            ],
        ),
        plain_block(
            record,
            Some("🎯 ANALYST CONSENSUS"),
            &[
                &[m("Target Price", Field::TargetMeanPrice, Currency)],
                &[raw("Recommendation", Field::RecommendationKey)],
                &[m("Number of Analysts", Field::NumberOfAnalystOpinions, Plain)],
            ],
        ),
    ];

    format!(
        "🏢 COMPLETE STOCK ANALYSIS: {ticker}\n{WIDE_RULE}\n\n{}\n\n{WIDE_RULE}",
        sections.join("\n\n")
    )
}

/// `The market cap for TICKER is: $N` with no decimals
pub fn market_cap_found(ticker: &str, market_cap: f64) -> String {
    format!(
        "The market cap for {ticker} is: ${}",
        with_thousands(market_cap, 0)
    )
}

/// Market cap missing but the ticker has a live price
pub fn market_cap_maybe_valid(ticker: &str) -> String {
    format!(
        "Could not find market cap data for {ticker}, although it might be a valid ticker (e.g., an index or ETF)."
    )
}

/// Nothing known about the ticker
pub fn market_cap_invalid(ticker: &str) -> String {
    format!("Could not find market cap data for {ticker}. Please ensure it's a valid stock ticker.")
}

/// Static catalogue of every KPI category and tool
pub fn list_available_kpis() -> &'static str {
    KPI_CATALOGUE
}

const KPI_CATALOGUE: &str = "\
📊 AVAILABLE STOCK KPIs & METRICS
━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

🏢 COMPANY OVERVIEW
• Company Name, Sector, Industry
• Country, Website, Employee Count
• Business Summary

💰 VALUATION METRICS
• Market Capitalization
• Enterprise Value
• P/E Ratio (Trailing & Forward)
• Price-to-Book Ratio
• Price-to-Sales Ratio
• PEG Ratio
• EV/Revenue, EV/EBITDA

📈 PROFITABILITY METRICS
• Total Revenue (TTM)
• Net Income
• EBITDA
• Profit Margins (Gross, Operating, Net, EBITDA)
• Return on Equity (ROE)
• Return on Assets (ROA)
• Earnings per Share (EPS)
• Revenue per Share

🚀 GROWTH METRICS
• Revenue Growth
• Earnings Growth
• Quarterly Growth Rates
• Book Value Growth

💎 FINANCIAL HEALTH
• Current Ratio
• Quick Ratio
• Debt-to-Equity Ratio
• Total Cash & Debt
• Working Capital
• Free Cash Flow

💸 DIVIDEND & SHAREHOLDER RETURNS
• Dividend Yield
• Dividend Rate
• Payout Ratio
• Ex-Dividend Date
• Shares Outstanding
• Share Buyback Information

📊 TRADING METRICS
• Current Price, Open, High, Low
• 52-Week High/Low
• Moving Averages (50-day, 200-day)
• Volume Metrics
• Beta (Volatility)

🎯 ANALYST DATA
• Price Targets (High, Low, Mean, Median)
• Analyst Recommendations
• Number of Analyst Opinions
• Earnings Estimates

🔧 AVAILABLE FUNCTIONS:
• get_market_cap(ticker) - Market capitalization only
• get_company_overview(ticker) - Company basic information
• get_valuation_metrics(ticker) - All valuation ratios
• get_financial_health(ticker) - Balance sheet & liquidity metrics
• get_profitability_metrics(ticker) - Profitability & efficiency ratios
• get_growth_metrics(ticker) - Growth rates & estimates
• get_dividend_metrics(ticker) - Dividend & shareholder return data
• get_trading_metrics(ticker) - Price & volume data
• get_analyst_data(ticker) - Analyst recommendations & targets
• get_complete_stock_analysis(ticker) - Comprehensive analysis with all KPIs
• list_available_kpis() - This function listing all available metrics

Each function provides detailed, formatted output for the specified category of metrics.";

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn apple() -> TickerRecord {
        TickerRecord {
            long_name: Some("Apple Inc.".into()),
            sector: Some("Technology".into()),
            industry: Some("Consumer Electronics".into()),
            country: Some("United States".into()),
            website: Some("https://www.apple.com".into()),
            full_time_employees: Some(161_000.0),
            long_business_summary: Some("Apple designs smartphones.".into()),
            market_cap: Some(3_000_000_000_000.0),
            trailing_pe: Some(31.25),
            total_cash: Some(1000.0),
            total_debt: Some(400.0),
            profit_margins: Some(0.2531),
            dividend_yield: Some(0.0044),
            ex_dividend_date: NaiveDate::from_ymd_opt(2024, 2, 9),
            regular_market_price: Some(189.5),
            recommendation_key: Some("buy".into()),
            number_of_analyst_opinions: Some(38.0),
            ..Default::default()
        }
    }

    #[test]
    fn test_empty_record_renders_every_report() {
        let record = TickerRecord::default();
        let reports = [
            company_overview("X", &record),
            valuation_metrics("X", &record),
            financial_health("X", &record),
            profitability_metrics("X", &record),
            growth_metrics("X", &record),
            dividend_metrics("X", &record),
            trading_metrics("X", &record),
            analyst_data("X", &record),
            complete_stock_analysis("X", &record),
        ];
        for report in &reports {
            assert!(report.contains("N/A"), "{report}");
            assert!(!report.starts_with('\n'));
            assert!(!report.ends_with('\n'));
        }
    }

    #[test]
    fn test_company_overview_layout() {
        let report = company_overview("AAPL", &apple());
        let lines: Vec<&str> = report.lines().collect();

        assert_eq!(lines[0], "Company Overview for AAPL:");
        assert_eq!(lines[1], RULE);
        assert_eq!(lines[2], "Company Name: Apple Inc.");
        assert_eq!(lines[7], "Employees: 161,000.00");
        assert_eq!(lines[8], "");
        assert_eq!(lines[9], "Business Summary:");
        assert_eq!(lines[10], "Apple designs smartphones....");
    }

    #[test]
    fn test_company_overview_without_summary() {
        let report = company_overview("AAPL", &TickerRecord::default());
        assert!(report.ends_with("Business Summary:\nNo description available..."));
    }

    #[test]
    fn test_company_overview_truncates_summary() {
        let record = TickerRecord {
            long_business_summary: Some("a".repeat(900)),
            ..Default::default()
        };
        let report = company_overview("AAPL", &record);
        let summary = report.lines().last().unwrap();
        assert_eq!(summary.len(), 503);
    }

    #[test]
    fn test_valuation_metrics() {
        let report = valuation_metrics("AAPL", &apple());
        assert!(report.starts_with("Valuation Metrics for AAPL:\n"));
        assert!(report.contains("\nMarket Cap: $3,000,000,000,000.00\n"));
        assert!(report.contains("\n\nPrice Ratios:\n  • P/E Ratio (TTM): 31.25\n"));
        assert!(report.contains("  • PEG Ratio: N/A"));
        assert!(report.ends_with("\n\nBook Value per Share: N/A"));
    }

    #[test]
    fn test_financial_health_net_cash() {
        let report = financial_health("AAPL", &apple());
        assert!(report.contains("  • Total Cash: $1,000.00"));
        assert!(report.contains("  • Total Debt: $400.00"));
        assert!(report.contains("  • Net Cash: $600.00"));

        let record = TickerRecord {
            total_cash: Some(1000.0),
            ..Default::default()
        };
        let report = financial_health("X", &record);
        assert!(report.contains("  • Total Debt: N/A"));
        assert!(report.contains("  • Net Cash: $1,000.00"));

        let report = financial_health("X", &TickerRecord::default());
        assert!(report.contains("  • Net Cash: $0.00"));
    }

    #[test]
    fn test_profitability_percentages() {
        let report = profitability_metrics("AAPL", &apple());
        assert!(report.contains("  • Profit Margin: 25.31%"));
        assert!(report.contains("  • Gross Margin: N/A"));
    }

    #[test]
    fn test_growth_estimates_reuse_earnings_growth() {
        let record = TickerRecord {
            earnings_growth: Some(0.1),
            ..Default::default()
        };
        let report = growth_metrics("X", &record);
        assert!(report.contains("  • Earnings Growth: 10.00%"));
        assert!(report.contains("  • Next Year EPS Growth: 10.00%"));
        assert!(report.contains("  • Next 5 Years Growth: 10.00%"));
    }

    #[test]
    fn test_dividend_metrics() {
        let report = dividend_metrics("AAPL", &apple());
        assert!(report.starts_with("Dividend & Shareholder Returns for AAPL:"));
        // absent rate falls back to zero rather than N/A
        assert!(report.contains("  • Annual Dividend Rate: $0.00"));
        assert!(report.contains("  • Dividend Yield: 0.44%"));
        assert!(report.contains("  • Ex-Dividend Date: 2024-02-09"));
        assert!(report.contains("  • Last Dividend Date: N/A"));
    }

    #[test]
    fn test_trading_and_analyst() {
        let report = trading_metrics("AAPL", &apple());
        assert!(report.contains("  • Current Price: $189.50"));
        assert!(report.contains("  • 52-Week Change: N/A"));

        let report = analyst_data("AAPL", &apple());
        assert!(report.contains("  • Recommendation Key: buy"));
        assert!(report.contains("  • Number of Analyst Opinions: 38.00"));
    }

    #[test]
    fn test_complete_analysis_layout() {
        let report = complete_stock_analysis("AAPL", &apple());
        let lines: Vec<&str> = report.lines().collect();

        assert_eq!(lines[0], "🏢 COMPLETE STOCK ANALYSIS: AAPL");
        assert_eq!(lines[1], WIDE_RULE);
        assert_eq!(lines[2], "");
        assert_eq!(lines[3], "📊 SNAPSHOT");
        assert_eq!(lines[4], "Company: Apple Inc.");
        assert_eq!(lines[5], "Sector: Technology | Industry: Consumer Electronics");
        assert_eq!(lines[6], "Current Price: $189.50");
        assert_eq!(lines[7], "Market Cap: $3,000,000,000,000.00");
        assert_eq!(*lines.last().unwrap(), WIDE_RULE);
        assert!(report.contains("P/E Ratio: 31.25 | Forward P/E: N/A"));
        assert!(report.contains("Recommendation: buy"));
    }

    #[test]
    fn test_complete_analysis_defaults_price_to_zero() {
        let report = complete_stock_analysis("X", &TickerRecord::default());
        assert!(report.contains("Current Price: $0.00"));
        assert!(report.contains("Market Cap: $0.00"));
        assert!(report.contains("Dividend Rate: N/A"));
    }

    #[test]
    fn test_rules_width() {
        assert_eq!(RULE.chars().count(), 50);
        assert_eq!(WIDE_RULE.chars().count(), 76);
    }

    #[test]
    fn test_market_cap_messages() {
        let msg = market_cap_found("AAPL", 3_000_000_000_000.0);
        assert_eq!(msg, "The market cap for AAPL is: $3,000,000,000,000");
        assert!(market_cap_maybe_valid("SPY").contains("index or ETF"));
        assert!(market_cap_invalid("ZZZZ").contains("ensure it's a valid"));
    }

    #[test]
    fn test_kpi_catalogue_is_static() {
        assert_eq!(list_available_kpis(), list_available_kpis());
        assert!(list_available_kpis().starts_with("📊 AVAILABLE STOCK KPIs & METRICS"));
        assert!(list_available_kpis().contains("get_complete_stock_analysis(ticker)"));
        assert!(list_available_kpis().ends_with("category of metrics."));
    }

    #[test]
    fn test_kpi_catalogue_lists_every_tool_once() {
        let catalogue = list_available_kpis();
        assert!(catalogue.contains("• get_market_cap(ticker) - Market capitalization only\n"));
        for name in [
            "get_market_cap(ticker)",
            "get_company_overview(ticker)",
            "get_valuation_metrics(ticker)",
            "get_financial_health(ticker)",
            "get_profitability_metrics(ticker)",
            "get_growth_metrics(ticker)",
            "get_dividend_metrics(ticker)",
            "get_trading_metrics(ticker)",
            "get_analyst_data(ticker)",
            "get_complete_stock_analysis(ticker)",
        ] {
            assert_eq!(catalogue.matches(name).count(), 1, "{name}");
        }
    }
}
