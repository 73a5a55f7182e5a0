//! Ticker record: the typed view of one provider lookup
//!
//! Every field a report can display is declared once in the
//! `ticker_fields!` table below. The table generates the [`Field`] key enum,
//! the [`TickerRecord`] struct with one optional member per field, and the
//! accessors that connect the two. Provider clients never build a record by
//! hand: they collect a flat key/value map and go through
//! [`TickerRecord::from_flat_map`], which coerces each value to the field's
//! declared kind and silently drops anything that does not fit.

use chrono::{DateTime, NaiveDate};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// Shape of the value a field holds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Number,
    Text,
    Date,
}

/// A single field value as handed to the formatter
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Number(f64),
    Text(String),
    Date(NaiveDate),
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Number(n) => write!(f, "{n}"),
            FieldValue::Text(s) => f.write_str(s),
            FieldValue::Date(d) => write!(f, "{}", d.format("%Y-%m-%d")),
        }
    }
}

impl From<&f64> for FieldValue {
    fn from(value: &f64) -> Self {
        FieldValue::Number(*value)
    }
}

impl From<&String> for FieldValue {
    fn from(value: &String) -> Self {
        FieldValue::Text(value.clone())
    }
}

impl From<&NaiveDate> for FieldValue {
    fn from(value: &NaiveDate) -> Self {
        FieldValue::Date(*value)
    }
}

/// Maps a record member type to its [`FieldKind`]
trait KindOf {
    const KIND: FieldKind;
}

impl KindOf for f64 {
    const KIND: FieldKind = FieldKind::Number;
}

impl KindOf for String {
    const KIND: FieldKind = FieldKind::Text;
}

impl KindOf for NaiveDate {
    const KIND: FieldKind = FieldKind::Date;
}

macro_rules! ticker_fields {
    ($( $variant:ident => $member:ident : $ty:ty = $key:literal ),+ $(,)?) => {
        /// Provider keys consumed by the reports
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum Field {
            $($variant),+
        }

        impl Field {
            /// Every declared field, in table order
            pub const ALL: &'static [Field] = &[$(Field::$variant),+];

            /// Provider key, e.g. `marketCap`
            pub fn key(self) -> &'static str {
                match self {
                    $(Field::$variant => $key),+
                }
            }

            /// Parse a provider key
            pub fn from_key(key: &str) -> Option<Self> {
                match key {
                    $($key => Some(Field::$variant),)+
                    _ => None,
                }
            }

            /// Kind of value this field holds
            pub fn kind(self) -> FieldKind {
                match self {
                    $(Field::$variant => <$ty as KindOf>::KIND),+
                }
            }
        }

        /// Fundamentals and quote data for one ticker
        ///
        /// Absent members mean the provider did not report the field.
        #[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
        pub struct TickerRecord {
            $(
                #[serde(rename = $key, default, skip_serializing_if = "Option::is_none")]
                pub $member: Option<$ty>,
            )+
        }

        impl TickerRecord {
            /// Value of a field, if present
            pub fn value(&self, field: Field) -> Option<FieldValue> {
                match field {
                    $(Field::$variant => self.$member.as_ref().map(FieldValue::from)),+
                }
            }

            /// True when the provider reported nothing at all
            pub fn is_empty(&self) -> bool {
                true $(&& self.$member.is_none())+
            }

            /// Number of populated fields
            pub fn populated(&self) -> usize {
                0 $(+ usize::from(self.$member.is_some()))+
            }
        }
    };
}

ticker_fields! {
    // company profile
    LongName => long_name: String = "longName",
    Sector => sector: String = "sector",
    Industry => industry: String = "industry",
    Country => country: String = "country",
    Website => website: String = "website",
    FullTimeEmployees => full_time_employees: f64 = "fullTimeEmployees",
    LongBusinessSummary => long_business_summary: String = "longBusinessSummary",

    // valuation
    MarketCap => market_cap: f64 = "marketCap",
    EnterpriseValue => enterprise_value: f64 = "enterpriseValue",
    TrailingPe => trailing_pe: f64 = "trailingPE",
    ForwardPe => forward_pe: f64 = "forwardPE",
    PriceToBook => price_to_book: f64 = "priceToBook",
    PriceToSales => price_to_sales: f64 = "priceToSalesTrailing12Months",
    PegRatio => peg_ratio: f64 = "pegRatio",
    EnterpriseToRevenue => enterprise_to_revenue: f64 = "enterpriseToRevenue",
    EnterpriseToEbitda => enterprise_to_ebitda: f64 = "enterpriseToEbitda",
    BookValue => book_value: f64 = "bookValue",

    // balance sheet
    TotalCash => total_cash: f64 = "totalCash",
    TotalDebt => total_debt: f64 = "totalDebt",
    CurrentRatio => current_ratio: f64 = "currentRatio",
    QuickRatio => quick_ratio: f64 = "quickRatio",
    DebtToEquity => debt_to_equity: f64 = "debtToEquity",
    TotalCashPerShare => total_cash_per_share: f64 = "totalCashPerShare",
    WorkingCapital => working_capital: f64 = "workingCapital",
    FreeCashflow => free_cashflow: f64 = "freeCashflow",

    // profitability
    TotalRevenue => total_revenue: f64 = "totalRevenue",
    NetIncomeToCommon => net_income_to_common: f64 = "netIncomeToCommon",
    Ebitda => ebitda: f64 = "ebitda",
    ProfitMargins => profit_margins: f64 = "profitMargins",
    OperatingMargins => operating_margins: f64 = "operatingMargins",
    GrossMargins => gross_margins: f64 = "grossMargins",
    EbitdaMargins => ebitda_margins: f64 = "ebitdaMargins",
    ReturnOnEquity => return_on_equity: f64 = "returnOnEquity",
    ReturnOnAssets => return_on_assets: f64 = "returnOnAssets",
    TrailingEps => trailing_eps: f64 = "trailingEps",
    ForwardEps => forward_eps: f64 = "forwardEps",
    RevenuePerShare => revenue_per_share: f64 = "revenuePerShare",

    // growth
    RevenueGrowth => revenue_growth: f64 = "revenueGrowth",
    EarningsGrowth => earnings_growth: f64 = "earningsGrowth",
    RevenueQuarterlyGrowth => revenue_quarterly_growth: f64 = "revenueQuarterlyGrowth",
    EarningsQuarterlyGrowth => earnings_quarterly_growth: f64 = "earningsQuarterlyGrowth",
    TangibleBookValue => tangible_book_value: f64 = "tangibleBookValue",

    // dividends and shares
    DividendRate => dividend_rate: f64 = "dividendRate",
    DividendYield => dividend_yield: f64 = "dividendYield",
    PayoutRatio => payout_ratio: f64 = "payoutRatio",
    ExDividendDate => ex_dividend_date: NaiveDate = "exDividendDate",
    LastDividendDate => last_dividend_date: NaiveDate = "lastDividendDate",
    SharesOutstanding => shares_outstanding: f64 = "sharesOutstanding",
    FloatShares => float_shares: f64 = "floatShares",
    SharesShort => shares_short: f64 = "sharesShort",
    ShortRatio => short_ratio: f64 = "shortRatio",
    ShortPercentOfFloat => short_percent_of_float: f64 = "shortPercentOfFloat",
    SharesShortPriorMonth => shares_short_prior_month: f64 = "sharesShortPriorMonth",

    // trading
    RegularMarketPrice => regular_market_price: f64 = "regularMarketPrice",
    RegularMarketPreviousClose => regular_market_previous_close: f64 = "regularMarketPreviousClose",
    RegularMarketOpen => regular_market_open: f64 = "regularMarketOpen",
    RegularMarketDayHigh => regular_market_day_high: f64 = "regularMarketDayHigh",
    RegularMarketDayLow => regular_market_day_low: f64 = "regularMarketDayLow",
    FiftyTwoWeekHigh => fifty_two_week_high: f64 = "fiftyTwoWeekHigh",
    FiftyTwoWeekLow => fifty_two_week_low: f64 = "fiftyTwoWeekLow",
    FiftyDayAverage => fifty_day_average: f64 = "fiftyDayAverage",
    TwoHundredDayAverage => two_hundred_day_average: f64 = "twoHundredDayAverage",
    RegularMarketVolume => regular_market_volume: f64 = "regularMarketVolume",
    AverageVolume10Days => average_volume_10_days: f64 = "averageVolume10days",
    AverageVolume => average_volume: f64 = "averageVolume",
    Beta => beta: f64 = "beta",
    FiftyTwoWeekChange => fifty_two_week_change: f64 = "52WeekChange",

    // analysts
    TargetHighPrice => target_high_price: f64 = "targetHighPrice",
    TargetLowPrice => target_low_price: f64 = "targetLowPrice",
    TargetMeanPrice => target_mean_price: f64 = "targetMeanPrice",
    TargetMedianPrice => target_median_price: f64 = "targetMedianPrice",
    RecommendationMean => recommendation_mean: f64 = "recommendationMean",
    RecommendationKey => recommendation_key: String = "recommendationKey",
    NumberOfAnalystOpinions => number_of_analyst_opinions: f64 = "numberOfAnalystOpinions",
}

impl TickerRecord {
    /// Build a record from a flat provider map keyed by provider key
    ///
    /// Unknown keys are ignored. Values are coerced to the field's kind:
    /// numeric strings become numbers, epoch seconds become dates, Yahoo's
    /// `{"raw": .., "fmt": ..}` wrappers are unwrapped. Values that cannot be
    /// coerced are treated as absent.
    pub fn from_flat_map(map: &Map<String, Value>) -> Self {
        let mut clean = Map::new();
        for (key, value) in map {
            let Some(field) = Field::from_key(key) else {
                continue;
            };
            if let Some(coerced) = coerce(field.kind(), value) {
                clean.insert(key.clone(), coerced);
            }
        }

        // Every value now has the JSON shape its member expects.
        serde_json::from_value(Value::Object(clean)).unwrap_or_default()
    }
}

fn is_placeholder(s: &str) -> bool {
    matches!(s.trim(), "" | "None" | "-" | "N/A" | "null")
}

fn coerce(kind: FieldKind, value: &Value) -> Option<Value> {
    if let Value::Object(obj) = value {
        return obj.get("raw").and_then(|raw| coerce(kind, raw));
    }

    match kind {
        FieldKind::Number => match value {
            Value::Number(n) => n.as_f64().filter(|f| f.is_finite()).map(Value::from),
            Value::String(s) if !is_placeholder(s) => s
                .trim()
                .parse::<f64>()
                .ok()
                .filter(|f| f.is_finite())
                .map(Value::from),
            _ => None,
        },
        FieldKind::Text => match value {
            Value::String(s) if !is_placeholder(s) => Some(Value::String(s.clone())),
            Value::Number(n) => Some(Value::String(n.to_string())),
            _ => None,
        },
        FieldKind::Date => match value {
            Value::Number(n) => n
                .as_i64()
                .or_else(|| n.as_f64().map(|f| f as i64))
                .and_then(|secs| DateTime::from_timestamp(secs, 0))
                .map(|dt| Value::String(dt.date_naive().format("%Y-%m-%d").to_string())),
            Value::String(s) if !is_placeholder(s) => NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
                .ok()
                .map(|d| Value::String(d.format("%Y-%m-%d").to_string())),
            _ => None,
        },
    }
}
