//! Value formatting primitives shared by every report
//!
//! None of these functions fail. A value that cannot be rendered the way its
//! unit asks for falls back to its raw string form.

use crate::record::{Field, FieldValue, TickerRecord};

/// Placeholder shown for a missing field
pub const NOT_AVAILABLE: &str = "N/A";

/// Maximum number of characters of the business summary kept in a report
pub const SUMMARY_MAX_CHARS: usize = 500;

/// Marker appended to the (possibly cut) business summary
pub const ELLIPSIS: &str = "...";

/// How a numeric value is presented
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Unit {
    /// `1,234.50`
    Plain,
    /// `$1,234.50`
    Currency,
    /// Fraction rendered as percent: `0.1234` -> `12.34%`
    Percentage,
}

/// Field value, or `default` when the field is absent
pub fn safe_get(record: &TickerRecord, field: Field, default: FieldValue) -> FieldValue {
    record.value(field).unwrap_or(default)
}

/// Field value, or the `"N/A"` placeholder when the field is absent
pub fn safe_get_or_na(record: &TickerRecord, field: Field) -> FieldValue {
    safe_get(record, field, FieldValue::Text(NOT_AVAILABLE.to_string()))
}

/// Render a value with the given unit
///
/// Text and dates are returned in their raw form regardless of unit, as are
/// non-finite numbers.
pub fn format_number(value: &FieldValue, unit: Unit) -> String {
    match value {
        FieldValue::Number(n) if n.is_finite() => match unit {
            Unit::Percentage => format!("{:.2}%", n * 100.0),
            Unit::Currency => format!("${}", with_thousands(*n, 2)),
            Unit::Plain => with_thousands(*n, 2),
        },
        other => other.to_string(),
    }
}

/// Like [`format_number`], mapping an absent value to `"N/A"`
pub fn format_optional(value: Option<&FieldValue>, unit: Unit) -> String {
    value.map_or_else(|| NOT_AVAILABLE.to_string(), |v| format_number(v, unit))
}

/// Look up a field and format it, `"N/A"` when absent
pub fn format_field(record: &TickerRecord, field: Field, unit: Unit) -> String {
    format_optional(record.value(field).as_ref(), unit)
}

/// Fixed-point rendering with `,` grouping on the integer part
pub fn with_thousands(value: f64, decimals: usize) -> String {
    let fixed = format!("{:.*}", decimals, value.abs());
    let (int_part, frac_part) = match fixed.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (fixed.as_str(), None),
    };

    let digits = int_part.as_bytes();
    let mut grouped = String::with_capacity(fixed.len() + digits.len() / 3 + 1);
    if value < 0.0 {
        grouped.push('-');
    }
    for (i, digit) in digits.iter().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(char::from(*digit));
    }
    if let Some(frac) = frac_part {
        grouped.push('.');
        grouped.push_str(frac);
    }
    grouped
}

/// Keep the first 500 characters of a summary and append `...`
///
/// The cut ignores word boundaries. The marker is appended even when
/// nothing was cut.
pub fn truncate_summary(text: &str) -> String {
    let mut out: String = text.chars().take(SUMMARY_MAX_CHARS).collect();
    out.push_str(ELLIPSIS);
    out
}

/// `totalCash - totalDebt`
///
/// A missing operand counts as zero, so a record with neither field reports
/// a net cash of `0`. Absent and genuinely zero inputs are indistinguishable
/// in the result.
pub fn net_cash(record: &TickerRecord) -> f64 {
    record.total_cash.unwrap_or(0.0) - record.total_debt.unwrap_or(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(s: &str) -> FieldValue {
        FieldValue::Text(s.to_string())
    }

    #[test]
    fn test_missing_fields_are_na() {
        let record = TickerRecord::default();
        assert_eq!(safe_get_or_na(&record, Field::TrailingPe), text("N/A"));
        assert_eq!(format_field(&record, Field::MarketCap, Unit::Currency), "N/A");
        assert_eq!(format_optional(None, Unit::Percentage), "N/A");
    }

    #[test]
    fn test_safe_get_default() {
        let record = TickerRecord {
            dividend_rate: Some(0.96),
            ..Default::default()
        };
        assert_eq!(
            safe_get(&record, Field::DividendRate, FieldValue::Number(0.0)),
            FieldValue::Number(0.96)
        );
        assert_eq!(
            safe_get(&record, Field::TotalDebt, FieldValue::Number(0.0)),
            FieldValue::Number(0.0)
        );
    }

    #[test]
    fn test_na_passes_through_every_unit() {
        for unit in [Unit::Plain, Unit::Currency, Unit::Percentage] {
            assert_eq!(format_number(&text("N/A"), unit), "N/A");
        }
    }

    #[test]
    fn test_format_units() {
        assert_eq!(format_number(&FieldValue::Number(0.1234), Unit::Percentage), "12.34%");
        assert_eq!(
            format_number(&FieldValue::Number(1_234_567.0), Unit::Currency),
            "$1,234,567.00"
        );
        assert_eq!(format_number(&FieldValue::Number(1234.5), Unit::Plain), "1,234.50");
        assert_eq!(format_number(&FieldValue::Number(12.0), Unit::Plain), "12.00");
        assert_eq!(format_number(&FieldValue::Number(-0.05), Unit::Percentage), "-5.00%");
    }

    #[test]
    fn test_non_numeric_passthrough() {
        assert_eq!(format_number(&text("abc"), Unit::Currency), "abc");
        assert_eq!(format_number(&text("abc"), Unit::Percentage), "abc");
        assert_eq!(format_number(&FieldValue::Number(f64::NAN), Unit::Currency), "NaN");
        assert_eq!(format_number(&FieldValue::Number(f64::INFINITY), Unit::Plain), "inf");
    }

    #[test]
    fn test_with_thousands() {
        assert_eq!(with_thousands(0.0, 2), "0.00");
        assert_eq!(with_thousands(999.999, 2), "1,000.00");
        assert_eq!(with_thousands(3_000_000_000_000.0, 0), "3,000,000,000,000");
        assert_eq!(with_thousands(-600.0, 2), "-600.00");
        assert_eq!(with_thousands(-1_234_567.891, 2), "-1,234,567.89");
        assert_eq!(with_thousands(100_000.0, 0), "100,000");
    }

    #[test]
    fn test_net_cash() {
        let record = TickerRecord {
            total_cash: Some(1000.0),
            total_debt: Some(400.0),
            ..Default::default()
        };
        assert_eq!(
            format_number(&FieldValue::Number(net_cash(&record)), Unit::Currency),
            "$600.00"
        );

        let record = TickerRecord {
            total_cash: Some(1000.0),
            ..Default::default()
        };
        assert_eq!(
            format_number(&FieldValue::Number(net_cash(&record)), Unit::Currency),
            "$1,000.00"
        );

        let record = TickerRecord {
            total_debt: Some(250.0),
            ..Default::default()
        };
        assert_eq!(
            format_number(&FieldValue::Number(net_cash(&record)), Unit::Currency),
            "$-250.00"
        );
    }

    #[test]
    fn test_truncate_summary() {
        let long = "x".repeat(750);
        let cut = truncate_summary(&long);
        assert_eq!(cut.len(), 503);
        assert!(cut.ends_with("..."));
        assert_eq!(&cut[..500], &long[..500]);

        assert_eq!(truncate_summary("Short."), "Short....");
    }

    #[test]
    fn test_truncate_counts_characters() {
        let long = "é".repeat(600);
        let cut = truncate_summary(&long);
        assert_eq!(cut.chars().count(), 503);
    }
}
