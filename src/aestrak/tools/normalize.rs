//! Lenient coercion of cell values. Nothing in this module fails: values
//! that cannot be interpreted fall back to zero or to "no value".

use chrono::NaiveDate;

use crate::aestrak::tools::model::CellValue;

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Normalizes a date-like cell.
///
/// Dates pass through, timestamps are truncated to their date, and text is
/// parsed strictly as `YYYY-MM-DD`. Every other value yields `None`.
pub fn normalize_date(cell: Option<&CellValue>) -> Option<NaiveDate> {
    match cell? {
        CellValue::Date(date) => Some(*date),
        CellValue::Timestamp(timestamp) => Some(timestamp.date()),
        CellValue::Text(text) if !text.is_empty() => {
            NaiveDate::parse_from_str(text, DATE_FORMAT).ok()
        }
        _ => None,
    }
}

/// Coerces a monetary cell to a number.
///
/// Text is trimmed and stripped of thousands separators before parsing.
/// Missing, empty, and non-numeric values count as zero.
pub fn to_number(cell: Option<&CellValue>) -> f64 {
    match cell {
        Some(CellValue::Number(value)) if value.is_finite() => *value,
        Some(CellValue::Text(text)) => text
            .trim()
            .replace(',', "")
            .parse::<f64>()
            .ok()
            .filter(|value| value.is_finite())
            .unwrap_or(0.0),
        _ => 0.0,
    }
}

/// Rounds to two decimal places, half away from zero.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
