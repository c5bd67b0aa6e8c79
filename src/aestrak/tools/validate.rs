//! Non-fatal diagnostics over the loaded sheets. Findings are reported to the
//! caller and logged; they never stop a run.

use std::collections::BTreeSet;

use tracing::warn;

use crate::aestrak::tools::model::{PO_NUMBER_HEADER, QS_NUMBER_HEADER, Record};

/// Columns the purchase-order export is expected to carry.
pub const EXPECTED_PO_COLUMNS: &[&str] = &[
    "Purchase order No.",
    "Status",
    "Company",
    "Order short text",
    "Order value",
    "Vendor ID",
    "Short term",
    "Name",
    "Start date",
    "Date of completion",
];

/// Columns the quantity-survey export is expected to carry.
pub const EXPECTED_QS_COLUMNS: &[&str] = &[
    "Purchase order No.",
    "Q.S. number",
    "Quantity survey short text",
    "Contractor contact",
    "Vendor ID",
    "TOTAL",
    "CREATED",
    "TRANSFERED",
    "Accepted",
    "Invoice number",
    "Invoice Document Date",
    "Accounting Document",
];

/// Difference between a header row and the expected columns.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ColumnReport {
    pub missing: Vec<String>,
    pub unexpected: Vec<String>,
}

impl ColumnReport {
    pub fn is_clean(&self) -> bool {
        self.missing.is_empty() && self.unexpected.is_empty()
    }
}

/// Compares a sheet's headers with the expected column set and logs any
/// difference under the given sheet label.
pub fn check_columns(sheet: &str, headers: &[String], expected: &[&str]) -> ColumnReport {
    let present: BTreeSet<&str> = headers.iter().map(String::as_str).collect();
    let expected_set: BTreeSet<&str> = expected.iter().copied().collect();

    let report = ColumnReport {
        missing: expected
            .iter()
            .filter(|column| !present.contains(*column))
            .map(|column| column.to_string())
            .collect(),
        unexpected: headers
            .iter()
            .filter(|header| !expected_set.contains(header.as_str()))
            .cloned()
            .collect(),
    };

    for column in &report.missing {
        warn!(sheet, column = %column, "expected column is missing");
    }
    for column in &report.unexpected {
        warn!(sheet, column = %column, "unexpected column");
    }
    report
}

/// Returns purchase-order numbers that occur more than once, in first-repeat
/// order, and logs each one.
pub fn duplicate_purchase_orders(records: &[Record]) -> Vec<String> {
    let duplicates = find_duplicates(records.iter().map(|record| record.key(PO_NUMBER_HEADER)));
    for po_number in &duplicates {
        warn!(%po_number, "duplicate purchase order number");
    }
    duplicates
}

/// Returns `order:survey` keys that occur more than once and logs each one.
pub fn duplicate_quantity_surveys(records: &[Record]) -> Vec<String> {
    let duplicates = find_duplicates(records.iter().map(|record| {
        format!(
            "{}:{}",
            record.key(PO_NUMBER_HEADER),
            record.key(QS_NUMBER_HEADER)
        )
    }));
    for key in &duplicates {
        warn!(%key, "duplicate quantity survey");
    }
    duplicates
}

fn find_duplicates(keys: impl Iterator<Item = String>) -> Vec<String> {
    let mut seen = BTreeSet::new();
    let mut reported = BTreeSet::new();
    let mut duplicates = Vec::new();
    for key in keys {
        if !seen.insert(key.clone()) && reported.insert(key.clone()) {
            duplicates.push(key);
        }
    }
    duplicates
}
