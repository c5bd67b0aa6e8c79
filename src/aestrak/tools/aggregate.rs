use std::collections::BTreeMap;

use crate::aestrak::tools::model::{PO_NUMBER_HEADER, Record};
use crate::aestrak::tools::normalize::to_number;

/// Header of the survey total column.
pub const TOTAL_HEADER: &str = "TOTAL";

/// Sums survey totals per trimmed order number. Missing or non-numeric totals
/// contribute zero.
pub fn totals_by_order(surveys: &[Record]) -> BTreeMap<String, f64> {
    let mut totals: BTreeMap<String, f64> = BTreeMap::new();
    for survey in surveys {
        let po_number = survey.key(PO_NUMBER_HEADER);
        *totals.entry(po_number).or_insert(0.0) += to_number(survey.get(TOTAL_HEADER));
    }
    totals
}
