use std::collections::{BTreeMap, HashMap};

use tracing::debug;
use uuid::Uuid;

use crate::aestrak::tools::aggregate::{TOTAL_HEADER, totals_by_order};
use crate::aestrak::tools::ids;
use crate::aestrak::tools::model::{
    PO_NUMBER_HEADER, PurchaseOrder, QS_NUMBER_HEADER, QuantitySurvey, Record, SeedData,
};
use crate::aestrak::tools::normalize::{normalize_date, round2, to_number};

const DEFAULT_STATUS: &str = "open";

const STATUS_HEADER: &str = "Status";
const COMPANY_HEADER: &str = "Company";
const ORDER_SHORT_TEXT_HEADER: &str = "Order short text";
const ORDER_VALUE_HEADER: &str = "Order value";
const VENDOR_ID_HEADER: &str = "Vendor ID";
const VENDOR_SHORT_TERM_HEADER: &str = "Short term";
const COORDINATOR_HEADERS: &[&str] = &["Name", "Work coordinator"];
const START_DATE_HEADER: &str = "Start date";
const COMPLETION_DATE_HEADER: &str = "Date of completion";

const QS_SHORT_TEXT_HEADER: &str = "Quantity survey short text";
const CONTRACTOR_CONTACT_HEADERS: &[&str] = &["Contractor contact", "Contractor Contact"];
const CREATED_HEADER: &str = "CREATED";
const TRANSFERRED_HEADER: &str = "TRANSFERED";
const ACCEPTED_HEADER: &str = "Accepted";
const INVOICE_NUMBER_HEADER: &str = "Invoice number";
const INVOICE_DATE_HEADER: &str = "Invoice Document Date";
const ACCOUNTING_DOCUMENT_HEADER: &str = "Accounting Document";

/// Spend figures derived for one purchase order.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Budget {
    pub total_spent: f64,
    pub remaining_budget: f64,
    pub utilization_percent: f64,
}

impl Budget {
    /// Computes the figures for an order value and the spend booked against
    /// it. The remaining budget is floored at zero and utilization is zero
    /// for a zero order value. Utilization is not capped at 100.
    pub fn compute(order_value: f64, total_spent: f64) -> Self {
        let remaining_budget = (order_value - total_spent).max(0.0);
        let utilization_percent = if order_value != 0.0 {
            round2(total_spent / order_value * 100.0)
        } else {
            0.0
        };
        Self {
            total_spent: round2(total_spent),
            remaining_budget: round2(remaining_budget),
            utilization_percent,
        }
    }
}

/// Runs the full transformation over the loaded rows of both exports.
pub fn build_seed_data(
    po_records: &[Record],
    qs_records: &[Record],
    organization_id: Uuid,
) -> SeedData {
    let totals = totals_by_order(qs_records);
    debug!(order_count = totals.len(), "aggregated survey totals");

    let purchase_orders = build_purchase_orders(po_records, &totals, organization_id);
    let po_ids = purchase_order_ids(&purchase_orders);
    let quantity_surveys = build_quantity_surveys(qs_records, &po_ids, organization_id);

    SeedData {
        purchase_orders,
        quantity_surveys,
    }
}

/// Maps purchase-order records to output rows using the aggregated spend.
pub fn build_purchase_orders(
    records: &[Record],
    totals: &BTreeMap<String, f64>,
    organization_id: Uuid,
) -> Vec<PurchaseOrder> {
    records
        .iter()
        .map(|record| {
            let po_number = record.key(PO_NUMBER_HEADER);
            let order_value = to_number(record.get(ORDER_VALUE_HEADER));
            let total_spent = totals.get(&po_number).copied().unwrap_or(0.0);
            let budget = Budget::compute(order_value, total_spent);

            PurchaseOrder {
                id: ids::purchase_order_id(&po_number),
                organization_id,
                status: record
                    .text(STATUS_HEADER)
                    .unwrap_or_else(|| DEFAULT_STATUS.to_string()),
                company: record.text(COMPANY_HEADER),
                order_short_text: record.text(ORDER_SHORT_TEXT_HEADER),
                order_value,
                total_spent: budget.total_spent,
                remaining_budget: budget.remaining_budget,
                utilization_percent: budget.utilization_percent,
                vendor_id: record.text(VENDOR_ID_HEADER),
                vendor_short_term: record.text(VENDOR_SHORT_TERM_HEADER),
                work_coordinator_name: record.first_text(COORDINATOR_HEADERS),
                start_date: normalize_date(record.get(START_DATE_HEADER)),
                completion_date: normalize_date(record.get(COMPLETION_DATE_HEADER)),
                purchase_order_no: po_number,
            }
        })
        .collect()
}

/// Indexes purchase-order identifiers by order number.
pub fn purchase_order_ids(purchase_orders: &[PurchaseOrder]) -> HashMap<String, Uuid> {
    purchase_orders
        .iter()
        .map(|po| (po.purchase_order_no.clone(), po.id))
        .collect()
}

/// Maps survey records to output rows, linking each to its purchase order
/// when one was loaded.
pub fn build_quantity_surveys(
    records: &[Record],
    po_ids: &HashMap<String, Uuid>,
    organization_id: Uuid,
) -> Vec<QuantitySurvey> {
    records
        .iter()
        .map(|record| {
            let po_number = record.key(PO_NUMBER_HEADER);
            let qs_number = record.key(QS_NUMBER_HEADER);
            let purchase_order_id = po_ids.get(&po_number).copied();
            if purchase_order_id.is_none() {
                debug!(%po_number, %qs_number, "survey has no matching purchase order");
            }

            QuantitySurvey {
                id: ids::quantity_survey_id(&po_number, &qs_number),
                organization_id,
                purchase_order_id,
                quantity_survey_short_text: record.text(QS_SHORT_TEXT_HEADER),
                contractor_contact: record.first_text(CONTRACTOR_CONTACT_HEADERS),
                vendor_id: record.text(VENDOR_ID_HEADER),
                total: to_number(record.get(TOTAL_HEADER)),
                created_date: normalize_date(record.get(CREATED_HEADER)),
                transfer_date: normalize_date(record.get(TRANSFERRED_HEADER)),
                accepted_date: normalize_date(record.get(ACCEPTED_HEADER)),
                invoice_number: record.text(INVOICE_NUMBER_HEADER),
                invoice_date: normalize_date(record.get(INVOICE_DATE_HEADER)),
                accounting_document: record.text(ACCOUNTING_DOCUMENT_HEADER),
                purchase_order_no: po_number,
                qs_number,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;
    use crate::aestrak::tools::model::CellValue;

    fn text(value: &str) -> CellValue {
        CellValue::Text(value.to_string())
    }

    fn order(po_number: &str, value: f64) -> Record {
        [
            (PO_NUMBER_HEADER, text(po_number)),
            (ORDER_VALUE_HEADER, CellValue::Number(value)),
        ]
        .into_iter()
        .collect()
    }

    fn survey(po_number: &str, qs_number: &str, total: f64) -> Record {
        [
            (PO_NUMBER_HEADER, text(po_number)),
            (QS_NUMBER_HEADER, text(qs_number)),
            (TOTAL_HEADER, CellValue::Number(total)),
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn linked_surveys_drive_budget_figures() {
        let org = Uuid::nil();
        let seed = build_seed_data(
            &[order("PO-1", 1000.0)],
            &[survey("PO-1", "1", 300.0), survey("PO-1", "2", 150.0)],
            org,
        );

        let po = &seed.purchase_orders[0];
        assert_eq!(po.total_spent, 450.0);
        assert_eq!(po.remaining_budget, 550.0);
        assert_eq!(po.utilization_percent, 45.0);
        assert_eq!(po.status, "open");
        assert_eq!(po.id, ids::purchase_order_id("PO-1"));

        assert_eq!(seed.quantity_surveys.len(), 2);
        for qs in &seed.quantity_surveys {
            assert_eq!(qs.purchase_order_id, Some(po.id));
            assert_eq!(qs.organization_id, org);
        }
        assert_eq!(
            seed.quantity_surveys[1].id,
            ids::quantity_survey_id("PO-1", "2")
        );
    }

    #[test]
    fn orders_without_surveys_keep_full_budget() {
        let seed = build_seed_data(&[order("PO-1", 800.0), order("PO-2", 0.0)], &[], Uuid::nil());

        let first = &seed.purchase_orders[0];
        assert_eq!(first.total_spent, 0.0);
        assert_eq!(first.remaining_budget, 800.0);
        assert_eq!(first.utilization_percent, 0.0);

        let second = &seed.purchase_orders[1];
        assert_eq!(second.remaining_budget, 0.0);
        assert_eq!(second.utilization_percent, 0.0);
    }

    #[test]
    fn overspend_floors_remaining_budget() {
        let budget = Budget::compute(100.0, 250.0);
        assert_eq!(budget.remaining_budget, 0.0);
        assert_eq!(budget.utilization_percent, 250.0);

        for (value, spent) in [(0.0, 10.0), (10.0, 0.0), (5.5, 5.5), (1.0, 1e9)] {
            let budget = Budget::compute(value, spent);
            assert!(budget.remaining_budget >= 0.0);
        }
    }

    #[test]
    fn zero_order_value_never_divides() {
        let budget = Budget::compute(0.0, 500.0);
        assert_eq!(budget.utilization_percent, 0.0);
        assert!(budget.utilization_percent.is_finite());
    }

    #[test]
    fn orphan_survey_has_no_parent() {
        let seed = build_seed_data(&[order("PO-1", 10.0)], &[survey("PO-9", "1", 5.0)], Uuid::nil());
        assert_eq!(seed.quantity_surveys[0].purchase_order_id, None);
        assert_eq!(seed.purchase_orders[0].total_spent, 0.0);
    }

    #[test]
    fn order_numbers_are_trimmed_before_joining() {
        let seed = build_seed_data(
            &[order("  PO-1 ", 100.0)],
            &[survey("PO-1  ", " 7 ", 25.0)],
            Uuid::nil(),
        );
        let po = &seed.purchase_orders[0];
        let qs = &seed.quantity_surveys[0];
        assert_eq!(po.purchase_order_no, "PO-1");
        assert_eq!(po.total_spent, 25.0);
        assert_eq!(qs.qs_number, "7");
        assert_eq!(qs.purchase_order_id, Some(po.id));
    }

    #[test]
    fn passthrough_fields_and_header_variants() {
        let po_record: Record = [
            (PO_NUMBER_HEADER, text("PO-1")),
            (STATUS_HEADER, text("closed")),
            ("Work coordinator", text("Sam")),
            (START_DATE_HEADER, text("2024-01-15")),
            (COMPLETION_DATE_HEADER, text("soon")),
        ]
        .into_iter()
        .collect();
        let qs_record: Record = [
            (PO_NUMBER_HEADER, text("PO-1")),
            (QS_NUMBER_HEADER, CellValue::Number(3.0)),
            ("Contractor Contact", text("O'Brien")),
            (INVOICE_DATE_HEADER, text("2024-02-01")),
        ]
        .into_iter()
        .collect();

        let seed = build_seed_data(&[po_record], &[qs_record], Uuid::nil());
        let po = &seed.purchase_orders[0];
        assert_eq!(po.status, "closed");
        assert_eq!(po.work_coordinator_name.as_deref(), Some("Sam"));
        assert_eq!(po.start_date, NaiveDate::from_ymd_opt(2024, 1, 15));
        assert_eq!(po.completion_date, None);
        assert_eq!(po.order_value, 0.0);

        let qs = &seed.quantity_surveys[0];
        assert_eq!(qs.qs_number, "3");
        assert_eq!(qs.contractor_contact.as_deref(), Some("O'Brien"));
        assert_eq!(qs.invoice_date, NaiveDate::from_ymd_opt(2024, 2, 1));
        assert_eq!(qs.total, 0.0);
    }
}
