use std::collections::BTreeMap;

use chrono::{NaiveDate, NaiveDateTime};
use uuid::Uuid;

/// Header of the order number column, shared by both exports.
pub const PO_NUMBER_HEADER: &str = "Purchase order No.";
/// Header of the survey number column in the quantity-survey export.
pub const QS_NUMBER_HEADER: &str = "Q.S. number";

/// Target table for purchase orders.
pub const PURCHASE_ORDERS_TABLE: &str = "public.purchase_orders";
/// Target table for quantity surveys.
pub const QUANTITY_SURVEYS_TABLE: &str = "public.quantity_surveys";

/// Column order of the purchase-order INSERT statement.
pub const PURCHASE_ORDER_COLUMNS: &[&str] = &[
    "id",
    "organization_id",
    "purchase_order_no",
    "status",
    "company",
    "order_short_text",
    "order_value",
    "total_spent",
    "remaining_budget",
    "utilization_percent",
    "vendor_id",
    "vendor_short_term",
    "work_coordinator_name",
    "start_date",
    "completion_date",
];

/// Column order of the quantity-survey INSERT statement.
pub const QUANTITY_SURVEY_COLUMNS: &[&str] = &[
    "id",
    "organization_id",
    "purchase_order_id",
    "purchase_order_no",
    "qs_number",
    "quantity_survey_short_text",
    "contractor_contact",
    "vendor_id",
    "total",
    "created_date",
    "transfer_date",
    "accepted_date",
    "invoice_number",
    "invoice_date",
    "accounting_document",
];

/// A single spreadsheet cell, detached from the reader that produced it.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    /// Blank cell, or a cell past the end of a short row.
    Empty,
    /// Text literal exactly as stored in the sheet.
    Text(String),
    /// Numeric literal. Integers are widened to `f64`.
    Number(f64),
    /// Boolean literal.
    Bool(bool),
    /// Calendar date without a time component.
    Date(NaiveDate),
    /// Date with a time of day.
    Timestamp(NaiveDateTime),
}

impl CellValue {
    /// Returns `true` for blank cells and empty strings.
    pub fn is_empty(&self) -> bool {
        match self {
            CellValue::Empty => true,
            CellValue::Text(value) => value.is_empty(),
            _ => false,
        }
    }

    /// Renders the cell as display text. Integral numbers render without a
    /// fractional part, so the numeric cell `4500012345` reads as
    /// `"4500012345"`.
    pub fn display_text(&self) -> String {
        match self {
            CellValue::Empty => String::new(),
            CellValue::Text(value) => value.clone(),
            CellValue::Number(value) => value.to_string(),
            CellValue::Bool(value) => value.to_string(),
            CellValue::Date(value) => value.to_string(),
            CellValue::Timestamp(value) => value.to_string(),
        }
    }
}

/// A source row: header name → cell value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Record {
    fields: BTreeMap<String, CellValue>,
}

impl Record {
    /// Creates an empty record.
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or replaces a field. A later duplicate header wins.
    pub fn insert(&mut self, header: impl Into<String>, value: CellValue) {
        self.fields.insert(header.into(), value);
    }

    /// Returns the cell stored under `header`, if the header exists.
    pub fn get(&self, header: &str) -> Option<&CellValue> {
        self.fields.get(header)
    }

    /// Returns `true` when the header is absent or its cell is empty.
    pub fn is_blank(&self, header: &str) -> bool {
        self.get(header).is_none_or(CellValue::is_empty)
    }

    /// Returns the trimmed display text of a key column, or an empty string
    /// when the column is absent.
    pub fn key(&self, header: &str) -> String {
        self.get(header)
            .map(|cell| cell.display_text().trim().to_string())
            .unwrap_or_default()
    }

    /// Returns the display text of a column, or `None` when it is absent or
    /// empty.
    pub fn text(&self, header: &str) -> Option<String> {
        self.get(header)
            .filter(|cell| !cell.is_empty())
            .map(CellValue::display_text)
    }

    /// Returns the first non-empty text among the given header variants.
    pub fn first_text(&self, headers: &[&str]) -> Option<String> {
        headers.iter().find_map(|header| self.text(header))
    }

    /// Iterates over the header names present in the record.
    pub fn headers(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }
}

impl<K: Into<String>> FromIterator<(K, CellValue)> for Record {
    fn from_iter<I: IntoIterator<Item = (K, CellValue)>>(iter: I) -> Self {
        let mut record = Record::new();
        for (header, value) in iter {
            record.insert(header, value);
        }
        record
    }
}

/// Typed value ready to be rendered as a SQL literal.
#[derive(Debug, Clone, PartialEq)]
pub enum SqlValue {
    Null,
    Date(NaiveDate),
    Number(f64),
    Text(String),
}

impl From<Option<String>> for SqlValue {
    fn from(value: Option<String>) -> Self {
        value.map(SqlValue::Text).unwrap_or(SqlValue::Null)
    }
}

impl From<Option<NaiveDate>> for SqlValue {
    fn from(value: Option<NaiveDate>) -> Self {
        value.map(SqlValue::Date).unwrap_or(SqlValue::Null)
    }
}

impl From<Option<Uuid>> for SqlValue {
    fn from(value: Option<Uuid>) -> Self {
        value
            .map(|id| SqlValue::Text(id.to_string()))
            .unwrap_or(SqlValue::Null)
    }
}

/// Output records that can be looked up column by column when rendering an
/// INSERT statement.
pub trait TableRow {
    /// Returns the value of `column`, or [`SqlValue::Null`] for columns the
    /// row does not know.
    fn column_value(&self, column: &str) -> SqlValue;
}

/// Purchase order with its derived budget figures.
#[derive(Debug, Clone, PartialEq)]
pub struct PurchaseOrder {
    pub id: Uuid,
    pub organization_id: Uuid,
    pub purchase_order_no: String,
    pub status: String,
    pub company: Option<String>,
    pub order_short_text: Option<String>,
    pub order_value: f64,
    pub total_spent: f64,
    pub remaining_budget: f64,
    pub utilization_percent: f64,
    pub vendor_id: Option<String>,
    pub vendor_short_term: Option<String>,
    pub work_coordinator_name: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub completion_date: Option<NaiveDate>,
}

impl TableRow for PurchaseOrder {
    fn column_value(&self, column: &str) -> SqlValue {
        match column {
            "id" => SqlValue::Text(self.id.to_string()),
            "organization_id" => SqlValue::Text(self.organization_id.to_string()),
            "purchase_order_no" => SqlValue::Text(self.purchase_order_no.clone()),
            "status" => SqlValue::Text(self.status.clone()),
            "company" => self.company.clone().into(),
            "order_short_text" => self.order_short_text.clone().into(),
            "order_value" => SqlValue::Number(self.order_value),
            "total_spent" => SqlValue::Number(self.total_spent),
            "remaining_budget" => SqlValue::Number(self.remaining_budget),
            "utilization_percent" => SqlValue::Number(self.utilization_percent),
            "vendor_id" => self.vendor_id.clone().into(),
            "vendor_short_term" => self.vendor_short_term.clone().into(),
            "work_coordinator_name" => self.work_coordinator_name.clone().into(),
            "start_date" => self.start_date.into(),
            "completion_date" => self.completion_date.into(),
            _ => SqlValue::Null,
        }
    }
}

/// Quantity survey linked, when possible, to its purchase order.
#[derive(Debug, Clone, PartialEq)]
pub struct QuantitySurvey {
    pub id: Uuid,
    pub organization_id: Uuid,
    /// `None` when no loaded purchase order carries the same order number.
    pub purchase_order_id: Option<Uuid>,
    pub purchase_order_no: String,
    pub qs_number: String,
    pub quantity_survey_short_text: Option<String>,
    pub contractor_contact: Option<String>,
    pub vendor_id: Option<String>,
    pub total: f64,
    pub created_date: Option<NaiveDate>,
    pub transfer_date: Option<NaiveDate>,
    pub accepted_date: Option<NaiveDate>,
    pub invoice_number: Option<String>,
    pub invoice_date: Option<NaiveDate>,
    pub accounting_document: Option<String>,
}

impl TableRow for QuantitySurvey {
    fn column_value(&self, column: &str) -> SqlValue {
        match column {
            "id" => SqlValue::Text(self.id.to_string()),
            "organization_id" => SqlValue::Text(self.organization_id.to_string()),
            "purchase_order_id" => self.purchase_order_id.into(),
            "purchase_order_no" => SqlValue::Text(self.purchase_order_no.clone()),
            "qs_number" => SqlValue::Text(self.qs_number.clone()),
            "quantity_survey_short_text" => self.quantity_survey_short_text.clone().into(),
            "contractor_contact" => self.contractor_contact.clone().into(),
            "vendor_id" => self.vendor_id.clone().into(),
            "total" => SqlValue::Number(self.total),
            "created_date" => self.created_date.into(),
            "transfer_date" => self.transfer_date.into(),
            "accepted_date" => self.accepted_date.into(),
            "invoice_number" => self.invoice_number.clone().into(),
            "invoice_date" => self.invoice_date.into(),
            "accounting_document" => self.accounting_document.clone().into(),
            _ => SqlValue::Null,
        }
    }
}

/// Both output tables produced by a single run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SeedData {
    pub purchase_orders: Vec<PurchaseOrder>,
    pub quantity_surveys: Vec<QuantitySurvey>,
}
