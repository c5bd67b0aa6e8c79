use std::path::Path;

use calamine::{DataType, Reader, Xlsx, open_workbook};
use chrono::{Duration, NaiveDate, NaiveDateTime};
use tracing::debug;

use crate::aestrak::tools::error::{Result, ToolError};
use crate::aestrak::tools::model::{CellValue, PO_NUMBER_HEADER, QS_NUMBER_HEADER, Record};

/// Placeholder some exports write into the order number column of rows that
/// have none.
const NONE_PLACEHOLDER: &str = "none";

/// Largest serial accepted as a spreadsheet date (year 9999).
const MAX_EXCEL_SERIAL: f64 = 2_958_465.0;

/// Header row and retained data rows of a worksheet.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SheetData {
    pub headers: Vec<String>,
    pub records: Vec<Record>,
}

/// Reads the first worksheet of a workbook into records, keeping only the rows
/// accepted by `keep`. Row order follows the sheet.
pub fn read_records<F>(path: &Path, keep: F) -> Result<SheetData>
where
    F: Fn(&Record) -> bool,
{
    let mut workbook: Xlsx<_> = open_workbook(path)?;
    let sheet_name = workbook
        .sheet_names()
        .first()
        .cloned()
        .ok_or_else(|| ToolError::InvalidWorkbook(format!("{} has no sheets", path.display())))?;
    let range = workbook
        .worksheet_range(&sheet_name)
        .ok_or_else(|| ToolError::InvalidWorkbook(format!("missing sheet '{sheet_name}'")))?
        .map_err(ToolError::from)?;

    let sheet = sheet_from_rows(range.rows(), keep);
    debug!(
        path = %path.display(),
        sheet = %sheet_name,
        rows = sheet.records.len(),
        "read worksheet"
    );
    Ok(sheet)
}

/// Builds records from raw rows. The first row supplies the headers; fully
/// empty rows and rows rejected by `keep` are dropped.
pub fn sheet_from_rows<'a, I, F>(rows: I, keep: F) -> SheetData
where
    I: IntoIterator<Item = &'a [DataType]>,
    F: Fn(&Record) -> bool,
{
    let mut rows = rows.into_iter();
    let headers: Vec<String> = match rows.next() {
        Some(first_row) => first_row
            .iter()
            .map(|cell| cell_to_value(cell).display_text().trim().to_string())
            .collect(),
        None => return SheetData::default(),
    };

    let mut records = Vec::new();
    let mut dropped = 0usize;
    for row in rows {
        let cells: Vec<CellValue> = row.iter().map(cell_to_value).collect();
        if cells.iter().all(CellValue::is_empty) {
            continue;
        }

        let record: Record = headers
            .iter()
            .enumerate()
            .filter(|(_, header)| !header.is_empty())
            .map(|(col_idx, header)| {
                let value = cells.get(col_idx).cloned().unwrap_or(CellValue::Empty);
                (header.clone(), value)
            })
            .collect();

        if keep(&record) {
            records.push(record);
        } else {
            dropped += 1;
        }
    }

    if dropped > 0 {
        debug!(dropped, "dropped rows without a usable key");
    }

    SheetData { headers, records }
}

/// Accepts purchase-order rows whose order number is present and is not the
/// `none` placeholder.
pub fn is_purchase_order_row(record: &Record) -> bool {
    let po_number = record.key(PO_NUMBER_HEADER);
    !po_number.is_empty() && !po_number.eq_ignore_ascii_case(NONE_PLACEHOLDER)
}

/// Accepts quantity-survey rows carrying both an order and a survey number.
pub fn is_quantity_survey_row(record: &Record) -> bool {
    !record.key(PO_NUMBER_HEADER).is_empty() && !record.key(QS_NUMBER_HEADER).is_empty()
}

fn cell_to_value(cell: &DataType) -> CellValue {
    match cell {
        DataType::Empty => CellValue::Empty,
        DataType::String(value) => CellValue::Text(value.clone()),
        DataType::Float(value) => CellValue::Number(*value),
        DataType::Int(value) => CellValue::Number(*value as f64),
        DataType::Bool(value) => CellValue::Bool(*value),
        DataType::DateTime(serial) => excel_serial_to_datetime(*serial)
            .map(CellValue::Timestamp)
            .unwrap_or(CellValue::Empty),
        other => iso_cell_to_value(other.to_string()),
    }
}

/// Typed ISO date/time cells (as written by OpenDocument producers) display as
/// their ISO text.
fn iso_cell_to_value(text: String) -> CellValue {
    if let Ok(timestamp) = NaiveDateTime::parse_from_str(&text, "%Y-%m-%dT%H:%M:%S%.f") {
        return CellValue::Timestamp(timestamp);
    }
    if let Ok(date) = NaiveDate::parse_from_str(&text, "%Y-%m-%d") {
        return CellValue::Date(date);
    }
    CellValue::Text(text)
}

/// Converts a spreadsheet serial date-time (days since 1899-12-30, with the
/// 1900 leap-year quirk below serial 60) into a timestamp.
fn excel_serial_to_datetime(serial: f64) -> Option<NaiveDateTime> {
    if !serial.is_finite() || !(0.0..=MAX_EXCEL_SERIAL).contains(&serial) {
        return None;
    }
    let epoch = if serial < 60.0 {
        NaiveDate::from_ymd_opt(1899, 12, 31)?
    } else {
        NaiveDate::from_ymd_opt(1899, 12, 30)?
    };
    let days = serial.trunc() as i64;
    let seconds = (serial.fract() * 86_400.0).round() as i64;
    epoch
        .and_hms_opt(0, 0, 0)?
        .checked_add_signed(Duration::days(days))?
        .checked_add_signed(Duration::seconds(seconds))
}
