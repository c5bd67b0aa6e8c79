use std::fs;
use std::path::Path;

use uuid::Uuid;

use crate::aestrak::tools::error::Result;
use crate::aestrak::tools::model::{
    PURCHASE_ORDER_COLUMNS, PURCHASE_ORDERS_TABLE, QUANTITY_SURVEY_COLUMNS,
    QUANTITY_SURVEYS_TABLE, SeedData, SqlValue, TableRow,
};

const BANNER: &str = "-- Auto-generated seed data from Excel files.\n";

/// Renders a value as a SQL literal.
pub fn sql_literal(value: &SqlValue) -> String {
    match value {
        SqlValue::Null => "NULL".to_string(),
        SqlValue::Date(date) => format!("'{}'", date.format("%Y-%m-%d")),
        SqlValue::Number(number) => number_literal(*number),
        SqlValue::Text(text) => format!("'{}'", text.replace('\'', "''")),
    }
}

/// Integral numbers keep one fractional digit (`1000.0`); others use the
/// shortest representation that round-trips.
fn number_literal(number: f64) -> String {
    if !number.is_finite() {
        "NULL".to_string()
    } else if number.fract() == 0.0 && number.abs() < 1e16 {
        format!("{number:.1}")
    } else {
        number.to_string()
    }
}

/// Builds a multi-row INSERT statement with the columns in the given order.
/// Returns an empty string when there are no rows.
pub fn build_insert_sql<R: TableRow>(table: &str, rows: &[R], columns: &[&str]) -> String {
    if rows.is_empty() {
        return String::new();
    }

    let values_lines: Vec<String> = rows
        .iter()
        .map(|row| {
            let values: Vec<String> = columns
                .iter()
                .map(|column| sql_literal(&row.column_value(column)))
                .collect();
            format!("({})", values.join(", "))
        })
        .collect();

    format!(
        "INSERT INTO {table} ({}) VALUES\n  {};\n",
        columns.join(", "),
        values_lines.join(",\n  ")
    )
}

/// Assembles the seed file: banner, organization comment, then the non-empty
/// INSERT statements separated by blank lines.
pub fn render_seed_sql(organization_id: Uuid, seed: &SeedData) -> String {
    let sections = [
        BANNER.to_string(),
        format!("-- Organization ID: {organization_id}\n"),
        build_insert_sql(
            PURCHASE_ORDERS_TABLE,
            &seed.purchase_orders,
            PURCHASE_ORDER_COLUMNS,
        ),
        build_insert_sql(
            QUANTITY_SURVEYS_TABLE,
            &seed.quantity_surveys,
            QUANTITY_SURVEY_COLUMNS,
        ),
    ];

    sections
        .into_iter()
        .filter(|section| !section.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

/// Writes the rendered SQL to `path`, creating parent directories as needed.
pub fn write_seed_file(path: &Path, sql: &str) -> Result<()> {
    if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, sql)?;
    Ok(())
}
