use std::fs;
use std::path::Path;
use std::process::Command;

use aestrak_tools::ids;
use aestrak_tools::io::discover::{PURCHASE_ORDER_PATTERN, QUANTITY_SURVEY_PATTERN};
use aestrak_tools::seed::{self, SeedInputs};
use aestrak_tools::validate::EXPECTED_PO_COLUMNS;
use aestrak_tools::{Result, ToolError};
use rust_xlsxwriter::Workbook;
use tempfile::tempdir;
use uuid::Uuid;

const ORG_ID: &str = "3f1c2d4e-5a6b-4c7d-8e9f-0a1b2c3d4e5f";

const QS_HEADERS: &[&str] = &[
    "Purchase order No.",
    "Q.S. number",
    "Quantity survey short text",
    "Contractor Contact",
    "Vendor ID",
    "TOTAL",
    "CREATED",
    "TRANSFERED",
    "Accepted",
    "Invoice number",
    "Invoice Document Date",
    "Accounting Document",
];

enum Cell<'a> {
    Text(&'a str),
    Number(f64),
    Blank,
}

use Cell::{Blank, Number, Text};

fn write_sheet(path: &Path, headers: &[&str], rows: &[Vec<Cell<'_>>]) {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    for (col_idx, header) in headers.iter().enumerate() {
        worksheet
            .write_string(0, col_idx as u16, *header)
            .expect("header written");
    }
    for (row_idx, row) in rows.iter().enumerate() {
        let row_idx = (row_idx + 1) as u32;
        for (col_idx, cell) in row.iter().enumerate() {
            let col_idx = col_idx as u16;
            match cell {
                Text(value) => {
                    worksheet
                        .write_string(row_idx, col_idx, *value)
                        .expect("text written");
                }
                Number(value) => {
                    worksheet
                        .write_number(row_idx, col_idx, *value)
                        .expect("number written");
                }
                Blank => {}
            }
        }
    }
    workbook.save(path).expect("workbook saved");
}

fn write_fixtures(directory: &Path) -> SeedInputs {
    let purchase_orders = directory.join("DOWREAD-ICS.orders.2024-06.xlsx");
    write_sheet(
        &purchase_orders,
        EXPECTED_PO_COLUMNS,
        &[
            vec![
                Text("PO-1"),
                Blank,
                Text("Acme"),
                Text("Pipe work"),
                Number(1000.0),
                Number(100234.0),
                Text("ACME"),
                Text("O'Brien"),
                Text("2024-01-15"),
                Text("15/06/2024"),
            ],
            vec![],
            vec![Blank, Text("closed"), Text("Orphan Co"), Blank, Number(5.0)],
            vec![Text("None"), Blank, Blank, Blank, Number(9.0)],
            vec![Text("PO-2"), Text("closed")],
        ],
    );

    let quantity_surveys = directory.join("DOWREAD-ICS.QS.2024-06.xlsx");
    write_sheet(
        &quantity_surveys,
        QS_HEADERS,
        &[
            vec![
                Text("PO-1"),
                Text("1"),
                Text("Trenching"),
                Text("Jane"),
                Text("100234"),
                Number(300.0),
                Text("2024-02-01"),
            ],
            vec![Text("PO-1"), Text("2"), Blank, Blank, Blank, Number(150.0)],
            vec![Text("PO-9"), Text("1"), Blank, Blank, Blank, Number(20.0)],
            vec![Text("PO-1"), Blank, Blank, Blank, Blank, Number(999.0)],
        ],
    );

    SeedInputs {
        purchase_orders,
        quantity_surveys,
    }
}

fn org_id() -> Uuid {
    Uuid::parse_str(ORG_ID).expect("valid organization id")
}

#[test]
fn seed_file_contains_budget_figures_and_links() {
    let temp_dir = tempdir().expect("temporary directory");
    let inputs = write_fixtures(temp_dir.path());
    let output = temp_dir.path().join("supabase").join("excel_seed.sql");

    seed::excel_to_sql(&inputs, &output, org_id()).expect("seed generated");
    let sql = fs::read_to_string(&output).expect("seed file read");

    assert!(sql.starts_with(&format!(
        "-- Auto-generated seed data from Excel files.\n\n-- Organization ID: {ORG_ID}\n\n"
    )));

    let po_1 = format!(
        "('{}', '{ORG_ID}', 'PO-1', 'open', 'Acme', 'Pipe work', 1000.0, 450.0, 550.0, 45.0, \
         '100234', 'ACME', 'O''Brien', '2024-01-15', NULL)",
        ids::purchase_order_id("PO-1")
    );
    assert!(sql.contains(&po_1), "missing PO-1 row in:\n{sql}");

    let po_2 = format!(
        "('{}', '{ORG_ID}', 'PO-2', 'closed', NULL, NULL, 0.0, 0.0, 0.0, 0.0, NULL, NULL, NULL, NULL, NULL)",
        ids::purchase_order_id("PO-2")
    );
    assert!(sql.contains(&po_2), "missing PO-2 row in:\n{sql}");
    assert!(!sql.contains("Orphan Co"));

    let qs_1 = format!(
        "('{}', '{ORG_ID}', '{}', 'PO-1', '1', 'Trenching', 'Jane', '100234', 300.0, '2024-02-01', \
         NULL, NULL, NULL, NULL, NULL)",
        ids::quantity_survey_id("PO-1", "1"),
        ids::purchase_order_id("PO-1")
    );
    assert!(sql.contains(&qs_1), "missing survey row in:\n{sql}");

    let orphan = format!(
        "('{}', '{ORG_ID}', NULL, 'PO-9', '1',",
        ids::quantity_survey_id("PO-9", "1")
    );
    assert!(sql.contains(&orphan), "missing orphan survey in:\n{sql}");
    assert!(!sql.contains("999.0"));

    assert_eq!(sql.matches("INSERT INTO public.purchase_orders").count(), 1);
    assert_eq!(sql.matches("INSERT INTO public.quantity_surveys").count(), 1);
}

#[test]
fn repeated_runs_are_identical() {
    let temp_dir = tempdir().expect("temporary directory");
    let inputs = write_fixtures(temp_dir.path());
    let first = temp_dir.path().join("first.sql");
    let second = temp_dir.path().join("second.sql");

    seed::excel_to_sql(&inputs, &first, org_id()).expect("first run");
    seed::excel_to_sql(&inputs, &second, org_id()).expect("second run");

    assert_eq!(
        fs::read_to_string(first).expect("first read"),
        fs::read_to_string(second).expect("second read")
    );
}

#[test]
fn surveys_without_rows_omit_their_statement() {
    let temp_dir = tempdir().expect("temporary directory");
    let mut inputs = write_fixtures(temp_dir.path());
    inputs.quantity_surveys = temp_dir.path().join("empty-qs.xlsx");
    write_sheet(&inputs.quantity_surveys, QS_HEADERS, &[]);
    let output = temp_dir.path().join("seed.sql");

    seed::excel_to_sql(&inputs, &output, org_id()).expect("seed generated");
    let sql = fs::read_to_string(&output).expect("seed file read");

    assert!(sql.contains("INSERT INTO public.purchase_orders"));
    assert!(!sql.contains("quantity_surveys"));
    assert!(sql.ends_with(";\n"));
}

#[test]
fn discovery_finds_both_exports() -> Result<()> {
    let temp_dir = tempdir().expect("temporary directory");
    let written = write_fixtures(temp_dir.path());

    let discovered = SeedInputs::discover(temp_dir.path())?;
    assert_eq!(discovered, written);
    Ok(())
}

#[test]
fn discovery_fails_without_survey_export() {
    let temp_dir = tempdir().expect("temporary directory");
    let inputs = write_fixtures(temp_dir.path());
    fs::remove_file(&inputs.quantity_surveys).expect("survey export removed");

    let error = SeedInputs::discover(temp_dir.path()).expect_err("discovery fails");
    match error {
        ToolError::MissingInput { pattern, .. } => assert_eq!(pattern, QUANTITY_SURVEY_PATTERN),
        other => panic!("unexpected error: {other}"),
    }
    assert_ne!(PURCHASE_ORDER_PATTERN, QUANTITY_SURVEY_PATTERN);
}

#[test]
fn cli_writes_seed_and_reports_path() {
    let temp_dir = tempdir().expect("temporary directory");
    let inputs = write_fixtures(temp_dir.path());
    let output = temp_dir.path().join("out.sql");

    let result = Command::new(env!("CARGO_BIN_EXE_aestrak-tools"))
        .arg("--organization-id")
        .arg(ORG_ID)
        .arg("--input-dir")
        .arg(temp_dir.path())
        .arg("--output")
        .arg(&output)
        .output()
        .expect("binary runs");

    assert!(result.status.success());
    let stdout = String::from_utf8_lossy(&result.stdout);
    assert_eq!(stdout.trim(), format!("Wrote seed SQL to {}", output.display()));
    assert!(output.exists());
    assert!(inputs.purchase_orders.exists());
}

#[test]
fn cli_rejects_malformed_organization_id() {
    let temp_dir = tempdir().expect("temporary directory");
    write_fixtures(temp_dir.path());
    let output = temp_dir.path().join("out.sql");

    let result = Command::new(env!("CARGO_BIN_EXE_aestrak-tools"))
        .arg("--organization-id")
        .arg("not-a-uuid")
        .arg("--input-dir")
        .arg(temp_dir.path())
        .arg("--output")
        .arg(&output)
        .output()
        .expect("binary runs");

    assert!(!result.status.success());
    assert!(!output.exists());
}

#[test]
fn cli_fails_when_inputs_are_missing() {
    let temp_dir = tempdir().expect("temporary directory");
    let output = temp_dir.path().join("out.sql");

    let result = Command::new(env!("CARGO_BIN_EXE_aestrak-tools"))
        .arg("--organization-id")
        .arg(ORG_ID)
        .arg("--input-dir")
        .arg(temp_dir.path())
        .arg("--output")
        .arg(&output)
        .output()
        .expect("binary runs");

    assert_eq!(result.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&result.stderr).contains("error:"));
    assert!(!output.exists());
}
