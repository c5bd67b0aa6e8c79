use std::path::{Path, PathBuf};

use tracing::{info, instrument};
use uuid::Uuid;

use crate::aestrak::tools::error::Result;
use crate::aestrak::tools::io::discover::{
    PURCHASE_ORDER_PATTERN, QUANTITY_SURVEY_PATTERN, find_input,
};
use crate::aestrak::tools::io::excel_read::{
    self, is_purchase_order_row, is_quantity_survey_row,
};
use crate::aestrak::tools::io::sql_write;
use crate::aestrak::tools::model::SeedData;
use crate::aestrak::tools::transform::build_seed_data;
use crate::aestrak::tools::validate::{self, EXPECTED_PO_COLUMNS, EXPECTED_QS_COLUMNS};

/// Spreadsheet inputs of a seed run.
#[derive(Debug, Clone, PartialEq)]
pub struct SeedInputs {
    pub purchase_orders: PathBuf,
    pub quantity_surveys: PathBuf,
}

impl SeedInputs {
    /// Locates both exports inside `directory` by their file name patterns.
    pub fn discover(directory: &Path) -> Result<Self> {
        Self::resolve(directory, None, None)
    }

    /// Uses the explicit paths where given and searches `directory` for the
    /// rest.
    pub fn resolve(
        directory: &Path,
        purchase_orders: Option<PathBuf>,
        quantity_surveys: Option<PathBuf>,
    ) -> Result<Self> {
        let purchase_orders = match purchase_orders {
            Some(path) => path,
            None => find_input(directory, PURCHASE_ORDER_PATTERN)?,
        };
        let quantity_surveys = match quantity_surveys {
            Some(path) => path,
            None => find_input(directory, QUANTITY_SURVEY_PATTERN)?,
        };
        Ok(Self {
            purchase_orders,
            quantity_surveys,
        })
    }
}

/// Loads both exports and derives the rows of the two target tables.
#[instrument(
    level = "info",
    skip_all,
    fields(
        purchase_orders = %inputs.purchase_orders.display(),
        quantity_surveys = %inputs.quantity_surveys.display()
    )
)]
pub fn load_seed_data(inputs: &SeedInputs, organization_id: Uuid) -> Result<SeedData> {
    let orders = excel_read::read_records(&inputs.purchase_orders, is_purchase_order_row)?;
    info!(record_count = orders.records.len(), "read purchase orders");
    let surveys = excel_read::read_records(&inputs.quantity_surveys, is_quantity_survey_row)?;
    info!(record_count = surveys.records.len(), "read quantity surveys");

    validate::check_columns("purchase orders", &orders.headers, EXPECTED_PO_COLUMNS);
    validate::check_columns("quantity surveys", &surveys.headers, EXPECTED_QS_COLUMNS);
    validate::duplicate_purchase_orders(&orders.records);
    validate::duplicate_quantity_surveys(&surveys.records);

    Ok(build_seed_data(
        &orders.records,
        &surveys.records,
        organization_id,
    ))
}

/// Converts both spreadsheet exports into a SQL seed file. Nothing is written
/// unless every step before it succeeded.
#[instrument(level = "info", skip_all, fields(output = %output.display(), %organization_id))]
pub fn excel_to_sql(inputs: &SeedInputs, output: &Path, organization_id: Uuid) -> Result<()> {
    let seed = load_seed_data(inputs, organization_id)?;
    info!(
        purchase_orders = seed.purchase_orders.len(),
        quantity_surveys = seed.quantity_surveys.len(),
        "built seed rows"
    );
    let sql = sql_write::render_seed_sql(organization_id, &seed);
    sql_write::write_seed_file(output, &sql)
}
