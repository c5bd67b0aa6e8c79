use std::path::PathBuf;

use aestrak_tools::seed::{self, SeedInputs};
use aestrak_tools::{Result, logging};
use clap::Parser;
use uuid::Uuid;

fn main() {
    let cli = Cli::parse();
    if let Err(error) = run(cli) {
        eprintln!("error: {error}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    logging::init()?;

    let inputs = cli.resolve_inputs()?;
    seed::excel_to_sql(&inputs, &cli.output, cli.organization_id)?;
    println!("Wrote seed SQL to {}", cli.output.display());
    Ok(())
}

#[derive(Parser)]
#[command(
    author,
    version,
    about = "Generate SQL seed data from the purchase-order and quantity-survey Excel exports."
)]
struct Cli {
    /// Target organization UUID for seeded records.
    #[arg(long)]
    organization_id: Uuid,

    /// Output SQL file path.
    #[arg(long, default_value = "supabase/excel_seed.sql")]
    output: PathBuf,

    /// Directory searched for the Excel exports.
    #[arg(long, default_value = "AES Excel Files")]
    input_dir: PathBuf,

    /// Purchase-order workbook to use instead of searching the input directory.
    #[arg(long)]
    purchase_orders: Option<PathBuf>,

    /// Quantity-survey workbook to use instead of searching the input directory.
    #[arg(long)]
    quantity_surveys: Option<PathBuf>,
}

impl Cli {
    fn resolve_inputs(&self) -> Result<SeedInputs> {
        SeedInputs::resolve(
            &self.input_dir,
            self.purchase_orders.clone(),
            self.quantity_surveys.clone(),
        )
    }
}
