//! Export command - collect processed invoices into a spreadsheet.

use std::fs;
use std::path::PathBuf;

use clap::Args;
use console::style;
use glob::glob;
use tracing::{debug, warn};

use facturabot_core::export::{build_sheet, HEADERS};
use facturabot_core::models::Invoice;

/// Arguments for the export command.
#[derive(Args)]
pub struct ExportArgs {
    /// Invoice JSON files or glob pattern
    #[arg(required = true)]
    input: String,

    /// Output CSV file (default: facturas-<timestamp>.csv)
    #[arg(short, long)]
    output: Option<PathBuf>,
}

pub async fn run(args: ExportArgs) -> anyhow::Result<()> {
    // Expand glob pattern
    let files: Vec<PathBuf> = glob(&args.input)?
        .filter_map(|r| r.ok())
        .filter(|p| {
            p.extension()
                .and_then(|e| e.to_str())
                .is_some_and(|ext| ext.eq_ignore_ascii_case("json"))
        })
        .collect();

    if files.is_empty() {
        anyhow::bail!("No matching invoice files found for pattern: {}", args.input);
    }

    // Deserialization runs the validation gate, so anything that loads
    // here is a well-formed invoice.
    let mut invoices = Vec::with_capacity(files.len());
    let mut skipped = 0usize;

    for path in &files {
        let content = fs::read_to_string(path)?;
        match serde_json::from_str::<Invoice>(&content) {
            Ok(invoice) => {
                debug!("Loaded invoice from {}", path.display());
                invoices.push(invoice);
            }
            Err(e) => {
                warn!("Skipping {}: {}", path.display(), e);
                skipped += 1;
            }
        }
    }

    if invoices.is_empty() {
        anyhow::bail!("None of the {} matched files held a valid invoice", files.len());
    }

    let output_path = args.output.unwrap_or_else(|| {
        PathBuf::from(format!(
            "facturas-{}.csv",
            chrono::Local::now().format("%Y%m%d-%H%M%S")
        ))
    });

    let sheet = build_sheet(&invoices);
    write_sheet(&output_path, &sheet)?;

    println!(
        "{} Exported {} invoices to {}",
        style("✓").green(),
        sheet.rows.len(),
        output_path.display()
    );
    if skipped > 0 {
        println!(
            "{} Skipped {} files that did not hold valid invoices",
            style("ℹ").blue(),
            skipped
        );
    }

    Ok(())
}

fn write_sheet(
    path: &PathBuf,
    sheet: &facturabot_core::export::ExportSheet,
) -> anyhow::Result<()> {
    let mut wtr = csv::Writer::from_path(path)?;

    wtr.write_record(HEADERS)?;
    for row in &sheet.rows {
        wtr.write_record(row.cells())?;
    }

    // Per-currency totals under the data rows
    for (currency, total) in &sheet.totals_by_currency {
        let mut record = vec![String::new(); HEADERS.len()];
        record[0] = "Total".to_string();
        record[7] = currency.clone();
        record[8] = total.to_string();
        wtr.write_record(&record)?;
    }

    wtr.flush()?;
    Ok(())
}
