//! Process command - extract data from a single invoice document.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use clap::Args;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, info};

use facturabot_core::export::ExportRow;
use facturabot_core::models::{BotConfig, Invoice};
use facturabot_core::{
    DocumentSource, ExtractionPipeline, ExtractionReport, OpenAiBackend, ReplayBackend,
    VisionBackend,
};

/// Arguments for the process command.
#[derive(Args)]
pub struct ProcessArgs {
    /// Input document (image or text file)
    input: Option<PathBuf>,

    /// Replay a captured model reply instead of calling the API
    #[arg(long)]
    replay: Option<PathBuf>,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,

    /// Save the raw model payload alongside the result
    #[arg(long)]
    save_payload: Option<PathBuf>,

    /// Show extraction confidence
    #[arg(long)]
    show_confidence: bool,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON output
    Json,
    /// CSV output
    Csv,
    /// Plain text summary
    Text,
}

pub async fn run(args: ProcessArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();

    // Load configuration
    let config = if let Some(path) = config_path {
        BotConfig::from_file(Path::new(path))?
    } else {
        BotConfig::default()
    };

    let source = match &args.input {
        Some(input) => {
            if !input.exists() {
                anyhow::bail!("Input file not found: {}", input.display());
            }
            info!("Processing file: {}", input.display());
            load_document(input)?
        }
        None if args.replay.is_some() => DocumentSource::Text(String::new()),
        None => anyhow::bail!("Provide an input document or --replay"),
    };

    // Create progress spinner
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} [{elapsed_precise}] {msg}")
            .unwrap(),
    );
    pb.enable_steady_tick(std::time::Duration::from_millis(100));
    pb.set_message("Extracting invoice data...");

    let report = match &args.replay {
        Some(replay) => {
            debug!("Replaying model output from {}", replay.display());
            let backend = ReplayBackend::from_file(replay)?;
            run_pipeline(backend, &config, &source).await?
        }
        None => {
            let api_key = std::env::var(&config.vision.api_key_env).map_err(|_| {
                anyhow::anyhow!(
                    "API key not found. Set the {} environment variable.",
                    config.vision.api_key_env
                )
            })?;
            let backend = OpenAiBackend::new(api_key)
                .with_base_url(&config.vision.base_url)
                .with_model(&config.vision.model)
                .with_temperature(config.vision.temperature);
            run_pipeline(backend, &config, &source).await?
        }
    };

    pb.finish_with_message("Done");

    // Save the raw payload if requested
    if let Some(payload_path) = &args.save_payload {
        fs::write(payload_path, serde_json::to_string_pretty(&report.payload)?)?;
        println!(
            "{} Raw payload written to {}",
            style("✓").green(),
            payload_path.display()
        );
    }

    // Format output
    let output = format_invoice(&report.invoice, args.format)?;

    // Write output
    if let Some(output_path) = &args.output {
        fs::write(output_path, &output)?;
        println!(
            "{} Output written to {}",
            style("✓").green(),
            output_path.display()
        );
    } else {
        println!("{}", output);
    }

    // Show summary
    if args.show_confidence {
        println!();
        println!(
            "{} Extraction confidence: {}",
            style("ℹ").blue(),
            report.invoice.metadata().confidence.as_str()
        );
        println!(
            "{} Processing time: {}ms",
            style("ℹ").blue(),
            report.processing_time_ms
        );
        if let Some(model) = &report.model {
            println!("{} Model: {}", style("ℹ").blue(), model);
        }
    }

    debug!("Total processing time: {:?}", start.elapsed());

    Ok(())
}

/// Build a document source from a file, by extension.
pub fn load_document(path: &Path) -> anyhow::Result<DocumentSource> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase();

    match extension.as_str() {
        "png" | "jpg" | "jpeg" | "webp" => Ok(DocumentSource::from_image_path(path)?),
        "txt" => Ok(DocumentSource::Text(fs::read_to_string(path)?)),
        _ => anyhow::bail!("Unsupported file format: {}", extension),
    }
}

async fn run_pipeline<B: VisionBackend>(
    backend: B,
    config: &BotConfig,
    source: &DocumentSource,
) -> anyhow::Result<ExtractionReport> {
    let pipeline = ExtractionPipeline::from_config(backend, config);
    Ok(pipeline.process(source).await?)
}

pub fn format_invoice(invoice: &Invoice, format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string(invoice)?),
        OutputFormat::Csv => format_csv(invoice),
        OutputFormat::Text => Ok(format_text(invoice)),
    }
}

fn format_csv(invoice: &Invoice) -> anyhow::Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);

    wtr.write_record(facturabot_core::export::HEADERS)?;
    wtr.write_record(ExportRow::from(invoice).cells())?;

    let data = String::from_utf8(wtr.into_inner()?)?;
    Ok(data)
}

pub fn format_text(invoice: &Invoice) -> String {
    let mut output = String::new();

    output.push_str(&format!("Factura: {}\n", invoice.invoice_number()));
    output.push_str(&format!("Fecha: {}\n", invoice.formatted_date()));
    if let Some(operation_type) = invoice.operation_type() {
        output.push_str(&format!("Operación: {}\n", operation_type));
    }
    output.push_str("\n");

    output.push_str("Proveedor:\n");
    output.push_str(&format!("  {}\n", invoice.vendor().name));
    output.push_str(&format!("  CUIT: {}\n", invoice.vendor().tax_id));
    if let Some(address) = &invoice.vendor().address {
        output.push_str(&format!("  {}\n", address));
    }
    output.push_str("\n");

    output.push_str("Detalle:\n");
    for item in invoice.items() {
        output.push_str(&format!(
            "  {} x {} @ {} = {}\n",
            item.quantity, item.description, item.unit_price, item.subtotal
        ));
    }
    output.push_str("\n");

    if !invoice.receiver_bank().is_empty() {
        output.push_str(&format!("Banco receptor: {}\n", invoice.receiver_bank()));
    }
    if let Some(payment_method) = invoice.payment_method() {
        output.push_str(&format!("Medio de pago: {}\n", payment_method));
    }
    if let Some(taxes) = invoice.taxes() {
        output.push_str(&format!(
            "Impuestos: IVA {} + otros {}\n",
            taxes.iva, taxes.other_taxes
        ));
    }
    output.push_str(&format!("Total: {}\n", invoice.formatted_amount()));

    output
}
