//! Batch processing command for multiple invoice documents.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use clap::Args;
use console::style;
use glob::glob;
use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use tracing::{debug, error, warn};

use facturabot_core::models::{BotConfig, Invoice};
use facturabot_core::{ExtractionPipeline, OpenAiBackend, ReplayBackend, VisionBackend};

use super::process::{format_invoice, load_document, OutputFormat};

/// Arguments for the batch command.
#[derive(Args)]
pub struct BatchArgs {
    /// Input files or glob pattern
    #[arg(required = true)]
    input: String,

    /// Output directory
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Output format for each file
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,

    /// Replay a captured model reply for every file
    #[arg(long)]
    replay: Option<PathBuf>,

    /// Also generate a summary CSV
    #[arg(long)]
    summary: bool,

    /// Continue on error
    #[arg(long)]
    continue_on_error: bool,
}

/// Result of processing a single file.
struct ProcessResult {
    path: PathBuf,
    invoice: Option<Invoice>,
    error: Option<String>,
    processing_time_ms: u64,
}

pub async fn run(args: BatchArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();

    // Load configuration
    let config = if let Some(path) = config_path {
        BotConfig::from_file(Path::new(path))?
    } else {
        BotConfig::default()
    };

    // Expand glob pattern
    let files: Vec<PathBuf> = glob(&args.input)?
        .filter_map(|r| r.ok())
        .filter(|p| {
            let ext = p.extension().and_then(|e| e.to_str()).unwrap_or("");
            matches!(ext.to_lowercase().as_str(), "png" | "jpg" | "jpeg" | "webp" | "txt")
        })
        .collect();

    if files.is_empty() {
        anyhow::bail!("No matching files found for pattern: {}", args.input);
    }

    println!(
        "{} Found {} files to process",
        style("ℹ").blue(),
        files.len()
    );

    // Create output directory if specified
    if let Some(ref output_dir) = args.output_dir {
        fs::create_dir_all(output_dir)?;
    }

    let results = match &args.replay {
        Some(replay) => {
            let backend = ReplayBackend::from_file(replay)?;
            let pipeline = ExtractionPipeline::from_config(backend, &config);
            process_files(&pipeline, &files, &args).await?
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
            let pipeline = ExtractionPipeline::from_config(backend, &config);
            process_files(&pipeline, &files, &args).await?
        }
    };

    // Write outputs
    let successful: Vec<_> = results.iter().filter(|r| r.invoice.is_some()).collect();
    let failed: Vec<_> = results.iter().filter(|r| r.error.is_some()).collect();

    for result in &successful {
        if let (Some(invoice), Some(output_dir)) = (&result.invoice, &args.output_dir) {
            let output_name = result
                .path
                .file_stem()
                .and_then(|s| s.to_str())
                .unwrap_or("invoice");

            let extension = match args.format {
                OutputFormat::Json => "json",
                OutputFormat::Csv => "csv",
                OutputFormat::Text => "txt",
            };

            let output_path = output_dir.join(format!("{}.{}", output_name, extension));
            let content = format_invoice(invoice, args.format)?;

            fs::write(&output_path, content)?;
            debug!("Wrote output to {}", output_path.display());
        }
    }

    // Generate summary if requested
    if args.summary {
        let summary_path = args
            .output_dir
            .as_ref()
            .map(|d| d.join("summary.csv"))
            .unwrap_or_else(|| PathBuf::from("summary.csv"));

        write_summary(&summary_path, &results)?;
        println!(
            "{} Summary written to {}",
            style("✓").green(),
            summary_path.display()
        );
    }

    // Print summary
    println!();
    println!(
        "{} Processed {} files in {:?}",
        style("✓").green(),
        results.len(),
        start.elapsed()
    );
    println!(
        "   {} successful, {} failed",
        style(successful.len()).green(),
        style(failed.len()).red()
    );

    if !failed.is_empty() {
        println!();
        println!("{}", style("Failed files:").red());
        for result in &failed {
            println!(
                "  - {}: {}",
                result.path.display(),
                result.error.as_deref().unwrap_or("unknown error")
            );
        }
    }

    Ok(())
}

async fn process_files<B: VisionBackend>(
    pipeline: &ExtractionPipeline<B>,
    files: &[PathBuf],
    args: &BatchArgs,
) -> anyhow::Result<Vec<ProcessResult>> {
    // Set up progress bars
    let multi_progress = MultiProgress::new();
    let overall_pb = multi_progress.add(ProgressBar::new(files.len() as u64));
    overall_pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} files")
            .unwrap()
            .progress_chars("=>-"),
    );

    let mut results = Vec::with_capacity(files.len());

    for path in files {
        let file_start = Instant::now();
        let result = process_single_file(path, pipeline).await;
        let processing_time_ms = file_start.elapsed().as_millis() as u64;

        match result {
            Ok(invoice) => {
                results.push(ProcessResult {
                    path: path.clone(),
                    invoice: Some(invoice),
                    error: None,
                    processing_time_ms,
                });
            }
            Err(e) => {
                let error_msg = e.to_string();
                if args.continue_on_error {
                    warn!("Failed to process {}: {}", path.display(), error_msg);
                    results.push(ProcessResult {
                        path: path.clone(),
                        invoice: None,
                        error: Some(error_msg),
                        processing_time_ms,
                    });
                } else {
                    error!("Failed to process {}: {}", path.display(), error_msg);
                    anyhow::bail!("Processing failed: {}", error_msg);
                }
            }
        }

        overall_pb.inc(1);
    }

    overall_pb.finish_with_message("Complete");
    Ok(results)
}

async fn process_single_file<B: VisionBackend>(
    path: &Path,
    pipeline: &ExtractionPipeline<B>,
) -> anyhow::Result<Invoice> {
    let source = load_document(path)?;
    let report = pipeline.process(&source).await?;
    Ok(report.invoice)
}

fn write_summary(path: &Path, results: &[ProcessResult]) -> anyhow::Result<()> {
    let mut wtr = csv::Writer::from_path(path)?;

    wtr.write_record([
        "filename",
        "status",
        "invoice_number",
        "date",
        "vendor_name",
        "vendor_cuit",
        "total_amount",
        "currency",
        "confidence",
        "processing_time_ms",
        "error",
    ])?;

    for result in results {
        let filename = result
            .path
            .file_name()
            .and_then(|s| s.to_str())
            .unwrap_or("");

        if let Some(invoice) = &result.invoice {
            wtr.write_record([
                filename,
                "success",
                invoice.invoice_number(),
                invoice.date(),
                &invoice.vendor().name,
                &invoice.vendor().tax_id,
                &invoice.total_amount().to_string(),
                invoice.currency(),
                invoice.metadata().confidence.as_str(),
                &result.processing_time_ms.to_string(),
                "",
            ])?;
        } else {
            wtr.write_record([
                filename,
                "error",
                "",
                "",
                "",
                "",
                "",
                "",
                "",
                &result.processing_time_ms.to_string(),
                result.error.as_deref().unwrap_or(""),
            ])?;
        }
    }

    wtr.flush()?;
    Ok(())
}
