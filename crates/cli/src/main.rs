//! # partprice-cli
//!
//! Builds the automotive pricing report from the workbook in the current
//! directory.

use anyhow::Result;
use clap::Parser;
use colored::Colorize;
use partprice_core::{
    CleanStats, ColumnMapping, OutputKind, Pipeline, ReportConfig, ReportError, ReportObserver,
    RunSummary,
};
use std::path::Path;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

/// partprice - pricing report for automotive parts
///
/// Reads automotive_pricing_bi_dataset.xlsx from the current directory and
/// writes cleaned data, extracts and charts next to it.
#[derive(Parser)]
#[command(name = "partprice")]
#[command(author, version, about, long_about = None)]
struct Cli {}

fn main() -> ExitCode {
    let _cli = Cli::parse();

    // Diagnostics go to stderr so they never mix with the report itself
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{} {err:#}", "Error:".red().bold());
            if let Some(hint) = err.downcast_ref::<ReportError>().and_then(hint) {
                eprintln!("{hint}");
            }
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<()> {
    let pipeline = Pipeline::new(ReportConfig::default());
    tracing::info!(input = %pipeline.config().input().display(), "starting report");

    let summary = pipeline.run(&mut Console)?;
    print_manifest(&summary);
    Ok(())
}

fn hint(err: &ReportError) -> Option<&'static str> {
    match err {
        ReportError::InputNotFound { .. } => {
            Some("Please put the file in the same folder as this program and run again.")
        }
        ReportError::MissingRequiredColumns { .. } => {
            Some("Please check column names and run again.")
        }
        _ => None,
    }
}

/// Prints pipeline progress to stdout.
struct Console;

impl ReportObserver for Console {
    fn loaded(&mut self, rows: usize, columns: usize, names: &[String]) {
        println!("Loaded file. Rows: {rows} Columns: {columns}");
        println!("Column names: {}", names.join(", "));
    }

    fn resolved(&mut self, mapping: &ColumnMapping) {
        println!();
        println!("{}", "Detected columns (may be None if missing):".cyan().bold());
        for (role, column) in mapping.iter() {
            match column {
                Some(column) => println!("{role} -> {column}"),
                None => println!("{role} -> {}", "None".yellow()),
            }
        }
    }

    fn cleaned(&mut self, stats: &CleanStats) {
        println!();
        println!("Removed duplicates: {} rows dropped", stats.duplicates_removed);
        println!("Rows after dropping missing key fields: {}", stats.rows_remaining);
    }

    fn output_written(&mut self, kind: OutputKind, path: &Path) {
        if kind == OutputKind::CleanedTable {
            println!();
        }
        println!(
            "{} {} saved to {}",
            "✅".green(),
            kind.label(),
            display_name(path).green()
        );
    }

    fn output_skipped(&mut self, kind: OutputKind, reason: &str) {
        println!(
            "{} {reason}, skipping {}",
            "⚠".yellow(),
            kind.file_name().yellow()
        );
    }
}

fn print_manifest(summary: &RunSummary) {
    println!();
    println!("{}", "All done. Output files in project folder:".cyan().bold());
    for (_, path) in &summary.written {
        println!(" - {}", display_name(path));
    }
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map_or_else(|| path.display().to_string(), |name| name.to_string_lossy().into_owned())
}
