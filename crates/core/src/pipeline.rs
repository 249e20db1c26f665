//! Running every stage of a report in order.
//!
//! [`Pipeline::run`] loads the workbook, resolves column roles, cleans the
//! table, derives metrics and then writes each output as soon as it has been
//! computed. Progress is reported through a [`ReportObserver`], which keeps
//! console formatting out of the stages themselves.

use crate::clean::{clean, CleanStats};
use crate::columns::{ColumnMapping, Role};
use crate::config::{OutputKind, ReportConfig};
use crate::error::ReportResult;
use crate::export::{chart_spec, export_csv, export_histogram};
use crate::extracts::{low_margin_high_sales, overpriced, top_by_revenue};
use crate::load::load_sheet;
use crate::metrics::{derive_metrics, PRICE_PCT_DIFF};
use partprice_sheet::Sheet;
use std::path::{Path, PathBuf};

const NO_COMPETITOR_PRICE: &str = "Competitor price column not found";
const NO_COST_OR_UNITS: &str = "Cost or Units column not found";

/// Receives progress events from a running [`Pipeline`].
///
/// Every method has an empty default so implementors only handle what they
/// display.
pub trait ReportObserver {
    /// The workbook was read.
    fn loaded(&mut self, _rows: usize, _columns: usize, _names: &[String]) {}

    /// Column roles were resolved.
    fn resolved(&mut self, _mapping: &ColumnMapping) {}

    /// The table was cleaned.
    fn cleaned(&mut self, _stats: &CleanStats) {}

    /// An output file was written.
    fn output_written(&mut self, _kind: OutputKind, _path: &Path) {}

    /// An optional output was not produced.
    fn output_skipped(&mut self, _kind: OutputKind, _reason: &str) {}
}

/// Observer that ignores every event.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopObserver;

impl ReportObserver for NoopObserver {}

/// What a completed run did.
#[derive(Debug, Clone)]
pub struct RunSummary {
    pub input_rows: usize,
    pub input_columns: usize,
    pub mapping: ColumnMapping,
    pub clean: CleanStats,
    /// Files produced by this run, in the order they were written.
    pub written: Vec<(OutputKind, PathBuf)>,
    pub skipped: Vec<(OutputKind, &'static str)>,
}

impl RunSummary {
    /// Whether a given output was produced.
    #[must_use]
    pub fn wrote(&self, kind: OutputKind) -> bool {
        self.written.iter().any(|(written, _)| *written == kind)
    }
}

/// A single report run.
#[derive(Debug, Clone, Default)]
pub struct Pipeline {
    config: ReportConfig,
}

impl Pipeline {
    #[must_use]
    pub fn new(config: ReportConfig) -> Self {
        Self { config }
    }

    #[must_use]
    pub fn config(&self) -> &ReportConfig {
        &self.config
    }

    /// Run every stage. Fails before writing anything when the input is
    /// missing or lacks a price or part column.
    pub fn run(&self, observer: &mut dyn ReportObserver) -> ReportResult<RunSummary> {
        let config = &self.config;

        let raw = load_sheet(config.input())?;
        let names: Vec<String> = raw.column_names().cloned().unwrap_or_default();
        observer.loaded(raw.row_count(), raw.col_count(), &names);

        let mapping = ColumnMapping::resolve(&names);
        observer.resolved(&mapping);
        mapping.require_mandatory()?;

        let (cleaned, stats) = clean(&raw, &mapping)?;
        observer.cleaned(&stats);

        let table = derive_metrics(&cleaned, &mapping)?;

        std::fs::create_dir_all(&config.output_dir)?;

        let mut run = Run {
            config,
            observer,
            summary: RunSummary {
                input_rows: raw.row_count(),
                input_columns: raw.col_count(),
                mapping: mapping.clone(),
                clean: stats,
                written: Vec::new(),
                skipped: Vec::new(),
            },
        };

        run.table(OutputKind::CleanedTable, &table)?;

        let top = top_by_revenue(&table, &mapping, config.top_n)?;
        run.table(OutputKind::TopRevenue, &top)?;

        match overpriced(&table, &mapping, config.overpriced_threshold_pct)? {
            Some(selected) => run.table(OutputKind::Overpriced, &selected)?,
            None => run.skip(OutputKind::Overpriced, NO_COMPETITOR_PRICE),
        }

        match low_margin_high_sales(
            &table,
            &mapping,
            config.margin_quantile,
            config.units_quantile,
        )? {
            Some(selected) => run.table(OutputKind::LowMarginHighSales, &selected)?,
            None => run.skip(OutputKind::LowMarginHighSales, NO_COST_OR_UNITS),
        }

        if let Some(price) = mapping.get(Role::Price) {
            run.chart(OutputKind::PriceChart, &table, price)?;
        }

        if mapping.has(Role::CompetitorPrice) {
            run.chart(OutputKind::PricePctChart, &table, PRICE_PCT_DIFF)?;
        } else {
            run.skip(OutputKind::PricePctChart, NO_COMPETITOR_PRICE);
        }

        tracing::info!(
            written = run.summary.written.len(),
            skipped = run.summary.skipped.len(),
            "report complete"
        );
        Ok(run.summary)
    }
}

struct Run<'a> {
    config: &'a ReportConfig,
    observer: &'a mut dyn ReportObserver,
    summary: RunSummary,
}

impl Run<'_> {
    fn table(&mut self, kind: OutputKind, sheet: &Sheet) -> ReportResult<()> {
        let path = self.config.output_path(kind);
        export_csv(sheet, &path)?;
        self.written(kind, path);
        Ok(())
    }

    fn chart(&mut self, kind: OutputKind, sheet: &Sheet, column: &str) -> ReportResult<()> {
        let Some(spec) = chart_spec(kind, self.config) else {
            return Ok(());
        };
        let path = self.config.output_path(kind);
        export_histogram(sheet, column, &spec, &path)?;
        self.written(kind, path);
        Ok(())
    }

    fn written(&mut self, kind: OutputKind, path: PathBuf) {
        self.observer.output_written(kind, &path);
        self.summary.written.push((kind, path));
    }

    fn skip(&mut self, kind: OutputKind, reason: &'static str) {
        tracing::warn!(output = kind.file_name(), reason, "skipped output");
        self.observer.output_skipped(kind, reason);
        self.summary.skipped.push((kind, reason));
    }
}
