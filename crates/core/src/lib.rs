//! # partprice-core
//!
//! Pricing report pipeline for automotive parts.
//!
//! This crate provides:
//! - Column role resolution against a fixed alias table
//! - Cleaning and metric derivation stages
//! - Revenue, overpricing and margin extracts
//! - CSV and histogram export
//! - A [`Pipeline`] that runs every stage and reports progress to a
//!   [`ReportObserver`]
//!
//! Every stage takes a table by reference and returns a new one, so stages
//! can be exercised on their own with small synthetic sheets.

/// Table cleaning.
pub mod clean;
/// Column roles and alias resolution.
pub mod columns;
/// Run parameters and output names.
pub mod config;
/// Error types and result aliases.
pub mod error;
pub mod export;
pub mod extracts;
/// Workbook loading.
pub mod load;
/// Derived metric columns.
pub mod metrics;
pub mod pipeline;
pub mod stats;

pub use clean::{clean, CleanStats};
pub use columns::{resolve_column, ColumnMapping, Role};
pub use config::{OutputKind, ReportConfig, DEFAULT_INPUT};
pub use error::{ReportError, ReportResult};
pub use export::{chart_spec, export_csv, export_histogram};
pub use extracts::{low_margin_high_sales, overpriced, top_by_revenue};
pub use load::load_sheet;
pub use metrics::{derive_metrics, MARGIN, PRICE_DIFF, PRICE_PCT_DIFF, REVENUE_CALC};
pub use pipeline::{NoopObserver, Pipeline, ReportObserver, RunSummary};
pub use stats::quantile;

/// Re-export chart rendering.
pub use partprice_viz::render_histogram;
