//! Writing report outputs to disk.

use crate::config::{OutputKind, ReportConfig};
use crate::error::ReportResult;
use partprice_sheet::Sheet;
use partprice_viz::{render_histogram, ChartSpec, Histogram};
use std::path::Path;

/// Write a table as CSV, header first, replacing any existing file.
pub fn export_csv(sheet: &Sheet, path: &Path) -> ReportResult<()> {
    sheet.save_as_csv(path)?;
    tracing::debug!(path = %path.display(), rows = sheet.row_count(), "wrote csv");
    Ok(())
}

/// Title and axis labels for a chart output; `None` for table outputs.
#[must_use]
pub fn chart_spec(kind: OutputKind, config: &ReportConfig) -> Option<ChartSpec> {
    let (title, x_label) = match kind {
        OutputKind::PriceChart => ("Price Distribution", "Price"),
        OutputKind::PricePctChart => ("Price % Difference vs Competitor", "Price % Difference"),
        _ => return None,
    };
    let (width, height) = config.chart_size;
    Some(
        ChartSpec::new(title)
            .with_x_label(x_label)
            .with_size(width, height)
            .with_bins(config.histogram_bins),
    )
}

/// Render a histogram of the numeric values in `column`.
pub fn export_histogram(
    sheet: &Sheet,
    column: &str,
    spec: &ChartSpec,
    path: &Path,
) -> ReportResult<Histogram> {
    let values: Vec<f64> = sheet.numbers_by_name(column)?.into_iter().flatten().collect();
    Ok(render_histogram(path, spec, &values)?)
}
