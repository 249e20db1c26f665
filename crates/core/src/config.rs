//! Report constants and output file names.

use std::path::{Path, PathBuf};

/// Workbook read when no other input is configured.
pub const DEFAULT_INPUT: &str = "automotive_pricing_bi_dataset.xlsx";

/// Every file a run can produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OutputKind {
    CleanedTable,
    TopRevenue,
    Overpriced,
    LowMarginHighSales,
    PriceChart,
    PricePctChart,
}

impl OutputKind {
    /// Outputs in the order they are produced.
    pub const ALL: [OutputKind; 6] = [
        OutputKind::CleanedTable,
        OutputKind::TopRevenue,
        OutputKind::Overpriced,
        OutputKind::LowMarginHighSales,
        OutputKind::PriceChart,
        OutputKind::PricePctChart,
    ];

    #[must_use]
    pub fn file_name(self) -> &'static str {
        match self {
            OutputKind::CleanedTable => "cleaned_automotive_pricing.csv",
            OutputKind::TopRevenue => "top20_by_revenue.csv",
            OutputKind::Overpriced => "parts_overpriced_gt10pct.csv",
            OutputKind::LowMarginHighSales => "low_margin_high_sales.csv",
            OutputKind::PriceChart => "chart_price_distribution.png",
            OutputKind::PricePctChart => "chart_price_pct_diff.png",
        }
    }

    /// Human readable description for console output.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            OutputKind::CleanedTable => "Cleaned CSV",
            OutputKind::TopRevenue => "Top parts by revenue",
            OutputKind::Overpriced => "Parts priced >10% above competitor",
            OutputKind::LowMarginHighSales => "Low margin & high sales parts",
            OutputKind::PriceChart => "Price distribution chart",
            OutputKind::PricePctChart => "Price % difference chart",
        }
    }
}

/// Fixed parameters of a report run.
///
/// The binary always runs with [`ReportConfig::default`]; the builder
/// methods exist so the pipeline can be pointed at other locations.
#[derive(Debug, Clone)]
pub struct ReportConfig {
    pub input: PathBuf,
    pub output_dir: PathBuf,
    pub top_n: usize,
    pub overpriced_threshold_pct: f64,
    pub margin_quantile: f64,
    pub units_quantile: f64,
    pub histogram_bins: usize,
    pub chart_size: (u32, u32),
}

impl Default for ReportConfig {
    fn default() -> Self {
        ReportConfig {
            input: PathBuf::from(DEFAULT_INPUT),
            output_dir: PathBuf::from("."),
            top_n: 20,
            overpriced_threshold_pct: 10.0,
            margin_quantile: 0.25,
            units_quantile: 0.75,
            histogram_bins: 20,
            chart_size: (800, 500),
        }
    }
}

impl ReportConfig {
    /// Set the input workbook
    #[must_use]
    pub fn with_input(mut self, input: impl Into<PathBuf>) -> Self {
        self.input = input.into();
        self
    }

    /// Set the directory outputs are written to
    #[must_use]
    pub fn with_output_dir(mut self, output_dir: impl Into<PathBuf>) -> Self {
        self.output_dir = output_dir.into();
        self
    }

    /// Where a given output is written.
    #[must_use]
    pub fn output_path(&self, kind: OutputKind) -> PathBuf {
        self.output_dir.join(kind.file_name())
    }

    #[must_use]
    pub fn input(&self) -> &Path {
        &self.input
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ReportConfig::default();
        assert_eq!(config.input(), Path::new(DEFAULT_INPUT));
        assert_eq!(config.top_n, 20);
        assert_eq!(config.histogram_bins, 20);
        assert_eq!(
            config.output_path(OutputKind::TopRevenue),
            PathBuf::from("./top20_by_revenue.csv")
        );
    }

    #[test]
    fn test_builders() {
        let config = ReportConfig::default()
            .with_input("/data/parts.xlsx")
            .with_output_dir("/tmp/report");
        assert_eq!(config.input(), Path::new("/data/parts.xlsx"));
        assert_eq!(
            config.output_path(OutputKind::PriceChart),
            PathBuf::from("/tmp/report/chart_price_distribution.png")
        );
    }
}
