//! # partprice-viz
//!
//! Histogram charts for partprice reports.
//!
//! Charts are drawn into an in-memory bitmap and encoded as PNG, so rendering
//! works on machines without a display. Text uses an embedded DejaVu Sans
//! registered as `sans-serif`; no system fonts are looked up.

use plotters::prelude::*;
use plotters::style::register_font;
use std::path::Path;
use std::sync::OnceLock;
use thiserror::Error;

/// Errors that can occur while rendering a chart.
#[derive(Error, Debug)]
pub enum VizError {
    #[error("Plotting error: {0}")]
    Plotting(String),
}

/// Result type for chart operations.
pub type Result<T> = std::result::Result<T, VizError>;

/// Default chart width in pixels.
const DEFAULT_WIDTH: u32 = 800;

/// Default chart height in pixels.
const DEFAULT_HEIGHT: u32 = 500;

/// Default number of histogram bins.
const DEFAULT_BINS: usize = 20;

const BAR_COLOR: RGBColor = RGBColor(31, 119, 180);

const FONT_FAMILY: &str = "sans-serif";
static FONT_BYTES: &[u8] = include_bytes!("../assets/DejaVuSans.ttf");
static FONT_REGISTERED: OnceLock<bool> = OnceLock::new();

/// Register the embedded font with plotters. Runs once per process.
fn ensure_font() -> Result<()> {
    let registered = *FONT_REGISTERED
        .get_or_init(|| register_font(FONT_FAMILY, FontStyle::Normal, FONT_BYTES).is_ok());
    if registered {
        Ok(())
    } else {
        Err(VizError::Plotting("embedded font could not be loaded".to_string()))
    }
}

fn plotting(err: impl std::fmt::Display) -> VizError {
    VizError::Plotting(err.to_string())
}

/// One histogram bar: `[lower, upper)`, except the last bar which also
/// contains `upper`.
#[derive(Debug, Clone, PartialEq)]
pub struct Bin {
    pub lower: f64,
    pub upper: f64,
    pub count: usize,
}

/// Equal-width histogram over the finite values of a series.
#[derive(Debug, Clone, PartialEq)]
pub struct Histogram {
    pub bins: Vec<Bin>,
}

impl Histogram {
    /// Bin the finite values into `bin_count` equal-width bins spanning
    /// `[min, max]`.
    ///
    /// A single distinct value spans `[v - 0.5, v + 0.5]`, widened when `v`
    /// is too large for that to be representable; no values spans `[0, 1]`
    /// with every bin empty.
    #[must_use]
    pub fn from_values<I>(values: I, bin_count: usize) -> Self
    where
        I: IntoIterator<Item = f64>,
    {
        let bin_count = bin_count.max(1);
        let values: Vec<f64> = values.into_iter().filter(|v| v.is_finite()).collect();

        let min = values.iter().copied().reduce(f64::min);
        let max = values.iter().copied().reduce(f64::max);

        let (lower, upper) = match min.zip(max) {
            None => (0.0, 1.0),
            Some((min, max)) if min == max => {
                // 0.5 vanishes next to very large magnitudes
                let half = 0.5_f64.max(min.abs() * 1e-9);
                (min - half, max + half)
            }
            Some(range) => range,
        };

        let width = (upper - lower) / bin_count as f64;
        let mut bins: Vec<Bin> = (0..bin_count)
            .map(|i| Bin {
                lower: lower + width * i as f64,
                upper: if i + 1 == bin_count {
                    upper
                } else {
                    lower + width * (i + 1) as f64
                },
                count: 0,
            })
            .collect();

        for value in values {
            let index = (((value - lower) / width) as usize).min(bin_count - 1);
            bins[index].count += 1;
        }

        Histogram { bins }
    }

    /// Number of values counted across all bins.
    #[must_use]
    pub fn total(&self) -> usize {
        self.bins.iter().map(|bin| bin.count).sum()
    }

    /// Tallest bar.
    #[must_use]
    pub fn max_count(&self) -> usize {
        self.bins.iter().map(|bin| bin.count).max().unwrap_or(0)
    }

    /// Left edge of the first bin and right edge of the last.
    #[must_use]
    pub fn range(&self) -> (f64, f64) {
        match (self.bins.first(), self.bins.last()) {
            (Some(first), Some(last)) => (first.lower, last.upper),
            _ => (0.0, 1.0),
        }
    }
}

/// Chart layout and labels.
#[derive(Debug, Clone)]
pub struct ChartSpec {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub width: u32,
    pub height: u32,
    pub bins: usize,
}

impl ChartSpec {
    /// Create a histogram spec with default size and bin count.
    #[must_use]
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            x_label: String::new(),
            y_label: "Count".to_string(),
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            bins: DEFAULT_BINS,
        }
    }

    /// Set the x axis description
    #[must_use]
    pub fn with_x_label(mut self, label: impl Into<String>) -> Self {
        self.x_label = label.into();
        self
    }

    /// Set the image size in pixels
    #[must_use]
    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    /// Set the number of bins
    #[must_use]
    pub fn with_bins(mut self, bins: usize) -> Self {
        self.bins = bins;
        self
    }
}

/// Render a histogram of `values` to a PNG file.
///
/// NaN and infinite values are left out. Returns the histogram that was drawn.
pub fn render_histogram(path: &Path, spec: &ChartSpec, values: &[f64]) -> Result<Histogram> {
    ensure_font()?;

    let histogram = Histogram::from_values(values.iter().copied(), spec.bins);
    let (lower, upper) = histogram.range();
    let y_max = histogram.max_count().max(1) as f64 * 1.05;

    let root = BitMapBackend::new(path, (spec.width, spec.height)).into_drawing_area();
    root.fill(&WHITE).map_err(plotting)?;

    let mut chart = ChartBuilder::on(&root)
        .caption(&spec.title, (FONT_FAMILY, 24))
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(50)
        .build_cartesian_2d(lower..upper, 0f64..y_max)
        .map_err(plotting)?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .label_style((FONT_FAMILY, 12))
        .axis_desc_style((FONT_FAMILY, 14))
        .x_desc(spec.x_label.as_str())
        .y_desc(spec.y_label.as_str())
        .draw()
        .map_err(plotting)?;

    chart
        .draw_series(histogram.bins.iter().map(|bin| {
            Rectangle::new([(bin.lower, 0.0), (bin.upper, bin.count as f64)], BAR_COLOR.filled())
        }))
        .map_err(plotting)?;

    chart
        .draw_series(histogram.bins.iter().filter(|bin| bin.count > 0).map(|bin| {
            Rectangle::new(
                [(bin.lower, 0.0), (bin.upper, bin.count as f64)],
                BLACK.stroke_width(1),
            )
        }))
        .map_err(plotting)?;

    root.present().map_err(plotting)?;

    tracing::debug!(
        path = %path.display(),
        values = histogram.total(),
        "rendered histogram"
    );

    Ok(histogram)
}
