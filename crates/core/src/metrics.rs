//! Derived pricing metrics.

use crate::columns::{ColumnMapping, Role};
use crate::error::ReportResult;
use partprice_sheet::Sheet;

/// Absolute difference between our price and the competitor's.
pub const PRICE_DIFF: &str = "Price_diff";
/// Price difference as a percentage of the competitor's price.
pub const PRICE_PCT_DIFF: &str = "Price_pct_diff";
/// Unit margin: price minus cost.
pub const MARGIN: &str = "Margin";
/// Revenue computed from price and units sold.
pub const REVENUE_CALC: &str = "Revenue_calc";

/// Append the four metric columns to a copy of the cleaned table.
///
/// Each metric is `Null` on a row where an input is missing or the result is
/// NaN, and on every row when one of its roles was not resolved. Division by
/// a zero competitor price gives infinity.
pub fn derive_metrics(sheet: &Sheet, mapping: &ColumnMapping) -> ReportResult<Sheet> {
    let mut derived = sheet.clone();
    let rows = derived.row_count();

    let price = role_numbers(&derived, mapping, Role::Price)?;
    let competitor = role_numbers(&derived, mapping, Role::CompetitorPrice)?;
    let cost = role_numbers(&derived, mapping, Role::Cost)?;
    let units = role_numbers(&derived, mapping, Role::Units)?;

    let diff = combine(rows, price.as_deref(), competitor.as_deref(), |p, c| p - c);
    let pct = combine(rows, Some(diff.as_slice()), competitor.as_deref(), |d, c| d / c * 100.0);
    let margin = combine(rows, price.as_deref(), cost.as_deref(), |p, c| p - c);
    let revenue = combine(rows, price.as_deref(), units.as_deref(), |p, u| p * u);

    derived.set_column_by_name(PRICE_DIFF, diff)?;
    derived.set_column_by_name(PRICE_PCT_DIFF, pct)?;
    derived.set_column_by_name(MARGIN, margin)?;
    derived.set_column_by_name(REVENUE_CALC, revenue)?;

    tracing::debug!(rows, "derived metrics");
    Ok(derived)
}

fn role_numbers(
    sheet: &Sheet,
    mapping: &ColumnMapping,
    role: Role,
) -> ReportResult<Option<Vec<Option<f64>>>> {
    match mapping.get(role) {
        Some(column) => Ok(Some(sheet.numbers_by_name(column)?)),
        None => Ok(None),
    }
}

fn combine<F>(
    rows: usize,
    left: Option<&[Option<f64>]>,
    right: Option<&[Option<f64>]>,
    op: F,
) -> Vec<Option<f64>>
where
    F: Fn(f64, f64) -> f64,
{
    match (left, right) {
        (Some(left), Some(right)) => left
            .iter()
            .zip(right)
            .map(|(l, r)| match (l, r) {
                (Some(l), Some(r)) => Some(op(*l, *r)).filter(|v| !v.is_nan()),
                _ => None,
            })
            .collect(),
        _ => vec![None; rows],
    }
}
