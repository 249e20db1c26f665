//! Filtered and sorted views of the metric table.

use crate::columns::{ColumnMapping, Role};
use crate::error::ReportResult;
use crate::metrics::{MARGIN, PRICE_PCT_DIFF, REVENUE_CALC};
use crate::stats::quantile;
use partprice_sheet::{CellValue, Sheet};

/// The `top_n` highest-revenue rows, highest first.
///
/// Uses the workbook's own revenue column when one was resolved, otherwise
/// the computed [`REVENUE_CALC`]. Rows without a revenue sort last.
pub fn top_by_revenue(sheet: &Sheet, mapping: &ColumnMapping, top_n: usize) -> ReportResult<Sheet> {
    let source = mapping.get(Role::Revenue).unwrap_or(REVENUE_CALC);

    let mut top = sheet.clone();
    top.sort_by_column(source, true)?;
    top.truncate(top_n);

    tracing::debug!(source, rows = top.row_count(), "selected top parts by revenue");
    Ok(top)
}

/// Rows priced more than `threshold_pct` percent above the competitor,
/// largest gap first. `None` when no competitor price column was resolved.
pub fn overpriced(
    sheet: &Sheet,
    mapping: &ColumnMapping,
    threshold_pct: f64,
) -> ReportResult<Option<Sheet>> {
    if !mapping.has(Role::CompetitorPrice) {
        return Ok(None);
    }

    let pct = sheet.column_index(PRICE_PCT_DIFF)?;
    let mut selected = sheet.clone();
    selected.filter_rows(|_, row| {
        row.get(pct)
            .and_then(CellValue::as_number)
            .is_some_and(|value| value > threshold_pct)
    });
    selected.sort_by_column(PRICE_PCT_DIFF, true)?;

    tracing::debug!(rows = selected.row_count(), threshold_pct, "selected overpriced parts");
    Ok(Some(selected))
}

/// Rows in the bottom margin quantile that also sit in the top units
/// quantile, best sellers first.
///
/// Both cut-offs are computed over the whole table. If either has no values
/// to work from the result keeps only the header. `None` when cost or units
/// was not resolved.
pub fn low_margin_high_sales(
    sheet: &Sheet,
    mapping: &ColumnMapping,
    margin_quantile: f64,
    units_quantile: f64,
) -> ReportResult<Option<Sheet>> {
    let Some(units) = mapping.get(Role::Units) else {
        return Ok(None);
    };
    if !mapping.has(Role::Cost) {
        return Ok(None);
    }

    let margin_cut = quantile(sheet.numbers_by_name(MARGIN)?.into_iter().flatten(), margin_quantile);
    let units_cut = quantile(sheet.numbers_by_name(units)?.into_iter().flatten(), units_quantile);

    let margin_index = sheet.column_index(MARGIN)?;
    let units_index = sheet.column_index(units)?;

    let mut selected = sheet.clone();
    match margin_cut.zip(units_cut) {
        Some((margin_cut, units_cut)) => selected.filter_rows(|_, row| {
            let margin = row.get(margin_index).and_then(CellValue::as_number);
            let sold = row.get(units_index).and_then(CellValue::as_number);
            margin.is_some_and(|m| m <= margin_cut) && sold.is_some_and(|u| u >= units_cut)
        }),
        None => selected.truncate(0),
    }
    selected.sort_by_column(units, true)?;

    tracing::debug!(
        rows = selected.row_count(),
        ?margin_cut,
        ?units_cut,
        "selected low margin, high sales parts"
    );
    Ok(Some(selected))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metrics::derive_metrics;

    fn metric_table(header: &[&str], rows: Vec<Vec<CellValue>>) -> (Sheet, ColumnMapping) {
        let mut data: Vec<Vec<CellValue>> = vec![header.iter().map(|h| CellValue::from(*h)).collect()];
        data.extend(rows);
        let mut sheet = Sheet::from_data(data);
        sheet.name_columns_by_row(0).unwrap();
        let mapping = ColumnMapping::resolve(sheet.column_names().unwrap());
        let derived = derive_metrics(&sheet, &mapping).unwrap();
        (derived, mapping)
    }

    fn parts(sheet: &Sheet) -> Vec<String> {
        sheet
            .column_by_name("Part_Name")
            .unwrap()
            .iter()
            .map(CellValue::as_str)
            .collect()
    }

    #[test]
    fn test_top_uses_computed_revenue_and_is_stable() {
        let (sheet, mapping) = metric_table(
            &["Part_Name", "Price", "Units_Sold"],
            vec![
                vec!["A".into(), 10.into(), 2.into()],
                vec!["B".into(), 5.into(), 10.into()],
                vec!["C".into(), 20.into(), 1.into()],
                vec!["D".into(), 100.into(), CellValue::Null],
                vec!["E".into(), 1.into(), 1.into()],
            ],
        );

        let top = top_by_revenue(&sheet, &mapping, 4).unwrap();
        assert_eq!(parts(&top), vec!["B", "A", "C", "E"]);

        let all = top_by_revenue(&sheet, &mapping, 20).unwrap();
        assert_eq!(parts(&all), vec!["B", "A", "C", "E", "D"]);
    }

    #[test]
    fn test_top_prefers_workbook_revenue() {
        let (sheet, mapping) = metric_table(
            &["Part_Name", "Price", "Units_Sold", "Revenue"],
            vec![
                vec!["A".into(), 10.into(), 10.into(), 5.into()],
                vec!["B".into(), 1.into(), 1.into(), 50.into()],
            ],
        );

        let top = top_by_revenue(&sheet, &mapping, 20).unwrap();
        assert_eq!(parts(&top), vec!["B", "A"]);
    }

    #[test]
    fn test_overpriced_threshold_is_strict() {
        let (sheet, mapping) = metric_table(
            &["Part_Name", "Price", "Competitor_Price"],
            vec![
                vec!["A".into(), 110.into(), 100.into()],
                vec!["B".into(), 130.into(), 100.into()],
                vec!["C".into(), 5.into(), 0.into()],
                vec!["D".into(), 112.into(), 100.into()],
                vec!["E".into(), 90.into(), CellValue::Null],
            ],
        );

        let selected = overpriced(&sheet, &mapping, 10.0).unwrap().unwrap();
        assert_eq!(parts(&selected), vec!["C", "B", "D"]);
    }

    #[test]
    fn test_overpriced_needs_competitor_price() {
        let (sheet, mapping) = metric_table(
            &["Part_Name", "Price"],
            vec![vec!["A".into(), 110.into()]],
        );
        assert!(overpriced(&sheet, &mapping, 10.0).unwrap().is_none());
    }

    #[test]
    fn test_low_margin_high_sales() {
        let (sheet, mapping) = metric_table(
            &["Part_Name", "Price", "Cost", "Units_Sold"],
            vec![
                vec!["A".into(), 10.into(), 9.into(), 100.into()],
                vec!["B".into(), 10.into(), 2.into(), 100.into()],
                vec!["C".into(), 10.into(), 9.into(), 1.into()],
                vec!["D".into(), 10.into(), 5.into(), 50.into()],
                vec!["E".into(), 10.into(), 9.5.into(), 120.into()],
            ],
        );

        // margins 1, 8, 1, 5, 0.5 -> q25 = 1; units 100, 100, 1, 50, 120 -> q75 = 100
        let selected = low_margin_high_sales(&sheet, &mapping, 0.25, 0.75)
            .unwrap()
            .unwrap();
        assert_eq!(parts(&selected), vec!["E", "A"]);
    }

    #[test]
    fn test_low_margin_without_values_keeps_header() {
        let (sheet, mapping) = metric_table(
            &["Part_Name", "Price", "Cost", "Units_Sold"],
            vec![vec!["A".into(), 10.into(), CellValue::Null, CellValue::Null]],
        );

        let selected = low_margin_high_sales(&sheet, &mapping, 0.25, 0.75)
            .unwrap()
            .unwrap();
        assert_eq!(selected.row_count(), 0);
        assert_eq!(selected.col_count(), sheet.col_count());
    }

    #[test]
    fn test_low_margin_needs_cost_and_units() {
        let (sheet, mapping) = metric_table(
            &["Part_Name", "Price", "Units_Sold"],
            vec![vec!["A".into(), 10.into(), 3.into()]],
        );
        assert!(low_margin_high_sales(&sheet, &mapping, 0.25, 0.75)
            .unwrap()
            .is_none());
    }
}
