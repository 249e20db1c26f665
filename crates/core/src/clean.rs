//! Normalizing the raw table before any metric is computed.

use crate::columns::{ColumnMapping, Role};
use crate::error::ReportResult;
use partprice_sheet::{CellValue, CleanOptions, NullStrategy, Sheet};

/// Row counts reported by [`clean`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CleanStats {
    pub duplicates_removed: usize,
    pub missing_removed: usize,
    pub rows_remaining: usize,
}

/// Produce the cleaned table.
///
/// Steps run in a fixed order: trim text (blank text becomes null), coerce
/// the numeric role columns, drop exact duplicate rows, then drop rows
/// without a price or part identifier. Bad values never fail the stage.
pub fn clean(sheet: &Sheet, mapping: &ColumnMapping) -> ReportResult<(Sheet, CleanStats)> {
    let mut cleaned = sheet.clone();

    cleaned.clean_data(&CleanOptions {
        trim: true,
        null_strategy: NullStrategy::EmptyToNull,
    });

    for role in Role::NUMERIC {
        if let Some(column) = mapping.get(role) {
            cleaned.column_map_by_name(column, CellValue::to_numeric)?;
        }
    }

    let duplicates_removed = cleaned.remove_duplicates_by_columns(&[])?;

    let required = Role::ALL
        .into_iter()
        .filter(|role| role.is_mandatory())
        .filter_map(|role| mapping.get(role))
        .map(|column| cleaned.column_index(column))
        .collect::<Result<Vec<_>, _>>()?;

    let missing_removed = cleaned.row_delete_where(|row| {
        required
            .iter()
            .any(|&index| row.get(index).map_or(true, CellValue::is_null))
    });

    let stats = CleanStats {
        duplicates_removed,
        missing_removed,
        rows_remaining: cleaned.row_count(),
    };
    tracing::debug!(?stats, "cleaned table");

    Ok((cleaned, stats))
}
