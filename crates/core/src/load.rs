//! Reading the source workbook.

use crate::error::{ReportError, ReportResult};
use partprice_sheet::{Sheet, XlsxReadOptions};
use std::path::Path;

/// Load the first worksheet of `path`, using its first row as the header.
///
/// A missing file is reported as [`ReportError::InputNotFound`] before any
/// attempt to open it.
pub fn load_sheet(path: &Path) -> ReportResult<Sheet> {
    if !path.exists() {
        return Err(ReportError::InputNotFound {
            path: path.to_path_buf(),
        });
    }

    let sheet =
        Sheet::from_xlsx_with_options(path, XlsxReadOptions::default().with_headers(true))?;

    tracing::debug!(
        path = %path.display(),
        rows = sheet.row_count(),
        columns = sheet.col_count(),
        "loaded workbook"
    );
    Ok(sheet)
}
