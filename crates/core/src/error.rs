//! Error types for partprice.

use crate::columns::Role;
use partprice_sheet::SheetError;
use partprice_viz::VizError;
use std::path::PathBuf;
use thiserror::Error;

/// Result type for report operations.
pub type ReportResult<T> = Result<T, ReportError>;

/// Errors that abort a report run.
#[derive(Debug, Error)]
pub enum ReportError {
    /// The input workbook does not exist.
    #[error("Excel file not found: {}", .path.display())]
    InputNotFound { path: PathBuf },

    /// Price or part identifier could not be matched to any column.
    #[error("Required column(s) missing: {}", role_list(.roles))]
    MissingRequiredColumns { roles: Vec<Role> },

    /// Reading or writing a table failed.
    #[error(transparent)]
    Sheet(#[from] SheetError),

    /// Rendering a chart failed.
    #[error(transparent)]
    Chart(#[from] VizError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

fn role_list(roles: &[Role]) -> String {
    roles
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_name_the_problem() {
        let err = ReportError::InputNotFound {
            path: PathBuf::from("automotive_pricing_bi_dataset.xlsx"),
        };
        assert_eq!(
            err.to_string(),
            "Excel file not found: automotive_pricing_bi_dataset.xlsx"
        );

        let err = ReportError::MissingRequiredColumns {
            roles: vec![Role::Price, Role::Part],
        };
        assert_eq!(err.to_string(), "Required column(s) missing: price, part");
    }
}
