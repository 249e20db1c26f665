//! Tabular sheet model for partprice
//!
//! A [`Sheet`] is a row-major grid of [`CellValue`]s with an optional header
//! of column names. It reads the first worksheet of an Excel workbook,
//! reads and writes CSV, and offers the row/column primitives the report
//! pipeline is built from: trimming, numeric coercion, duplicate removal,
//! filtering and stable sorting.
//!
//! # Examples
//!
//! ```
//! use partprice_sheet::{CellValue, Sheet};
//!
//! let mut sheet = Sheet::from_data(vec![
//!     vec!["Part_Name", "Price"],
//!     vec!["Rotor", "40"],
//!     vec!["Pad", "25"],
//! ]);
//! sheet.name_columns_by_row(0).unwrap();
//!
//! assert_eq!(sheet.row_count(), 2);
//! assert_eq!(sheet.numbers_by_name("Price").unwrap(), vec![Some(40.0), Some(25.0)]);
//! assert_eq!(sheet.get_by_name(1, "Part_Name").unwrap(), &CellValue::from("Pad"));
//! ```
//!
//! ## Loading from Excel
//!
//! ```no_run
//! use partprice_sheet::{Sheet, XlsxReadOptions};
//!
//! let sheet = Sheet::from_xlsx_with_options(
//!     "parts.xlsx",
//!     XlsxReadOptions::default().with_headers(true),
//! )
//! .unwrap();
//! ```

mod cell;
mod csv;
mod error;
mod sheet;
mod xlsx;

/// Re-export cell value type.
pub use cell::CellValue;
/// Re-export CSV options.
pub use csv::CsvOptions;
/// Re-export sheet error types.
pub use error::{Result, SheetError};
/// Re-export sheet type.
pub use sheet::{CleanOptions, NullStrategy, Sheet};
/// Re-export XLSX read options.
pub use xlsx::XlsxReadOptions;
