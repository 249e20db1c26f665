use crate::cell::CellValue;
use crate::error::{Result, SheetError};
use std::cmp::Ordering;
use std::collections::{HashMap, HashSet};

/// Strategy for handling null or empty values during cleaning.
#[derive(Debug, Clone, Default)]
pub enum NullStrategy {
    #[default]
    Keep,
    EmptyToNull,
}

/// Options for bulk data cleaning.
#[derive(Debug, Clone, Default)]
pub struct CleanOptions {
    pub trim: bool,
    pub null_strategy: NullStrategy,
}

/// A sheet representing a 2D grid of cells (row-major storage)
///
/// Once columns are named the header lives outside `data`, so every row in
/// `data` is a record.
#[derive(Debug, Clone)]
pub struct Sheet {
    name: String,
    data: Vec<Vec<CellValue>>,
    column_names: Option<Vec<String>>,
    column_index: Option<HashMap<String, usize>>,
}

impl Sheet {
    /// Create a new empty sheet
    #[must_use]
    pub fn new() -> Self {
        Self::with_name("Sheet1")
    }

    /// Create a new empty sheet with a name
    #[must_use]
    pub fn with_name(name: &str) -> Self {
        Sheet {
            name: name.to_string(),
            data: Vec::new(),
            column_names: None,
            column_index: None,
        }
    }

    /// Create a sheet from a 2D vector of values
    #[must_use]
    pub fn from_data<T: Into<CellValue>>(data: Vec<Vec<T>>) -> Self {
        let mut sheet = Self::new();
        sheet.data = data
            .into_iter()
            .map(|row| row.into_iter().map(Into::into).collect())
            .collect();
        sheet
    }

    /// Get the sheet name
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get the number of rows (the header is not counted)
    #[must_use]
    pub fn row_count(&self) -> usize {
        self.data.len()
    }

    /// Get the number of columns
    #[must_use]
    pub fn col_count(&self) -> usize {
        match &self.column_names {
            Some(names) => names.len(),
            None => self.data.first().map_or(0, Vec::len),
        }
    }

    /// Check if the sheet has no rows
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    // ===== Cell Access =====

    /// Get a cell value by row and column index (0-based)
    pub fn get(&self, row: usize, col: usize) -> Result<&CellValue> {
        self.data
            .get(row)
            .and_then(|r| r.get(col))
            .ok_or(SheetError::IndexOutOfBounds {
                row,
                col,
                rows: self.row_count(),
                cols: self.col_count(),
            })
    }

    /// Get a cell value by row index and column name
    pub fn get_by_name(&self, row: usize, col_name: &str) -> Result<&CellValue> {
        let col = self.column_index(col_name)?;
        self.get(row, col)
    }

    // ===== Row Operations =====

    /// Get an entire row by index (0-based)
    pub fn row(&self, index: usize) -> Result<&Vec<CellValue>> {
        self.data.get(index).ok_or(SheetError::RowIndexOutOfBounds {
            index,
            count: self.row_count(),
        })
    }

    /// Delete rows matching a predicate, returning how many were removed
    pub fn row_delete_where<F>(&mut self, predicate: F) -> usize
    where
        F: Fn(&[CellValue]) -> bool,
    {
        let original_len = self.data.len();
        self.data.retain(|row| !predicate(row));
        original_len - self.data.len()
    }

    /// Filter rows, keeping only those that match the predicate
    /// The predicate receives the row index and the row data
    pub fn filter_rows<F>(&mut self, predicate: F)
    where
        F: Fn(usize, &[CellValue]) -> bool,
    {
        let mut keep = Vec::new();
        for (i, row) in self.data.drain(..).enumerate() {
            if predicate(i, &row) {
                keep.push(row);
            }
        }
        self.data = keep;
    }

    /// Keep at most the first `len` rows
    pub fn truncate(&mut self, len: usize) {
        self.data.truncate(len);
    }

    /// Remove duplicate rows based on the provided column names.
    /// An empty slice compares every column. The first occurrence is kept.
    /// Returns the number of rows removed.
    pub fn remove_duplicates_by_columns(&mut self, columns: &[&str]) -> Result<usize> {
        let indices: Vec<usize> = if columns.is_empty() {
            (0..self.col_count()).collect()
        } else {
            columns
                .iter()
                .map(|name| self.column_index(name))
                .collect::<Result<Vec<_>>>()?
        };

        let mut seen = HashSet::new();
        let original_len = self.data.len();

        self.data.retain(|row| {
            let key: Vec<String> = indices
                .iter()
                .map(|&col| Self::cell_key(row.get(col).unwrap_or(&CellValue::Null)))
                .collect();
            seen.insert(key)
        });

        Ok(original_len - self.data.len())
    }

    /// Stable sort of the rows by the numeric value of a column.
    ///
    /// Cells without a numeric value sort after every number regardless of
    /// direction; rows with equal keys keep their relative order.
    pub fn sort_by_column(&mut self, name: &str, descending: bool) -> Result<()> {
        let col = self.column_index(name)?;
        self.data.sort_by(|a, b| {
            let left = a.get(col).and_then(CellValue::as_number);
            let right = b.get(col).and_then(CellValue::as_number);
            match (left, right) {
                (Some(l), Some(r)) => {
                    let ord = l.partial_cmp(&r).unwrap_or(Ordering::Equal);
                    if descending {
                        ord.reverse()
                    } else {
                        ord
                    }
                }
                (Some(_), None) => Ordering::Less,
                (None, Some(_)) => Ordering::Greater,
                (None, None) => Ordering::Equal,
            }
        });
        Ok(())
    }

    // ===== Column Operations =====

    /// Get an entire column by index (0-based)
    pub fn column(&self, index: usize) -> Result<Vec<CellValue>> {
        if index >= self.col_count() {
            return Err(SheetError::ColumnIndexOutOfBounds {
                index,
                count: self.col_count(),
            });
        }

        Ok(self
            .data
            .iter()
            .map(|row| row.get(index).cloned().unwrap_or_default())
            .collect())
    }

    /// Get an entire column by name
    pub fn column_by_name(&self, name: &str) -> Result<Vec<CellValue>> {
        let index = self.column_index(name)?;
        self.column(index)
    }

    /// Numeric view of a named column; non-numeric cells are `None`
    pub fn numbers_by_name(&self, name: &str) -> Result<Vec<Option<f64>>> {
        let index = self.column_index(name)?;
        Ok(self
            .data
            .iter()
            .map(|row| row.get(index).and_then(CellValue::as_number))
            .collect())
    }

    /// Replace the named column, or append it when no column has that name.
    pub fn set_column_by_name<T: Into<CellValue>>(&mut self, name: &str, data: Vec<T>) -> Result<()> {
        if data.len() != self.row_count() {
            return Err(SheetError::LengthMismatch {
                expected: self.row_count(),
                actual: data.len(),
            });
        }

        let index = match self.column_index(name) {
            Ok(index) => index,
            Err(SheetError::ColumnNotFound { .. }) => {
                let index = self.col_count();
                if let (Some(names), Some(lookup)) =
                    (self.column_names.as_mut(), self.column_index.as_mut())
                {
                    names.push(name.to_string());
                    lookup.insert(name.to_string(), index);
                }
                for row in &mut self.data {
                    row.push(CellValue::Null);
                }
                index
            }
            Err(err) => return Err(err),
        };

        for (row, value) in self.data.iter_mut().zip(data) {
            row[index] = value.into();
        }
        Ok(())
    }

    /// Apply a function to a specific column
    pub fn column_map<F>(&mut self, col_index: usize, f: F) -> Result<()>
    where
        F: Fn(&CellValue) -> CellValue,
    {
        if col_index >= self.col_count() {
            return Err(SheetError::ColumnIndexOutOfBounds {
                index: col_index,
                count: self.col_count(),
            });
        }

        for row in &mut self.data {
            if let Some(cell) = row.get_mut(col_index) {
                *cell = f(cell);
            }
        }
        Ok(())
    }

    /// Apply a function to a specific column by name
    pub fn column_map_by_name<F>(&mut self, name: &str, f: F) -> Result<()>
    where
        F: Fn(&CellValue) -> CellValue,
    {
        let index = self.column_index(name)?;
        self.column_map(index, f)
    }

    /// Clean string cells in-place using the provided options.
    pub fn clean_data(&mut self, options: &CleanOptions) {
        for row in &mut self.data {
            for cell in row {
                if let CellValue::String(s) = cell {
                    let cleaned = if options.trim { s.trim() } else { s.as_str() };
                    *cell = match options.null_strategy {
                        NullStrategy::EmptyToNull if cleaned.is_empty() => CellValue::Null,
                        _ => CellValue::String(cleaned.to_string()),
                    };
                }
            }
        }
    }

    // ===== Named Access =====

    /// Use the specified row as column headers.
    ///
    /// The header row is taken out of the data. Blank headers are named
    /// `Unnamed: <position>`, repeated names get a `.1`, `.2`, ... suffix and
    /// short rows are padded with nulls so every cell has a column.
    pub fn name_columns_by_row(&mut self, row_index: usize) -> Result<()> {
        self.row(row_index)?;
        let header = self.data.remove(row_index);

        let width = self
            .data
            .iter()
            .map(Vec::len)
            .max()
            .unwrap_or(0)
            .max(header.len());

        let mut taken = HashSet::new();
        let mut names = Vec::with_capacity(width);
        for position in 0..width {
            let raw = header.get(position).map(CellValue::as_str).unwrap_or_default();
            let base = if raw.is_empty() {
                format!("Unnamed: {position}")
            } else {
                raw
            };
            let mut name = base.clone();
            let mut suffix = 0;
            while taken.contains(&name) {
                suffix += 1;
                name = format!("{base}.{suffix}");
            }
            taken.insert(name.clone());
            names.push(name);
        }

        for row in &mut self.data {
            row.resize(width, CellValue::Null);
        }

        self.column_index = Some(
            names
                .iter()
                .enumerate()
                .map(|(i, name)| (name.clone(), i))
                .collect(),
        );
        self.column_names = Some(names);
        Ok(())
    }

    /// Get column names (if set)
    #[must_use]
    pub fn column_names(&self) -> Option<&Vec<String>> {
        self.column_names.as_ref()
    }

    /// Check whether a named column exists
    #[must_use]
    pub fn has_column(&self, name: &str) -> bool {
        self.column_index
            .as_ref()
            .is_some_and(|index| index.contains_key(name))
    }

    /// Get the column index by name
    pub fn column_index(&self, name: &str) -> Result<usize> {
        self.column_index
            .as_ref()
            .ok_or_else(|| {
                SheetError::ColumnsNotNamed("Call name_columns_by_row() first".to_string())
            })?
            .get(name)
            .copied()
            .ok_or_else(|| SheetError::ColumnNotFound {
                name: name.to_string(),
            })
    }

    fn cell_key(cell: &CellValue) -> String {
        match cell {
            CellValue::Null => "N".to_string(),
            CellValue::Bool(b) => format!("B{b}"),
            CellValue::Int(i) => format!("I{i}"),
            // Integral floats compare equal to the matching integer
            CellValue::Float(f) if f.fract() == 0.0 && f.abs() < 9.0e15 => {
                format!("I{}", *f as i64)
            }
            CellValue::Float(f) => format!("F{f:?}"),
            CellValue::String(s) => format!("S{s}"),
        }
    }

    /// Get rows iterator
    pub fn rows(&self) -> impl Iterator<Item = &Vec<CellValue>> {
        self.data.iter()
    }

    /// Get internal data reference
    #[must_use]
    pub fn data(&self) -> &Vec<Vec<CellValue>> {
        &self.data
    }

    /// Get mutable internal data reference
    pub fn data_mut(&mut self) -> &mut Vec<Vec<CellValue>> {
        &mut self.data
    }
}

impl Default for Sheet {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parts() -> Sheet {
        let mut sheet = Sheet::from_data(vec![
            vec![
                CellValue::from("Part_Name"),
                CellValue::from("Price"),
                CellValue::from("Units_Sold"),
            ],
            vec!["Rotor".into(), 40.into(), 3.into()],
            vec!["Filter".into(), 12.into(), CellValue::Null],
            vec!["Pad".into(), 25.into(), 9.into()],
            vec!["Belt".into(), 12.into(), 5.into()],
        ]);
        sheet.name_columns_by_row(0).unwrap();
        sheet
    }

    #[test]
    fn test_new_sheet() {
        let sheet = Sheet::new();
        assert_eq!(sheet.name(), "Sheet1");
        assert!(sheet.is_empty());
        assert_eq!(sheet.row_count(), 0);
        assert_eq!(sheet.col_count(), 0);
    }

    #[test]
    fn test_from_data() {
        let sheet = Sheet::from_data(vec![vec![1, 2, 3], vec![4, 5, 6]]);

        assert_eq!(sheet.row_count(), 2);
        assert_eq!(sheet.col_count(), 3);
        assert_eq!(sheet.get(0, 0).unwrap(), &CellValue::Int(1));
        assert_eq!(sheet.get(1, 2).unwrap(), &CellValue::Int(6));
    }

    #[test]
    fn test_named_columns_take_header_out() {
        let sheet = parts();

        assert_eq!(sheet.row_count(), 4);
        assert_eq!(sheet.col_count(), 3);
        assert_eq!(sheet.get_by_name(0, "Part_Name").unwrap().as_str(), "Rotor");
        assert!(sheet.has_column("Units_Sold"));
        assert!(!sheet.has_column("Cost"));
    }

    #[test]
    fn test_header_blank_and_repeated_names() {
        let mut sheet = Sheet::from_data(vec![
            vec!["Price", "", "Price", "Price"],
            vec!["1", "2", "3", "4"],
        ]);
        sheet.name_columns_by_row(0).unwrap();

        let names = sheet.column_names().unwrap();
        assert_eq!(names, &vec!["Price", "Unnamed: 1", "Price.1", "Price.2"]);
    }

    #[test]
    fn test_short_rows_are_padded() {
        let mut sheet = Sheet::from_data(vec![
            vec![CellValue::from("a"), CellValue::from("b")],
            vec![CellValue::from("x")],
        ]);
        sheet.name_columns_by_row(0).unwrap();

        assert!(sheet.get_by_name(0, "b").unwrap().is_null());
    }

    #[test]
    fn test_filter_rows() {
        let mut sheet = Sheet::from_data(vec![vec![1, 2], vec![3, 4], vec![5, 6]]);

        sheet.filter_rows(|_idx, row| row[0].as_number().unwrap_or(0.0) > 2.0);

        assert_eq!(sheet.row_count(), 2);
        assert_eq!(sheet.get(0, 0).unwrap(), &CellValue::Int(3));
    }

    #[test]
    fn test_sort_descending_is_stable_with_missing_last() {
        let mut sheet = parts();
        sheet.sort_by_column("Units_Sold", true).unwrap();
        let order: Vec<String> = sheet.rows().map(|row| row[0].as_str()).collect();
        assert_eq!(order, vec!["Pad", "Belt", "Rotor", "Filter"]);

        let mut sheet = parts();
        sheet.sort_by_column("Price", true).unwrap();
        let order: Vec<String> = sheet.rows().map(|row| row[0].as_str()).collect();
        assert_eq!(order, vec!["Rotor", "Pad", "Filter", "Belt"]);
    }

    #[test]
    fn test_set_column_appends_then_replaces() {
        let mut sheet = parts();
        sheet
            .set_column_by_name("Flag", vec![1, 2, 3, 4])
            .unwrap();
        assert_eq!(sheet.col_count(), 4);
        assert_eq!(sheet.get_by_name(3, "Flag").unwrap(), &CellValue::Int(4));

        sheet
            .set_column_by_name("Flag", vec![CellValue::Null; 4])
            .unwrap();
        assert_eq!(sheet.col_count(), 4);
        assert!(sheet.get_by_name(3, "Flag").unwrap().is_null());

        let result = sheet.set_column_by_name("Flag", vec![1]);
        assert!(matches!(result, Err(SheetError::LengthMismatch { .. })));
    }

    #[test]
    fn test_duplicates_treat_integral_floats_as_ints() {
        let mut sheet = Sheet::from_data(vec![
            vec![CellValue::from("Part"), CellValue::from("Price")],
            vec![CellValue::from("Rotor"), CellValue::Int(40)],
            vec![CellValue::from("Rotor"), CellValue::Float(40.0)],
            vec![CellValue::from("Rotor"), CellValue::Float(40.5)],
        ]);
        sheet.name_columns_by_row(0).unwrap();

        assert_eq!(sheet.remove_duplicates_by_columns(&[]).unwrap(), 1);
        assert_eq!(sheet.row_count(), 2);
    }

    #[test]
    fn test_duplicates_compare_cell_by_cell() {
        let mut sheet = Sheet::from_data(vec![
            vec![CellValue::from("Part"), CellValue::from("Brand")],
            vec![CellValue::from("a\x1fSb"), CellValue::from("c")],
            vec![CellValue::from("a"), CellValue::from("b\x1fSc")],
        ]);
        sheet.name_columns_by_row(0).unwrap();

        assert_eq!(sheet.remove_duplicates_by_columns(&[]).unwrap(), 0);
        assert_eq!(sheet.row_count(), 2);
    }

    #[test]
    fn test_numbers_by_name() {
        let sheet = parts();
        let units = sheet.numbers_by_name("Units_Sold").unwrap();
        assert_eq!(units, vec![Some(3.0), None, Some(9.0), Some(5.0)]);
    }

    #[test]
    fn test_unknown_column() {
        let sheet = parts();
        assert!(matches!(
            sheet.column_by_name("Cost"),
            Err(SheetError::ColumnNotFound { .. })
        ));
        assert!(matches!(
            Sheet::new().column_index("Cost"),
            Err(SheetError::ColumnsNotNamed(_))
        ));
    }
}
