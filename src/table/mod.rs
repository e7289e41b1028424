//! In-memory table model and the cleaning operations the pipeline applies to it:
//! duplicate-row removal, mean-fill of missing numeric cells, and column projection.

mod value;

pub use value::Value;

use std::collections::HashSet;
use thiserror::Error;

/// Errors raised by table operations.
#[derive(Error, Debug)]
pub enum TableError {
    /// Projection asked for a column the table does not have
    #[error("Column '{0}' not found")]
    UnknownColumn(String),

    /// Row width does not match the column list
    #[error("Row {index} has {found} cells, expected {expected}")]
    RaggedRow {
        index: usize,
        found: usize,
        expected: usize,
    },
}

/// Generates the fallback name for an unnamed column (1-based, like `column3`).
pub(crate) fn default_column_name(index: usize) -> String {
    format!("column{}", index + 1)
}

/// A table with named columns and ordered rows. Every row is exactly as wide
/// as the column list; absent cells are [`Value::Missing`].
///
/// The table is owned by a single file's processing state and mutated in
/// place; operations compose in whatever order they are triggered.
#[derive(Clone, Debug, PartialEq)]
pub struct Table {
    columns: Vec<String>,
    rows: Vec<Vec<Value>>,
}

impl Table {
    /// Creates a table, validating that every row matches the column count.
    pub fn new(columns: Vec<String>, rows: Vec<Vec<Value>>) -> Result<Table, TableError> {
        for (index, row) in rows.iter().enumerate() {
            if row.len() != columns.len() {
                return Err(TableError::RaggedRow {
                    index,
                    found: row.len(),
                    expected: columns.len(),
                });
            }
        }
        Ok(Table { columns, rows })
    }

    /// Builds a table from raw parsed records, first record as the header.
    ///
    /// Unnamed header cells get fallback names, rows narrower than the widest
    /// record are padded with missing cells, and a header narrower than its
    /// data rows is widened with fallback names.
    pub(crate) fn from_records(mut records: Vec<Vec<Value>>) -> Table {
        let width = records.iter().map(Vec::len).max().unwrap_or(0);
        let header = if records.is_empty() {
            Vec::new()
        } else {
            records.remove(0)
        };
        let columns = (0..width)
            .map(|index| match header.get(index) {
                None | Some(Value::Missing) => default_column_name(index),
                Some(value) => value.to_string(),
            })
            .collect();
        for record in &mut records {
            record.resize(width, Value::Missing);
        }
        Table {
            columns,
            rows: records,
        }
    }

    /// Returns the column names in order.
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Returns all rows in order.
    pub fn rows(&self) -> &[Vec<Value>] {
        &self.rows
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Returns at most the first `limit` rows, for previews.
    pub fn head(&self, limit: usize) -> &[Vec<Value>] {
        &self.rows[..limit.min(self.rows.len())]
    }

    /// Removes rows that are exact duplicates of an earlier row, keeping the
    /// first occurrence and preserving order otherwise. Returns the number of
    /// rows removed. Idempotent.
    pub fn drop_duplicates(&mut self) -> usize {
        let before = self.rows.len();
        let mut seen = HashSet::with_capacity(before);
        self.rows.retain(|row| seen.insert(row.clone()));
        before - self.rows.len()
    }

    /// Replaces missing cells in numeric columns with the column's arithmetic
    /// mean over its present values at the time of the call. Non-numeric
    /// columns are untouched; a column with no present values is not numeric
    /// and is therefore also untouched. Returns the number of cells filled.
    /// Idempotent once no missing numeric cells remain.
    pub fn fill_missing(&mut self) -> usize {
        let means: Vec<(usize, f64)> = self
            .numeric_column_indexes()
            .into_iter()
            .filter_map(|column| self.column_mean(column).map(|mean| (column, mean)))
            .collect();

        let mut filled = 0usize;
        for row in &mut self.rows {
            for (column, mean) in &means {
                if row[*column].is_missing() {
                    row[*column] = Value::Number(*mean);
                    filled += 1;
                }
            }
        }
        filled
    }

    /// Destructively narrows the table to the given columns, in the given
    /// order. The selection must be a subset of the current columns; dropped
    /// columns are not restorable by a later projection.
    pub fn select(&mut self, selection: &[String]) -> Result<(), TableError> {
        let indexes = selection
            .iter()
            .map(|name| {
                self.columns
                    .iter()
                    .position(|column| column == name)
                    .ok_or_else(|| TableError::UnknownColumn(name.to_owned()))
            })
            .collect::<Result<Vec<usize>, TableError>>()?;

        self.columns = selection.to_vec();
        for row in &mut self.rows {
            *row = indexes.iter().map(|index| row[*index].clone()).collect();
        }
        Ok(())
    }

    /// Indexes of columns whose present values are all numbers. Used by
    /// mean-fill and by the chart view.
    pub(crate) fn numeric_column_indexes(&self) -> Vec<usize> {
        (0..self.columns.len())
            .filter(|column| {
                let mut present = self
                    .rows
                    .iter()
                    .map(|row| &row[*column])
                    .filter(|value| !value.is_missing())
                    .peekable();
                present.peek().is_some() && present.all(|value| value.is_number())
            })
            .collect()
    }

    /// Mean over the present values of a numeric column; `None` when the
    /// column has no present values.
    fn column_mean(&self, column: usize) -> Option<f64> {
        let values: Vec<f64> = self
            .rows
            .iter()
            .filter_map(|row| row[column].as_number())
            .collect();
        if values.is_empty() {
            None
        } else {
            Some(values.iter().sum::<f64>() / values.len() as f64)
        }
    }
}
