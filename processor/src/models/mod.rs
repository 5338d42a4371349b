//! Domain model for the reshaping pipeline.
//!
//! - [`Table`] - named columns plus ordered rows, as parsed from one CSV file
//! - [`Cell`] - a single value, `None` when the field is empty

use crate::error::{SchemaError, SchemaResult};

/// A single table value. Empty fields are `None`.
pub type Cell = Option<String>;

/// In-memory table for one input file.
///
/// Rows are stored column-aligned: `rows[r][c]` belongs to `columns[c]`.
/// Column names are unique at all times.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Table {
    columns: Vec<String>,
    rows: Vec<Vec<Cell>>,
}

impl Table {
    /// Build a table, rejecting duplicate column names.
    ///
    /// Short rows are padded with `None`, long rows truncated.
    pub fn new(columns: Vec<String>, rows: Vec<Vec<Cell>>) -> SchemaResult<Self> {
        for (i, name) in columns.iter().enumerate() {
            if columns[..i].contains(name) {
                return Err(SchemaError::DuplicateColumn(name.clone()));
            }
        }

        let width = columns.len();
        let rows = rows
            .into_iter()
            .map(|mut row| {
                row.resize(width, None);
                row
            })
            .collect();

        Ok(Self { columns, rows })
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Vec<Cell>] {
        &self.rows
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.column_index(name).is_some()
    }

    /// Values of one column, top to bottom.
    pub fn column_values(&self, name: &str) -> Option<Vec<&Cell>> {
        let idx = self.column_index(name)?;
        Some(self.rows.iter().map(|row| &row[idx]).collect())
    }

    /// Keep only rows for which `keep` returns true. Order is preserved.
    pub fn retain_rows<F>(&mut self, mut keep: F)
    where
        F: FnMut(&[Cell]) -> bool,
    {
        self.rows.retain(|row| keep(row));
    }

    /// Remove a column and its values.
    pub fn remove_column(&mut self, name: &str) -> SchemaResult<()> {
        let idx = self
            .column_index(name)
            .ok_or_else(|| SchemaError::MissingColumn(name.to_string()))?;
        self.columns.remove(idx);
        for row in &mut self.rows {
            row.remove(idx);
        }
        Ok(())
    }

    /// Insert an all-`None` column at `index` (clamped to the width).
    pub fn insert_null_column(&mut self, index: usize, name: &str) -> SchemaResult<()> {
        if self.has_column(name) {
            return Err(SchemaError::DuplicateColumn(name.to_string()));
        }
        let index = index.min(self.columns.len());
        self.columns.insert(index, name.to_string());
        for row in &mut self.rows {
            row.insert(index, None);
        }
        Ok(())
    }

    /// Replace the whole header in place. Width must not change.
    pub(crate) fn set_columns(&mut self, columns: Vec<String>) -> SchemaResult<()> {
        debug_assert_eq!(columns.len(), self.columns.len());
        for (i, name) in columns.iter().enumerate() {
            if columns[..i].contains(name) {
                return Err(SchemaError::DuplicateColumn(name.clone()));
            }
        }
        self.columns = columns;
        Ok(())
    }

    /// Rebuild the table with exactly `order` as its columns.
    ///
    /// Missing names become all-`None` columns; columns not named are dropped.
    pub(crate) fn select(&self, order: &[String]) -> SchemaResult<Table> {
        let sources: Vec<Option<usize>> = order.iter().map(|name| self.column_index(name)).collect();
        let rows = self
            .rows
            .iter()
            .map(|row| {
                sources
                    .iter()
                    .map(|src| src.and_then(|i| row[i].clone()))
                    .collect()
            })
            .collect();

        Table::new(order.to_vec(), rows)
    }
}
