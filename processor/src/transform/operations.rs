//! Structural edits applied to a [`Table`].
//!
//! Each function is one pipeline stage. Drop, rename and insert are strict:
//! a missing source column or a colliding name is an error and the table
//! is left unchanged for drop and rename.

use std::collections::BTreeMap;

use crate::error::{SchemaError, SchemaResult};
use crate::models::{Cell, Table};

/// Index at which placeholder columns are inserted (right after the first column).
///
/// Every placeholder goes to this same index, so a list `[A, B]` ends up
/// as `first, B, A, ...`.
pub const INSERT_POSITION: usize = 1;

/// Whether an indicator cell reads as boolean true.
pub fn is_truthy(cell: &Cell) -> bool {
    cell.as_deref()
        .is_some_and(|v| v.trim().eq_ignore_ascii_case("true"))
}

/// Remove rows whose `indicator` column is true.
///
/// Returns the number of rows removed. A table without the indicator
/// column is left untouched.
pub fn filter_total_rows(table: &mut Table, indicator: &str) -> usize {
    let Some(idx) = table.column_index(indicator) else {
        return 0;
    };

    let before = table.row_count();
    table.retain_rows(|row| !is_truthy(&row[idx]));
    before - table.row_count()
}

/// Remove every listed column.
pub fn drop_columns(table: &mut Table, columns: &[String]) -> SchemaResult<()> {
    if let Some(missing) = columns.iter().find(|c| !table.has_column(c)) {
        return Err(SchemaError::MissingColumn(missing.clone()));
    }

    for column in columns {
        table.remove_column(column)?;
    }
    Ok(())
}

/// Rename columns in place, keeping their positions.
///
/// All renames apply at once, so `{a: b, b: a}` swaps two names.
pub fn rename_columns(table: &mut Table, renames: &BTreeMap<String, String>) -> SchemaResult<()> {
    if let Some(missing) = renames.keys().find(|old| !table.has_column(old)) {
        return Err(SchemaError::MissingColumn(missing.clone()));
    }

    let renamed = table
        .columns()
        .iter()
        .map(|c| renames.get(c).unwrap_or(c).clone())
        .collect();

    table.set_columns(renamed)
}

/// Insert each placeholder as an all-empty column at [`INSERT_POSITION`].
pub fn insert_columns(table: &mut Table, columns: &[String]) -> SchemaResult<()> {
    for column in columns {
        table.insert_null_column(INSERT_POSITION, column)?;
    }
    Ok(())
}

/// Replace the table with exactly `order` as its columns.
///
/// Listed columns missing from the table come out empty; unlisted ones are gone.
pub fn reorder_columns(table: &mut Table, order: &[String]) -> SchemaResult<()> {
    *table = table.select(order)?;
    Ok(())
}
