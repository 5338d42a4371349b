//! CSV export of a reshaped [`Table`].

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::error::{ExportError, ExportResult};
use crate::models::Table;

/// Serialize a table as comma-separated text with a header row.
///
/// `None` cells are written as empty fields. No index column.
pub fn write_table<W: Write>(table: &Table, writer: W) -> ExportResult<()> {
    let mut csv_writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);

    csv_writer.write_record(table.columns())?;
    for row in table.rows() {
        csv_writer.write_record(row.iter().map(|cell| cell.as_deref().unwrap_or("")))?;
    }
    csv_writer.flush().map_err(|e| ExportError::CsvError(e.into()))?;
    Ok(())
}

/// Render a table to a CSV string.
pub fn table_to_csv(table: &Table) -> ExportResult<String> {
    let mut buf = Vec::new();
    write_table(table, &mut buf)?;
    // Cells come from decoded strings, so the output is valid UTF-8
    Ok(String::from_utf8_lossy(&buf).into_owned())
}

/// Write `table` to `<output_dir>/<file_name>`, creating the directory if needed.
pub fn export_table(table: &Table, output_dir: &Path, file_name: &str) -> ExportResult<PathBuf> {
    fs::create_dir_all(output_dir).map_err(|source| ExportError::CreateDir {
        path: output_dir.to_path_buf(),
        source,
    })?;

    let path = output_dir.join(file_name);
    let content = table_to_csv(table)?;
    fs::write(&path, content).map_err(|source| ExportError::IoError {
        path: path.clone(),
        source,
    })?;

    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn sample() -> Table {
        Table::new(
            vec!["[Zone]".into(), "[NberNoShopActivity]".into(), "[PerShopActivity]".into()],
            vec![
                vec![Some("North, East".into()), None, Some("0.25".into())],
                vec![Some("South".into()), None, Some("1.0".into())],
            ],
        )
        .unwrap()
    }

    #[test]
    fn test_nulls_are_empty_fields() {
        let csv = table_to_csv(&sample()).unwrap();
        assert_eq!(
            csv,
            "[Zone],[NberNoShopActivity],[PerShopActivity]\n\"North, East\",,0.25\nSouth,,1.0\n"
        );
    }

    #[test]
    fn test_export_creates_output_dir() {
        let dir = tempdir().unwrap();
        let out = dir.path().join("outputs").join("nested");

        let path = export_table(&sample(), &out, "zone1.csv").unwrap();

        assert_eq!(path, out.join("zone1.csv"));
        let written = fs::read_to_string(&path).unwrap();
        assert!(written.starts_with("[Zone],"));
    }

    #[test]
    fn test_export_into_file_path_fails() {
        let dir = tempdir().unwrap();
        let blocker = dir.path().join("outputs");
        fs::write(&blocker, "not a dir").unwrap();

        let result = export_table(&sample(), &blocker, "zone1.csv");
        assert!(matches!(result, Err(ExportError::CreateDir { .. })));
    }
}
