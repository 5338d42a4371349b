//! Per-file pipeline and batch driver.
//!
//! Each file goes through the same stages, strictly in this order:
//!
//! ```text
//! load → filter rows → drop → rename → insert → reorder → export
//! ```
//!
//! Later stages assume earlier ones completed: renames may target names
//! freed by the drop step, and the reorder step defines the exported
//! header exactly.
//!
//! # Example
//!
//! ```rust,ignore
//! use sfs_histo::{ColumnSpec, PipelineConfig, Processor};
//!
//! let processor = Processor::new(ColumnSpec::default_recipe(), PipelineConfig::default())?;
//! let report = processor.start(["zone1.csv", "zone2.csv"]);
//! println!("{}", report.summary());
//! ```

use serde::Serialize;
use std::path::PathBuf;

use super::export::export_table;
use super::operations::{drop_columns, filter_total_rows, insert_columns, rename_columns, reorder_columns};
use crate::config::{ColumnSpec, PipelineConfig};
use crate::error::{PipelineError, PipelineResult, SchemaError, Stage, StageFailure};
use crate::logs::{log_error, log_info, log_info_indent, log_progress, log_success, log_warning};
use crate::models::Table;
use crate::parser::{list_csv_files, read_table};

/// Outcome of one successfully processed file
#[derive(Debug, Clone, Serialize)]
pub struct FileReport {
    pub file_name: String,
    pub output_path: PathBuf,
    pub encoding: String,
    pub rows_in: usize,
    pub rows_filtered: usize,
    pub rows_out: usize,
    pub columns: Vec<String>,
}

/// A file that could not be processed
#[derive(Debug, Clone, Serialize)]
pub struct FileFailure {
    pub file_name: String,
    pub stage: Option<Stage>,
    pub message: String,
}

/// Outcome of a batch run
#[derive(Debug, Clone, Default, Serialize)]
pub struct BatchReport {
    pub processed: Vec<FileReport>,
    pub failed: Vec<FileFailure>,
}

impl BatchReport {
    pub fn is_ok(&self) -> bool {
        self.failed.is_empty()
    }

    pub fn total(&self) -> usize {
        self.processed.len() + self.failed.len()
    }

    pub fn summary(&self) -> String {
        format!(
            "Processed: {} files, {} succeeded, {} failed",
            self.total(),
            self.processed.len(),
            self.failed.len()
        )
    }
}

/// One or several files to process.
///
/// Mirrors the two call shapes of the batch: a single file name or an ordered list.
#[derive(Debug, Clone, PartialEq)]
pub enum FileSelection {
    Single(String),
    List(Vec<String>),
}

impl FileSelection {
    fn into_vec(self) -> Vec<String> {
        match self {
            FileSelection::Single(name) => vec![name],
            FileSelection::List(names) => names,
        }
    }
}

impl From<&str> for FileSelection {
    fn from(name: &str) -> Self {
        FileSelection::Single(name.to_string())
    }
}

impl From<String> for FileSelection {
    fn from(name: String) -> Self {
        FileSelection::Single(name)
    }
}

impl From<Vec<String>> for FileSelection {
    fn from(names: Vec<String>) -> Self {
        FileSelection::List(names)
    }
}

impl<const N: usize> From<[&str; N]> for FileSelection {
    fn from(names: [&str; N]) -> Self {
        FileSelection::List(names.iter().map(|n| n.to_string()).collect())
    }
}

/// Reshapes SFS exports according to a fixed [`ColumnSpec`].
///
/// The spec is validated once in [`Processor::new`] and never mutated.
#[derive(Debug, Clone)]
pub struct Processor {
    spec: ColumnSpec,
    config: PipelineConfig,
}

impl Processor {
    /// Validate the column spec up front; no file is touched on failure.
    pub fn new(spec: ColumnSpec, config: PipelineConfig) -> PipelineResult<Self> {
        spec.validate()?;
        Ok(Self { spec, config })
    }

    pub fn spec(&self) -> &ColumnSpec {
        &self.spec
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Apply filter, drop, rename, insert and reorder to a loaded table.
    ///
    /// Returns the number of rows removed by the filter.
    pub fn reshape(&self, table: &mut Table) -> Result<usize, StageFailure> {
        let at = |stage: Stage| move |source: SchemaError| StageFailure { stage, source };

        let filtered = filter_total_rows(table, &self.spec.indicator_column);
        drop_columns(table, &self.spec.drop_columns).map_err(at(Stage::DropColumns))?;
        rename_columns(table, &self.spec.renames).map_err(at(Stage::RenameColumns))?;
        insert_columns(table, &self.spec.new_columns).map_err(at(Stage::InsertColumns))?;
        reorder_columns(table, &self.spec.column_order).map_err(at(Stage::ReorderColumns))?;
        Ok(filtered)
    }

    /// Run the full pipeline on `<input_dir>/<file_name>`.
    pub fn process(&self, file_name: &str) -> PipelineResult<FileReport> {
        let input_path = self.config.input_dir.join(file_name);

        let parsed = read_table(&input_path)
            .map_err(|e| PipelineError::file_failed(file_name, Stage::Load, e))?;
        let mut table = parsed.table;
        let rows_in = table.row_count();
        log_info_indent(
            format!("Read {} rows, {} columns ({})", rows_in, table.columns().len(), parsed.encoding),
            1,
        );

        let rows_filtered = self
            .reshape(&mut table)
            .map_err(|f| PipelineError::file_failed(file_name, f.stage, f.source))?;
        if rows_filtered > 0 {
            log_info_indent(format!("Removed {} total rows", rows_filtered), 1);
        }

        let output_path = export_table(&table, &self.config.output_dir, file_name)
            .map_err(|e| PipelineError::file_failed(file_name, Stage::Export, e))?;

        Ok(FileReport {
            file_name: file_name.to_string(),
            output_path,
            encoding: parsed.encoding,
            rows_in,
            rows_filtered,
            rows_out: table.row_count(),
            columns: table.columns().to_vec(),
        })
    }

    /// Process files one after another, in the given order.
    ///
    /// A failing file is logged and recorded; the batch moves on to the next one.
    pub fn start(&self, files: impl Into<FileSelection>) -> BatchReport {
        let files = files.into().into_vec();
        let total = files.len();
        let mut report = BatchReport::default();

        for (i, file_name) in files.iter().enumerate() {
            log_progress(i + 1, total, file_name);

            match self.process(file_name) {
                Ok(file_report) => {
                    log_success(format!("{} → {}", file_name, file_report.output_path.display()));
                    report.processed.push(file_report);
                }
                Err(e) => {
                    log_error(e.to_string());
                    report.failed.push(FileFailure {
                        file_name: file_name.clone(),
                        stage: e.stage(),
                        message: e.to_string(),
                    });
                }
            }
        }

        if report.is_ok() {
            log_success(report.summary());
        } else {
            log_warning(report.summary());
        }
        report
    }

    /// Discover every `.csv` file in the input directory and process them.
    pub fn run_dir(&self) -> PipelineResult<BatchReport> {
        let files = list_csv_files(&self.config.input_dir)?;
        if files.is_empty() {
            log_warning(format!("No CSV files found in {}", self.config.input_dir.display()));
        } else {
            log_info(format!("Found {} CSV files in {}", files.len(), self.config.input_dir.display()));
        }
        Ok(self.start(files))
    }
}
