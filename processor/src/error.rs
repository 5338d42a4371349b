//! Error types for the SFS histo reshaping pipeline.
//!
//! One error type per concern, composed bottom-up:
//!
//! - [`ConfigError`] - column spec missing or inconsistent
//! - [`CsvError`] - input file missing or not parseable
//! - [`SchemaError`] - a referenced column is absent or a name collides
//! - [`ExportError`] - output directory or file cannot be written
//! - [`PipelineError`] - top-level, tags the failing file and [`Stage`]
//!
//! Error conversion is automatic via `From` implementations,
//! allowing `?` to work across error boundaries.

use serde::Serialize;
use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

// =============================================================================
// Configuration Errors
// =============================================================================

/// Errors raised while loading or checking the column spec.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// One of the four column artifacts was not supplied.
    #[error("Missing configuration artifact: {0}")]
    MissingArtifact(&'static str),

    /// A list contains the same column twice.
    #[error("Duplicate column '{column}' in {artifact}")]
    DuplicateEntry { artifact: &'static str, column: String },

    /// Failed to read the config file.
    #[error("Failed to read config file: {0}")]
    IoError(#[from] std::io::Error),

    /// Config file is not valid JSON for a column spec.
    #[error("Invalid config JSON: {0}")]
    JsonError(#[from] serde_json::Error),
}

// =============================================================================
// CSV Read Errors
// =============================================================================

/// Errors while reading an input file into a table.
#[derive(Debug, Error)]
pub enum CsvError {
    /// Failed to read file.
    #[error("Failed to read '{path}': {source}")]
    IoError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Content could not be decoded.
    #[error("Failed to decode content: {0}")]
    EncodingError(String),

    /// Invalid CSV format.
    #[error("Invalid CSV format: {0}")]
    ParseError(#[from] csv::Error),

    /// Empty file.
    #[error("CSV file is empty")]
    EmptyFile,

    /// A data row has more fields than the header.
    #[error("Line {line}: expected {expected} fields, found {found}")]
    RaggedRow { line: u64, expected: usize, found: usize },

    /// Header row has a repeated name.
    #[error("Duplicate header '{0}'")]
    DuplicateHeader(String),
}

// =============================================================================
// Schema Errors
// =============================================================================

/// Errors from structural column edits.
#[derive(Debug, Error, PartialEq)]
pub enum SchemaError {
    /// Referenced column is not in the table.
    #[error("Column not found: {0}")]
    MissingColumn(String),

    /// Edit would leave two columns with the same name.
    #[error("Column already exists: {0}")]
    DuplicateColumn(String),
}

// =============================================================================
// Export Errors
// =============================================================================

/// Errors while writing a table back out.
#[derive(Debug, Error)]
pub enum ExportError {
    /// Output directory could not be created.
    #[error("Cannot create output directory '{path}': {source}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Output file could not be written.
    #[error("Cannot write '{path}': {source}")]
    IoError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// CSV writer failure.
    #[error("CSV write error: {0}")]
    CsvError(#[from] csv::Error),
}

// =============================================================================
// Pipeline Errors (top-level)
// =============================================================================

/// Step of the per-file pipeline that can fail, in execution order.
///
/// Row filtering sits between `Load` and `DropColumns` but never fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    Load,
    DropColumns,
    RenameColumns,
    InsertColumns,
    ReorderColumns,
    Export,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::Load => "load",
            Stage::DropColumns => "drop columns",
            Stage::RenameColumns => "rename columns",
            Stage::InsertColumns => "insert columns",
            Stage::ReorderColumns => "reorder columns",
            Stage::Export => "export",
        };
        f.write_str(name)
    }
}

/// A structural edit that failed, tagged with its stage.
#[derive(Debug, Error, PartialEq)]
#[error("{stage} failed: {source}")]
pub struct StageFailure {
    pub stage: Stage,
    #[source]
    pub source: SchemaError,
}

/// Cause of a single file failure.
#[derive(Debug, Error)]
pub enum StageError {
    #[error(transparent)]
    Read(#[from] CsvError),

    #[error(transparent)]
    Schema(#[from] SchemaError),

    #[error(transparent)]
    Write(#[from] ExportError),
}

/// Top-level pipeline orchestration errors.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// Column spec rejected before any file was touched.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Input discovery failed.
    #[error("Input error: {0}")]
    Input(#[from] CsvError),

    /// A file failed at a given stage.
    #[error("{file}: {stage} failed: {source}")]
    FileFailed {
        file: String,
        stage: Stage,
        #[source]
        source: StageError,
    },
}

impl PipelineError {
    /// Tag a stage failure with its file name.
    pub fn file_failed(file: impl Into<String>, stage: Stage, source: impl Into<StageError>) -> Self {
        PipelineError::FileFailed {
            file: file.into(),
            stage,
            source: source.into(),
        }
    }

    /// Stage that failed, if the error is tied to one file.
    pub fn stage(&self) -> Option<Stage> {
        match self {
            PipelineError::FileFailed { stage, .. } => Some(*stage),
            _ => None,
        }
    }
}

// =============================================================================
// Result Type Aliases
// =============================================================================

/// Result type for configuration operations.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Result type for CSV read operations.
pub type CsvResult<T> = Result<T, CsvError>;

/// Result type for structural column edits.
pub type SchemaResult<T> = Result<T, SchemaError>;

/// Result type for export operations.
pub type ExportResult<T> = Result<T, ExportError>;

/// Result type for pipeline operations.
pub type PipelineResult<T> = Result<T, PipelineError>;
