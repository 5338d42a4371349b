//! # SFS Histo - site-activity CSV reshaping
//!
//! Takes SFS statistics exports (site activity keyed by zone, sub zone and
//! affiliate) and rewrites them into one fixed column layout.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────┐     ┌─────────────┐     ┌──────────────────────┐     ┌───────────────┐
//! │ inputs/*.csv │────▶│   Parser    │────▶│      Transform       │────▶│ outputs/*.csv │
//! │  (ISO/UTF8)  │     │  (auto-enc) │     │ filter, drop, rename │     │ (fixed layout)│
//! └──────────────┘     └─────────────┘     │ insert, reorder      │     └───────────────┘
//!                                          └──────────────────────┘
//! ```
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use sfs_histo::{ColumnSpec, PipelineConfig, Processor};
//!
//! let processor = Processor::new(ColumnSpec::default_recipe(), PipelineConfig::default())?;
//! let report = processor.run_dir()?;
//! println!("{}", report.summary());
//! ```
//!
//! ## Modules
//!
//! - [`error`] - Error types per concern
//! - [`logs`] - Per-file progress lines
//! - [`models`] - The in-memory [`Table`]
//! - [`config`] - Column spec and directories
//! - [`parser`] - CSV loading and input discovery
//! - [`transform`] - Structural edits, export, pipeline

// Core modules
pub mod error;
pub mod logs;
pub mod models;

// Configuration
pub mod config;

// Parsing
pub mod parser;

// Transformation
pub mod transform;

// =============================================================================
// Re-exports - Error types
// =============================================================================

pub use error::{
    ConfigError,
    CsvError,
    SchemaError,
    ExportError,
    PipelineError,
    Stage,
    StageError,
    StageFailure,
};

// =============================================================================
// Re-exports - Models & Config
// =============================================================================

pub use models::{Cell, Table};

pub use config::{
    ColumnSpec,
    PipelineConfig,
    DEFAULT_INDICATOR_COLUMN,
    DEFAULT_INPUT_DIR,
    DEFAULT_OUTPUT_DIR,
};

// =============================================================================
// Re-exports - CSV Parsing
// =============================================================================

pub use parser::{
    read_table,
    parse_table,
    parse_bytes_auto,
    list_csv_files,
    detect_encoding,
    decode_content,
    ParseResult,
};

// =============================================================================
// Re-exports - Pipeline
// =============================================================================

pub use transform::{
    export_table,
    table_to_csv,
    Processor,
    FileSelection,
    FileReport,
    FileFailure,
    BatchReport,
};
