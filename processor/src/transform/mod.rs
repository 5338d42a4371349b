//! Transformation module.
//!
//! - Operations: the structural edits on a table
//! - Export: CSV serialization
//! - Pipeline: per-file stages and the batch driver

pub mod export;
pub mod operations;
pub mod pipeline;

pub use export::{export_table, table_to_csv, write_table};
pub use operations::*;
pub use pipeline::*;
