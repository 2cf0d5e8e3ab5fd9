use std::path::PathBuf;

use thiserror::Error;

/// Failures while reading an input table.
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("File not found at {}", .0.display())]
    FileNotFound(PathBuf),

    #[error("Unsupported file extension: .{0}")]
    UnsupportedFormat(String),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Parquet error: {0}")]
    Parquet(#[from] parquet::errors::ParquetError),

    #[error("Arrow error: {0}")]
    Arrow(#[from] arrow::error::ArrowError),

    #[error("Malformed input: {0}")]
    Shape(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Table(#[from] TableError),
}

/// Violations of the table shape invariants.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum TableError {
    #[error("column '{label}' has {actual} rows, expected {expected}")]
    ColumnLength {
        label: String,
        expected: usize,
        actual: usize,
    },

    #[error("row {row} has {actual} fields, header has {expected}")]
    RowWidth {
        row: usize,
        expected: usize,
        actual: usize,
    },

    #[error("got {actual} labels for {expected} columns")]
    LabelCount { expected: usize, actual: usize },

    #[error("row mask has {actual} entries for {expected} rows")]
    MaskLength { expected: usize, actual: usize },
}
