use std::path::PathBuf;
use thiserror::Error;

/// All errors produced by the fleet dashboard crates.
#[derive(Error, Debug)]
pub enum FleetError {
    /// A raw row carried a value that could not be coerced into its field.
    ///
    /// `row` is the 1-based position of the row among the data rows of the
    /// table (the header is not counted).
    #[error("Row {row}: invalid {field} value {value:?}")]
    RecordParse {
        row: usize,
        field: &'static str,
        value: String,
    },

    /// A file could not be opened or read from disk.
    #[error("Failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A JSON document could not be parsed.
    #[error("Failed to parse JSON: {0}")]
    JsonParse(#[from] serde_json::Error),

    /// A CSV export could not be parsed.
    #[error("Failed to parse CSV: {0}")]
    CsvParse(#[from] csv::Error),

    /// The export file extension is neither `.json` nor `.csv`.
    #[error("Unsupported table format: {0}")]
    UnsupportedFormat(PathBuf),

    /// The export parsed but does not have the shape of a table of records.
    #[error("Invalid table: {0}")]
    InvalidTable(String),

    /// A configuration value is missing or invalid.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Pass-through for any raw I/O error that does not carry a path.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Catch-all for errors from third-party crates via `anyhow`.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Convenience alias used throughout the fleet crates.
pub type Result<T> = std::result::Result<T, FleetError>;
