//! FILENAME: persistence/src/error.rs

use thiserror::Error;

/// Fatal load/export failures. Per-row problems are not errors; they are
/// counted in `LoadReport` and the row is excluded.
#[derive(Error, Debug)]
pub enum DataFormatError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Missing required column: {0}")]
    MissingColumn(&'static str),

    #[error("Duplicate column after normalization: {0}")]
    DuplicateColumn(String),
}
