//! FILENAME: persistence/src/lib.rs
//! Dashboard Persistence Module
//!
//! Handles loading the sales dataset from CSV and exporting a filtered view
//! back to CSV.

mod csv_reader;
mod csv_writer;
mod error;

pub use csv_reader::{load_csv, read_csv};
pub use csv_writer::{export_csv, write_csv};
pub use error::DataFormatError;

use engine::CleanedTable;
use serde::Serialize;

// ============================================================================
// LOAD REPORT
// ============================================================================

/// Counts of what happened during a load: how many rows came in, how many
/// survived cleaning, and how many were excluded per reason.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LoadReport {
    /// Data rows read from the source (header excluded).
    pub rows_read: usize,

    /// Rows that passed every validation step.
    pub rows_loaded: usize,

    /// Rows excluded because a date column failed to parse.
    pub rejected_dates: usize,

    /// Rows excluded because a measure failed numeric coercion.
    pub rejected_numbers: usize,

    /// Rows excluded because a required field was missing/empty.
    pub rejected_missing: usize,
}

impl LoadReport {
    /// Total excluded rows across all reasons.
    pub fn rejected_total(&self) -> usize {
        self.rejected_dates + self.rejected_numbers + self.rejected_missing
    }
}

// ============================================================================
// LOAD OUTCOME
// ============================================================================

/// A successful load: the cleaned table plus its diagnostics.
#[derive(Debug, Clone)]
pub struct LoadOutcome {
    pub table: CleanedTable,
    pub report: LoadReport,
}
