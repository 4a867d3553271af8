//! FILENAME: engine/src/lib.rs
//! PURPOSE: Main library entry point for the dashboard data engine.
//! CONTEXT: Re-exports the core data model (records, schema) and the
//! filter engine for use by the persistence and summary crates.

pub mod filter;
pub mod record;
pub mod schema;

// Re-export commonly used types at the crate root
pub use filter::{DimensionFilter, FilterSelection, FilteredView};
pub use record::{CleanedTable, Record};
pub use schema::{normalize_header, Column, EXPORT_ORDER};
