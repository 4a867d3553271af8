//! FILENAME: persistence/src/csv_reader.rs
//! The Loader/Normalizer: CSV in, CleanedTable + LoadReport out.
//!
//! Cleaning happens in a fixed order so loads are reproducible:
//! 1. Normalize header names and resolve them against the recognized schema
//!    (missing required column or duplicate normalized name is fatal)
//! 2. Per row: parse the date columns, coerce the measures, require the
//!    required text fields
//! 3. A row failing any step is excluded and counted by reason
//! 4. Columns outside the recognized schema are discarded

use std::collections::HashMap;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use chrono::NaiveDate;
use engine::{normalize_header, CleanedTable, Column, Record, EXPORT_ORDER};
use log::{info, warn};

use crate::{DataFormatError, LoadOutcome, LoadReport};

/// Date spellings the loader accepts. Exports always use the first form, so
/// a re-loaded export parses via the same branch every time.
const DATE_FORMATS: [&str; 3] = ["%Y-%m-%d", "%m/%d/%Y", "%m/%d/%y"];

// ============================================================================
// ENTRY POINTS
// ============================================================================

/// Loads and cleans a CSV file from disk.
pub fn load_csv(path: &Path) -> Result<LoadOutcome, DataFormatError> {
    let file = File::open(path)?;
    read_csv(BufReader::new(file))
}

/// Loads and cleans CSV data from any reader (UTF-8, comma-separated).
pub fn read_csv<R: Read>(source: R) -> Result<LoadOutcome, DataFormatError> {
    let mut reader = csv::ReaderBuilder::new().flexible(true).from_reader(source);

    let headers = reader.headers()?.clone();
    if headers.iter().all(|h| h.trim().is_empty()) {
        // Empty source: a valid, empty table rather than an error.
        return Ok(LoadOutcome {
            table: CleanedTable::default(),
            report: LoadReport::default(),
        });
    }

    let map = ColumnMap::resolve(&headers)?;

    let mut records = Vec::new();
    let mut report = LoadReport::default();

    for row in reader.records() {
        let row = row?;
        report.rows_read += 1;
        match parse_row(&row, &map) {
            Ok(record) => records.push(record),
            Err(Reject::Date) => report.rejected_dates += 1,
            Err(Reject::Number) => report.rejected_numbers += 1,
            Err(Reject::Missing) => report.rejected_missing += 1,
        }
    }

    report.rows_loaded = records.len();
    info!(
        "loaded {} of {} rows from source",
        report.rows_loaded, report.rows_read
    );
    if report.rejected_total() > 0 {
        warn!(
            "excluded {} rows ({} bad dates, {} bad numbers, {} missing values)",
            report.rejected_total(),
            report.rejected_dates,
            report.rejected_numbers,
            report.rejected_missing
        );
    }

    Ok(LoadOutcome {
        table: CleanedTable::new(records),
        report,
    })
}

// ============================================================================
// HEADER RESOLUTION
// ============================================================================

/// Maps each recognized schema column to its position in the source header.
struct ColumnMap {
    indices: HashMap<Column, usize>,
}

impl ColumnMap {
    fn resolve(headers: &csv::StringRecord) -> Result<ColumnMap, DataFormatError> {
        let mut seen: HashMap<String, usize> = HashMap::new();
        let mut indices = HashMap::new();

        for (index, raw) in headers.iter().enumerate() {
            let key = normalize_header(raw);
            if key.is_empty() {
                // Separator-only or non-ASCII junk header; never matched.
                continue;
            }
            if seen.insert(key.clone(), index).is_some() {
                return Err(DataFormatError::DuplicateColumn(key));
            }
            if let Some(column) = Column::from_key(&key) {
                indices.insert(column, index);
            }
        }

        for column in EXPORT_ORDER {
            if column.is_required() && !indices.contains_key(&column) {
                return Err(DataFormatError::MissingColumn(column.header()));
            }
        }

        Ok(ColumnMap { indices })
    }

    fn get<'r>(&self, row: &'r csv::StringRecord, column: Column) -> Option<&'r str> {
        self.indices
            .get(&column)
            .and_then(|&index| row.get(index))
            .map(str::trim)
    }

    fn required<'r>(&self, row: &'r csv::StringRecord, column: Column) -> Result<&'r str, Reject> {
        match self.get(row, column) {
            Some(value) if !value.is_empty() => Ok(value),
            _ => Err(Reject::Missing),
        }
    }
}

// ============================================================================
// ROW PARSING
// ============================================================================

/// Why a row was excluded. Never surfaced individually; only counted.
enum Reject {
    Date,
    Number,
    Missing,
}

fn parse_row(row: &csv::StringRecord, map: &ColumnMap) -> Result<Record, Reject> {
    let order_date = parse_date(map.required(row, Column::OrderDate)?)?;
    let ship_date = parse_date(map.required(row, Column::ShipDate)?)?;
    let sales = parse_measure(map.required(row, Column::Sales)?)?;
    let profit = parse_measure(map.required(row, Column::Profit)?)?;
    let quantity = parse_quantity(map.required(row, Column::Quantity)?)?;

    Ok(Record {
        row_id: map
            .get(row, Column::RowId)
            .and_then(|v| v.parse::<u32>().ok()),
        order_id: optional_text(map.get(row, Column::OrderId)),
        order_date,
        ship_date,
        customer_name: map.required(row, Column::CustomerName)?.to_string(),
        segment: map.required(row, Column::Segment)?.to_string(),
        country: optional_text(map.get(row, Column::Country)),
        city: optional_text(map.get(row, Column::City)),
        state: optional_text(map.get(row, Column::State)),
        region: map.required(row, Column::Region)?.to_string(),
        product_name: map.required(row, Column::ProductName)?.to_string(),
        category: map.required(row, Column::Category)?.to_string(),
        sub_category: map.required(row, Column::SubCategory)?.to_string(),
        sales,
        profit,
        quantity,
    })
}

fn optional_text(value: Option<&str>) -> Option<String> {
    value.filter(|v| !v.is_empty()).map(|v| v.to_string())
}

fn parse_date(value: &str) -> Result<NaiveDate, Reject> {
    for format in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(value, format) {
            return Ok(date);
        }
    }
    Err(Reject::Date)
}

fn parse_measure(value: &str) -> Result<f64, Reject> {
    match value.parse::<f64>() {
        Ok(number) if number.is_finite() => Ok(number),
        _ => Err(Reject::Number),
    }
}

fn parse_quantity(value: &str) -> Result<u32, Reject> {
    if let Ok(quantity) = value.parse::<u32>() {
        return Ok(quantity);
    }
    // Sources exported through float-typed tools write quantities as "3.0".
    match value.parse::<f64>() {
        Ok(number) if number >= 0.0 && number.fract() == 0.0 && number <= u32::MAX as f64 => {
            Ok(number as u32)
        }
        _ => Err(Reject::Number),
    }
}
