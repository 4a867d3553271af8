//! FILENAME: engine/src/record.rs
//! PURPOSE: Defines the fundamental data structures for the cleaned dataset.
//! CONTEXT: This file contains the `Record` struct (one validated
//! transaction row) and `CleanedTable` (the immutable collection built once
//! per load). Every field a `Record` carries has already passed the loader's
//! validation, so downstream code never re-checks types.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::filter::{FilterSelection, FilteredView};

// ============================================================================
// RECORD
// ============================================================================

/// One validated transaction row.
///
/// Required fields are plain values; optional columns (identifiers,
/// fine-grained geography) are `Option` and stay `None` for every row when
/// the source lacks the column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    pub row_id: Option<u32>,
    pub order_id: Option<String>,
    pub order_date: NaiveDate,
    pub ship_date: NaiveDate,
    pub customer_name: String,
    pub segment: String,
    pub country: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub region: String,
    pub product_name: String,
    pub category: String,
    pub sub_category: String,
    pub sales: f64,
    pub profit: f64,
    pub quantity: u32,
}

// ============================================================================
// CLEANED TABLE
// ============================================================================

/// The immutable, ordered collection of cleaned records.
///
/// Built once per load and never mutated afterwards; filtering and
/// aggregation borrow from it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CleanedTable {
    records: Vec<Record>,
}

impl CleanedTable {
    pub fn new(records: Vec<Record>) -> Self {
        CleanedTable { records }
    }

    pub fn rows(&self) -> &[Record] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Applies a filter selection, producing the derived view.
    pub fn filter(&self, selection: &FilterSelection) -> FilteredView<'_> {
        FilteredView::over(self.records.iter(), selection)
    }

    /// Distinct regions, sorted ascending (filter widget catalog).
    pub fn regions(&self) -> Vec<String> {
        distinct_sorted(self.records.iter().map(|r| r.region.as_str()))
    }

    /// Distinct categories, sorted ascending.
    pub fn categories(&self) -> Vec<String> {
        distinct_sorted(self.records.iter().map(|r| r.category.as_str()))
    }

    /// Distinct sub-categories, sorted ascending.
    pub fn sub_categories(&self) -> Vec<String> {
        distinct_sorted(self.records.iter().map(|r| r.sub_category.as_str()))
    }
}

impl Default for CleanedTable {
    fn default() -> Self {
        CleanedTable::new(Vec::new())
    }
}

fn distinct_sorted<'a>(values: impl Iterator<Item = &'a str>) -> Vec<String> {
    let mut out: Vec<String> = values.map(|v| v.to_string()).collect();
    out.sort();
    out.dedup();
    out
}
