//! FILENAME: engine/src/filter.rs
//! PURPOSE: The filter engine - selection state and the derived view.
//!
//! A `FilterSelection` is an immutable snapshot of user intent: one
//! `DimensionFilter` per filterable dimension, combined with logical AND.
//! Applying it is a pure function from a table to a `FilteredView`; the view
//! borrows the table's records and is recomputed on every selection change,
//! never cached.

use serde::{Deserialize, Serialize};

use crate::record::Record;

// ============================================================================
// DIMENSION FILTER
// ============================================================================

/// Constraint on a single dimension.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub enum DimensionFilter {
    /// No constraint; every value passes.
    #[default]
    All,
    /// Include only rows whose value is in this set.
    AnyOf(Vec<String>),
}

impl DimensionFilter {
    pub fn any_of<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        DimensionFilter::AnyOf(values.into_iter().map(Into::into).collect())
    }

    pub fn allows(&self, value: &str) -> bool {
        match self {
            DimensionFilter::All => true,
            DimensionFilter::AnyOf(values) => values.iter().any(|v| v == value),
        }
    }
}

// ============================================================================
// FILTER SELECTION
// ============================================================================

/// The complete filter state for one recomputation: region, category and
/// sub-category constraints, AND-ed together.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct FilterSelection {
    pub region: DimensionFilter,
    pub category: DimensionFilter,
    pub sub_category: DimensionFilter,
}

impl FilterSelection {
    /// A selection with every dimension set to "all".
    pub fn all() -> Self {
        FilterSelection::default()
    }

    /// Whether a record passes every active constraint.
    pub fn matches(&self, record: &Record) -> bool {
        self.region.allows(&record.region)
            && self.category.allows(&record.category)
            && self.sub_category.allows(&record.sub_category)
    }
}

// ============================================================================
// FILTERED VIEW
// ============================================================================

/// The derived view: the subset of records matching a selection.
///
/// Borrows from the table it was computed over; it has no identity of its
/// own and is rebuilt from scratch on every filter change.
#[derive(Debug, Clone, PartialEq)]
pub struct FilteredView<'a> {
    rows: Vec<&'a Record>,
}

impl<'a> FilteredView<'a> {
    /// Applies a selection over any sequence of records.
    pub fn over(records: impl Iterator<Item = &'a Record>, selection: &FilterSelection) -> Self {
        FilteredView {
            rows: records.filter(|r| selection.matches(r)).collect(),
        }
    }

    /// Re-applies a selection to an already filtered view.
    pub fn refine(&self, selection: &FilterSelection) -> FilteredView<'a> {
        FilteredView::over(self.rows.iter().copied(), selection)
    }

    pub fn rows(&self) -> &[&'a Record] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::CleanedTable;
    use chrono::NaiveDate;

    fn create_test_record(region: &str, category: &str, sales: f64, profit: f64) -> Record {
        Record {
            row_id: None,
            order_id: None,
            order_date: NaiveDate::from_ymd_opt(2017, 1, 5).unwrap(),
            ship_date: NaiveDate::from_ymd_opt(2017, 1, 9).unwrap(),
            customer_name: "Test Customer".to_string(),
            segment: "Consumer".to_string(),
            country: None,
            city: None,
            state: None,
            region: region.to_string(),
            product_name: "Test Product".to_string(),
            category: category.to_string(),
            sub_category: "Chairs".to_string(),
            sales,
            profit,
            quantity: 1,
        }
    }

    fn create_test_table() -> CleanedTable {
        CleanedTable::new(vec![
            create_test_record("West", "Furniture", 100.0, 10.0),
            create_test_record("East", "Furniture", 200.0, -5.0),
            create_test_record("West", "Technology", 50.0, 20.0),
        ])
    }

    #[test]
    fn test_all_selection_keeps_everything() {
        let table = create_test_table();
        let view = table.filter(&FilterSelection::all());
        assert_eq!(view.len(), table.len());
    }

    #[test]
    fn test_region_filter() {
        let table = create_test_table();
        let mut selection = FilterSelection::all();
        selection.region = DimensionFilter::any_of(["West"]);

        let view = table.filter(&selection);
        assert_eq!(view.len(), 2);
        assert!(view.rows().iter().all(|r| r.region == "West"));
    }

    #[test]
    fn test_conjunction_across_dimensions() {
        let table = create_test_table();
        let mut selection = FilterSelection::all();
        selection.region = DimensionFilter::any_of(["West"]);
        selection.category = DimensionFilter::any_of(["Technology"]);

        let view = table.filter(&selection);
        assert_eq!(view.len(), 1);
        assert_eq!(view.rows()[0].sales, 50.0);
    }

    #[test]
    fn test_view_is_subset_of_table() {
        let table = create_test_table();
        let mut selection = FilterSelection::all();
        selection.category = DimensionFilter::any_of(["Furniture"]);

        let view = table.filter(&selection);
        for row in view.rows() {
            assert!(table.rows().iter().any(|r| std::ptr::eq(r, *row)));
        }
    }

    #[test]
    fn test_filter_is_idempotent() {
        let table = create_test_table();
        let mut selection = FilterSelection::all();
        selection.region = DimensionFilter::any_of(["West"]);

        let once = table.filter(&selection);
        let twice = once.refine(&selection);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_zero_match_selection_yields_empty_view() {
        let table = create_test_table();
        let mut selection = FilterSelection::all();
        selection.region = DimensionFilter::any_of(["Central"]);

        let view = table.filter(&selection);
        assert!(view.is_empty());
    }

    #[test]
    fn test_empty_value_set_matches_nothing() {
        let table = create_test_table();
        let mut selection = FilterSelection::all();
        selection.region = DimensionFilter::AnyOf(Vec::new());

        assert!(table.filter(&selection).is_empty());
    }
}
