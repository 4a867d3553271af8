//! FILENAME: engine/src/schema.rs
//! PURPOSE: The recognized column set for the superstore dataset.
//! CONTEXT: Raw CSV headers come in many spellings ("Sub-Category",
//! "sub_category", " SubCategory "). Everything here works on a normalized
//! key so the loader can match columns regardless of spelling, and the
//! exporter can write one canonical header row back out.

use serde::{Deserialize, Serialize};

// ============================================================================
// COLUMNS
// ============================================================================

/// A column of the recognized schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Column {
    RowId,
    OrderId,
    OrderDate,
    ShipDate,
    CustomerName,
    Segment,
    Country,
    City,
    State,
    Region,
    ProductName,
    Category,
    SubCategory,
    Sales,
    Profit,
    Quantity,
}

/// Canonical column order for export. Re-loading an export resolves every
/// column back to the same `Column`, so this order is also the round-trip
/// contract.
pub const EXPORT_ORDER: [Column; 16] = [
    Column::RowId,
    Column::OrderId,
    Column::OrderDate,
    Column::ShipDate,
    Column::CustomerName,
    Column::Segment,
    Column::Country,
    Column::City,
    Column::State,
    Column::Region,
    Column::ProductName,
    Column::Category,
    Column::SubCategory,
    Column::Sales,
    Column::Profit,
    Column::Quantity,
];

impl Column {
    /// Display header written on export.
    pub fn header(&self) -> &'static str {
        match self {
            Column::RowId => "Row ID",
            Column::OrderId => "Order ID",
            Column::OrderDate => "Order Date",
            Column::ShipDate => "Ship Date",
            Column::CustomerName => "Customer Name",
            Column::Segment => "Segment",
            Column::Country => "Country",
            Column::City => "City",
            Column::State => "State",
            Column::Region => "Region",
            Column::ProductName => "Product Name",
            Column::Category => "Category",
            Column::SubCategory => "Sub-Category",
            Column::Sales => "Sales",
            Column::Profit => "Profit",
            Column::Quantity => "Quantity",
        }
    }

    /// Normalized lookup key (what `normalize_header` produces for any
    /// accepted spelling of this column).
    pub fn key(&self) -> &'static str {
        match self {
            Column::RowId => "rowid",
            Column::OrderId => "orderid",
            Column::OrderDate => "orderdate",
            Column::ShipDate => "shipdate",
            Column::CustomerName => "customername",
            Column::Segment => "segment",
            Column::Country => "country",
            Column::City => "city",
            Column::State => "state",
            Column::Region => "region",
            Column::ProductName => "productname",
            Column::Category => "category",
            Column::SubCategory => "subcategory",
            Column::Sales => "sales",
            Column::Profit => "profit",
            Column::Quantity => "quantity",
        }
    }

    /// Resolves a normalized key back to a schema column.
    pub fn from_key(key: &str) -> Option<Column> {
        EXPORT_ORDER.iter().copied().find(|c| c.key() == key)
    }

    /// Whether the loader must find this column in the header.
    /// Identifiers and fine-grained geography are optional; a source without
    /// them still loads.
    pub fn is_required(&self) -> bool {
        !matches!(
            self,
            Column::RowId | Column::OrderId | Column::Country | Column::City | Column::State
        )
    }
}

// ============================================================================
// HEADER NORMALIZATION
// ============================================================================

/// Normalizes a raw header name: trim, lowercase, strip separators
/// (spaces, underscores, hyphens, periods and anything else non-alphanumeric).
///
/// "Sub-Category", "sub_category" and " SubCategory " all map to
/// "subcategory". Headers made entirely of separators (or of characters
/// outside ASCII, like the stray mojibake column some exports carry)
/// normalize to the empty string and are never matched.
pub fn normalize_header(raw: &str) -> String {
    raw.trim()
        .chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_header_spellings() {
        assert_eq!(normalize_header("Sub-Category"), "subcategory");
        assert_eq!(normalize_header("sub_category"), "subcategory");
        assert_eq!(normalize_header("  SubCategory  "), "subcategory");
        assert_eq!(normalize_header("Customer Name"), "customername");
        assert_eq!(normalize_header("Customer.Name"), "customername");
        assert_eq!(normalize_header("SALES"), "sales");
    }

    #[test]
    fn test_normalize_header_junk_columns() {
        assert_eq!(normalize_header("   "), "");
        assert_eq!(normalize_header("---"), "");
        assert_eq!(normalize_header("è®°å½"), "");
    }

    #[test]
    fn test_key_round_trip() {
        for column in EXPORT_ORDER {
            assert_eq!(Column::from_key(column.key()), Some(column));
            assert_eq!(normalize_header(column.header()), column.key());
        }
    }

    #[test]
    fn test_required_columns() {
        assert!(Column::Sales.is_required());
        assert!(Column::OrderDate.is_required());
        assert!(!Column::OrderId.is_required());
        assert!(!Column::City.is_required());
    }
}
