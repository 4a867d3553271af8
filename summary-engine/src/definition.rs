//! FILENAME: summary-engine/src/definition.rs
//! Summary result types - the serializable output of aggregation.
//!
//! These structures are designed to be:
//! - Serializable (handed to the presentation layer as JSON)
//! - Plain values with no identity; recomputed on every filter change
//! - Free of any reference back into the source table

use serde::{Deserialize, Serialize};

/// How many customers the sales ranking keeps.
pub const TOP_CUSTOMER_COUNT: usize = 5;

/// How many sub-categories the profit ranking keeps.
pub const TOP_SUB_CATEGORY_COUNT: usize = 10;

// ============================================================================
// KPIS
// ============================================================================

/// The headline numbers: totals over the whole filtered view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Kpis {
    pub total_sales: f64,
    pub total_profit: f64,
    /// Distinct order identifiers when the source has an order-id column,
    /// otherwise the row count.
    pub total_orders: usize,
}

// ============================================================================
// GROUPED RESULTS
// ============================================================================

/// One group in a grouped sum or a top-N ranking: a dimension value and the
/// summed measure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupTotal {
    pub key: String,
    pub total: f64,
}

impl GroupTotal {
    pub fn new(key: impl Into<String>, total: f64) -> Self {
        GroupTotal {
            key: key.into(),
            total,
        }
    }
}

/// One point of the monthly trend: sales and profit summed over a calendar
/// month of the order date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyPoint {
    pub year: i32,
    pub month: u32,
    pub sales: f64,
    pub profit: f64,
}

impl MonthlyPoint {
    /// Label in `YYYY-MM` form, matching the exported month axis.
    pub fn label(&self) -> String {
        format!("{:04}-{:02}", self.year, self.month)
    }
}

/// Both measures summed for one category (the profit-vs-sales chart input).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryBreakdown {
    pub category: String,
    pub sales: f64,
    pub profit: f64,
}

// ============================================================================
// DASHBOARD SUMMARY
// ============================================================================

/// Every derived metric the dashboard shows, bundled for one recomputation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct DashboardSummary {
    pub kpis: Kpis,

    /// Top customers by summed sales, descending.
    pub top_customers: Vec<GroupTotal>,

    /// Summed sales per segment, descending by total.
    pub sales_by_segment: Vec<GroupTotal>,

    /// Summed sales per region, descending by total.
    pub sales_by_region: Vec<GroupTotal>,

    /// Summed sales per category, descending by total.
    pub sales_by_category: Vec<GroupTotal>,

    /// Sales and profit per calendar month, chronological ascending.
    pub monthly_trend: Vec<MonthlyPoint>,

    /// Sales and profit per category, alphabetical by category.
    pub category_breakdown: Vec<CategoryBreakdown>,

    /// Top sub-categories by summed profit, descending.
    pub top_sub_categories: Vec<GroupTotal>,
}
