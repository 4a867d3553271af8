//! FILENAME: summary-engine/src/engine.rs
//! Summary Engine - computes the dashboard metrics from a filtered view.
//!
//! Every function here is a pure fold over the view's rows:
//! 1. Bucket rows by the grouping key (hash map)
//! 2. Sum the measure(s) into each bucket
//! 3. Sort the buckets into the order the metric specifies
//!
//! An empty view is a valid input everywhere and yields zero totals and
//! empty group lists, never an error.

use std::cmp::Ordering;

use chrono::Datelike;
use rustc_hash::{FxHashMap, FxHashSet};

use crate::definition::{
    CategoryBreakdown, DashboardSummary, GroupTotal, Kpis, MonthlyPoint, TOP_CUSTOMER_COUNT,
    TOP_SUB_CATEGORY_COUNT,
};
use ::engine::{FilteredView, Record};

// ============================================================================
// KPIS
// ============================================================================

/// Headline totals over the whole view.
///
/// Total orders counts distinct order identifiers when the source carried
/// them; a source without an order-id column falls back to the row count.
pub fn kpis(view: &FilteredView) -> Kpis {
    let mut total_sales = 0.0;
    let mut total_profit = 0.0;
    let mut order_ids: FxHashSet<&str> = FxHashSet::default();

    for row in view.rows() {
        total_sales += row.sales;
        total_profit += row.profit;
        if let Some(id) = row.order_id.as_deref() {
            order_ids.insert(id);
        }
    }

    let total_orders = if order_ids.is_empty() {
        view.len()
    } else {
        order_ids.len()
    };

    Kpis {
        total_sales,
        total_profit,
        total_orders,
    }
}

// ============================================================================
// GROUPED SUMS
// ============================================================================

/// Sums a measure per grouping key, sorted descending by total with ties
/// broken alphabetically by key.
fn grouped_sum(
    view: &FilteredView,
    key: impl Fn(&Record) -> &str,
    measure: impl Fn(&Record) -> f64,
) -> Vec<GroupTotal> {
    let mut buckets: FxHashMap<String, f64> = FxHashMap::default();
    for row in view.rows() {
        *buckets.entry(key(row).to_string()).or_insert(0.0) += measure(row);
    }

    let mut groups: Vec<GroupTotal> = buckets
        .into_iter()
        .map(|(key, total)| GroupTotal { key, total })
        .collect();
    sort_descending(&mut groups);
    groups
}

fn sort_descending(groups: &mut [GroupTotal]) {
    groups.sort_by(|a, b| {
        b.total
            .partial_cmp(&a.total)
            .unwrap_or(Ordering::Equal)
            .then_with(|| a.key.cmp(&b.key))
    });
}

/// Summed sales per segment.
pub fn sales_by_segment(view: &FilteredView) -> Vec<GroupTotal> {
    grouped_sum(view, |r| &r.segment, |r| r.sales)
}

/// Summed sales per region.
pub fn sales_by_region(view: &FilteredView) -> Vec<GroupTotal> {
    grouped_sum(view, |r| &r.region, |r| r.sales)
}

/// Summed sales per category.
pub fn sales_by_category(view: &FilteredView) -> Vec<GroupTotal> {
    grouped_sum(view, |r| &r.category, |r| r.sales)
}

// ============================================================================
// RANKINGS
// ============================================================================

/// Top customers by summed sales, truncated to `TOP_CUSTOMER_COUNT`.
pub fn top_customers(view: &FilteredView) -> Vec<GroupTotal> {
    let mut groups = grouped_sum(view, |r| &r.customer_name, |r| r.sales);
    groups.truncate(TOP_CUSTOMER_COUNT);
    groups
}

/// Top sub-categories by summed profit, truncated to
/// `TOP_SUB_CATEGORY_COUNT`.
pub fn top_sub_categories(view: &FilteredView) -> Vec<GroupTotal> {
    let mut groups = grouped_sum(view, |r| &r.sub_category, |r| r.profit);
    groups.truncate(TOP_SUB_CATEGORY_COUNT);
    groups
}

// ============================================================================
// TIME SERIES AND TWO-MEASURE BREAKDOWNS
// ============================================================================

/// Sales and profit per calendar month of the order date, chronological
/// ascending.
pub fn monthly_trend(view: &FilteredView) -> Vec<MonthlyPoint> {
    let mut buckets: FxHashMap<(i32, u32), (f64, f64)> = FxHashMap::default();
    for row in view.rows() {
        let bucket = buckets
            .entry((row.order_date.year(), row.order_date.month()))
            .or_insert((0.0, 0.0));
        bucket.0 += row.sales;
        bucket.1 += row.profit;
    }

    let mut points: Vec<MonthlyPoint> = buckets
        .into_iter()
        .map(|((year, month), (sales, profit))| MonthlyPoint {
            year,
            month,
            sales,
            profit,
        })
        .collect();
    points.sort_by_key(|p| (p.year, p.month));
    points
}

/// Sales and profit per category, alphabetical by category name.
pub fn category_breakdown(view: &FilteredView) -> Vec<CategoryBreakdown> {
    let mut buckets: FxHashMap<String, (f64, f64)> = FxHashMap::default();
    for row in view.rows() {
        let bucket = buckets.entry(row.category.clone()).or_insert((0.0, 0.0));
        bucket.0 += row.sales;
        bucket.1 += row.profit;
    }

    let mut breakdown: Vec<CategoryBreakdown> = buckets
        .into_iter()
        .map(|(category, (sales, profit))| CategoryBreakdown {
            category,
            sales,
            profit,
        })
        .collect();
    breakdown.sort_by(|a, b| a.category.cmp(&b.category));
    breakdown
}

// ============================================================================
// BUNDLED SUMMARY
// ============================================================================

/// Computes every dashboard metric in one pass over the recomputation cycle.
pub fn summarize(view: &FilteredView) -> DashboardSummary {
    DashboardSummary {
        kpis: kpis(view),
        top_customers: top_customers(view),
        sales_by_segment: sales_by_segment(view),
        sales_by_region: sales_by_region(view),
        sales_by_category: sales_by_category(view),
        monthly_trend: monthly_trend(view),
        category_breakdown: category_breakdown(view),
        top_sub_categories: top_sub_categories(view),
    }
}
