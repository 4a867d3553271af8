//! FILENAME: summary-engine/src/lib.rs
//! Aggregation subsystem for the dashboard.
//!
//! This crate turns a `FilteredView` into the derived metrics the dashboard
//! displays. It depends on `engine` only for shared types (Record,
//! FilteredView).
//!
//! Layers:
//! - `definition`: Serializable result types (what a summary IS)
//! - `engine`: Calculation functions (HOW we aggregate)

pub mod definition;
pub mod engine;

pub use definition::*;
pub use self::engine::{
    category_breakdown, kpis, monthly_trend, sales_by_category, sales_by_region,
    sales_by_segment, summarize, top_customers, top_sub_categories,
};
