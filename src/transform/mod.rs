//! Data transformation: aggregation, remapping, table building, pipeline.
//!
//! - `aggregate`: yearly and per-category income reduction, price-index join
//! - `remap`: header translation
//! - `table`: 2010-vs-2022 comparison table and value formatting
//! - `pipeline`: per-request orchestration with empty-result fallback

pub mod aggregate;
pub mod pipeline;
pub mod remap;
pub mod table;

// Re-exports for convenience
pub use aggregate::{aggregate_by_category, aggregate_by_year, combine_with_index, price_index_map};
pub use pipeline::{
    dashboard_from_bytes, load_dashboard, load_remapped_income, remapped_income_from_bytes,
    DashboardData, DatasetPaths,
};
pub use remap::{remap_headers, translation_map};
pub use table::{comparison_table, format_currency, format_percent_change, NO_DATA};
