//! # Lohnspiegel - income and price-index statistics loader
//!
//! Lohnspiegel loads two small statistical CSV exports (wage/income records
//! and a consumer-price-index series), aggregates them by year and by
//! economic category, and hands the result to a presentation layer for
//! charting and tabular display.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐     ┌──────────────┐     ┌─────────────┐
//! │  CSV Files  │────▶│   Parser    │────▶│  Transform   │────▶│  Dashboard  │
//! │ (income/vpi)│     │ (auto-enc)  │     │ (group/join) │     │ (chart+tab) │
//! └─────────────┘     └─────────────┘     └──────────────┘     └─────────────┘
//! ```
//!
//! Two independent pipelines run per request: the aggregation pipeline
//! (chart series plus the 2010-vs-2022 comparison table) and the
//! header-remapping pipeline (income rows with translated column names).
//! Both rebuild everything from the source files on every call; neither
//! keeps cross-request state, and neither ever fails outright - errors are
//! logged and collapse to empty results.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use lohnspiegel::{load_dashboard, DatasetPaths};
//!
//! #[tokio::main]
//! async fn main() {
//!     let data = load_dashboard(&DatasetPaths::default()).await;
//!     println!("{} years charted", data.chart_data.len());
//! }
//! ```
//!
//! ## Modules
//!
//! - [`error`] - Hierarchical error types
//! - [`models`] - Source-row and aggregate types, column names, sentinels
//! - [`parser`] - CSV parsing with auto-detection and field coercion
//! - [`categories`] - Static category-code label table
//! - [`transform`] - Aggregation, remapping, table building, pipeline

// Core modules
pub mod error;
pub mod models;

// Parsing
pub mod parser;

// Static lookup data
pub mod categories;

// Transformation
pub mod transform;

// =============================================================================
// Re-exports - Error types
// =============================================================================

pub use error::{CsvError, CsvResult, PipelineError, PipelineResult};

// =============================================================================
// Re-exports - Models
// =============================================================================

pub use models::{
    CategoryAggregate, CombinedYearlyRow, ComparisonTableRow, IncomeRecord, PriceIndexRecord,
    YearlyAggregate, ALL_CATEGORIES_CODE, MIN_YEAR, NEUTRAL_INDEX, REFERENCE_YEARS,
};

// =============================================================================
// Re-exports - CSV Parsing
// =============================================================================

pub use parser::{
    csv_to_rows, decode_content, detect_delimiter, detect_encoding, parse_bytes_auto,
    parse_decimal_comma, ParseResult,
};

// =============================================================================
// Re-exports - Categories
// =============================================================================

pub use categories::{label_for, split_label, CATEGORY_LABELS};

// =============================================================================
// Re-exports - Transform
// =============================================================================

pub use transform::{
    aggregate_by_category, aggregate_by_year, combine_with_index, comparison_table,
    dashboard_from_bytes, load_dashboard, load_remapped_income, price_index_map, remap_headers,
    remapped_income_from_bytes, translation_map, DashboardData, DatasetPaths,
};
