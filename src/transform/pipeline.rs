//! High-level pipeline API.
//!
//! Combines parsing, coercion, aggregation, the price-index join, and table
//! construction into the two per-request entry points the presentation layer
//! calls:
//!
//! - [`load_dashboard`] - aggregation pipeline (chart series + comparison
//!   table)
//! - [`load_remapped_income`] - header-remapping pipeline
//!
//! Both read their source files whole before any computation and never
//! return errors: an I/O or malformed-row failure is logged and converted
//! into an empty result, which the presentation layer must tolerate. The
//! `*_from_bytes` functions are the fallible cores, useful when the caller
//! already holds the file contents.
//!
//! # Example
//!
//! ```rust,ignore
//! use lohnspiegel::{load_dashboard, DatasetPaths};
//!
//! #[tokio::main]
//! async fn main() {
//!     let data = load_dashboard(&DatasetPaths::default()).await;
//!     println!("{} chart rows, {} table rows", data.chart_data.len(), data.table_data.len());
//! }
//! ```

use std::path::{Path, PathBuf};

use serde::Serialize;
use serde_json::Value;
use tracing::{debug, error};

use super::aggregate::{
    aggregate_by_category, aggregate_by_year, combine_with_index, price_index_map,
};
use super::remap::{remap_headers, translation_map};
use super::table::comparison_table;
use crate::error::PipelineResult;
use crate::models::{CombinedYearlyRow, ComparisonTableRow, IncomeRecord, REFERENCE_YEARS};
use crate::parser::parse_bytes_auto;

// =============================================================================
// Configuration
// =============================================================================

/// Locations of the three source datasets.
#[derive(Debug, Clone)]
pub struct DatasetPaths {
    /// Income dataset.
    pub income: PathBuf,
    /// Consumer-price-index dataset.
    pub price_index: PathBuf,
    /// Header-translation table.
    pub headers: PathBuf,
}

impl Default for DatasetPaths {
    fn default() -> Self {
        Self {
            income: PathBuf::from("data/income.csv"),
            price_index: PathBuf::from("data/vpi.csv"),
            headers: PathBuf::from("data/headers.csv"),
        }
    }
}

impl DatasetPaths {
    /// All three datasets under one directory, with the default file names.
    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        let dir = dir.as_ref();
        Self {
            income: dir.join("income.csv"),
            price_index: dir.join("vpi.csv"),
            headers: dir.join("headers.csv"),
        }
    }
}

// =============================================================================
// Output
// =============================================================================

/// Everything the chart-and-table page needs, rebuilt per request.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardData {
    /// Chart series, ascending by year.
    pub chart_data: Vec<CombinedYearlyRow>,
    /// 2010-vs-2022 comparison table, ascending by category code.
    pub table_data: Vec<ComparisonTableRow>,
}

// =============================================================================
// Aggregation Pipeline
// =============================================================================

/// Run the aggregation pipeline on raw file contents.
pub fn dashboard_from_bytes(income: &[u8], price_index: &[u8]) -> PipelineResult<DashboardData> {
    let income_parse = parse_bytes_auto(income)?;
    let vpi_parse = parse_bytes_auto(price_index)?;
    debug!(
        income_rows = income_parse.records.len(),
        vpi_rows = vpi_parse.records.len(),
        "parsed source datasets"
    );

    let records = IncomeRecord::from_rows(&income_parse.records)?;

    let yearly = aggregate_by_year(&records);
    let index = price_index_map(&vpi_parse.records);
    let chart_data = combine_with_index(yearly, &index);

    let (base_year, compare_year) = REFERENCE_YEARS;
    let table_data = comparison_table(
        &aggregate_by_category(&records, base_year),
        &aggregate_by_category(&records, compare_year),
    );

    debug!(
        chart_rows = chart_data.len(),
        table_rows = table_data.len(),
        "aggregation pipeline complete"
    );

    Ok(DashboardData {
        chart_data,
        table_data,
    })
}

/// Load and aggregate the income and price-index datasets.
///
/// Never fails: any read or parse error yields an empty [`DashboardData`]
/// after logging.
pub async fn load_dashboard(paths: &DatasetPaths) -> DashboardData {
    match try_load_dashboard(paths).await {
        Ok(data) => data,
        Err(err) => {
            error!(error = %err, "failed to load dashboard data, returning empty result");
            DashboardData::default()
        }
    }
}

async fn try_load_dashboard(paths: &DatasetPaths) -> PipelineResult<DashboardData> {
    let income = tokio::fs::read(&paths.income).await?;
    let price_index = tokio::fs::read(&paths.price_index).await?;
    dashboard_from_bytes(&income, &price_index)
}

// =============================================================================
// Header-Remapping Pipeline
// =============================================================================

/// Run the header-remapping pipeline on raw file contents.
pub fn remapped_income_from_bytes(income: &[u8], headers: &[u8]) -> PipelineResult<Vec<Value>> {
    let income_parse = parse_bytes_auto(income)?;
    let header_parse = parse_bytes_auto(headers)?;

    let mapping = translation_map(&header_parse.records);
    debug!(
        income_rows = income_parse.records.len(),
        translations = mapping.len(),
        "remapping income headers"
    );

    Ok(remap_headers(income_parse.records, &mapping))
}

/// Load the income dataset with translated column names.
///
/// Independent of the aggregation pipeline; failures likewise collapse to
/// an empty row list after logging.
pub async fn load_remapped_income(paths: &DatasetPaths) -> Vec<Value> {
    match try_load_remapped_income(paths).await {
        Ok(rows) => rows,
        Err(err) => {
            error!(error = %err, "failed to load remapped income data, returning empty result");
            Vec::new()
        }
    }
}

async fn try_load_remapped_income(paths: &DatasetPaths) -> PipelineResult<Vec<Value>> {
    let income = tokio::fs::read(&paths.income).await?;
    let headers = tokio::fs::read(&paths.headers).await?;
    remapped_income_from_bytes(&income, &headers)
}
