//! Domain models for the statistics pipelines.
//!
//! This module contains the row types read from the source datasets and the
//! derived aggregate types handed to the presentation layer:
//!
//! - [`IncomeRecord`] - one income row per (year, category, duration) cell
//! - [`PriceIndexRecord`] - one consumer-price-index row per year
//! - [`YearlyAggregate`] - income summed per year
//! - [`CombinedYearlyRow`] - yearly aggregate joined with the price index
//! - [`CategoryAggregate`] - per-category income for one reference year
//! - [`ComparisonTableRow`] - formatted 2010-vs-2022 table row
//!
//! Every instance is rebuilt per request from the source files; nothing here
//! carries cross-request state.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::CsvResult;
use crate::parser::{optional_i64, parse_decimal_comma, raw_field, require_i64, year_from_code};

// =============================================================================
// Source Columns & Sentinels
// =============================================================================

/// Composite year+group code column of the income dataset.
pub const COL_YEAR_CODE: &str = "C-A10-0";
/// Gross income column (currency units).
pub const COL_GROSS_INCOME: &str = "F-KZ210";
/// Net income column.
pub const COL_NET_INCOME: &str = "F-NBEZ";
/// Count of income recipients represented by the row.
pub const COL_TOTAL_ENTITIES: &str = "F-Z_INSGES";
/// Duration-bucket code column.
pub const COL_DURATION: &str = "C-BEZD_2-0";
/// Economic category code column (absent in one dataset variant).
pub const COL_CATEGORY: &str = "C-LOENACE_08_1-0";

/// Composite period code column of the price-index dataset.
pub const COL_VPI_PERIOD: &str = "C-VPIZR-0";
/// Category marker column of the price-index dataset.
pub const COL_VPI_MARKER: &str = "C-VPI5-0";
/// Localized decimal index value column.
pub const COL_VPI_VALUE: &str = "F-VPIMZBM";

/// Marker value selecting the overall index series.
pub const TOTAL_INDEX_MARKER: &str = "VPI-0";
/// Series/region metadata prefix length on the period code.
pub const VPI_PERIOD_PREFIX_LEN: usize = 6;

/// Sentinel category code meaning "all categories"; excluded from the
/// per-category aggregation.
pub const ALL_CATEGORIES_CODE: u32 = 400000;

/// Earliest year retained by the yearly aggregation.
pub const MIN_YEAR: i32 = 2010;
/// Reference years of the comparison table.
pub const REFERENCE_YEARS: (i32, i32) = (2010, 2022);

/// Neutral price-index value assumed for years with no index entry.
pub const NEUTRAL_INDEX: f64 = 100.0;

// =============================================================================
// Income Record
// =============================================================================

/// One row of the income dataset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IncomeRecord {
    /// Year, extracted from the composite code column suffix.
    pub year: i32,
    /// Gross income in currency units.
    pub gross_income: i64,
    /// Net income in currency units.
    pub net_income: i64,
    /// Number of income recipients represented by the row.
    pub total_entities: i64,
    /// Duration-bucket code; 0 when absent.
    pub duration: i64,
    /// Economic category code; `None` in the variant without the column.
    pub category: Option<u32>,
}

impl IncomeRecord {
    /// Coerce a raw CSV row into a record.
    ///
    /// Year, gross, net and entity count are required; an unparseable value
    /// in any of them is an invalid-record error. Duration and category are
    /// optional (0 / `None`).
    pub fn from_row(row: &Value) -> CsvResult<Self> {
        Ok(Self {
            year: year_from_code(row, COL_YEAR_CODE)?,
            gross_income: require_i64(row, COL_GROSS_INCOME)?,
            net_income: require_i64(row, COL_NET_INCOME)?,
            total_entities: require_i64(row, COL_TOTAL_ENTITIES)?,
            duration: optional_i64(row, COL_DURATION).unwrap_or(0),
            category: optional_i64(row, COL_CATEGORY).map(|c| c as u32),
        })
    }

    /// Coerce all rows, failing on the first malformed record.
    pub fn from_rows(rows: &[Value]) -> CsvResult<Vec<Self>> {
        rows.iter().map(Self::from_row).collect()
    }
}

// =============================================================================
// Price Index Record
// =============================================================================

/// One retained row of the consumer-price-index dataset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceIndexRecord {
    pub year: i32,
    pub index_value: f64,
}

impl PriceIndexRecord {
    /// Filter-parse a raw price-index row.
    ///
    /// Returns `Some` only when the category marker selects the overall
    /// index and the period suffix (after the 6 metadata characters) is a
    /// bare 4-digit year. Monthly rows, other index series, and rows
    /// missing the period column are dropped, never erred. A missing or
    /// unparseable value column defaults to 0.0.
    pub fn from_row(row: &Value) -> Option<Self> {
        let period = row.get(COL_VPI_PERIOD)?.as_str()?;
        let date_part = period.get(VPI_PERIOD_PREFIX_LEN..)?;

        if raw_field(row, COL_VPI_MARKER) != TOTAL_INDEX_MARKER || date_part.len() != 4 {
            return None;
        }

        let year = date_part.parse::<i32>().ok()?;
        let index_value = parse_decimal_comma(raw_field(row, COL_VPI_VALUE)).unwrap_or(0.0);

        Some(Self { year, index_value })
    }
}

// =============================================================================
// Derived Aggregates
// =============================================================================

/// Income summed over one year, across all categories and durations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct YearlyAggregate {
    pub year: i32,
    pub total_entities: i64,
    pub total_net_income: i64,
    pub total_gross_income: i64,
    /// Σnet / Σentities. Division is unchecked: a zero entity count yields a
    /// non-finite value that propagates downstream.
    pub net_income_per_entity: f64,
    /// Σgross / Σentities, same division semantics.
    pub gross_income_per_entity: f64,
}

/// [`YearlyAggregate`] joined with the price index, as charted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CombinedYearlyRow {
    #[serde(flatten)]
    pub aggregate: YearlyAggregate,
    /// Price index for the year; [`NEUTRAL_INDEX`] when the series has no
    /// entry for it.
    pub vpi: f64,
    /// Gross income per entity normalized to 100 at the earliest year.
    pub indexed_gross_income: f64,
}

/// Per-category income for one reference year.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryAggregate {
    pub category: u32,
    /// Σgross / Σentities within the category-year; unchecked division.
    pub gross_income_per_entity: f64,
}

/// One formatted row of the 2010-vs-2022 comparison table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComparisonTableRow {
    pub category: u32,
    /// Single-letter code extracted from the display label ("A".."U").
    pub category_code: String,
    /// Display label with its trailing bracketed annotation removed.
    pub category_name: String,
    /// Formatted 2010 value, e.g. `"2.000 €"`.
    #[serde(rename = "2010")]
    pub value_2010: String,
    /// Formatted 2022 value, or `"no data"` when the category has no 2022
    /// aggregate.
    #[serde(rename = "2022")]
    pub value_2022: String,
    /// Rounded percentage change, e.g. `"25 %"`.
    pub increase: String,
}
