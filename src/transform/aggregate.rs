//! Income aggregation and the price-index join.
//!
//! One grouping core, [`sum_by`], backs both the yearly aggregation and the
//! per-category aggregation; the key closure decides which dimension is
//! kept and which rows participate. Grouping is a pure reduction over
//! gross income, net income, and entity counts.

use std::collections::BTreeMap;

use serde_json::Value;

use crate::models::{
    CategoryAggregate, CombinedYearlyRow, IncomeRecord, PriceIndexRecord, YearlyAggregate,
    ALL_CATEGORIES_CODE, MIN_YEAR, NEUTRAL_INDEX,
};

// =============================================================================
// Grouping Core
// =============================================================================

/// Running sums for one group of income rows.
#[derive(Debug, Default, Clone, Copy)]
struct GroupSums {
    entities: i64,
    gross: i64,
    net: i64,
}

impl GroupSums {
    fn add(&mut self, record: &IncomeRecord) {
        self.entities += record.total_entities;
        self.gross += record.gross_income;
        self.net += record.net_income;
    }

    /// Σgross / Σentities. Unchecked: zero entities yields a non-finite
    /// value that propagates to the presentation layer.
    fn gross_per_entity(&self) -> f64 {
        self.gross as f64 / self.entities as f64
    }

    fn net_per_entity(&self) -> f64 {
        self.net as f64 / self.entities as f64
    }
}

/// Group records by the key closure and sum each group.
///
/// Records for which the closure returns `None` do not participate. The
/// `BTreeMap` keeps groups in ascending key order, which is the output
/// order of both aggregations.
fn sum_by<K, F>(records: &[IncomeRecord], key: F) -> BTreeMap<K, GroupSums>
where
    K: Ord,
    F: Fn(&IncomeRecord) -> Option<K>,
{
    let mut groups: BTreeMap<K, GroupSums> = BTreeMap::new();
    for record in records {
        if let Some(k) = key(record) {
            groups.entry(k).or_default().add(record);
        }
    }
    groups
}

// =============================================================================
// Yearly Aggregation
// =============================================================================

/// Sum income per year, collapsing category and duration dimensions.
///
/// Years before [`MIN_YEAR`] are dropped once, here at emission time; the
/// result is sorted ascending by year.
pub fn aggregate_by_year(records: &[IncomeRecord]) -> Vec<YearlyAggregate> {
    sum_by(records, |r| Some(r.year))
        .into_iter()
        .filter(|(year, _)| *year >= MIN_YEAR)
        .map(|(year, sums)| YearlyAggregate {
            year,
            total_entities: sums.entities,
            total_net_income: sums.net,
            total_gross_income: sums.gross,
            net_income_per_entity: sums.net_per_entity(),
            gross_income_per_entity: sums.gross_per_entity(),
        })
        .collect()
}

/// Build the year → index-value map from raw price-index rows.
///
/// Rows failing the filter conditions are dropped by
/// [`PriceIndexRecord::from_row`]; duplicate years are last-write-wins.
pub fn price_index_map(rows: &[Value]) -> BTreeMap<i32, f64> {
    rows.iter()
        .filter_map(PriceIndexRecord::from_row)
        .map(|r| (r.year, r.index_value))
        .collect()
}

/// Join yearly aggregates with the price index and compute the indexed
/// income series.
///
/// The base of the indexed series is the earliest year's gross income per
/// entity; with no base (empty input) the indexed value defaults to exactly
/// 100. A year missing from the index map gets [`NEUTRAL_INDEX`].
pub fn combine_with_index(
    yearly: Vec<YearlyAggregate>,
    index: &BTreeMap<i32, f64>,
) -> Vec<CombinedYearlyRow> {
    let base = yearly.first().map(|a| a.gross_income_per_entity);

    yearly
        .into_iter()
        .map(|aggregate| {
            let indexed_gross_income =
                base.map_or(100.0, |b| aggregate.gross_income_per_entity / b * 100.0);
            let vpi = index.get(&aggregate.year).copied().unwrap_or(NEUTRAL_INDEX);
            CombinedYearlyRow {
                aggregate,
                vpi,
                indexed_gross_income,
            }
        })
        .collect()
}

// =============================================================================
// Category Aggregation
// =============================================================================

/// Sum income per category for one reference year.
///
/// Rows of other years, rows without a category code, and rows carrying the
/// all-categories sentinel are excluded. The result is sorted ascending by
/// category code.
pub fn aggregate_by_category(records: &[IncomeRecord], year: i32) -> Vec<CategoryAggregate> {
    sum_by(records, |r| match r.category {
        Some(category) if r.year == year && category != ALL_CATEGORIES_CODE => Some(category),
        _ => None,
    })
    .into_iter()
    .map(|(category, sums)| CategoryAggregate {
        category,
        gross_income_per_entity: sums.gross_per_entity(),
    })
    .collect()
}
