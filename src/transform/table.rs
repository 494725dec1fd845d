//! Comparison-table construction and value formatting.
//!
//! Pairs the 2010 and 2022 category aggregates by category code. A category
//! with no 2022 counterpart renders `"no data"` in the 2022 and change
//! cells instead of silently mismatching rows.

use std::collections::BTreeMap;

use crate::categories::{label_for, split_label};
use crate::models::{CategoryAggregate, ComparisonTableRow};

/// Placeholder for a category missing from one reference year.
pub const NO_DATA: &str = "no data";

/// Build the 2010-vs-2022 comparison table.
///
/// One output row per 2010 category, in the input's ascending category
/// order. The 2022 value is joined by category code. Unknown category codes
/// fall back to the numeric code as name with an empty short code.
pub fn comparison_table(
    rows_2010: &[CategoryAggregate],
    rows_2022: &[CategoryAggregate],
) -> Vec<ComparisonTableRow> {
    let by_category_2022: BTreeMap<u32, f64> = rows_2022
        .iter()
        .map(|c| (c.category, c.gross_income_per_entity))
        .collect();

    rows_2010
        .iter()
        .map(|row| {
            let (category_code, category_name) = match label_for(row.category) {
                Some(label) => split_label(label),
                None => (String::new(), row.category.to_string()),
            };

            let value_2010 = format_currency(row.gross_income_per_entity);
            let (value_2022, increase) = match by_category_2022.get(&row.category) {
                Some(&v2022) => (
                    format_currency(v2022),
                    format_percent_change(row.gross_income_per_entity, v2022),
                ),
                None => (NO_DATA.to_string(), NO_DATA.to_string()),
            };

            ComparisonTableRow {
                category: row.category,
                category_code,
                category_name,
                value_2010,
                value_2022,
                increase,
            }
        })
        .collect()
}

/// Round and format a currency value, e.g. `2000.4` -> `"2.000 €"`.
///
/// Non-finite values render as `"NaN €"`, never as a silent 0.
pub fn format_currency(value: f64) -> String {
    if !value.is_finite() {
        return "NaN €".to_string();
    }
    format!("{} €", group_thousands(value.round() as i64))
}

/// Rounded percentage change between two values, e.g. `"25 %"`.
///
/// A non-finite change (zero or non-finite base) renders as `"NaN %"`.
pub fn format_percent_change(from: f64, to: f64) -> String {
    let change = (to - from) / from * 100.0;
    if !change.is_finite() {
        return "NaN %".to_string();
    }
    format!("{} %", change.round() as i64)
}

/// Group an integer's digits in threes with `.`, matching the decimal-comma
/// locale of the source data.
fn group_thousands(n: i64) -> String {
    let digits = n.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 1);

    let lead = digits.len() % 3;
    if lead > 0 {
        grouped.push_str(&digits[..lead]);
    }
    for chunk in digits[lead..].as_bytes().chunks(3) {
        if !grouped.is_empty() {
            grouped.push('.');
        }
        grouped.push_str(std::str::from_utf8(chunk).unwrap_or(""));
    }

    if n < 0 {
        format!("-{grouped}")
    } else {
        grouped
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn aggregate(category: u32, value: f64) -> CategoryAggregate {
        CategoryAggregate {
            category,
            gross_income_per_entity: value,
        }
    }

    #[test]
    fn test_group_thousands() {
        assert_eq!(group_thousands(0), "0");
        assert_eq!(group_thousands(999), "999");
        assert_eq!(group_thousands(1000), "1.000");
        assert_eq!(group_thousands(1234567), "1.234.567");
        assert_eq!(group_thousands(-45000), "-45.000");
    }

    #[test]
    fn test_format_currency() {
        assert_eq!(format_currency(2000.4), "2.000 €");
        assert_eq!(format_currency(45678.9), "45.679 €");
        assert_eq!(format_currency(f64::NAN), "NaN €");
        assert_eq!(format_currency(f64::INFINITY), "NaN €");
    }

    #[test]
    fn test_percent_change_scenario() {
        assert_eq!(format_percent_change(2000.0, 2500.0), "25 %");
        assert_eq!(format_percent_change(2000.0, 1500.0), "-25 %");
    }

    #[test]
    fn test_percent_change_undefined_base() {
        assert_eq!(format_percent_change(0.0, 100.0), "NaN %");
        assert_eq!(format_percent_change(f64::NAN, 100.0), "NaN %");
    }

    #[test]
    fn test_table_joins_by_category_code() {
        let rows_2010 = vec![aggregate(400001, 2000.0), aggregate(400006, 3000.0)];
        // 400001 has no 2022 counterpart; join must not shift rows
        let rows_2022 = vec![aggregate(400006, 3600.0)];

        let table = comparison_table(&rows_2010, &rows_2022);
        assert_eq!(table.len(), 2);

        assert_eq!(table[0].category, 400001);
        assert_eq!(table[0].value_2022, NO_DATA);
        assert_eq!(table[0].increase, NO_DATA);

        assert_eq!(table[1].category, 400006);
        assert_eq!(table[1].value_2022, "3.600 €");
        assert_eq!(table[1].increase, "20 %");
    }

    #[test]
    fn test_table_labels() {
        let table = comparison_table(&[aggregate(400001, 2000.0)], &[aggregate(400001, 2500.0)]);

        assert_eq!(table[0].category_code, "A");
        assert_eq!(table[0].category_name, "Land- und Forstwirtschaft; Fischerei");
        assert_eq!(table[0].value_2010, "2.000 €");
        assert_eq!(table[0].value_2022, "2.500 €");
        assert_eq!(table[0].increase, "25 %");
    }

    #[test]
    fn test_table_unknown_category_falls_back_to_code() {
        let table = comparison_table(&[aggregate(412345, 100.0)], &[]);

        assert_eq!(table[0].category_code, "");
        assert_eq!(table[0].category_name, "412345");
    }

    #[test]
    fn test_non_finite_ratio_renders_nan() {
        // zero entity count upstream yields a non-finite per-entity ratio
        let table = comparison_table(&[aggregate(400006, f64::NAN)], &[aggregate(400006, 2500.0)]);

        assert_eq!(table[0].value_2010, "NaN €");
        assert_eq!(table[0].increase, "NaN %");
    }
}
