//! Header remapping: translate source column codes to readable names.
//!
//! This pipeline runs independently of the aggregation pipeline and never
//! coerces values; rows come out identical except for their keys.

use std::collections::HashMap;

use serde_json::{Map, Value};

/// Header-translation table columns.
pub const COL_CODE: &str = "code";
pub const COL_EN_NAME: &str = "en_name";
pub const COL_NAME: &str = "name";

/// Build the code → target-name map from translation-table rows.
///
/// A row contributes only when both its `code` and its `en_name` gate column
/// are non-empty; the target is the `name` column.
pub fn translation_map(rows: &[Value]) -> HashMap<String, String> {
    let mut mapping = HashMap::new();

    for row in rows {
        let code = row.get(COL_CODE).and_then(Value::as_str).unwrap_or("");
        let gate = row.get(COL_EN_NAME).and_then(Value::as_str).unwrap_or("");
        if code.is_empty() || gate.is_empty() {
            continue;
        }
        let name = row.get(COL_NAME).and_then(Value::as_str).unwrap_or("");
        mapping.insert(code.to_string(), name.to_string());
    }

    mapping
}

/// Rewrite every row's keys through the translation map.
///
/// Keys without a translation pass through unchanged; values are copied
/// verbatim. Row order is preserved.
pub fn remap_headers(rows: Vec<Value>, mapping: &HashMap<String, String>) -> Vec<Value> {
    rows.into_iter()
        .map(|row| match row {
            Value::Object(obj) => {
                let mut remapped = Map::new();
                for (key, value) in obj {
                    let new_key = mapping.get(&key).cloned().unwrap_or(key);
                    remapped.insert(new_key, value);
                }
                Value::Object(remapped)
            }
            other => other,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_translation_map_gated_on_en_name() {
        let rows = vec![
            json!({ "code": "F-KZ210", "en_name": "gross income", "name": "Bruttobezüge" }),
            json!({ "code": "F-NBEZ", "en_name": "", "name": "Nettobezüge" }),
            json!({ "code": "", "en_name": "x", "name": "y" }),
        ];

        let mapping = translation_map(&rows);
        assert_eq!(mapping.len(), 1);
        assert_eq!(mapping["F-KZ210"], "Bruttobezüge");
    }

    #[test]
    fn test_remap_translates_known_keys_only() {
        let mapping = HashMap::from([("F-KZ210".to_string(), "Bruttobezüge".to_string())]);
        let rows = vec![json!({ "F-KZ210": "1000", "F-NBEZ": "800" })];

        let remapped = remap_headers(rows, &mapping);
        assert_eq!(remapped[0]["Bruttobezüge"], "1000");
        assert_eq!(remapped[0]["F-NBEZ"], "800");
        assert!(remapped[0].get("F-KZ210").is_none());
    }

    #[test]
    fn test_empty_mapping_is_identity() {
        let rows = vec![
            json!({ "F-KZ210": "1000", "F-NBEZ": "800" }),
            json!({ "F-KZ210": "2000", "F-NBEZ": "1600" }),
        ];

        let remapped = remap_headers(rows.clone(), &HashMap::new());
        assert_eq!(remapped, rows);
    }

    #[test]
    fn test_values_never_coerced() {
        let mapping = HashMap::from([("a".to_string(), "b".to_string())]);
        let rows = vec![json!({ "a": "007" })];

        let remapped = remap_headers(rows, &mapping);
        assert_eq!(remapped[0]["b"], "007");
    }
}
