//! Generic CSV parser with encoding and delimiter auto-detection, plus the
//! field-coercion rules of the statistical-agency export format.
//!
//! Rows become JSON objects keyed by column header; values stay raw strings.
//! All numeric interpretation happens through the coercion helpers at the
//! bottom of this module, which encode two format quirks that must be
//! preserved exactly:
//!
//! - floating point values use a decimal comma (`"105,3"`);
//! - the income year is not a dedicated column but the suffix of a composite
//!   code column after a 4-character group marker (`"A10-2010"` -> 2010).

use serde_json::{json, Map, Value};

use crate::error::{CsvError, CsvResult};

/// Length of the group-marker prefix on the composite year code column.
pub const YEAR_CODE_PREFIX_LEN: usize = 4;

/// Result of parsing with metadata
#[derive(Debug, Clone)]
pub struct ParseResult {
    /// Parsed records as JSON objects
    pub records: Vec<Value>,
    /// Detected or used encoding
    pub encoding: String,
    /// Detected or used delimiter
    pub delimiter: char,
    /// Column headers
    pub headers: Vec<String>,
}

/// Detect the encoding of raw bytes using chardet
pub fn detect_encoding(bytes: &[u8]) -> String {
    let result = chardet::detect(bytes);
    let charset = result.0;

    // Normalize charset names
    match charset.to_lowercase().as_str() {
        "ascii" | "utf-8" | "utf8" => "utf-8".to_string(),
        "iso-8859-1" | "iso-8859-15" | "latin-1" | "latin1" => "iso-8859-1".to_string(),
        "windows-1252" | "cp1252" => "windows-1252".to_string(),
        _ => charset,
    }
}

/// Decode bytes to string using the specified encoding
pub fn decode_content(bytes: &[u8], encoding: &str) -> CsvResult<String> {
    match encoding.to_lowercase().as_str() {
        "utf-8" | "utf8" | "ascii" => Ok(String::from_utf8(bytes.to_vec())
            .unwrap_or_else(|_| String::from_utf8_lossy(bytes).to_string())),
        "iso-8859-1" | "latin-1" | "latin1" => {
            Ok(encoding_rs::ISO_8859_15.decode(bytes).0.to_string())
        }
        "windows-1252" | "cp1252" => Ok(encoding_rs::WINDOWS_1252.decode(bytes).0.to_string()),
        _ => {
            // Fallback: UTF-8 with lossy conversion
            Ok(String::from_utf8_lossy(bytes).to_string())
        }
    }
}

/// Detect the delimiter by counting occurrences in the first line.
///
/// Statistical exports use `;`, which is also the tie-break default.
pub fn detect_delimiter(content: &str) -> char {
    let first_line = content.lines().next().unwrap_or("");

    let separators = [';', ',', '\t', '|'];
    let mut best_sep = ';';
    let mut best_count = 0;

    for &sep in &separators {
        let count = first_line.matches(sep).count();
        if count > best_count {
            best_count = count;
            best_sep = sep;
        }
    }

    best_sep
}

/// Parse CSV text into JSON objects with an explicit delimiter.
///
/// Each row becomes a JSON object where keys are column headers and values
/// are the raw cell strings. Row order is preserved; empty lines are
/// skipped; short rows are padded with empty strings; extra cells are
/// ignored.
///
/// # Example
/// ```ignore
/// use lohnspiegel::csv_to_rows;
///
/// let csv = "C-A10-0;F-KZ210\nA10-2010;1000";
/// let rows = csv_to_rows(csv, ';').unwrap();
///
/// assert_eq!(rows.len(), 1);
/// assert_eq!(rows[0]["C-A10-0"], "A10-2010");
/// assert_eq!(rows[0]["F-KZ210"], "1000");
/// ```
pub fn csv_to_rows(csv: &str, delimiter: char) -> CsvResult<Vec<Value>> {
    let mut lines = csv.lines();

    let header_line = lines.next().ok_or(CsvError::EmptyFile)?;

    let headers: Vec<String> = header_line
        .split(delimiter)
        .map(|s| s.trim().trim_matches('"').to_string())
        .collect();

    if headers.is_empty() || headers.iter().all(|h| h.is_empty()) {
        return Err(CsvError::NoHeaders);
    }

    let mut rows = Vec::new();

    for line in lines {
        if line.trim().is_empty() {
            continue;
        }

        let values: Vec<&str> = line.split(delimiter).collect();
        let mut obj = Map::new();

        for (i, header) in headers.iter().enumerate() {
            let raw_value = values
                .get(i)
                .map(|s| s.trim().trim_matches('"'))
                .unwrap_or("");

            obj.insert(header.clone(), json!(raw_value));
        }

        rows.push(Value::Object(obj));
    }

    Ok(rows)
}

/// Parse CSV bytes with auto-detection of encoding and delimiter.
pub fn parse_bytes_auto(bytes: &[u8]) -> CsvResult<ParseResult> {
    let encoding = detect_encoding(bytes);
    let content = decode_content(bytes, &encoding)?;
    let delimiter = detect_delimiter(&content);

    let header_line = content.lines().next().ok_or(CsvError::EmptyFile)?;
    let headers: Vec<String> = header_line
        .split(delimiter)
        .map(|s| s.trim().trim_matches('"').to_string())
        .collect();

    let records = csv_to_rows(&content, delimiter)?;

    Ok(ParseResult {
        records,
        encoding,
        delimiter,
        headers,
    })
}

// =============================================================================
// Field Coercion
// =============================================================================

/// Get a column's raw string value, or an empty string when the column is
/// absent.
pub fn raw_field<'a>(row: &'a Value, column: &str) -> &'a str {
    row.get(column).and_then(Value::as_str).unwrap_or("")
}

/// Strict base-10 integer coercion of a required column.
///
/// A missing column and an unparseable value are both invalid-record errors;
/// the caller decides whether to abort or skip.
pub fn require_i64(row: &Value, column: &str) -> CsvResult<i64> {
    let raw = row
        .get(column)
        .and_then(Value::as_str)
        .ok_or_else(|| CsvError::MissingColumn(column.to_string()))?;

    raw.trim()
        .parse::<i64>()
        .map_err(|_| CsvError::invalid(column, raw, "expected an integer"))
}

/// Best-effort integer coercion of an optional column.
///
/// Missing, empty, and unparseable values all collapse to `None`.
pub fn optional_i64(row: &Value, column: &str) -> Option<i64> {
    row.get(column)
        .and_then(Value::as_str)
        .and_then(|s| s.trim().parse::<i64>().ok())
}

/// Parse a localized decimal value that uses a comma as decimal separator.
///
/// `"105,3"` -> `105.3`. Returns `None` for empty or unparseable input.
pub fn parse_decimal_comma(raw: &str) -> Option<f64> {
    let normalized = raw.trim().replace(',', ".");
    if normalized.is_empty() {
        return None;
    }
    normalized.parse::<f64>().ok()
}

/// Extract the 4-digit year from a composite code column.
///
/// The leading [`YEAR_CODE_PREFIX_LEN`] characters are a group marker and are
/// discarded; the remainder is the year (`"A10-2010"` -> 2010).
pub fn year_from_code(row: &Value, column: &str) -> CsvResult<i32> {
    let raw = row
        .get(column)
        .and_then(Value::as_str)
        .ok_or_else(|| CsvError::MissingColumn(column.to_string()))?;

    let suffix = raw
        .get(YEAR_CODE_PREFIX_LEN..)
        .ok_or_else(|| CsvError::invalid(column, raw, "code shorter than group marker"))?;

    suffix
        .parse::<i32>()
        .map_err(|_| CsvError::invalid(column, raw, "expected a year suffix"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simple_csv() {
        let csv = "name;age\nAlice;30\nBob;25";
        let rows = csv_to_rows(csv, ';').unwrap();

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0]["name"], "Alice");
        assert_eq!(rows[0]["age"], "30");
        assert_eq!(rows[1]["name"], "Bob");
        assert_eq!(rows[1]["age"], "25");
    }

    #[test]
    fn test_quoted_values() {
        let csv = "code;name\n\"400001\";\"Land- und Forstwirtschaft\"";
        let rows = csv_to_rows(csv, ';').unwrap();

        assert_eq!(rows[0]["code"], "400001");
        assert_eq!(rows[0]["name"], "Land- und Forstwirtschaft");
    }

    #[test]
    fn test_empty_lines_skipped() {
        let csv = "a;b\n1;2\n\n3;4\n";
        let rows = csv_to_rows(csv, ';').unwrap();

        assert_eq!(rows.len(), 2);
    }

    #[test]
    fn test_missing_cells_become_empty() {
        let csv = "a;b;c\n1;;3\n1";
        let rows = csv_to_rows(csv, ';').unwrap();

        assert_eq!(rows[0]["b"], "");
        assert_eq!(rows[1]["b"], "");
        assert_eq!(rows[1]["c"], "");
    }

    #[test]
    fn test_empty_csv_error() {
        assert!(matches!(csv_to_rows("", ';'), Err(CsvError::EmptyFile)));
    }

    #[test]
    fn test_detect_delimiter_defaults_to_semicolon() {
        assert_eq!(detect_delimiter("single-column\n1"), ';');
        assert_eq!(detect_delimiter("a;b;c\n1;2;3"), ';');
        assert_eq!(detect_delimiter("a,b,c\n1,2,3"), ',');
        assert_eq!(detect_delimiter("a\tb\tc"), '\t');
    }

    #[test]
    fn test_auto_parse() {
        let csv = "C-A10-0;F-KZ210\nA10-2010;1000\nA10-2011;1200";
        let result = parse_bytes_auto(csv.as_bytes()).unwrap();

        assert_eq!(result.delimiter, ';');
        assert_eq!(result.records.len(), 2);
        assert_eq!(result.headers, vec!["C-A10-0", "F-KZ210"]);
    }

    #[test]
    fn test_latin1_decoding() {
        // "Öffentliche" in ISO-8859-1
        let bytes: &[u8] = &[0xD6, 0x66, 0x66, 0x65, 0x6E, 0x74, 0x6C, 0x69, 0x63, 0x68, 0x65];
        let decoded = decode_content(bytes, "iso-8859-1").unwrap();
        assert!(decoded.contains("ffentliche"));
    }

    #[test]
    fn test_require_i64() {
        let row = serde_json::json!({ "F-KZ210": "1000", "F-NBEZ": "abc" });
        assert_eq!(require_i64(&row, "F-KZ210").unwrap(), 1000);
        assert!(matches!(
            require_i64(&row, "F-NBEZ"),
            Err(CsvError::InvalidValue { .. })
        ));
        assert!(matches!(
            require_i64(&row, "F-Z_INSGES"),
            Err(CsvError::MissingColumn(_))
        ));
    }

    #[test]
    fn test_optional_i64() {
        let row = serde_json::json!({ "C-LOENACE_08_1-0": "400001", "C-BEZD_2-0": "" });
        assert_eq!(optional_i64(&row, "C-LOENACE_08_1-0"), Some(400001));
        assert_eq!(optional_i64(&row, "C-BEZD_2-0"), None);
        assert_eq!(optional_i64(&row, "missing"), None);
    }

    #[test]
    fn test_parse_decimal_comma() {
        assert_eq!(parse_decimal_comma("105,3"), Some(105.3));
        assert_eq!(parse_decimal_comma("100"), Some(100.0));
        assert_eq!(parse_decimal_comma(""), None);
        assert_eq!(parse_decimal_comma("n/a"), None);
    }

    #[test]
    fn test_year_from_code() {
        let row = serde_json::json!({ "C-A10-0": "A10-2010" });
        assert_eq!(year_from_code(&row, "C-A10-0").unwrap(), 2010);

        let short = serde_json::json!({ "C-A10-0": "A10" });
        assert!(year_from_code(&short, "C-A10-0").is_err());
    }
}
