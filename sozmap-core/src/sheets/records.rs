//! Turning a worksheet's value grid into header-keyed rows

use crate::error::{SheetError, SheetResult};
use crate::types::Row;
use serde_json::Value;
use std::collections::HashSet;

/// Render a cell returned by the values API as a string
pub fn cell_to_string(cell: &Value) -> String {
    match cell {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

/// Build rows from a value grid whose first row is the header
///
/// Short rows are padded with "", cells past the header are dropped and
/// rows with no values are kept. Columns with an empty header are skipped.
///
/// Unlike gspread's `get_all_records`, blank headers are not part of the
/// uniqueness check: any number of unlabelled columns is allowed and their
/// cells are dropped. Only repeated non-empty headers are an error.
pub fn records_from_values(values: Vec<Vec<String>>) -> SheetResult<Vec<Row>> {
    let mut iter = values.into_iter();
    let Some(headers) = iter.next() else {
        return Ok(Vec::new());
    };

    let mut seen = HashSet::new();
    let mut duplicates = Vec::new();
    for header in headers.iter().filter(|h| !h.is_empty()) {
        if !seen.insert(header.as_str()) && !duplicates.contains(header) {
            duplicates.push(header.clone());
        }
    }
    if !duplicates.is_empty() {
        return Err(SheetError::DuplicateHeaders(duplicates));
    }

    let rows = iter
        .map(|cells| {
            let mut cells = cells.into_iter();
            headers
                .iter()
                .map(|header| (header, cells.next().unwrap_or_default()))
                .filter(|(header, _)| !header.is_empty())
                .map(|(header, value)| (header.clone(), value))
                .collect::<Row>()
        })
        .collect();

    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid(rows: &[&[&str]]) -> Vec<Vec<String>> {
        rows.iter()
            .map(|r| r.iter().map(|c| c.to_string()).collect())
            .collect()
    }

    #[test]
    fn test_empty_grid() {
        assert!(records_from_values(Vec::new()).unwrap().is_empty());
    }

    #[test]
    fn test_header_only() {
        let rows = records_from_values(grid(&[&["kök", "söz"]])).unwrap();
        assert!(rows.is_empty());
    }

    #[test]
    fn test_pads_short_rows() {
        let rows = records_from_values(grid(&[&["kök", "söz", "word"], &["a"]])).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].get("kök"), Some("a"));
        assert_eq!(rows[0].get("söz"), Some(""));
        assert_eq!(rows[0].get("word"), Some(""));
    }

    #[test]
    fn test_truncates_long_rows() {
        let rows = records_from_values(grid(&[&["kök"], &["a", "b", "c"]])).unwrap();
        assert_eq!(rows[0].len(), 1);
        assert_eq!(rows[0].get("kök"), Some("a"));
    }

    #[test]
    fn test_keeps_empty_rows() {
        let rows = records_from_values(grid(&[&["söz"], &["x"], &[], &["y"]])).unwrap();
        let ids: Vec<_> = rows.iter().map(|r| r.get("söz").unwrap()).collect();
        assert_eq!(ids, vec!["x", "", "y"]);
    }

    #[test]
    fn test_duplicate_headers_rejected() {
        let err = records_from_values(grid(&[&["söz", "word", "söz", "söz"], &["a"]])).unwrap_err();
        match err {
            SheetError::DuplicateHeaders(names) => assert_eq!(names, vec!["söz".to_string()]),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_empty_headers_skipped() {
        let rows = records_from_values(grid(&[&["söz", "", ""], &["a", "b", "c"]])).unwrap();
        assert_eq!(rows[0].len(), 1);
        assert_eq!(rows[0].get("söz"), Some("a"));
    }

    #[test]
    fn test_cell_to_string() {
        assert_eq!(cell_to_string(&Value::String("söz".into())), "söz");
        assert_eq!(cell_to_string(&serde_json::json!(42)), "42");
        assert_eq!(cell_to_string(&serde_json::json!(true)), "true");
        assert_eq!(cell_to_string(&Value::Null), "");
    }
}
