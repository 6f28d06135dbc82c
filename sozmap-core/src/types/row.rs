//! Worksheet rows keyed by header

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// One worksheet row below the header, mapping column header to cell value
///
/// Column order follows the header row.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Row(IndexMap<String, String>);

impl Row {
    /// Create an empty row
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the value of a column, if the row has it
    pub fn get(&self, column: &str) -> Option<&str> {
        self.0.get(column).map(String::as_str)
    }

    /// Set the value of a column
    pub fn insert(&mut self, column: impl Into<String>, value: impl Into<String>) {
        self.0.insert(column.into(), value.into());
    }

    /// Number of columns in the row
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Column headers in order
    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }
}

impl<K, V> FromIterator<(K, V)> for Row
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preserves_header_order() {
        let row: Row = [("word", "a"), ("kök", "b"), ("söz", "c")]
            .into_iter()
            .collect();
        let columns: Vec<_> = row.columns().collect();
        assert_eq!(columns, vec!["word", "kök", "söz"]);
    }

    #[test]
    fn test_deserialize_from_object() {
        let row: Row = serde_json::from_str(r#"{"söz": "ana", "word": "mother"}"#).unwrap();
        assert_eq!(row.get("söz"), Some("ana"));
        assert_eq!(row.get("növ"), None);
        assert_eq!(row.len(), 2);
    }
}
