//! In-memory spreadsheet source (for testing and offline use)

use super::records::records_from_values;
use super::{SheetSource, SpreadsheetHandle, WorksheetHandle};
use crate::error::{SheetError, SheetResult};
use crate::types::Row;
use async_trait::async_trait;
use indexmap::IndexMap;
use std::sync::RwLock;

type Grid = Vec<Vec<String>>;

/// Spreadsheets held as value grids, keyed by spreadsheet and worksheet title
#[derive(Default)]
pub struct MemorySheets {
    data: RwLock<IndexMap<String, IndexMap<String, Grid>>>,
}

impl MemorySheets {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style variant of [`MemorySheets::put_worksheet`]
    pub fn with_worksheet(self, spreadsheet: &str, worksheet: &str, values: &[&[&str]]) -> Self {
        let grid = values
            .iter()
            .map(|row| row.iter().map(|c| c.to_string()).collect())
            .collect();
        self.put_worksheet(spreadsheet, worksheet, grid);
        self
    }

    /// Store a worksheet grid, creating the spreadsheet if needed
    pub fn put_worksheet(&self, spreadsheet: &str, worksheet: &str, values: Grid) {
        let mut data = self.data.write().unwrap_or_else(|e| e.into_inner());
        data.entry(spreadsheet.to_string())
            .or_default()
            .insert(worksheet.to_string(), values);
    }
}

#[async_trait]
impl SheetSource for MemorySheets {
    async fn open_spreadsheet(&self, title: &str) -> SheetResult<SpreadsheetHandle> {
        let data = self.data.read().unwrap_or_else(|e| e.into_inner());
        if data.contains_key(title) {
            Ok(SpreadsheetHandle {
                id: title.to_string(),
                title: title.to_string(),
            })
        } else {
            Err(SheetError::SpreadsheetNotFound(title.to_string()))
        }
    }

    async fn worksheet(
        &self,
        spreadsheet: &SpreadsheetHandle,
        title: &str,
    ) -> SheetResult<WorksheetHandle> {
        let data = self.data.read().unwrap_or_else(|e| e.into_inner());
        data.get(&spreadsheet.id)
            .and_then(|sheets| sheets.get_index_of(title))
            .map(|index| WorksheetHandle {
                spreadsheet_id: spreadsheet.id.clone(),
                sheet_id: index as i64,
                title: title.to_string(),
            })
            .ok_or_else(|| SheetError::WorksheetNotFound(title.to_string()))
    }

    async fn records(&self, worksheet: &WorksheetHandle) -> SheetResult<Vec<Row>> {
        let values = {
            let data = self.data.read().unwrap_or_else(|e| e.into_inner());
            data.get(&worksheet.spreadsheet_id)
                .and_then(|sheets| sheets.get(&worksheet.title))
                .cloned()
                .ok_or_else(|| SheetError::WorksheetNotFound(worksheet.title.clone()))?
        };
        records_from_values(values)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> MemorySheets {
        MemorySheets::new().with_worksheet(
            "Söz Xəritəsi",
            "newbrand",
            &[&["kök", "söz", "word"], &["ana", "ana", "mother"], &["ata", "ata"]],
        )
    }

    #[tokio::test]
    async fn test_fetch_records() {
        let rows = sample().fetch_records("Söz Xəritəsi", "newbrand").await.unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].get("word"), Some("mother"));
        assert_eq!(rows[1].get("word"), Some(""));
    }

    #[tokio::test]
    async fn test_spreadsheet_not_found() {
        let err = sample().fetch_records("Missing", "newbrand").await.unwrap_err();
        assert!(matches!(err, SheetError::SpreadsheetNotFound(t) if t == "Missing"));
    }

    #[tokio::test]
    async fn test_worksheet_not_found() {
        let err = sample().fetch_records("Söz Xəritəsi", "old").await.unwrap_err();
        assert!(matches!(err, SheetError::WorksheetNotFound(t) if t == "old"));
    }

    #[tokio::test]
    async fn test_put_worksheet_replaces() {
        let sheets = sample();
        sheets.put_worksheet("Söz Xəritəsi", "newbrand", vec![vec!["söz".to_string()]]);
        let rows = sheets.fetch_records("Söz Xəritəsi", "newbrand").await.unwrap();
        assert!(rows.is_empty());
    }
}
