//! Spreadsheet access
//!
//! [`SheetSource`] is the seam between the word-map consumers and wherever the
//! worksheet actually lives. [`GoogleSheets`] talks to the Drive and Sheets REST
//! APIs; [`MemorySheets`] keeps grids in memory.

mod google;
mod memory;
mod records;

pub use google::{
    Endpoints, GoogleSheets, ServiceAccountTokens, StaticToken, TokenProvider, SCOPES,
};
pub use memory::MemorySheets;
pub use records::{cell_to_string, records_from_values};

use crate::error::SheetResult;
use crate::types::Row;
use async_trait::async_trait;

/// A spreadsheet resolved by title
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpreadsheetHandle {
    /// Backend identifier (the Drive file ID for Google)
    pub id: String,
    pub title: String,
}

/// A worksheet inside a resolved spreadsheet
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorksheetHandle {
    pub spreadsheet_id: String,
    pub sheet_id: i64,
    pub title: String,
}

/// Read-only access to spreadsheets addressed by title
#[async_trait]
pub trait SheetSource: Send + Sync {
    /// Find a spreadsheet by its title
    async fn open_spreadsheet(&self, title: &str) -> SheetResult<SpreadsheetHandle>;

    /// Find a worksheet by its title within a spreadsheet
    async fn worksheet(
        &self,
        spreadsheet: &SpreadsheetHandle,
        title: &str,
    ) -> SheetResult<WorksheetHandle>;

    /// All rows below the header row, keyed by header
    async fn records(&self, worksheet: &WorksheetHandle) -> SheetResult<Vec<Row>>;

    /// Open a spreadsheet and worksheet by title and read every record
    async fn fetch_records(
        &self,
        spreadsheet_title: &str,
        worksheet_title: &str,
    ) -> SheetResult<Vec<Row>> {
        let spreadsheet = self.open_spreadsheet(spreadsheet_title).await?;
        let worksheet = self.worksheet(&spreadsheet, worksheet_title).await?;
        let rows = self.records(&worksheet).await?;
        tracing::info!(
            "Read {} rows from {}/{}",
            rows.len(),
            spreadsheet.title,
            worksheet.title
        );
        Ok(rows)
    }
}
