//! Check command implementation

use anyhow::{Context, Result};
use sozmap_core::mapper::missing_columns;
use sozmap_core::sheets::SheetSource;

/// Verify credentials, resolve the spreadsheet and worksheet, and report what was found
pub async fn check(spreadsheet: &str, worksheet: &str) -> Result<()> {
    let sheets = super::connect().await?;
    println!("Credentials:  ok");

    let handle = sheets
        .open_spreadsheet(spreadsheet)
        .await
        .with_context(|| format!("Spreadsheet '{}' is not reachable", spreadsheet))?;
    println!("Spreadsheet:  {} ({})", handle.title, handle.id);

    let ws = sheets
        .worksheet(&handle, worksheet)
        .await
        .with_context(|| format!("Worksheet '{}' is not reachable", worksheet))?;
    println!("Worksheet:    {} (gid {})", ws.title, ws.sheet_id);

    let rows = sheets.records(&ws).await?;
    println!("Rows:         {}", rows.len());

    if let Some(first) = rows.first() {
        let missing = missing_columns(first.columns());
        if !missing.is_empty() {
            println!("Missing:      {}", missing.join(", "));
        }
    }

    Ok(())
}
