//! Export command implementation

use anyhow::{Context, Result};
use sozmap_core::sheets::SheetSource;
use sozmap_core::{map_rows, NodesResponse};

/// Fetch the worksheet and print or write the nodes
pub async fn export(
    spreadsheet: &str,
    worksheet: &str,
    output: Option<&str>,
    compact: bool,
) -> Result<()> {
    let sheets = super::connect().await?;

    let rows = sheets
        .fetch_records(spreadsheet, worksheet)
        .await
        .with_context(|| format!("Failed to read {}/{}", spreadsheet, worksheet))?;

    let response = NodesResponse::from(map_rows(&rows));
    let json = super::render(&response, compact)?;

    match output {
        Some(path) => {
            std::fs::write(path, json)
                .with_context(|| format!("Failed to write output file: {}", path))?;
            tracing::info!("Wrote {} nodes to {}", response.nodes.len(), path);
        }
        None => println!("{}", json),
    }

    Ok(())
}
