//! Map command implementation

use anyhow::{Context, Result};
use serde_json::{Map, Value};
use sozmap_core::sheets::cell_to_string;
use sozmap_core::{map_rows, NodesResponse, Row};
use std::fs::File;
use std::io::BufReader;

/// Map rows from a local JSON file to nodes
pub fn map(input: &str, compact: bool) -> Result<()> {
    let file = File::open(input).with_context(|| format!("Failed to open input file: {}", input))?;
    let objects: Vec<Map<String, Value>> = serde_json::from_reader(BufReader::new(file))
        .with_context(|| format!("{} is not a JSON array of row objects", input))?;

    // Cells may be numbers, booleans or null, as exported by spreadsheet tools
    let rows: Vec<Row> = objects
        .iter()
        .map(|object| {
            object
                .iter()
                .map(|(column, cell)| (column.as_str(), cell_to_string(cell)))
                .collect()
        })
        .collect();

    let response = NodesResponse::from(map_rows(&rows));
    println!("{}", super::render(&response, compact)?);

    Ok(())
}
