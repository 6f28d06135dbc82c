//! Reshape worksheet rows into word-map nodes

use crate::types::{Node, Row};

/// Worksheet columns the mapper reads, in node field order
pub const SOURCE_COLUMNS: [&str; 12] = [
    "kök",
    "söz",
    "word",
    "növ",
    "type",
    "sinonimlər",
    "synonyms",
    "antonimlər",
    "antonyms",
    "variantlar",
    "variants",
    "cümlələr",
];

fn column(row: &Row, name: &str) -> String {
    row.get(name).unwrap_or_default().to_string()
}

/// Build a node from a single row, using "" for any missing column
pub fn map_row(row: &Row) -> Node {
    Node {
        kok: column(row, "kök"),
        id: column(row, "söz"),
        en_word: column(row, "word"),
        az_word_type: column(row, "növ"),
        en_word_type: column(row, "type"),
        azerbaijani_synonyms: column(row, "sinonimlər"),
        english_synonyms: column(row, "synonyms"),
        azerbaijani_antonyms: column(row, "antonimlər"),
        english_antonyms: column(row, "antonyms"),
        azerbaijani_variants: column(row, "variantlar"),
        english_variants: column(row, "variants"),
        azerbaijani_sentences: column(row, "cümlələr"),
    }
}

/// Map every row, keeping input order
pub fn map_rows(rows: &[Row]) -> Vec<Node> {
    rows.iter().map(map_row).collect()
}

/// Source columns absent from a header row
pub fn missing_columns<'a>(headers: impl IntoIterator<Item = &'a str>) -> Vec<&'static str> {
    let headers: Vec<&str> = headers.into_iter().collect();
    SOURCE_COLUMNS
        .iter()
        .copied()
        .filter(|c| !headers.contains(c))
        .collect()
}
