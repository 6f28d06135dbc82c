//! Sozmap Core Library
//!
//! This crate provides the word-map data model and the plumbing that reads it from
//! Google Sheets. Worksheet rows are fetched through a [`sheets::SheetSource`] and
//! reshaped into [`Node`] records by the [`mapper`].

pub mod credentials;
pub mod error;
pub mod mapper;
pub mod sheets;
pub mod types;

pub use credentials::CredentialSource;
pub use error::{CredentialError, Result, SheetError, SheetResult, SozmapError};
pub use mapper::{map_row, map_rows};
pub use types::{Node, NodesResponse, Row};

/// Spreadsheet title the word map lives in
pub const DEFAULT_SPREADSHEET: &str = "Söz Xəritəsi";

/// Worksheet holding the word map rows
pub const DEFAULT_WORKSHEET: &str = "newbrand";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_row_to_node() {
        let row: Row = [("söz", "ana"), ("word", "mother")].into_iter().collect();
        let node = map_row(&row);
        assert_eq!(node.id, "ana");
        assert_eq!(node.en_word, "mother");
        assert_eq!(node.kok, "");
    }
}
