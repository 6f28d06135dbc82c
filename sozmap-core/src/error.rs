//! Error types for Sozmap Core

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using SozmapError
pub type Result<T> = std::result::Result<T, SozmapError>;

/// Result type for spreadsheet operations
pub type SheetResult<T> = std::result::Result<T, SheetError>;

/// Top-level error type for all Sozmap operations
#[derive(Debug, Error)]
pub enum SozmapError {
    #[error("Sheet error: {0}")]
    Sheet(#[from] SheetError),

    #[error("Credential error: {0}")]
    Credential(#[from] CredentialError),
}

/// Errors raised while reading from a spreadsheet
#[derive(Debug, Error)]
pub enum SheetError {
    #[error("Spreadsheet not found: {0}")]
    SpreadsheetNotFound(String),

    #[error("Worksheet not found: {0}")]
    WorksheetNotFound(String),

    #[error("Duplicate header names in worksheet: {}", .0.join(", "))]
    DuplicateHeaders(Vec<String>),

    #[error("Authentication failed: {0}")]
    Auth(String),

    #[error("Upstream returned {status}: {message}")]
    Upstream { status: u16, message: String },

    #[error("Request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Malformed response: {0}")]
    Malformed(String),
}

impl SheetError {
    /// Whether the error means the addressed spreadsheet or worksheet does not exist
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            SheetError::SpreadsheetNotFound(_) | SheetError::WorksheetNotFound(_)
        )
    }
}

/// Errors that occur while loading service-account credentials
#[derive(Debug, Error)]
pub enum CredentialError {
    #[error(
        "Service account credentials not found. Set one of SERVICE_ACCOUNT_JSON, GOOGLE_CREDENTIALS or GOOGLE_APPLICATION_CREDENTIALS."
    )]
    Missing,

    #[error("Failed to load .env file: {source}")]
    EnvFile {
        #[source]
        source: dotenvy::Error,
    },

    #[error("Invalid service account JSON in {source_name}: {source}")]
    InvalidJson {
        source_name: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to access credential file {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
