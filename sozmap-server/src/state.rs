//! Application state

use crate::config::ServerConfig;
use anyhow::Result;
use sozmap_core::sheets::{GoogleSheets, SheetSource};
use std::sync::Arc;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Authenticated spreadsheet client, shared by every request
    pub sheets: Arc<dyn SheetSource>,

    /// Spreadsheet title to read from
    pub spreadsheet: Arc<str>,

    /// Worksheet title to read from
    pub worksheet: Arc<str>,
}

impl AppState {
    /// Load credentials and authenticate against Google
    pub async fn new(config: &ServerConfig) -> Result<Self> {
        let sheets =
            GoogleSheets::from_credentials(config.credentials.clone(), &config.credential_options)
                .await?;
        tracing::info!(
            "Authenticated with Google API; serving {}/{}",
            config.spreadsheet,
            config.worksheet
        );

        Ok(Self::with_source(
            Arc::new(sheets),
            &config.spreadsheet,
            &config.worksheet,
        ))
    }

    /// Build state around an existing spreadsheet source
    pub fn with_source(sheets: Arc<dyn SheetSource>, spreadsheet: &str, worksheet: &str) -> Self {
        Self {
            sheets,
            spreadsheet: spreadsheet.into(),
            worksheet: worksheet.into(),
        }
    }
}
