//! CLI command implementations

mod check;
mod export;
mod map;

pub use check::check;
pub use export::export;
pub use map::map;

use anyhow::{Context, Result};
use sozmap_core::credentials::{CredentialOptions, CredentialSource};
use sozmap_core::sheets::GoogleSheets;
use sozmap_core::NodesResponse;

/// Load credentials from the environment and authenticate
pub(crate) async fn connect() -> Result<GoogleSheets> {
    let source = CredentialSource::from_env()?;
    GoogleSheets::from_credentials(source, &CredentialOptions::from_env())
        .await
        .context("Failed to authenticate with Google API")
}

pub(crate) fn render(response: &NodesResponse, compact: bool) -> Result<String> {
    let json = if compact {
        serde_json::to_string(response)?
    } else {
        serde_json::to_string_pretty(response)?
    };
    Ok(json)
}
