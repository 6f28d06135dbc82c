//! Google Drive + Sheets v4 backed spreadsheet source

use super::records::{cell_to_string, records_from_values};
use super::{SheetSource, SpreadsheetHandle, WorksheetHandle};
use crate::credentials::{load_service_account_key, CredentialOptions, CredentialSource};
use crate::error::{Result, SheetError, SheetResult};
use crate::types::Row;
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use yup_oauth2::{AccessToken, ServiceAccountAuthenticator, ServiceAccountKey};

/// OAuth2 scopes needed to look up spreadsheets by title and read their values
pub const SCOPES: &[&str] = &[
    "https://www.googleapis.com/auth/spreadsheets.readonly",
    "https://www.googleapis.com/auth/drive.metadata.readonly",
];

const SPREADSHEET_MIME_TYPE: &str = "application/vnd.google-apps.spreadsheet";

/// Supplies bearer tokens for API requests
#[async_trait]
pub trait TokenProvider: Send + Sync {
    async fn access_token(&self) -> SheetResult<String>;
}

/// A fixed token, for tests and pre-issued tokens
pub struct StaticToken(String);

impl StaticToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }
}

#[async_trait]
impl TokenProvider for StaticToken {
    async fn access_token(&self) -> SheetResult<String> {
        Ok(self.0.clone())
    }
}

type TokenFuture =
    Pin<Box<dyn Future<Output = std::result::Result<AccessToken, yup_oauth2::Error>> + Send>>;

/// Tokens minted from a service-account key
///
/// The underlying authenticator caches tokens and refreshes them on expiry.
pub struct ServiceAccountTokens {
    fetch: Box<dyn Fn() -> TokenFuture + Send + Sync>,
}

impl ServiceAccountTokens {
    /// Build an authenticator for the key
    pub async fn new(key: ServiceAccountKey) -> SheetResult<Self> {
        let auth = ServiceAccountAuthenticator::builder(key)
            .build()
            .await
            .map_err(|e| SheetError::Auth(e.to_string()))?;
        let auth = Arc::new(auth);

        let fetch = move || {
            let auth = Arc::clone(&auth);
            Box::pin(async move { auth.token(SCOPES).await }) as TokenFuture
        };

        Ok(Self {
            fetch: Box::new(fetch),
        })
    }
}

#[async_trait]
impl TokenProvider for ServiceAccountTokens {
    async fn access_token(&self) -> SheetResult<String> {
        let token = (self.fetch)()
            .await
            .map_err(|e| SheetError::Auth(e.to_string()))?;
        token
            .token()
            .map(str::to_string)
            .ok_or_else(|| SheetError::Auth("token response carried no access token".to_string()))
    }
}

/// Base URLs for the Google APIs
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    pub drive: String,
    pub sheets: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            drive: "https://www.googleapis.com".to_string(),
            sheets: "https://sheets.googleapis.com".to_string(),
        }
    }
}

impl Endpoints {
    /// Point both APIs at the same base URL
    pub fn single(base: impl Into<String>) -> Self {
        let base = base.into();
        Self {
            drive: base.clone(),
            sheets: base,
        }
    }
}

#[derive(Deserialize)]
struct FileList {
    #[serde(default)]
    files: Vec<DriveFile>,
}

#[derive(Deserialize)]
struct DriveFile {
    id: String,
    name: String,
}

#[derive(Deserialize)]
struct SpreadsheetMeta {
    #[serde(default)]
    sheets: Vec<SheetMeta>,
}

#[derive(Deserialize)]
struct SheetMeta {
    properties: SheetProperties,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct SheetProperties {
    #[serde(default)]
    sheet_id: i64,
    title: String,
}

#[derive(Deserialize)]
struct ValueRange {
    #[serde(default)]
    values: Vec<Vec<serde_json::Value>>,
}

#[derive(Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Deserialize)]
struct ErrorBody {
    message: String,
}

/// Spreadsheet source backed by the Google REST APIs
pub struct GoogleSheets {
    client: reqwest::Client,
    tokens: Arc<dyn TokenProvider>,
    endpoints: Endpoints,
}

impl GoogleSheets {
    /// Create a client against the public Google endpoints
    pub fn new(tokens: Arc<dyn TokenProvider>) -> Self {
        Self::with_endpoints(tokens, Endpoints::default())
    }

    pub fn with_endpoints(tokens: Arc<dyn TokenProvider>, endpoints: Endpoints) -> Self {
        Self {
            client: reqwest::Client::new(),
            tokens,
            endpoints,
        }
    }

    /// Authenticate with a service-account key and verify a token can be issued
    pub async fn authorize(key: ServiceAccountKey) -> SheetResult<Self> {
        let tokens = ServiceAccountTokens::new(key).await?;
        tokens.access_token().await?;
        Ok(Self::new(Arc::new(tokens)))
    }

    /// Load the service-account key from `source` and authenticate with it
    pub async fn from_credentials(
        source: CredentialSource,
        options: &CredentialOptions,
    ) -> Result<Self> {
        let key = load_service_account_key(source, options).await?;
        Ok(Self::authorize(key).await?)
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        url: &str,
        query: &[(&str, &str)],
    ) -> SheetResult<T> {
        let token = self.tokens.access_token().await?;

        tracing::debug!("GET {}", url);
        let response = self
            .client
            .get(url)
            .bearer_auth(token)
            .query(query)
            .send()
            .await?;

        let status = response.status();
        tracing::debug!("Upstream response status: {}", status);

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(SheetError::Upstream {
                status: status.as_u16(),
                message: upstream_message(&body),
            });
        }

        response
            .json::<T>()
            .await
            .map_err(|e| SheetError::Malformed(e.to_string()))
    }
}

#[async_trait]
impl SheetSource for GoogleSheets {
    async fn open_spreadsheet(&self, title: &str) -> SheetResult<SpreadsheetHandle> {
        let url = format!("{}/drive/v3/files", self.endpoints.drive);
        let q = spreadsheet_query(title);
        let list: FileList = self
            .get_json(
                &url,
                &[
                    ("q", q.as_str()),
                    ("fields", "files(id,name)"),
                    ("supportsAllDrives", "true"),
                    ("includeItemsFromAllDrives", "true"),
                ],
            )
            .await?;

        list.files
            .into_iter()
            .next()
            .map(|file| SpreadsheetHandle {
                id: file.id,
                title: file.name,
            })
            .ok_or_else(|| SheetError::SpreadsheetNotFound(title.to_string()))
    }

    async fn worksheet(
        &self,
        spreadsheet: &SpreadsheetHandle,
        title: &str,
    ) -> SheetResult<WorksheetHandle> {
        let url = format!(
            "{}/v4/spreadsheets/{}",
            self.endpoints.sheets, spreadsheet.id
        );
        let meta: SpreadsheetMeta = self
            .get_json(&url, &[("fields", "sheets.properties(sheetId,title,index)")])
            .await?;

        meta.sheets
            .into_iter()
            .map(|s| s.properties)
            .find(|p| p.title == title)
            .map(|p| WorksheetHandle {
                spreadsheet_id: spreadsheet.id.clone(),
                sheet_id: p.sheet_id,
                title: p.title,
            })
            .ok_or_else(|| SheetError::WorksheetNotFound(title.to_string()))
    }

    async fn records(&self, worksheet: &WorksheetHandle) -> SheetResult<Vec<Row>> {
        let url = format!(
            "{}/v4/spreadsheets/{}/values/{}",
            self.endpoints.sheets,
            worksheet.spreadsheet_id,
            urlencoding::encode(&a1_sheet_range(&worksheet.title))
        );
        let range: ValueRange = self
            .get_json(
                &url,
                &[
                    ("valueRenderOption", "FORMATTED_VALUE"),
                    ("majorDimension", "ROWS"),
                ],
            )
            .await?;

        let values: Vec<Vec<String>> = range
            .values
            .iter()
            .map(|row| row.iter().map(cell_to_string).collect())
            .collect();
        records_from_values(values)
    }
}

/// Drive search query matching a spreadsheet by exact title
fn spreadsheet_query(title: &str) -> String {
    let escaped = title.replace('\\', "\\\\").replace('\'', "\\'");
    format!(
        "name = '{}' and mimeType = '{}' and trashed = false",
        escaped, SPREADSHEET_MIME_TYPE
    )
}

/// A1 range covering a whole worksheet
fn a1_sheet_range(title: &str) -> String {
    format!("'{}'", title.replace('\'', "''"))
}

/// Pull the message out of a Google error envelope, falling back to the raw body
fn upstream_message(body: &str) -> String {
    serde_json::from_str::<ErrorEnvelope>(body)
        .map(|e| e.error.message)
        .unwrap_or_else(|_| body.trim().to_string())
}
