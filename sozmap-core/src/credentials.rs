//! Service-account credential loading
//!
//! Deployments hand the Google service-account key to the process in a few
//! different ways. [`CredentialSource`] picks the first convention that is set:
//!
//! 1. `SERVICE_ACCOUNT_JSON`: the key JSON itself
//! 2. `GOOGLE_CREDENTIALS`: the key JSON itself, optionally from a local `.env` file
//! 3. `GOOGLE_APPLICATION_CREDENTIALS`: a path to the key file
//!
//! Inline JSON can also be spilled to a temporary file and read back from there,
//! for hosts that inject secrets as env vars but expect a key file on disk.

use crate::error::CredentialError;
use std::path::{Path, PathBuf};
use yup_oauth2::ServiceAccountKey;

pub const SERVICE_ACCOUNT_JSON: &str = "SERVICE_ACCOUNT_JSON";
pub const GOOGLE_CREDENTIALS: &str = "GOOGLE_CREDENTIALS";
pub const GOOGLE_APPLICATION_CREDENTIALS: &str = "GOOGLE_APPLICATION_CREDENTIALS";

/// Default location inline credentials are spilled to
pub const DEFAULT_SPILL_PATH: &str = "/tmp/service_account.json";

/// Where the service-account key comes from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CredentialSource {
    /// Key JSON held in an environment variable
    InlineJson { var: &'static str, json: String },

    /// Key file on disk
    File(PathBuf),
}

impl CredentialSource {
    /// Resolve the credential source from the process environment
    ///
    /// A `.env` file in the working directory is loaded first. Variables that are
    /// already set are not overridden by it.
    pub fn from_env() -> Result<Self, CredentialError> {
        load_dotenv()?;
        Self::resolve(|name| std::env::var(name).ok())
    }

    /// Resolve the credential source using the given variable lookup
    pub fn resolve<F>(lookup: F) -> Result<Self, CredentialError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let lookup = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        for var in [SERVICE_ACCOUNT_JSON, GOOGLE_CREDENTIALS] {
            if let Some(json) = lookup(var) {
                return Ok(Self::InlineJson { var, json });
            }
        }

        lookup(GOOGLE_APPLICATION_CREDENTIALS)
            .map(|path| Self::File(PathBuf::from(path)))
            .ok_or(CredentialError::Missing)
    }

    /// Human-readable origin of the credentials, safe to log
    pub fn describe(&self) -> String {
        match self {
            Self::InlineJson { var, .. } => format!("${}", var),
            Self::File(path) => path.display().to_string(),
        }
    }

    /// Write inline JSON to `path` and return a source reading from that file
    ///
    /// File sources are returned unchanged.
    pub async fn spill(self, path: &Path) -> Result<Self, CredentialError> {
        match self {
            Self::InlineJson { json, .. } => {
                if let Some(parent) = path.parent() {
                    tokio::fs::create_dir_all(parent)
                        .await
                        .map_err(|source| CredentialError::Io {
                            path: parent.to_path_buf(),
                            source,
                        })?;
                }
                tokio::fs::write(path, json.as_bytes())
                    .await
                    .map_err(|source| CredentialError::Io {
                        path: path.to_path_buf(),
                        source,
                    })?;
                tracing::debug!("Wrote service account key to {}", path.display());
                Ok(Self::File(path.to_path_buf()))
            }
            file @ Self::File(_) => Ok(file),
        }
    }

    /// Read and parse the service-account key
    pub async fn load(&self) -> Result<ServiceAccountKey, CredentialError> {
        match self {
            Self::InlineJson { var, json } => {
                yup_oauth2::parse_service_account_key(json).map_err(|source| {
                    CredentialError::InvalidJson {
                        source_name: format!("${}", var),
                        source,
                    }
                })
            }
            Self::File(path) => {
                let data = tokio::fs::read(path)
                    .await
                    .map_err(|source| CredentialError::Io {
                        path: path.clone(),
                        source,
                    })?;
                yup_oauth2::parse_service_account_key(data).map_err(|source| {
                    CredentialError::InvalidJson {
                        source_name: path.display().to_string(),
                        source,
                    }
                })
            }
        }
    }
}

/// Load a `.env` file from the working directory or one of its parents
///
/// A missing file is fine. A file that exists but cannot be read or parsed is
/// an error, since the credentials it holds would otherwise be reported missing.
pub fn load_dotenv() -> Result<Option<PathBuf>, CredentialError> {
    let loaded = check_dotenv(dotenvy::dotenv())?;
    if let Some(path) = &loaded {
        tracing::debug!("Loaded environment from {}", path.display());
    }
    Ok(loaded)
}

fn check_dotenv(result: dotenvy::Result<PathBuf>) -> Result<Option<PathBuf>, CredentialError> {
    match result {
        Ok(path) => Ok(Some(path)),
        Err(e) if e.not_found() => Ok(None),
        Err(source) => Err(CredentialError::EnvFile { source }),
    }
}

/// Options controlling how credentials are materialized
#[derive(Debug, Clone, Default)]
pub struct CredentialOptions {
    /// Spill inline JSON to this file before reading it
    pub spill_path: Option<PathBuf>,
}

impl CredentialOptions {
    /// Read `SOZMAP_SPILL_CREDENTIALS` and `SOZMAP_CREDENTIALS_PATH`
    pub fn from_env() -> Self {
        Self::resolve(|name| std::env::var(name).ok())
    }

    pub fn resolve<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let enabled = lookup("SOZMAP_SPILL_CREDENTIALS")
            .map(|v| matches!(v.trim().to_lowercase().as_str(), "1" | "true" | "yes"))
            .unwrap_or(false);

        let spill_path = enabled.then(|| {
            lookup("SOZMAP_CREDENTIALS_PATH")
                .filter(|p| !p.trim().is_empty())
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_SPILL_PATH))
        });

        Self { spill_path }
    }
}

/// Resolve, optionally spill, and parse the service-account key
pub async fn load_service_account_key(
    source: CredentialSource,
    options: &CredentialOptions,
) -> Result<ServiceAccountKey, CredentialError> {
    let source = match &options.spill_path {
        Some(path) => source.spill(path).await?,
        None => source,
    };
    tracing::info!("Loading service account credentials from {}", source.describe());
    source.load().await
}
