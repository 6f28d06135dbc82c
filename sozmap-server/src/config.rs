//! Server configuration from the environment

use anyhow::{Context, Result};
use sozmap_core::credentials::{CredentialOptions, CredentialSource};
use sozmap_core::{DEFAULT_SPREADSHEET, DEFAULT_WORKSHEET};
use std::net::{IpAddr, Ipv4Addr};

pub const DEFAULT_PORT: u16 = 5000;

/// Everything the server needs before it can start
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Listen address (`HOST`)
    pub host: IpAddr,

    /// Listen port (`PORT`)
    pub port: u16,

    /// Spreadsheet title (`SOZMAP_SPREADSHEET`)
    pub spreadsheet: String,

    /// Worksheet title (`SOZMAP_WORKSHEET`)
    pub worksheet: String,

    /// Where the service-account key comes from
    pub credentials: CredentialSource,

    pub credential_options: CredentialOptions,
}

impl ServerConfig {
    /// Read configuration from the process environment
    ///
    /// Fails when no credential variable is set, so the server never binds
    /// without a way to authenticate.
    pub fn from_env() -> Result<Self> {
        let credentials = CredentialSource::from_env()?;
        Self::resolve(credentials, |name| std::env::var(name).ok())
    }

    pub fn resolve<F>(credentials: CredentialSource, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let lookup = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        let port = match lookup("PORT") {
            Some(port) => port
                .trim()
                .parse()
                .with_context(|| format!("PORT must be a port number, got '{}'", port))?,
            None => DEFAULT_PORT,
        };

        let host = match lookup("HOST") {
            Some(host) => host
                .trim()
                .parse()
                .with_context(|| format!("HOST must be an IP address, got '{}'", host))?,
            None => IpAddr::V4(Ipv4Addr::UNSPECIFIED),
        };

        Ok(Self {
            host,
            port,
            spreadsheet: lookup("SOZMAP_SPREADSHEET")
                .unwrap_or_else(|| DEFAULT_SPREADSHEET.to_string()),
            worksheet: lookup("SOZMAP_WORKSHEET").unwrap_or_else(|| DEFAULT_WORKSHEET.to_string()),
            credentials,
            credential_options: CredentialOptions::resolve(lookup),
        })
    }
}
