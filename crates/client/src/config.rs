use std::env;

use crate::error::{ClientError, Result};

/// Default host when `EXPTRACK_HOST` is unset.
pub const DEFAULT_HOST: &str = "localhost:3000";

/// Client configuration loaded from environment variables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// URL scheme, `http` or `https` (default: "http")
    pub scheme: String,
    /// Host and optional port of the tracking service (default: "localhost:3000")
    pub host: String,
    /// Account email sent with every request when set
    pub email: Option<String>,
    /// Developer key sent with every request when set
    pub dev_key: Option<String>,
}

impl Config {
    /// Builds a configuration for `host`. A leading `http://` or `https://`
    /// overrides the default scheme.
    pub fn new(host: impl AsRef<str>) -> Result<Self> {
        Self::with_default_scheme(host, "http")
    }

    /// Builds a configuration for `host`, using `default_scheme` unless the
    /// host carries its own `scheme://` prefix.
    pub fn with_default_scheme(host: impl AsRef<str>, default_scheme: &str) -> Result<Self> {
        let (scheme, host) = split_scheme(host.as_ref(), default_scheme)?;
        Ok(Self {
            scheme,
            host,
            email: None,
            dev_key: None,
        })
    }

    /// Load configuration from environment variables.
    ///
    /// Environment variables:
    /// - `EXPTRACK_HOST` - Service host, optionally prefixed with a scheme (default: "localhost:3000")
    /// - `EXPTRACK_SCHEME` - Scheme used when the host has none (default: "http")
    /// - `EXPTRACK_EMAIL` - Account email (optional)
    /// - `EXPTRACK_DEV_KEY` - Developer key (optional)
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let default_scheme = lookup("EXPTRACK_SCHEME").unwrap_or_else(|| "http".to_string());
        let host = lookup("EXPTRACK_HOST").unwrap_or_else(|| DEFAULT_HOST.to_string());
        Ok(Self {
            email: lookup("EXPTRACK_EMAIL").filter(|v| !v.trim().is_empty()),
            dev_key: lookup("EXPTRACK_DEV_KEY").filter(|v| !v.trim().is_empty()),
            ..Self::with_default_scheme(&host, &default_scheme)?
        })
    }

    /// Sets the credentials sent with every request.
    pub fn with_credentials(mut self, email: impl Into<String>, dev_key: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self.dev_key = Some(dev_key.into());
        self
    }

    /// Auth headers for the configured credentials.
    ///
    /// Empty unless both the email and the developer key are set.
    pub fn auth_headers(&self) -> Vec<(String, String)> {
        match (&self.email, &self.dev_key) {
            (Some(email), Some(dev_key)) => vec![
                ("Grpc-Metadata-email".to_string(), email.clone()),
                ("Grpc-Metadata-developer_key".to_string(), dev_key.clone()),
                ("Grpc-Metadata-source".to_string(), "PythonClient".to_string()),
            ],
            _ => Vec::new(),
        }
    }
}

/// Splits an optional `scheme://` prefix off `host`.
fn split_scheme(host: &str, default_scheme: &str) -> Result<(String, String)> {
    let (scheme, rest) = match host.split_once("://") {
        Some((scheme, rest)) => (scheme, rest),
        None => (default_scheme, host),
    };
    let scheme = scheme.to_ascii_lowercase();
    if scheme != "http" && scheme != "https" {
        return Err(ClientError::Config(format!("unsupported scheme: {scheme}")));
    }
    let rest = rest.trim_end_matches('/');
    if rest.is_empty() {
        return Err(ClientError::Config("host cannot be empty".to_string()));
    }
    Ok((scheme, rest.to_string()))
}
