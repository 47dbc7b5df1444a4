//! Credentials identifying a project and authorizing requests against it.

use crate::core::{Error, Result, DEFAULT_ENDPOINT};
use secrecy::{ExposeSecret, SecretString};
use std::fmt;
use std::time::Duration;
use url::Url;

pub const ENDPOINT_ENV: &str = "APPWRITE_ENDPOINT";
pub const PROJECT_ID_ENV: &str = "APPWRITE_PROJECT_ID";
pub const API_KEY_ENV: &str = "APPWRITE_API_KEY";

/// Default connection timeout (10 seconds).
pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// Default timeout for a whole exchange, body included (60 seconds).
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

/// Endpoint, project and server API key.
///
/// Values are validated when set and never change afterwards; build a new
/// `Credentials` to switch project or key.
#[derive(Clone)]
pub struct Credentials {
    endpoint: Url,
    project_id: String,
    api_key: SecretString,
}

impl Credentials {
    /// Creates credentials for the default Appwrite Cloud endpoint.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] if either value is blank.
    pub fn new(project_id: impl Into<String>, api_key: impl Into<String>) -> Result<Self> {
        let project_id = project_id.into();
        let api_key = api_key.into();
        require_non_blank("project ID", &project_id)?;
        require_non_blank("API key", &api_key)?;

        Ok(Self {
            endpoint: parse_endpoint(DEFAULT_ENDPOINT)?,
            project_id,
            api_key: SecretString::from(api_key),
        })
    }

    /// Points the credentials at another endpoint, e.g. a self-hosted instance.
    pub fn with_endpoint(mut self, endpoint: &str) -> Result<Self> {
        self.endpoint = parse_endpoint(endpoint)?;
        Ok(self)
    }

    /// Reads `APPWRITE_PROJECT_ID`, `APPWRITE_API_KEY` and the optional
    /// `APPWRITE_ENDPOINT` from the environment.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    pub(crate) fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let project_id = lookup(PROJECT_ID_ENV)
            .ok_or_else(|| Error::InvalidArgument(format!("{} is not set", PROJECT_ID_ENV)))?;
        let api_key = lookup(API_KEY_ENV)
            .ok_or_else(|| Error::InvalidArgument(format!("{} is not set", API_KEY_ENV)))?;

        let credentials = Self::new(project_id, api_key)?;
        match lookup(ENDPOINT_ENV) {
            Some(endpoint) => credentials.with_endpoint(&endpoint),
            None => Ok(credentials),
        }
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    pub fn project_id(&self) -> &str {
        &self.project_id
    }

    pub fn api_key(&self) -> &SecretString {
        &self.api_key
    }

    pub(crate) fn expose_api_key(&self) -> &str {
        self.api_key.expose_secret()
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("endpoint", &self.endpoint.as_str())
            .field("project_id", &self.project_id)
            .field("api_key", &"****")
            .finish()
    }
}

/// HTTP settings applied when a transport is built.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransportOptions {
    pub connect_timeout: Duration,
    /// Upper bound for a whole exchange. `None` disables it, which suits
    /// large downloads.
    pub timeout: Option<Duration>,
}

impl Default for TransportOptions {
    fn default() -> Self {
        Self {
            connect_timeout: DEFAULT_CONNECT_TIMEOUT,
            timeout: Some(DEFAULT_TIMEOUT),
        }
    }
}

pub(crate) fn require_non_blank(what: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(Error::InvalidArgument(format!(
            "{} cannot be null or empty",
            what
        )));
    }
    Ok(())
}

pub(crate) fn parse_endpoint(endpoint: &str) -> Result<Url> {
    require_non_blank("endpoint", endpoint)?;
    let url = Url::parse(endpoint.trim())
        .map_err(|e| Error::InvalidArgument(format!("invalid endpoint URL {:?}: {}", endpoint, e)))?;

    match url.scheme() {
        "http" | "https" if url.has_host() => Ok(url),
        _ => Err(Error::InvalidArgument(format!(
            "endpoint must be an http(s) URL with a host: {}",
            endpoint
        ))),
    }
}
