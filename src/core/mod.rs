//! Shared plumbing used by every service: credentials, the authenticating
//! transport, request descriptors and the error type.

pub mod call;
pub mod codec;
pub mod config;
pub mod middleware;
pub mod transport;

#[cfg(test)]
mod tests;

use reqwest::StatusCode;
use serde::Deserialize;
use serde_json::{Map, Value};
use thiserror::Error;

/// Endpoint of the Appwrite Cloud API, used when none is configured.
pub const DEFAULT_ENDPOINT: &str = "https://cloud.appwrite.io/v1";

/// Free-form key/value preferences stored on users and teams.
pub type Preferences = Map<String, Value>;

/// Errors returned by the SDK.
#[derive(Error, Debug)]
pub enum Error {
    /// A configuration value was blank or malformed.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    /// A service was requested before the project ID and API key were set.
    #[error("client not initialized: set the project ID and API key first")]
    NotInitialized,
    /// The exchange failed before a response arrived (connect, DNS, TLS, timeout).
    #[error("HTTP request failed: {0}")]
    Transport(#[from] reqwest_middleware::Error),
    /// The server answered with a non-2xx status.
    #[error("API error {status}: {body}")]
    Api { status: StatusCode, body: String },
    /// A 2xx response body did not match the expected shape.
    #[error("failed to decode response body: {source}")]
    Deserialization {
        source: serde_json::Error,
        body: String,
    },
    /// The request body could not be encoded.
    #[error("failed to encode request body: {0}")]
    Serialization(String),
    /// A spawned call was aborted before it completed.
    #[error("call was cancelled")]
    Cancelled,
    /// The runtime backing a blocking call could not be started.
    #[error("failed to start runtime: {0}")]
    Runtime(#[source] std::io::Error),
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        Error::Transport(reqwest_middleware::Error::Reqwest(err))
    }
}

pub type Result<T> = std::result::Result<T, Error>;

/// Error payload Appwrite sends alongside non-2xx responses.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ApiErrorBody {
    pub message: String,
    pub code: u16,
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub version: Option<String>,
}

impl Error {
    /// HTTP status of an [`Error::Api`] failure.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Error::Api { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn is_transport(&self) -> bool {
        matches!(self, Error::Transport(_))
    }

    pub fn is_configuration(&self) -> bool {
        matches!(self, Error::InvalidArgument(_) | Error::NotInitialized)
    }

    /// Parses the raw body of an [`Error::Api`] failure as an Appwrite error
    /// document. Returns `None` for other variants or foreign bodies.
    pub fn api_error(&self) -> Option<ApiErrorBody> {
        match self {
            Error::Api { body, .. } => serde_json::from_str(body).ok(),
            _ => None,
        }
    }
}
