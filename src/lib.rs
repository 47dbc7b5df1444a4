//! Typed client for the Appwrite REST API.
//!
//! ```rust,no_run
//! use appwrite_sdk::Client;
//!
//! # async fn run() -> appwrite_sdk::core::Result<()> {
//! let mut client = Client::new();
//! client
//!     .set_endpoint("https://cloud.appwrite.io/v1")?
//!     .set_project("my-project")?
//!     .set_key("my-server-key")?;
//!
//! let databases = client.databases()?;
//! let list = databases.list_databases().await?;
//! println!("{} databases", list.total);
//! # Ok(())
//! # }
//! ```

#[cfg(feature = "account")]
pub mod account;
pub mod core;
#[cfg(feature = "databases")]
pub mod databases;
#[cfg(feature = "functions")]
pub mod functions;
#[cfg(feature = "storage")]
pub mod storage;
#[cfg(feature = "teams")]
pub mod teams;


pub use crate::core::call::{Call, CallHandle, Endpoint, InputFile};
pub use crate::core::config::{Credentials, TransportOptions};
pub use crate::core::transport::Transport;
pub use crate::core::{Error, Result};

use crate::core::config::{parse_endpoint, require_non_blank};
use crate::core::DEFAULT_ENDPOINT;
use secrecy::{ExposeSecret, SecretString};
use url::Url;

/// A resource group whose operations are bound to a transport.
pub trait Service: Sized {
    fn from_transport(transport: Transport) -> Self;
}

/// Entry point of the SDK.
///
/// Configure it with the fluent setters or from a [`Credentials`] value, then
/// acquire service handles. Every successful setter rebuilds the transport;
/// handles acquired earlier keep the transport (and headers) they were
/// created with, so re-acquire them after changing credentials.
#[derive(Clone)]
pub struct Client {
    endpoint: Url,
    project_id: Option<String>,
    api_key: Option<SecretString>,
    options: TransportOptions,
    transport: Option<Transport>,
}

impl Client {
    /// Creates an unconfigured client pointing at Appwrite Cloud.
    pub fn new() -> Self {
        Self {
            endpoint: Url::parse(DEFAULT_ENDPOINT).expect("default endpoint is a valid URL"),
            project_id: None,
            api_key: None,
            options: TransportOptions::default(),
            transport: None,
        }
    }

    /// Creates a ready-to-use client.
    pub fn with_credentials(credentials: Credentials) -> Result<Self> {
        Self::with_options(credentials, TransportOptions::default())
    }

    pub fn with_options(credentials: Credentials, options: TransportOptions) -> Result<Self> {
        let transport = Transport::new(&credentials, options)?;
        Ok(Self {
            endpoint: credentials.endpoint().clone(),
            project_id: Some(credentials.project_id().to_string()),
            api_key: Some(credentials.api_key().clone()),
            options,
            transport: Some(transport),
        })
    }

    pub fn set_endpoint(&mut self, endpoint: &str) -> Result<&mut Self> {
        let endpoint = parse_endpoint(endpoint)?;
        self.update(|next| next.endpoint = endpoint)
    }

    pub fn set_project(&mut self, project_id: &str) -> Result<&mut Self> {
        require_non_blank("project ID", project_id)?;
        self.update(|next| next.project_id = Some(project_id.to_string()))
    }

    pub fn set_key(&mut self, api_key: &str) -> Result<&mut Self> {
        require_non_blank("API key", api_key)?;
        self.update(|next| next.api_key = Some(SecretString::from(api_key)))
    }

    pub fn set_options(&mut self, options: TransportOptions) -> Result<&mut Self> {
        self.update(|next| next.options = options)
    }

    /// Applies a change to a copy, rebuilds its transport and only then
    /// commits, so a failed rebuild leaves `self` untouched.
    fn update(&mut self, change: impl FnOnce(&mut Self)) -> Result<&mut Self> {
        let mut next = self.clone();
        change(&mut next);
        next.rebuild()?;
        *self = next;
        Ok(self)
    }

    fn rebuild(&mut self) -> Result<()> {
        let Some(credentials) = self.credentials() else {
            self.transport = None;
            return Ok(());
        };
        self.transport = Some(Transport::new(&credentials, self.options)?);
        tracing::debug!(
            endpoint = %self.endpoint,
            project = credentials.project_id(),
            "rebuilt transport"
        );
        Ok(())
    }

    /// Current credentials, once both project ID and key are set.
    pub fn credentials(&self) -> Option<Credentials> {
        let project_id = self.project_id.as_deref()?;
        let api_key = self.api_key.as_ref()?;
        Credentials::new(project_id, api_key.expose_secret())
            .ok()?
            .with_endpoint(self.endpoint.as_str())
            .ok()
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    pub fn is_initialized(&self) -> bool {
        self.transport.is_some()
    }

    /// The transport bound to the current credentials.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotInitialized`] until project ID and key are set.
    pub fn transport(&self) -> Result<&Transport> {
        self.transport.as_ref().ok_or(Error::NotInitialized)
    }

    /// Binds a resource group to the current transport.
    pub fn service<S: Service>(&self) -> Result<S> {
        Ok(S::from_transport(self.transport()?.clone()))
    }

    #[cfg(feature = "account")]
    pub fn account(&self) -> Result<account::Account> {
        self.service()
    }

    #[cfg(feature = "databases")]
    pub fn databases(&self) -> Result<databases::Databases> {
        self.service()
    }

    #[cfg(feature = "storage")]
    pub fn storage(&self) -> Result<storage::Storage> {
        self.service()
    }

    #[cfg(feature = "functions")]
    pub fn functions(&self) -> Result<functions::Functions> {
        self.service()
    }

    #[cfg(feature = "teams")]
    pub fn teams(&self) -> Result<teams::Teams> {
        self.service()
    }
}

impl Default for Client {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Client {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Client")
            .field("endpoint", &self.endpoint.as_str())
            .field("project_id", &self.project_id)
            .field("api_key", &self.api_key.as_ref().map(|_| "****"))
            .field("initialized", &self.is_initialized())
            .finish()
    }
}
