//! The authenticating transport every service sends through.

use crate::core::call::{Call, Endpoint, MultipartField, Payload};
use crate::core::codec::{self, Decoder};
use crate::core::config::{Credentials, TransportOptions};
use crate::core::middleware::IdentityHeaders;
use crate::core::{Error, Result};
use bytes::Bytes;
use reqwest::header;
use reqwest::multipart::{Form, Part};
use reqwest::Client;
use reqwest_middleware::{ClientBuilder, ClientWithMiddleware};
use serde::de::DeserializeOwned;
use url::Url;

/// HTTP client bound to one set of credentials.
///
/// Cloning is cheap and shares the connection pool. A transport never
/// changes once built: new credentials mean a new transport, so requests
/// already in flight keep the headers they started with.
#[derive(Clone)]
pub struct Transport {
    client: ClientWithMiddleware,
    endpoint: Url,
    project_id: String,
}

impl Transport {
    pub fn new(credentials: &Credentials, options: TransportOptions) -> Result<Self> {
        let mut builder = Client::builder().connect_timeout(options.connect_timeout);
        if let Some(timeout) = options.timeout {
            builder = builder.timeout(timeout);
        }
        Self::with_http_client(credentials, builder.build()?)
    }

    /// Builds the transport on top of a caller-supplied `reqwest::Client`,
    /// e.g. one configured with a proxy.
    pub fn with_http_client(credentials: &Credentials, http: Client) -> Result<Self> {
        let client = ClientBuilder::new(http)
            .with(IdentityHeaders::new(credentials)?)
            .build();

        Ok(Self {
            client,
            endpoint: credentials.endpoint().clone(),
            project_id: credentials.project_id().to_string(),
        })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    pub fn project_id(&self) -> &str {
        &self.project_id
    }

    pub fn call<T: Send + 'static>(&self, endpoint: Endpoint, decode: Decoder<T>) -> Call<T> {
        Call::new(self.clone(), endpoint, decode)
    }

    /// A call whose 2xx body is decoded as JSON into `T`.
    pub fn json<T: DeserializeOwned + Send + 'static>(&self, endpoint: Endpoint) -> Call<T> {
        self.call(endpoint, codec::decode_json::<T>)
    }

    /// A call whose 2xx body is ignored.
    pub fn empty(&self, endpoint: Endpoint) -> Call<()> {
        self.call(endpoint, codec::decode_empty)
    }

    /// A call returning the raw 2xx body.
    pub fn bytes(&self, endpoint: Endpoint) -> Call<Bytes> {
        self.call(endpoint, codec::decode_bytes)
    }

    /// Performs one exchange and returns the body of a 2xx response.
    pub async fn execute(&self, endpoint: &Endpoint) -> Result<Bytes> {
        let response = self.open(endpoint).await?;
        Ok(response.bytes().await?)
    }

    /// Performs one exchange and returns the 2xx response with its body
    /// unread. Non-2xx responses are drained into [`Error::Api`].
    pub(crate) async fn open(&self, endpoint: &Endpoint) -> Result<reqwest::Response> {
        let url = endpoint.url(&self.endpoint)?;
        let request = self.client.request(endpoint.method().clone(), url.clone());

        let request = match endpoint.payload() {
            Payload::Empty => request,
            Payload::Json(body) => request
                .header(header::CONTENT_TYPE, "application/json")
                .body(body.clone()),
            Payload::Form(fields) => {
                let body = url::form_urlencoded::Serializer::new(String::new())
                    .extend_pairs(fields)
                    .finish();
                request
                    .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
                    .body(body)
            }
            Payload::Multipart(fields) => request.multipart(multipart_form(fields)?),
            Payload::Rejected(reason) => return Err(Error::Serialization(reason.clone())),
        };

        tracing::debug!(method = %endpoint.method(), path = url.path(), "sending request");
        let response = request.send().await?;
        let status = response.status();
        tracing::debug!(method = %endpoint.method(), path = url.path(), status = status.as_u16(), "received response");

        if !status.is_success() {
            let body = response.text().await?;
            return Err(Error::Api { status, body });
        }
        Ok(response)
    }
}

fn multipart_form(fields: &[MultipartField]) -> Result<Form> {
    let mut form = Form::new();
    for field in fields {
        form = match field {
            MultipartField::Text { name, value } => form.text(name.clone(), value.clone()),
            MultipartField::File { name, file } => {
                let mut part = Part::bytes(file.data.to_vec()).file_name(file.file_name.clone());
                if let Some(mime) = &file.mime_type {
                    part = part.mime_str(mime).map_err(|_| {
                        Error::InvalidArgument(format!("invalid MIME type: {}", mime))
                    })?;
                }
                form.part(name.clone(), part)
            }
        };
    }
    Ok(form)
}
