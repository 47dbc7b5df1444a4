//! Request descriptors and deferred calls.
//!
//! Every service method returns a [`Call`] instead of sending anything. The
//! caller decides how to run it:
//!
//! ```rust,no_run
//! # use appwrite_sdk::Client;
//! # async fn run(client: Client) -> appwrite_sdk::core::Result<()> {
//! let account = client.account()?;
//!
//! // Await it directly.
//! let user = account.get().await?;
//!
//! // Or hand it to the runtime and pick the result up later.
//! let handle = account.get().spawn();
//! let same_user = handle.await?;
//! # Ok(())
//! # }
//! ```

use crate::core::codec::{self, Decoder};
use crate::core::transport::Transport;
use crate::core::{Error, Result};
use bytes::Bytes;
use futures::future::BoxFuture;
use futures::stream::BoxStream;
use futures::StreamExt;
use reqwest::Method;
use serde::Serialize;
use std::fmt;
use std::future::{Future, IntoFuture};
use std::pin::Pin;
use std::task::{Context, Poll};
use tokio::task::JoinHandle;
use url::Url;

/// Body of a request.
#[derive(Debug, Clone)]
pub enum Payload {
    Empty,
    /// Pre-encoded JSON document.
    Json(Bytes),
    /// `application/x-www-form-urlencoded` fields.
    Form(Vec<(String, String)>),
    Multipart(Vec<MultipartField>),
    /// The body could not be encoded; executing the call reports this.
    Rejected(String),
}

#[derive(Debug, Clone)]
pub enum MultipartField {
    Text { name: String, value: String },
    File { name: String, file: InputFile },
}

/// In-memory file for upload endpoints.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputFile {
    pub file_name: String,
    pub mime_type: Option<String>,
    pub data: Bytes,
}

impl InputFile {
    pub fn from_bytes(file_name: impl Into<String>, data: impl Into<Bytes>) -> Self {
        Self {
            file_name: file_name.into(),
            mime_type: None,
            data: data.into(),
        }
    }

    pub fn with_mime_type(mut self, mime_type: impl Into<String>) -> Self {
        self.mime_type = Some(mime_type.into());
        self
    }
}

/// Declarative description of one HTTP operation: method, path template with
/// `{placeholders}`, bound parameters and body.
#[derive(Debug, Clone)]
pub struct Endpoint {
    method: Method,
    path: &'static str,
    path_params: Vec<(&'static str, String)>,
    query: Vec<(String, String)>,
    payload: Payload,
}

impl Endpoint {
    pub fn new(method: Method, path: &'static str) -> Self {
        Self {
            method,
            path,
            path_params: Vec::new(),
            query: Vec::new(),
            payload: Payload::Empty,
        }
    }

    pub fn get(path: &'static str) -> Self {
        Self::new(Method::GET, path)
    }

    pub fn post(path: &'static str) -> Self {
        Self::new(Method::POST, path)
    }

    pub fn put(path: &'static str) -> Self {
        Self::new(Method::PUT, path)
    }

    pub fn patch(path: &'static str) -> Self {
        Self::new(Method::PATCH, path)
    }

    pub fn delete(path: &'static str) -> Self {
        Self::new(Method::DELETE, path)
    }

    /// Binds the value of a `{name}` placeholder.
    pub fn path_param(mut self, name: &'static str, value: impl Into<String>) -> Self {
        self.path_params.push((name, value.into()));
        self
    }

    pub fn query(mut self, name: impl Into<String>, value: impl ToString) -> Self {
        self.query.push((name.into(), value.to_string()));
        self
    }

    /// Adds the parameter only when a value is present.
    pub fn query_opt<V: ToString>(self, name: &str, value: Option<V>) -> Self {
        match value {
            Some(value) => self.query(name, value),
            None => self,
        }
    }

    /// Repeats `name[]` once per value, the array notation the API expects.
    pub fn query_list<V: ToString>(mut self, name: &str, values: &[V]) -> Self {
        let key = format!("{}[]", name);
        for value in values {
            self.query.push((key.clone(), value.to_string()));
        }
        self
    }

    pub fn json<B: Serialize + ?Sized>(mut self, body: &B) -> Self {
        self.payload = match codec::encode_json(body) {
            Ok(bytes) => Payload::Json(Bytes::from(bytes)),
            Err(e) => Payload::Rejected(e.to_string()),
        };
        self
    }

    pub fn form_field(mut self, name: impl Into<String>, value: impl ToString) -> Self {
        let field = (name.into(), value.to_string());
        match &mut self.payload {
            Payload::Form(fields) => fields.push(field),
            _ => self.payload = Payload::Form(vec![field]),
        }
        self
    }

    pub fn text_part(self, name: impl Into<String>, value: impl ToString) -> Self {
        self.part(MultipartField::Text {
            name: name.into(),
            value: value.to_string(),
        })
    }

    pub fn file_part(self, name: impl Into<String>, file: InputFile) -> Self {
        self.part(MultipartField::File {
            name: name.into(),
            file,
        })
    }

    fn part(mut self, field: MultipartField) -> Self {
        match &mut self.payload {
            Payload::Multipart(fields) => fields.push(field),
            _ => self.payload = Payload::Multipart(vec![field]),
        }
        self
    }

    pub fn method(&self) -> &Method {
        &self.method
    }

    pub fn path_template(&self) -> &'static str {
        self.path
    }

    pub fn payload(&self) -> &Payload {
        &self.payload
    }

    /// Resolves the path template and query against `base`.
    ///
    /// Each placeholder becomes exactly one percent-encoded segment, so ids
    /// containing `/` or `?` cannot escape their position. The values `.`
    /// and `..` are rejected.
    pub fn url(&self, base: &Url) -> Result<Url> {
        let mut url = base.clone();
        {
            let mut segments = url.path_segments_mut().map_err(|_| {
                Error::InvalidArgument(format!("endpoint {} cannot be a base URL", base))
            })?;
            segments.pop_if_empty();

            for segment in self.path.split('/').filter(|s| !s.is_empty()) {
                match placeholder(segment) {
                    Some(name) => {
                        let value = self
                            .path_params
                            .iter()
                            .find(|(param, _)| *param == name)
                            .map(|(_, value)| value)
                            .ok_or_else(|| {
                                Error::InvalidArgument(format!(
                                    "no value bound for path parameter {{{}}} in {}",
                                    name, self.path
                                ))
                            })?;
                        if value.trim().is_empty() {
                            return Err(Error::InvalidArgument(format!(
                                "path parameter {{{}}} cannot be empty",
                                name
                            )));
                        }
                        // `.` and `..` would be dropped as dot-segments.
                        if value == "." || value == ".." {
                            return Err(Error::InvalidArgument(format!(
                                "path parameter {{{}}} cannot be {:?}",
                                name, value
                            )));
                        }
                        segments.push(value);
                    }
                    None => {
                        segments.push(segment);
                    }
                }
            }
        }

        if !self.query.is_empty() {
            url.query_pairs_mut().extend_pairs(&self.query);
        }
        Ok(url)
    }
}

fn placeholder(segment: &str) -> Option<&str> {
    segment.strip_prefix('{')?.strip_suffix('}')
}

/// A request that has been described but not sent.
///
/// A `Call` is cheap to clone; each clone sends its own request when run.
pub struct Call<T> {
    transport: Transport,
    endpoint: Endpoint,
    decode: Decoder<T>,
}

impl<T> Clone for Call<T> {
    fn clone(&self) -> Self {
        Self {
            transport: self.transport.clone(),
            endpoint: self.endpoint.clone(),
            decode: self.decode,
        }
    }
}

impl<T> fmt::Debug for Call<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Call")
            .field("method", &self.endpoint.method)
            .field("path", &self.endpoint.path)
            .finish_non_exhaustive()
    }
}

impl<T: Send + 'static> Call<T> {
    pub fn new(transport: Transport, endpoint: Endpoint, decode: Decoder<T>) -> Self {
        Self {
            transport,
            endpoint,
            decode,
        }
    }

    pub fn endpoint(&self) -> &Endpoint {
        &self.endpoint
    }

    /// Sends the request and decodes the response.
    pub async fn execute(self) -> Result<T> {
        let body = self.transport.execute(&self.endpoint).await?;
        (self.decode)(body)
    }

    /// Runs the call in the background on the current tokio runtime.
    ///
    /// # Panics
    ///
    /// Panics if called outside a tokio runtime.
    pub fn spawn(self) -> CallHandle<T> {
        CallHandle {
            inner: tokio::spawn(self.execute()),
        }
    }

    /// Runs the call to completion on a private single-threaded runtime.
    ///
    /// Meant for synchronous callers; calling it from inside an async
    /// context panics, as with any nested tokio runtime.
    pub fn execute_blocking(self) -> Result<T> {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(Error::Runtime)?;
        runtime.block_on(self.execute())
    }
}

impl Call<Bytes> {
    /// Sends the request and yields the response body as it arrives instead
    /// of buffering it.
    pub async fn execute_stream(self) -> Result<BoxStream<'static, Result<Bytes>>> {
        let response = self.transport.open(&self.endpoint).await?;
        Ok(response
            .bytes_stream()
            .map(|chunk| chunk.map_err(Error::from))
            .boxed())
    }
}

impl<T: Send + 'static> IntoFuture for Call<T> {
    type Output = Result<T>;
    type IntoFuture = BoxFuture<'static, Result<T>>;

    fn into_future(self) -> Self::IntoFuture {
        Box::pin(self.execute())
    }
}

/// Handle to a call running in the background.
///
/// Await it for the result. Dropping it detaches the call; [`abort`](Self::abort)
/// cancels it.
#[derive(Debug)]
pub struct CallHandle<T> {
    inner: JoinHandle<Result<T>>,
}

impl<T> CallHandle<T> {
    pub fn abort(&self) {
        self.inner.abort();
    }

    pub fn is_finished(&self) -> bool {
        self.inner.is_finished()
    }
}

impl<T> Future for CallHandle<T> {
    type Output = Result<T>;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        Pin::new(&mut self.inner).poll(cx).map(|joined| match joined {
            Ok(result) => result,
            Err(e) if e.is_cancelled() => Err(Error::Cancelled),
            Err(e) => std::panic::resume_unwind(e.into_panic()),
        })
    }
}
