use crate::core::config::Credentials;
use crate::core::{Error, Result};
use http::Extensions;
use reqwest::header::{self, HeaderMap, HeaderName, HeaderValue};
use reqwest::{Request, Response};
use reqwest_middleware::{Middleware, Next};

pub const PROJECT_HEADER: &str = "x-appwrite-project";
pub const KEY_HEADER: &str = "x-appwrite-key";

const JSON: &str = "application/json";

/// Stamps the project and key headers, plus the JSON content type, on every
/// outgoing request.
///
/// Header values are checked once when the middleware is built, so sending
/// never fails on them.
#[derive(Clone)]
pub struct IdentityHeaders {
    project: HeaderValue,
    key: HeaderValue,
}

impl IdentityHeaders {
    pub fn new(credentials: &Credentials) -> Result<Self> {
        let project = HeaderValue::from_str(credentials.project_id()).map_err(|_| {
            Error::InvalidArgument("project ID is not a valid header value".to_string())
        })?;
        let mut key = HeaderValue::from_str(credentials.expose_api_key()).map_err(|_| {
            Error::InvalidArgument("API key is not a valid header value".to_string())
        })?;
        key.set_sensitive(true);

        Ok(Self { project, key })
    }

    pub(crate) fn apply(&self, headers: &mut HeaderMap) {
        headers.insert(HeaderName::from_static(PROJECT_HEADER), self.project.clone());
        headers.insert(HeaderName::from_static(KEY_HEADER), self.key.clone());

        if !keeps_content_type(headers.get(header::CONTENT_TYPE)) {
            headers.insert(header::CONTENT_TYPE, HeaderValue::from_static(JSON));
        }
    }
}

/// Multipart and form bodies carry their own content type (the multipart
/// boundary lives in it), everything else is sent as JSON.
pub(crate) fn keeps_content_type(current: Option<&HeaderValue>) -> bool {
    let Some(value) = current.and_then(|v| v.to_str().ok()) else {
        return false;
    };
    let essence = value
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();

    essence == "multipart/form-data" || essence == "application/x-www-form-urlencoded"
}

#[async_trait::async_trait]
impl Middleware for IdentityHeaders {
    async fn handle(
        &self,
        mut req: Request,
        extensions: &mut Extensions,
        next: Next<'_>,
    ) -> reqwest_middleware::Result<Response> {
        self.apply(req.headers_mut());
        next.run(req, extensions).await
    }
}
