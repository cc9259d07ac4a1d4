//! Fetch wrapper that always resolves to an [`ApiResponse`].
//!
//! Whatever goes wrong on the way (bad request options, connection failure,
//! timeout, a body that is not an envelope) the caller gets a synthesized
//! failure envelope instead of an error.

use once_cell::sync::Lazy;
use reqwest::header::{HeaderName, HeaderValue, CONTENT_TYPE};
use reqwest::{Client, Method};
use serde::de::DeserializeOwned;
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, warn};

use crate::dto::ApiResponse;
use crate::shape::is_api_response;

pub const NETWORK_ERROR_MESSAGE: &str = "Network error";
pub const MALFORMED_ENVELOPE_MESSAGE: &str = "Malformed response envelope";

static DEFAULT_FETCH: Lazy<ApiFetch> = Lazy::new(ApiFetch::new);

/// Request configuration handed through to the HTTP client untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestOptions {
    pub method: Option<String>,
    pub headers: Vec<(String, String)>,
    pub body: Option<String>,
}

impl RequestOptions {
    pub fn method(method: impl Into<String>) -> Self {
        Self {
            method: Some(method.into()),
            ..Self::default()
        }
    }

    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    pub fn body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self
    }

    /// JSON body plus a matching content-type header.
    pub fn json(self, value: &Value) -> Self {
        self.header(CONTENT_TYPE.as_str(), "application/json")
            .body(value.to_string())
    }
}

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("invalid HTTP method: {0}")]
    InvalidMethod(String),
    #[error("invalid header: {0}")]
    InvalidHeader(String),
    #[error("{0}")]
    Transport(#[from] reqwest::Error),
    #[error("{0}")]
    Decode(#[from] serde_json::Error),
    #[error("{}", MALFORMED_ENVELOPE_MESSAGE)]
    Malformed,
}

/// Envelope-returning HTTP client. Clones share the connection pool.
#[derive(Debug, Clone, Default)]
pub struct ApiFetch {
    client: Client,
}

impl ApiFetch {
    pub fn new() -> Self {
        Self::with_client(Client::new())
    }

    pub fn with_client(client: Client) -> Self {
        Self { client }
    }

    /// Single request; the body is decoded as an envelope and returned as is,
    /// whatever the HTTP status.
    pub async fn fetch<T: DeserializeOwned>(
        &self,
        url: &str,
        options: Option<RequestOptions>,
    ) -> ApiResponse<T> {
        self.run(url, options, false).await
    }

    /// Like [`ApiFetch::fetch`], but rejects bodies missing any envelope key
    /// before decoding.
    pub async fn fetch_checked<T: DeserializeOwned>(
        &self,
        url: &str,
        options: Option<RequestOptions>,
    ) -> ApiResponse<T> {
        self.run(url, options, true).await
    }

    async fn run<T: DeserializeOwned>(
        &self,
        url: &str,
        options: Option<RequestOptions>,
        check_shape: bool,
    ) -> ApiResponse<T> {
        let options = options.unwrap_or_default();
        let method = options.method.clone();

        match self.try_fetch(url, options, check_shape).await {
            Ok(resp) => {
                debug!(url, code = resp.code, success = resp.success, "envelope received");
                resp
            }
            Err(e) => {
                warn!(url, error = %e, "request failed, synthesizing fallback envelope");
                let mut message = e.to_string();
                if message.is_empty() {
                    message = NETWORK_ERROR_MESSAGE.to_string();
                }
                ApiResponse::fallback(method.as_deref(), message)
            }
        }
    }

    async fn try_fetch<T: DeserializeOwned>(
        &self,
        url: &str,
        options: RequestOptions,
        check_shape: bool,
    ) -> Result<ApiResponse<T>, FetchError> {
        let method = match options.method.as_deref() {
            Some(m) if !m.is_empty() => Method::from_bytes(m.as_bytes())
                .map_err(|_| FetchError::InvalidMethod(m.to_string()))?,
            _ => Method::GET,
        };

        let mut req = self.client.request(method, url);
        for (name, value) in &options.headers {
            let name = HeaderName::from_bytes(name.as_bytes())
                .map_err(|_| FetchError::InvalidHeader(name.clone()))?;
            let value = HeaderValue::from_str(value)
                .map_err(|_| FetchError::InvalidHeader(format!("{name}: {value}")))?;
            req = req.header(name, value);
        }
        if let Some(body) = options.body {
            req = req.body(body);
        }

        let bytes = req.send().await?.bytes().await?;

        if check_shape {
            let raw: Value = serde_json::from_slice(&bytes)?;
            if !is_api_response(&raw) {
                return Err(FetchError::Malformed);
            }
            return Ok(serde_json::from_value(raw)?);
        }
        Ok(serde_json::from_slice(&bytes)?)
    }
}

/// [`ApiFetch::fetch`] on a process-wide default client.
pub async fn api_fetch<T: DeserializeOwned>(
    url: &str,
    options: Option<RequestOptions>,
) -> ApiResponse<T> {
    DEFAULT_FETCH.fetch(url, options).await
}
