//! HTTP transport seam.
//!
//! [`EventClient`](super::EventClient) talks to the network only through
//! [`HttpRequester`], so the retry and classification logic can be driven
//! by a scripted requester in tests.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use url::Url;

use crate::params::RequestParameters;

/// Status and fully-read body of a response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    pub status: StatusCode,
    pub body: String,
}

impl RawResponse {
    pub fn new(status: StatusCode, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }
}

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Failure to obtain a response at all.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("request timed out: {0}")]
    Timeout(#[source] BoxError),

    #[error("connection failed: {0}")]
    Connect(#[source] BoxError),

    #[error("transport error: {0}")]
    Other(#[source] BoxError),
}

impl TransportError {
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Timeout(_))
    }

    pub fn is_connect(&self) -> bool {
        matches!(self, Self::Connect(_))
    }
}

impl From<reqwest::Error> for TransportError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            Self::Timeout(e.into())
        } else if e.is_connect() {
            Self::Connect(e.into())
        } else {
            Self::Other(e.into())
        }
    }
}

/// Something that can issue a `GET` with query parameters and headers.
#[async_trait]
pub trait HttpRequester: Send + Sync {
    async fn get(
        &self,
        url: &Url,
        params: &RequestParameters,
        headers: &[(&'static str, String)],
    ) -> Result<RawResponse, TransportError>;
}

/// [`HttpRequester`] backed by a pooled `reqwest::Client`.
#[derive(Debug, Clone)]
pub struct ReqwestRequester {
    http: Client,
}

impl ReqwestRequester {
    /// Build a requester whose attempts time out after `timeout`.
    pub fn new(timeout: Duration) -> Result<Self, reqwest::Error> {
        let http = Client::builder().timeout(timeout).build()?;
        Ok(Self { http })
    }

    /// Use a preconfigured `reqwest::Client` (e.g. with a proxy).
    pub fn from_client(http: Client) -> Self {
        Self { http }
    }
}

#[async_trait]
impl HttpRequester for ReqwestRequester {
    async fn get(
        &self,
        url: &Url,
        params: &RequestParameters,
        headers: &[(&'static str, String)],
    ) -> Result<RawResponse, TransportError> {
        let mut request = self.http.get(url.clone()).query(params.as_slice());
        for (name, value) in headers {
            request = request.header(*name, value.as_str());
        }

        let response = request.send().await?;
        let status = response.status();
        // Reading the body to the end hands the connection back to the pool.
        let body = response.text().await?;

        Ok(RawResponse { status, body })
    }
}
