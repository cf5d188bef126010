//! HTTP client for the Adjust S2S event API.
//!
//! Gated behind the `client` cargo feature so downstream crates that only
//! need the shared types do not pull in `reqwest`.

mod classify;
mod event;
mod retry;
mod transport;

pub use classify::classify;
pub use event::EventClient;
pub use retry::retry;
pub use transport::{HttpRequester, RawResponse, ReqwestRequester, TransportError};

use reqwest::StatusCode;

use crate::validation::ValidationError;

/// Errors produced by [`EventClient`].
///
/// Every response-derived variant carries the raw response body verbatim.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// Event data or event token was rejected before any request was made.
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),

    /// HTTP 400.
    #[error("bad event state: {0}")]
    BadEventState(String),

    /// HTTP 401.
    #[error("authorization failed: {0}")]
    Authorization(String),

    /// HTTP 403.
    #[error("app inactive: {0}")]
    AppInactive(String),

    /// HTTP 404.
    #[error("app token not found: {0}")]
    AppTokenNotFound(String),

    /// HTTP 413.
    #[error("request size too large: {0}")]
    RequestSizeTooLarge(String),

    /// HTTP 451.
    #[error("device opted out: {0}")]
    DeviceOptedOut(String),

    /// HTTP 500. The only kind retried by default.
    #[error("internal server error: {0}")]
    InternalServerError(String),

    /// Any other non-200 status.
    #[error("api error: status {status}, body: {body}")]
    Api { status: StatusCode, body: String },

    /// Transport-level failure (timeout, DNS, TLS, connection reset, …).
    #[error("{0}")]
    Transport(#[from] TransportError),

    /// The HTTP client could not be built.
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    /// Success body could not be deserialized.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    /// The configured base URL is not a valid URL.
    #[error("invalid url: {0}")]
    Url(#[from] url::ParseError),
}

impl ClientError {
    /// Whether the service reported a transient failure worth retrying.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::InternalServerError(_))
    }

    /// Whether this is a timeout or connection failure.
    pub fn is_transient_transport(&self) -> bool {
        matches!(self, Self::Transport(e) if e.is_timeout() || e.is_connect())
    }

    /// HTTP status the error was classified from.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Self::BadEventState(_) => Some(StatusCode::BAD_REQUEST),
            Self::Authorization(_) => Some(StatusCode::UNAUTHORIZED),
            Self::AppInactive(_) => Some(StatusCode::FORBIDDEN),
            Self::AppTokenNotFound(_) => Some(StatusCode::NOT_FOUND),
            Self::RequestSizeTooLarge(_) => Some(StatusCode::PAYLOAD_TOO_LARGE),
            Self::DeviceOptedOut(_) => Some(StatusCode::UNAVAILABLE_FOR_LEGAL_REASONS),
            Self::InternalServerError(_) => Some(StatusCode::INTERNAL_SERVER_ERROR),
            Self::Api { status, .. } => Some(*status),
            Self::Validation(_)
            | Self::Transport(_)
            | Self::Http(_)
            | Self::Json(_)
            | Self::Url(_) => None,
        }
    }

    /// Raw response body for errors classified from a response.
    pub fn body(&self) -> Option<&str> {
        match self {
            Self::BadEventState(body)
            | Self::Authorization(body)
            | Self::AppInactive(body)
            | Self::AppTokenNotFound(body)
            | Self::RequestSizeTooLarge(body)
            | Self::DeviceOptedOut(body)
            | Self::InternalServerError(body)
            | Self::Api { body, .. } => Some(body),
            Self::Validation(_)
            | Self::Transport(_)
            | Self::Http(_)
            | Self::Json(_)
            | Self::Url(_) => None,
        }
    }
}
