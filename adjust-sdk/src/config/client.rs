//! Client configuration.

use std::fmt;
use std::time::Duration;

/// Event ingestion endpoint of the Adjust S2S API.
pub const DEFAULT_BASE_URL: &str = "https://s2s.adjust.com/event";

/// Per-request timeout used when none is configured.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Static configuration shared by every event sent through a client.
///
/// Never mutated once a client has been built from it.
#[derive(Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Identifies the app in the tracking service.
    pub app_token: String,
    /// Sent as a bearer credential when present.
    pub security_token: Option<String>,
    /// Event ingestion endpoint.
    pub base_url: String,
    /// Upper bound for a single HTTP attempt.
    pub timeout: Duration,
}

impl ClientConfig {
    /// Create a config for `app_token` with the default endpoint and no
    /// security token.
    pub fn new(app_token: impl Into<String>) -> Self {
        Self {
            app_token: app_token.into(),
            security_token: None,
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    pub fn with_security_token(mut self, token: impl Into<String>) -> Self {
        self.security_token = Some(token.into());
        self
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Value of the `Authorization` header, if a security token is set.
    pub fn authorization(&self) -> Option<String> {
        self.security_token
            .as_deref()
            .map(|token| format!("Bearer {token}"))
    }
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("app_token", &self.app_token)
            .field(
                "security_token",
                &self.security_token.as_ref().map(|_| "<redacted>"),
            )
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .finish()
    }
}
