//! Event postback client.

use serde_json::Value;
use tracing::{debug, info};
use url::Url;

use super::transport::{HttpRequester, ReqwestRequester};
use super::{ClientError, classify, retry};
use crate::config::{ClientConfig, RetryPolicy};
use crate::objects::{EventIdentity, RawEventData};
use crate::params::{RequestParameters, request_headers};
use crate::validation::{ValidationError, validate};

/// Typed client for the Adjust **S2S event API**.
///
/// Each call to [`send_event`](Self::send_event) is independent: it
/// validates the event data, issues a `GET` to the configured endpoint and
/// retries HTTP 500 responses according to the [`RetryPolicy`]. The client
/// holds no per-call state, so one instance can serve many concurrent
/// calls. Dropping the returned future cancels the in-flight attempt and
/// any remaining retries.
#[derive(Debug, Clone)]
pub struct EventClient<R = ReqwestRequester> {
    config: ClientConfig,
    base_url: Url,
    requester: R,
    retry_policy: RetryPolicy,
}

impl EventClient<ReqwestRequester> {
    /// Create a client using `reqwest` with the configured timeout.
    pub fn new(config: ClientConfig) -> Result<Self, ClientError> {
        let requester = ReqwestRequester::new(config.timeout)?;
        Self::with_requester(config, requester)
    }
}

impl<R: HttpRequester> EventClient<R> {
    /// Create a client that sends through `requester`.
    pub fn with_requester(config: ClientConfig, requester: R) -> Result<Self, ClientError> {
        let base_url = Url::parse(&config.base_url)?;
        Ok(Self {
            config,
            base_url,
            requester,
            retry_policy: RetryPolicy::default(),
        })
    }

    /// Replace the default retry policy.
    pub fn with_retry_policy(mut self, policy: RetryPolicy) -> Self {
        self.retry_policy = policy;
        self
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn retry_policy(&self) -> &RetryPolicy {
        &self.retry_policy
    }

    pub fn requester(&self) -> &R {
        &self.requester
    }

    /// Validate `event_data` and report it as `event_token`.
    ///
    /// Returns the parsed response document on HTTP 200. Validation
    /// failures are returned before any request is made.
    pub async fn send_event(
        &self,
        event_token: &str,
        event_data: &RawEventData,
    ) -> Result<Value, ClientError> {
        let identity = validate(event_data)?;
        self.send(event_token, &identity).await
    }

    /// Report already-validated event data as `event_token`.
    pub async fn send(
        &self,
        event_token: &str,
        identity: &EventIdentity,
    ) -> Result<Value, ClientError> {
        if event_token.is_empty() {
            return Err(ValidationError::EmptyEventToken.into());
        }
        if !identity.is_identified() {
            return Err(ValidationError::MissingDeviceIdentifier.into());
        }

        let params = RequestParameters::build(&self.config, event_token, identity);
        let headers = request_headers(&self.config);
        let params = &params;
        let headers = headers.as_slice();

        let body = retry(
            &self.retry_policy,
            |err: &ClientError| self.should_retry(err),
            move |attempt| async move {
                debug!(event_token, attempt, "Sending event");
                self.attempt(params, headers).await
            },
        )
        .await?;

        let payload = serde_json::from_str(&body)?;
        info!(event_token, "Event delivered");
        Ok(payload)
    }

    async fn attempt(
        &self,
        params: &RequestParameters,
        headers: &[(&'static str, String)],
    ) -> Result<String, ClientError> {
        let response = self.requester.get(&self.base_url, params, headers).await?;
        classify(response.status, response.body)
    }

    fn should_retry(&self, err: &ClientError) -> bool {
        err.is_retryable()
            || (self.retry_policy.retry_transport_errors && err.is_transient_transport())
    }
}
