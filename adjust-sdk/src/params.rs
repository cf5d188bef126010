//! Wire encoding of an event postback.
//!
//! A postback is a `GET` to the event endpoint with every field as a query
//! parameter. Parameter order is fixed; callback params are one parameter
//! holding compact JSON.

use crate::config::ClientConfig;
use crate::objects::EventIdentity;

/// Marks the request as server-to-server.
pub const S2S_FLAG: &str = "1";

pub const AUTHORIZATION_HEADER: &str = "Authorization";

/// Flat query parameters for a single postback.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestParameters(Vec<(&'static str, String)>);

impl RequestParameters {
    /// Build parameters from configuration, event token and validated data.
    ///
    /// Absent fields are omitted entirely.
    pub fn build(config: &ClientConfig, event_token: &str, identity: &EventIdentity) -> Self {
        let mut params = vec![
            ("app_token", config.app_token.clone()),
            ("event_token", event_token.to_string()),
            ("s2s", S2S_FLAG.to_string()),
        ];

        let fields = [
            ("idfa", identity.idfa.clone()),
            ("gps_adid", identity.gps_adid.clone()),
            ("adid", identity.adid.clone()),
            ("ip_address", identity.ip_address.map(|ip| ip.to_string())),
            (
                "created_at_unix",
                identity.created_at_unix.map(|ts| ts.to_string()),
            ),
            ("created_at", identity.created_at.clone()),
            (
                "callback_params",
                identity.callback_params.as_ref().map(|p| p.encode()),
            ),
        ];
        params.extend(
            fields
                .into_iter()
                .filter_map(|(name, value)| value.map(|value| (name, value))),
        );

        Self(params)
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.0.iter().map(|(n, _)| *n)
    }

    pub fn as_slice(&self) -> &[(&'static str, String)] {
        &self.0
    }
}

/// Headers for a single postback: a bearer credential when a security token
/// is configured, nothing otherwise.
pub fn request_headers(config: &ClientConfig) -> Vec<(&'static str, String)> {
    config
        .authorization()
        .map(|value| (AUTHORIZATION_HEADER, value))
        .into_iter()
        .collect()
}
