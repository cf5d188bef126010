//! Canonical, validated event data.

use std::net::IpAddr;

use serde_json::{Map, Value};

/// Validated device identity and event metadata.
///
/// At least one of `idfa` and `gps_adid` is set on any value produced by
/// [`validate`](crate::validation::validate).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EventIdentity {
    pub idfa: Option<String>,
    pub gps_adid: Option<String>,
    pub adid: Option<String>,
    pub ip_address: Option<IpAddr>,
    pub created_at_unix: Option<i64>,
    pub created_at: Option<String>,
    pub callback_params: Option<CallbackParams>,
}

impl EventIdentity {
    /// Identity of an iOS device.
    pub fn from_idfa(idfa: impl Into<String>) -> Self {
        Self {
            idfa: Some(idfa.into()),
            ..Self::default()
        }
    }

    /// Identity of an Android device.
    pub fn from_gps_adid(gps_adid: impl Into<String>) -> Self {
        Self {
            gps_adid: Some(gps_adid.into()),
            ..Self::default()
        }
    }

    pub fn with_idfa(mut self, idfa: impl Into<String>) -> Self {
        self.idfa = Some(idfa.into());
        self
    }

    pub fn with_gps_adid(mut self, gps_adid: impl Into<String>) -> Self {
        self.gps_adid = Some(gps_adid.into());
        self
    }

    pub fn with_adid(mut self, adid: impl Into<String>) -> Self {
        self.adid = Some(adid.into());
        self
    }

    pub fn with_ip_address(mut self, ip_address: IpAddr) -> Self {
        self.ip_address = Some(ip_address);
        self
    }

    pub fn with_created_at_unix(mut self, created_at_unix: i64) -> Self {
        self.created_at_unix = Some(created_at_unix);
        self
    }

    pub fn with_created_at(mut self, created_at: impl Into<String>) -> Self {
        self.created_at = Some(created_at.into());
        self
    }

    pub fn with_callback_params(mut self, callback_params: CallbackParams) -> Self {
        self.callback_params = Some(callback_params);
        self
    }

    /// Whether a non-empty `idfa` or `gps_adid` is present.
    pub fn is_identified(&self) -> bool {
        let non_empty = |id: &Option<String>| id.as_deref().is_some_and(|id| !id.is_empty());
        non_empty(&self.idfa) || non_empty(&self.gps_adid)
    }
}

/// Caller-defined key-value pairs echoed back in downstream callbacks.
///
/// Pairs keep their insertion order; it is part of the wire format.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CallbackParams(Vec<(String, String)>);

impl CallbackParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a pair. Pushing an existing key replaces its value in place.
    pub fn push(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        match self.0.iter_mut().find(|(k, _)| *k == key) {
            Some((_, existing)) => *existing = value,
            None => self.0.push((key, value)),
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Compact JSON object text, e.g. `{"key1":"val1","key2":"val2"}`.
    pub fn encode(&self) -> String {
        let object: Map<String, Value> = self
            .0
            .iter()
            .map(|(k, v)| (k.clone(), Value::String(v.clone())))
            .collect();
        Value::Object(object).to_string()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for CallbackParams {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut params = Self::new();
        for (key, value) in iter {
            params.push(key, value);
        }
        params
    }
}
