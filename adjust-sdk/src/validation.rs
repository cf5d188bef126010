//! Event data validation.
//!
//! Turns caller-supplied [`RawEventData`] into a canonical [`EventIdentity`].
//! The device identifier check runs before any per-field type check, so a
//! malformed optional field never hides a missing identifier.

use std::net::{IpAddr, Ipv6Addr};

use serde_json::Value;
use tracing::debug;

use crate::objects::{CallbackParams, EventIdentity, RawEventData};

/// Errors produced while validating event data.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("either idfa or gps_adid must be provided")]
    MissingDeviceIdentifier,

    #[error("event token must not be empty")]
    EmptyEventToken,

    #[error("field `{field}` must be {expected}")]
    InvalidType {
        field: &'static str,
        expected: &'static str,
    },

    #[error("field `ip_address` is not a valid IPv4 or IPv6 address: {0}")]
    InvalidIpAddress(String),

    #[error("callback param `{0}` must be a string")]
    InvalidCallbackParam(String),
}

/// Validate raw event data.
///
/// Unrecognized fields are dropped; only the fixed schema and
/// `callback_params` reach the canonical value.
pub fn validate(raw: &RawEventData) -> Result<EventIdentity, ValidationError> {
    if !is_truthy(raw.get("idfa")) && !is_truthy(raw.get("gps_adid")) {
        return Err(ValidationError::MissingDeviceIdentifier);
    }

    let mut identity = EventIdentity::default();
    for (key, value) in raw {
        match key.as_str() {
            "idfa" => identity.idfa = optional_string("idfa", value)?,
            "gps_adid" => identity.gps_adid = optional_string("gps_adid", value)?,
            "adid" => identity.adid = optional_string("adid", value)?,
            "ip_address" => identity.ip_address = optional_ip_address(value)?,
            "created_at_unix" => identity.created_at_unix = optional_unix_time(value)?,
            "created_at" => identity.created_at = optional_string("created_at", value)?,
            "callback_params" => identity.callback_params = optional_callback_params(value)?,
            other => debug!(field = other, "Ignoring unrecognized event field"),
        }
    }

    Ok(identity)
}

/// Null, false, zero and empty values count as absent.
fn is_truthy(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => false,
        Some(Value::Bool(b)) => *b,
        Some(Value::Number(n)) => n.as_f64().is_some_and(|n| n != 0.0),
        Some(Value::String(s)) => !s.is_empty(),
        Some(Value::Array(a)) => !a.is_empty(),
        Some(Value::Object(o)) => !o.is_empty(),
    }
}

fn optional_string(
    field: &'static str,
    value: &Value,
) -> Result<Option<String>, ValidationError> {
    match value {
        Value::Null => Ok(None),
        Value::String(s) => Ok(Some(s.clone())),
        _ => Err(ValidationError::InvalidType {
            field,
            expected: "a string",
        }),
    }
}

fn optional_ip_address(value: &Value) -> Result<Option<IpAddr>, ValidationError> {
    match value {
        Value::Null => Ok(None),
        Value::String(s) => parse_ip_address(s)
            .map(Some)
            .ok_or_else(|| ValidationError::InvalidIpAddress(s.clone())),
        _ => Err(ValidationError::InvalidType {
            field: "ip_address",
            expected: "a string",
        }),
    }
}

/// IPv6 literals may carry a zone (`fe80::1%eth0`); the zone is dropped.
fn parse_ip_address(s: &str) -> Option<IpAddr> {
    match s.split_once('%') {
        Some((addr, zone)) if !zone.is_empty() => addr.parse::<Ipv6Addr>().ok().map(IpAddr::V6),
        Some(_) => None,
        None => s.parse().ok(),
    }
}

/// Integers, integral floats and decimal strings are accepted.
fn optional_unix_time(value: &Value) -> Result<Option<i64>, ValidationError> {
    let invalid = ValidationError::InvalidType {
        field: "created_at_unix",
        expected: "an integer",
    };
    match value {
        Value::Null => Ok(None),
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                return Ok(Some(i));
            }
            match n.as_f64() {
                Some(f) if f.fract() == 0.0 && f >= i64::MIN as f64 && f < i64::MAX as f64 => {
                    Ok(Some(f as i64))
                }
                _ => Err(invalid),
            }
        }
        Value::String(s) => s.trim().parse().map(Some).map_err(|_| invalid),
        _ => Err(invalid),
    }
}

fn optional_callback_params(value: &Value) -> Result<Option<CallbackParams>, ValidationError> {
    match value {
        Value::Null => Ok(None),
        Value::Object(object) => {
            let mut params = CallbackParams::new();
            for (key, value) in object {
                let Value::String(value) = value else {
                    return Err(ValidationError::InvalidCallbackParam(key.clone()));
                };
                params.push(key.as_str(), value.as_str());
            }
            Ok(Some(params))
        }
        _ => Err(ValidationError::InvalidType {
            field: "callback_params",
            expected: "an object of strings",
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn raw(value: Value) -> RawEventData {
        match value {
            Value::Object(map) => map,
            _ => panic!("test data must be an object"),
        }
    }

    fn full_event() -> RawEventData {
        raw(json!({
            "idfa": "D2CADB5F-410F-4963-AC0C-2A78534BDF1E",
            "adid": "test_adid",
            "ip_address": "192.168.0.1",
            "created_at_unix": 1625077800,
            "created_at": "2021-06-30T12:30:00Z"
        }))
    }

    #[test]
    fn test_valid_event() {
        let identity = validate(&full_event()).unwrap();
        assert_eq!(
            identity.idfa.as_deref(),
            Some("D2CADB5F-410F-4963-AC0C-2A78534BDF1E")
        );
        assert_eq!(identity.gps_adid, None);
        assert_eq!(identity.adid.as_deref(), Some("test_adid"));
        assert_eq!(identity.ip_address, Some("192.168.0.1".parse().unwrap()));
        assert_eq!(identity.created_at_unix, Some(1625077800));
        assert_eq!(identity.created_at.as_deref(), Some("2021-06-30T12:30:00Z"));
        assert_eq!(identity.callback_params, None);
    }

    #[test]
    fn test_missing_identifier() {
        let mut data = full_event();
        data.remove("idfa");
        assert_eq!(
            validate(&data),
            Err(ValidationError::MissingDeviceIdentifier)
        );
    }

    #[test]
    fn test_empty_and_null_identifiers_are_missing() {
        let data = raw(json!({ "idfa": "", "gps_adid": null }));
        assert_eq!(
            validate(&data),
            Err(ValidationError::MissingDeviceIdentifier)
        );
    }

    #[test]
    fn test_identifier_error_wins_over_field_errors() {
        let data = raw(json!({ "ip_address": "not an ip", "created_at_unix": true }));
        assert_eq!(
            validate(&data),
            Err(ValidationError::MissingDeviceIdentifier)
        );
    }

    #[test]
    fn test_gps_adid_alone_is_enough() {
        let identity = validate(&raw(json!({ "gps_adid": "gps" }))).unwrap();
        assert_eq!(identity.gps_adid.as_deref(), Some("gps"));
        assert_eq!(identity.idfa, None);
    }

    #[test]
    fn test_non_string_identifier_is_rejected() {
        let data = raw(json!({ "idfa": 42 }));
        assert_eq!(
            validate(&data),
            Err(ValidationError::InvalidType {
                field: "idfa",
                expected: "a string"
            })
        );
    }

    #[test]
    fn test_ipv6_address() {
        let data = raw(json!({ "idfa": "x", "ip_address": "2001:db8::1" }));
        let identity = validate(&data).unwrap();
        assert_eq!(identity.ip_address, Some("2001:db8::1".parse().unwrap()));
    }

    #[test]
    fn test_scoped_ipv6_address_drops_zone() {
        let data = raw(json!({ "idfa": "x", "ip_address": "fe80::1%eth0" }));
        let identity = validate(&data).unwrap();
        assert_eq!(identity.ip_address, Some("fe80::1".parse().unwrap()));
    }

    #[test]
    fn test_zone_only_allowed_on_ipv6() {
        for bad in ["192.168.0.1%eth0", "fe80::1%", "%eth0"] {
            let data = raw(json!({ "idfa": "x", "ip_address": bad }));
            assert_eq!(
                validate(&data),
                Err(ValidationError::InvalidIpAddress(bad.to_string()))
            );
        }
    }

    #[test]
    fn test_malformed_ip_address_is_rejected() {
        let data = raw(json!({ "idfa": "x", "ip_address": "192.168.0.256" }));
        assert_eq!(
            validate(&data),
            Err(ValidationError::InvalidIpAddress("192.168.0.256".to_string()))
        );
    }

    #[test]
    fn test_created_at_unix_coercion() {
        let from_string = raw(json!({ "idfa": "x", "created_at_unix": " 1625077800 " }));
        assert_eq!(
            validate(&from_string).unwrap().created_at_unix,
            Some(1625077800)
        );

        let from_float = raw(json!({ "idfa": "x", "created_at_unix": 1625077800.0 }));
        assert_eq!(
            validate(&from_float).unwrap().created_at_unix,
            Some(1625077800)
        );

        for bad in [json!(1.5), json!("soon"), json!(true), json!([1])] {
            let data = raw(json!({ "idfa": "x", "created_at_unix": bad }));
            assert!(matches!(
                validate(&data),
                Err(ValidationError::InvalidType {
                    field: "created_at_unix",
                    ..
                })
            ));
        }
    }

    #[test]
    fn test_null_optional_fields_are_absent() {
        let data = raw(json!({
            "idfa": "x",
            "adid": null,
            "ip_address": null,
            "created_at_unix": null,
            "created_at": null,
            "callback_params": null
        }));
        assert_eq!(validate(&data).unwrap(), EventIdentity::from_idfa("x"));
    }

    #[test]
    fn test_callback_params_keep_order() {
        let data = raw(json!({
            "idfa": "x",
            "callback_params": { "f0o": "bar", "bar": "baz" }
        }));
        let params = validate(&data).unwrap().callback_params.unwrap();
        let pairs: Vec<_> = params.iter().collect();
        assert_eq!(pairs, vec![("f0o", "bar"), ("bar", "baz")]);
    }

    #[test]
    fn test_callback_params_must_be_strings() {
        let data = raw(json!({ "idfa": "x", "callback_params": { "count": 3 } }));
        assert_eq!(
            validate(&data),
            Err(ValidationError::InvalidCallbackParam("count".to_string()))
        );

        let data = raw(json!({ "idfa": "x", "callback_params": "a=b" }));
        assert!(matches!(
            validate(&data),
            Err(ValidationError::InvalidType {
                field: "callback_params",
                ..
            })
        ));
    }

    #[test]
    fn test_unknown_fields_are_dropped() {
        let data = raw(json!({ "idfa": "x", "app_token": "spoofed", "s2s": 0 }));
        assert_eq!(validate(&data).unwrap(), EventIdentity::from_idfa("x"));
    }

    #[test]
    fn test_validation_is_idempotent() {
        let data = full_event();
        assert_eq!(validate(&data).unwrap(), validate(&data).unwrap());
    }
}
