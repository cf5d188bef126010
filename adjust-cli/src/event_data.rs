//! Reading raw event data from the command line.

use adjust_sdk::objects::RawEventData;
use anyhow::{Context, bail};
use serde_json::Value;
use std::path::Path;

/// Parse a JSON object into raw event data.
pub fn parse_event_data(json: &str) -> anyhow::Result<RawEventData> {
    let value: Value = serde_json::from_str(json).context("event data is not valid JSON")?;
    match value {
        Value::Object(map) => Ok(map),
        other => bail!("event data must be a JSON object, got {other}"),
    }
}

/// Read and parse event data from a file.
pub fn read_event_data(path: &Path) -> anyhow::Result<RawEventData> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read event data from {}", path.display()))?;
    parse_event_data(&content)
}

/// Fill `created_at_unix` with the current time unless already set.
pub fn stamp_now(data: &mut RawEventData) {
    let missing = matches!(data.get("created_at_unix"), None | Some(Value::Null));
    if missing {
        let now = time::OffsetDateTime::now_utc().unix_timestamp();
        data.insert("created_at_unix".to_string(), Value::from(now));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_keeps_field_order() {
        let data = parse_event_data(
            r#"{"gps_adid": "gps", "callback_params": {"f0o": "bar", "bar": "baz"}}"#,
        )
        .unwrap();
        let keys: Vec<_> = data["callback_params"]
            .as_object()
            .unwrap()
            .keys()
            .cloned()
            .collect();
        assert_eq!(keys, vec!["f0o", "bar"]);
    }

    #[test]
    fn test_parse_rejects_non_objects() {
        assert!(parse_event_data("[1, 2]").is_err());
        assert!(parse_event_data("not json").is_err());
    }

    #[test]
    fn test_stamp_now_fills_missing_timestamp() {
        let mut data = parse_event_data(r#"{"idfa": "x"}"#).unwrap();
        stamp_now(&mut data);
        assert!(data["created_at_unix"].as_i64().unwrap() > 1_600_000_000);
    }

    #[test]
    fn test_stamp_now_keeps_existing_timestamp() {
        let mut data =
            parse_event_data(r#"{"idfa": "x", "created_at_unix": 1625077800}"#).unwrap();
        stamp_now(&mut data);
        assert_eq!(data["created_at_unix"], 1625077800);
    }
}
