//! Event data types shared by the validator and the sender.

pub mod event;

pub use event::{CallbackParams, EventIdentity};

/// Loosely-typed event data as supplied by callers, e.g. parsed from JSON.
///
/// Iteration follows insertion order, so callback params built from JSON
/// keep the order they were written in.
pub type RawEventData = serde_json::Map<String, serde_json::Value>;
