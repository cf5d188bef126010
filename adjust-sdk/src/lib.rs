//! Server-to-server client for reporting app events to Adjust.
//!
//! ```ignore
//! use adjust_sdk::client::EventClient;
//! use adjust_sdk::config::ClientConfig;
//!
//! let client = EventClient::new(ClientConfig::new(app_token).with_security_token(token))?;
//! let response = client.send_event("abc123", &event_data).await?;
//! ```

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![cfg_attr(test, allow(clippy::unwrap_used, clippy::expect_used, clippy::panic))]
#![forbid(unsafe_code)]

#[cfg(feature = "client")]
pub mod client;
pub mod config;
pub mod objects;
pub mod params;
pub mod validation;
