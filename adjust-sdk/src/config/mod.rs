//! Configuration types for the Adjust S2S client.
//!
//! These types are plain, immutable values. Loading them from files or the
//! environment is left to the embedding application.

mod client;
mod retry;

pub use client::{ClientConfig, DEFAULT_BASE_URL, DEFAULT_TIMEOUT};
pub use retry::RetryPolicy;
