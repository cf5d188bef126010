//! TOML file configuration structures.
//!
//! These structs directly map to the `adjust-config.toml` file format.

use serde::Deserialize;

/// Root configuration structure as read from the TOML file.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FileConfig {
    #[serde(default)]
    pub adjust: AdjustConfig,
    #[serde(default)]
    pub retry: RetryConfig,
}

/// Credentials and endpoint of the Adjust S2S API.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AdjustConfig {
    /// App token. May instead come from `ADJUST_APP_TOKEN`.
    pub app_token: Option<String>,
    /// S2S security token. May instead come from `ADJUST_SECURITY_TOKEN`.
    pub security_token: Option<String>,
    /// Override of the event endpoint.
    pub base_url: Option<String>,
    /// Per-attempt timeout in seconds.
    pub timeout_secs: Option<u64>,
}

/// Retry section.
#[derive(Debug, Clone, Deserialize)]
pub struct RetryConfig {
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,
    #[serde(default = "default_multiplier_secs")]
    pub multiplier_secs: u64,
    #[serde(default = "default_min_delay_secs")]
    pub min_delay_secs: u64,
    #[serde(default = "default_max_delay_secs")]
    pub max_delay_secs: u64,
    #[serde(default)]
    pub retry_transport_errors: bool,
}

fn default_max_attempts() -> u32 {
    3
}

fn default_multiplier_secs() -> u64 {
    1
}

fn default_min_delay_secs() -> u64 {
    4
}

fn default_max_delay_secs() -> u64 {
    10
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: default_max_attempts(),
            multiplier_secs: default_multiplier_secs(),
            min_delay_secs: default_min_delay_secs(),
            max_delay_secs: default_max_delay_secs(),
            retry_transport_errors: false,
        }
    }
}
