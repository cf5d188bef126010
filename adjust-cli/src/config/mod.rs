//! Configuration module for adjust-cli.
//!
//! Handles loading configuration from a TOML file and environment
//! variables.

pub mod file;

use crate::config::file::{FileConfig, RetryConfig};
use adjust_sdk::config::{ClientConfig, RetryPolicy};
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

pub const APP_TOKEN_ENV: &str = "ADJUST_APP_TOKEN";
pub const SECURITY_TOKEN_ENV: &str = "ADJUST_SECURITY_TOKEN";

/// Errors that can occur during configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    IoError(#[from] std::io::Error),

    #[error("failed to parse config file: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("validation error: {0}")]
    ValidationError(String),
}

/// Loaded configuration result containing all parts.
#[derive(Debug)]
pub struct LoadedConfig {
    pub client: ClientConfig,
    pub retry: RetryPolicy,
}

/// Configuration loader that handles the complete loading process.
pub struct ConfigLoader {
    config_path: PathBuf,
}

impl ConfigLoader {
    /// Create a new config loader.
    pub fn new(config_path: impl AsRef<Path>) -> Self {
        Self {
            config_path: config_path.as_ref().to_path_buf(),
        }
    }

    /// Load the configuration using the process environment.
    pub fn load(&self) -> Result<LoadedConfig, ConfigError> {
        self.load_with_env(|name| std::env::var(name).ok())
    }

    /// Load and process the configuration.
    ///
    /// This will:
    /// 1. Read the TOML file, if it exists
    /// 2. Apply environment overrides
    /// 3. Validate the configuration
    /// 4. Build the loaded configuration
    pub fn load_with_env(
        &self,
        env: impl Fn(&str) -> Option<String>,
    ) -> Result<LoadedConfig, ConfigError> {
        let mut file_config = if self.config_path.exists() {
            let config_content = std::fs::read_to_string(&self.config_path)?;
            toml::from_str(&config_content)?
        } else {
            tracing::debug!(
                path = ?self.config_path,
                "Config file not found, using environment only"
            );
            FileConfig::default()
        };

        if let Some(app_token) = env(APP_TOKEN_ENV) {
            file_config.adjust.app_token = Some(app_token);
        }
        if let Some(security_token) = env(SECURITY_TOKEN_ENV) {
            file_config.adjust.security_token = Some(security_token);
        }

        build_loaded_config(file_config)
    }
}

fn build_loaded_config(file_config: FileConfig) -> Result<LoadedConfig, ConfigError> {
    let adjust = file_config.adjust;

    let app_token = adjust
        .app_token
        .filter(|token| !token.is_empty())
        .ok_or_else(|| {
            ConfigError::ValidationError(format!(
                "app_token must be set in [adjust] or via {APP_TOKEN_ENV}"
            ))
        })?;

    if file_config.retry.max_attempts == 0 {
        return Err(ConfigError::ValidationError(
            "retry.max_attempts must be at least 1".to_string(),
        ));
    }

    let mut client = ClientConfig::new(app_token);
    if let Some(security_token) = adjust.security_token.filter(|token| !token.is_empty()) {
        client = client.with_security_token(security_token);
    }
    if let Some(base_url) = adjust.base_url {
        client = client.with_base_url(base_url);
    }
    if let Some(timeout_secs) = adjust.timeout_secs {
        client = client.with_timeout(Duration::from_secs(timeout_secs));
    }

    Ok(LoadedConfig {
        client,
        retry: convert_retry(file_config.retry),
    })
}

fn convert_retry(r: RetryConfig) -> RetryPolicy {
    RetryPolicy {
        max_attempts: r.max_attempts,
        multiplier: Duration::from_secs(r.multiplier_secs),
        min_delay: Duration::from_secs(r.min_delay_secs),
        max_delay: Duration::from_secs(r.max_delay_secs),
        retry_transport_errors: r.retry_transport_errors,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use adjust_sdk::config::DEFAULT_BASE_URL;

    fn no_env(_: &str) -> Option<String> {
        None
    }

    fn write_config(name: &str, content: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!(
            "adjust-cli-{}-{name}.toml",
            std::process::id()
        ));
        std::fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_load_from_file() {
        let path = write_config(
            "file",
            r#"
[adjust]
app_token = "YOUR_APP_TOKEN"
security_token = "YOUR_SECURITY_TOKEN"
timeout_secs = 5
"#,
        );
        let loaded = ConfigLoader::new(&path).load_with_env(no_env).unwrap();
        std::fs::remove_file(&path).unwrap();

        assert_eq!(loaded.client.app_token, "YOUR_APP_TOKEN");
        assert_eq!(
            loaded.client.security_token.as_deref(),
            Some("YOUR_SECURITY_TOKEN")
        );
        assert_eq!(loaded.client.base_url, DEFAULT_BASE_URL);
        assert_eq!(loaded.client.timeout, Duration::from_secs(5));
        assert_eq!(loaded.retry, RetryPolicy::default());
    }

    #[test]
    fn test_environment_overrides_file() {
        let path = write_config(
            "env",
            r#"
[adjust]
app_token = "from-file"
"#,
        );
        let loaded = ConfigLoader::new(&path)
            .load_with_env(|name| match name {
                APP_TOKEN_ENV => Some("from-env".to_string()),
                SECURITY_TOKEN_ENV => Some("secret".to_string()),
                _ => None,
            })
            .unwrap();
        std::fs::remove_file(&path).unwrap();

        assert_eq!(loaded.client.app_token, "from-env");
        assert_eq!(loaded.client.security_token.as_deref(), Some("secret"));
    }

    #[test]
    fn test_missing_file_with_environment() {
        let loader = ConfigLoader::new("/nonexistent/adjust-config.toml");
        let loaded = loader
            .load_with_env(|name| (name == APP_TOKEN_ENV).then(|| "app".to_string()))
            .unwrap();

        assert_eq!(loaded.client.app_token, "app");
        assert!(loaded.client.security_token.is_none());
    }

    #[test]
    fn test_missing_app_token() {
        let loader = ConfigLoader::new("/nonexistent/adjust-config.toml");
        assert!(matches!(
            loader.load_with_env(no_env),
            Err(ConfigError::ValidationError(_))
        ));
    }

    #[test]
    fn test_empty_security_token_is_ignored() {
        let config: FileConfig = toml::from_str(
            r#"
[adjust]
app_token = "app"
security_token = ""
"#,
        )
        .unwrap();
        let loaded = build_loaded_config(config).unwrap();
        assert!(loaded.client.security_token.is_none());
    }

    #[test]
    fn test_zero_attempts_rejected() {
        let config: FileConfig = toml::from_str(
            r#"
[adjust]
app_token = "app"

[retry]
max_attempts = 0
"#,
        )
        .unwrap();
        assert!(matches!(
            build_loaded_config(config),
            Err(ConfigError::ValidationError(_))
        ));
    }
}
