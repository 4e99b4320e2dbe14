//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `WOODNOOK_SERVICE_URL` - Base URL of the hosted data service
//! - `WOODNOOK_SERVICE_KEY` - API key for the data service
//!
//! ## Optional
//! - `WOODNOOK_IMAGE_PROBE_TIMEOUT_SECS` - Image probe timeout (default: 10)

use std::time::Duration;

use secrecy::SecretString;
use thiserror::Error;

/// Default timeout for the image existence probe.
const DEFAULT_IMAGE_PROBE_TIMEOUT: Duration = Duration::from_secs(10);

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Storefront application configuration.
///
/// Implements `Debug` manually to redact the service key.
#[derive(Clone)]
pub struct StorefrontConfig {
    /// Base URL of the hosted data service (e.g., <https://abc123.supabase.co>)
    pub service_url: String,
    /// API key sent with every data-service request
    pub service_key: SecretString,
    /// Timeout for the image existence probe
    pub image_probe_timeout: Duration,
}

impl std::fmt::Debug for StorefrontConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StorefrontConfig")
            .field("service_url", &self.service_url)
            .field("service_key", &"[REDACTED]")
            .field("image_probe_timeout", &self.image_probe_timeout)
            .finish()
    }
}

impl StorefrontConfig {
    /// Load configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if a required variable is missing or a value fails
    /// to parse.
    pub fn from_env() -> Result<Self, ConfigError> {
        let service_url = require_env("WOODNOOK_SERVICE_URL")?;
        let service_key = SecretString::from(require_env("WOODNOOK_SERVICE_KEY")?);

        let image_probe_timeout = match std::env::var("WOODNOOK_IMAGE_PROBE_TIMEOUT_SECS") {
            Ok(raw) => parse_timeout_secs("WOODNOOK_IMAGE_PROBE_TIMEOUT_SECS", &raw)?,
            Err(_) => DEFAULT_IMAGE_PROBE_TIMEOUT,
        };

        Ok(Self {
            service_url: service_url.trim_end_matches('/').to_owned(),
            service_key,
            image_probe_timeout,
        })
    }
}

fn require_env(name: &str) -> Result<String, ConfigError> {
    std::env::var(name).map_err(|_| ConfigError::MissingEnvVar(name.to_owned()))
}

fn parse_timeout_secs(name: &str, raw: &str) -> Result<Duration, ConfigError> {
    let secs: u64 = raw
        .parse()
        .map_err(|_| ConfigError::InvalidEnvVar(name.to_owned(), raw.to_owned()))?;
    if secs == 0 {
        return Err(ConfigError::InvalidEnvVar(
            name.to_owned(),
            "timeout must be at least 1 second".to_owned(),
        ));
    }
    Ok(Duration::from_secs(secs))
}
