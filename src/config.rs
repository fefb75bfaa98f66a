//! Client configuration
//!
//! Configuration for the API client, loaded from YAML or JSON files.
//! Every field except `base_url` has a default.

use crate::error::{Error, Result};
use crate::http::{HttpClientConfig, RateLimiterConfig, RetryPolicy};
use crate::pagination::PaginationConfig;
use crate::types::BackoffType;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;

// ============================================================================
// Top-Level Client Config
// ============================================================================

/// Complete client configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Base URL of the server (e.g., "https://github.com" or a GHE host)
    pub base_url: String,

    /// Literal access token
    #[serde(default)]
    pub token: Option<String>,

    /// Environment variable holding the access token
    #[serde(default = "default_token_env")]
    pub token_env: String,

    /// Items requested per page
    #[serde(default = "default_page_size")]
    pub page_size: u32,

    /// User agent string
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// HTTP client configuration
    #[serde(default)]
    pub http: HttpConfig,

    /// How the next page is found (default: `rel="next"` Link header)
    #[serde(default)]
    pub pagination: PaginationConfig,
}

fn default_token_env() -> String {
    "GITHUB_TOKEN".to_string()
}

fn default_page_size() -> u32 {
    100
}

fn default_user_agent() -> String {
    format!("linkwalk/{}", env!("CARGO_PKG_VERSION"))
}

impl ClientConfig {
    /// Create a config for the given base URL with defaults everywhere else
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            token: None,
            token_env: default_token_env(),
            page_size: default_page_size(),
            user_agent: default_user_agent(),
            http: HttpConfig::default(),
            pagination: PaginationConfig::default(),
        }
    }

    /// Check field values
    pub fn validate(&self) -> Result<()> {
        if self.base_url.trim().is_empty() {
            return Err(Error::missing_field("base_url"));
        }

        let url = url::Url::parse(&self.base_url)
            .map_err(|e| Error::invalid_value("base_url", e.to_string()))?;
        if url.host_str().is_none() {
            return Err(Error::invalid_value("base_url", "URL has no host"));
        }

        if self.page_size == 0 {
            return Err(Error::invalid_value("page_size", "must be at least 1"));
        }

        if self.http.max_attempts == 0 {
            return Err(Error::invalid_value("http.max_attempts", "must be at least 1"));
        }

        if let Some(rate_limit) = &self.http.rate_limit {
            if rate_limit.requests_per_second == 0 {
                return Err(Error::invalid_value(
                    "http.rate_limit.requests_per_second",
                    "must be at least 1",
                ));
            }
        }

        Ok(())
    }

    /// Build the runtime HTTP client configuration
    pub fn http_client_config(&self) -> HttpClientConfig {
        let mut builder = HttpClientConfig::builder()
            .timeout(Duration::from_secs(self.http.timeout_seconds))
            .connect_timeout(Duration::from_secs(self.http.connect_timeout_seconds))
            .retry(self.http.retry_policy())
            .user_agent(&self.user_agent);

        builder = match &self.http.rate_limit {
            Some(rate_limit) => builder.rate_limit(RateLimiterConfig::new(
                rate_limit.requests_per_second,
                rate_limit.burst_size.unwrap_or(rate_limit.requests_per_second),
            )),
            None => builder.no_rate_limit(),
        };

        builder.build()
    }
}

// ============================================================================
// HTTP Config
// ============================================================================

/// HTTP client configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpConfig {
    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,

    /// Connection timeout in seconds
    #[serde(default = "default_timeout")]
    pub connect_timeout_seconds: u64,

    /// Total attempts per request, including the first
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,

    /// Retry backoff configuration
    #[serde(default)]
    pub retry: BackoffConfig,

    /// Client-side rate limiting (disabled when absent)
    #[serde(default)]
    pub rate_limit: Option<RateLimitConfig>,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_seconds: default_timeout(),
            connect_timeout_seconds: default_timeout(),
            max_attempts: default_max_attempts(),
            retry: BackoffConfig::default(),
            rate_limit: None,
        }
    }
}

impl HttpConfig {
    /// Retry policy described by this config
    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy {
            max_attempts: self.max_attempts,
            backoff_type: self.retry.backoff_type,
            initial_backoff: Duration::from_millis(self.retry.initial_ms),
            max_backoff: Duration::from_millis(self.retry.max_ms),
            max_jitter: Duration::from_millis(self.retry.jitter_ms),
        }
    }
}

fn default_timeout() -> u64 {
    30
}

fn default_max_attempts() -> u32 {
    5
}

/// Backoff configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackoffConfig {
    /// Type of backoff
    #[serde(rename = "type", default)]
    pub backoff_type: BackoffType,

    /// Initial delay in milliseconds
    #[serde(default = "default_initial_ms")]
    pub initial_ms: u64,

    /// Maximum delay in milliseconds
    #[serde(default = "default_max_ms")]
    pub max_ms: u64,

    /// Upper bound of the random jitter added to each delay
    #[serde(default = "default_jitter_ms")]
    pub jitter_ms: u64,
}

impl Default for BackoffConfig {
    fn default() -> Self {
        Self {
            backoff_type: BackoffType::Exponential,
            initial_ms: default_initial_ms(),
            max_ms: default_max_ms(),
            jitter_ms: default_jitter_ms(),
        }
    }
}

fn default_initial_ms() -> u64 {
    1000
}

fn default_max_ms() -> u64 {
    8000
}

fn default_jitter_ms() -> u64 {
    250
}

/// Rate limiting configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RateLimitConfig {
    /// Requests per second limit
    pub requests_per_second: u32,

    /// Burst size (defaults to `requests_per_second`)
    #[serde(default)]
    pub burst_size: Option<u32>,
}

// ============================================================================
// Loading
// ============================================================================

/// Load a client config from a YAML or JSON file
pub fn load_config(path: impl AsRef<Path>) -> Result<ClientConfig> {
    let path = path.as_ref();

    let content = fs::read_to_string(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            Error::FileNotFound {
                path: path.display().to_string(),
            }
        } else {
            Error::config(format!(
                "Failed to read config file '{}': {}",
                path.display(),
                e
            ))
        }
    })?;

    let is_json = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

    if is_json {
        let config: ClientConfig = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    } else {
        load_config_from_str(&content)
    }
}

/// Load a client config from a YAML string
pub fn load_config_from_str(yaml: &str) -> Result<ClientConfig> {
    let config: ClientConfig = serde_yaml::from_str(yaml)?;
    config.validate()?;
    Ok(config)
}
