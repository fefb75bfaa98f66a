//! HTTP client with retry and rate limiting
//!
//! Provides an HTTP client that handles:
//! - Bearer authentication through an `AccessTokenProvider`
//! - Retries for idempotent requests, honouring server delay hints
//! - Optional client-side rate limiting
//! - Turning error responses into `Error::Api` with the server's message

use super::rate_limit::{RateLimiter, RateLimiterConfig};
use super::retry::RetryPolicy;
use crate::auth::{apply_bearer, AccessTokenProvider};
use crate::error::{Error, Result};
use crate::types::Method;
use reqwest::{Client, Response};
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

/// Media type requested from the API
pub const ACCEPT_JSON: &str = "application/vnd.github+json";

/// Header carrying the server-side request id
pub const REQUEST_ID_HEADER: &str = "x-github-request-id";

/// Configuration for the HTTP client
#[derive(Debug, Clone)]
pub struct HttpClientConfig {
    /// Base URL for relative request paths
    pub base_url: Option<String>,
    /// Request timeout
    pub timeout: Duration,
    /// Connection timeout
    pub connect_timeout: Duration,
    /// Retry policy
    pub retry: RetryPolicy,
    /// Rate limiter configuration
    pub rate_limit: Option<RateLimiterConfig>,
    /// Default headers for all requests
    pub default_headers: HashMap<String, String>,
    /// User agent string
    pub user_agent: String,
    /// Service name used in error messages
    pub service_name: String,
}

impl Default for HttpClientConfig {
    fn default() -> Self {
        Self {
            base_url: None,
            timeout: Duration::from_secs(30),
            connect_timeout: Duration::from_secs(30),
            retry: RetryPolicy::default(),
            rate_limit: None,
            default_headers: HashMap::new(),
            user_agent: format!("linkwalk/{}", env!("CARGO_PKG_VERSION")),
            service_name: "GitHub".to_string(),
        }
    }
}

impl HttpClientConfig {
    /// Create a new config builder
    pub fn builder() -> HttpClientConfigBuilder {
        HttpClientConfigBuilder::default()
    }
}

/// Builder for HTTP client config
#[derive(Default)]
pub struct HttpClientConfigBuilder {
    config: HttpClientConfig,
}

impl HttpClientConfigBuilder {
    /// Set the base URL
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.config.base_url = Some(url.into());
        self
    }

    /// Set the request timeout
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = timeout;
        self
    }

    /// Set the connection timeout
    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.config.connect_timeout = timeout;
        self
    }

    /// Set the retry policy
    pub fn retry(mut self, policy: RetryPolicy) -> Self {
        self.config.retry = policy;
        self
    }

    /// Set max attempts, keeping the rest of the retry policy
    pub fn max_attempts(mut self, attempts: u32) -> Self {
        self.config.retry.max_attempts = attempts;
        self
    }

    /// Set rate limiter
    pub fn rate_limit(mut self, config: RateLimiterConfig) -> Self {
        self.config.rate_limit = Some(config);
        self
    }

    /// Disable rate limiting
    pub fn no_rate_limit(mut self) -> Self {
        self.config.rate_limit = None;
        self
    }

    /// Add a default header
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.config.default_headers.insert(key.into(), value.into());
        self
    }

    /// Set user agent
    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.config.user_agent = agent.into();
        self
    }

    /// Set the service name used in error messages
    pub fn service_name(mut self, name: impl Into<String>) -> Self {
        self.config.service_name = name.into();
        self
    }

    /// Build the config
    pub fn build(self) -> HttpClientConfig {
        self.config
    }
}

/// HTTP client with retry and rate limiting
pub struct HttpClient {
    client: Client,
    config: HttpClientConfig,
    token_provider: Option<Arc<dyn AccessTokenProvider>>,
    rate_limiter: Option<RateLimiter>,
}

impl HttpClient {
    /// Create a new HTTP client with custom configuration
    pub fn with_config(config: HttpClientConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .connect_timeout(config.connect_timeout)
            .user_agent(&config.user_agent)
            .build()?;

        let rate_limiter = config.rate_limit.as_ref().map(RateLimiter::new);

        Ok(Self {
            client,
            config,
            token_provider: None,
            rate_limiter,
        })
    }

    /// Create a client that authenticates every request
    pub fn with_auth(
        config: HttpClientConfig,
        provider: Arc<dyn AccessTokenProvider>,
    ) -> Result<Self> {
        let mut client = Self::with_config(config)?;
        client.token_provider = Some(provider);
        Ok(client)
    }

    /// Get the client configuration
    pub fn config(&self) -> &HttpClientConfig {
        &self.config
    }

    /// Check if rate limiting is enabled
    pub fn has_rate_limiter(&self) -> bool {
        self.rate_limiter.is_some()
    }

    /// Make a GET request
    pub async fn get(&self, url: &str) -> Result<Response> {
        self.request(Method::GET, url, None).await
    }

    /// Make a request, retrying idempotent methods on transient failures
    ///
    /// Returns the response only for 2xx statuses; anything else becomes
    /// `Error::Api` once retries are exhausted.
    pub async fn request(&self, method: Method, url: &str, body: Option<&Value>) -> Result<Response> {
        let full_url = self.build_url(url);
        let policy = &self.config.retry;
        let mut attempt = 0;

        loop {
            attempt += 1;

            if let Some(ref limiter) = self.rate_limiter {
                limiter.wait().await;
            }

            let mut req = self
                .client
                .request(method.into(), &full_url)
                .header(reqwest::header::ACCEPT, ACCEPT_JSON);

            for (key, value) in &self.config.default_headers {
                req = req.header(key.as_str(), value.as_str());
            }

            if let Some(body) = body {
                req = req.json(body);
            }

            if let Some(ref provider) = self.token_provider {
                req = apply_bearer(req, provider.as_ref()).await?;
            }

            let response = match req.send().await {
                Ok(response) => response,
                Err(e) => {
                    let timed_out = e.is_timeout();
                    let err = Error::Http(e);
                    if err.is_retryable() && method.is_idempotent() && policy.has_attempts_left(attempt)
                    {
                        let delay = policy.backoff(attempt);
                        warn!(
                            "{} request failed ({err}), retry in {:?} (attempt {} of {})",
                            self.config.service_name, delay, attempt, policy.max_attempts
                        );
                        tokio::time::sleep(delay).await;
                        continue;
                    }
                    if timed_out {
                        return Err(Error::Timeout {
                            timeout_ms: self.config.timeout.as_millis() as u64,
                        });
                    }
                    return Err(err);
                }
            };

            let status = response.status();
            if status.is_success() {
                debug!("{} {} -> {}", method, full_url, status.as_u16());
                return Ok(response);
            }

            if policy.should_retry(method, status.as_u16()) && policy.has_attempts_left(attempt) {
                let delay = policy.delay(response.headers(), attempt);
                let request_id = response
                    .headers()
                    .get(REQUEST_ID_HEADER)
                    .and_then(|v| v.to_str().ok())
                    .unwrap_or("n/a");
                warn!(
                    "{} returned {} (reqId={}). Retry in {} ms (attempt {} of {})",
                    self.config.service_name,
                    status.as_u16(),
                    request_id,
                    delay.as_millis(),
                    attempt,
                    policy.max_attempts
                );
                tokio::time::sleep(delay).await;
                continue;
            }

            let body = response.text().await.unwrap_or_default();
            return Err(api_error(&self.config.service_name, status.as_u16(), &body));
        }
    }

    /// Build full URL from path
    fn build_url(&self, path: &str) -> String {
        if path.starts_with("http://") || path.starts_with("https://") {
            return path.to_string();
        }

        match &self.config.base_url {
            Some(base) => {
                let base = base.trim_end_matches('/');
                let path = path.trim_start_matches('/');
                format!("{base}/{path}")
            }
            None => path.to_string(),
        }
    }
}

impl std::fmt::Debug for HttpClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpClient")
            .field("config", &self.config)
            .field("has_token_provider", &self.token_provider.is_some())
            .field("has_rate_limiter", &self.rate_limiter.is_some())
            .finish_non_exhaustive()
    }
}

/// Build the error for a non-success response
///
/// `"<service> API error: <status>"`. A JSON body always adds
/// ` - <message>` (empty when absent) and ` - <errors>` when present;
/// a body that is not JSON adds ` - <body>`.
pub fn api_error(service_name: &str, status: u16, body: &str) -> Error {
    let mut message = format!("{service_name} API error: {status}");

    if !body.trim().is_empty() {
        match serde_json::from_str::<Value>(body) {
            Ok(node) => {
                message.push_str(" - ");
                message.push_str(&scalar_text(node.get("message")));
                if let Some(errors) = node.get("errors") {
                    message.push_str(" - ");
                    message.push_str(&errors.to_string());
                }
            }
            Err(_) => {
                message.push_str(" - ");
                message.push_str(body);
            }
        }
    }

    Error::api(status, message)
}

/// Text of a scalar JSON value; empty for null, containers or absence
fn scalar_text(value: Option<&Value>) -> String {
    match value {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        Some(Value::Bool(b)) => b.to_string(),
        _ => String::new(),
    }
}
