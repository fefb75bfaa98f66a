//! HTTP client module
//!
//! Provides the HTTP client used by the API layer.
//!
//! # Features
//!
//! - **Automatic Retries**: idempotent requests retried on 429/500/502/503
//! - **Server Hints**: `Retry-After` and `X-RateLimit-Reset` drive the delay
//! - **Rate Limiting**: Optional token bucket rate limiter using governor
//! - **Authentication**: Bearer tokens from an `AccessTokenProvider`

mod client;
mod rate_limit;
mod retry;

pub use client::{api_error, HttpClient, HttpClientConfig, HttpClientConfigBuilder, ACCEPT_JSON};
pub use rate_limit::{RateLimiter, RateLimiterConfig};
pub use retry::{RetryPolicy, RATE_LIMIT_RESET, RETRY_AFTER};
