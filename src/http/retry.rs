//! Retry policy
//!
//! Decides whether a failed response may be retried and how long to wait.
//! Server hints win over local backoff: `Retry-After` first, then
//! `X-RateLimit-Reset`, then the configured backoff plus jitter.

use crate::error::is_retryable_status;
use crate::types::{BackoffType, Method};
use chrono::Utc;
use reqwest::header::HeaderMap;
use std::time::Duration;

/// Header carrying a retry delay in seconds
pub const RETRY_AFTER: &str = "retry-after";

/// Header carrying the epoch second at which the rate limit window resets
pub const RATE_LIMIT_RESET: &str = "x-ratelimit-reset";

/// Retry configuration and delay computation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total attempts per request, including the first
    pub max_attempts: u32,
    /// Backoff strategy when the server gives no hint
    pub backoff_type: BackoffType,
    /// Delay before the second attempt
    pub initial_backoff: Duration,
    /// Upper bound of the backoff (before jitter)
    pub max_backoff: Duration,
    /// Upper bound (exclusive) of the random jitter
    pub max_jitter: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 5,
            backoff_type: BackoffType::Exponential,
            initial_backoff: Duration::from_secs(1),
            max_backoff: Duration::from_secs(8),
            max_jitter: Duration::from_millis(250),
        }
    }
}

impl RetryPolicy {
    /// A policy that never retries
    pub fn none() -> Self {
        Self {
            max_attempts: 1,
            ..Self::default()
        }
    }

    /// Only idempotent requests answered with 429/500/502/503 are retried
    pub fn should_retry(&self, method: Method, status: u16) -> bool {
        method.is_idempotent() && is_retryable_status(status)
    }

    /// Whether another attempt is allowed after `attempt` (1-based)
    pub fn has_attempts_left(&self, attempt: u32) -> bool {
        attempt < self.max_attempts
    }

    /// Delay before the attempt following `attempt` (1-based)
    pub fn delay(&self, headers: &HeaderMap, attempt: u32) -> Duration {
        self.delay_at(headers, attempt, Utc::now().timestamp())
    }

    /// Same as [`RetryPolicy::delay`] with an explicit clock (epoch seconds)
    pub fn delay_at(&self, headers: &HeaderMap, attempt: u32, now: i64) -> Duration {
        if let Some(seconds) = header_value::<u64>(headers, RETRY_AFTER) {
            return Duration::from_secs(seconds);
        }

        if let Some(reset) = header_value::<i64>(headers, RATE_LIMIT_RESET) {
            let delta = reset - now + 1;
            if reset > 0 && delta > 0 {
                return Duration::from_secs(delta as u64);
            }
        }

        self.backoff(attempt) + self.jitter()
    }

    /// Backoff for `attempt` (1-based), capped at `max_backoff`
    pub fn backoff(&self, attempt: u32) -> Duration {
        let attempt = attempt.max(1);
        let delay = match self.backoff_type {
            BackoffType::Constant => self.initial_backoff,
            BackoffType::Linear => self.initial_backoff.saturating_mul(attempt),
            BackoffType::Exponential => {
                let factor = 2u32.saturating_pow(attempt - 1);
                self.initial_backoff.saturating_mul(factor)
            }
        };

        std::cmp::min(delay, self.max_backoff)
    }

    fn jitter(&self) -> Duration {
        let bound = self.max_jitter.as_millis() as u64;
        if bound == 0 {
            return Duration::ZERO;
        }
        let seed = u64::from(Utc::now().timestamp_subsec_nanos());
        Duration::from_millis(seed % bound)
    }
}

fn header_value<T: std::str::FromStr>(headers: &HeaderMap, name: &str) -> Option<T> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .and_then(|s| s.trim().parse().ok())
}
