//! Execution engine module
//!
//! Page walking loop.
//!
//! # Overview
//!
//! The engine module provides:
//! - `PageWalker` - Fetches a page, hands it to a handler, follows the next link
//! - `WalkConfig` - Limits for a walk
//! - `WalkStats` - Pages and records seen, and why the walk stopped

mod types;

pub use types::{StopReason, WalkConfig, WalkStats};

use crate::error::{Error, Result};
use crate::http::HttpClient;
use crate::pagination::{NextPage, Paginator};
use crate::types::JsonObject;
use std::time::Instant;
use tracing::{debug, info};

/// Walks a paginated collection endpoint
pub struct PageWalker<'a> {
    /// HTTP client
    client: &'a HttpClient,
    /// Strategy deciding the next page
    paginator: &'a dyn Paginator,
    /// Walk configuration
    config: WalkConfig,
}

impl<'a> PageWalker<'a> {
    /// Create a new page walker
    pub fn new(client: &'a HttpClient, paginator: &'a dyn Paginator) -> Self {
        Self {
            client,
            paginator,
            config: WalkConfig::default(),
        }
    }

    /// Set walk configuration
    #[must_use]
    pub fn with_config(mut self, config: WalkConfig) -> Self {
        self.config = config;
        self
    }

    /// Fetch pages starting at `first_url` until the paginator or the
    /// handler stops
    ///
    /// Each page must be a JSON array of objects. The handler returns
    /// `false` to stop early. An empty response body is an error.
    /// `max_pages` is checked before every request, so a limit of zero
    /// fetches nothing.
    pub async fn walk<F>(&self, first_url: &str, mut handler: F) -> Result<WalkStats>
    where
        F: FnMut(Vec<JsonObject>) -> bool,
    {
        let start = Instant::now();
        let service = &self.client.config().service_name;
        let mut stats = WalkStats::new();
        let mut request_url = Some(first_url.to_string());

        while let Some(url) = request_url.take() {
            if self
                .config
                .max_pages
                .is_some_and(|max| stats.pages >= max)
            {
                stats.stop_reason = StopReason::MaxPages;
                break;
            }

            let response = self.client.get(&url).await?;
            let headers = response.headers().clone();
            let body = response.text().await?;

            if body.trim().is_empty() {
                return Err(Error::empty_response(service.as_str()));
            }

            let page: Vec<JsonObject> = serde_json::from_str(&body)?;
            let record_count = page.len();
            stats.add_page(record_count);
            debug!("Page {}: fetched {record_count} records", stats.pages);

            if !handler(page) {
                stats.stop_reason = StopReason::Handler;
                break;
            }

            match self.paginator.process_response(&headers) {
                NextPage::Continue { url } => request_url = Some(url),
                NextPage::Done => stats.stop_reason = StopReason::LastPage,
            }
        }

        stats.set_duration(start.elapsed().as_millis() as u64);

        info!(
            "Walk complete: {} records in {} pages ({:?})",
            stats.records, stats.pages, stats.stop_reason
        );

        Ok(stats)
    }
}

#[cfg(test)]
mod tests;
