//! Pagination strategy implementations
//!
//! Each strategy handles a specific pagination pattern.

use super::types::{NextPage, Paginator};
use crate::link::{find_link, REL_NEXT};
use reqwest::header::{HeaderMap, LINK};
use tracing::debug;

// ============================================================================
// Link Header Pagination
// ============================================================================

/// Link header pagination (RFC 8288)
///
/// Extracts next page URL from the Link header.
/// Common in GitHub, GitLab APIs.
/// Format: `Link: <https://api.github.com/...?page=2>; rel="next", ...`
#[derive(Debug, Clone)]
pub struct LinkHeaderPaginator {
    /// Rel value to follow (default: "next")
    pub rel: String,
}

impl Default for LinkHeaderPaginator {
    fn default() -> Self {
        Self {
            rel: REL_NEXT.to_string(),
        }
    }
}

impl LinkHeaderPaginator {
    /// Create a new link header paginator
    pub fn new(rel: impl Into<String>) -> Self {
        Self { rel: rel.into() }
    }
}

impl Paginator for LinkHeaderPaginator {
    fn process_response(&self, headers: &HeaderMap) -> NextPage {
        // Only the first Link header is consulted
        let link_header = headers.get(LINK).and_then(|v| v.to_str().ok());
        match find_link(link_header, &self.rel) {
            Some(url) => NextPage::with_url(url),
            None => {
                debug!("No rel=\"{}\" link, pagination complete", self.rel);
                NextPage::Done
            }
        }
    }
}

// ============================================================================
// No Pagination
// ============================================================================

/// No pagination - single request
#[derive(Debug, Clone, Default)]
pub struct NoPaginator;

impl Paginator for NoPaginator {
    fn process_response(&self, _headers: &HeaderMap) -> NextPage {
        NextPage::Done
    }
}
