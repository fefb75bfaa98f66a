//! Pagination types and traits
//!
//! Defines the core pagination abstractions used by all strategies.

use super::strategies::{LinkHeaderPaginator, NoPaginator};
use crate::link::REL_NEXT;
use reqwest::header::HeaderMap;
use serde::{Deserialize, Serialize};

/// Result of the next page computation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NextPage {
    /// More pages available at this URL
    Continue {
        /// URL of the next page, used verbatim
        url: String,
    },
    /// No more pages
    Done,
}

impl NextPage {
    /// Create a continuation with a new URL
    pub fn with_url(url: impl Into<String>) -> Self {
        Self::Continue { url: url.into() }
    }

    /// Check if this is a done result
    pub fn is_done(&self) -> bool {
        matches!(self, Self::Done)
    }

    /// Check if this is a continue result
    pub fn is_continue(&self) -> bool {
        matches!(self, Self::Continue { .. })
    }

    /// URL of the next page, if any
    pub fn url(&self) -> Option<&str> {
        match self {
            Self::Continue { url } => Some(url),
            Self::Done => None,
        }
    }
}

/// Configuration for pagination behavior
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PaginationConfig {
    /// Single request
    None,

    /// Link header pagination (RFC 8288)
    LinkHeader {
        /// Rel value to follow (default: "next")
        #[serde(default = "default_rel")]
        rel: String,
    },
}

impl Default for PaginationConfig {
    fn default() -> Self {
        Self::LinkHeader { rel: default_rel() }
    }
}

fn default_rel() -> String {
    REL_NEXT.to_string()
}

impl PaginationConfig {
    /// Create link header pagination config
    pub fn link_header(rel: impl Into<String>) -> Self {
        Self::LinkHeader { rel: rel.into() }
    }

    /// Build the paginator for this config
    pub fn build(&self) -> Box<dyn Paginator> {
        match self {
            Self::None => Box::new(NoPaginator),
            Self::LinkHeader { rel } => Box::new(LinkHeaderPaginator::new(rel.clone())),
        }
    }
}

/// Core trait for pagination strategies
pub trait Paginator: Send + Sync {
    /// Inspect a response and determine if there's a next page
    fn process_response(&self, headers: &HeaderMap) -> NextPage;
}
