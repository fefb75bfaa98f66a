// Allow common clippy pedantic lints that aren't critical for this codebase
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_lossless)]
#![allow(clippy::unused_self)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::items_after_statements)]
#![allow(clippy::unnecessary_wraps)]
#![allow(clippy::match_same_arms)]
#![allow(clippy::needless_pass_by_value)]
#![allow(clippy::unused_async)]

//! # linkwalk
//!
//! Follow `Link` header pagination on REST APIs.
//!
//! ## Features
//!
//! - **Link Header Navigation**: find the `rel="next"` URL (or any other
//!   relation) in a `Link` response header, tolerant of malformed input
//! - **API Client**: public and enterprise servers, bearer tokens,
//!   JSON objects, arrays and fire-and-forget requests
//! - **Page Walking**: fetch every page of a collection with `per_page`
//! - **Retries**: idempotent requests retried on 429/500/502/503 using
//!   `Retry-After` / `X-RateLimit-Reset` hints or capped exponential backoff
//!
//! ## Quick Start
//!
//! ```rust
//! use linkwalk::find_next_link;
//!
//! let header = r#"<https://api.github.com/repositories/1/issues?page=2>; rel="next", <https://api.github.com/repositories/1/issues?page=5>; rel="last""#;
//!
//! assert_eq!(
//!     find_next_link(Some(header)).as_deref(),
//!     Some("https://api.github.com/repositories/1/issues?page=2")
//! );
//! assert_eq!(find_next_link(None), None);
//! ```
//!
//! ```rust,ignore
//! use linkwalk::{ApiClient, ClientConfig, Result, StringMap};
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let client = ApiClient::from_config(&ClientConfig::new("https://github.com"))?;
//!
//!     let stats = client
//!         .for_each_page("/repos/owner/repo/issues", &StringMap::new(), 100, |page| {
//!             println!("{} issues", page.len());
//!             true
//!         })
//!         .await?;
//!
//!     println!("{} pages", stats.pages);
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                        ApiClient                         │
//! │  single_object()  single_array()  void_result()          │
//! │  for_each_page(path, params, page_size, handler)         │
//! └──────────────────────────────────────────────────────────┘
//!                              │
//! ┌────────────┬───────────────┼──────────────┬──────────────┐
//! │    Auth    │     HTTP      │  Pagination  │     Link     │
//! ├────────────┼───────────────┼──────────────┼──────────────┤
//! │ Static     │ Retry/Backoff │ Link Header  │ find_link    │
//! │ Env var    │ Rate Limit    │ None         │ parse header │
//! └────────────┴───────────────┴──────────────┴──────────────┘
//! ```

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]

// ============================================================================
// Module declarations
// ============================================================================

/// Error types
pub mod error;

/// Common types and type aliases
pub mod types;

/// Link header parsing
pub mod link;

/// Access token providers
pub mod auth;

/// HTTP client with retry and rate limiting
pub mod http;

/// Pagination strategies
pub mod pagination;

/// Page walking loop
pub mod engine;

/// Client configuration
pub mod config;

/// REST API client
pub mod api;

/// Command-line interface
pub mod cli;

// ============================================================================
// Re-exports
// ============================================================================

pub use error::{Error, Result};
pub use types::*;

// Re-export commonly used types
pub use api::ApiClient;
pub use config::{load_config, load_config_from_str, ClientConfig};
pub use engine::{StopReason, WalkConfig, WalkStats};
pub use link::{find_link, find_next_link, parse_link_header, LinkEntry};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
