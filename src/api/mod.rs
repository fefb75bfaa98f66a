//! REST API module
//!
//! URL construction for public and enterprise servers, plus the
//! `ApiClient` that issues requests and walks paginated collections.

mod client;
mod paths;

pub use client::{ApiClient, PAGE_SIZE_PARAM};
pub use paths::{append_params, build_api_url, join_paths, API_HOST, ENTERPRISE_PREFIX};
