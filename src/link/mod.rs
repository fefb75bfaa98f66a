//! Link header navigation
//!
//! Extracts pagination targets from HTTP `Link` response headers
//! (`<url>; rel="next", <url>; rel="last"`).
//!
//! # Overview
//!
//! Parsing is tolerant: malformed entries are skipped and an absent,
//! empty or malformed header simply means "no such link". Nothing in
//! this module returns an error.

mod navigator;

pub use navigator::{find_link, find_next_link, parse_link_header, LinkEntry, LinkParam, REL_NEXT};

#[cfg(test)]
mod tests;
