//! Pagination module
//!
//! Supports: Link Header, single request
//!
//! # Overview
//!
//! The pagination module provides a unified interface for deciding whether
//! another page exists after a response. Each strategy inspects the
//! response and tracks when pagination is complete.

mod strategies;
mod types;

pub use strategies::{LinkHeaderPaginator, NoPaginator};
pub use types::{NextPage, PaginationConfig, Paginator};
