//! CLI module
//!
//! Command-line interface for Link header navigation.
//!
//! # Commands
//!
//! - `next-link` - Print the `rel="next"` URL of a header
//! - `links` - Print every entry of a header
//! - `walk` - Fetch every page of a collection endpoint

mod commands;
mod runner;

pub use commands::{parse_key_value, Cli, Commands, OutputFormat};
pub use runner::Runner;
