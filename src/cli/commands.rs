//! CLI commands and argument parsing

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Follow Link header pagination from the command line
#[derive(Parser, Debug)]
#[command(name = "linkwalk")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Client configuration file (YAML or JSON)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Output format
    #[arg(short, long, global = true, default_value = "json")]
    pub format: OutputFormat,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print the rel="next" URL of a Link header (exit code 1 if none)
    NextLink {
        /// Link header value (read from stdin when omitted)
        header: Option<String>,

        /// Relation to look for
        #[arg(long, default_value = "next")]
        rel: String,
    },

    /// Print every entry of a Link header
    Links {
        /// Link header value (read from stdin when omitted)
        header: Option<String>,
    },

    /// Fetch every page of a collection endpoint
    Walk {
        /// API path (e.g. /repos/owner/repo/issues)
        path: String,

        /// Query parameter as key=value (repeatable)
        #[arg(short, long = "param", value_parser = parse_key_value)]
        params: Vec<(String, String)>,

        /// Server base URL (overrides the config file)
        #[arg(long)]
        base_url: Option<String>,

        /// Items per page (overrides the config file)
        #[arg(long)]
        page_size: Option<u32>,

        /// Stop after this many pages
        #[arg(long)]
        max_pages: Option<usize>,
    },
}

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON output (one item per line)
    Json,
    /// Human-readable output
    Pretty,
}

/// Parse a `key=value` argument
pub fn parse_key_value(s: &str) -> Result<(String, String), String> {
    let (key, value) = s
        .split_once('=')
        .ok_or_else(|| format!("expected key=value, got '{s}'"))?;
    if key.is_empty() {
        return Err(format!("empty key in '{s}'"));
    }
    Ok((key.to_string(), value.to_string()))
}
