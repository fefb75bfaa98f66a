//! CLI runner - executes commands

use crate::api::ApiClient;
use crate::cli::commands::{Cli, Commands, OutputFormat};
use crate::config::{load_config, ClientConfig};
use crate::engine::WalkConfig;
use crate::error::{Result, ResultExt};
use crate::link::{find_link, parse_link_header};
use crate::types::{JsonObject, StringMap};
use serde::Serialize;
use std::io::{self, Read, Write};
use std::process::ExitCode;
use tracing::info;

/// Default server when neither a config file nor `--base-url` is given
const DEFAULT_BASE_URL: &str = "https://github.com";

/// CLI runner
pub struct Runner {
    cli: Cli,
}

impl Runner {
    /// Create a new runner
    pub fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Run the CLI command
    pub async fn run(&self) -> Result<ExitCode> {
        match &self.cli.command {
            Commands::NextLink { header, rel } => self.next_link(header.as_deref(), rel),
            Commands::Links { header } => self.links(header.as_deref()),
            Commands::Walk {
                path,
                params,
                base_url,
                page_size,
                max_pages,
            } => {
                self.walk(path, params, base_url.as_deref(), *page_size, *max_pages)
                    .await
            }
        }
    }

    /// Print the URL for `rel`, or exit with failure when there is none
    fn next_link(&self, header: Option<&str>, rel: &str) -> Result<ExitCode> {
        let header = read_header(header)?;
        let found = write_next_link(&mut io::stdout(), &header, rel)?;

        if found {
            Ok(ExitCode::SUCCESS)
        } else {
            info!("No rel=\"{rel}\" link found");
            Ok(ExitCode::FAILURE)
        }
    }

    /// Print every parsed entry
    fn links(&self, header: Option<&str>) -> Result<ExitCode> {
        let header = read_header(header)?;
        write_links(&mut io::stdout(), &header, self.cli.format)?;
        Ok(ExitCode::SUCCESS)
    }

    /// Walk all pages of `path` and print every item
    async fn walk(
        &self,
        path: &str,
        params: &[(String, String)],
        base_url: Option<&str>,
        page_size: Option<u32>,
        max_pages: Option<usize>,
    ) -> Result<ExitCode> {
        let config = self.client_config(base_url)?;
        let client = ApiClient::from_config(&config)?;

        let params: StringMap = params.iter().cloned().collect();
        let page_size = page_size.unwrap_or(config.page_size);
        let walk_config = match max_pages {
            Some(max) => WalkConfig::new().with_max_pages(max),
            None => WalkConfig::new(),
        };

        let mut write_error = None;
        let stats = client
            .walk_pages(path, &params, page_size, walk_config, |page: Vec<JsonObject>| {
                let mut out = io::stdout();
                for item in &page {
                    if let Err(e) = write_value(&mut out, self.cli.format, item) {
                        write_error = Some(e);
                        return false;
                    }
                }
                true
            })
            .await?;

        if let Some(e) = write_error {
            return Err(e);
        }

        eprintln!(
            "{} records in {} pages ({} ms)",
            stats.records, stats.pages, stats.duration_ms
        );

        Ok(ExitCode::SUCCESS)
    }

    /// Load the config file (if any) and apply command-line overrides
    fn client_config(&self, base_url: Option<&str>) -> Result<ClientConfig> {
        let mut config = match &self.cli.config {
            Some(path) => load_config(path)
                .with_context(|| format!("Failed to load config '{}'", path.display()))?,
            None => ClientConfig::new(DEFAULT_BASE_URL),
        };

        if let Some(base_url) = base_url {
            config.base_url = base_url.to_string();
        }

        config.validate()?;
        Ok(config)
    }
}

/// Write the URL for `rel`; `false` (and nothing written) when there is none
fn write_next_link<W: Write>(out: &mut W, header: &str, rel: &str) -> Result<bool> {
    match find_link(Some(header), rel) {
        Some(url) => {
            writeln!(out, "{url}")?;
            Ok(true)
        }
        None => Ok(false),
    }
}

/// Write every parsed entry in the selected format
fn write_links<W: Write>(out: &mut W, header: &str, format: OutputFormat) -> Result<usize> {
    let entries = parse_link_header(header);
    for entry in &entries {
        write_value(out, format, entry)?;
    }
    Ok(entries.len())
}

/// Write one value in the selected format
fn write_value<W: Write, T: Serialize>(out: &mut W, format: OutputFormat, value: &T) -> Result<()> {
    let line = match format {
        OutputFormat::Json => serde_json::to_string(value)?,
        OutputFormat::Pretty => serde_json::to_string_pretty(value)?,
    };
    writeln!(out, "{line}")?;
    Ok(())
}

/// Header from the argument, or stdin when absent
///
/// A leading `Link:` field name is accepted and stripped.
fn read_header(header: Option<&str>) -> Result<String> {
    let raw = match header {
        Some(header) => header.to_string(),
        None => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read header from stdin")?;
            buf
        }
    };

    Ok(strip_field_name(raw.trim()).to_string())
}

fn strip_field_name(header: &str) -> &str {
    match header.split_once(':') {
        Some((name, value)) if name.trim().eq_ignore_ascii_case("link") => value.trim(),
        _ => header,
    }
}
