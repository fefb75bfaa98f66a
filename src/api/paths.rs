//! API URL construction
//!
//! Maps a server base URL (as a user would type it) to the REST API root:
//! `github.com` is served from `api.github.com`, enterprise servers from
//! `/api/v3` on their own host.

use crate::error::{Error, Result};
use url::form_urlencoded::byte_serialize;
use url::Url;

/// Host of the public REST API
pub const API_HOST: &str = "api.github.com";

/// Path prefix of the REST API on enterprise hosts
pub const ENTERPRISE_PREFIX: &str = "/api/v3";

/// Hosts whose API lives on `API_HOST`
const PUBLIC_HOSTS: [&str; 2] = ["github.com", "gist.github.com"];

/// Build the absolute API URL for `path`
///
/// Scheme and port of `base_url` are kept; its path is ignored.
///
/// ```
/// use linkwalk::api::build_api_url;
///
/// assert_eq!(
///     build_api_url("https://github.com", "/repos/o/r").unwrap(),
///     "https://api.github.com/repos/o/r"
/// );
/// assert_eq!(
///     build_api_url("https://ghe.example.com:8443", "repos/o/r").unwrap(),
///     "https://ghe.example.com:8443/api/v3/repos/o/r"
/// );
/// ```
pub fn build_api_url(base_url: &str, path: &str) -> Result<String> {
    let base = Url::parse(base_url)?;
    let mut host = base
        .host_str()
        .ok_or_else(|| Error::invalid_value("base_url", format!("no host in '{base_url}'")))?;

    if PUBLIC_HOSTS.contains(&host) {
        host = API_HOST;
    }

    let prefix = (host != API_HOST).then_some(ENTERPRISE_PREFIX);

    let mut url = format!("{}://{}", base.scheme(), host);
    if let Some(port) = base.port() {
        url.push_str(&format!(":{port}"));
    }
    url.push_str(&join_paths(prefix, path));

    Ok(Url::parse(&url)?.to_string())
}

/// Join an optional prefix and a path with exactly one `/` between them
pub fn join_paths(prefix: Option<&str>, path: &str) -> String {
    let path = if path.starts_with('/') {
        path.to_string()
    } else {
        format!("/{path}")
    };

    match prefix {
        Some(prefix) => format!("{}{}", prefix.strip_suffix('/').unwrap_or(prefix), path),
        None => path,
    }
}

/// Append URL-encoded query parameters
///
/// Uses `&` when the URL already has a query. Spaces are encoded as `%20`.
pub fn append_params<'a, I>(url: &str, params: I) -> String
where
    I: IntoIterator<Item = (&'a String, &'a String)>,
{
    let mut result = url.to_string();
    let mut sep = if url.contains('?') { '&' } else { '?' };

    for (key, value) in params {
        result.push(sep);
        result.push_str(&encode(key));
        result.push('=');
        result.push_str(&encode(value));
        sep = '&';
    }

    result
}

fn encode(s: &str) -> String {
    byte_serialize(s.as_bytes())
        .collect::<String>()
        .replace('+', "%20")
}
