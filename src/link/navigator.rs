//! Link header parsing
//!
//! Format: `<https://api.github.com/...?page=2>; rel="next", <...>; rel="last"`
//!
//! Entries are split on `,`, so a URL containing a literal comma is not
//! supported. Entries without a non-empty `<...>` pair are dropped.

use regex::Regex;
use serde::Serialize;
use std::sync::LazyLock;

/// Relation type followed by page walkers
pub const REL_NEXT: &str = "next";

/// Regex for a single `key=value` or `key="value"` link parameter
static PARAM_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"^([^=\s"]+)\s*=\s*(?:"([^"]*)"|([^"\s]*))$"#).unwrap()
});

/// A parameter attached to a link entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LinkParam {
    /// Parameter name (e.g., "rel")
    pub name: String,
    /// Parameter value with surrounding quotes removed
    pub value: String,
    /// Whether the value was written as a double-quoted string
    #[serde(skip)]
    pub quoted: bool,
}

/// One `<url>; key="value"` entry of a Link header
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LinkEntry {
    /// Target URL, exactly as written between the angle brackets
    pub url: String,
    /// Parameters in header order
    pub params: Vec<LinkParam>,
}

impl LinkEntry {
    /// Value of the first `rel` parameter, if any
    pub fn rel(&self) -> Option<&str> {
        self.param("rel")
    }

    /// Value of the first parameter with the given name
    pub fn param(&self, name: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|p| p.name == name)
            .map(|p| p.value.as_str())
    }

    /// Whether this entry carries `rel="<rel>"` (quoted, case-sensitive)
    pub fn has_rel(&self, rel: &str) -> bool {
        self.params
            .iter()
            .any(|p| p.name == "rel" && p.quoted && p.value == rel)
    }
}

/// Find the `rel="next"` URL in a Link header
///
/// Returns `None` when the header is absent, blank, malformed or has no
/// next entry. When several entries are tagged `next`, the first one wins.
///
/// ```
/// use linkwalk::link::find_next_link;
///
/// let header = r#"<https://api.example.com/x?page=2>; rel="next", <https://api.example.com/x?page=34>; rel="last""#;
/// assert_eq!(
///     find_next_link(Some(header)).as_deref(),
///     Some("https://api.example.com/x?page=2")
/// );
/// assert_eq!(find_next_link(None), None);
/// ```
pub fn find_next_link(header: Option<&str>) -> Option<String> {
    find_link(header, REL_NEXT)
}

/// Find the URL of the first entry tagged `rel="<rel>"`
pub fn find_link(header: Option<&str>, rel: &str) -> Option<String> {
    let header = header?;
    if header.trim().is_empty() {
        return None;
    }

    header
        .split(',')
        .filter_map(parse_entry)
        .find(|entry| entry.has_rel(rel))
        .map(|entry| entry.url)
}

/// Parse every well-formed entry of a Link header, in header order
pub fn parse_link_header(header: &str) -> Vec<LinkEntry> {
    header.split(',').filter_map(parse_entry).collect()
}

fn parse_entry(raw: &str) -> Option<LinkEntry> {
    let raw = raw.trim();
    let open = raw.find('<')?;
    let close = open + raw[open..].find('>')?;

    let url = &raw[open + 1..close];
    if url.is_empty() {
        return None;
    }
    let params = raw[close + 1..]
        .split(';')
        .map(str::trim)
        .filter(|piece| !piece.is_empty())
        .filter_map(parse_param)
        .collect();

    Some(LinkEntry {
        url: url.to_string(),
        params,
    })
}

fn parse_param(piece: &str) -> Option<LinkParam> {
    let caps = PARAM_REGEX.captures(piece)?;
    let name = caps.get(1)?.as_str().to_string();

    let (value, quoted) = match (caps.get(2), caps.get(3)) {
        (Some(quoted), _) => (quoted.as_str(), true),
        (None, Some(bare)) => (bare.as_str(), false),
        (None, None) => return None,
    };

    Some(LinkParam {
        name,
        value: value.to_string(),
        quoted,
    })
}
