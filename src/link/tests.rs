//! Tests for the link header navigator

use super::*;
use pretty_assertions::assert_eq;
use test_case::test_case;

const NEXT_AND_LAST: &str = "<https://api.example.com/x?page=2>; rel=\"next\", \
                             <https://api.example.com/x?page=34>; rel=\"last\"";

// ============================================================================
// find_next_link
// ============================================================================

#[test]
fn test_next_and_last_returns_next() {
    assert_eq!(
        find_next_link(Some(NEXT_AND_LAST)),
        Some("https://api.example.com/x?page=2".to_string())
    );
}

#[test]
fn test_github_style_header() {
    let header = "<https://api.github.com/repos/o/r/issues?per_page=100&page=2>; rel=\"next\", \
                  <https://api.github.com/repos/o/r/issues?per_page=100&page=34>; rel=\"last\"";
    assert_eq!(
        find_next_link(Some(header)),
        Some("https://api.github.com/repos/o/r/issues?per_page=100&page=2".to_string())
    );
}

#[test]
fn test_only_last_returns_none() {
    let header = "<https://api.example.com/x?page=34>; rel=\"last\"";
    assert_eq!(find_next_link(Some(header)), None);
}

#[test_case(None ; "absent")]
#[test_case(Some("") ; "empty")]
#[test_case(Some("   ") ; "spaces")]
#[test_case(Some(" \t \t") ; "tabs")]
fn test_blank_input_returns_none(header: Option<&str>) {
    assert_eq!(find_next_link(header), None);
}

#[test]
fn test_mixed_order_spaces_and_tabs() {
    let header = " <https://h/x?page=3>\t; rel=\"prev\", \
                  <https://h/x?page=5>;   rel=\"next\" , \
                  <https://h/x?page=9>; rel=\"last\"";
    assert_eq!(
        find_next_link(Some(header)),
        Some("https://h/x?page=5".to_string())
    );
}

#[test_case("<https://h/x?page=5>; rel = \"next\"" ; "spaces around equals")]
#[test_case("<https://h/x?page=5>;\trel\t=\t\"next\"\t" ; "tabs around equals")]
#[test_case("\t<https://h/x?page=5>\t;\trel=\"next\"" ; "tabs around delimiters")]
#[test_case("<https://h/x?page=1>; rel=\"prev\" ,\t<https://h/x?page=5> ; rel=\"next\"" ; "tab after comma")]
fn test_whitespace_is_insignificant(header: &str) {
    assert_eq!(
        find_next_link(Some(header)),
        Some("https://h/x?page=5".to_string())
    );
}

#[test]
fn test_first_prev_last_without_next() {
    let header = "<https://h/x?page=1>; rel=\"first\", \
                  <https://h/x?page=3>; rel=\"prev\", \
                  <https://h/x?page=9>; rel=\"last\"";
    assert_eq!(find_next_link(Some(header)), None);
}

#[test]
fn test_first_next_wins() {
    let header = "<https://h/x?page=2>; rel=\"next\", <https://h/x?page=7>; rel=\"next\"";
    assert_eq!(
        find_next_link(Some(header)),
        Some("https://h/x?page=2".to_string())
    );
}

#[test_case("<https://h/x?page=2>; rel=\"NEXT\"" ; "uppercase value")]
#[test_case("<https://h/x?page=2>; rel=next" ; "unquoted value")]
#[test_case("<https://h/x?page=2>; rel=\"nextpage\"" ; "longer value")]
#[test_case("<https://h/x?page=2>; rel=\"next last\"" ; "relation list")]
#[test_case("<https://h/x?page=2>; title=\"next\"" ; "other parameter")]
#[test_case("https://h/x?page=2; rel=\"next\"" ; "missing brackets")]
#[test_case("<https://h/x?page=2; rel=\"next\"" ; "unclosed bracket")]
#[test_case("<>; rel=\"next\"" ; "empty url")]
fn test_non_matching_entries(header: &str) {
    assert_eq!(find_next_link(Some(header)), None);
}

#[test]
fn test_malformed_entry_is_skipped() {
    let header = "garbage; rel=\"next\", <https://h/x?page=4>; rel=\"next\"";
    assert_eq!(
        find_next_link(Some(header)),
        Some("https://h/x?page=4".to_string())
    );
}

#[test]
fn test_empty_url_entry_is_skipped() {
    let header = "<>; rel=\"next\", <https://h/x?page=4>; rel=\"next\"";
    assert_eq!(
        find_next_link(Some(header)),
        Some("https://h/x?page=4".to_string())
    );
    assert_eq!(parse_link_header("<>; rel=\"next\"").len(), 0);
}

#[test]
fn test_url_is_returned_verbatim() {
    let header = "<https://h/search?q=a%20b&sort=created>; rel=\"next\"";
    assert_eq!(
        find_next_link(Some(header)),
        Some("https://h/search?q=a%20b&sort=created".to_string())
    );
}

#[test]
fn test_extra_parameters_are_ignored() {
    let header = "<https://h/x?page=2>; type=\"application/json\"; rel=\"next\"; title=\"Page 2\"";
    assert_eq!(
        find_next_link(Some(header)),
        Some("https://h/x?page=2".to_string())
    );
}

#[test]
fn test_repeated_calls_are_stable() {
    let first = find_next_link(Some(NEXT_AND_LAST));
    let second = find_next_link(Some(NEXT_AND_LAST));
    assert_eq!(first, second);
}

// ============================================================================
// find_link
// ============================================================================

#[test_case("first", Some("https://h/x?page=1") ; "first")]
#[test_case("prev", Some("https://h/x?page=3") ; "prev")]
#[test_case("last", Some("https://h/x?page=9") ; "last")]
#[test_case("next", None ; "next missing")]
fn test_find_link_by_rel(rel: &str, expected: Option<&str>) {
    let header = "<https://h/x?page=1>; rel=\"first\", \
                  <https://h/x?page=3>; rel=\"prev\", \
                  <https://h/x?page=9>; rel=\"last\"";
    assert_eq!(
        find_link(Some(header), rel),
        expected.map(ToString::to_string)
    );
}

// ============================================================================
// parse_link_header
// ============================================================================

#[test]
fn test_parse_link_header_entries() {
    let entries = parse_link_header(NEXT_AND_LAST);

    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0].url, "https://api.example.com/x?page=2");
    assert_eq!(entries[0].rel(), Some("next"));
    assert!(entries[0].has_rel("next"));
    assert_eq!(entries[1].url, "https://api.example.com/x?page=34");
    assert_eq!(entries[1].rel(), Some("last"));
}

#[test]
fn test_parse_link_header_params() {
    let entries = parse_link_header("<https://h/x>; rel=next; title=\"Page two\"; flag");

    assert_eq!(entries.len(), 1);
    let entry = &entries[0];
    assert_eq!(entry.params.len(), 2);
    assert_eq!(entry.rel(), Some("next"));
    assert!(!entry.has_rel("next"));
    assert_eq!(entry.param("title"), Some("Page two"));
    assert!(entry.params[1].quoted);
}

#[test]
fn test_parse_link_header_drops_malformed() {
    let entries = parse_link_header("nope, <https://h/x?page=2>; rel=\"next\", ");
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].url, "https://h/x?page=2");
}

#[test]
fn test_parse_link_header_empty() {
    assert!(parse_link_header("").is_empty());
    assert!(parse_link_header("  \t ").is_empty());
}
