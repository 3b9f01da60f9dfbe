//! `Link` header parsing

use regex::Regex;
use std::sync::LazyLock;

static LINK_ENTRY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<([^>]*)>\s*((?:;[^,<]*)*)").expect("Invalid link header regex"));

/// URL of the `rel="next"` relation, if the header has one
pub fn next_link(header: &str) -> Option<String> {
    LINK_ENTRY.captures_iter(header).find_map(|caps| {
        let params = caps.get(2)?.as_str();
        let is_next = params.split(';').any(|param| {
            let mut parts = param.splitn(2, '=');
            let key = parts.next().unwrap_or_default().trim();
            let value = parts.next().unwrap_or_default().trim().trim_matches('"');
            key.eq_ignore_ascii_case("rel") && value.split_whitespace().any(|rel| rel == "next")
        });
        is_next.then(|| caps[1].to_string())
    })
}
