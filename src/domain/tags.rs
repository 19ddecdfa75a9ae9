//! Hashtag extraction from reflections

use regex::Regex;
use std::collections::BTreeSet;
use std::sync::OnceLock;

/// Regex for matching hashtags: `#` followed by ASCII word characters
fn tag_regex() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX.get_or_init(|| Regex::new(r"#([A-Za-z0-9_]+)").unwrap())
}

/// Extract the set of tags from a reflection (normalized to lowercase).
///
/// `"I love #Nature and #nature too"` yields `{"nature"}`.
pub fn extract_tags(text: &str) -> BTreeSet<String> {
    tag_regex()
        .captures_iter(text)
        .map(|cap| cap[1].to_lowercase())
        .collect()
}

/// Normalize a user-supplied tag query: strips a leading `#` and lowercases.
pub fn normalize_tag(tag: &str) -> String {
    tag.trim().trim_start_matches('#').to_lowercase()
}
