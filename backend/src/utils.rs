use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // An 11-character video token following `v=` or a path separator.
    static ref VIDEO_ID_PATTERN: Regex =
        Regex::new(r"(?:v=|/)([0-9A-Za-z_-]{11})").expect("video id pattern must compile");
    static ref HTML_TAG_PATTERN: Regex =
        Regex::new(r"<[^>]*>").expect("html tag pattern must compile");
}

pub fn extract_video_id(url: &str) -> Option<String> {
    VIDEO_ID_PATTERN
        .captures(url)
        .and_then(|captures| captures.get(1))
        .map(|m| m.as_str().to_string())
}

/// Removes `<...>` substrings from comment text before CSV export. A simple
/// bracket pattern, not an HTML parser.
pub fn strip_html_tags(text: &str) -> String {
    HTML_TAG_PATTERN.replace_all(text, "").into_owned()
}
