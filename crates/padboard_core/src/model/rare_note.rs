//! Rare-note front-matter parsing.
//!
//! # Responsibility
//! - Parse `---`-delimited front-matter blocks into content + properties.
//! - Keep parsing total: any input yields a usable rare note.
//!
//! # Invariants
//! - Property keys are trimmed and lowercased.
//! - A block without a `---` separator is all content, no properties.

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::BTreeMap;

static KEY_VALUE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^([^:]+):(.*)$").expect("valid key-value regex"));

/// Parsed rare-note block: header properties plus body text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RareNote {
    pub content: String,
    pub props: BTreeMap<String, String>,
}

impl RareNote {
    /// Watermark glyph declared in front matter, if any. Other header
    /// properties (themes, links) stay available through `props`; visuals
    /// are owned by the host.
    pub fn symbol(&self) -> Option<&str> {
        self.props.get("symbol").map(String::as_str)
    }
}

/// Parses a raw rare-note block.
///
/// Format: `key: value` header lines, a `---` separator, then the body.
/// Additional `---` sequences inside the body are preserved verbatim.
pub fn parse_front_matter(raw: &str) -> RareNote {
    let trimmed = raw.trim();
    let parts: Vec<&str> = trimmed.split("---").collect();

    if parts.len() < 2 {
        return RareNote {
            content: trimmed.to_string(),
            props: BTreeMap::new(),
        };
    }

    let header = parts[0].trim();
    let content = parts[1..].join("---").trim().to_string();

    let mut props = BTreeMap::new();
    for line in header.lines().map(str::trim).filter(|line| !line.is_empty()) {
        if let Some(caps) = KEY_VALUE_RE.captures(line) {
            let key = caps[1].trim().to_lowercase();
            let value = caps[2].trim().to_string();
            if !key.is_empty() {
                props.insert(key, value);
            }
        }
    }

    RareNote { content, props }
}

#[cfg(test)]
mod tests {
    use super::parse_front_matter;

    #[test]
    fn parses_header_props_and_body() {
        let parsed = parse_front_matter("symbol: \u{262f}\ntheme: Simple Light\n---\nBody text");
        assert_eq!(parsed.symbol(), Some("\u{262f}"));
        assert_eq!(
            parsed.props.get("theme").map(String::as_str),
            Some("Simple Light")
        );
        assert_eq!(parsed.content, "Body text");
    }

    #[test]
    fn plain_text_without_separator_is_all_content() {
        let parsed = parse_front_matter("  just a note  ");
        assert_eq!(parsed.content, "just a note");
        assert!(parsed.props.is_empty());
    }

    #[test]
    fn body_keeps_extra_separators() {
        let parsed = parse_front_matter("symbol: *\n---\nabove\n---\nbelow");
        assert_eq!(parsed.content, "above\n---\nbelow");
    }

    #[test]
    fn keys_are_lowercased_and_values_keep_colons() {
        let parsed = parse_front_matter("Link: https://example.com/a:b\n---\nx");
        assert_eq!(
            parsed.props.get("link").map(String::as_str),
            Some("https://example.com/a:b")
        );
    }

    #[test]
    fn header_lines_without_colon_are_ignored() {
        let parsed = parse_front_matter("no colon here\nsymbol: !\n---\nx");
        assert_eq!(parsed.props.len(), 1);
        assert_eq!(parsed.symbol(), Some("!"));
    }
}
