//! Inline markup segmentation.
//!
//! Assistant messages carry a small markdown-like vocabulary: bold
//! (`**..**`), links (`[label](url)`), and code spans (`` `..` ``). The
//! renderer consumes an ordered list of typed segments instead of raw text.
//!
//! Tokens are matched first-match-wins in a single left-to-right scan and
//! never nest. Malformed or unterminated tokens degrade to plain text with
//! their literal characters preserved.

use once_cell::sync::Lazy;
use regex::Regex;

/// One typed run of renderable text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    Plain(String),
    Bold(String),
    Link { label: String, url: String },
    Code(String),
}

static TOKEN_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\*\*(.+?)\*\*|\[([^\]]*)\]\(([^)]*)\)|`([^`]+)`").expect("valid markup pattern")
});

/// Splits text into ordered segments.
///
/// Text outside any token becomes `Plain`; the empty string yields an
/// empty vector.
pub fn parse_inline(content: &str) -> Vec<Segment> {
    let mut segments = Vec::new();
    let mut cursor = 0;

    for caps in TOKEN_PATTERN.captures_iter(content) {
        let whole = caps.get(0).expect("group 0 always present");
        if whole.start() > cursor {
            segments.push(Segment::Plain(content[cursor..whole.start()].to_string()));
        }

        if let Some(bold) = caps.get(1) {
            segments.push(Segment::Bold(bold.as_str().to_string()));
        } else if let Some(label) = caps.get(2) {
            let url = caps.get(3).map(|m| m.as_str()).unwrap_or_default();
            segments.push(Segment::Link {
                label: label.as_str().to_string(),
                url: url.to_string(),
            });
        } else if let Some(code) = caps.get(4) {
            segments.push(Segment::Code(code.as_str().to_string()));
        }

        cursor = whole.end();
    }

    if cursor < content.len() {
        segments.push(Segment::Plain(content[cursor..].to_string()));
    }

    segments
}
