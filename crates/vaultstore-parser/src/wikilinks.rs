//! Wikilink extraction: `[[Target]]`, `[[Target|Alias]]`, `![[Embed]]`

use regex::Regex;
use std::sync::LazyLock;

/// `[[target]]` or `[[target|display]]`; the target stops at `]` or `|`
static WIKILINK_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[\[([^\]|]+)(?:\|([^\]]*))?\]\]").unwrap());

/// One wikilink occurrence in a document body
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WikiLinkRef {
    /// Link target as written, trimmed
    pub target: String,
    /// Alias text after `|`, if any
    pub display: Option<String>,
    /// Byte offset of the opening `[[`
    pub start: usize,
    /// Byte offset just past the closing `]]`
    pub end: usize,
}

/// All wikilinks in `content`, in document order
pub fn extract_wikilinks(content: &str) -> Vec<WikiLinkRef> {
    WIKILINK_PATTERN
        .captures_iter(content)
        .filter_map(|caps| {
            let whole = caps.get(0)?;
            let target = caps.get(1)?.as_str().trim();
            if target.is_empty() {
                return None;
            }
            Some(WikiLinkRef {
                target: target.to_string(),
                display: caps.get(2).map(|m| m.as_str().trim().to_string()),
                start: whole.start(),
                end: whole.end(),
            })
        })
        .collect()
}

/// Drop a trailing `.md` so `[[Note]]` and `[[Note.md]]` name the same document
pub fn normalize_link_name(name: &str) -> &str {
    name.strip_suffix(".md").unwrap_or(name)
}

/// Whether a link target names the document called `document_name`
pub fn link_targets(target: &str, document_name: &str) -> bool {
    normalize_link_name(target) == normalize_link_name(document_name)
}
