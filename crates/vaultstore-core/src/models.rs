//! Core data models representing vault documents and their metadata.
//!
//! These types are designed to be:
//! - **Serializable**: All types derive Serialize so the protocol layer can ship them as-is
//! - **Transient**: A [`Document`] is built fresh on every read and never cached
//! - **Type-Safe**: Frontmatter values are a closed set of variants, not free-form JSON

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// File extension of every document in a vault
pub const DOCUMENT_EXTENSION: &str = "md";

/// Frontmatter keys with dedicated fields; never stored in `custom`
pub const RESERVED_KEYS: [&str; 4] = ["tags", "title", "created", "modified"];

/// A frontmatter value restricted to the shapes the store round-trips
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MetadataValue {
    Boolean(bool),
    Integer(i64),
    Float(f64),
    String(String),
    StringList(Vec<String>),
}

impl MetadataValue {
    /// Convert a YAML node, returning `None` for unsupported shapes
    /// (mappings, nulls, tagged values, lists holding non-scalars).
    pub fn from_yaml(value: &serde_yaml::Value) -> Option<Self> {
        use serde_yaml::Value;
        match value {
            Value::Bool(b) => Some(Self::Boolean(*b)),
            Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Some(Self::Integer(i))
                } else {
                    n.as_f64().map(Self::Float)
                }
            }
            Value::String(s) => Some(Self::String(s.clone())),
            Value::Sequence(items) => items
                .iter()
                .map(yaml_scalar_to_string)
                .collect::<Option<Vec<_>>>()
                .map(Self::StringList),
            _ => None,
        }
    }

    /// Borrow as a string, if this is a string value
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    /// Interpret as a tag list: a single string is a one-element list
    pub fn as_string_list(&self) -> Option<Vec<String>> {
        match self {
            Self::String(s) => Some(vec![s.clone()]),
            Self::StringList(items) => Some(items.clone()),
            _ => None,
        }
    }
}

/// Render a scalar YAML node as a string; `None` for non-scalars and nulls
pub fn yaml_scalar_to_string(value: &serde_yaml::Value) -> Option<String> {
    use serde_yaml::Value;
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// Caller-supplied metadata mapping written as a document's frontmatter
pub type Metadata = BTreeMap<String, MetadataValue>;

/// Parse a frontmatter timestamp.
///
/// Accepts RFC 3339, `YYYY-MM-DDTHH:MM:SS[.f]`, `YYYY-MM-DD HH:MM:SS[.f]` and
/// `YYYY-MM-DD`. Values without an offset are taken as UTC.
pub fn parse_timestamp(text: &str) -> Option<DateTime<FixedOffset>> {
    let text = text.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Some(dt);
    }

    let utc = FixedOffset::east_opt(0)?;
    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(text, format) {
            return naive.and_local_timezone(utc).single();
        }
    }

    NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .and_then(|naive| naive.and_local_timezone(utc).single())
}

/// Structured metadata at the head of a document
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Frontmatter {
    /// Tags in file order; duplicates are kept
    pub tags: Vec<String>,
    pub title: Option<String>,
    pub created: Option<DateTime<FixedOffset>>,
    pub modified: Option<DateTime<FixedOffset>>,
    /// Every other supported key
    pub custom: BTreeMap<String, MetadataValue>,
}

impl Frontmatter {
    /// The metadata mapping that re-encodes this frontmatter.
    ///
    /// `tags` is always present so an otherwise empty frontmatter still
    /// produces a block.
    pub fn to_metadata(&self) -> Metadata {
        let mut metadata: Metadata = self.custom.clone();
        metadata.insert(
            "tags".to_string(),
            MetadataValue::StringList(self.tags.clone()),
        );
        if let Some(title) = &self.title {
            metadata.insert("title".to_string(), MetadataValue::String(title.clone()));
        }
        if let Some(created) = &self.created {
            metadata.insert(
                "created".to_string(),
                MetadataValue::String(created.to_rfc3339()),
            );
        }
        if let Some(modified) = &self.modified {
            metadata.insert(
                "modified".to_string(),
                MetadataValue::String(modified.to_rfc3339()),
            );
        }
        metadata
    }

    /// Whether any of `wanted` appears in this frontmatter's tags
    pub fn has_any_tag(&self, wanted: &[String]) -> bool {
        wanted.iter().any(|tag| self.tags.contains(tag))
    }
}

/// One markdown document as read from disk
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Document {
    /// Absolute, canonical path of the file
    pub path: PathBuf,
    /// Vault-relative path with forward slashes
    pub relative_path: String,
    /// Frontmatter title if present and non-empty, else the file stem
    pub title: String,
    /// Body with the frontmatter block stripped
    pub content: String,
    pub frontmatter: Option<Frontmatter>,
    /// Whitespace-delimited tokens in `content`
    pub word_count: usize,
}

impl Document {
    /// Assemble a document, deriving title and word count
    pub fn new(
        path: PathBuf,
        relative_path: String,
        frontmatter: Option<Frontmatter>,
        content: String,
    ) -> Self {
        let title = frontmatter
            .as_ref()
            .and_then(|fm| fm.title.as_deref())
            .filter(|t| !t.is_empty())
            .map(str::to_string)
            .unwrap_or_else(|| file_stem(&path));
        let word_count = content.split_whitespace().count();

        Self {
            path,
            relative_path,
            title,
            content,
            frontmatter,
            word_count,
        }
    }

    /// File name without extension
    pub fn stem(&self) -> String {
        file_stem(&self.path)
    }

    /// Tags from the frontmatter, empty when there is none
    pub fn tags(&self) -> &[String] {
        self.frontmatter
            .as_ref()
            .map(|fm| fm.tags.as_slice())
            .unwrap_or(&[])
    }
}

fn file_stem(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// A document that links to another one
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Backlink {
    /// Vault-relative path of the linking document
    pub source_path: String,
    pub source_title: String,
    /// Text around the first matching link, trimmed
    pub context: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metadata_value_from_yaml() {
        let v: serde_yaml::Value = serde_yaml::from_str("[a, 2, true]").unwrap();
        assert_eq!(
            MetadataValue::from_yaml(&v),
            Some(MetadataValue::StringList(vec![
                "a".to_string(),
                "2".to_string(),
                "true".to_string()
            ]))
        );

        let v: serde_yaml::Value = serde_yaml::from_str("3").unwrap();
        assert_eq!(MetadataValue::from_yaml(&v), Some(MetadataValue::Integer(3)));

        let v: serde_yaml::Value = serde_yaml::from_str("2.5").unwrap();
        assert_eq!(MetadataValue::from_yaml(&v), Some(MetadataValue::Float(2.5)));
    }

    #[test]
    fn test_unsupported_yaml_shapes_dropped() {
        for src in ["{a: 1}", "~", "[[nested]]", "[{a: 1}]"] {
            let v: serde_yaml::Value = serde_yaml::from_str(src).unwrap();
            assert_eq!(MetadataValue::from_yaml(&v), None, "{src}");
        }
    }

    #[test]
    fn test_parse_timestamp_formats() {
        assert!(parse_timestamp("2024-01-15T10:30:00+02:00").is_some());
        assert!(parse_timestamp("2024-01-15T10:30:00").is_some());
        assert!(parse_timestamp("2024-01-15 10:30:00").is_some());

        let date_only = parse_timestamp("2024-01-15").unwrap();
        assert_eq!(date_only.to_rfc3339(), "2024-01-15T00:00:00+00:00");

        assert!(parse_timestamp("yesterday").is_none());
        assert!(parse_timestamp("2024-13-45").is_none());
    }

    #[test]
    fn test_document_title_falls_back_to_stem() {
        let doc = Document::new(
            PathBuf::from("/vault/notes/My Note.md"),
            "notes/My Note.md".to_string(),
            Some(Frontmatter {
                title: Some(String::new()),
                ..Default::default()
            }),
            "one two\nthree".to_string(),
        );
        assert_eq!(doc.title, "My Note");
        assert_eq!(doc.word_count, 3);
        assert_eq!(doc.stem(), "My Note");
    }

    #[test]
    fn test_whitespace_title_is_kept() {
        let doc = Document::new(
            PathBuf::from("/vault/blank.md"),
            "blank.md".to_string(),
            Some(Frontmatter {
                title: Some("  ".to_string()),
                ..Default::default()
            }),
            String::new(),
        );
        assert_eq!(doc.title, "  ");
    }

    #[test]
    fn test_document_title_from_frontmatter() {
        let doc = Document::new(
            PathBuf::from("/vault/alpha.md"),
            "alpha.md".to_string(),
            Some(Frontmatter {
                title: Some("Project Alpha".to_string()),
                tags: vec!["project".to_string()],
                ..Default::default()
            }),
            String::new(),
        );
        assert_eq!(doc.title, "Project Alpha");
        assert_eq!(doc.word_count, 0);
        assert_eq!(doc.tags(), ["project".to_string()]);
    }

    #[test]
    fn test_to_metadata_includes_reserved_fields() {
        let fm = Frontmatter {
            tags: vec!["a".to_string()],
            title: Some("T".to_string()),
            created: parse_timestamp("2024-01-15"),
            modified: None,
            custom: BTreeMap::from([("priority".to_string(), MetadataValue::Integer(2))]),
        };
        let metadata = fm.to_metadata();
        assert_eq!(
            metadata.get("tags"),
            Some(&MetadataValue::StringList(vec!["a".to_string()]))
        );
        assert_eq!(metadata.get("title").and_then(|v| v.as_str()), Some("T"));
        assert_eq!(
            metadata.get("created").and_then(|v| v.as_str()),
            Some("2024-01-15T00:00:00+00:00")
        );
        assert!(!metadata.contains_key("modified"));
        assert_eq!(metadata.get("priority"), Some(&MetadataValue::Integer(2)));
    }

    #[test]
    fn test_metadata_value_json_untagged() {
        let parsed: Metadata =
            serde_json::from_str(r#"{"a": true, "b": 3, "c": 1.5, "d": "x", "e": ["y"]}"#)
                .unwrap();
        assert_eq!(parsed["a"], MetadataValue::Boolean(true));
        assert_eq!(parsed["b"], MetadataValue::Integer(3));
        assert_eq!(parsed["c"], MetadataValue::Float(1.5));
        assert_eq!(parsed["d"], MetadataValue::String("x".to_string()));
        assert_eq!(parsed["e"], MetadataValue::StringList(vec!["y".to_string()]));
    }
}
