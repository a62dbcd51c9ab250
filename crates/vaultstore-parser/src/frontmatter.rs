//! Frontmatter codec: `---\nYAML\n---\nbody`
//!
//! Decoding never fails a read. A block that does not parse falls back to
//! "no frontmatter, whole text is body" and the parse error is only logged.

use regex::Regex;
use serde_yaml::{Mapping, Value};
use std::sync::LazyLock;
use vaultstore_core::{
    Error, Frontmatter, Metadata, MetadataValue, RESERVED_KEYS, Result, parse_timestamp,
    yaml_scalar_to_string,
};

/// Matches a leading `---` line, the YAML payload, and the closing `---` line
static FRONTMATTER_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?ms)\A---[ \t]*\r?\n(.*?)^---[ \t]*(?:\r?\n|\z)").unwrap()
});

/// A raw document split at its frontmatter block
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawSplit<'a> {
    /// The whole block including both delimiter lines
    pub block: &'a str,
    /// YAML between the delimiters
    pub yaml: &'a str,
    /// Everything after the closing delimiter line
    pub body: &'a str,
}

/// Split off a leading frontmatter block without interpreting it
pub fn split_block(raw: &str) -> Option<RawSplit<'_>> {
    let caps = FRONTMATTER_PATTERN.captures(raw)?;
    let whole = caps.get(0)?;
    let yaml = caps.get(1).map(|m| m.as_str()).unwrap_or("");

    Some(RawSplit {
        block: whole.as_str(),
        yaml,
        body: &raw[whole.end()..],
    })
}

/// Decode strictly: malformed YAML is an error.
pub fn try_decode(raw: &str) -> Result<(Option<Frontmatter>, String)> {
    let Some(split) = split_block(raw) else {
        return Ok((None, raw.to_string()));
    };

    let value: Value = serde_yaml::from_str(split.yaml)
        .map_err(|e| Error::malformed_metadata(e.to_string()))?;

    let frontmatter = match value {
        Value::Null => None,
        Value::Mapping(mapping) if mapping.is_empty() => None,
        Value::Mapping(mapping) => Some(frontmatter_from_mapping(&mapping)),
        _ => {
            return Err(Error::malformed_metadata(
                "frontmatter block is not a key/value mapping",
            ));
        }
    };

    Ok((frontmatter, split.body.to_string()))
}

/// Decode with fallback: on malformed metadata the entire text is the body.
pub fn decode(raw: &str) -> (Option<Frontmatter>, String) {
    match try_decode(raw) {
        Ok(decoded) => decoded,
        Err(e) => {
            log::warn!("vault.frontmatter_parse_failed: {}", e);
            (None, raw.to_string())
        }
    }
}

/// Serialize `metadata` as a leading block followed by `body`.
///
/// Absent or empty metadata yields the body unchanged.
pub fn encode(body: &str, metadata: Option<&Metadata>) -> Result<String> {
    let Some(metadata) = metadata.filter(|m| !m.is_empty()) else {
        return Ok(body.to_string());
    };

    let yaml = serde_yaml::to_string(metadata)
        .map_err(|e| Error::malformed_metadata(format!("cannot serialize metadata: {}", e)))?;

    Ok(format!("---\n{}---\n{}", yaml, body))
}

fn frontmatter_from_mapping(mapping: &Mapping) -> Frontmatter {
    let mut fm = Frontmatter::default();

    for (key, value) in mapping {
        let Some(key) = key.as_str() else {
            log::warn!("vault.frontmatter_key_dropped: non-string key {:?}", key);
            continue;
        };

        match key {
            "tags" => fm.tags = tags_from(value),
            "title" => fm.title = yaml_scalar_to_string(value),
            "created" => fm.created = value.as_str().and_then(parse_timestamp),
            "modified" => fm.modified = value.as_str().and_then(parse_timestamp),
            _ => match MetadataValue::from_yaml(value) {
                Some(v) => {
                    fm.custom.insert(key.to_string(), v);
                }
                None => {
                    log::warn!(
                        "vault.frontmatter_key_dropped: '{}' has an unsupported value type",
                        key
                    );
                }
            },
        }
    }

    debug_assert!(RESERVED_KEYS.iter().all(|k| !fm.custom.contains_key(*k)));
    fm
}

fn tags_from(value: &Value) -> Vec<String> {
    match value {
        Value::String(s) => vec![s.clone()],
        Value::Sequence(items) => items.iter().filter_map(yaml_scalar_to_string).collect(),
        _ => vec![],
    }
}
