//! Summarized query results sized for callers that budget tokens

use crate::search_engine::ScoredDocument;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use vaultstore_core::Document;

/// Characters of body text kept in a detailed summary
pub const EXCERPT_CHARS: usize = 200;

/// How much of each document a summary carries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResponseFormat {
    /// Path, title and relevance only
    #[default]
    Concise,
    /// Adds excerpt, tags and frontmatter dates
    Detailed,
}

impl FromStr for ResponseFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "concise" => Ok(ResponseFormat::Concise),
            "detailed" => Ok(ResponseFormat::Detailed),
            _ => Err(format!(
                "Unknown response format '{}'. Valid options: concise, detailed",
                s
            )),
        }
    }
}

impl fmt::Display for ResponseFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResponseFormat::Concise => write!(f, "concise"),
            ResponseFormat::Detailed => write!(f, "detailed"),
        }
    }
}

/// One document reduced to what a query caller needs
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NoteSummary {
    /// Vault-relative path
    pub path: String,
    pub title: String,
    /// Score relative to the best hit, in `0.0..=1.0`
    pub relevance: f64,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub excerpt: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    /// RFC 3339
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created: Option<String>,
    /// RFC 3339
    #[serde(skip_serializing_if = "Option::is_none")]
    pub modified: Option<String>,
}

impl NoteSummary {
    pub fn new(document: &Document, format: ResponseFormat, relevance: f64) -> Self {
        let mut summary = Self {
            path: document.relative_path.clone(),
            title: document.title.clone(),
            relevance,
            excerpt: None,
            tags: None,
            created: None,
            modified: None,
        };

        if format == ResponseFormat::Detailed {
            summary.excerpt = Some(document.content.chars().take(EXCERPT_CHARS).collect())
                .filter(|e: &String| !e.is_empty());
            if let Some(fm) = &document.frontmatter {
                summary.tags = Some(fm.tags.clone());
                summary.created = fm.created.map(|t| t.to_rfc3339());
                summary.modified = fm.modified.map(|t| t.to_rfc3339());
            }
        }

        summary
    }
}

/// Summaries plus how complete they are
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QueryResult {
    pub results: Vec<NoteSummary>,
    /// Matches found; may exceed `results` for listings
    pub total_found: usize,
    /// More matches may exist than were returned
    pub truncated: bool,
    /// Hint for refining the query when truncated or empty
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,
}

impl QueryResult {
    /// Ranked hits; relevance is each score over the top score
    pub fn from_search(
        hits: &[ScoredDocument],
        query: &str,
        limit: usize,
        format: ResponseFormat,
    ) -> Self {
        let top = hits.iter().map(|h| h.score).max().unwrap_or(0).max(1) as f64;
        let truncated = hits.len() >= limit;
        let suggestion = if hits.is_empty() {
            Some(format!(
                "No documents found matching '{}'. Try broader terms or check spelling.",
                query
            ))
        } else if truncated {
            Some(format!(
                "Showing {} of many results. Try narrowing your search with specific tags or date ranges.",
                limit
            ))
        } else {
            None
        };

        Self {
            results: hits
                .iter()
                .map(|h| NoteSummary::new(&h.document, format, h.score as f64 / top))
                .collect(),
            total_found: hits.len(),
            truncated,
            suggestion,
        }
    }

    /// First `shown` documents of a folder listing holding `total` entries
    pub fn from_listing(shown: &[Document], total: usize, limit: usize, format: ResponseFormat) -> Self {
        let truncated = total > limit;
        Self {
            results: summarize(shown, format),
            total_found: total,
            truncated,
            suggestion: truncated.then(|| {
                format!(
                    "Showing {} of {} documents in folder. Try narrowing to a specific subfolder.",
                    limit, total
                )
            }),
        }
    }

    /// Metadata filter matches; the filter stops at `limit`
    pub fn from_filter(matches: &[Document], limit: usize, format: ResponseFormat) -> Self {
        let truncated = matches.len() >= limit;
        Self {
            results: summarize(matches, format),
            total_found: matches.len(),
            truncated,
            suggestion: truncated.then(|| {
                format!(
                    "Showing {} results. Add more specific filters to narrow down.",
                    limit
                )
            }),
        }
    }

    /// Documents related to a reference; no refinement hint
    pub fn from_related(hits: &[ScoredDocument], max_related: usize, format: ResponseFormat) -> Self {
        let mut result = Self::from_search(hits, "", max_related, format);
        result.truncated = hits.len() >= max_related;
        result.suggestion = None;
        result
    }

    /// A result set that is complete by construction
    pub fn complete(documents: &[Document], format: ResponseFormat) -> Self {
        Self {
            results: summarize(documents, format),
            total_found: documents.len(),
            truncated: false,
            suggestion: None,
        }
    }
}

fn summarize(documents: &[Document], format: ResponseFormat) -> Vec<NoteSummary> {
    documents
        .iter()
        .map(|d| NoteSummary::new(d, format, 1.0))
        .collect()
}
