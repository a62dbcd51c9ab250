//! Weighted substring search over the live vault
//!
//! Score per document, counting case-insensitive non-overlapping occurrences:
//! file stem × 100 + title × 50 + body × 1. No index is kept; every query
//! walks and reads the vault.

use serde::Serialize;
use std::sync::Arc;
use tracing::instrument;
use vaultstore_core::prelude::*;
use vaultstore_vault::VaultManager;

const STEM_WEIGHT: u64 = 100;
const TITLE_WEIGHT: u64 = 50;
const BODY_WEIGHT: u64 = 1;

/// Words of the reference body used as the related-documents query
const RELATED_QUERY_WORDS: usize = 100;

/// A document with its relevance score
#[derive(Debug, Clone, Serialize)]
pub struct ScoredDocument {
    #[serde(flatten)]
    pub document: Document,
    pub score: u64,
}

/// Relevance search engine
pub struct SearchEngine {
    manager: Arc<VaultManager>,
}

impl SearchEngine {
    /// Create a new search engine over `manager`'s vault
    pub fn new(manager: Arc<VaultManager>) -> Self {
        Self { manager }
    }

    /// Documents with a nonzero score, best first.
    ///
    /// Ties keep enumeration order (ascending vault-relative path). An empty
    /// query scores every document 1. Unreadable documents are skipped.
    #[instrument(skip(self), name = "search")]
    pub fn search_scored(&self, query: &str, limit: usize) -> Result<Vec<ScoredDocument>> {
        let needle = query.to_lowercase();
        let mut hits = Vec::new();

        for path in self.manager.document_paths("", true)? {
            let document = match self.manager.read_path(&path) {
                Ok(document) => document,
                Err(e) => {
                    log::warn!("vault.search_file_skipped: {}: {}", path.display(), e);
                    continue;
                }
            };

            let score = relevance(&document, &needle);
            if score > 0 {
                hits.push(ScoredDocument { document, score });
            }
        }

        hits.sort_by(|a, b| b.score.cmp(&a.score));
        hits.truncate(limit);

        log::info!("vault.search_completed: '{}' ({} results)", query, hits.len());
        Ok(hits)
    }

    /// Same as [`search_scored`](Self::search_scored) without scores
    pub fn search(&self, query: &str, limit: usize) -> Result<Vec<Document>> {
        Ok(self
            .search_scored(query, limit)?
            .into_iter()
            .map(|hit| hit.document)
            .collect())
    }

    /// Documents related to `reference`, queried by the start of its body.
    ///
    /// The reference document itself is never part of the result.
    #[instrument(skip(self), name = "find_related")]
    pub fn find_related(&self, reference: &str, max_related: usize) -> Result<Vec<ScoredDocument>> {
        let document = self.manager.read(reference)?;
        let query = document
            .content
            .split_whitespace()
            .take(RELATED_QUERY_WORDS)
            .collect::<Vec<_>>()
            .join(" ");

        let related = self
            .search_scored(&query, max_related.saturating_add(1))?
            .into_iter()
            .filter(|hit| hit.document.path != document.path)
            .take(max_related)
            .collect();

        Ok(related)
    }
}

/// Weighted occurrence count of an already lowercased `needle`
fn relevance(document: &Document, needle: &str) -> u64 {
    if needle.is_empty() {
        return 1;
    }

    let count = |haystack: &str| haystack.to_lowercase().matches(needle).count() as u64;

    count(&document.stem()) * STEM_WEIGHT
        + count(&document.title) * TITLE_WEIGHT
        + count(&document.content) * BODY_WEIGHT
}
