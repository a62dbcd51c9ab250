//! Filtering documents by tags, modification age and folder

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::instrument;
use vaultstore_core::prelude::*;
use vaultstore_vault::VaultManager;

/// Metadata filter; empty/absent criteria do not filter
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MetadataFilter {
    /// Any-match on exact frontmatter tags
    pub tags: Vec<String>,
    /// Only files modified within this many days; `None` or 0 disables
    pub modified_within_days: Option<u32>,
    /// Restrict the walk to this folder
    pub folder: Option<String>,
    /// Stop after this many matches
    pub limit: usize,
}

impl Default for MetadataFilter {
    fn default() -> Self {
        Self {
            tags: Vec::new(),
            modified_within_days: None,
            folder: None,
            limit: 10,
        }
    }
}

/// Metadata query engine
pub struct MetadataQuery {
    manager: Arc<VaultManager>,
}

impl MetadataQuery {
    /// Create a new query engine over `manager`'s vault
    pub fn new(manager: Arc<VaultManager>) -> Self {
        Self { manager }
    }

    /// Documents matching `filter`, evaluated as of `now`.
    ///
    /// The age check uses the file modification time and runs before the
    /// document is read. The walk stops once `limit` matches are found.
    #[instrument(skip(self), name = "filter_by_metadata")]
    pub fn filter(&self, filter: &MetadataFilter, now: DateTime<Utc>) -> Result<Vec<Document>> {
        if filter.limit == 0 {
            return Ok(Vec::new());
        }

        // A window reaching past the earliest representable instant covers everything
        let threshold = filter
            .modified_within_days
            .filter(|days| *days > 0)
            .and_then(|days| Duration::try_days(i64::from(days)))
            .and_then(|window| now.checked_sub_signed(window));
        let folder = filter.folder.as_deref().unwrap_or("");

        let mut results = Vec::new();
        for path in self.manager.document_paths(folder, true)? {
            if let Some(threshold) = threshold {
                match std::fs::metadata(&path).and_then(|m| m.modified()) {
                    Ok(modified) if DateTime::<Utc>::from(modified) < threshold => continue,
                    Ok(_) => {}
                    Err(e) => {
                        log::warn!("vault.metadata_search_file_skipped: {}: {}", path.display(), e);
                        continue;
                    }
                }
            }

            let document = match self.manager.read_path(&path) {
                Ok(document) => document,
                Err(e) => {
                    log::warn!("vault.metadata_search_file_skipped: {}: {}", path.display(), e);
                    continue;
                }
            };

            if !filter.tags.is_empty() {
                let matched = document
                    .frontmatter
                    .as_ref()
                    .is_some_and(|fm| fm.has_any_tag(&filter.tags));
                if !matched {
                    continue;
                }
            }

            results.push(document);
            if results.len() >= filter.limit {
                break;
            }
        }

        log::info!("vault.metadata_search_completed: {} results", results.len());
        Ok(results)
    }
}
