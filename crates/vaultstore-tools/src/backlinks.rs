//! Backlink discovery by scanning document bodies for wikilinks

use std::sync::Arc;
use tracing::instrument;
use vaultstore_core::prelude::*;
use vaultstore_parser::{extract_wikilinks, link_targets};
use vaultstore_vault::VaultManager;

/// Characters of context kept on each side of a matching link
const CONTEXT_RADIUS: usize = 50;

/// Finds documents linking to a given document name
pub struct BacklinkFinder {
    manager: Arc<VaultManager>,
}

impl BacklinkFinder {
    /// Create a new backlink finder over `manager`'s vault
    pub fn new(manager: Arc<VaultManager>) -> Self {
        Self { manager }
    }

    /// Every document whose body links to `target_name`, one entry per source.
    ///
    /// `target_name` is a document name with or without the `.md` extension.
    #[instrument(skip(self), name = "find_backlinks")]
    pub fn find_backlinks(&self, target_name: &str) -> Result<Vec<Backlink>> {
        let mut backlinks = Vec::new();

        for path in self.manager.document_paths("", true)? {
            let document = match self.manager.read_path(&path) {
                Ok(document) => document,
                Err(e) => {
                    log::warn!("vault.backlink_search_failed: {}: {}", path.display(), e);
                    continue;
                }
            };

            let first = extract_wikilinks(&document.content)
                .into_iter()
                .find(|link| link_targets(&link.target, target_name));

            if let Some(link) = first {
                backlinks.push(Backlink {
                    context: excerpt(&document.content, link.start, link.end, CONTEXT_RADIUS),
                    source_path: document.relative_path,
                    source_title: document.title,
                });
            }
        }

        log::info!(
            "vault.backlinks_completed: {} ({} sources)",
            target_name,
            backlinks.len()
        );
        Ok(backlinks)
    }
}

/// `radius` characters either side of `start..end`, clamped and trimmed
fn excerpt(content: &str, start: usize, end: usize, radius: usize) -> String {
    let from = content[..start]
        .char_indices()
        .rev()
        .take(radius)
        .last()
        .map_or(start, |(i, _)| i);
    let to = content[end..]
        .char_indices()
        .nth(radius)
        .map_or(content.len(), |(i, _)| end + i);

    content[from..to].trim().to_string()
}
