//! Context gathering: documents bundled with related material
//!
//! Every bundle carries a rough token estimate so callers can budget how
//! much text they forward.

use crate::backlinks::BacklinkFinder;
use crate::blocking::run_blocking;
use crate::search_engine::SearchEngine;
use chrono::{NaiveDate, Utc};
use serde::Serialize;
use std::sync::Arc;
use vaultstore_core::estimate_tokens;
use vaultstore_core::prelude::*;
use vaultstore_vault::VaultManager;

/// A primary document with supporting documents and backlinks
#[derive(Debug, Clone, Serialize)]
pub struct NoteContext {
    pub primary: Document,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub related: Vec<Document>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub backlinks: Vec<Backlink>,
    /// Approximate tokens across all included text
    pub token_estimate: usize,
}

impl NoteContext {
    fn new(primary: Document, related: Vec<Document>, backlinks: Vec<Backlink>) -> Self {
        let token_estimate = estimate_tokens(&primary.content)
            + related.iter().map(|d| estimate_tokens(&d.content)).sum::<usize>()
            + backlinks.iter().map(|b| estimate_tokens(&b.context)).sum::<usize>();
        Self {
            primary,
            related,
            backlinks,
            token_estimate,
        }
    }
}

/// Context tools context
#[derive(Clone)]
pub struct ContextTools {
    pub manager: Arc<VaultManager>,
}

impl ContextTools {
    /// Create new context tools
    pub fn new(manager: Arc<VaultManager>) -> Self {
        Self { manager }
    }

    /// One document on its own
    pub async fn read_note(&self, target: &str) -> Result<NoteContext> {
        let target = target.to_string();
        run_blocking(&self.manager, "read_note", move |m| {
            Ok(NoteContext::new(m.read(&target)?, vec![], vec![]))
        })
        .await
    }

    /// Several documents together; the first readable one is primary.
    ///
    /// Unreadable targets are skipped. Fails with `NotFound` when none can
    /// be read.
    pub async fn read_multiple(&self, targets: Vec<String>) -> Result<NoteContext> {
        run_blocking(&self.manager, "read_multiple", move |m| {
            let mut documents = Vec::new();
            for target in &targets {
                match m.read(target) {
                    Ok(document) => documents.push(document),
                    Err(e) => log::warn!("vault.read_multiple_failed: {}: {}", target, e),
                }
            }

            let mut documents = documents.into_iter();
            let Some(primary) = documents.next() else {
                return Err(Error::not_found(format!(
                    "none of the targets could be read: {}",
                    targets.join(", ")
                )));
            };
            Ok(NoteContext::new(primary, documents.collect(), vec![]))
        })
        .await
    }

    /// A document and the documents most similar to it
    pub async fn gather_related(&self, target: &str, max_related: usize) -> Result<NoteContext> {
        let target = target.to_string();
        run_blocking(&self.manager, "gather_related", move |m| {
            let primary = m.read(&target)?;
            let related = SearchEngine::new(m)
                .find_related(&target, max_related)?
                .into_iter()
                .map(|hit| hit.document)
                .collect();

            log::info!("vault.gather_related_completed: {}", target);
            Ok(NoteContext::new(primary, related, vec![]))
        })
        .await
    }

    /// The daily note for `date` (today, UTC, when absent).
    ///
    /// Looks for `<folder>/<YYYY-MM-DD>.md` in each configured daily folder.
    pub async fn daily_note(&self, date: Option<NaiveDate>) -> Result<NoteContext> {
        let date = date.unwrap_or_else(|| Utc::now().date_naive());
        run_blocking(&self.manager, "daily_note", move |m| {
            let file_name = format!("{}.md", date.format("%Y-%m-%d"));
            let candidates: Vec<String> = m
                .config()
                .daily_note_folders
                .iter()
                .map(|folder| match folder.trim_end_matches('/') {
                    "" => file_name.clone(),
                    folder => format!("{}/{}", folder, file_name),
                })
                .collect();

            for candidate in &candidates {
                match m.read(candidate) {
                    Ok(document) => {
                        log::info!("vault.daily_note_completed: {}", candidate);
                        return Ok(NoteContext::new(document, vec![], vec![]));
                    }
                    Err(Error::NotFound { .. }) => continue,
                    Err(e) => return Err(e),
                }
            }

            Err(Error::not_found(format!(
                "daily note for {} (tried: {})",
                date,
                candidates.join(", ")
            )))
        })
        .await
    }

    /// A document, its backlinks, and the documents that link to it
    pub async fn note_with_backlinks(&self, target: &str) -> Result<NoteContext> {
        let target = target.to_string();
        run_blocking(&self.manager, "note_with_backlinks", move |m| {
            let primary = m.read(&target)?;
            let backlinks = BacklinkFinder::new(Arc::clone(&m)).find_backlinks(&primary.stem())?;

            let mut related = Vec::with_capacity(backlinks.len());
            for backlink in &backlinks {
                match m.read(&backlink.source_path) {
                    Ok(document) => related.push(document),
                    Err(e) => log::warn!(
                        "vault.backlink_read_failed: {}: {}",
                        backlink.source_path,
                        e
                    ),
                }
            }

            log::info!(
                "vault.note_with_backlinks_completed: {} ({} backlinks)",
                target,
                backlinks.len()
            );
            Ok(NoteContext::new(primary, related, backlinks))
        })
        .await
    }
}
