//! Search and backlink queries for async callers

use crate::backlinks::BacklinkFinder;
use crate::blocking::run_blocking;
use crate::search_engine::{ScoredDocument, SearchEngine};
use std::sync::Arc;
use vaultstore_core::prelude::*;
use vaultstore_vault::VaultManager;

/// Search tools context
#[derive(Clone)]
pub struct SearchTools {
    pub manager: Arc<VaultManager>,
}

impl SearchTools {
    /// Create new search tools
    pub fn new(manager: Arc<VaultManager>) -> Self {
        Self { manager }
    }

    /// Ranked documents for `query`
    pub async fn search(&self, query: &str, limit: usize) -> Result<Vec<Document>> {
        let query = query.to_string();
        run_blocking(&self.manager, "search", move |m| {
            SearchEngine::new(m).search(&query, limit)
        })
        .await
    }

    /// Ranked documents with their scores
    pub async fn search_scored(&self, query: &str, limit: usize) -> Result<Vec<ScoredDocument>> {
        let query = query.to_string();
        run_blocking(&self.manager, "search", move |m| {
            SearchEngine::new(m).search_scored(&query, limit)
        })
        .await
    }

    /// Documents similar to `reference`
    pub async fn find_related(
        &self,
        reference: &str,
        max_related: usize,
    ) -> Result<Vec<ScoredDocument>> {
        let reference = reference.to_string();
        run_blocking(&self.manager, "find_related", move |m| {
            SearchEngine::new(m).find_related(&reference, max_related)
        })
        .await
    }

    /// Documents linking to `target_name`
    pub async fn backlinks(&self, target_name: &str) -> Result<Vec<Backlink>> {
        let target_name = target_name.to_string();
        run_blocking(&self.manager, "backlinks", move |m| {
            BacklinkFinder::new(m).find_backlinks(&target_name)
        })
        .await
    }
}
