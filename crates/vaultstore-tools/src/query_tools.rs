//! Query modes returning [`QueryResult`] summaries instead of full documents

use crate::blocking::run_blocking;
use crate::metadata_query::{MetadataFilter, MetadataQuery};
use crate::query_result::{QueryResult, ResponseFormat};
use crate::search_engine::SearchEngine;
use chrono::Utc;
use std::sync::Arc;
use vaultstore_core::prelude::*;
use vaultstore_vault::VaultManager;

/// Query tools context
#[derive(Clone)]
pub struct QueryTools {
    pub manager: Arc<VaultManager>,
}

impl QueryTools {
    /// Create new query tools
    pub fn new(manager: Arc<VaultManager>) -> Self {
        Self { manager }
    }

    /// Relevance search
    pub async fn search(
        &self,
        query: &str,
        limit: usize,
        format: ResponseFormat,
    ) -> Result<QueryResult> {
        let query = query.to_string();
        run_blocking(&self.manager, "query_search", move |m| {
            let hits = SearchEngine::new(m).search_scored(&query, limit)?;
            Ok(QueryResult::from_search(&hits, &query, limit, format))
        })
        .await
    }

    /// Folder contents (recursive), reading at most `limit` documents
    pub async fn list_structure(
        &self,
        folder: &str,
        limit: usize,
        format: ResponseFormat,
    ) -> Result<QueryResult> {
        let folder = folder.to_string();
        run_blocking(&self.manager, "list_structure", move |m| {
            let paths = m.document_paths(&folder, true)?;

            let mut shown = Vec::new();
            for path in paths.iter().take(limit) {
                match m.read_path(path) {
                    Ok(document) => shown.push(document),
                    Err(e) => {
                        log::warn!("vault.list_structure_read_failed: {}: {}", path.display(), e)
                    }
                }
            }

            Ok(QueryResult::from_listing(&shown, paths.len(), limit, format))
        })
        .await
    }

    /// Documents similar to `reference`
    pub async fn find_related(
        &self,
        reference: &str,
        max_related: usize,
        format: ResponseFormat,
    ) -> Result<QueryResult> {
        let reference = reference.to_string();
        run_blocking(&self.manager, "query_find_related", move |m| {
            let hits = SearchEngine::new(m).find_related(&reference, max_related)?;
            Ok(QueryResult::from_related(&hits, max_related, format))
        })
        .await
    }

    /// Metadata filter as of the current time
    pub async fn by_metadata(
        &self,
        filter: MetadataFilter,
        format: ResponseFormat,
    ) -> Result<QueryResult> {
        run_blocking(&self.manager, "query_by_metadata", move |m| {
            let matches = MetadataQuery::new(m).filter(&filter, Utc::now())?;
            Ok(QueryResult::from_filter(&matches, filter.limit, format))
        })
        .await
    }

    /// Most recently modified documents
    pub async fn recent_changes(&self, limit: usize, format: ResponseFormat) -> Result<QueryResult> {
        run_blocking(&self.manager, "recent_changes", move |m| {
            Ok(QueryResult::complete(&m.recent(limit)?, format))
        })
        .await
    }
}
