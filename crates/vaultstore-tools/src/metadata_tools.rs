//! Metadata queries for async callers

use crate::blocking::run_blocking;
use crate::metadata_query::{MetadataFilter, MetadataQuery};
use chrono::{DateTime, Utc};
use std::sync::Arc;
use vaultstore_core::prelude::*;
use vaultstore_vault::VaultManager;

/// Metadata tools context
#[derive(Clone)]
pub struct MetadataTools {
    pub manager: Arc<VaultManager>,
}

impl MetadataTools {
    /// Create new metadata tools
    pub fn new(manager: Arc<VaultManager>) -> Self {
        Self { manager }
    }

    /// Filter documents as of the current time
    pub async fn filter(&self, filter: MetadataFilter) -> Result<Vec<Document>> {
        self.filter_at(filter, Utc::now()).await
    }

    /// Filter documents as of `now`
    pub async fn filter_at(
        &self,
        filter: MetadataFilter,
        now: DateTime<Utc>,
    ) -> Result<Vec<Document>> {
        run_blocking(&self.manager, "filter_by_metadata", move |m| {
            MetadataQuery::new(m).filter(&filter, now)
        })
        .await
    }
}
