//! Bulk operations for async callers

use crate::blocking::run_blocking;
use std::sync::Arc;
use vaultstore_batch::{BulkExecutor, BulkOutcome};
use vaultstore_core::prelude::*;
use vaultstore_vault::VaultManager;

/// Batch tools context
#[derive(Clone)]
pub struct BatchTools {
    pub manager: Arc<VaultManager>,
}

impl BatchTools {
    /// Create new batch tools
    pub fn new(manager: Arc<VaultManager>) -> Self {
        Self { manager }
    }

    /// Add tags to every target
    pub async fn bulk_tag(&self, targets: Vec<String>, tags: Vec<String>) -> Result<BulkOutcome> {
        run_blocking(&self.manager, "bulk_tag", move |m| {
            BulkExecutor::new(m).bulk_tag(&targets, &tags)
        })
        .await
    }

    /// Move every target into one folder
    pub async fn bulk_move(
        &self,
        targets: Vec<String>,
        destination_folder: &str,
        create_parents: bool,
    ) -> Result<BulkOutcome> {
        let destination_folder = destination_folder.to_string();
        run_blocking(&self.manager, "bulk_move", move |m| {
            BulkExecutor::new(m).bulk_move(&targets, &destination_folder, create_parents)
        })
        .await
    }

    /// Overlay metadata keys onto every target
    pub async fn bulk_update_metadata(
        &self,
        targets: Vec<String>,
        updates: Metadata,
    ) -> Result<BulkOutcome> {
        run_blocking(&self.manager, "bulk_update_metadata", move |m| {
            BulkExecutor::new(m).bulk_update_metadata(&targets, &updates)
        })
        .await
    }
}
