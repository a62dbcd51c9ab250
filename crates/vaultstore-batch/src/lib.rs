//! # Bulk Operations
//!
//! Applies one single-document mutation across a list of targets. Every
//! target is attempted; a failing target is recorded in the outcome and the
//! batch moves on. The call itself fails only when nothing can be attempted
//! (empty target list, unusable destination).

use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::instrument;
use vaultstore_core::prelude::*;
use vaultstore_core::TransactionBuilder;
use vaultstore_vault::VaultManager;

/// One target that could not be processed
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BulkFailure {
    pub target: String,
    pub reason: String,
    pub kind: ErrorKind,
}

/// Partition of a bulk call's targets into successes and failures
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BulkOutcome {
    /// Operation name, e.g. `bulk_tag`
    pub operation: String,
    /// Targets processed successfully, in input order
    pub succeeded: Vec<String>,
    /// Targets that failed with their reasons, in input order
    pub failed: Vec<BulkFailure>,
    /// Some but not all targets succeeded
    pub partial_success: bool,
    /// Unique transaction ID
    pub transaction_id: String,
    /// Execution duration in milliseconds
    pub duration_ms: u64,
}

impl BulkOutcome {
    /// Number of targets attempted
    pub fn total(&self) -> usize {
        self.succeeded.len() + self.failed.len()
    }

    pub fn partial_success(&self) -> bool {
        !self.succeeded.is_empty() && !self.failed.is_empty()
    }

    /// Whether every target succeeded
    pub fn is_complete(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Run `op` once per target, capturing each failure instead of propagating it.
///
/// Targets are processed sequentially in input order.
pub fn run_bulk<F>(operation: &str, targets: &[String], mut op: F) -> Result<BulkOutcome>
where
    F: FnMut(&str) -> Result<()>,
{
    if targets.is_empty() {
        return Err(Error::config_error(format!(
            "{}: target list cannot be empty",
            operation
        )));
    }

    let transaction = TransactionBuilder::new();
    log::info!(
        "vault.{}_started: {} targets ({})",
        operation,
        targets.len(),
        transaction.transaction_id()
    );

    let mut succeeded = Vec::new();
    let mut failed = Vec::new();

    for target in targets {
        match op(target) {
            Ok(()) => succeeded.push(target.clone()),
            Err(e) => {
                log::warn!("vault.bulk_item_failed: {} {}: {}", operation, target, e);
                failed.push(BulkFailure {
                    target: target.clone(),
                    reason: e.to_string(),
                    kind: e.kind(),
                });
            }
        }
    }

    let partial_success = !succeeded.is_empty() && !failed.is_empty();
    log::info!(
        "vault.{}_completed: {} succeeded, {} failed",
        operation,
        succeeded.len(),
        failed.len()
    );

    Ok(BulkOutcome {
        operation: operation.to_string(),
        succeeded,
        failed,
        partial_success,
        transaction_id: transaction.transaction_id().to_string(),
        duration_ms: transaction.elapsed_ms(),
    })
}

/// Bulk tag, move and metadata operations over one vault
pub struct BulkExecutor {
    manager: Arc<VaultManager>,
}

impl BulkExecutor {
    /// Create a new bulk executor
    pub fn new(manager: Arc<VaultManager>) -> Self {
        Self { manager }
    }

    /// Add `tags` to every target, keeping existing tags first
    #[instrument(skip(self, targets), fields(count = targets.len()), name = "bulk_tag")]
    pub fn bulk_tag(&self, targets: &[String], tags: &[String]) -> Result<BulkOutcome> {
        run_bulk("bulk_tag", targets, |target| {
            self.manager
                .edit_metadata(target, |metadata| {
                    let existing = metadata
                        .get("tags")
                        .and_then(MetadataValue::as_string_list)
                        .unwrap_or_default();
                    metadata.insert(
                        "tags".to_string(),
                        MetadataValue::StringList(merge_tags(&existing, tags)),
                    );
                })
                .map(|_| ())
        })
    }

    /// Move every target into `destination_folder`, keeping file names
    #[instrument(skip(self, targets), fields(count = targets.len()), name = "bulk_move")]
    pub fn bulk_move(
        &self,
        targets: &[String],
        destination_folder: &str,
        create_parents: bool,
    ) -> Result<BulkOutcome> {
        let folder = self.manager.resolve(destination_folder)?;
        if folder.exists() && !folder.is_dir() {
            return Err(Error::invalid_path(
                destination_folder,
                "destination is not a folder",
            ));
        }
        let folder = destination_folder.trim_end_matches('/');

        run_bulk("bulk_move", targets, |target| {
            let file_name = target.rsplit('/').next().unwrap_or(target);
            let destination = if folder.is_empty() {
                file_name.to_string()
            } else {
                format!("{}/{}", folder, file_name)
            };
            self.manager
                .move_document(target, &destination, create_parents)
                .map(|_| ())
        })
    }

    /// Overlay `updates` onto every target's metadata
    #[instrument(skip(self, targets, updates), fields(count = targets.len()), name = "bulk_update_metadata")]
    pub fn bulk_update_metadata(
        &self,
        targets: &[String],
        updates: &Metadata,
    ) -> Result<BulkOutcome> {
        if updates.is_empty() {
            return Err(Error::config_error(
                "bulk_update_metadata: no metadata to apply",
            ));
        }

        run_bulk("bulk_update_metadata", targets, |target| {
            self.manager
                .edit_metadata(target, |metadata| {
                    for (key, value) in updates {
                        metadata.insert(key.clone(), value.clone());
                    }
                })
                .map(|_| ())
        })
    }
}

/// Order-preserving union without duplicates
fn merge_tags(existing: &[String], added: &[String]) -> Vec<String> {
    let mut merged: Vec<String> = Vec::with_capacity(existing.len() + added.len());
    for tag in existing.iter().chain(added) {
        if !merged.contains(tag) {
            merged.push(tag.clone());
        }
    }
    merged
}
