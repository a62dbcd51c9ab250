//! # vaultstore
//!
//! Markdown vault content store: one object per vault bundling the
//! repository, query engines, context reads and bulk operations, plus the
//! command dispatch used by the `vaultstore` binary.

pub mod commands;
pub mod response;

use std::sync::Arc;

pub use commands::{Command, execute};
pub use response::{ErrorResponse, StandardResponse};
pub use vaultstore_core::prelude::*;
pub use vaultstore_tools::*;

/// All tools over one vault, sharing a single [`VaultManager`]
#[derive(Clone)]
pub struct VaultStore {
    pub manager: Arc<VaultManager>,
    pub files: FileTools,
    pub search: SearchTools,
    pub metadata: MetadataTools,
    pub context: ContextTools,
    pub query: QueryTools,
    pub batch: BatchTools,
}

impl VaultStore {
    /// Open the vault described by `config`
    pub fn open(config: StoreConfig) -> Result<Self> {
        let manager = Arc::new(VaultManager::new(config)?);
        Ok(Self {
            files: FileTools::new(Arc::clone(&manager)),
            search: SearchTools::new(Arc::clone(&manager)),
            metadata: MetadataTools::new(Arc::clone(&manager)),
            context: ContextTools::new(Arc::clone(&manager)),
            query: QueryTools::new(Arc::clone(&manager)),
            batch: BatchTools::new(Arc::clone(&manager)),
            manager,
        })
    }
}
