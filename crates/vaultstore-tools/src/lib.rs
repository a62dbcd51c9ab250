//! # Vault Tools
//!
//! Query engines over a vault and the async facade that exposes them, along
//! with the repository and bulk operations, to async callers.
//!
//! ## Engines
//!
//! Synchronous, reading the live filesystem on every call:
//!
//! - [`search_engine::SearchEngine`] - weighted substring relevance search
//! - [`metadata_query::MetadataQuery`] - tag / modification age / folder filtering
//! - [`backlinks::BacklinkFinder`] - wikilink scan for documents linking to a name
//!
//! ## Async Facade
//!
//! Each tool wraps an `Arc<VaultManager>` and runs its work on tokio's
//! blocking pool, racing it against the configured operation timeout:
//!
//! - [`file_tools::FileTools`] - document and folder operations
//! - [`search_tools::SearchTools`] - search, related documents, backlinks
//! - [`metadata_tools::MetadataTools`] - metadata filtering
//! - [`context_tools::ContextTools`] - documents bundled with related material
//! - [`batch_tools::BatchTools`] - bulk tag, move and metadata updates
//! - [`query_tools::QueryTools`] - the query modes as [`QueryResult`] summaries
//!
//! ## Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use vaultstore_tools::{SearchTools, VaultManager};
//! use vaultstore_core::StoreConfig;
//!
//! # async fn example() -> vaultstore_core::Result<()> {
//! let config = StoreConfig::builder("~/notes").build()?;
//! let manager = Arc::new(VaultManager::new(config)?);
//!
//! let search = SearchTools::new(manager);
//! for doc in search.search("rust", 5).await? {
//!     println!("{} ({})", doc.title, doc.relative_path);
//! }
//! # Ok(())
//! # }
//! ```

pub mod backlinks;
pub mod batch_tools;
pub mod blocking;
pub mod context_tools;
pub mod file_tools;
pub mod metadata_query;
pub mod metadata_tools;
pub mod query_result;
pub mod query_tools;
pub mod search_engine;
pub mod search_tools;

pub use backlinks::BacklinkFinder;
pub use batch_tools::BatchTools;
pub use blocking::run_blocking;
pub use context_tools::{ContextTools, NoteContext};
pub use file_tools::FileTools;
pub use metadata_query::{MetadataFilter, MetadataQuery};
pub use metadata_tools::MetadataTools;
pub use query_result::{NoteSummary, QueryResult, ResponseFormat};
pub use query_tools::QueryTools;
pub use search_engine::{ScoredDocument, SearchEngine};
pub use search_tools::SearchTools;

pub use vaultstore_batch::{BulkFailure, BulkOutcome};
pub use vaultstore_vault::VaultManager;
