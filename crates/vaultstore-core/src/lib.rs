//! # vaultstore core
//!
//! Core data models, error types, configuration and path resolution for the
//! markdown vault content store. Every other crate in the workspace depends
//! on the types defined here.
//!
//! ## Architecture Principles
//!
//! - **Single trust boundary**: all filesystem paths go through [`PathResolver`]
//! - **Typed failures**: all errors are `Result<T, Error>`, classified by [`ErrorKind`]
//! - **Closed metadata types**: frontmatter values are [`MetadataValue`] variants
//! - **No global state**: a store is an explicit object built from a [`StoreConfig`]
//!
//! ## Core Modules
//!
//! - [`models`] - Document, Frontmatter, metadata values, backlinks
//! - [`error`] - Error enum, error kinds and Result alias
//! - [`config`] - Store configuration and builder
//! - [`path`] - Vault-relative path resolution and containment
//! - [`utils`] - Serialization and operation tracking helpers
//!
//! ## Usage Examples
//!
//! ```no_run
//! use vaultstore_core::prelude::*;
//!
//! fn resolve() -> Result<()> {
//!     let config = StoreConfig::builder("~/notes").build()?;
//!     let resolver = PathResolver::new(&config.vault_path)?;
//!     let path = resolver.resolve("projects/alpha.md")?;
//!     assert!(path.starts_with(resolver.root()));
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod error;
pub mod models;
pub mod path;
pub mod utils;

pub use config::{StoreConfig, StoreConfigBuilder, expand_path};
pub use error::{Error, ErrorKind, Result};
pub use models::*;
pub use path::PathResolver;
pub use utils::{TransactionBuilder, estimate_tokens, to_json_string};

/// Re-export commonly used types
pub mod prelude {
    pub use crate::config::StoreConfig;
    pub use crate::error::{Error, ErrorKind, Result};
    pub use crate::models::{
        Backlink, DOCUMENT_EXTENSION, Document, Frontmatter, Metadata, MetadataValue,
    };
    pub use crate::path::PathResolver;
}
