//! # Vault Manager
//!
//! The document repository for a markdown vault.
//!
//! [`manager::VaultManager`] owns one vault root and provides:
//! - Document read, write, update, append, metadata edit, delete and move
//! - Folder create, delete and move
//! - Listing of documents and most-recently-modified queries
//!
//! ## Quick Start
//!
//! ```no_run
//! use vaultstore_vault::prelude::*;
//!
//! fn main() -> Result<()> {
//!     let config = StoreConfig::builder("/path/to/vault").build()?;
//!     let manager = VaultManager::new(config)?;
//!
//!     manager.write("notes/new.md", "# Hello\n", None, false)?;
//!     manager.append("notes/new.md", "More text")?;
//!
//!     let doc = manager.read("notes/new.md")?;
//!     println!("{}: {} words", doc.title, doc.word_count);
//!     Ok(())
//! }
//! ```
//!
//! ## Filesystem Semantics
//!
//! - Every path goes through the vault's [`PathResolver`] before any I/O
//! - Writes land in a temp file in the target directory and are renamed into place
//! - Nothing is cached; each read observes the current file
//!
//! ## Thread Safety
//!
//! `VaultManager` is `Send + Sync` and meant to be shared behind an `Arc`.
//! I/O is blocking, so async callers should offload to a blocking pool.
//! `append`, `update` and `edit_metadata` serialize on a per-path mutex;
//! other operations take no locks and may observe concurrent writes.

pub mod manager;

pub use manager::VaultManager;
pub use vaultstore_core::prelude::*;

pub mod prelude {
    pub use crate::manager::*;
    pub use vaultstore_core::prelude::*;
}
