//! Document and folder operations for async callers

use crate::blocking::run_blocking;
use std::sync::Arc;
use vaultstore_core::prelude::*;
use vaultstore_vault::VaultManager;

/// File tools context
#[derive(Clone)]
pub struct FileTools {
    pub manager: Arc<VaultManager>,
}

impl FileTools {
    /// Create new file tools
    pub fn new(manager: Arc<VaultManager>) -> Self {
        Self { manager }
    }

    /// Read and parse a document
    pub async fn read(&self, path: &str) -> Result<Document> {
        let path = path.to_string();
        run_blocking(&self.manager, "read", move |m| m.read(&path)).await
    }

    /// Create or replace a document; returns its vault-relative path
    pub async fn write(
        &self,
        path: &str,
        content: &str,
        metadata: Option<Metadata>,
        overwrite: bool,
    ) -> Result<String> {
        let (path, content) = (path.to_string(), content.to_string());
        run_blocking(&self.manager, "write", move |m| {
            let written = m.write(&path, &content, metadata.as_ref(), overwrite)?;
            m.relative_of(&written)
        })
        .await
    }

    /// Replace a document's body, optionally its metadata
    pub async fn update(
        &self,
        path: &str,
        content: &str,
        metadata: Option<Metadata>,
    ) -> Result<String> {
        let (path, content) = (path.to_string(), content.to_string());
        run_blocking(&self.manager, "update", move |m| {
            let written = m.update(&path, &content, metadata.as_ref())?;
            m.relative_of(&written)
        })
        .await
    }

    /// Append text to a document on a new line
    pub async fn append(&self, path: &str, content: &str) -> Result<String> {
        let (path, content) = (path.to_string(), content.to_string());
        run_blocking(&self.manager, "append", move |m| {
            let written = m.append(&path, &content)?;
            m.relative_of(&written)
        })
        .await
    }

    /// Delete a document
    pub async fn delete(&self, path: &str) -> Result<()> {
        let path = path.to_string();
        run_blocking(&self.manager, "delete", move |m| m.delete(&path)).await
    }

    /// Move or rename a document
    pub async fn move_document(
        &self,
        from: &str,
        to: &str,
        create_parents: bool,
    ) -> Result<String> {
        let (from, to) = (from.to_string(), to.to_string());
        run_blocking(&self.manager, "move", move |m| {
            let moved = m.move_document(&from, &to, create_parents)?;
            m.relative_of(&moved)
        })
        .await
    }

    /// Create a folder
    pub async fn create_folder(&self, path: &str, exist_ok: bool) -> Result<String> {
        let path = path.to_string();
        run_blocking(&self.manager, "create_folder", move |m| {
            let created = m.create_folder(&path, exist_ok)?;
            m.relative_of(&created)
        })
        .await
    }

    /// Delete a folder
    pub async fn delete_folder(&self, path: &str, recursive: bool) -> Result<()> {
        let path = path.to_string();
        run_blocking(&self.manager, "delete_folder", move |m| {
            m.delete_folder(&path, recursive)
        })
        .await
    }

    /// Move or rename a folder
    pub async fn move_folder(&self, from: &str, to: &str) -> Result<String> {
        let (from, to) = (from.to_string(), to.to_string());
        run_blocking(&self.manager, "move_folder", move |m| {
            let moved = m.move_folder(&from, &to)?;
            m.relative_of(&moved)
        })
        .await
    }

    /// List documents under a folder
    pub async fn list(&self, folder: &str, recursive: bool) -> Result<Vec<String>> {
        let folder = folder.to_string();
        run_blocking(&self.manager, "list", move |m| m.list(&folder, recursive)).await
    }

    /// Most recently modified documents
    pub async fn recent(&self, limit: usize) -> Result<Vec<Document>> {
        run_blocking(&self.manager, "recent", move |m| m.recent(limit)).await
    }
}
