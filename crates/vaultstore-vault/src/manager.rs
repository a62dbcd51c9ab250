//! Vault manager: document and folder operations on the live filesystem

use dashmap::DashMap;
use parking_lot::Mutex;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::SystemTime;
use tracing::instrument;
use vaultstore_core::prelude::*;
use vaultstore_parser::{encode, split_block, try_decode};
use walkdir::WalkDir;

/// Document repository over one vault root.
///
/// Every call reads or writes the filesystem directly; nothing parsed is
/// kept between calls. All I/O is blocking.
pub struct VaultManager {
    config: StoreConfig,
    resolver: PathResolver,
    /// Serializes read-modify-write operations per resolved path
    locks: DashMap<PathBuf, Arc<Mutex<()>>>,
}

impl VaultManager {
    /// Create a new vault manager
    pub fn new(config: StoreConfig) -> Result<Self> {
        config.validate()?;
        let resolver = PathResolver::new(&config.vault_path)?;
        log::info!("vault.opened: {}", resolver.root().display());

        Ok(Self {
            config,
            resolver,
            locks: DashMap::new(),
        })
    }

    /// Canonical vault root
    pub fn vault_path(&self) -> &Path {
        self.resolver.root()
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    pub fn resolver(&self) -> &PathResolver {
        &self.resolver
    }

    /// Resolve a vault-relative path (see [`PathResolver::resolve`])
    pub fn resolve(&self, relative: &str) -> Result<PathBuf> {
        self.resolver.resolve(relative)
    }

    /// Vault-relative form of an absolute path
    pub fn relative_of(&self, absolute: &Path) -> Result<String> {
        self.resolver.relative_of(absolute)
    }

    /// Read and parse one document
    #[instrument(skip(self), name = "vault_read")]
    pub fn read(&self, relative: &str) -> Result<Document> {
        let path = self.resolve(relative)?;
        if !path.is_file() {
            return Err(Error::not_found(relative));
        }
        self.read_path(&path)
    }

    /// Read a document by absolute path already known to be inside the vault
    pub fn read_path(&self, path: &Path) -> Result<Document> {
        let relative = self.relative_of(path)?;
        let raw = fs::read_to_string(path)?;

        let (frontmatter, body) = match try_decode(&raw) {
            Ok(decoded) => decoded,
            Err(e) => {
                log::warn!("vault.frontmatter_parse_failed: {}: {}", relative, e);
                (None, raw)
            }
        };

        log::debug!("vault.read_completed: {}", relative);
        Ok(Document::new(path.to_path_buf(), relative, frontmatter, body))
    }

    /// Create or replace a document.
    ///
    /// Missing parent folders are created. Fails with `AlreadyExists` when
    /// the target exists and `overwrite` is false.
    #[instrument(skip(self, content, metadata), fields(size = content.len()), name = "vault_write")]
    pub fn write(
        &self,
        relative: &str,
        content: &str,
        metadata: Option<&Metadata>,
        overwrite: bool,
    ) -> Result<PathBuf> {
        let path = self.resolve(relative)?;

        if path.is_dir() || (path.exists() && !overwrite) {
            return Err(Error::already_exists(relative));
        }

        let raw = encode(content, metadata)?;
        self.write_atomic(&path, &raw)?;

        log::info!("vault.write_completed: {} ({} bytes)", relative, raw.len());
        Ok(path)
    }

    /// Replace a document's body.
    ///
    /// With `metadata` of `None` the existing frontmatter block is kept
    /// byte-for-byte; otherwise the block is re-encoded from `metadata`.
    #[instrument(skip(self, content, metadata), fields(size = content.len()), name = "vault_update")]
    pub fn update(
        &self,
        relative: &str,
        content: &str,
        metadata: Option<&Metadata>,
    ) -> Result<PathBuf> {
        let path = self.existing_file(relative)?;
        let lock = self.path_lock(&path);
        let _guard = lock.lock();

        let raw = match metadata {
            Some(metadata) => encode(content, Some(metadata))?,
            None => {
                let existing = fs::read_to_string(&path)?;
                match split_block(&existing) {
                    Some(split) if split.block.ends_with('\n') => {
                        format!("{}{}", split.block, content)
                    }
                    Some(split) => format!("{}\n{}", split.block, content),
                    None => content.to_string(),
                }
            }
        };
        self.write_atomic(&path, &raw)?;

        log::info!("vault.update_completed: {}", relative);
        Ok(path)
    }

    /// Append text to an existing document.
    ///
    /// The existing text, frontmatter included, is kept as is. The appended
    /// text always starts on a new line.
    #[instrument(skip(self, content), fields(size = content.len()), name = "vault_append")]
    pub fn append(&self, relative: &str, content: &str) -> Result<PathBuf> {
        let path = self.existing_file(relative)?;
        let lock = self.path_lock(&path);
        let _guard = lock.lock();

        let mut raw = fs::read_to_string(&path)?;
        if !raw.is_empty() && !raw.ends_with('\n') {
            raw.push('\n');
        }
        raw.push_str(content);
        self.write_atomic(&path, &raw)?;

        log::info!("vault.append_completed: {}", relative);
        Ok(path)
    }

    /// Read-modify-write of a document's metadata mapping.
    ///
    /// The body is left untouched. A malformed frontmatter block decodes as
    /// no metadata, so the whole original text becomes the body under the new block.
    #[instrument(skip(self, edit), name = "vault_edit_metadata")]
    pub fn edit_metadata<F>(&self, relative: &str, edit: F) -> Result<PathBuf>
    where
        F: FnOnce(&mut Metadata),
    {
        let path = self.existing_file(relative)?;
        let lock = self.path_lock(&path);
        let _guard = lock.lock();

        let existing = fs::read_to_string(&path)?;
        let (frontmatter, body) = match try_decode(&existing) {
            Ok(decoded) => decoded,
            Err(e) => {
                log::warn!("vault.frontmatter_parse_failed: {}: {}", relative, e);
                (None, existing)
            }
        };
        let mut metadata = frontmatter
            .map(|fm| fm.to_metadata())
            .unwrap_or_default();
        edit(&mut metadata);

        let raw = encode(&body, Some(&metadata))?;
        self.write_atomic(&path, &raw)?;

        log::info!("vault.metadata_updated: {}", relative);
        Ok(path)
    }

    /// Delete one document
    #[instrument(skip(self), name = "vault_delete")]
    pub fn delete(&self, relative: &str) -> Result<()> {
        let path = self.existing_file(relative)?;
        fs::remove_file(&path)?;
        self.locks.remove(&path);

        log::info!("vault.delete_completed: {}", relative);
        Ok(())
    }

    /// Move or rename one document
    #[instrument(skip(self), name = "vault_move")]
    pub fn move_document(
        &self,
        source: &str,
        destination: &str,
        create_parents: bool,
    ) -> Result<PathBuf> {
        let from = self.existing_file(source)?;
        let to = self.resolve(destination)?;

        if to.exists() {
            return Err(Error::already_exists(destination));
        }
        self.prepare_parent(&to, destination, create_parents)?;

        match fs::rename(&from, &to) {
            Ok(()) => {}
            Err(e) if e.kind() == std::io::ErrorKind::CrossesDevices => {
                fs::copy(&from, &to)?;
                fs::remove_file(&from)?;
            }
            Err(e) => return Err(Error::io(e)),
        }
        self.locks.remove(&from);

        log::info!("vault.move_completed: {} -> {}", source, destination);
        Ok(to)
    }

    /// Create a folder (and any missing parents)
    #[instrument(skip(self), name = "vault_create_folder")]
    pub fn create_folder(&self, relative: &str, exist_ok: bool) -> Result<PathBuf> {
        let path = self.resolve(relative)?;

        if path.is_dir() {
            if exist_ok {
                return Ok(path);
            }
            return Err(Error::already_exists(relative));
        }
        if path.exists() {
            return Err(Error::already_exists(relative));
        }

        fs::create_dir_all(&path)?;
        log::info!("vault.folder_created: {}", relative);
        Ok(path)
    }

    /// Delete a folder; non-empty folders need `recursive`
    #[instrument(skip(self), name = "vault_delete_folder")]
    pub fn delete_folder(&self, relative: &str, recursive: bool) -> Result<()> {
        let path = self.existing_folder(relative)?;

        if recursive {
            fs::remove_dir_all(&path)?;
        } else {
            if fs::read_dir(&path)?.next().is_some() {
                return Err(Error::not_empty(relative));
            }
            fs::remove_dir(&path)?;
        }
        self.locks.retain(|locked, _| !locked.starts_with(&path));

        log::info!("vault.folder_deleted: {} (recursive={})", relative, recursive);
        Ok(())
    }

    /// Move or rename a folder; destination parents are created
    #[instrument(skip(self), name = "vault_move_folder")]
    pub fn move_folder(&self, source: &str, destination: &str) -> Result<PathBuf> {
        let from = self.existing_folder(source)?;
        let to = self.resolve(destination)?;

        if to.exists() {
            return Err(Error::already_exists(destination));
        }
        if to.starts_with(&from) {
            return Err(Error::invalid_path(
                destination,
                "cannot move a folder into itself",
            ));
        }
        self.prepare_parent(&to, destination, true)?;

        fs::rename(&from, &to)?;
        self.locks.retain(|locked, _| !locked.starts_with(&from));

        log::info!("vault.folder_moved: {} -> {}", source, destination);
        Ok(to)
    }

    /// Vault-relative paths of documents under `folder` (root when empty)
    #[instrument(skip(self), name = "vault_list")]
    pub fn list(&self, folder: &str, recursive: bool) -> Result<Vec<String>> {
        let paths = self.document_paths(folder, recursive)?;
        let listed = paths
            .iter()
            .filter_map(|p| self.relative_of(p).ok())
            .collect::<Vec<_>>();

        log::debug!("vault.list_completed: {} ({} documents)", folder, listed.len());
        Ok(listed)
    }

    /// Absolute paths of documents under `folder`, sorted.
    ///
    /// Configured directories are skipped and symlinks are not followed.
    pub fn document_paths(&self, folder: &str, recursive: bool) -> Result<Vec<PathBuf>> {
        let start = self.resolve(folder)?;
        if !start.is_dir() {
            return Err(Error::not_found(folder));
        }

        let max_depth = if recursive { usize::MAX } else { 1 };
        let walker = WalkDir::new(&start)
            .min_depth(1)
            .max_depth(max_depth)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|entry| {
                entry.depth() == 0
                    || !entry.file_type().is_dir()
                    || !self
                        .config
                        .is_excluded(&entry.file_name().to_string_lossy())
            });

        let mut paths = Vec::new();
        for entry in walker {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    log::warn!("vault.list_entry_skipped: {}", e);
                    continue;
                }
            };
            if entry.file_type().is_file() && has_document_extension(entry.path()) {
                paths.push(entry.into_path());
            }
        }
        paths.sort();

        Ok(paths)
    }

    /// Most recently modified documents first
    #[instrument(skip(self), name = "vault_recent")]
    pub fn recent(&self, limit: usize) -> Result<Vec<Document>> {
        let mut stamped: Vec<(SystemTime, PathBuf)> = Vec::new();
        for path in self.document_paths("", true)? {
            match fs::metadata(&path).and_then(|m| m.modified()) {
                Ok(modified) => stamped.push((modified, path)),
                Err(e) => log::warn!("vault.recent_file_skipped: {}: {}", path.display(), e),
            }
        }
        stamped.sort_by(|a, b| b.0.cmp(&a.0));

        let mut documents = Vec::with_capacity(limit.min(stamped.len()));
        for (_, path) in stamped {
            if documents.len() >= limit {
                break;
            }
            match self.read_path(&path) {
                Ok(doc) => documents.push(doc),
                Err(e) => log::warn!("vault.recent_file_skipped: {}: {}", path.display(), e),
            }
        }

        Ok(documents)
    }

    fn existing_file(&self, relative: &str) -> Result<PathBuf> {
        let path = self.resolve(relative)?;
        if !path.is_file() {
            return Err(Error::not_found(relative));
        }
        Ok(path)
    }

    fn existing_folder(&self, relative: &str) -> Result<PathBuf> {
        let path = self.resolve(relative)?;
        if self.resolver.is_root(&path) {
            return Err(Error::invalid_path(relative, "operation not allowed on vault root"));
        }
        if !path.is_dir() {
            return Err(Error::not_found(relative));
        }
        Ok(path)
    }

    fn prepare_parent(&self, target: &Path, relative: &str, create: bool) -> Result<()> {
        let Some(parent) = target.parent() else {
            return Err(Error::invalid_path(relative, "no parent directory"));
        };
        if parent.is_dir() {
            return Ok(());
        }
        if !create {
            let parent_relative = self
                .relative_of(parent)
                .unwrap_or_else(|_| parent.display().to_string());
            return Err(Error::not_found(parent_relative));
        }
        fs::create_dir_all(parent)?;
        Ok(())
    }

    /// Write to a temp file in the target directory, then rename over the target
    fn write_atomic(&self, path: &Path, text: &str) -> Result<()> {
        let Some(parent) = path.parent() else {
            return Err(Error::invalid_path(
                path.display().to_string(),
                "no parent directory",
            ));
        };
        fs::create_dir_all(parent)?;

        let mut temp = tempfile::NamedTempFile::new_in(parent)?;
        temp.write_all(text.as_bytes())?;
        temp.persist(path).map_err(|e| Error::io(e.error))?;
        Ok(())
    }

    fn path_lock(&self, path: &Path) -> Arc<Mutex<()>> {
        self.locks
            .entry(path.to_path_buf())
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .value()
            .clone()
    }
}

fn has_document_extension(path: &Path) -> bool {
    path.extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case(DOCUMENT_EXTENSION))
}
