//! Path resolution: the trust boundary for all filesystem access.
//!
//! Every caller-supplied path is resolved against the canonical vault root
//! one component at a time. Components that exist are canonicalized (so
//! symlinks are followed before the containment check), components that do
//! not exist yet are appended lexically. Every intermediate path must stay
//! under the canonical root, compared component-wise; the walk stops at the
//! first step outside it, so nothing beyond the root is ever stat'ed.

use crate::error::{Error, Result};
use std::path::{Component, Path, PathBuf};

/// Resolves vault-relative paths to absolute paths inside one vault root
#[derive(Debug, Clone)]
pub struct PathResolver {
    root: PathBuf,
}

impl PathResolver {
    /// Create a resolver; the root must exist and be a directory
    pub fn new(vault_root: &Path) -> Result<Self> {
        let root = vault_root.canonicalize().map_err(|e| {
            Error::config_error(format!(
                "Vault root cannot be resolved: {}: {}",
                vault_root.display(),
                e
            ))
        })?;

        if !root.is_dir() {
            return Err(Error::config_error(format!(
                "Vault root is not a directory: {}",
                root.display()
            )));
        }

        Ok(Self { root })
    }

    /// Canonical vault root
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Resolve `relative` to an absolute path inside the vault.
    ///
    /// Empty input and `.` resolve to the root itself.
    pub fn resolve(&self, relative: &str) -> Result<PathBuf> {
        if relative.contains('\0') {
            return Err(Error::invalid_path(relative, "contains NUL byte"));
        }

        let mut current = self.root.clone();

        for component in Path::new(relative).components() {
            match component {
                Component::Prefix(_) | Component::RootDir => {
                    return Err(Error::invalid_path(
                        relative,
                        "absolute paths are not allowed",
                    ));
                }
                Component::CurDir => {}
                Component::ParentDir => {
                    if !current.pop() || !current.starts_with(&self.root) {
                        return Err(self.escaped(relative, &current));
                    }
                }
                Component::Normal(name) => {
                    let candidate = current.join(name);
                    current = match std::fs::symlink_metadata(&candidate) {
                        Ok(_) => candidate.canonicalize().map_err(|_| {
                            Error::invalid_path(relative, "unresolvable symlink")
                        })?,
                        // Not on disk yet: nothing to follow
                        Err(_) => candidate,
                    };
                    // A symlink led out; stop before touching anything beyond it
                    if !current.starts_with(&self.root) {
                        return Err(self.escaped(relative, &current));
                    }
                }
            }
        }

        Ok(current)
    }

    fn escaped(&self, relative: &str, reached: &Path) -> Error {
        log::warn!(
            "vault.path_rejected: {} resolved outside vault root to {}",
            relative,
            reached.display()
        );
        Error::invalid_path(relative, "escapes vault root")
    }

    /// Render an absolute path under the root as a forward-slash relative path
    pub fn relative_of(&self, absolute: &Path) -> Result<String> {
        let rel = absolute.strip_prefix(&self.root).map_err(|_| {
            Error::invalid_path(absolute.display().to_string(), "not inside vault root")
        })?;

        Ok(rel
            .components()
            .map(|c| c.as_os_str().to_string_lossy())
            .collect::<Vec<_>>()
            .join("/"))
    }

    /// Whether `absolute` is the vault root itself
    pub fn is_root(&self, absolute: &Path) -> bool {
        absolute == self.root
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn resolver() -> (TempDir, PathResolver) {
        let temp = TempDir::new().unwrap();
        let resolver = PathResolver::new(temp.path()).unwrap();
        (temp, resolver)
    }

    #[test]
    fn test_resolve_existing_and_new_paths() {
        let (temp, resolver) = resolver();
        std::fs::create_dir(temp.path().join("notes")).unwrap();
        std::fs::write(temp.path().join("notes/a.md"), "a").unwrap();

        let existing = resolver.resolve("notes/a.md").unwrap();
        assert_eq!(existing, resolver.root().join("notes/a.md"));

        let fresh = resolver.resolve("notes/new/b.md").unwrap();
        assert_eq!(fresh, resolver.root().join("notes/new/b.md"));
    }

    #[test]
    fn test_empty_and_dot_resolve_to_root() {
        let (_temp, resolver) = resolver();
        assert_eq!(resolver.resolve("").unwrap(), resolver.root());
        assert_eq!(resolver.resolve(".").unwrap(), resolver.root());
        assert!(resolver.is_root(&resolver.resolve("./").unwrap()));
    }

    #[test]
    fn test_traversal_rejected() {
        let (_temp, resolver) = resolver();
        for bad in ["../outside.md", "../../../etc/passwd", "a/../../x.md", "missing/../../x"] {
            let err = resolver.resolve(bad).unwrap_err();
            assert!(err.kind().is_security_rejection(), "{bad}");
        }
    }

    #[cfg(unix)]
    #[test]
    fn test_rejected_at_first_step_outside_root() {
        let parent = TempDir::new().unwrap();
        std::fs::create_dir(parent.path().join("vault")).unwrap();
        std::fs::create_dir(parent.path().join("outside")).unwrap();
        // Resolving this link would fail with a different reason, so reaching it means
        // the walk continued past the root
        std::os::unix::fs::symlink(
            parent.path().join("gone"),
            parent.path().join("outside/dangling"),
        )
        .unwrap();
        let resolver = PathResolver::new(&parent.path().join("vault")).unwrap();

        for bad in ["../outside/dangling/x.md", "../vault/note.md"] {
            match resolver.resolve(bad) {
                Err(Error::InvalidPath { reason, .. }) => {
                    assert_eq!(reason, "escapes vault root", "{bad}")
                }
                other => panic!("{bad}: expected rejection, got {other:?}"),
            }
        }
    }

    #[test]
    fn test_dotdot_inside_vault_allowed() {
        let (temp, resolver) = resolver();
        std::fs::create_dir(temp.path().join("a")).unwrap();
        let resolved = resolver.resolve("a/../b.md").unwrap();
        assert_eq!(resolved, resolver.root().join("b.md"));
    }

    #[test]
    fn test_absolute_rejected() {
        let (_temp, resolver) = resolver();
        assert!(matches!(
            resolver.resolve("/etc/passwd"),
            Err(Error::InvalidPath { .. })
        ));
    }

    #[test]
    fn test_nul_rejected() {
        let (_temp, resolver) = resolver();
        assert!(resolver.resolve("bad\0name.md").is_err());
    }

    #[test]
    fn test_sibling_prefix_rejected() {
        let parent = TempDir::new().unwrap();
        std::fs::create_dir(parent.path().join("vault")).unwrap();
        std::fs::create_dir(parent.path().join("vault2")).unwrap();
        let resolver = PathResolver::new(&parent.path().join("vault")).unwrap();

        assert!(resolver.resolve("../vault2/x.md").is_err());
    }

    #[cfg(unix)]
    #[test]
    fn test_symlink_escape_rejected() {
        let outside = TempDir::new().unwrap();
        std::fs::write(outside.path().join("secret.md"), "secret").unwrap();

        let (temp, resolver) = resolver();
        std::os::unix::fs::symlink(outside.path(), temp.path().join("link")).unwrap();

        assert!(resolver.resolve("link/secret.md").is_err());
        assert!(resolver.resolve("link/new.md").is_err());
    }

    #[cfg(unix)]
    #[test]
    fn test_symlink_inside_vault_allowed() {
        let (temp, resolver) = resolver();
        std::fs::create_dir(temp.path().join("real")).unwrap();
        std::os::unix::fs::symlink(temp.path().join("real"), temp.path().join("alias")).unwrap();

        let resolved = resolver.resolve("alias/note.md").unwrap();
        assert_eq!(resolved, resolver.root().join("real/note.md"));
    }

    #[cfg(unix)]
    #[test]
    fn test_dangling_symlink_rejected() {
        let (temp, resolver) = resolver();
        std::os::unix::fs::symlink(temp.path().join("gone"), temp.path().join("dangling.md"))
            .unwrap();
        assert!(resolver.resolve("dangling.md").is_err());
    }

    #[test]
    fn test_relative_of() {
        let (_temp, resolver) = resolver();
        let abs = resolver.root().join("notes").join("deep").join("x.md");
        assert_eq!(resolver.relative_of(&abs).unwrap(), "notes/deep/x.md");
        assert!(resolver.relative_of(Path::new("/elsewhere/x.md")).is_err());
    }

    #[test]
    fn test_missing_root_rejected() {
        let temp = TempDir::new().unwrap();
        assert!(PathResolver::new(&temp.path().join("absent")).is_err());
    }
}
