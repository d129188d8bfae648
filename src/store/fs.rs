//! Filesystem-backed object store.

use std::fs;
use std::io;
use std::path::{Component, Path, PathBuf};

use chrono::{DateTime, Utc};
use tracing::debug;

use super::{ObjectMeta, ObjectStore, StoreError};

/// Object store whose keys are `/`-separated paths relative to a root directory.
#[derive(Debug, Clone)]
pub struct FsObjectStore {
    root: PathBuf,
}

impl FsObjectStore {
    /// Opens a store rooted at `root`, which must be an existing directory.
    pub fn open<P: AsRef<Path>>(root: P) -> Result<Self, StoreError> {
        let root = root.as_ref();
        if !root.is_dir() {
            return Err(StoreError::RootNotFound(root.to_path_buf()));
        }
        Ok(Self {
            root: root.to_path_buf(),
        })
    }

    /// Returns the root directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Resolves a key to a path inside the root.
    fn resolve(&self, key: &str) -> Result<PathBuf, StoreError> {
        let relative = Path::new(key);
        let escapes = relative
            .components()
            .any(|c| !matches!(c, Component::Normal(_)));
        if key.is_empty() || escapes {
            return Err(StoreError::InvalidKey(key.to_string()));
        }
        Ok(self.root.join(relative))
    }

    fn walk(&self, dir: &Path, key_prefix: &str, out: &mut Vec<ObjectMeta>) -> Result<(), StoreError> {
        let entries = fs::read_dir(dir).map_err(|e| StoreError::io(dir, e))?;
        for entry in entries {
            let entry = entry.map_err(|e| StoreError::io(dir, e))?;
            let path = entry.path();
            let name = entry.file_name().to_string_lossy().into_owned();
            let key = format!("{key_prefix}{name}");
            let file_type = entry.file_type().map_err(|e| StoreError::io(&path, e))?;

            if file_type.is_dir() {
                self.walk(&path, &format!("{key}/"), out)?;
            } else if file_type.is_file() {
                let metadata = entry.metadata().map_err(|e| StoreError::io(&path, e))?;
                let created = metadata
                    .created()
                    .or_else(|_| metadata.modified())
                    .ok()
                    .map(DateTime::<Utc>::from);
                out.push(ObjectMeta { key, created });
            }
        }
        Ok(())
    }
}

impl ObjectStore for FsObjectStore {
    fn list(&self, prefix: &str) -> Result<Vec<ObjectMeta>, StoreError> {
        // Only walk the deepest directory the prefix names.
        let dir_prefix = prefix.rfind('/').map_or("", |i| &prefix[..=i]);
        let start = if dir_prefix.is_empty() {
            self.root.clone()
        } else {
            self.resolve(dir_prefix.trim_end_matches('/'))?
        };

        let mut objects = Vec::new();
        if start.is_dir() {
            self.walk(&start, dir_prefix, &mut objects)?;
        }
        objects.retain(|o| o.key.starts_with(prefix));
        objects.sort_by(|a, b| a.key.cmp(&b.key));

        debug!(prefix, count = objects.len(), root = %self.root.display(), "Listed objects");
        Ok(objects)
    }

    fn read_text(&self, key: &str) -> Result<Option<String>, StoreError> {
        let path = self.resolve(key)?;
        match fs::read_to_string(&path) {
            Ok(text) => Ok(Some(text)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) if path.is_dir() => {
                debug!(key, error = %e, "Key names a directory");
                Ok(None)
            }
            Err(e) => Err(StoreError::io(path, e)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn store_with(files: &[(&str, &str)]) -> anyhow::Result<(TempDir, FsObjectStore)> {
        let temp_dir = TempDir::new()?;
        for (key, content) in files {
            let path = temp_dir.path().join(key);
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::write(path, content)?;
        }
        let store = FsObjectStore::open(temp_dir.path())?;
        Ok((temp_dir, store))
    }

    #[test]
    fn open_requires_directory() {
        let result = FsObjectStore::open("/definitely/not/a/real/bucket");
        assert!(matches!(result, Err(StoreError::RootNotFound(_))));
    }

    #[test]
    fn root_is_the_opened_directory() -> anyhow::Result<()> {
        let (dir, store) = store_with(&[])?;
        assert_eq!(store.root(), dir.path());
        Ok(())
    }

    #[test]
    fn lists_nested_keys_in_order() -> anyhow::Result<()> {
        let (_dir, store) = store_with(&[
            ("releases/v2.0/notes.md", "b"),
            ("releases/v1.0/mr_docs/mr1_ab.json", "a"),
            ("other/readme.md", "c"),
        ])?;
        let keys: Vec<_> = store.list("releases/")?.into_iter().map(|o| o.key).collect();
        assert_eq!(
            keys,
            ["releases/v1.0/mr_docs/mr1_ab.json", "releases/v2.0/notes.md"]
        );
        Ok(())
    }

    #[test]
    fn partial_prefix_filters_names() -> anyhow::Result<()> {
        let (_dir, store) = store_with(&[("releases/v1.0/a.md", "a"), ("releases/v10.0/b.md", "b")])?;
        let keys: Vec<_> = store.list("releases/v1.")?.into_iter().map(|o| o.key).collect();
        assert_eq!(keys, ["releases/v1.0/a.md"]);
        Ok(())
    }

    #[test]
    fn missing_prefix_lists_nothing() -> anyhow::Result<()> {
        let (_dir, store) = store_with(&[("a.md", "a")])?;
        assert!(store.list("releases/")?.is_empty());
        Ok(())
    }

    #[test]
    fn read_text_reports_missing_as_none() -> anyhow::Result<()> {
        let (_dir, store) = store_with(&[("releases/v1.0/notes.md", "hello")])?;
        assert_eq!(store.read_text("releases/v1.0/notes.md")?.as_deref(), Some("hello"));
        assert_eq!(store.read_text("releases/v1.0/missing.md")?, None);
        assert_eq!(store.read_text("releases/v1.0")?, None);
        Ok(())
    }

    #[test]
    fn keys_cannot_escape_root() -> anyhow::Result<()> {
        let (_dir, store) = store_with(&[("a.md", "a")])?;
        assert!(matches!(
            store.read_text("../etc/passwd"),
            Err(StoreError::InvalidKey(_))
        ));
        assert!(matches!(store.read_text("/etc/passwd"), Err(StoreError::InvalidKey(_))));
        Ok(())
    }
}
