//! In-memory object store.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};

use super::{ObjectMeta, ObjectStore, StoreError};

/// Object store holding its objects in memory, ordered by key.
#[derive(Debug, Clone, Default)]
pub struct MemoryObjectStore {
    objects: BTreeMap<String, (String, Option<DateTime<Utc>>)>,
}

impl MemoryObjectStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or replaces an object.
    pub fn insert(&mut self, key: impl Into<String>, content: impl Into<String>) {
        self.objects.insert(key.into(), (content.into(), None));
    }

    /// Inserts or replaces an object with a creation time.
    pub fn insert_created(
        &mut self,
        key: impl Into<String>,
        content: impl Into<String>,
        created: DateTime<Utc>,
    ) {
        self.objects
            .insert(key.into(), (content.into(), Some(created)));
    }
}

impl ObjectStore for MemoryObjectStore {
    fn list(&self, prefix: &str) -> Result<Vec<ObjectMeta>, StoreError> {
        Ok(self
            .objects
            .range(prefix.to_string()..)
            .take_while(|(key, _)| key.starts_with(prefix))
            .map(|(key, (_, created))| ObjectMeta {
                key: key.clone(),
                created: *created,
            })
            .collect())
    }

    fn read_text(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.objects.get(key).map(|(content, _)| content.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lists_by_prefix() -> anyhow::Result<()> {
        let mut store = MemoryObjectStore::new();
        store.insert("releases/v1.0/a.md", "a");
        store.insert("releases/v2.0/b.md", "b");
        store.insert("current_release/c.md", "c");
        let keys: Vec<_> = store.list("releases/")?.into_iter().map(|o| o.key).collect();
        assert_eq!(keys, ["releases/v1.0/a.md", "releases/v2.0/b.md"]);
        Ok(())
    }

    #[test]
    fn reads_text() -> anyhow::Result<()> {
        let mut store = MemoryObjectStore::new();
        store.insert("a.md", "hello");
        assert_eq!(store.read_text("a.md")?.as_deref(), Some("hello"));
        assert_eq!(store.read_text("b.md")?, None);
        Ok(())
    }
}
