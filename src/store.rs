//! Release documentation storage.
//!
//! Documents live in an object store under versioned folder prefixes:
//!
//! ```text
//! releases/{version}/{timestamp}_release-note_{version}.md
//! releases/{version}/mr_docs/{change record}
//! current_release/{change record}
//! ```
//!
//! [`ObjectStore`] is the raw key/value seam; [`DocumentSource`] is the
//! release-level view the rest of the crate consumes.

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use regex::RegexBuilder;
use tracing::{debug, info, warn};

pub mod error;
pub mod filename;
pub mod fs;
pub mod memory;
pub mod version;

pub use error::StoreError;
pub use filename::{parse_change_record, short_identifier, ChangeRecord};
pub use fs::FsObjectStore;
pub use memory::MemoryObjectStore;

/// Prefix under which every release folder lives.
pub const RELEASES_PREFIX: &str = "releases/";

/// Prefix of change records for the release under development.
pub const CURRENT_RELEASE_PREFIX: &str = "current_release/";

/// Folder, inside a release, holding its change records.
pub const MR_DOCS_DIR: &str = "mr_docs/";

/// Metadata of one stored object.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObjectMeta {
    /// Full `/`-separated key.
    pub key: String,
    /// Creation time, when the store records one.
    pub created: Option<DateTime<Utc>>,
}

impl ObjectMeta {
    /// Returns the last path component of the key.
    pub fn filename(&self) -> &str {
        self.key.rsplit('/').next().unwrap_or(&self.key)
    }
}

/// Key/value access to stored text blobs.
pub trait ObjectStore {
    /// Lists objects whose key starts with `prefix`, ordered by key.
    fn list(&self, prefix: &str) -> Result<Vec<ObjectMeta>, StoreError>;

    /// Reads an object as text, or `None` when it does not exist.
    fn read_text(&self, key: &str) -> Result<Option<String>, StoreError>;
}

/// Release-level access to documentation.
pub trait DocumentSource {
    /// Lists release versions, newest first.
    fn release_versions(&self) -> Result<Vec<String>, StoreError>;

    /// Lists release versions that carry change records, newest first.
    fn mr_release_versions(&self) -> Result<Vec<String>, StoreError>;

    /// Lists every object key inside a release folder.
    fn release_files(&self, version: &str) -> Result<Vec<String>, StoreError>;

    /// Returns the release notes of `version`, or `None` when none are stored.
    fn release_notes(&self, version: &str) -> Result<Option<String>, StoreError>;

    /// Lists the change records of a release, newest first.
    fn change_records(&self, release: &str) -> Result<Vec<ChangeRecord>, StoreError>;

    /// Lists change records of the release under development, newest first.
    fn current_release_records(&self) -> Result<Vec<ChangeRecord>, StoreError>;

    /// Returns the text of a change record, or `None` when it vanished.
    fn change_record_text(&self, record: &ChangeRecord) -> Result<Option<String>, StoreError>;

    /// Counts the change records of a release; listing failures count as zero.
    fn count_change_records(&self, release: &str) -> usize {
        match self.change_records(release) {
            Ok(records) => records.len(),
            Err(e) => {
                warn!(release, error = %e, "Failed to count change records");
                0
            }
        }
    }
}

/// [`DocumentSource`] over any [`ObjectStore`].
#[derive(Debug, Clone)]
pub struct ReleaseCatalog<S> {
    store: S,
}

impl<S: ObjectStore> ReleaseCatalog<S> {
    /// Wraps an object store.
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Returns the underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }

    fn release_folder(version: &str) -> String {
        format!("{RELEASES_PREFIX}{version}/")
    }

    /// Collects distinct release folder names from keys accepted by `include`.
    fn versions_where(&self, include: impl Fn(&str) -> bool) -> Result<Vec<String>, StoreError> {
        let distinct: BTreeSet<String> = self
            .store
            .list(RELEASES_PREFIX)?
            .iter()
            .filter(|o| include(o.key.as_str()))
            .filter_map(|o| {
                o.key
                    .strip_prefix(RELEASES_PREFIX)?
                    .split('/')
                    .next()
                    .filter(|v| !v.is_empty())
                    .map(str::to_string)
            })
            .collect();
        let mut versions: Vec<String> = distinct.into_iter().collect();
        version::sort_newest_first(&mut versions);
        Ok(versions)
    }

    fn records_under(
        &self,
        prefix: &str,
        accept: impl Fn(&ObjectMeta) -> bool,
    ) -> Result<Vec<ChangeRecord>, StoreError> {
        let mut records = Vec::new();
        for object in self.store.list(prefix)?.iter().filter(|o| accept(*o)) {
            match parse_change_record(object.filename(), &object.key, object.created) {
                Some(record) => records.push(record),
                None => debug!(key = %object.key, "Skipping unrecognized change record name"),
            }
        }
        filename::sort_records(&mut records);
        Ok(records)
    }
}

impl<S: ObjectStore> DocumentSource for ReleaseCatalog<S> {
    fn release_versions(&self) -> Result<Vec<String>, StoreError> {
        self.versions_where(|_| true)
    }

    fn mr_release_versions(&self) -> Result<Vec<String>, StoreError> {
        self.versions_where(|key| key.contains(MR_DOCS_DIR))
    }

    fn release_files(&self, version: &str) -> Result<Vec<String>, StoreError> {
        Ok(self
            .store
            .list(&Self::release_folder(version))?
            .into_iter()
            .map(|o| o.key)
            .collect())
    }

    fn release_notes(&self, version: &str) -> Result<Option<String>, StoreError> {
        let folder = Self::release_folder(version);
        let objects = self.store.list(&folder)?;

        let convention = RegexBuilder::new(&format!(
            r"^.*_release-note_{}",
            regex::escape(version)
        ))
        .case_insensitive(true)
        .build()?;

        let found = objects
            .iter()
            .find(|o| convention.is_match(o.filename()))
            .or_else(|| {
                objects.iter().find(|o| {
                    let name = o.filename().to_lowercase();
                    name.contains("release-note") || name.contains("release_note")
                })
            });

        match found {
            Some(object) => {
                info!(key = %object.key, "Found release notes");
                self.store.read_text(&object.key)
            }
            None => {
                let available: Vec<&str> = objects.iter().map(|o| o.key.as_str()).collect();
                warn!(version, folder = %folder, ?available, "No release notes found");
                Ok(None)
            }
        }
    }

    fn change_records(&self, release: &str) -> Result<Vec<ChangeRecord>, StoreError> {
        let prefix = format!("{}{MR_DOCS_DIR}", Self::release_folder(release));
        self.records_under(&prefix, |_| true)
    }

    fn current_release_records(&self) -> Result<Vec<ChangeRecord>, StoreError> {
        self.records_under(CURRENT_RELEASE_PREFIX, |o| {
            o.key.ends_with(".json") || o.key.ends_with(".md")
        })
    }

    fn change_record_text(&self, record: &ChangeRecord) -> Result<Option<String>, StoreError> {
        let text = self.store.read_text(&record.path)?;
        if text.is_none() {
            warn!(path = %record.path, "Change record not found");
        }
        Ok(text)
    }
}

/// Finds a change record by display name, falling back to an identifier prefix.
pub fn find_change_record<'a>(records: &'a [ChangeRecord], query: &str) -> Option<&'a ChangeRecord> {
    records
        .iter()
        .find(|r| r.display_name == query)
        .or_else(|| {
            records
                .iter()
                .find(|r| !query.is_empty() && r.identifier.starts_with(query))
        })
}
