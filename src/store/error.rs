//! Document store errors.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while listing or reading stored documents.
///
/// A document that does not exist is not an error; lookups report it as
/// `None` instead.
#[derive(Error, Debug)]
pub enum StoreError {
    /// The directory backing the store does not exist.
    #[error("Document store root not found: {}", .0.display())]
    RootNotFound(PathBuf),

    /// An object key escapes the store or is otherwise malformed.
    #[error("Invalid object key: {0}")]
    InvalidKey(String),

    /// Reading from the backing filesystem failed.
    #[error("Failed to access {}", .path.display())]
    Io {
        /// Path being accessed.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// A lookup pattern built from user input failed to compile.
    #[error("Invalid lookup pattern: {0}")]
    Pattern(#[from] regex::Error),
}

impl StoreError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
