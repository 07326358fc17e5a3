//! # Content Store Interface
//!
//! The [`ContentStore`] trait abstracts over where article files live.
//! Production deployments use [`crate::GitHubContentClient`]; tests and dry
//! runs use [`crate::MemoryStore`]. Operations are written against the
//! trait so the same publish/delete code runs on both.
//!
//! Implementations must be `Send + Sync` so they can be shared across
//! request handlers behind an `Arc`. The trait is object-safe.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::ContentError;

/// Opaque version token of a remote file (the blob hash).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Revision(String);

impl Revision {
    /// Wrap a token returned by the remote store.
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// Access the raw token.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Revision {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// A file read from the store, with the revision required to change it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteFile {
    pub content: String,
    pub revision: Revision,
}

/// Kind of a directory listing entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    File,
    Dir,
    /// Symlinks, submodules and anything else the store reports.
    #[serde(other)]
    Other,
}

/// One child of a listed directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DirEntry {
    pub name: String,
    pub path: String,
    #[serde(rename = "type")]
    pub kind: EntryKind,
}

/// Revision-guarded file storage.
#[async_trait]
pub trait ContentStore: Send + Sync {
    /// Read `path`. Returns `Ok(None)` when it does not exist.
    async fn get(&self, path: &str) -> Result<Option<RemoteFile>, ContentError>;

    /// Create `path` (when `revision` is `None`) or overwrite it
    /// conditionally. Returns the new revision.
    async fn put(
        &self,
        path: &str,
        content: &str,
        message: &str,
        revision: Option<&Revision>,
    ) -> Result<Revision, ContentError>;

    /// Delete `path`, which must currently be at `revision`.
    async fn delete(
        &self,
        path: &str,
        revision: &Revision,
        message: &str,
    ) -> Result<(), ContentError>;

    /// List the direct children of `dir`. A missing directory lists empty.
    async fn list(&self, dir: &str) -> Result<Vec<DirEntry>, ContentError>;

    /// Short name for logs ("github", "memory").
    fn backend_name(&self) -> &'static str;
}
