//! In-memory content store.
//!
//! Mirrors the compare-and-swap rules of the GitHub contents API so that
//! publish/delete flows can be exercised without a network:
//!
//! | Call                                  | Outcome |
//! |---------------------------------------|---------|
//! | `put` new path, no revision           | created |
//! | `put` existing path, no revision      | 422     |
//! | `put` / `delete` with stale revision  | 409     |
//! | `put` missing path with a revision    | 422     |
//! | `delete` missing path                 | 404     |
//!
//! Failures can be injected per path to simulate a remote outage between
//! the two writes of an operation.

use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::RwLock;
use sha2::{Digest, Sha256};

use crate::error::ContentError;
use crate::store::{ContentStore, DirEntry, EntryKind, RemoteFile, Revision};

#[derive(Debug, Default)]
struct Inner {
    files: RwLock<BTreeMap<String, RemoteFile>>,
    failures: RwLock<HashMap<String, u16>>,
    writes: AtomicUsize,
    generation: AtomicU64,
}

/// Thread-safe, cloneable in-memory store. All clones share the same files.
///
/// Locks are `parking_lot` and never held across `.await` points.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    inner: Arc<Inner>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Write `content` to `path` directly, bypassing revision checks and the
    /// write counter. Returns the new revision.
    pub fn seed(&self, path: &str, content: &str) -> Revision {
        let revision = self.next_revision(content);
        self.inner.files.write().insert(
            path.to_string(),
            RemoteFile {
                content: content.to_string(),
                revision: revision.clone(),
            },
        );
        revision
    }

    /// Current content of `path`, if any.
    pub fn contents(&self, path: &str) -> Option<String> {
        self.inner.files.read().get(path).map(|f| f.content.clone())
    }

    /// Current revision of `path`, if any.
    pub fn revision(&self, path: &str) -> Option<Revision> {
        self.inner.files.read().get(path).map(|f| f.revision.clone())
    }

    /// All stored paths, sorted.
    pub fn paths(&self) -> Vec<String> {
        self.inner.files.read().keys().cloned().collect()
    }

    /// Number of successful `put`/`delete` calls so far.
    pub fn write_count(&self) -> usize {
        self.inner.writes.load(Ordering::SeqCst)
    }

    /// Make every subsequent `put` or `delete` on `path` fail with `status`.
    pub fn fail_writes_to(&self, path: &str, status: u16) {
        self.inner.failures.write().insert(path.to_string(), status);
    }

    /// Remove all injected failures.
    pub fn clear_failures(&self) {
        self.inner.failures.write().clear();
    }

    fn next_revision(&self, content: &str) -> Revision {
        let generation = self.inner.generation.fetch_add(1, Ordering::SeqCst);
        let mut hasher = Sha256::new();
        hasher.update(generation.to_be_bytes());
        hasher.update(content.as_bytes());
        Revision::new(format!("{:x}", hasher.finalize()))
    }

    fn injected_failure(&self, operation: &str, path: &str) -> Result<(), ContentError> {
        match self.inner.failures.read().get(path) {
            Some(&status) => Err(remote(operation, status, "injected failure")),
            None => Ok(()),
        }
    }
}

fn remote(operation: &str, status: u16, body: &str) -> ContentError {
    ContentError::Remote {
        operation: operation.to_string(),
        status,
        body: body.to_string(),
    }
}

#[async_trait]
impl ContentStore for MemoryStore {
    async fn get(&self, path: &str) -> Result<Option<RemoteFile>, ContentError> {
        Ok(self.inner.files.read().get(path).cloned())
    }

    async fn put(
        &self,
        path: &str,
        content: &str,
        _message: &str,
        revision: Option<&Revision>,
    ) -> Result<Revision, ContentError> {
        let operation = format!("PUT {path}");
        self.injected_failure(&operation, path)?;

        let new_revision = self.next_revision(content);
        let mut files = self.inner.files.write();
        match (files.get(path), revision) {
            (None, None) => {}
            (Some(current), Some(expected)) if &current.revision == expected => {}
            (Some(current), Some(_)) => {
                return Err(remote(
                    &operation,
                    409,
                    &format!("{path} does not match {}", current.revision),
                ));
            }
            (Some(_), None) => {
                return Err(remote(&operation, 422, "\"sha\" wasn't supplied."));
            }
            (None, Some(_)) => {
                return Err(remote(&operation, 422, "sha supplied for a missing file"));
            }
        }
        files.insert(
            path.to_string(),
            RemoteFile {
                content: content.to_string(),
                revision: new_revision.clone(),
            },
        );
        self.inner.writes.fetch_add(1, Ordering::SeqCst);
        Ok(new_revision)
    }

    async fn delete(
        &self,
        path: &str,
        revision: &Revision,
        _message: &str,
    ) -> Result<(), ContentError> {
        let operation = format!("DELETE {path}");
        self.injected_failure(&operation, path)?;

        let mut files = self.inner.files.write();
        match files.get(path) {
            None => return Err(remote(&operation, 404, "Not Found")),
            Some(current) if &current.revision != revision => {
                return Err(remote(
                    &operation,
                    409,
                    &format!("{path} does not match {revision}"),
                ));
            }
            Some(_) => {}
        }
        files.remove(path);
        self.inner.writes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    async fn list(&self, dir: &str) -> Result<Vec<DirEntry>, ContentError> {
        let prefix = format!("{}/", dir.trim_end_matches('/'));
        let files = self.inner.files.read();

        let mut dirs = BTreeSet::new();
        let mut entries = Vec::new();
        for path in files.keys() {
            let Some(rest) = path.strip_prefix(&prefix) else {
                continue;
            };
            match rest.split_once('/') {
                Some((child, _)) => {
                    dirs.insert(child.to_string());
                }
                None => entries.push(DirEntry {
                    name: rest.to_string(),
                    path: path.clone(),
                    kind: EntryKind::File,
                }),
            }
        }
        entries.extend(dirs.into_iter().map(|name| DirEntry {
            path: format!("{prefix}{name}"),
            name,
            kind: EntryKind::Dir,
        }));
        Ok(entries)
    }

    fn backend_name(&self) -> &'static str {
        "memory"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn create_then_conditional_update() {
        let store = MemoryStore::new();
        let r1 = store.put("a.txt", "one", "m", None).await.unwrap();
        let r2 = store.put("a.txt", "two", "m", Some(&r1)).await.unwrap();
        assert_ne!(r1, r2);
        let file = store.get("a.txt").await.unwrap().unwrap();
        assert_eq!(file.content, "two");
        assert_eq!(file.revision, r2);
        assert_eq!(store.write_count(), 2);
    }

    #[tokio::test]
    async fn stale_revision_rejected_with_409() {
        let store = MemoryStore::new();
        let r1 = store.put("a.txt", "one", "m", None).await.unwrap();
        store.put("a.txt", "two", "m", Some(&r1)).await.unwrap();
        let err = store.put("a.txt", "three", "m", Some(&r1)).await.unwrap_err();
        assert_eq!(err.status(), Some(409));
        assert_eq!(store.contents("a.txt").as_deref(), Some("two"));
    }

    #[tokio::test]
    async fn overwrite_without_revision_rejected_with_422() {
        let store = MemoryStore::new();
        store.seed("a.txt", "one");
        let err = store.put("a.txt", "two", "m", None).await.unwrap_err();
        assert_eq!(err.status(), Some(422));
        assert_eq!(store.write_count(), 0);
    }

    #[tokio::test]
    async fn delete_requires_matching_revision() {
        let store = MemoryStore::new();
        let rev = store.seed("a.txt", "one");
        let stale = Revision::new("stale");
        assert_eq!(
            store.delete("a.txt", &stale, "m").await.unwrap_err().status(),
            Some(409)
        );
        store.delete("a.txt", &rev, "m").await.unwrap();
        assert!(store.get("a.txt").await.unwrap().is_none());
        assert_eq!(
            store.delete("a.txt", &rev, "m").await.unwrap_err().status(),
            Some(404)
        );
    }

    #[tokio::test]
    async fn injected_failure_blocks_writes_only() {
        let store = MemoryStore::new();
        store.seed("a.txt", "one");
        store.fail_writes_to("a.txt", 502);
        assert!(store.get("a.txt").await.unwrap().is_some());
        let rev = store.revision("a.txt").unwrap();
        let err = store.put("a.txt", "two", "m", Some(&rev)).await.unwrap_err();
        assert_eq!(err.status(), Some(502));
        store.clear_failures();
        store.put("a.txt", "two", "m", Some(&rev)).await.unwrap();
    }

    #[tokio::test]
    async fn list_reports_files_and_subdirectories() {
        let store = MemoryStore::new();
        store.seed("articles/index.json", "[]");
        store.seed("articles/a/index.html", "<p>a</p>");
        store.seed("articles/b/index.html", "<p>b</p>");
        store.seed("articles/b/cover.jpg", "jpg");
        store.seed("other/x", "x");

        let entries = store.list("articles").await.unwrap();
        let names: Vec<(&str, EntryKind)> =
            entries.iter().map(|e| (e.name.as_str(), e.kind)).collect();
        assert_eq!(
            names,
            vec![
                ("index.json", EntryKind::File),
                ("a", EntryKind::Dir),
                ("b", EntryKind::Dir),
            ]
        );
        assert_eq!(entries[1].path, "articles/a");
        assert!(store.list("missing").await.unwrap().is_empty());
    }
}
