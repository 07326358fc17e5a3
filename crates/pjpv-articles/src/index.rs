//! Revision-tracked access to `articles/index.json`.

use pjpv_content::{ContentStore, Revision};
use pjpv_core::{ArticleIndex, INDEX_PATH};

use crate::error::ArticleError;

/// The index as read, with the revision any rewrite must be conditioned on.
/// `revision` is `None` when the index does not exist yet.
#[derive(Debug, Clone)]
pub struct IndexSnapshot {
    pub index: ArticleIndex,
    pub revision: Option<Revision>,
}

/// Read and parse the index. A missing document reads as empty.
pub async fn read_index(store: &dyn ContentStore) -> Result<IndexSnapshot, ArticleError> {
    match store.get(INDEX_PATH).await? {
        Some(file) => Ok(IndexSnapshot {
            index: ArticleIndex::from_json(&file.content).map_err(ArticleError::CorruptIndex)?,
            revision: Some(file.revision),
        }),
        None => Ok(IndexSnapshot {
            index: ArticleIndex::new(),
            revision: None,
        }),
    }
}

/// Write `snapshot.index` back, conditioned on `snapshot.revision`.
pub async fn write_index(
    store: &dyn ContentStore,
    snapshot: &IndexSnapshot,
    message: &str,
) -> Result<Revision, ArticleError> {
    let body = snapshot
        .index
        .to_json_pretty()
        .map_err(ArticleError::CorruptIndex)?;
    Ok(store
        .put(INDEX_PATH, &body, message, snapshot.revision.as_ref())
        .await?)
}
