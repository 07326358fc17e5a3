//! # Delete Operation
//!
//! Removes `articles/{slug}/index.html` (when present) and the matching
//! index entry. The index is rewritten even when it had no entry for the
//! slug; a missing page is not an error. Calling delete for a slug whose
//! page is already gone is therefore how a stale index entry gets cleared.

use pjpv_content::ContentStore;
use pjpv_core::{Slug, ValidationError};
use serde::Serialize;

use crate::caller::Caller;
use crate::error::ArticleError;
use crate::index::{read_index, write_index};

/// What a delete actually removed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Deletion {
    pub slug: Slug,
    pub page_removed: bool,
    pub entry_removed: bool,
}

/// Delete the article identified by `raw_slug`.
///
/// The slug is normalized first, so only paths under `articles/` can be
/// reached. Performs no remote call when `caller` is `None` or the slug is
/// blank.
pub async fn delete_article(
    store: &dyn ContentStore,
    caller: Option<&Caller>,
    raw_slug: &str,
) -> Result<Deletion, ArticleError> {
    caller.ok_or(ArticleError::Unauthorized)?;
    if raw_slug.trim().is_empty() {
        return Err(ValidationError::MissingField("slug").into());
    }
    let slug = Slug::parse(raw_slug)?;
    let page_path = slug.page_path();

    let page_removed = match store.get(&page_path).await? {
        Some(page) => {
            store
                .delete(&page_path, &page.revision, &format!("Delete {page_path}"))
                .await?;
            true
        }
        None => false,
    };

    let mut snapshot = read_index(store).await?;
    let entry_removed = snapshot.index.remove(&slug);
    if let Err(err) = write_index(
        store,
        &snapshot,
        &format!("Update articles index (delete {slug})"),
    )
    .await
    {
        if page_removed && entry_removed {
            tracing::warn!(%slug, error = %err, "page deleted but index still lists it; delete again to clear the entry");
        }
        return Err(err);
    }

    tracing::info!(%slug, page_removed, entry_removed, backend = store.backend_name(), "article deleted");
    Ok(Deletion {
        slug,
        page_removed,
        entry_removed,
    })
}
