//! # Index/Page Reconciliation
//!
//! Publish and delete each touch two remote files without a transaction,
//! so a failure between the two writes leaves drift:
//!
//! - **orphan page**: `articles/{slug}/index.html` exists, no index entry.
//! - **dangling entry**: index entry whose page does not exist.
//!
//! [`inspect`] lists both. [`repair`] drops dangling entries with one index
//! write conditioned on the revision it inspected, so a publish or delete
//! landing in between makes the repair fail instead of being undone. Orphan
//! pages are deleted only when asked, and only if the index still does not
//! list them when the deletion runs. Orphan pages are never re-indexed
//! automatically: their summary fields (author, excerpt, date) are not
//! recoverable from the page alone.

use std::collections::BTreeSet;

use pjpv_content::{ContentStore, EntryKind};
use pjpv_core::{Slug, ARTICLES_DIR};
use serde::{Deserialize, Serialize};

use crate::caller::Caller;
use crate::error::ArticleError;
use crate::index::{read_index, write_index, IndexSnapshot};

const PAGE_FILE: &str = "index.html";

/// Drift between pages and the index.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReconcileReport {
    /// Number of index entries read.
    pub indexed: usize,
    /// Slugs with a page but no index entry, sorted.
    pub orphan_pages: Vec<Slug>,
    /// Slugs with an index entry but no page, in index order.
    pub dangling_entries: Vec<Slug>,
}

impl ReconcileReport {
    /// Whether pages and index agree.
    pub fn is_consistent(&self) -> bool {
        self.orphan_pages.is_empty() && self.dangling_entries.is_empty()
    }
}

/// What [`repair`] is allowed to change.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct RepairOptions {
    #[serde(default)]
    pub delete_orphan_pages: bool,
}

/// Result of a repair pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RepairOutcome {
    pub report: ReconcileReport,
    pub entries_removed: usize,
    pub pages_deleted: usize,
}

/// Slugs that have a page file. Directories whose name is not already a
/// normalized slug are not article directories and are skipped.
async fn published_pages(store: &dyn ContentStore) -> Result<BTreeSet<Slug>, ArticleError> {
    let mut pages = BTreeSet::new();
    for entry in store.list(ARTICLES_DIR).await? {
        if entry.kind != EntryKind::Dir {
            continue;
        }
        let Ok(slug) = Slug::parse(&entry.name) else {
            continue;
        };
        if slug.as_str() != entry.name {
            tracing::debug!(dir = %entry.path, "skipping non-article directory");
            continue;
        }
        let children = store.list(&entry.path).await?;
        if children
            .iter()
            .any(|c| c.kind == EntryKind::File && c.name == PAGE_FILE)
        {
            pages.insert(slug);
        }
    }
    Ok(pages)
}

/// Read the index, then the pages, and compare them. The snapshot is the
/// index the report was computed from.
async fn survey(
    store: &dyn ContentStore,
) -> Result<(ReconcileReport, IndexSnapshot), ArticleError> {
    let snapshot = read_index(store).await?;
    let pages = published_pages(store).await?;

    let report = ReconcileReport {
        indexed: snapshot.index.len(),
        orphan_pages: pages
            .iter()
            .filter(|s| !snapshot.index.contains(s))
            .cloned()
            .collect(),
        dangling_entries: snapshot
            .index
            .entries()
            .iter()
            .map(|e| e.slug.clone())
            .filter(|s| !pages.contains(s))
            .collect(),
    };

    tracing::info!(
        indexed = report.indexed,
        orphan_pages = report.orphan_pages.len(),
        dangling_entries = report.dangling_entries.len(),
        "reconciliation inspected"
    );
    Ok((report, snapshot))
}

/// Compare published pages with the index. Read-only.
pub async fn inspect(
    store: &dyn ContentStore,
    caller: Option<&Caller>,
) -> Result<ReconcileReport, ArticleError> {
    caller.ok_or(ArticleError::Unauthorized)?;
    let (report, _) = survey(store).await?;
    Ok(report)
}

/// Inspect, then remove dangling entries and optionally orphan pages.
///
/// The index rewrite is conditioned on the revision that was inspected: if
/// the index changed since, the store rejects it and nothing is dropped.
pub async fn repair(
    store: &dyn ContentStore,
    caller: Option<&Caller>,
    options: RepairOptions,
) -> Result<RepairOutcome, ArticleError> {
    caller.ok_or(ArticleError::Unauthorized)?;
    let (report, mut snapshot) = survey(store).await?;

    let mut entries_removed = 0;
    if !report.dangling_entries.is_empty() {
        for slug in &report.dangling_entries {
            if snapshot.index.remove(slug) {
                entries_removed += 1;
            }
        }
        write_index(
            store,
            &snapshot,
            &format!("Reconcile articles index (drop {entries_removed} dangling)"),
        )
        .await?;
    }

    let mut pages_deleted = 0;
    if options.delete_orphan_pages && !report.orphan_pages.is_empty() {
        let current = read_index(store).await?;
        for slug in &report.orphan_pages {
            if current.index.contains(slug) {
                tracing::info!(%slug, "orphan page indexed since inspection; kept");
                continue;
            }
            let path = slug.page_path();
            if let Some(page) = store.get(&path).await? {
                store
                    .delete(&path, &page.revision, &format!("Delete orphan {path}"))
                    .await?;
                pages_deleted += 1;
            }
        }
    }

    tracing::info!(entries_removed, pages_deleted, "reconciliation applied");
    Ok(RepairOutcome {
        report,
        entries_removed,
        pages_deleted,
    })
}
