//! # Public Article Index
//!
//! `articles/index.json` is a JSON array of [`ArticleSummary`] records,
//! newest first, unique on slug. It is the shared document that both
//! publish and delete rewrite; the remote store's revision tag guards each
//! rewrite, this type only computes the new contents.

use serde::{Deserialize, Serialize};

use crate::article::ArticleSummary;
use crate::slug::Slug;

/// Repository path of the index document.
pub const INDEX_PATH: &str = "articles/index.json";

/// In-memory view of the index document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ArticleIndex(Vec<ArticleSummary>);

impl ArticleIndex {
    /// An empty index.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse the document body. A blank document is an empty index.
    ///
    /// # Errors
    ///
    /// Returns the `serde_json` error when the body is not an array of
    /// summaries.
    pub fn from_json(body: &str) -> Result<Self, serde_json::Error> {
        if body.trim().is_empty() {
            return Ok(Self::new());
        }
        serde_json::from_str(body)
    }

    /// Serialize with two-space indentation, as served to the listing page.
    ///
    /// # Errors
    ///
    /// Propagates `serde_json` serialization errors.
    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(&self.0)
    }

    /// Insert `entry` at the front, dropping any entry with the same slug.
    pub fn upsert(&mut self, entry: ArticleSummary) {
        self.0.retain(|e| e.slug != entry.slug);
        self.0.insert(0, entry);
    }

    /// Remove the entry for `slug`. Returns whether one was present.
    pub fn remove(&mut self, slug: &Slug) -> bool {
        let before = self.0.len();
        self.0.retain(|e| &e.slug != slug);
        self.0.len() != before
    }

    /// Look up an entry by slug.
    pub fn get(&self, slug: &Slug) -> Option<&ArticleSummary> {
        self.0.iter().find(|e| &e.slug == slug)
    }

    /// Whether an entry exists for `slug`.
    pub fn contains(&self, slug: &Slug) -> bool {
        self.get(slug).is_some()
    }

    /// Entries in document order.
    pub fn entries(&self) -> &[ArticleSummary] {
        &self.0
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the index has no entries.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(slug: &str, title: &str) -> ArticleSummary {
        let slug = Slug::parse(slug).unwrap();
        ArticleSummary {
            url: slug.url(),
            slug,
            title: title.into(),
            author: "Bureau".into(),
            date_iso: "2026-01-01T00:00:00.000Z".into(),
            cover_url: String::new(),
            excerpt: String::new(),
        }
    }

    fn slugs(index: &ArticleIndex) -> Vec<&str> {
        index.entries().iter().map(|e| e.slug.as_str()).collect()
    }

    #[test]
    fn blank_document_is_empty_index() {
        assert!(ArticleIndex::from_json("").unwrap().is_empty());
        assert!(ArticleIndex::from_json("  \n").unwrap().is_empty());
        assert!(ArticleIndex::from_json("[]").unwrap().is_empty());
    }

    #[test]
    fn upsert_prepends_new_entries() {
        let mut index = ArticleIndex::new();
        index.upsert(entry("a", "A"));
        index.upsert(entry("b", "B"));
        assert_eq!(slugs(&index), vec!["b", "a"]);
    }

    #[test]
    fn upsert_replaces_existing_slug_without_duplicating() {
        let mut index = ArticleIndex::new();
        index.upsert(entry("a", "A"));
        index.upsert(entry("b", "B"));
        index.upsert(entry("a", "A v2"));
        assert_eq!(index.len(), 2);
        assert_eq!(slugs(&index), vec!["a", "b"]);
        assert_eq!(index.entries()[0].title, "A v2");
    }

    #[test]
    fn remove_preserves_relative_order() {
        let mut index = ArticleIndex::new();
        for s in ["d", "c", "b", "a"] {
            index.upsert(entry(s, s));
        }
        assert!(index.remove(&Slug::parse("b").unwrap()));
        assert_eq!(slugs(&index), vec!["a", "c", "d"]);
    }

    #[test]
    fn remove_missing_slug_is_noop() {
        let mut index = ArticleIndex::new();
        index.upsert(entry("a", "A"));
        assert!(!index.remove(&Slug::parse("zzz").unwrap()));
        assert_eq!(index.len(), 1);
    }

    #[test]
    fn pretty_json_is_an_array_with_two_space_indent() {
        let mut index = ArticleIndex::new();
        index.upsert(entry("a", "A"));
        let json = index.to_json_pretty().unwrap();
        assert!(json.starts_with("[\n  {\n    \"slug\": \"a\""));
        assert_eq!(ArticleIndex::from_json(&json).unwrap(), index);
    }
}
