//! # Articles
//!
//! An article exists in two places: the rendered page (full body) and one
//! [`ArticleSummary`] in the public index. The summary field names are the
//! wire names consumed by the static listing page, hence the explicit
//! renames.

use serde::{Deserialize, Serialize};

use crate::slug::Slug;
use crate::temporal::PublishedAt;

/// A downloadable file linked from an article page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Attachment {
    /// Target URL.
    pub url: String,
    /// Link text. Falls back to the URL when absent or blank.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

impl Attachment {
    /// Text shown for the link.
    pub fn display_label(&self) -> &str {
        match self.label.as_deref().map(str::trim) {
            Some(label) if !label.is_empty() => label,
            _ => &self.url,
        }
    }
}

/// One entry of `articles/index.json`.
///
/// Optional fields default to empty strings so that hand-edited index
/// entries still load.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArticleSummary {
    /// Storage key and public path segment.
    pub slug: Slug,
    /// Article title.
    pub title: String,
    /// Display name of the author.
    #[serde(default)]
    pub author: String,
    /// Publication timestamp as accepted at publish time.
    #[serde(rename = "dateISO", default)]
    pub date_iso: String,
    /// Cover image URL, or empty.
    #[serde(rename = "coverUrl", default)]
    pub cover_url: String,
    /// Short teaser, or empty.
    #[serde(default)]
    pub excerpt: String,
    /// Public URL, always `/articles/{slug}/`.
    #[serde(default)]
    pub url: String,
}

/// A fully specified article, ready to render and index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Article {
    /// Storage key.
    pub slug: Slug,
    /// Title, trimmed and non-empty.
    pub title: String,
    /// Author display name.
    pub author: String,
    /// Publication timestamp.
    pub published_at: PublishedAt,
    /// Cover image URL, or empty.
    pub cover_url: String,
    /// Short teaser, or empty.
    pub excerpt: String,
    /// Rendered body HTML, inserted verbatim into the page.
    pub body_html: String,
    /// Linked files.
    pub attachments: Vec<Attachment>,
}

impl Article {
    /// The index entry for this article. The body is not part of it.
    pub fn summary(&self) -> ArticleSummary {
        ArticleSummary {
            slug: self.slug.clone(),
            title: self.title.clone(),
            author: self.author.clone(),
            date_iso: self.published_at.as_str().to_string(),
            cover_url: self.cover_url.clone(),
            excerpt: self.excerpt.clone(),
            url: self.slug.url(),
        }
    }
}
