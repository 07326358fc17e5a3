//! # Publish Operation
//!
//! Validates a [`PublishRequest`], renders the page, writes it to
//! `articles/{slug}/index.html`, then upserts the summary at the head of
//! the index.
//!
//! ## Slugs
//!
//! An explicit `slug` is normalized and reused as is, so publishing twice
//! with the same explicit slug overwrites the page and replaces the index
//! entry. Without one, the slug is the normalized title plus a random
//! 6-hex-char suffix.
//!
//! ## Same-slug races
//!
//! The page write carries the revision read just before it. If another
//! publish or delete touched the page in between, the store rejects the
//! write and the operation fails with `Remote` before the index is read.

use pjpv_content::ContentStore;
use pjpv_core::render::render_page;
use pjpv_core::{Article, Attachment, PublishedAt, Slug, ValidationError};
use serde::{Deserialize, Serialize};

use crate::caller::Caller;
use crate::error::ArticleError;
use crate::index::{read_index, write_index};

/// Publish request body.
///
/// Unknown fields are rejected. `title` and `contentHTML` default to empty
/// so that their absence is reported as a validation error, not a parse
/// error.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields, rename_all = "camelCase")]
pub struct PublishRequest {
    #[serde(default)]
    pub title: String,
    #[serde(default, rename = "contentHTML")]
    pub content_html: String,
    #[serde(default)]
    pub cover_url: Option<String>,
    #[serde(default)]
    pub attachments: Vec<Attachment>,
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default, rename = "dateISO")]
    pub date_iso: Option<String>,
    #[serde(default)]
    pub slug: Option<String>,
    #[serde(default)]
    pub excerpt: Option<String>,
}

fn trimmed(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

impl PublishRequest {
    /// Apply the input schema and defaulting rules.
    ///
    /// - `title`, `contentHTML`: required, trimmed.
    /// - `author`: request → caller display name → caller email → "Bureau".
    /// - `dateISO`: request (validated) → now.
    /// - `slug`: normalized request slug → title + random suffix.
    /// - `coverUrl`, `excerpt`: trimmed, empty when absent.
    /// - `attachments`: each needs a non-blank `url`.
    pub fn into_article(self, caller: &Caller) -> Result<Article, ValidationError> {
        let title = self.title.trim();
        if title.is_empty() {
            return Err(ValidationError::MissingField("title"));
        }
        let body = self.content_html.trim();
        if body.is_empty() {
            return Err(ValidationError::MissingField("contentHTML"));
        }

        let mut attachments = Vec::with_capacity(self.attachments.len());
        for (index, attachment) in self.attachments.into_iter().enumerate() {
            let url = attachment.url.trim();
            if url.is_empty() {
                return Err(ValidationError::InvalidAttachment { index });
            }
            attachments.push(Attachment {
                url: url.to_string(),
                label: attachment.label,
            });
        }

        let slug = match trimmed(self.slug.as_deref()) {
            Some(explicit) => Slug::parse(explicit)?,
            None => Slug::generate(title),
        };

        let published_at = match trimmed(self.date_iso.as_deref()) {
            Some(raw) => PublishedAt::parse(raw)?,
            None => PublishedAt::now(),
        };

        let author = trimmed(self.author.as_deref()).unwrap_or_else(|| caller.author_name());

        Ok(Article {
            slug,
            title: title.to_string(),
            author: author.to_string(),
            published_at,
            cover_url: trimmed(self.cover_url.as_deref()).unwrap_or_default().to_string(),
            excerpt: trimmed(self.excerpt.as_deref()).unwrap_or_default().to_string(),
            body_html: body.to_string(),
            attachments,
        })
    }
}

/// Successful publish result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Published {
    pub slug: Slug,
    pub url: String,
}

/// Publish (or re-publish) an article.
///
/// Performs no remote call when `caller` is `None` or the request is
/// invalid.
pub async fn publish_article(
    store: &dyn ContentStore,
    caller: Option<&Caller>,
    request: PublishRequest,
) -> Result<Published, ArticleError> {
    let caller = caller.ok_or(ArticleError::Unauthorized)?;
    let article = request.into_article(caller)?;
    let slug = article.slug.clone();
    let page_path = slug.page_path();
    let html = render_page(&article);

    let existing = store.get(&page_path).await?;
    let replacing = existing.is_some();
    store
        .put(
            &page_path,
            &html,
            &format!("Publish article: {}", article.title),
            existing.as_ref().map(|f| &f.revision),
        )
        .await?;
    tracing::info!(%slug, replacing, backend = store.backend_name(), "article page written");

    let result = async {
        let mut snapshot = read_index(store).await?;
        snapshot.index.upsert(article.summary());
        write_index(store, &snapshot, &format!("Update articles index ({slug})")).await
    }
    .await;

    if let Err(err) = result {
        tracing::warn!(
            %slug,
            %page_path,
            error = %err,
            "page written but index update failed; page is not listed until re-published or reconciled"
        );
        return Err(err);
    }

    tracing::info!(%slug, "article indexed");
    Ok(Published {
        url: slug.url(),
        slug,
    })
}
