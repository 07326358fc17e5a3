#![deny(missing_docs)]

//! # pjpv-core — Foundational Types for the Parlement JPV Site
//!
//! This crate defines the types every other crate in the workspace agrees on.
//! It has no internal crate dependencies and performs no I/O.
//!
//! ## Design Principles
//!
//! 1. **[`Slug`] is the only way to name an article.** Every storage path
//!    (`articles/{slug}/index.html`) and public URL (`/articles/{slug}/`) is
//!    derived from a normalized slug, never from raw caller input.
//!
//! 2. **[`ArticleIndex`] owns the ordering rules.** Upsert-by-slug, newest
//!    first, removal preserving relative order. The operations crate only
//!    reads, mutates through these methods, and writes back.
//!
//! 3. **Rendering is pure.** [`render::render_page`] turns an [`Article`]
//!    into a self-contained HTML document with no network or clock access.

pub mod article;
pub mod error;
pub mod index;
pub mod render;
pub mod slug;
pub mod temporal;

pub use article::{Article, ArticleSummary, Attachment};
pub use error::ValidationError;
pub use index::{ArticleIndex, INDEX_PATH};
pub use slug::Slug;
pub use temporal::PublishedAt;

/// Directory under which article pages and the index live in the repository.
pub const ARTICLES_DIR: &str = "articles";
