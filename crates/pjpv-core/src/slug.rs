//! # Article Slugs
//!
//! A [`Slug`] is the URL-safe storage key of an article. It is always the
//! output of [`normalize`]: lowercase ASCII letters and digits separated by
//! single hyphens, with no leading or trailing hyphen.
//!
//! ## Normalization
//!
//! 1. Unicode NFKD decomposition.
//! 2. Combining diacritical marks (U+0300..=U+036F) are dropped, so `é`
//!    becomes `e`.
//! 3. Lowercase, trim.
//! 4. Every run of characters outside `[a-z0-9]` collapses to one `-`.
//! 5. Leading and trailing hyphens are removed.
//!
//! Normalization is idempotent: `normalize(normalize(s)) == normalize(s)`.

use rand_core::{OsRng, RngCore};
use serde::{Deserialize, Serialize};
use unicode_normalization::UnicodeNormalization;

use crate::error::ValidationError;
use crate::ARTICLES_DIR;

/// Number of random bytes in a generated disambiguator (two hex chars each).
const SUFFIX_BYTES: usize = 3;

/// Normalized, URL-safe article identifier.
///
/// Deserialization is transparent so that index documents written by other
/// tools still load; construction from caller input goes through
/// [`Slug::parse`] or [`Slug::generate`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Slug(String);

impl Slug {
    /// Normalize an explicit, caller-chosen slug.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidSlug`] when nothing survives
    /// normalization.
    pub fn parse(raw: &str) -> Result<Self, ValidationError> {
        let normalized = normalize(raw);
        if normalized.is_empty() {
            return Err(ValidationError::InvalidSlug(raw.to_string()));
        }
        Ok(Self(normalized))
    }

    /// Derive a slug from a title, appending a random 6-hex-char suffix.
    pub fn generate(title: &str) -> Self {
        let mut suffix = [0u8; SUFFIX_BYTES];
        OsRng.fill_bytes(&mut suffix);
        Self::with_suffix(title, suffix)
    }

    /// Derive a slug from a title with a caller-provided disambiguator.
    ///
    /// A title with no letters or digits yields the bare suffix.
    pub fn with_suffix(title: &str, suffix: [u8; SUFFIX_BYTES]) -> Self {
        let hex: String = suffix.iter().map(|b| format!("{b:02x}")).collect();
        let base = normalize(title);
        if base.is_empty() {
            Self(hex)
        } else {
            Self(format!("{base}-{hex}"))
        }
    }

    /// Access the slug string.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Repository path of the rendered page: `articles/{slug}/index.html`.
    pub fn page_path(&self) -> String {
        format!("{ARTICLES_DIR}/{}/index.html", self.0)
    }

    /// Public URL of the article: `/articles/{slug}/`.
    pub fn url(&self) -> String {
        format!("/{ARTICLES_DIR}/{}/", self.0)
    }
}

impl std::fmt::Display for Slug {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Slug {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Normalize arbitrary text into slug form. May return an empty string.
pub fn normalize(raw: &str) -> String {
    let folded = raw
        .nfkd()
        .filter(|c| !is_combining_accent(*c))
        .collect::<String>()
        .to_lowercase();

    let mut out = String::with_capacity(folded.len());
    let mut pending_separator = false;
    for c in folded.trim().chars() {
        if c.is_ascii_lowercase() || c.is_ascii_digit() {
            if pending_separator && !out.is_empty() {
                out.push('-');
            }
            pending_separator = false;
            out.push(c);
        } else {
            pending_separator = true;
        }
    }
    out
}

fn is_combining_accent(c: char) -> bool {
    ('\u{0300}'..='\u{036f}').contains(&c)
}
