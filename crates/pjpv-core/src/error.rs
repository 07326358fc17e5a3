//! # Validation Errors
//!
//! Raised when caller-supplied article data does not satisfy the input
//! schema.

use thiserror::Error;

/// Domain primitive validation failure.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// A required field was absent or blank after trimming.
    #[error("{0} required")]
    MissingField(&'static str),

    /// The value normalizes to an empty slug.
    #[error("invalid slug: {0:?} contains no letters or digits")]
    InvalidSlug(String),

    /// The publication date is not an ISO 8601 date or datetime.
    #[error("invalid dateISO: {0:?}")]
    InvalidDate(String),

    /// An attachment was supplied without a URL.
    #[error("attachment {index} has no url")]
    InvalidAttachment {
        /// Position of the attachment in the request.
        index: usize,
    },
}
