//! Operation error kinds.
//!
//! | Variant        | Meaning                                   | HTTP |
//! |----------------|-------------------------------------------|------|
//! | `Unauthorized` | no caller identity                        | 401  |
//! | `InvalidInput` | request does not satisfy the input schema | 400  |
//! | `Remote`       | the content store failed or refused       | 500  |
//! | `CorruptIndex` | `articles/index.json` is not an array     | 500  |

use pjpv_content::ContentError;
use pjpv_core::ValidationError;
use thiserror::Error;

/// Failure of a publish, delete or reconcile operation.
#[derive(Error, Debug)]
pub enum ArticleError {
    #[error("Unauthorized")]
    Unauthorized,

    #[error(transparent)]
    InvalidInput(#[from] ValidationError),

    #[error(transparent)]
    Remote(#[from] ContentError),

    #[error("articles/index.json is not a valid index: {0}")]
    CorruptIndex(#[source] serde_json::Error),
}
