//! # pjpv-articles — Article publish/delete/reconcile operations
//!
//! Each operation is a short, stateless sequence of remote reads and
//! conditional writes against a [`pjpv_content::ContentStore`]:
//!
//! ```text
//! publish:   check caller → validate → GET page → PUT page (rev?) → GET index → PUT index (rev)
//! delete:    check caller → validate → GET page → DELETE page (rev)? → GET index → PUT index (rev)
//! reconcile: check caller → GET index → LIST articles/ → [PUT index (rev)] → [GET index → DELETE orphan pages (rev)]
//! ```
//!
//! ## Consistency
//!
//! The page and the index are two independent remote files. There is no
//! transaction spanning both and no retry: if the index write fails after
//! the page write, the page is left unlisted. Delete always rewrites the
//! index, which removes index entries whose page is already gone.
//! [`reconcile`] reports and repairs the remaining drift.
//!
//! Concurrent operations are not serialized locally. Each write carries the
//! revision captured by its own read, so the store rejects the loser of a
//! race with a [`pjpv_content::ContentError::Remote`].

pub mod caller;
pub mod delete;
pub mod error;
pub mod index;
pub mod publish;
pub mod reconcile;

pub use caller::Caller;
pub use delete::{delete_article, Deletion};
pub use error::ArticleError;
pub use publish::{publish_article, PublishRequest, Published};
pub use reconcile::{inspect, repair, ReconcileReport, RepairOptions, RepairOutcome};
