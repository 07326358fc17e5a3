//! # pjpv-content — Typed client for the repository contents API
//!
//! Published articles live as plain files in a version-controlled
//! repository. This crate is the only path through which the rest of the
//! workspace reads or writes those files.
//!
//! ## Compare-and-swap contract
//!
//! Every read returns a [`Revision`] (the remote blob hash). Every overwrite
//! or delete must carry the revision read earlier; the remote store rejects
//! stale revisions. Rejections surface as [`ContentError::Remote`] and are
//! never retried here.
//!
//! ## Backends
//!
//! | Type                    | Transport                   | Use            |
//! |-------------------------|-----------------------------|----------------|
//! | [`GitHubContentClient`] | GitHub `/repos/.../contents` | production     |
//! | [`MemoryStore`]         | in-process map              | tests, dry runs |
//!
//! Both implement [`ContentStore`].

pub mod config;
pub mod error;
pub mod github;
pub mod memory;
pub mod store;

pub use config::{ConfigError, ContentRepoConfig};
pub use error::ContentError;
pub use github::GitHubContentClient;
pub use memory::MemoryStore;
pub use store::{ContentStore, DirEntry, EntryKind, RemoteFile, Revision};
