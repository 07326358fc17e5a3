//! # API Route Modules
//!
//! - `articles`: publish, delete and reconcile endpoints over the
//!   configured content store.

pub mod articles;
