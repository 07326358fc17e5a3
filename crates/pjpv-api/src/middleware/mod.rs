//! # Middleware
//!
//! Tower layers applied to the API router. Authentication lives in
//! [`crate::auth`].

pub mod tracing_layer;
