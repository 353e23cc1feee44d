//! Attache Core - Domain types for the query result cache
//!
//! This crate provides the types shared between the cache adapter and the
//! host that embeds it: query parameters, requests, entities, query output
//! and the error hierarchy.
//!
//! # Example
//!
//! ```
//! use attache_core::{QueryRequest, QueryValue};
//!
//! let request = QueryRequest::new()
//!     .with_param("post_type", "attachment")
//!     .with_param("post_status", "any");
//!
//! assert_eq!(request.get("post_type"), Some(&QueryValue::from("attachment")));
//! assert!(!request.is_cacheable());
//! ```

pub mod entity;
pub mod error;
pub mod query;

pub use entity::{Entity, EntityId, QueryOutput};
pub use error::{AttacheError, Result};
pub use query::{QueryRequest, QueryValue, params};

/// Returns the crate version.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
