//! Alias cache and compressed persistence for the Retrace alias tracker.
//!
//! The cache owns the full set of [`retrace_types::IdentityRecord`]s and is
//! mutated by exactly one writer (the resolution loop). Persistence stores
//! the whole record set as a versioned envelope holding a base64-encoded,
//! gzip-compressed JSON blob, and treats any load failure as an empty cache.
//!
//! # Modules
//!
//! - [`cache`] -- In-memory record set with merge and lookup operations
//! - [`codec`] -- JSON / gzip / base64 blob encoding
//! - [`store`] -- File-backed load and persist
//! - [`error`] -- Typed cache errors

pub mod cache;
pub mod codec;
pub mod error;
pub mod store;

pub use cache::AliasCache;
pub use error::CacheError;
pub use store::CacheStore;
