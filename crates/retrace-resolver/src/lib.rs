//! Character search client for the Retrace alias tracker.
//!
//! Translates an observed `(name, world)` pair into a [`retrace_types::StableId`]
//! via a single HTTP query against an external character-search endpoint.
//! All failure modes collapse to the unresolved sentinel at the public
//! boundary; callers log and move on, there are no retries.
//!
//! # Modules
//!
//! - [`client`] -- HTTP client, response schema, and candidate match policy
//! - [`error`] -- Typed resolver errors

pub mod client;
pub mod error;

pub use client::{Candidate, SearchClient, select_candidate};
pub use error::ResolverError;
