//! Error types for the resolver.
//!
//! All three variants collapse to [`retrace_types::StableId::UNRESOLVED`] at
//! the public [`crate::SearchClient::resolve`] boundary; they exist as typed
//! values so the checked path can be tested and logged precisely.

/// Errors that can occur while resolving a sighting.
#[derive(Debug, thiserror::Error)]
pub enum ResolverError {
    /// The lookup request could not complete (connect, timeout, or a
    /// non-success HTTP status).
    #[error("lookup request failed: {0}")]
    Network(String),

    /// The response body was not the expected candidate array shape.
    #[error("lookup response malformed: {0}")]
    MalformedResponse(String),

    /// The response was well-formed but no candidate matched the query.
    #[error("no candidate matched {name} on {world}")]
    NotFound {
        /// The queried display name.
        name: String,
        /// The queried world.
        world: String,
    },
}
