//! Error types for the cache layer.
//!
//! Uses `thiserror` for typed errors surfaced by the persistence path.
//! Load-side failures are recovered from by the store (an unreadable prior
//! state becomes an empty cache); persist-side failures propagate to the
//! caller for logging.

/// Errors that can occur while encoding, decoding, or storing the cache.
#[derive(Debug, thiserror::Error)]
pub enum CacheError {
    /// File could not be read or written.
    #[error("cache I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Record set could not be serialized or deserialized as JSON.
    #[error("cache serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    /// The stored blob could not be base64-decoded or decompressed.
    #[error("cache blob decode error: {0}")]
    Decode(String),
}
