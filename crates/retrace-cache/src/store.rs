//! File-backed cache store.
//!
//! The durable state is a small JSON envelope: a version field plus one
//! opaque string holding the encoded record set (see [`crate::codec`]).
//! Loading is tolerant by design -- a missing file, an unreadable envelope,
//! or a corrupt blob all start the process with an empty cache rather than
//! failing startup.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::cache::AliasCache;
use crate::codec;
use crate::error::CacheError;

/// Current version of the saved state envelope.
const STATE_VERSION: u32 = 1;

/// The on-disk envelope: a version tag plus the encoded record blob.
#[derive(Debug, Serialize, Deserialize)]
struct SavedState {
    /// Envelope version for forward-compatible migrations.
    version: u32,
    /// Base64-encoded, gzip-compressed JSON record set.
    records: String,
}

/// Durable store for the alias cache, bound to a single file path.
///
/// Constructed once at startup; there is no global singleton. The
/// resolution loop owns the store and is the only caller of
/// [`CacheStore::persist`].
#[derive(Debug)]
pub struct CacheStore {
    path: PathBuf,
}

impl CacheStore {
    /// Create a store bound to `path`. No I/O happens until
    /// [`CacheStore::load`] or [`CacheStore::persist`] is called.
    pub const fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// The file path this store reads and writes.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the cache from disk.
    ///
    /// Idempotent. Absent prior state or any decode failure yields an
    /// empty cache; failures are logged, never propagated.
    pub fn load(&self) -> AliasCache {
        match self.try_load() {
            Ok(Some(cache)) => {
                debug!(
                    path = %self.path.display(),
                    records = cache.len(),
                    "alias cache loaded"
                );
                cache
            }
            Ok(None) => {
                debug!(path = %self.path.display(), "no prior cache state");
                AliasCache::new()
            }
            Err(e) => {
                warn!(
                    path = %self.path.display(),
                    error = %e,
                    "cache state unreadable, starting empty"
                );
                AliasCache::new()
            }
        }
    }

    /// Serialize, compress, and write the full record set to disk.
    ///
    /// Writes go through a sibling temp file and an atomic rename so an
    /// interrupted write cannot truncate the previous good state.
    pub fn persist(&self, cache: &AliasCache) -> Result<(), CacheError> {
        let state = SavedState {
            version: STATE_VERSION,
            records: codec::encode_records(cache.records())?,
        };
        let json = serde_json::to_vec(&state)?;

        let tmp = self.path.with_extension("tmp");
        fs::write(&tmp, json)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }

    /// Read and decode the envelope. `Ok(None)` means no usable prior state.
    fn try_load(&self) -> Result<Option<AliasCache>, CacheError> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(CacheError::Io(e)),
        };
        let state: SavedState = serde_json::from_str(&raw)?;
        if state.version != STATE_VERSION {
            warn!(
                version = state.version,
                expected = STATE_VERSION,
                "unknown cache state version, starting empty"
            );
            return Ok(None);
        }
        let records = codec::decode_records(&state.records)?;
        Ok(Some(AliasCache::from_records(records)))
    }
}
