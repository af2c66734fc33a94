//! In-memory alias cache.
//!
//! Holds every [`IdentityRecord`] known to the process. Lookups are linear
//! scans: the record count is human-scale (hundreds, not millions), so no
//! index is kept.

use retrace_types::{IdentityRecord, StableId};

/// The full collection of cached identity records.
///
/// Mutated exclusively by the resolution loop; query paths hold read access
/// only. The cache only grows -- records are never deleted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AliasCache {
    records: Vec<IdentityRecord>,
}

impl AliasCache {
    /// Create an empty cache.
    pub const fn new() -> Self {
        Self {
            records: Vec::new(),
        }
    }

    /// Rebuild a cache from a previously persisted record set.
    pub const fn from_records(records: Vec<IdentityRecord>) -> Self {
        Self { records }
    }

    /// Merge a resolved sighting into the cache. Returns `true` if the
    /// cache changed.
    ///
    /// The unresolved sentinel is a no-op: a failed resolution must never
    /// create a record. Otherwise the alias is upserted into the existing
    /// record for `stable_id`, or a new single-alias record is created.
    pub fn merge(&mut self, stable_id: StableId, name: &str, world: &str) -> bool {
        if stable_id.is_unresolved() {
            return false;
        }
        if let Some(record) = self
            .records
            .iter_mut()
            .find(|r| r.stable_id == stable_id)
        {
            return record.aliases.upsert(name, world);
        }
        self.records.push(IdentityRecord::new(stable_id, name, world));
        true
    }

    /// Find the record for a stable identity, if cached.
    pub fn find_by_stable_id(&self, stable_id: StableId) -> Option<&IdentityRecord> {
        self.records.iter().find(|r| r.stable_id == stable_id)
    }

    /// Find the record whose alias history contains the exact
    /// `(name, world)` pair, if any.
    ///
    /// This is the lookup behind history queries; it reads the cache only
    /// and never consults the resolver.
    pub fn find_by_alias(&self, name: &str, world: &str) -> Option<&IdentityRecord> {
        self.records.iter().find(|r| r.aliases.contains(name, world))
    }

    /// All cached records, oldest first.
    pub fn records(&self) -> &[IdentityRecord] {
        &self.records
    }

    /// Number of cached identities.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the cache holds no records.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
