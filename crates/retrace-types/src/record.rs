//! Stable identities and their recorded alias histories.
//!
//! A character keeps one externally assigned [`StableId`] across renames and
//! world transfers. Every name/world pair ever observed for that identity is
//! recorded in an [`AliasList`], ordered by first sighting so the oldest
//! known alias is displayed first.

use serde::{Deserialize, Serialize};

/// The externally assigned, world-independent identifier for a character.
///
/// `0` is the "unresolved" sentinel returned when a lookup fails or finds no
/// match; it is never stored in the cache.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StableId(pub u64);

impl StableId {
    /// Sentinel for a sighting that could not be resolved.
    pub const UNRESOLVED: Self = Self(0);

    /// Whether this is the unresolved sentinel.
    pub const fn is_unresolved(self) -> bool {
        self.0 == 0
    }

    /// Return the inner `u64` value.
    pub const fn into_inner(self) -> u64 {
        self.0
    }
}

impl core::fmt::Display for StableId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for StableId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

/// A single historically observed `(name, world)` pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AliasEntry {
    /// Full display name as observed (e.g. `"Foo Bar"`).
    pub name: String,
    /// World the name was observed on.
    pub world: String,
}

/// Insertion-order-preserving mapping from display name to world.
///
/// Names are unique keys: observing a known name on a different world
/// overwrites the stored world in place rather than adding a second entry.
/// Iteration yields entries oldest-first.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AliasList {
    entries: Vec<AliasEntry>,
}

impl AliasList {
    /// Create an empty alias list.
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Insert or update an alias. Returns `true` if the list changed.
    ///
    /// An exact `(name, world)` duplicate is a no-op. A known name with a
    /// different world has its world overwritten, keeping its position.
    pub fn upsert(&mut self, name: &str, world: &str) -> bool {
        if let Some(entry) = self.entries.iter_mut().find(|e| e.name == name) {
            if entry.world == world {
                return false;
            }
            entry.world = world.to_owned();
            return true;
        }
        self.entries.push(AliasEntry {
            name: name.to_owned(),
            world: world.to_owned(),
        });
        true
    }

    /// Whether the exact `(name, world)` pair is present.
    pub fn contains(&self, name: &str, world: &str) -> bool {
        self.entries
            .iter()
            .any(|e| e.name == name && e.world == world)
    }

    /// Iterate entries in first-seen order.
    pub fn iter(&self) -> core::slice::Iter<'_, AliasEntry> {
        self.entries.iter()
    }

    /// The oldest recorded alias, if any.
    pub fn first(&self) -> Option<&AliasEntry> {
        self.entries.first()
    }

    /// Number of recorded aliases.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no aliases have been recorded.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<'a> IntoIterator for &'a AliasList {
    type Item = &'a AliasEntry;
    type IntoIter = core::slice::Iter<'a, AliasEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// One cached identity: a stable id plus every alias observed for it.
///
/// At most one record exists per [`StableId`]. Records are created on first
/// resolution, grow as new aliases are observed, and are never deleted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdentityRecord {
    /// The stable identity this record tracks.
    pub stable_id: StableId,
    /// Every name/world pair observed for the identity, oldest first.
    pub aliases: AliasList,
}

impl IdentityRecord {
    /// Create a record with a single initial alias.
    pub fn new(stable_id: StableId, name: &str, world: &str) -> Self {
        let mut aliases = AliasList::new();
        let _ = aliases.upsert(name, world);
        Self { stable_id, aliases }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn unresolved_sentinel() {
        assert!(StableId::UNRESOLVED.is_unresolved());
        assert!(StableId(0).is_unresolved());
        assert!(!StableId(42).is_unresolved());
    }

    #[test]
    fn upsert_deduplicates_exact_pairs() {
        let mut aliases = AliasList::new();
        assert!(aliases.upsert("Foo Bar", "Gilgamesh"));
        assert!(!aliases.upsert("Foo Bar", "Gilgamesh"));
        assert_eq!(aliases.len(), 1);
    }

    #[test]
    fn upsert_overwrites_world_in_place() {
        let mut aliases = AliasList::new();
        assert!(aliases.upsert("Foo Bar", "Gilgamesh"));
        assert!(aliases.upsert("Baz Qux", "Gilgamesh"));
        assert!(aliases.upsert("Foo Bar", "Excalibur"));

        let entries: Vec<_> = aliases
            .iter()
            .map(|e| (e.name.as_str(), e.world.as_str()))
            .collect();
        assert_eq!(
            entries,
            vec![("Foo Bar", "Excalibur"), ("Baz Qux", "Gilgamesh")]
        );
    }

    #[test]
    fn iteration_preserves_first_seen_order() {
        let mut aliases = AliasList::new();
        let _ = aliases.upsert("A One", "Adamantoise");
        let _ = aliases.upsert("B Two", "Behemoth");
        let _ = aliases.upsert("C Three", "Cactuar");

        let names: Vec<_> = aliases.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["A One", "B Two", "C Three"]);
        assert_eq!(aliases.first().unwrap().name, "A One");
    }

    #[test]
    fn alias_list_serializes_as_array() {
        let mut aliases = AliasList::new();
        let _ = aliases.upsert("Foo Bar", "Gilgamesh");
        let json = serde_json::to_string(&aliases).unwrap();
        assert_eq!(json, r#"[{"name":"Foo Bar","world":"Gilgamesh"}]"#);

        let back: AliasList = serde_json::from_str(&json).unwrap();
        assert_eq!(back, aliases);
    }

    #[test]
    fn stable_id_serializes_transparently() {
        let record = IdentityRecord::new(StableId(42), "Foo Bar", "Gilgamesh");
        let json = serde_json::to_string(&record).unwrap();
        assert!(json.contains(r#""stable_id":42"#));
    }
}
